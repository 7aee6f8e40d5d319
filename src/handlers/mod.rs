pub mod pizza;
pub mod restaurant;
pub mod restaurant_pizza;

// Re-export routers for easier importing
pub use pizza::router as pizza_router;
pub use restaurant::router as restaurant_router;
pub use restaurant_pizza::router as restaurant_pizza_router;

use axum::{response::Html, routing::get, Router};
use utoipa::OpenApi;

pub fn api_router() -> Router {
    Router::new()
        .route("/", get(index))
        .merge(restaurant_router())
        .merge(pizza_router())
        .merge(restaurant_pizza_router())
}

async fn index() -> Html<&'static str> {
    Html("<h1>Pizzeria API</h1>")
}

#[derive(OpenApi)]
#[openapi(
    paths(
        restaurant::list_restaurants,
        restaurant::get_restaurant,
        restaurant::delete_restaurant,
        pizza::list_pizzas,
        restaurant_pizza::create_restaurant_pizza,
    ),
    components(
        schemas(
            crate::views::RestaurantSummary,
            crate::views::RestaurantDetail,
            crate::views::RestaurantPizzaSummary,
            crate::views::PizzaSummary,
            crate::views::CreateRestaurantPizzaRequest,
            crate::views::CreateRestaurantPizzaResponse,
            crate::views::ApiErrorResponse,
            crate::views::ApiErrorsResponse
        )
    ),
    tags(
        (name = "restaurants", description = "Restaurant endpoints"),
        (name = "pizzas", description = "Pizza endpoints"),
        (name = "restaurant_pizzas", description = "Pizza offering endpoints")
    ),
    info(
        title = "Pizzeria API",
        description = "Restaurants, pizzas, and the offers linking them",
        version = "1.0.0"
    )
)]
pub struct ApiDoc;
