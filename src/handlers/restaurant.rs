use axum::{
    extract::Path,
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::ApiError;
use crate::views::{RestaurantDetail, RestaurantSummary};
use crate::{establish_connection, store};

pub fn router() -> Router {
    Router::new()
        .route("/restaurants", get(list_restaurants))
        .route(
            "/restaurants/{id}",
            get(get_restaurant).delete(delete_restaurant),
        )
}

#[utoipa::path(
    get,
    path = "/restaurants",
    responses(
        (status = 200, description = "List of restaurants", body = [RestaurantSummary]),
    ),
    tag = "restaurants"
)]
#[instrument]
pub async fn list_restaurants() -> Result<Json<Vec<RestaurantSummary>>, ApiError> {
    let conn = &mut establish_connection();
    let restaurants = store::list_restaurants(conn)?;

    Ok(Json(
        restaurants.into_iter().map(RestaurantSummary::from).collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/restaurants/{id}",
    responses(
        (status = 200, description = "Restaurant with its offered pizzas", body = RestaurantDetail),
        (status = 404, description = "Restaurant not found", body = crate::views::ApiErrorResponse),
    ),
    params(
        ("id" = String, Path, description = "Restaurant ID")
    ),
    tag = "restaurants"
)]
#[instrument]
pub async fn get_restaurant(
    Path(restaurant_id): Path<String>,
) -> Result<Json<RestaurantDetail>, ApiError> {
    // An id that is not a UUID cannot name a restaurant.
    let restaurant_id = restaurant_id
        .parse::<Uuid>()
        .map_err(|_| ApiError::RestaurantNotFound)?;

    let conn = &mut establish_connection();
    let (restaurant, offers) = store::get_restaurant(conn, restaurant_id)?;

    Ok(Json(RestaurantDetail::from((restaurant, offers))))
}

#[utoipa::path(
    delete,
    path = "/restaurants/{id}",
    responses(
        (status = 204, description = "Restaurant and its offers deleted"),
        (status = 404, description = "Restaurant not found", body = crate::views::ApiErrorResponse),
    ),
    params(
        ("id" = String, Path, description = "Restaurant ID")
    ),
    tag = "restaurants"
)]
#[instrument]
pub async fn delete_restaurant(Path(restaurant_id): Path<String>) -> Result<StatusCode, ApiError> {
    let restaurant_id = restaurant_id
        .parse::<Uuid>()
        .map_err(|_| ApiError::RestaurantNotFound)?;

    let conn = &mut establish_connection();
    store::delete_restaurant(conn, restaurant_id)?;

    Ok(StatusCode::NO_CONTENT)
}
