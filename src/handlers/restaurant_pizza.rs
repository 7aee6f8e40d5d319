use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::Json,
    routing::post,
    Router,
};
use tracing::instrument;

use crate::error::ApiError;
use crate::store::{self, PricePolicy};
use crate::views::{CreateRestaurantPizzaRequest, CreateRestaurantPizzaResponse};
use crate::establish_connection;

pub fn router() -> Router {
    Router::new().route("/restaurant_pizzas", post(create_restaurant_pizza))
}

#[utoipa::path(
    post,
    path = "/restaurant_pizzas",
    request_body = CreateRestaurantPizzaRequest,
    responses(
        (status = 201, description = "Offer created", body = CreateRestaurantPizzaResponse),
        (status = 400, description = "Invalid body or validation failure", body = crate::views::ApiErrorsResponse),
    ),
    tag = "restaurant_pizzas"
)]
#[instrument]
pub async fn create_restaurant_pizza(
    payload: Result<Json<CreateRestaurantPizzaRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateRestaurantPizzaResponse>), ApiError> {
    let Json(payload) =
        payload.map_err(|_| ApiError::Validation(vec!["Invalid JSON".to_string()]))?;

    let conn = &mut establish_connection();
    let created = store::create_restaurant_pizza(
        conn,
        payload.price,
        payload.pizza_id,
        payload.restaurant_id,
        PricePolicy::default(),
    )?;

    Ok((StatusCode::CREATED, Json(created.into())))
}
