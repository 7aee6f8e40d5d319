use axum::{response::Json, routing::get, Router};
use tracing::instrument;

use crate::error::ApiError;
use crate::views::PizzaSummary;
use crate::{establish_connection, store};

pub fn router() -> Router {
    Router::new().route("/pizzas", get(list_pizzas))
}

#[utoipa::path(
    get,
    path = "/pizzas",
    responses(
        (status = 200, description = "List of pizzas", body = [PizzaSummary]),
    ),
    tag = "pizzas"
)]
#[instrument]
pub async fn list_pizzas() -> Result<Json<Vec<PizzaSummary>>, ApiError> {
    let conn = &mut establish_connection();
    let pizzas = store::list_pizzas(conn)?;

    Ok(Json(pizzas.into_iter().map(PizzaSummary::from).collect()))
}
