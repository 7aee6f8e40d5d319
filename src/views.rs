//! Response projections. Each endpoint serializes through an explicit
//! allow-list type, so the bidirectional restaurant/pizza relationship
//! can never recurse.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models;

#[derive(Debug, Serialize, ToSchema)]
pub struct RestaurantSummary {
    /// Unique identifier for the restaurant
    pub id: Uuid,
    /// Name of the restaurant
    pub name: String,
    /// Street address, if known
    pub address: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PizzaSummary {
    /// Unique identifier for the pizza
    pub id: Uuid,
    /// Name of the pizza
    pub name: String,
    /// Comma-separated ingredient list
    pub ingredients: String,
}

/// An offer as nested under its restaurant; carries the pizza but not the
/// restaurant backreference.
#[derive(Debug, Serialize, ToSchema)]
pub struct RestaurantPizzaSummary {
    pub id: Uuid,
    pub price: i32,
    pub pizza_id: Uuid,
    pub restaurant_id: Uuid,
    pub pizza: PizzaSummary,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RestaurantDetail {
    pub id: Uuid,
    pub name: String,
    pub address: Option<String>,
    pub restaurant_pizzas: Vec<RestaurantPizzaSummary>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateRestaurantPizzaRequest {
    /// Price of the offered pizza
    pub price: i32,
    /// Identifier of an existing pizza
    pub pizza_id: Uuid,
    /// Identifier of an existing restaurant
    pub restaurant_id: Uuid,
}

/// The created offer with both parents attached; neither parent carries its
/// own offer collection.
#[derive(Debug, Serialize, ToSchema)]
pub struct CreateRestaurantPizzaResponse {
    pub id: Uuid,
    pub price: i32,
    pub pizza_id: Uuid,
    pub restaurant_id: Uuid,
    pub pizza: PizzaSummary,
    pub restaurant: RestaurantSummary,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiErrorResponse {
    /// Error message
    pub error: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiErrorsResponse {
    /// One entry per validation failure
    pub errors: Vec<String>,
}

impl From<models::Restaurant> for RestaurantSummary {
    fn from(restaurant: models::Restaurant) -> Self {
        Self {
            id: restaurant.id,
            name: restaurant.name,
            address: restaurant.address,
        }
    }
}

impl From<models::Pizza> for PizzaSummary {
    fn from(pizza: models::Pizza) -> Self {
        Self {
            id: pizza.id,
            name: pizza.name,
            ingredients: pizza.ingredients,
        }
    }
}

impl From<(models::RestaurantPizza, models::Pizza)> for RestaurantPizzaSummary {
    fn from((offer, pizza): (models::RestaurantPizza, models::Pizza)) -> Self {
        Self {
            id: offer.id,
            price: offer.price,
            pizza_id: offer.pizza_id,
            restaurant_id: offer.restaurant_id,
            pizza: pizza.into(),
        }
    }
}

impl From<(models::Restaurant, Vec<(models::RestaurantPizza, models::Pizza)>)> for RestaurantDetail {
    fn from(
        (restaurant, offers): (models::Restaurant, Vec<(models::RestaurantPizza, models::Pizza)>),
    ) -> Self {
        Self {
            id: restaurant.id,
            name: restaurant.name,
            address: restaurant.address,
            restaurant_pizzas: offers.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<(models::RestaurantPizza, models::Pizza, models::Restaurant)>
    for CreateRestaurantPizzaResponse
{
    fn from(
        (offer, pizza, restaurant): (models::RestaurantPizza, models::Pizza, models::Restaurant),
    ) -> Self {
        Self {
            id: offer.id,
            price: offer.price,
            pizza_id: offer.pizza_id,
            restaurant_id: offer.restaurant_id,
            pizza: pizza.into(),
            restaurant: restaurant.into(),
        }
    }
}
