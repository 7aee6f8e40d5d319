use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Pizza, Restaurant, RestaurantPizza};
use crate::schema::{pizzas, restaurant_pizzas, restaurants};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Restaurant not found")]
    NotFound,
    #[error("{0}")]
    Validation(String),
    #[error("Unexpected database error")]
    Database(#[from] DieselError),
}

/// Accepted price bounds for an offered pizza, inclusive on both ends.
#[derive(Debug, Clone, Copy)]
pub struct PricePolicy {
    pub min: i32,
    pub max: i32,
}

impl Default for PricePolicy {
    fn default() -> Self {
        Self { min: 1, max: 30 }
    }
}

impl PricePolicy {
    pub fn check(&self, price: i32) -> Result<(), StoreError> {
        if price < self.min || price > self.max {
            return Err(StoreError::Validation(format!(
                "Price must be between {} and {}",
                self.min, self.max
            )));
        }
        Ok(())
    }
}

pub fn list_restaurants(conn: &mut PgConnection) -> Result<Vec<Restaurant>, StoreError> {
    let results = restaurants::table
        .select(Restaurant::as_select())
        .load(conn)?;
    Ok(results)
}

pub fn get_restaurant(
    conn: &mut PgConnection,
    id: Uuid,
) -> Result<(Restaurant, Vec<(RestaurantPizza, Pizza)>), StoreError> {
    let restaurant = restaurants::table
        .find(&id)
        .select(Restaurant::as_select())
        .first(conn)
        .optional()?
        .ok_or(StoreError::NotFound)?;

    let offers = RestaurantPizza::belonging_to(&restaurant)
        .inner_join(pizzas::table)
        .select((RestaurantPizza::as_select(), Pizza::as_select()))
        .load::<(RestaurantPizza, Pizza)>(conn)?;

    Ok((restaurant, offers))
}

/// Join rows go first; the schema has no ON DELETE CASCADE.
pub fn delete_restaurant(conn: &mut PgConnection, id: Uuid) -> Result<(), StoreError> {
    conn.transaction(|conn| {
        let restaurant = restaurants::table
            .find(&id)
            .select(Restaurant::as_select())
            .first(conn)
            .optional()?
            .ok_or(StoreError::NotFound)?;

        diesel::delete(RestaurantPizza::belonging_to(&restaurant)).execute(conn)?;
        diesel::delete(restaurants::table.find(&id)).execute(conn)?;

        Ok(())
    })
}

pub fn list_pizzas(conn: &mut PgConnection) -> Result<Vec<Pizza>, StoreError> {
    let results = pizzas::table.select(Pizza::as_select()).load(conn)?;
    Ok(results)
}

pub fn create_restaurant_pizza(
    conn: &mut PgConnection,
    price: i32,
    pizza_id: Uuid,
    restaurant_id: Uuid,
    policy: PricePolicy,
) -> Result<(RestaurantPizza, Pizza, Restaurant), StoreError> {
    policy.check(price)?;

    let offer = RestaurantPizza {
        id: Uuid::new_v4(),
        price,
        restaurant_id,
        pizza_id,
    };

    conn.transaction(|conn| {
        diesel::insert_into(restaurant_pizzas::table)
            .values(&offer)
            .execute(conn)
            .map_err(classify_insert_error)?;

        let pizza = pizzas::table
            .find(&offer.pizza_id)
            .select(Pizza::as_select())
            .first(conn)?;
        let restaurant = restaurants::table
            .find(&offer.restaurant_id)
            .select(Restaurant::as_select())
            .first(conn)?;

        Ok((offer, pizza, restaurant))
    })
}

fn classify_insert_error(err: DieselError) -> StoreError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
            let field = match info.constraint_name() {
                Some(name) if name.contains("pizza_id") => "pizza_id",
                Some(name) if name.contains("restaurant_id") => "restaurant_id",
                _ => "foreign key",
            };
            StoreError::Validation(format!("Unknown {field}"))
        }
        other => StoreError::Database(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::establish_connection;
    use diesel_migrations::MigrationHarness;
    use std::sync::Once;

    static MIGRATE: Once = Once::new();

    fn setup_database() -> PgConnection {
        let mut conn = establish_connection();
        MIGRATE.call_once(|| {
            conn.run_pending_migrations(crate::MIGRATIONS)
                .expect("Failed to run migrations");
        });
        conn
    }

    fn insert_restaurant(conn: &mut PgConnection, name: &str) -> Restaurant {
        let restaurant = Restaurant {
            id: Uuid::new_v4(),
            name: name.to_string(),
            address: Some("1 Test Street".to_string()),
        };
        diesel::insert_into(restaurants::table)
            .values(&restaurant)
            .execute(conn)
            .unwrap();
        restaurant
    }

    fn insert_pizza(conn: &mut PgConnection, name: &str) -> Pizza {
        let pizza = Pizza {
            id: Uuid::new_v4(),
            name: name.to_string(),
            ingredients: "Dough, Tomato Sauce, Cheese".to_string(),
        };
        diesel::insert_into(pizzas::table)
            .values(&pizza)
            .execute(conn)
            .unwrap();
        pizza
    }

    #[test]
    fn test_get_restaurant_with_offers() {
        let conn = &mut setup_database();
        let restaurant = insert_restaurant(conn, "Pizza Palace");
        let pizza = insert_pizza(conn, "Margherita");

        let (offer, _, _) =
            create_restaurant_pizza(conn, 10, pizza.id, restaurant.id, PricePolicy::default())
                .unwrap();

        let (found, offers) = get_restaurant(conn, restaurant.id).unwrap();
        assert_eq!(found.name, "Pizza Palace");
        assert_eq!(offers.len(), 1);
        assert_eq!(offers[0].0.id, offer.id);
        assert_eq!(offers[0].0.price, 10);
        assert_eq!(offers[0].1.name, "Margherita");
    }

    #[test]
    fn test_get_restaurant_missing() {
        let conn = &mut setup_database();
        let result = get_restaurant(conn, Uuid::new_v4());
        assert!(matches!(result, Err(StoreError::NotFound)));
    }

    #[test]
    fn test_delete_restaurant_removes_offers() {
        let conn = &mut setup_database();
        let restaurant = insert_restaurant(conn, "Doomed Diner");
        let pizza = insert_pizza(conn, "Quattro Formaggi");
        create_restaurant_pizza(conn, 15, pizza.id, restaurant.id, PricePolicy::default())
            .unwrap();

        delete_restaurant(conn, restaurant.id).unwrap();

        let result = get_restaurant(conn, restaurant.id);
        assert!(matches!(result, Err(StoreError::NotFound)));

        let remaining: i64 = restaurant_pizzas::table
            .filter(restaurant_pizzas::restaurant_id.eq(restaurant.id))
            .count()
            .get_result(conn)
            .unwrap();
        assert_eq!(remaining, 0);
    }

    #[test]
    fn test_delete_restaurant_missing() {
        let conn = &mut setup_database();
        let result = delete_restaurant(conn, Uuid::new_v4());
        assert!(matches!(result, Err(StoreError::NotFound)));
    }

    #[test]
    fn test_create_restaurant_pizza_invalid_price() {
        let conn = &mut setup_database();
        let restaurant = insert_restaurant(conn, "Picky Pricing");
        let pizza = insert_pizza(conn, "Diavola");

        for price in [0, 31, 1000] {
            let result = create_restaurant_pizza(
                conn,
                price,
                pizza.id,
                restaurant.id,
                PricePolicy::default(),
            );
            match result {
                Err(StoreError::Validation(message)) => {
                    assert_eq!(message, "Price must be between 1 and 30");
                }
                other => panic!("expected validation error, got {other:?}"),
            }
        }

        let persisted: i64 = restaurant_pizzas::table
            .filter(restaurant_pizzas::restaurant_id.eq(restaurant.id))
            .count()
            .get_result(conn)
            .unwrap();
        assert_eq!(persisted, 0);
    }

    #[test]
    fn test_create_restaurant_pizza_unknown_pizza() {
        let conn = &mut setup_database();
        let restaurant = insert_restaurant(conn, "No Such Pizza");

        let result = create_restaurant_pizza(
            conn,
            5,
            Uuid::new_v4(),
            restaurant.id,
            PricePolicy::default(),
        );
        match result {
            Err(StoreError::Validation(message)) => {
                assert_eq!(message, "Unknown pizza_id");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_create_restaurant_pizza_unknown_restaurant() {
        let conn = &mut setup_database();
        let pizza = insert_pizza(conn, "Orphan Pie");

        let result =
            create_restaurant_pizza(conn, 5, pizza.id, Uuid::new_v4(), PricePolicy::default());
        match result {
            Err(StoreError::Validation(message)) => {
                assert_eq!(message, "Unknown restaurant_id");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_price_policy_bounds_inclusive() {
        let policy = PricePolicy::default();
        assert!(policy.check(1).is_ok());
        assert!(policy.check(30).is_ok());
        assert!(policy.check(0).is_err());
        assert!(policy.check(31).is_err());
    }
}
