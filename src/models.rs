//! Row types for the `users`, `products` and `orders` tables and for the
//! analytical reports built on top of them.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::FromRow;

/// A row from the `users` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct User {
    pub user_id: i32,
    pub username: String,
    pub email: String,
}

impl User {
    pub fn new(user_id: i32, username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            user_id,
            username: username.into(),
            email: email.into(),
        }
    }
}

/// A row from the `products` table. `price` is DECIMAL(10,2).
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Product {
    pub product_id: i32,
    pub product_name: String,
    pub price: Decimal,
}

impl Product {
    pub fn new(product_id: i32, product_name: impl Into<String>, price: Decimal) -> Self {
        Self {
            product_id,
            product_name: product_name.into(),
            price,
        }
    }
}

/// A row from the `orders` table.
///
/// Each order references exactly one user and one product.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Order {
    pub order_id: i32,
    pub user_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub order_date: NaiveDate,
}

impl Order {
    pub fn new(
        order_id: i32,
        user_id: i32,
        product_id: i32,
        quantity: i32,
        order_date: NaiveDate,
    ) -> Self {
        Self {
            order_id,
            user_id,
            product_id,
            quantity,
            order_date,
        }
    }
}

/// Flattened view of an order joined with its user and product.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct OrderDetail {
    pub order_id: i32,
    pub username: String,
    pub product_name: String,
    pub quantity: i32,
    pub order_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct UserOrderCount {
    pub username: String,
    pub order_count: i64,
}

/// Sum of `price * quantity` over a user's orders.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct UserSpend {
    pub username: String,
    pub total_spent: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct ProductSales {
    pub product_name: String,
    pub total_sold: i64,
}
