//! Fixed seed rows: five users, ten products and twenty orders.
//!
//! Prices are stored here in cents and dates as `(year, month, day)` so the
//! tables stay plain literals.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::{Order, Product, User};
use crate::repositories::{OrderRepository, ProductRepository, UserRepository};
use crate::{DatasetError, DatasetResult, Executor};

const USERS: [(i32, &str, &str); 5] = [
    (1, "alice", "alice@example.com"),
    (2, "bob", "bob@example.com"),
    (3, "charlie", "charlie@example.com"),
    (4, "diana", "diana@example.com"),
    (5, "eve", "eve@example.com"),
];

const PRODUCTS: [(i32, &str, i64); 10] = [
    (1, "Laptop", 120_000),
    (2, "Mouse", 2_550),
    (3, "Keyboard", 4_500),
    (4, "Monitor", 30_000),
    (5, "USB Hub", 2_000),
    (6, "Webcam", 6_000),
    (7, "Headphones", 8_000),
    (8, "Desk Lamp", 3_500),
    (9, "External SSD", 15_000),
    (10, "Mouse Pad", 1_000),
];

// (order_id, user_id, product_id, quantity, (y, m, d))
const ORDERS: [(i32, i32, i32, i32, (i32, u32, u32)); 20] = [
    (1, 1, 1, 1, (2024, 1, 5)),
    (2, 2, 2, 1, (2024, 1, 7)),
    (3, 1, 2, 2, (2024, 1, 10)),
    (4, 3, 3, 1, (2024, 1, 12)),
    (5, 4, 4, 2, (2024, 1, 15)),
    (6, 2, 5, 3, (2024, 1, 20)),
    (7, 1, 6, 1, (2024, 2, 1)),
    (8, 3, 7, 1, (2024, 2, 3)),
    (9, 4, 8, 1, (2024, 2, 5)),
    (10, 2, 9, 1, (2024, 2, 10)),
    (11, 3, 10, 2, (2024, 2, 14)),
    (12, 4, 2, 1, (2024, 2, 20)),
    (13, 2, 3, 1, (2024, 3, 1)),
    (14, 1, 1, 1, (2024, 3, 3)),
    (15, 3, 4, 1, (2024, 3, 8)),
    (16, 4, 7, 2, (2024, 3, 12)),
    (17, 2, 6, 1, (2024, 3, 15)),
    (18, 3, 5, 1, (2024, 3, 20)),
    (19, 4, 9, 1, (2024, 3, 25)),
    (20, 2, 2, 2, (2024, 3, 28)),
];

pub fn users() -> Vec<User> {
    USERS
        .iter()
        .map(|&(id, username, email)| User::new(id, username, email))
        .collect()
}

pub fn products() -> Vec<Product> {
    PRODUCTS
        .iter()
        .map(|&(id, name, cents)| Product::new(id, name, Decimal::new(cents, 2)))
        .collect()
}

pub fn orders() -> DatasetResult<Vec<Order>> {
    ORDERS
        .iter()
        .map(|&(id, user_id, product_id, quantity, (y, m, d))| -> DatasetResult<Order> {
            let order_date = NaiveDate::from_ymd_opt(y, m, d).ok_or_else(|| {
                DatasetError::InvalidFixture(format!("order {id} has invalid date {y}-{m}-{d}"))
            })?;
            Ok(Order::new(id, user_id, product_id, quantity, order_date))
        })
        .collect()
}

/// Insert every fixture row through the executor, parents first.
///
/// The caller owns the transaction; on error nothing should be committed.
pub async fn seed(executor: &Executor) -> DatasetResult<()> {
    let orders = orders()?;

    let user_repo = UserRepository::new(executor.clone());
    for user in users() {
        user_repo.insert(&user).await?;
    }

    let product_repo = ProductRepository::new(executor.clone());
    for product in products() {
        product_repo.insert(&product).await?;
    }

    let order_repo = OrderRepository::new(executor.clone());
    for order in &orders {
        order_repo.insert(order).await?;
    }

    tracing::info!(
        users = USERS.len(),
        products = PRODUCTS.len(),
        orders = orders.len(),
        "seeded dataset"
    );
    Ok(())
}
