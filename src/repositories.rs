//! Per-table access for users, products and orders.
//!
//! Every repository borrows the session [`Executor`], so inserts and reads
//! issued through it share the session's transaction.

use rust_decimal::Decimal;
use sqlx::Row;

use crate::models::{Order, Product, User};
use crate::{DatasetError, DatasetResult, Executor};

const USER_COLUMNS: &str = "user_id, username, email";
const PRODUCT_COLUMNS: &str = "product_id, product_name, price";
const ORDER_COLUMNS: &str = "order_id, user_id, product_id, quantity, order_date";

/// Repository for the `users` table.
#[derive(Clone)]
pub struct UserRepository {
    executor: Executor,
}

impl UserRepository {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }

    /// Insert a user. Fails with a unique violation if `user_id` is taken.
    pub async fn insert(&self, user: &User) -> DatasetResult<()> {
        let mut tx_guard = self.executor.lock().await;
        let tx = tx_guard.as_mut().ok_or(DatasetError::TransactionClosed)?;
        sqlx::query("INSERT INTO users (user_id, username, email) VALUES ($1, $2, $3)")
            .bind(user.user_id)
            .bind(&user.username)
            .bind(&user.email)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }

    pub async fn list_all(&self) -> DatasetResult<Vec<User>> {
        let mut tx_guard = self.executor.lock().await;
        let tx = tx_guard.as_mut().ok_or(DatasetError::TransactionClosed)?;
        let query = format!("SELECT {USER_COLUMNS} FROM users ORDER BY user_id");
        let users = sqlx::query_as::<_, User>(&query)
            .fetch_all(&mut **tx)
            .await?;
        Ok(users)
    }

    pub async fn find_by_id(&self, user_id: i32) -> DatasetResult<Option<User>> {
        let mut tx_guard = self.executor.lock().await;
        let tx = tx_guard.as_mut().ok_or(DatasetError::TransactionClosed)?;
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE user_id = $1");
        let user = sqlx::query_as::<_, User>(&query)
            .bind(user_id)
            .fetch_optional(&mut **tx)
            .await?;
        Ok(user)
    }

    pub async fn count(&self) -> DatasetResult<i64> {
        let mut tx_guard = self.executor.lock().await;
        let tx = tx_guard.as_mut().ok_or(DatasetError::TransactionClosed)?;
        let row = sqlx::query("SELECT COUNT(*) AS count FROM users")
            .fetch_one(&mut **tx)
            .await?;
        Ok(row.try_get("count")?)
    }
}

/// Repository for the `products` table.
#[derive(Clone)]
pub struct ProductRepository {
    executor: Executor,
}

impl ProductRepository {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }

    /// Insert a product. Fails with a unique violation if `product_id` is taken.
    pub async fn insert(&self, product: &Product) -> DatasetResult<()> {
        let mut tx_guard = self.executor.lock().await;
        let tx = tx_guard.as_mut().ok_or(DatasetError::TransactionClosed)?;
        sqlx::query("INSERT INTO products (product_id, product_name, price) VALUES ($1, $2, $3)")
            .bind(product.product_id)
            .bind(&product.product_name)
            .bind(product.price)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }

    pub async fn list_all(&self) -> DatasetResult<Vec<Product>> {
        let mut tx_guard = self.executor.lock().await;
        let tx = tx_guard.as_mut().ok_or(DatasetError::TransactionClosed)?;
        let query = format!("SELECT {PRODUCT_COLUMNS} FROM products ORDER BY product_id");
        let products = sqlx::query_as::<_, Product>(&query)
            .fetch_all(&mut **tx)
            .await?;
        Ok(products)
    }

    pub async fn find_by_id(&self, product_id: i32) -> DatasetResult<Option<Product>> {
        let mut tx_guard = self.executor.lock().await;
        let tx = tx_guard.as_mut().ok_or(DatasetError::TransactionClosed)?;
        let query = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE product_id = $1");
        let product = sqlx::query_as::<_, Product>(&query)
            .bind(product_id)
            .fetch_optional(&mut **tx)
            .await?;
        Ok(product)
    }

    /// Products whose price is strictly greater than `threshold`.
    pub async fn priced_above(&self, threshold: Decimal) -> DatasetResult<Vec<Product>> {
        let mut tx_guard = self.executor.lock().await;
        let tx = tx_guard.as_mut().ok_or(DatasetError::TransactionClosed)?;
        let query = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products \
             WHERE price > $1 ORDER BY product_id"
        );
        let products = sqlx::query_as::<_, Product>(&query)
            .bind(threshold)
            .fetch_all(&mut **tx)
            .await?;
        Ok(products)
    }

    pub async fn count(&self) -> DatasetResult<i64> {
        let mut tx_guard = self.executor.lock().await;
        let tx = tx_guard.as_mut().ok_or(DatasetError::TransactionClosed)?;
        let row = sqlx::query("SELECT COUNT(*) AS count FROM products")
            .fetch_one(&mut **tx)
            .await?;
        Ok(row.try_get("count")?)
    }
}

/// Repository for the `orders` table.
#[derive(Clone)]
pub struct OrderRepository {
    executor: Executor,
}

impl OrderRepository {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }

    /// Insert an order. The referenced user and product must already exist.
    pub async fn insert(&self, order: &Order) -> DatasetResult<()> {
        let mut tx_guard = self.executor.lock().await;
        let tx = tx_guard.as_mut().ok_or(DatasetError::TransactionClosed)?;
        let query = format!("INSERT INTO orders ({ORDER_COLUMNS}) VALUES ($1, $2, $3, $4, $5)");
        sqlx::query(&query)
            .bind(order.order_id)
            .bind(order.user_id)
            .bind(order.product_id)
            .bind(order.quantity)
            .bind(order.order_date)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }

    pub async fn list_all(&self) -> DatasetResult<Vec<Order>> {
        let mut tx_guard = self.executor.lock().await;
        let tx = tx_guard.as_mut().ok_or(DatasetError::TransactionClosed)?;
        let query = format!("SELECT {ORDER_COLUMNS} FROM orders ORDER BY order_id");
        let orders = sqlx::query_as::<_, Order>(&query)
            .fetch_all(&mut **tx)
            .await?;
        Ok(orders)
    }

    pub async fn find_by_id(&self, order_id: i32) -> DatasetResult<Option<Order>> {
        let mut tx_guard = self.executor.lock().await;
        let tx = tx_guard.as_mut().ok_or(DatasetError::TransactionClosed)?;
        let query = format!("SELECT {ORDER_COLUMNS} FROM orders WHERE order_id = $1");
        let order = sqlx::query_as::<_, Order>(&query)
            .bind(order_id)
            .fetch_optional(&mut **tx)
            .await?;
        Ok(order)
    }

    pub async fn count(&self) -> DatasetResult<i64> {
        let mut tx_guard = self.executor.lock().await;
        let tx = tx_guard.as_mut().ok_or(DatasetError::TransactionClosed)?;
        let row = sqlx::query("SELECT COUNT(*) AS count FROM orders")
            .fetch_one(&mut **tx)
            .await?;
        Ok(row.try_get("count")?)
    }
}
