//! Read-only analytical queries over the seeded dataset.
//!
//! All orderings are total so results are deterministic: ties on an
//! aggregate fall back to the name column.

use chrono::NaiveDate;

use crate::models::{OrderDetail, ProductSales, UserOrderCount, UserSpend};
use crate::{DatasetError, DatasetResult, Executor};

/// Joins and aggregations across users, products and orders.
#[derive(Clone)]
pub struct ReportRepository {
    executor: Executor,
}

impl ReportRepository {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }

    /// Every order flattened with its username and product name.
    pub async fn order_details(&self) -> DatasetResult<Vec<OrderDetail>> {
        let mut tx_guard = self.executor.lock().await;
        let tx = tx_guard.as_mut().ok_or(DatasetError::TransactionClosed)?;
        let rows = sqlx::query_as::<_, OrderDetail>(
            "SELECT o.order_id, u.username, p.product_name, o.quantity, o.order_date \
             FROM orders o \
             JOIN users u ON o.user_id = u.user_id \
             JOIN products p ON o.product_id = p.product_id \
             ORDER BY o.order_id",
        )
        .fetch_all(&mut **tx)
        .await?;
        Ok(rows)
    }

    /// Number of orders per user. Users without orders are reported with 0.
    pub async fn order_counts_per_user(&self) -> DatasetResult<Vec<UserOrderCount>> {
        let mut tx_guard = self.executor.lock().await;
        let tx = tx_guard.as_mut().ok_or(DatasetError::TransactionClosed)?;
        let rows = sqlx::query_as::<_, UserOrderCount>(
            "SELECT u.username, COUNT(o.order_id) AS order_count \
             FROM users u \
             LEFT JOIN orders o ON u.user_id = o.user_id \
             GROUP BY u.username \
             ORDER BY u.username",
        )
        .fetch_all(&mut **tx)
        .await?;
        Ok(rows)
    }

    /// Sum of `price * quantity` per user, over users that placed orders.
    pub async fn total_spent_per_user(&self) -> DatasetResult<Vec<UserSpend>> {
        let mut tx_guard = self.executor.lock().await;
        let tx = tx_guard.as_mut().ok_or(DatasetError::TransactionClosed)?;
        let rows = sqlx::query_as::<_, UserSpend>(
            "SELECT u.username, SUM(p.price * o.quantity) AS total_spent \
             FROM orders o \
             JOIN users u ON o.user_id = u.user_id \
             JOIN products p ON o.product_id = p.product_id \
             GROUP BY u.username \
             ORDER BY u.username",
        )
        .fetch_all(&mut **tx)
        .await?;
        Ok(rows)
    }

    /// Units sold per product, best sellers first.
    pub async fn total_sold_per_product(&self) -> DatasetResult<Vec<ProductSales>> {
        let mut tx_guard = self.executor.lock().await;
        let tx = tx_guard.as_mut().ok_or(DatasetError::TransactionClosed)?;
        let rows = sqlx::query_as::<_, ProductSales>(
            "SELECT p.product_name, SUM(o.quantity) AS total_sold \
             FROM orders o \
             JOIN products p ON o.product_id = p.product_id \
             GROUP BY p.product_name \
             ORDER BY total_sold DESC, p.product_name ASC",
        )
        .fetch_all(&mut **tx)
        .await?;
        Ok(rows)
    }

    /// Orders per user with `order_date` in `from..=to`, busiest users first.
    ///
    /// Users without orders in the range are omitted.
    pub async fn order_counts_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> DatasetResult<Vec<UserOrderCount>> {
        check_range(from, to)?;
        let mut tx_guard = self.executor.lock().await;
        let tx = tx_guard.as_mut().ok_or(DatasetError::TransactionClosed)?;
        let rows = sqlx::query_as::<_, UserOrderCount>(
            "SELECT u.username, COUNT(o.order_id) AS order_count \
             FROM orders o \
             JOIN users u ON o.user_id = u.user_id \
             WHERE o.order_date BETWEEN $1 AND $2 \
             GROUP BY u.username \
             ORDER BY order_count DESC, u.username ASC",
        )
        .bind(from)
        .bind(to)
        .fetch_all(&mut **tx)
        .await?;
        Ok(rows)
    }
}

fn check_range(from: NaiveDate, to: NaiveDate) -> DatasetResult<()> {
    if from > to {
        return Err(DatasetError::InvalidRange { from, to });
    }
    Ok(())
}
