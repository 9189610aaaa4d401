//! Table definitions for the shop dataset.
//!
//! Tables are created parents first (`users`, `products`, `orders`) and
//! removed children first so the two foreign keys on `orders` never dangle.

use crate::{DatasetError, DatasetResult, Executor};

/// Names of the dataset tables in creation order.
pub const TABLES: [&str; 3] = ["users", "products", "orders"];

/// CREATE TABLE statements in creation order.
pub const SCHEMA_DDL: [&str; 3] = [
    "CREATE TABLE users (\
        user_id INT PRIMARY KEY, \
        username VARCHAR(50) NOT NULL, \
        email VARCHAR(100) NOT NULL\
    )",
    "CREATE TABLE products (\
        product_id INT PRIMARY KEY, \
        product_name VARCHAR(100) NOT NULL, \
        price DECIMAL(10, 2) NOT NULL\
    )",
    "CREATE TABLE orders (\
        order_id INT PRIMARY KEY, \
        user_id INT NOT NULL, \
        product_id INT NOT NULL, \
        quantity INT NOT NULL, \
        order_date DATE NOT NULL, \
        FOREIGN KEY (user_id) REFERENCES users (user_id), \
        FOREIGN KEY (product_id) REFERENCES products (product_id)\
    )",
];

/// Create the three tables inside the executor's transaction.
pub async fn create_schema(executor: &Executor) -> DatasetResult<()> {
    for (table, ddl) in TABLES.iter().zip(SCHEMA_DDL) {
        run(executor, ddl).await?;
        tracing::debug!(table, "created table");
    }
    Ok(())
}

/// Drop the three tables if they exist.
pub async fn drop_schema(executor: &Executor) -> DatasetResult<()> {
    for table in TABLES.iter().rev() {
        run(executor, &format!("DROP TABLE IF EXISTS {table}")).await?;
        tracing::debug!(table, "dropped table");
    }
    Ok(())
}

/// Delete every row, leaving the tables in place.
pub async fn clear_data(executor: &Executor) -> DatasetResult<()> {
    for table in TABLES.iter().rev() {
        let deleted = run(executor, &format!("DELETE FROM {table}")).await?;
        tracing::debug!(table, deleted, "cleared table");
    }
    Ok(())
}

async fn run(executor: &Executor, statement: &str) -> DatasetResult<u64> {
    let mut tx_guard = executor.lock().await;
    let tx = tx_guard.as_mut().ok_or(DatasetError::TransactionClosed)?;
    let result = sqlx::query(statement).execute(&mut **tx).await?;
    Ok(result.rows_affected())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orders_references_both_parents() {
        let orders = SCHEMA_DDL[2];
        assert!(orders.contains("FOREIGN KEY (user_id) REFERENCES users (user_id)"));
        assert!(orders.contains("FOREIGN KEY (product_id) REFERENCES products (product_id)"));
    }

    #[test]
    fn ddl_follows_table_order() {
        for (table, ddl) in TABLES.iter().zip(SCHEMA_DDL) {
            assert!(ddl.starts_with(&format!("CREATE TABLE {table} (")));
        }
        assert!(SCHEMA_DDL[1].contains("price DECIMAL(10, 2)"));
        assert!(SCHEMA_DDL[2].contains("order_date DATE"));
    }
}
