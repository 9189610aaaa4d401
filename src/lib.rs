//! Postgres Shop Dataset
//!
//! This crate provides the schema, seed data and analytical queries for a small
//! users / products / orders dataset stored in PostgreSQL. Every script runs in
//! its own transaction through the unit-of-work primitives in this crate.

pub mod config;
pub mod dataset;
pub mod error;
pub mod executor;
pub mod models;
pub mod reports;
pub mod repositories;
pub mod schema;
pub mod seed;
pub mod unit_of_work;

pub use config::DatabaseConfig;
pub use dataset::{Dataset, ReportSession};
pub use error::{DatasetError, DatasetResult};
pub use executor::Executor;
pub use models::{Order, OrderDetail, Product, ProductSales, User, UserOrderCount, UserSpend};
pub use reports::ReportRepository;
pub use repositories::{OrderRepository, ProductRepository, UserRepository};
pub use unit_of_work::{
    PostgresUnitOfWork, PostgresUnitOfWorkSession, UnitOfWork, UnitOfWorkSession,
};
