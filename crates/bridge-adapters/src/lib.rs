// bridge-adapters library entry point
//! Colaboradores concretos del core: procesos reales, origen fixture y
//! origen vía CLI `bq`.
pub mod bq;
pub mod fixture;
pub mod process;

pub use bq::BqCliSource;
pub use fixture::{users_schema, FixtureSource, FIXTURE_TABLES};
pub use process::TokioProcessGateway;
