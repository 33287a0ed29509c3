//! Schema migrations for the Control Wise tables.
//!
//! Run through the `migrator` binary; tests that need a live schema call
//! `Migrator::up` directly.

pub use sea_orm_migration::prelude::*;

mod m20260110_000001_initial;

/// Ordered list of schema migrations.
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20260110_000001_initial::Migration)]
    }
}
