//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.
//! Every query that touches user data goes through an [`OwnerScope`](crate::scope::OwnerScope).

pub mod asset;
pub mod category;
pub mod dashboard;
pub mod goal;
pub mod movement;
pub mod parameter;
pub mod planning;
pub mod report;
pub mod transaction;
pub mod user;
pub mod wallet;

pub use asset::{AssetError, AssetRepository, CreateAssetInput};
pub use category::{CategoryError, CategoryRepository, CreateCategoryInput};
pub use dashboard::{DashboardError, DashboardRepository};
pub use goal::{GoalError, GoalInput, GoalRepository};
pub use movement::{CreateMovementInput, MovementError, MovementRepository, MovementWithAsset};
pub use parameter::ParameterRepository;
pub use planning::{PlanningError, PlanningInput, PlanningRepository, PlanningWithProgress};
pub use report::ReportRepository;
pub use transaction::{
    CreateTransactionInput, MonthTransactions, TransactionError, TransactionRepository,
    TransactionWithCategory, UpdateTransactionInput,
};
pub use user::{CreateUserInput, UpdateProfileInput, UserError, UserRepository};
pub use wallet::{WalletError, WalletRepository};

use sea_orm::{DbErr, SqlErr};

/// Returns true if `err` was raised by a unique constraint.
pub(crate) fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}
