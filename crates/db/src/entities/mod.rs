//! `SeaORM` entity definitions.

pub mod asset_movements;
pub mod assets;
pub mod categories;
pub mod goals;
pub mod parameters;
pub mod plannings;
pub mod sea_orm_active_enums;
pub mod transactions;
pub mod users;
