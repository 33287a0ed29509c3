//! Owner scoping for user-owned rows.
//!
//! Every row except `users` carries the id of the user it belongs to.
//! Repositories never build queries for those tables directly: they go
//! through an [`OwnerScope`], which adds the owner predicate to every
//! select, update and delete it produces. A row owned by someone else is
//! indistinguishable from a missing one.
//!
//! # Usage
//!
//! ```ignore
//! use controlwise_db::scope::OwnerScope;
//!
//! let scope = OwnerScope::new(user_id);
//! let categories = scope.find::<categories::Entity>().all(&db).await?;
//! let goal = scope.find_by_id::<goals::Entity>(goal_id).one(&db).await?;
//! ```

use sea_orm::{
    ColumnTrait, DeleteMany, EntityTrait, PrimaryKeyTrait, QueryFilter, Select, UpdateMany,
    sea_query::SimpleExpr,
};
use uuid::Uuid;

use crate::entities::{
    asset_movements, assets, categories, goals, parameters, plannings, transactions, users,
};

/// An entity whose rows belong to exactly one user.
pub trait OwnedEntity: EntityTrait {
    /// Column holding the owning user's id.
    fn owner_column() -> Self::Column;
}

/// Authorization predicate for a single user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OwnerScope {
    user_id: Uuid,
}

impl OwnerScope {
    /// Creates a scope for the given user.
    #[must_use]
    pub const fn new(user_id: Uuid) -> Self {
        Self { user_id }
    }

    /// The user this scope is bound to.
    #[must_use]
    pub const fn user_id(&self) -> Uuid {
        self.user_id
    }

    /// Owner predicate for `E`, for queries assembled elsewhere.
    #[must_use]
    pub fn condition<E: OwnedEntity>(&self) -> SimpleExpr {
        E::owner_column().eq(self.user_id)
    }

    /// Selects the caller's rows of `E`.
    #[must_use]
    pub fn find<E: OwnedEntity>(&self) -> Select<E> {
        E::find().filter(self.condition::<E>())
    }

    /// Selects one of the caller's rows of `E` by primary key.
    #[must_use]
    pub fn find_by_id<E>(&self, id: Uuid) -> Select<E>
    where
        E: OwnedEntity,
        Uuid: Into<<E::PrimaryKey as PrimaryKeyTrait>::ValueType>,
    {
        E::find_by_id(id).filter(self.condition::<E>())
    }

    /// Bulk update restricted to the caller's rows of `E`.
    #[must_use]
    pub fn update_many<E: OwnedEntity>(&self) -> UpdateMany<E> {
        E::update_many().filter(self.condition::<E>())
    }

    /// Deletes one of the caller's rows of `E` by primary key.
    #[must_use]
    pub fn delete_by_id<E>(&self, id: Uuid) -> DeleteMany<E>
    where
        E: OwnedEntity,
        Uuid: Into<<E::PrimaryKey as PrimaryKeyTrait>::ValueType>,
    {
        E::delete_by_id(id).filter(self.condition::<E>())
    }
}

// A user owns exactly their own row.
impl OwnedEntity for users::Entity {
    fn owner_column() -> Self::Column {
        users::Column::Id
    }
}

impl OwnedEntity for parameters::Entity {
    fn owner_column() -> Self::Column {
        parameters::Column::UserId
    }
}

impl OwnedEntity for categories::Entity {
    fn owner_column() -> Self::Column {
        categories::Column::UserId
    }
}

impl OwnedEntity for transactions::Entity {
    fn owner_column() -> Self::Column {
        transactions::Column::UserId
    }
}

impl OwnedEntity for plannings::Entity {
    fn owner_column() -> Self::Column {
        plannings::Column::UserId
    }
}

impl OwnedEntity for goals::Entity {
    fn owner_column() -> Self::Column {
        goals::Column::UserId
    }
}

impl OwnedEntity for assets::Entity {
    fn owner_column() -> Self::Column {
        assets::Column::UserId
    }
}

impl OwnedEntity for asset_movements::Entity {
    fn owner_column() -> Self::Column {
        asset_movements::Column::UserId
    }
}
