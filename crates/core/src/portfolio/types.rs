//! Portfolio data types.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Class of an investment asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetType {
    /// Company share.
    Stock,
    /// Real-estate investment trust.
    Reit,
    /// Cryptocurrency.
    Crypto,
    /// Depositary receipt of a foreign share.
    Bdr,
    /// Exchange-traded fund.
    Etf,
}

/// Direction of an asset movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MovementKind {
    /// Acquisition.
    Buy,
    /// Disposal.
    Sell,
}

/// Display data of an asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetInfo {
    /// Asset ID.
    pub id: Uuid,
    /// Ticker symbol.
    pub ticker: String,
    /// Asset name.
    pub name: String,
    /// Asset class.
    pub asset_type: AssetType,
}

/// A persisted movement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementRecord {
    /// Movement ID.
    pub id: Uuid,
    /// Asset moved.
    pub asset_id: Uuid,
    /// Buy or sell.
    pub kind: MovementKind,
    /// Units moved, always positive.
    pub quantity: Decimal,
    /// Price per unit.
    pub unit_price: Decimal,
    /// Trade date.
    pub date: NaiveDate,
    /// Insertion time, breaks ties between same-day movements.
    pub created_at: DateTime<Utc>,
}

impl MovementRecord {
    /// Quantity times unit price.
    #[must_use]
    pub fn value(&self) -> Decimal {
        self.quantity * self.unit_price
    }

    /// Value signed by direction: positive for buys, negative for sells.
    #[must_use]
    pub fn signed_value(&self) -> Decimal {
        match self.kind {
            MovementKind::Buy => self.value(),
            MovementKind::Sell => -self.value(),
        }
    }

    /// Quantity signed by direction.
    #[must_use]
    pub fn signed_quantity(&self) -> Decimal {
        match self.kind {
            MovementKind::Buy => self.quantity,
            MovementKind::Sell => -self.quantity,
        }
    }
}

/// Derived position of one asset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// Units held (buys minus sells).
    pub quantity: Decimal,
    /// Cost of the units still held, average-cost method.
    pub cost_basis: Decimal,
    /// Buy value minus sell value.
    pub equity: Decimal,
}

impl Position {
    /// Cost basis per held unit, two decimals; zero when nothing is held.
    #[must_use]
    pub fn average_price(&self) -> Decimal {
        if self.quantity <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        (self.cost_basis / self.quantity).round_dp(2)
    }

    /// Returns true if units are currently held.
    #[must_use]
    pub fn is_held(&self) -> bool {
        self.quantity > Decimal::ZERO
    }
}

/// A currently held asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holding {
    /// The asset.
    pub asset: AssetInfo,
    /// Units held.
    pub quantity: Decimal,
    /// Average price per unit.
    pub average_price: Decimal,
    /// Cost of the units held.
    pub cost_basis: Decimal,
}

/// Equity of one asset class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeEquity {
    /// Asset class.
    pub asset_type: AssetType,
    /// Sum of buy value minus sell value of its assets.
    pub equity: Decimal,
}

/// Running portfolio value at the end of a month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthValue {
    /// Month number (1..=12).
    pub month: u32,
    /// English month name.
    pub name: String,
    /// Net movement value from January through this month.
    pub value: Decimal,
}

/// An asset line of the yearly summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearAssetLine {
    /// The asset.
    pub asset: AssetInfo,
    /// Net quantity moved in the year.
    pub quantity: Decimal,
    /// Net value moved in the year.
    pub value: Decimal,
}

/// Yearly summary of one asset class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeYearSummary {
    /// Asset class.
    pub asset_type: AssetType,
    /// Net value of the class in the year.
    pub total_value: Decimal,
    /// Assets with positive net quantity.
    pub assets: Vec<YearAssetLine>,
}
