//! Portfolio service for position derivation and sell validation.

use std::collections::{BTreeMap, HashMap};

use chrono::Datelike;
use controlwise_shared::types::MONTH_NAMES;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::error::PortfolioError;
use super::types::{
    AssetInfo, AssetType, Holding, MonthValue, MovementKind, MovementRecord, Position,
    TypeEquity, TypeYearSummary, YearAssetLine,
};

/// Portfolio service for business logic.
pub struct PortfolioService;

impl PortfolioService {
    /// Validates the numeric fields of a new movement.
    ///
    /// # Errors
    ///
    /// Returns `PortfolioError::NonPositiveQuantity` if `quantity <= 0`.
    /// Returns `PortfolioError::NonPositivePrice` if `unit_price <= 0`.
    pub fn validate_movement(quantity: Decimal, unit_price: Decimal) -> Result<(), PortfolioError> {
        if quantity <= Decimal::ZERO {
            return Err(PortfolioError::NonPositiveQuantity);
        }
        if unit_price <= Decimal::ZERO {
            return Err(PortfolioError::NonPositivePrice);
        }
        Ok(())
    }

    /// Units available to sell: buys minus sells.
    #[must_use]
    pub fn available_quantity(movements: &[MovementRecord]) -> Decimal {
        movements.iter().map(MovementRecord::signed_quantity).sum()
    }

    /// Checks that `requested` units can be sold out of `movements`.
    ///
    /// Returns the quantity available before the sale.
    ///
    /// # Errors
    ///
    /// Returns `PortfolioError::NoPosition` if nothing is held.
    /// Returns `PortfolioError::InsufficientQuantity` if `requested` exceeds the holding.
    pub fn validate_sell(
        movements: &[MovementRecord],
        requested: Decimal,
    ) -> Result<Decimal, PortfolioError> {
        let available = Self::available_quantity(movements);

        if available <= Decimal::ZERO {
            return Err(PortfolioError::NoPosition);
        }
        if requested > available {
            return Err(PortfolioError::InsufficientQuantity {
                requested,
                available,
            });
        }

        Ok(available)
    }

    /// Derives the position of a single asset from its movements.
    ///
    /// Movements are replayed in (date, insertion) order. A buy adds its
    /// value to the cost basis; a sell removes `sold * average cost`.
    #[must_use]
    pub fn position(movements: &[MovementRecord]) -> Position {
        let mut ordered: Vec<&MovementRecord> = movements.iter().collect();
        ordered.sort_by_key(|m| (m.date, m.created_at));

        let mut position = Position::default();
        for movement in ordered {
            let value = movement.value();
            match movement.kind {
                MovementKind::Buy => {
                    position.quantity += movement.quantity;
                    position.cost_basis += value;
                    position.equity += value;
                }
                MovementKind::Sell => {
                    if position.quantity > Decimal::ZERO {
                        let sold = movement.quantity.min(position.quantity);
                        position.cost_basis -= position.cost_basis / position.quantity * sold;
                    }
                    position.quantity -= movement.quantity;
                    position.equity -= value;
                    if position.quantity <= Decimal::ZERO {
                        position.cost_basis = Decimal::ZERO;
                    }
                }
            }
        }

        position
    }

    /// Current holdings: assets with a positive quantity, ordered by ticker.
    #[must_use]
    pub fn holdings(assets: &[AssetInfo], movements: &[MovementRecord]) -> Vec<Holding> {
        let by_asset = Self::group_by_asset(movements);

        let mut holdings: Vec<Holding> = assets
            .iter()
            .filter_map(|asset| {
                let position = Self::position(by_asset.get(&asset.id)?);
                position.is_held().then(|| Holding {
                    asset: asset.clone(),
                    quantity: position.quantity,
                    average_price: position.average_price(),
                    cost_basis: position.cost_basis.round_dp(2),
                })
            })
            .collect();

        holdings.sort_by(|a, b| a.asset.ticker.cmp(&b.asset.ticker));
        holdings
    }

    /// Equity (buy value minus sell value) summed per asset class.
    #[must_use]
    pub fn equity_by_type(assets: &[AssetInfo], movements: &[MovementRecord]) -> Vec<TypeEquity> {
        let types: HashMap<Uuid, AssetType> = assets.iter().map(|a| (a.id, a.asset_type)).collect();

        let mut totals: BTreeMap<AssetType, Decimal> = BTreeMap::new();
        for movement in movements {
            if let Some(asset_type) = types.get(&movement.asset_id) {
                *totals.entry(*asset_type).or_insert(Decimal::ZERO) += movement.signed_value();
            }
        }

        totals
            .into_iter()
            .map(|(asset_type, equity)| TypeEquity { asset_type, equity })
            .collect()
    }

    /// Running net movement value at the end of each month of `year`.
    ///
    /// The value does not reset between months: December carries the net
    /// effect of the whole year. Sold-out positions still count.
    #[must_use]
    pub fn evolution(movements: &[MovementRecord], year: i32) -> Vec<MonthValue> {
        let mut monthly = [Decimal::ZERO; 12];
        for movement in movements.iter().filter(|m| m.date.year() == year) {
            monthly[movement.date.month0() as usize] += movement.signed_value();
        }

        let mut running = Decimal::ZERO;
        monthly
            .iter()
            .zip(MONTH_NAMES)
            .zip(1u32..)
            .map(|((net, name), month)| {
                running += *net;
                MonthValue {
                    month,
                    name: name.to_string(),
                    value: running,
                }
            })
            .collect()
    }

    /// Summarizes the movements of `year` by asset class.
    ///
    /// Assets whose net quantity for the year is not positive are left out,
    /// as are classes left without assets.
    #[must_use]
    pub fn year_summary(
        assets: &[AssetInfo],
        movements: &[MovementRecord],
        year: i32,
    ) -> Vec<TypeYearSummary> {
        let in_year: Vec<MovementRecord> = movements
            .iter()
            .filter(|m| m.date.year() == year)
            .cloned()
            .collect();
        let by_asset = Self::group_by_asset(&in_year);

        let mut classes: BTreeMap<AssetType, Vec<YearAssetLine>> = BTreeMap::new();
        for asset in assets {
            let Some(asset_movements) = by_asset.get(&asset.id) else {
                continue;
            };
            let quantity: Decimal = asset_movements
                .iter()
                .map(MovementRecord::signed_quantity)
                .sum();
            if quantity <= Decimal::ZERO {
                continue;
            }
            let value: Decimal = asset_movements.iter().map(MovementRecord::signed_value).sum();

            classes.entry(asset.asset_type).or_default().push(YearAssetLine {
                asset: asset.clone(),
                quantity,
                value,
            });
        }

        classes
            .into_iter()
            .map(|(asset_type, mut lines)| {
                lines.sort_by(|a, b| a.asset.ticker.cmp(&b.asset.ticker));
                TypeYearSummary {
                    asset_type,
                    total_value: lines.iter().map(|l| l.value).sum(),
                    assets: lines,
                }
            })
            .collect()
    }

    fn group_by_asset(movements: &[MovementRecord]) -> HashMap<Uuid, Vec<MovementRecord>> {
        let mut grouped: HashMap<Uuid, Vec<MovementRecord>> = HashMap::new();
        for movement in movements {
            grouped
                .entry(movement.asset_id)
                .or_default()
                .push(movement.clone());
        }
        grouped
    }
}
