//! Unit and property-based tests for portfolio computations.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use super::error::PortfolioError;
use super::service::PortfolioService;
use super::types::{AssetInfo, AssetType, MovementKind, MovementRecord};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

fn movement(
    asset_id: Uuid,
    kind: MovementKind,
    quantity: Decimal,
    unit_price: Decimal,
    on: NaiveDate,
) -> MovementRecord {
    MovementRecord {
        id: Uuid::new_v4(),
        asset_id,
        kind,
        quantity,
        unit_price,
        date: on,
        created_at: base_time(),
    }
}

fn asset(ticker: &str, asset_type: AssetType) -> AssetInfo {
    AssetInfo {
        id: Uuid::new_v4(),
        ticker: ticker.to_string(),
        name: format!("{ticker} Inc"),
        asset_type,
    }
}

// ============================================================================
// Sell validation
// ============================================================================

#[test]
fn test_sell_without_position_is_rejected() {
    let result = PortfolioService::validate_sell(&[], dec!(1));
    assert_eq!(result, Err(PortfolioError::NoPosition));
}

#[test]
fn test_sell_after_full_exit_is_rejected() {
    let id = Uuid::new_v4();
    let movements = vec![
        movement(id, MovementKind::Buy, dec!(10), dec!(5), date(2024, 1, 1)),
        movement(id, MovementKind::Sell, dec!(10), dec!(6), date(2024, 1, 2)),
    ];

    assert_eq!(
        PortfolioService::validate_sell(&movements, dec!(1)),
        Err(PortfolioError::NoPosition)
    );
}

#[test]
fn test_sell_above_available_is_rejected() {
    let id = Uuid::new_v4();
    let movements = vec![movement(id, MovementKind::Buy, dec!(10), dec!(5), date(2024, 1, 1))];

    assert_eq!(
        PortfolioService::validate_sell(&movements, dec!(10.5)),
        Err(PortfolioError::InsufficientQuantity {
            requested: dec!(10.5),
            available: dec!(10),
        })
    );
}

#[test]
fn test_sell_of_entire_position_is_allowed() {
    let id = Uuid::new_v4();
    let movements = vec![movement(id, MovementKind::Buy, dec!(10), dec!(5), date(2024, 1, 1))];

    assert_eq!(
        PortfolioService::validate_sell(&movements, dec!(10)),
        Ok(dec!(10))
    );
}

#[test]
fn test_validate_movement() {
    assert!(PortfolioService::validate_movement(dec!(1), dec!(0.01)).is_ok());
    assert_eq!(
        PortfolioService::validate_movement(Decimal::ZERO, dec!(1)),
        Err(PortfolioError::NonPositiveQuantity)
    );
    assert_eq!(
        PortfolioService::validate_movement(dec!(1), Decimal::ZERO),
        Err(PortfolioError::NonPositivePrice)
    );
}

proptest! {
    /// A sell within the holding succeeds and lowers the position by exactly that quantity.
    #[test]
    fn prop_valid_sell_reduces_position_exactly(
        bought in 1i64..1_000_000,
        sold_fraction in 1i64..=100,
    ) {
        let id = Uuid::new_v4();
        let bought = Decimal::new(bought, 2);
        let sold = (bought * Decimal::new(sold_fraction, 2)).round_dp(2);
        prop_assume!(sold > Decimal::ZERO);

        let mut movements = vec![movement(
            id,
            MovementKind::Buy,
            bought,
            dec!(10),
            date(2024, 1, 1),
        )];
        let before = PortfolioService::position(&movements).quantity;

        prop_assert!(PortfolioService::validate_sell(&movements, sold).is_ok());
        movements.push(movement(id, MovementKind::Sell, sold, dec!(12), date(2024, 1, 2)));

        let after = PortfolioService::position(&movements).quantity;
        prop_assert_eq!(before - after, sold);
    }

    /// Any sell above the holding is rejected.
    #[test]
    fn prop_oversell_is_rejected(bought in 1i64..1_000_000, extra in 1i64..1_000) {
        let id = Uuid::new_v4();
        let bought = Decimal::new(bought, 2);
        let movements = vec![movement(id, MovementKind::Buy, bought, dec!(10), date(2024, 1, 1))];

        let is_insufficient = matches!(
            PortfolioService::validate_sell(&movements, bought + Decimal::new(extra, 2)),
            Err(PortfolioError::InsufficientQuantity { .. })
        );
        prop_assert!(is_insufficient);
    }

    /// Buy-only positions average to total cost over total quantity.
    #[test]
    fn prop_buy_only_average_price(
        lots in proptest::collection::vec((1i64..10_000, 1i64..100_000), 1..8),
    ) {
        let id = Uuid::new_v4();
        let movements: Vec<MovementRecord> = lots
            .iter()
            .map(|(qty, price)| {
                movement(
                    id,
                    MovementKind::Buy,
                    Decimal::from(*qty),
                    Decimal::new(*price, 2),
                    date(2024, 1, 1),
                )
            })
            .collect();

        let total_cost: Decimal = movements.iter().map(MovementRecord::value).sum();
        let total_qty: Decimal = movements.iter().map(|m| m.quantity).sum();

        let position = PortfolioService::position(&movements);
        prop_assert_eq!(position.average_price(), (total_cost / total_qty).round_dp(2));
    }
}

// ============================================================================
// Positions
// ============================================================================

#[test]
fn test_average_cost_survives_partial_sell() {
    let id = Uuid::new_v4();
    let movements = vec![
        movement(id, MovementKind::Buy, dec!(10), dec!(10), date(2024, 1, 1)),
        movement(id, MovementKind::Buy, dec!(10), dec!(20), date(2024, 1, 5)),
        movement(id, MovementKind::Sell, dec!(5), dec!(30), date(2024, 1, 10)),
    ];

    let position = PortfolioService::position(&movements);

    assert_eq!(position.quantity, dec!(15));
    assert_eq!(position.cost_basis, dec!(225));
    assert_eq!(position.average_price(), dec!(15.00));
    assert_eq!(position.equity, dec!(150));
}

#[test]
fn test_movements_are_replayed_chronologically() {
    let id = Uuid::new_v4();
    let mut first = movement(id, MovementKind::Buy, dec!(10), dec!(10), date(2024, 1, 1));
    first.created_at = base_time();
    let mut second = movement(id, MovementKind::Sell, dec!(10), dec!(12), date(2024, 1, 1));
    second.created_at = base_time() + Duration::minutes(5);
    let mut third = movement(id, MovementKind::Buy, dec!(4), dec!(50), date(2024, 1, 1));
    third.created_at = base_time() + Duration::minutes(10);

    let position = PortfolioService::position(&[third, second, first]);

    assert_eq!(position.quantity, dec!(4));
    assert_eq!(position.average_price(), dec!(50.00));
}

#[test]
fn test_holdings_exclude_sold_out_assets() {
    let held = asset("PETR4", AssetType::Stock);
    let sold = asset("HGLG11", AssetType::Reit);
    let idle = asset("BTC", AssetType::Crypto);
    let movements = vec![
        movement(held.id, MovementKind::Buy, dec!(3), dec!(10.10), date(2024, 2, 1)),
        movement(sold.id, MovementKind::Buy, dec!(2), dec!(100), date(2024, 2, 1)),
        movement(sold.id, MovementKind::Sell, dec!(2), dec!(110), date(2024, 3, 1)),
    ];

    let holdings =
        PortfolioService::holdings(&[held.clone(), sold, idle], &movements);

    assert_eq!(holdings.len(), 1);
    assert_eq!(holdings[0].asset, held);
    assert_eq!(holdings[0].quantity, dec!(3));
    assert_eq!(holdings[0].average_price, dec!(10.10));
    assert_eq!(holdings[0].cost_basis, dec!(30.30));
}

#[test]
fn test_equity_by_type_sums_across_assets() {
    let a = asset("AAPL", AssetType::Stock);
    let b = asset("MSFT", AssetType::Stock);
    let c = asset("BTC", AssetType::Crypto);
    let movements = vec![
        movement(a.id, MovementKind::Buy, dec!(2), dec!(100), date(2024, 1, 1)),
        movement(b.id, MovementKind::Buy, dec!(1), dec!(300), date(2024, 1, 1)),
        movement(b.id, MovementKind::Sell, dec!(1), dec!(350), date(2024, 2, 1)),
        movement(c.id, MovementKind::Buy, dec!(0.5), dec!(1000), date(2024, 1, 1)),
    ];

    let equity = PortfolioService::equity_by_type(&[a, b, c], &movements);

    assert_eq!(equity.len(), 2);
    assert_eq!(equity[0].asset_type, AssetType::Stock);
    assert_eq!(equity[0].equity, dec!(150));
    assert_eq!(equity[1].asset_type, AssetType::Crypto);
    assert_eq!(equity[1].equity, dec!(500));
}

// ============================================================================
// Evolution and yearly summary
// ============================================================================

#[test]
fn test_evolution_accumulates_across_months() {
    let id = Uuid::new_v4();
    let movements = vec![
        movement(id, MovementKind::Buy, dec!(10), dec!(10), date(2024, 1, 15)),
        movement(id, MovementKind::Buy, dec!(5), dec!(20), date(2024, 3, 1)),
        movement(id, MovementKind::Sell, dec!(15), dec!(10), date(2024, 11, 30)),
        movement(id, MovementKind::Buy, dec!(99), dec!(99), date(2023, 12, 31)),
    ];

    let evolution = PortfolioService::evolution(&movements, 2024);

    assert_eq!(evolution.len(), 12);
    assert_eq!(evolution[0].value, dec!(100));
    assert_eq!(evolution[1].value, dec!(100));
    assert_eq!(evolution[2].value, dec!(200));
    assert_eq!(evolution[10].value, dec!(50));
    assert_eq!(evolution[11].value, dec!(50));
    assert_eq!(evolution[11].name, "December");
}

#[test]
fn test_evolution_of_empty_year_is_flat_zero() {
    let evolution = PortfolioService::evolution(&[], 2024);
    assert_eq!(evolution.len(), 12);
    assert!(evolution.iter().all(|m| m.value == Decimal::ZERO));
}

#[test]
fn test_year_summary_groups_by_type_and_skips_closed_positions() {
    let stock = asset("VALE3", AssetType::Stock);
    let closed = asset("ITUB4", AssetType::Stock);
    let etf = asset("BOVA11", AssetType::Etf);
    let movements = vec![
        movement(stock.id, MovementKind::Buy, dec!(10), dec!(60), date(2024, 4, 1)),
        movement(stock.id, MovementKind::Sell, dec!(4), dec!(70), date(2024, 5, 1)),
        movement(closed.id, MovementKind::Buy, dec!(5), dec!(30), date(2024, 4, 1)),
        movement(closed.id, MovementKind::Sell, dec!(5), dec!(35), date(2024, 6, 1)),
        movement(etf.id, MovementKind::Buy, dec!(2), dec!(110), date(2024, 7, 1)),
        movement(etf.id, MovementKind::Buy, dec!(2), dec!(110), date(2025, 1, 2)),
    ];

    let summary =
        PortfolioService::year_summary(&[stock.clone(), closed, etf.clone()], &movements, 2024);

    assert_eq!(summary.len(), 2);
    assert_eq!(summary[0].asset_type, AssetType::Stock);
    assert_eq!(summary[0].assets.len(), 1);
    assert_eq!(summary[0].assets[0].asset, stock);
    assert_eq!(summary[0].assets[0].quantity, dec!(6));
    assert_eq!(summary[0].total_value, dec!(320));
    assert_eq!(summary[1].asset_type, AssetType::Etf);
    assert_eq!(summary[1].assets[0].asset, etf);
    assert_eq!(summary[1].total_value, dec!(220));
}
