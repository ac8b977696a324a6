use rust_decimal::{Decimal, RoundingStrategy};

/// Recomputes the weighted average purchase price of a position after an
/// acquisition.
///
/// `new_avg = (p0*q0 + p1*q1) / (q0 + q1)`, rounded to 2 decimal places with
/// round-half-up. Called only on quantity-increasing events; reductions never
/// alter the cost basis of what remains.
pub fn average_price(
    existing_qty: i64,
    existing_avg: Decimal,
    added_qty: i64,
    execution_price: Decimal,
) -> Decimal {
    let total_value =
        existing_avg * Decimal::from(existing_qty) + execution_price * Decimal::from(added_qty);
    let total_qty = Decimal::from(existing_qty + added_qty);

    (total_value / total_qty).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn blends_two_lots_by_quantity_weight() {
        // 10 @ 100.00 plus 10 @ 200.00 averages to 150.00.
        assert_eq!(average_price(10, dec!(100.00), 10, dec!(200.00)), dec!(150.00));
        // 10 @ 175.50 plus 5 @ 180.00 -> (1755 + 900) / 15 = 177.00.
        assert_eq!(average_price(10, dec!(175.50), 5, dec!(180.00)), dec!(177.00));
    }

    #[test]
    fn equal_prices_leave_the_average_unchanged() {
        assert_eq!(average_price(7, dec!(42.42), 3, dec!(42.42)), dec!(42.42));
    }

    #[test]
    fn midpoint_rounds_up() {
        // (10.00 + 10.01) / 2 = 10.005 -> 10.01 under round-half-up.
        assert_eq!(average_price(1, dec!(10.00), 1, dec!(10.01)), dec!(10.01));
    }

    #[test]
    fn result_carries_exactly_two_decimal_places() {
        // (10 + 20.02) / 3 = 10.0066... -> 10.01.
        assert_eq!(average_price(1, dec!(10.00), 2, dec!(10.01)), dec!(10.01));
    }
}
