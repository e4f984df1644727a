//! Monetary types for stake, odds and profit representation.

use rust_decimal::Decimal;

/// Amount of money (stake, payout, profit, bankroll) as a Decimal.
pub type Money = Decimal;

/// Decimal odds, where 1.0 means the stake is returned with no winnings.
pub type Odds = Decimal;

/// A percentage in percent units (12.5 means 12.5%).
pub type Percent = Decimal;

/// Compute `numerator / denominator * 100`, or zero when the denominator
/// is zero or the ratio does not fit in a decimal.
#[must_use]
pub fn percentage(numerator: Decimal, denominator: Decimal) -> Percent {
    numerator
        .checked_div(denominator)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn money_and_odds_are_decimal() {
        let stake: Money = dec!(10.50);
        let odds: Odds = dec!(2.0);

        assert_eq!(stake * odds, dec!(21.00));
    }

    #[test]
    fn percentage_normal_case() {
        assert_eq!(percentage(dec!(25), dec!(200)), dec!(12.5));
    }

    #[test]
    fn percentage_zero_denominator_is_zero() {
        assert_eq!(percentage(dec!(50), Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn percentage_keeps_sign() {
        assert_eq!(percentage(dec!(-10), dec!(100)), dec!(-10));
    }

    #[test]
    fn percentage_out_of_range_is_zero() {
        assert_eq!(percentage(Decimal::MAX, dec!(0.5)), Decimal::ZERO);
        assert_eq!(percentage(Decimal::MAX, dec!(50)), Decimal::ZERO);
    }
}
