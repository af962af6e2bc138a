//! Type-safe money representation using decimal arithmetic.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An amount of money with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Money {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Money {
    /// Create a new amount.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Zero in the given currency.
    #[must_use]
    pub const fn zero(currency_code: CurrencyCode) -> Self {
        Self::new(Decimal::ZERO, currency_code)
    }

    /// Format for display (e.g., "$19.99").
    #[must_use]
    pub fn display(&self) -> String {
        format!("{}{:.2}", self.currency_code.symbol(), self.amount.round_dp(2))
    }
}

/// ISO 4217 currency codes accepted by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
    EUR,
    GBP,
    INR,
}

impl CurrencyCode {
    /// Currency symbol used when rendering prices.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::USD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
            Self::INR => "₹",
        }
    }
}

/// Apply a percentage discount to a price, rounded to two decimal places.
///
/// Discounts outside `0..=100` are clamped into that range.
#[must_use]
pub fn apply_discount(price: Decimal, discount_percent: Option<Decimal>) -> Decimal {
    let Some(discount) = discount_percent else {
        return price;
    };
    let hundred = Decimal::ONE_HUNDRED;
    let discount = discount.clamp(Decimal::ZERO, hundred);
    (price * (hundred - discount) / hundred).round_dp(2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_rounds_to_cents() {
        let money = Money::new(Decimal::new(19_999, 3), CurrencyCode::USD);
        assert_eq!(money.display(), "$20.00");

        let money = Money::new(Decimal::new(1250, 0), CurrencyCode::INR);
        assert_eq!(money.display(), "₹1250.00");
    }

    #[test]
    fn test_apply_discount() {
        assert_eq!(
            apply_discount(Decimal::new(1000, 0), Some(Decimal::new(10, 0))),
            Decimal::new(900, 0)
        );
        assert_eq!(apply_discount(Decimal::new(1000, 0), None), Decimal::new(1000, 0));
    }

    #[test]
    fn test_apply_discount_clamps_out_of_range() {
        assert_eq!(
            apply_discount(Decimal::new(80, 0), Some(Decimal::new(150, 0))),
            Decimal::ZERO
        );
        assert_eq!(
            apply_discount(Decimal::new(80, 0), Some(Decimal::new(-5, 0))),
            Decimal::new(80, 0)
        );
    }
}
