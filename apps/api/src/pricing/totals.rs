//! Totals Calculator — the pricing core of the proposal builder.
//!
//! `compute_totals` is a pure, total function: same config in, same totals
//! out, no I/O, no hidden state. Inputs are validated separately via
//! [`PricingConfig::validate`]; the calculator itself never fails.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::pricing::money::deserialize_amount;

/// How the base monthly price is derived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PricingMode {
    #[default]
    FixedMonthly,
    PerSquareFoot,
    PerVisit,
}

/// Deep-clean billing arrangement.
///
/// `OneTime` is billed separately and never amortized into the monthly
/// subtotal; only `Quarterly` is spread (÷3) across the months it covers.
/// That asymmetry is deliberate and preserved from the existing agreements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeepCleanOption {
    #[default]
    None,
    OneTime,
    Quarterly,
}

/// Whether the client-facing compensation figure is computed or overridden.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompensationMode {
    #[default]
    Auto,
    Override,
}

/// An optional named line-item service with its own price.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdditionalService {
    pub name: String,
    #[serde(deserialize_with = "deserialize_amount")]
    pub price: Decimal,
}

/// One job's pricing inputs. Constructed fresh from user input on every
/// computation request; treated as immutable once handed to the calculator.
///
/// Money fields accept either a JSON number or a user-typed string like
/// `"$1,500.25"` (see [`deserialize_amount`]).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    pub pricing_mode: PricingMode,
    #[serde(deserialize_with = "deserialize_amount")]
    pub monthly_fixed_price: Decimal,
    #[serde(deserialize_with = "deserialize_amount")]
    pub rate_per_square_foot: Decimal,
    #[serde(deserialize_with = "deserialize_amount")]
    pub rate_per_visit: Decimal,
    pub square_footage: u32,
    pub visits_per_week: Decimal,
    pub additional_services: Vec<AdditionalService>,
    pub include_addons_in_total: bool,
    pub deep_clean_option: DeepCleanOption,
    #[serde(deserialize_with = "deserialize_amount")]
    pub deep_clean_price: Decimal,
    pub sales_tax_percent: Decimal,
    pub compensation_mode: CompensationMode,
    #[serde(deserialize_with = "deserialize_amount")]
    pub compensation_override: Decimal,
}

/// Upper bound on any monetary or percentage input. Far beyond any real
/// contract, and small enough that every downstream product stays inside
/// the `Decimal` range.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

impl PricingConfig {
    /// Estimated visits per month, derived from `visits_per_week`.
    ///
    /// `round(visits_per_week * 52 / 12)` with round-half-up
    /// (e.g. 5 visits/week → 21.67 → 22). Never independently settable,
    /// so the derivation invariant cannot be violated by input.
    pub fn visits_per_month(&self) -> u32 {
        let per_month = self.visits_per_week.saturating_mul(Decimal::from(52)) / Decimal::from(12);
        per_month
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_u32()
            .unwrap_or(0)
    }

    /// Rejects inputs the calculator assumes were already coerced upstream:
    /// negative rates, and magnitudes beyond [`MAX_AMOUNT`]. A negative
    /// `sales_tax_percent` stays valid — it is clamped at the point of tax
    /// computation, not rejected.
    pub fn validate(&self) -> Result<(), AppError> {
        let non_negative: [(&str, Decimal); 5] = [
            ("monthly_fixed_price", self.monthly_fixed_price),
            ("rate_per_square_foot", self.rate_per_square_foot),
            ("rate_per_visit", self.rate_per_visit),
            ("visits_per_week", self.visits_per_week),
            ("deep_clean_price", self.deep_clean_price),
        ];
        for (field, value) in non_negative {
            if value < Decimal::ZERO {
                return Err(AppError::Validation(format!(
                    "{field} must be non-negative, got {value}"
                )));
            }
        }

        let mut bounded: Vec<(&str, Decimal)> = vec![
            ("monthly_fixed_price", self.monthly_fixed_price),
            ("rate_per_square_foot", self.rate_per_square_foot),
            ("rate_per_visit", self.rate_per_visit),
            ("visits_per_week", self.visits_per_week),
            ("deep_clean_price", self.deep_clean_price),
            ("sales_tax_percent", self.sales_tax_percent),
            ("compensation_override", self.compensation_override),
        ];
        for service in &self.additional_services {
            bounded.push(("additional_services.price", service.price));
        }
        for (field, value) in bounded {
            if value.abs() > MAX_AMOUNT {
                return Err(AppError::Validation(format!(
                    "{field} must not exceed {MAX_AMOUNT}, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Derived, read-only pricing output. All fields are rounded to two
/// decimals as they are computed, so the invariants
/// `monthly_subtotal = base + included add-ons + deep-clean equivalent` and
/// `monthly_total_with_tax = monthly_subtotal + monthly_tax` hold exactly
/// on the stored values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TotalsResult {
    pub base_monthly: Decimal,
    pub addons_total: Decimal,
    pub addons_included_monthly: Decimal,
    pub deep_clean_one_time: Decimal,
    pub deep_clean_quarterly: Decimal,
    pub deep_clean_monthly_equivalent: Decimal,
    pub monthly_subtotal: Decimal,
    pub monthly_tax: Decimal,
    pub monthly_total_with_tax: Decimal,
    pub compensation_monthly: Decimal,
}

fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven)
}

/// True if an additional service counts toward the add-on total:
/// named, and priced above zero.
pub fn addon_counts(service: &AdditionalService) -> bool {
    !service.name.trim().is_empty() && service.price > Decimal::ZERO
}

/// Computes base price, add-on totals, deep-clean amortization, tax, and
/// final compensation from a pricing configuration.
///
/// Never panics: arithmetic saturates at the `Decimal` range limits, and
/// [`PricingConfig::validate`] bounds real inputs long before that.
pub fn compute_totals(config: &PricingConfig) -> TotalsResult {
    let base_monthly = round2(match config.pricing_mode {
        PricingMode::FixedMonthly => config.monthly_fixed_price,
        PricingMode::PerSquareFoot => config
            .rate_per_square_foot
            .saturating_mul(Decimal::from(config.square_footage)),
        PricingMode::PerVisit => config
            .rate_per_visit
            .saturating_mul(Decimal::from(config.visits_per_month())),
    });

    let addons_total = round2(
        config
            .additional_services
            .iter()
            .filter(|s| addon_counts(s))
            .fold(Decimal::ZERO, |acc, s| acc.saturating_add(s.price)),
    );
    let addons_included_monthly = if config.include_addons_in_total {
        addons_total
    } else {
        Decimal::ZERO
    };

    let (deep_clean_one_time, deep_clean_quarterly, deep_clean_monthly_equivalent) =
        match config.deep_clean_option {
            DeepCleanOption::None => (Decimal::ZERO, Decimal::ZERO, Decimal::ZERO),
            // Billed separately; contributes nothing to the monthly subtotal.
            DeepCleanOption::OneTime => (round2(config.deep_clean_price), Decimal::ZERO, Decimal::ZERO),
            DeepCleanOption::Quarterly => (
                Decimal::ZERO,
                round2(config.deep_clean_price),
                round2(config.deep_clean_price / Decimal::from(3)),
            ),
        };

    let monthly_subtotal = base_monthly
        .saturating_add(addons_included_monthly)
        .saturating_add(deep_clean_monthly_equivalent);

    // Clamp happens at the point of tax computation only; the stored
    // percentage is left as given.
    let effective_tax_percent = config.sales_tax_percent.max(Decimal::ZERO);
    let monthly_tax = round2(monthly_subtotal.saturating_mul(effective_tax_percent) / Decimal::from(100));
    let monthly_total_with_tax = monthly_subtotal.saturating_add(monthly_tax);

    let compensation_monthly = match config.compensation_mode {
        CompensationMode::Auto => monthly_total_with_tax,
        CompensationMode::Override => round2(config.compensation_override),
    };

    TotalsResult {
        base_monthly,
        addons_total,
        addons_included_monthly,
        deep_clean_one_time,
        deep_clean_quarterly,
        deep_clean_monthly_equivalent,
        monthly_subtotal,
        monthly_tax,
        monthly_total_with_tax,
        compensation_monthly,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn addon(name: &str, price: Decimal) -> AdditionalService {
        AdditionalService {
            name: name.to_string(),
            price,
        }
    }

    #[test]
    fn test_fixed_monthly_base_is_fixed_price() {
        let config = PricingConfig {
            pricing_mode: PricingMode::FixedMonthly,
            monthly_fixed_price: dec!(2500),
            ..Default::default()
        };
        let totals = compute_totals(&config);
        assert_eq!(totals.base_monthly, dec!(2500.00));
        assert_eq!(totals.monthly_subtotal, dec!(2500.00));
    }

    #[test]
    fn test_per_square_foot_base_is_exact_product() {
        let config = PricingConfig {
            pricing_mode: PricingMode::PerSquareFoot,
            rate_per_square_foot: dec!(0.12),
            square_footage: 18500,
            ..Default::default()
        };
        let totals = compute_totals(&config);
        assert_eq!(totals.base_monthly, dec!(2220.00));
    }

    #[test]
    fn test_visits_per_month_five_weekly_is_twenty_two() {
        let config = PricingConfig {
            visits_per_week: dec!(5),
            ..Default::default()
        };
        assert_eq!(config.visits_per_month(), 22);
    }

    #[test]
    fn test_visits_per_month_zero_and_fractional() {
        let zero = PricingConfig::default();
        assert_eq!(zero.visits_per_month(), 0);

        let three = PricingConfig {
            visits_per_week: dec!(3),
            ..Default::default()
        };
        // 3 * 52 / 12 = 13
        assert_eq!(three.visits_per_month(), 13);

        let half = PricingConfig {
            visits_per_week: dec!(0.5),
            ..Default::default()
        };
        // 0.5 * 52 / 12 = 2.1667 → 2
        assert_eq!(half.visits_per_month(), 2);
    }

    #[test]
    fn test_per_visit_with_zero_visits_yields_zero_base() {
        let config = PricingConfig {
            pricing_mode: PricingMode::PerVisit,
            rate_per_visit: dec!(150),
            visits_per_week: Decimal::ZERO,
            ..Default::default()
        };
        let totals = compute_totals(&config);
        assert_eq!(totals.base_monthly, dec!(0.00));
    }

    #[test]
    fn test_addon_filter_drops_blank_names_and_zero_prices() {
        let config = PricingConfig {
            additional_services: vec![
                addon("Window cleaning", dec!(200)),
                addon("", dec!(75)),
                addon("   ", dec!(50)),
                addon("Pressure washing", Decimal::ZERO),
                addon("Carpet shampoo", dec!(125)),
            ],
            include_addons_in_total: true,
            ..Default::default()
        };
        let totals = compute_totals(&config);
        assert_eq!(totals.addons_total, dec!(325.00));
        assert_eq!(totals.addons_included_monthly, dec!(325.00));
    }

    #[test]
    fn test_addons_excluded_when_flag_off() {
        let config = PricingConfig {
            additional_services: vec![addon("Window cleaning", dec!(200))],
            include_addons_in_total: false,
            ..Default::default()
        };
        let totals = compute_totals(&config);
        assert_eq!(totals.addons_total, dec!(200.00));
        assert_eq!(totals.addons_included_monthly, Decimal::ZERO);
        assert_eq!(totals.monthly_subtotal, Decimal::ZERO);
    }

    #[test]
    fn test_quarterly_deep_clean_amortizes_over_three_months() {
        let config = PricingConfig {
            deep_clean_option: DeepCleanOption::Quarterly,
            deep_clean_price: dec!(300),
            ..Default::default()
        };
        let totals = compute_totals(&config);
        assert_eq!(totals.deep_clean_quarterly, dec!(300.00));
        assert_eq!(totals.deep_clean_monthly_equivalent, dec!(100.00));
        assert_eq!(totals.deep_clean_one_time, Decimal::ZERO);
        assert_eq!(totals.monthly_subtotal, dec!(100.00));
    }

    #[test]
    fn test_one_time_deep_clean_never_enters_monthly_subtotal() {
        let config = PricingConfig {
            pricing_mode: PricingMode::FixedMonthly,
            monthly_fixed_price: dec!(1000),
            deep_clean_option: DeepCleanOption::OneTime,
            deep_clean_price: dec!(450),
            ..Default::default()
        };
        let totals = compute_totals(&config);
        assert_eq!(totals.deep_clean_one_time, dec!(450.00));
        assert_eq!(totals.deep_clean_quarterly, Decimal::ZERO);
        assert_eq!(totals.deep_clean_monthly_equivalent, Decimal::ZERO);
        assert_eq!(totals.monthly_subtotal, dec!(1000.00));
    }

    #[test]
    fn test_negative_tax_clamped_only_at_computation() {
        let negative = PricingConfig {
            monthly_fixed_price: dec!(1000),
            sales_tax_percent: dec!(-5),
            ..Default::default()
        };
        let zero = PricingConfig {
            sales_tax_percent: Decimal::ZERO,
            ..negative.clone()
        };
        let totals_negative = compute_totals(&negative);
        let totals_zero = compute_totals(&zero);
        assert_eq!(totals_negative.monthly_tax, totals_zero.monthly_tax);
        assert_eq!(
            totals_negative.monthly_total_with_tax,
            totals_zero.monthly_total_with_tax
        );
        // The stored value itself is untouched.
        assert_eq!(negative.sales_tax_percent, dec!(-5));
    }

    #[test]
    fn test_compensation_override_wins_regardless_of_totals() {
        let config = PricingConfig {
            monthly_fixed_price: dec!(9999),
            compensation_mode: CompensationMode::Override,
            compensation_override: dec!(500),
            ..Default::default()
        };
        let totals = compute_totals(&config);
        assert_eq!(totals.compensation_monthly, dec!(500.00));
    }

    #[test]
    fn test_compute_totals_is_idempotent() {
        let config = PricingConfig {
            pricing_mode: PricingMode::PerVisit,
            rate_per_visit: dec!(150),
            visits_per_week: dec!(5),
            sales_tax_percent: dec!(7),
            additional_services: vec![addon("Window cleaning", dec!(200))],
            include_addons_in_total: true,
            ..Default::default()
        };
        assert_eq!(compute_totals(&config), compute_totals(&config));
    }

    #[test]
    fn test_subtotal_invariant_holds_on_stored_values() {
        let config = PricingConfig {
            pricing_mode: PricingMode::FixedMonthly,
            monthly_fixed_price: dec!(1234.56),
            additional_services: vec![addon("Day porter", dec!(789.01))],
            include_addons_in_total: true,
            deep_clean_option: DeepCleanOption::Quarterly,
            deep_clean_price: dec!(100),
            sales_tax_percent: dec!(8.25),
            ..Default::default()
        };
        let totals = compute_totals(&config);
        assert_eq!(
            totals.monthly_subtotal,
            totals.base_monthly + totals.addons_included_monthly
                + totals.deep_clean_monthly_equivalent
        );
        assert_eq!(
            totals.monthly_total_with_tax,
            totals.monthly_subtotal + totals.monthly_tax
        );
    }

    #[test]
    fn test_end_to_end_per_visit_scenario() {
        let config = PricingConfig {
            pricing_mode: PricingMode::PerVisit,
            rate_per_visit: dec!(150),
            visits_per_week: dec!(5),
            sales_tax_percent: dec!(7),
            compensation_mode: CompensationMode::Auto,
            ..Default::default()
        };
        assert_eq!(config.visits_per_month(), 22);

        let totals = compute_totals(&config);
        assert_eq!(totals.base_monthly, dec!(3300.00));
        assert_eq!(totals.monthly_subtotal, dec!(3300.00));
        assert_eq!(totals.monthly_tax, dec!(231.00));
        assert_eq!(totals.monthly_total_with_tax, dec!(3531.00));
        assert_eq!(totals.compensation_monthly, dec!(3531.00));
    }

    #[test]
    fn test_validate_rejects_negative_rates() {
        let config = PricingConfig {
            rate_per_visit: dec!(-1),
            ..Default::default()
        };
        assert!(config.validate().is_err());
        assert!(PricingConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_bounds_amount_magnitudes() {
        let rate = PricingConfig {
            rate_per_square_foot: MAX_AMOUNT + Decimal::ONE,
            ..Default::default()
        };
        assert!(rate.validate().is_err());

        let addon_price = PricingConfig {
            additional_services: vec![addon("Window cleaning", MAX_AMOUNT + Decimal::ONE)],
            ..Default::default()
        };
        assert!(addon_price.validate().is_err());

        // Negative tax is clamped downstream, not rejected here.
        let negative_tax = PricingConfig {
            sales_tax_percent: dec!(-5),
            ..Default::default()
        };
        assert!(negative_tax.validate().is_ok());

        let at_limit = PricingConfig {
            monthly_fixed_price: MAX_AMOUNT,
            ..Default::default()
        };
        assert!(at_limit.validate().is_ok());
    }

    #[test]
    fn test_extreme_magnitudes_saturate_instead_of_panicking() {
        // Bypasses validate() on purpose: the calculator itself must stay
        // total even on inputs far past the documented bounds.
        let config = PricingConfig {
            pricing_mode: PricingMode::PerSquareFoot,
            rate_per_square_foot: Decimal::MAX,
            square_footage: u32::MAX,
            visits_per_week: Decimal::MAX,
            additional_services: vec![addon("Window cleaning", Decimal::MAX)],
            include_addons_in_total: true,
            sales_tax_percent: Decimal::MAX,
            ..Default::default()
        };
        let totals = compute_totals(&config);
        assert_eq!(totals.base_monthly, Decimal::MAX);
        assert_eq!(
            totals.monthly_total_with_tax,
            totals.monthly_subtotal.saturating_add(totals.monthly_tax)
        );
    }

    #[test]
    fn test_money_fields_deserialize_from_decorated_strings() {
        let config: PricingConfig = serde_json::from_value(serde_json::json!({
            "monthly_fixed_price": "$2,500.00",
            "compensation_override": "1,200",
            "additional_services": [{"name": "Window cleaning", "price": "$75.50"}],
        }))
        .unwrap();
        assert_eq!(config.monthly_fixed_price, dec!(2500.00));
        assert_eq!(config.compensation_override, dec!(1200));
        assert_eq!(config.additional_services[0].price, dec!(75.50));

        // Plain numbers keep working.
        let numeric: PricingConfig =
            serde_json::from_value(serde_json::json!({"rate_per_visit": 150.25})).unwrap();
        assert_eq!(numeric.rate_per_visit, dec!(150.25));
    }

    #[test]
    fn test_money_fields_reject_non_numeric_strings() {
        let result: Result<PricingConfig, _> =
            serde_json::from_value(serde_json::json!({"deep_clean_price": "a lot"}));
        assert!(result.is_err());
    }
}
