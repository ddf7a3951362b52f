//! Agreement economics: derive the billing fields of an agreement from the
//! services selected, the start date and the duration.
//!
//! ## Rules
//!
//! - Rate/Month is the sum of the monthly price of every selected service
//!   found in the catalog, rounded half-up to cents. Unknown codes are skipped.
//! - Rate/Year is always Rate/Month × 12, rounded to cents. The yearly price
//!   column of the catalog is informational only.
//! - End date is the start date plus `duration - 1` months, or none when
//!   that lands outside the calendar.
//! - Money sums saturate at the largest representable amount.
//! - A missing, non-numeric or sub-1 duration counts as 1 month.
//! - A missing, non-numeric or negative budget counts as 0.
//!
//! Every function here is pure and total: bad input is coerced, never
//! reported.

use std::collections::HashSet;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

use super::date_utils::{add_months, parse_leading_int};
use super::service_catalog::ServiceCatalog;

const MONTHS_PER_YEAR: i64 = 12;

/// Derived billing figures for one agreement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgreementTerms {
    pub rate_per_month: Decimal,
    pub rate_per_year: Decimal,
    pub end_date: Option<NaiveDate>,
    /// Duration after coercion, always >= 1
    pub duration_months: u32,
    /// Budget after coercion, always >= 0
    pub budget_per_month: Decimal,
}

impl AgreementTerms {
    /// What the client is invoiced each month: services plus custom budget
    pub fn invoice_per_month(&self) -> Decimal {
        round_cents(self.rate_per_month.saturating_add(self.budget_per_month))
    }
}

/// Round half-up (away from zero) to 2 places and pin the scale at 2
pub fn round_cents(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

/// Coerce a typed duration: anything below one month becomes 1
pub fn normalize_duration(months: Option<i64>) -> u32 {
    match months {
        Some(m) if m >= 1 => u32::try_from(m).unwrap_or(u32::MAX),
        _ => 1,
    }
}

/// Coerce a duration typed into a form field
pub fn coerce_duration(raw: Option<&str>) -> u32 {
    normalize_duration(raw.and_then(parse_leading_int))
}

/// Parse a decimal typed into a form field; `None` if it is not a number
pub fn parse_decimal(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

/// Coerce a budget: negative or missing becomes 0
pub fn normalize_budget(budget: Option<Decimal>) -> Decimal {
    match budget {
        Some(b) if b > Decimal::ZERO => b,
        _ => Decimal::ZERO,
    }
}

/// Coerce a budget typed into a form field
pub fn coerce_budget(raw: Option<&str>) -> Decimal {
    normalize_budget(raw.and_then(parse_decimal))
}

/// Sum of monthly prices for the selected services, rounded to cents.
/// Each known code counts once regardless of repeats or order.
pub fn rate_per_month<S: AsRef<str>>(catalog: &ServiceCatalog, service_codes: &[S]) -> Decimal {
    let mut seen = HashSet::new();
    let total = service_codes
        .iter()
        .map(AsRef::as_ref)
        .filter(|code| seen.insert(*code))
        .filter_map(|code| catalog.get(code))
        .map(|entry| entry.monthly_price)
        .fold(Decimal::ZERO, Decimal::saturating_add);
    round_cents(total)
}

/// Rate/Year from Rate/Month
pub fn rate_per_year(rate_per_month: Decimal) -> Decimal {
    round_cents(rate_per_month.saturating_mul(Decimal::from(MONTHS_PER_YEAR)))
}

/// Last billed month of an agreement starting on `start_date`
pub fn end_date(start_date: NaiveDate, duration_months: u32) -> Option<NaiveDate> {
    let offset = i32::try_from(duration_months.saturating_sub(1)).ok()?;
    add_months(start_date, offset)
}

/// Derive every computed agreement field
pub fn compute_agreement<S: AsRef<str>>(
    catalog: &ServiceCatalog,
    service_codes: &[S],
    start_date: Option<NaiveDate>,
    duration_months: Option<i64>,
    budget_per_month: Option<Decimal>,
) -> AgreementTerms {
    let duration_months = normalize_duration(duration_months);
    let rate_per_month = rate_per_month(catalog, service_codes);

    AgreementTerms {
        rate_per_month,
        rate_per_year: rate_per_year(rate_per_month),
        end_date: start_date.and_then(|start| end_date(start, duration_months)),
        duration_months,
        budget_per_month: normalize_budget(budget_per_month),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::ServiceCatalogEntry;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn dec(text: &str) -> Decimal {
        Decimal::from_str(text).unwrap()
    }

    #[test]
    fn test_hosting_and_email_for_a_year() {
        let catalog = ServiceCatalog::builtin();
        let terms = compute_agreement(
            &catalog,
            &["HOST", "EMAIL"],
            Some(ymd(2024, 1, 15)),
            Some(12),
            None,
        );

        assert_eq!(terms.rate_per_month, dec("130.00"));
        assert_eq!(terms.rate_per_month.to_string(), "130.00");
        assert_eq!(terms.rate_per_year.to_string(), "1560.00");
        assert_eq!(terms.end_date, Some(ymd(2024, 12, 15)));
        assert_eq!(terms.duration_months, 12);
    }

    #[test]
    fn test_no_services_costs_nothing() {
        let catalog = ServiceCatalog::builtin();
        let none: [&str; 0] = [];
        let terms = compute_agreement(&catalog, &none, Some(ymd(2024, 6, 1)), Some(6), None);

        assert_eq!(terms.rate_per_month.to_string(), "0.00");
        assert_eq!(terms.rate_per_year.to_string(), "0.00");
        assert_eq!(terms.end_date, Some(ymd(2024, 11, 1)));
    }

    #[test]
    fn test_unknown_codes_are_skipped() {
        let catalog = ServiceCatalog::builtin();
        let terms = compute_agreement(&catalog, &["HOST", "MYSTERY"], None, Some(1), None);
        assert_eq!(terms.rate_per_month, dec("100"));
        assert_eq!(terms.end_date, None);
    }

    #[test]
    fn test_duplicate_codes_count_once() {
        let catalog = ServiceCatalog::builtin();
        assert_eq!(rate_per_month(&catalog, &["HOST", "HOST"]), dec("100"));
    }

    #[test]
    fn test_order_does_not_matter() {
        let catalog = ServiceCatalog::builtin();
        let forward = rate_per_month(&catalog, &["LOGO", "GRR", "BC", "SMM"]);
        let backward = rate_per_month(&catalog, &["SMM", "BC", "GRR", "LOGO"]);
        assert_eq!(forward, backward);
        assert_eq!(forward, dec("504.99"));
    }

    #[test]
    fn test_yearly_rate_is_monthly_times_twelve() {
        let catalog = ServiceCatalog::builtin();
        for codes in [
            vec!["LOGO"],
            vec!["GRR"],
            vec!["LOGO", "GRR", "BC"],
            vec!["PREMLLMBOO", "EMAIL"],
        ] {
            let terms = compute_agreement(&catalog, &codes, None, None, None);
            assert_eq!(terms.rate_per_year, round_cents(terms.rate_per_month * dec("12")));
        }
        // The catalog's own yearly price for LOGO is 200.00; the rule gives 199.92
        let logo = compute_agreement(&catalog, &["LOGO"], None, None, None);
        assert_eq!(logo.rate_per_year, dec("199.92"));
    }

    #[test]
    fn test_rounding_is_half_up() {
        let entries = vec![ServiceCatalogEntry {
            code: "HALF".to_string(),
            label: "Half cent".to_string(),
            monthly_price: dec("10.005"),
            yearly_price: dec("120.06"),
            hex: None,
        }];
        let catalog = ServiceCatalog::from_entries(entries).unwrap();
        assert_eq!(rate_per_month(&catalog, &["HALF"]), dec("10.01"));
        assert_eq!(round_cents(dec("2.345")), dec("2.35"));
        assert_eq!(round_cents(dec("2.344")), dec("2.34"));
    }

    #[test]
    fn test_single_month_ends_on_start() {
        let catalog = ServiceCatalog::builtin();
        let start = ymd(2024, 3, 31);
        let terms = compute_agreement(&catalog, &["HOST"], Some(start), Some(1), None);
        assert_eq!(terms.end_date, Some(start));
    }

    #[test]
    fn test_bad_durations_mean_one_month() {
        let catalog = ServiceCatalog::builtin();
        let start = Some(ymd(2024, 5, 10));
        for duration in [None, Some(0), Some(-4)] {
            let terms = compute_agreement(&catalog, &["HOST"], start, duration, None);
            assert_eq!(terms.duration_months, 1);
            assert_eq!(terms.end_date, start);
        }

        assert_eq!(coerce_duration(None), 1);
        assert_eq!(coerce_duration(Some("")), 1);
        assert_eq!(coerce_duration(Some("soon")), 1);
        assert_eq!(coerce_duration(Some("0")), 1);
        assert_eq!(coerce_duration(Some("-2")), 1);
        assert_eq!(coerce_duration(Some("6")), 6);
        assert_eq!(coerce_duration(Some("24 months")), 24);
    }

    #[test]
    fn test_budget_coercion() {
        assert_eq!(coerce_budget(Some("250.50")), dec("250.50"));
        assert_eq!(coerce_budget(Some(" 75 ")), dec("75"));
        assert_eq!(coerce_budget(Some("-10")), Decimal::ZERO);
        assert_eq!(coerce_budget(Some("lots")), Decimal::ZERO);
        assert_eq!(coerce_budget(Some("")), Decimal::ZERO);
        assert_eq!(coerce_budget(None), Decimal::ZERO);
        assert_eq!(coerce_budget(Some("1e2")), dec("100"));
    }

    #[test]
    fn test_budget_passes_through() {
        let catalog = ServiceCatalog::builtin();
        let terms = compute_agreement(&catalog, &["HOST"], None, Some(3), Some(dec("49.99")));
        assert_eq!(terms.budget_per_month, dec("49.99"));
        assert_eq!(terms.invoice_per_month(), dec("149.99"));

        let negative = compute_agreement(&catalog, &["HOST"], None, Some(3), Some(dec("-5")));
        assert_eq!(negative.budget_per_month, Decimal::ZERO);
    }

    #[test]
    fn test_deterministic() {
        let catalog = ServiceCatalog::builtin();
        let first = compute_agreement(&catalog, &["SMM", "GBP"], Some(ymd(2023, 8, 31)), Some(7), None);
        let second = compute_agreement(&catalog, &["SMM", "GBP"], Some(ymd(2023, 8, 31)), Some(7), None);
        assert_eq!(first, second);
    }

    #[test]
    fn test_end_date_rolls_over_like_calendar() {
        let catalog = ServiceCatalog::builtin();
        let terms = compute_agreement(&catalog, &["HOST"], Some(ymd(2024, 1, 31)), Some(2), None);
        assert_eq!(terms.end_date, Some(ymd(2024, 3, 2)));
    }

    #[test]
    fn test_huge_duration_has_no_end_date() {
        let catalog = ServiceCatalog::builtin();
        let start = Some(ymd(2024, 1, 15));
        for duration in [2_147_483_647, 100_000_000, i64::MAX] {
            let terms = compute_agreement(&catalog, &["HOST"], start, Some(duration), None);
            assert_eq!(terms.end_date, None);
            assert_eq!(terms.rate_per_month, dec("100"));
        }
        assert_eq!(end_date(ymd(2024, 1, 15), u32::MAX), None);
        // Still inside the calendar
        assert!(end_date(ymd(2024, 1, 15), 3_000_000).is_some());
    }

    #[test]
    fn test_money_sums_saturate() {
        let catalog = ServiceCatalog::builtin();
        let terms = compute_agreement(&catalog, &["HOST"], None, Some(12), Some(Decimal::MAX));
        assert_eq!(terms.budget_per_month, Decimal::MAX);
        assert_eq!(terms.invoice_per_month(), round_cents(Decimal::MAX));

        let pricey = ServiceCatalogEntry {
            code: "BIG".to_string(),
            label: "Big".to_string(),
            monthly_price: Decimal::MAX,
            yearly_price: Decimal::MAX,
            hex: None,
        };
        let catalog = ServiceCatalog::from_entries(vec![
            pricey.clone(),
            ServiceCatalogEntry {
                code: "BIGGER".to_string(),
                ..pricey
            },
        ])
        .unwrap();
        let terms = compute_agreement(&catalog, &["BIG", "BIGGER"], None, None, None);
        assert_eq!(terms.rate_per_month, round_cents(Decimal::MAX));
        assert_eq!(terms.rate_per_year, round_cents(Decimal::MAX));
    }
}
