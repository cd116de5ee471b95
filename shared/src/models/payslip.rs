//! Payslip Model
//!
//! Payslips are issued by the payroll backend and read-only in the
//! console. Amounts are stored as `f64` for serialization; summation
//! goes through `Decimal` to avoid drift across many slips.

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

/// Payslip record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payslip {
    pub id: i64,
    pub employee_id: i64,
    /// Employee display name (denormalized for list views)
    pub employee_name: String,
    /// Payroll period, `YYYY-MM`
    pub period: String,
    pub gross: f64,
    pub net: f64,
    pub currency: String,
    /// Issue timestamp (ms)
    pub issued_at: i64,
}

/// Check a payroll period string (`YYYY-MM`, month 01-12)
pub fn period_is_valid(period: &str) -> bool {
    let Some((year, month)) = period.split_once('-') else {
        return false;
    };
    if year.len() != 4 || month.len() != 2 {
        return false;
    }
    if !year.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    matches!(month.parse::<u8>(), Ok(m) if (1..=12).contains(&m))
}

/// Sum net amounts with precise arithmetic
pub fn sum_net(payslips: &[Payslip]) -> f64 {
    let total: Decimal = payslips
        .iter()
        .filter_map(|p| Decimal::from_f64(p.net))
        .sum();

    total
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}
