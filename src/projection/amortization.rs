//! Fixed-rate loan amortization
//!
//! Rates are annual percentages and terms are whole years; both formulas work
//! on the monthly rate `r = rate / 100 / 12` over `n = term * 12` payments.
//! Loans with no rate are treated as non-amortizing: no payment is ever made
//! and the balance stays at principal until the term ends.

use serde::{Deserialize, Serialize};

fn monthly_rate(annual_rate_percent: f64) -> f64 {
    annual_rate_percent / 100.0 / 12.0
}

/// Number of monthly payments, saturating for absurd terms
fn payment_count(term_years: u32) -> u32 {
    term_years.saturating_mul(12)
}

fn compound(r: f64, months: u32) -> f64 {
    (1.0 + r).powi(months.min(i32::MAX as u32) as i32)
}

/// Level monthly payment that retires `principal` over `term_years`.
///
/// Returns 0 for a non-positive principal, term or rate.
pub fn monthly_payment(principal: f64, annual_rate_percent: f64, term_years: u32) -> f64 {
    if principal <= 0.0 || term_years == 0 || annual_rate_percent <= 0.0 {
        return 0.0;
    }
    let r = monthly_rate(annual_rate_percent);
    let growth = compound(r, payment_count(term_years));
    principal * r / (1.0 - growth.recip())
}

/// Outstanding balance after `months_elapsed` level payments.
///
/// Returns `principal` when nothing has happened yet (non-positive principal,
/// zero term, zero months) or when the loan carries no rate, and 0 once the
/// full term has elapsed.
pub fn remaining_balance(
    principal: f64,
    annual_rate_percent: f64,
    term_years: u32,
    months_elapsed: u32,
) -> f64 {
    if principal <= 0.0 || term_years == 0 || months_elapsed == 0 {
        return principal;
    }
    if months_elapsed >= payment_count(term_years) {
        return 0.0;
    }
    if annual_rate_percent <= 0.0 {
        return principal;
    }
    let r = monthly_rate(annual_rate_percent);
    let payment = monthly_payment(principal, annual_rate_percent, term_years);
    let growth = compound(r, months_elapsed);
    principal * growth - payment * (growth - 1.0) / r
}

/// Origination terms of one loan, fixed for the life of a scenario
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    pub principal: f64,
    pub annual_rate_percent: f64,
    pub term_years: u32,
}

impl Loan {
    pub fn new(principal: f64, annual_rate_percent: f64, term_years: u32) -> Self {
        Self {
            principal,
            annual_rate_percent,
            term_years,
        }
    }

    pub fn monthly_payment(&self) -> f64 {
        monthly_payment(self.principal, self.annual_rate_percent, self.term_years)
    }

    /// Balance after `months_elapsed` payments, recomputed from origination
    pub fn balance_after(&self, months_elapsed: u32) -> f64 {
        remaining_balance(
            self.principal,
            self.annual_rate_percent,
            self.term_years,
            months_elapsed,
        )
    }
}
