//! Household data structures

use serde::{Deserialize, Serialize};

/// Share of a home's value retained on sale: 6% transaction costs plus 3%
/// holding and repairs come off the top.
pub const HOME_SALE_NET_FACTOR: f64 = 0.91;

/// Which generation a household belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Generation {
    /// The elder generation receiving care
    Gen1,
    /// The adult children funding and hosting care
    Gen2,
}

/// One generation's balance sheet and monthly budget
///
/// Rates are annual percentages (6.5 means 6.5%) and terms are whole years.
/// The two generations have different stock values, so a household read from
/// JSON must spell out every field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Household {
    /// Market value of the primary residence
    pub real_estate_value: f64,

    /// Outstanding mortgage principal
    pub mortgage_balance: f64,
    pub mortgage_rate: f64,
    pub mortgage_term: u32,

    /// Cash and investments
    pub liquid_assets: f64,

    pub monthly_income: f64,
    pub monthly_expenses: f64,

    /// Non-mortgage installment debt
    pub other_debt_balance: f64,
    pub other_debt_rate: f64,
    pub other_debt_term: u32,
}

impl Household {
    /// Stock Gen1 household (elder generation)
    pub fn default_gen1() -> Self {
        Self {
            real_estate_value: 400_000.0,
            mortgage_balance: 0.0,
            mortgage_rate: 0.0,
            mortgage_term: 0,
            liquid_assets: 300_000.0,
            monthly_income: 3_000.0,
            monthly_expenses: 2_000.0,
            other_debt_balance: 0.0,
            other_debt_rate: 6.0,
            other_debt_term: 10,
        }
    }

    /// Stock Gen2 household (adult children)
    pub fn default_gen2() -> Self {
        Self {
            real_estate_value: 800_000.0,
            mortgage_balance: 0.0,
            mortgage_rate: 0.0,
            mortgage_term: 0,
            liquid_assets: 1_500_000.0,
            monthly_income: 8_000.0,
            monthly_expenses: 5_000.0,
            other_debt_balance: 0.0,
            other_debt_rate: 6.0,
            other_debt_term: 10,
        }
    }

    pub fn for_generation(generation: Generation) -> Self {
        match generation {
            Generation::Gen1 => Self::default_gen1(),
            Generation::Gen2 => Self::default_gen2(),
        }
    }

    /// Cash released by selling the home after costs and paying off the mortgage.
    /// Negative when the mortgage exceeds the net sale price.
    pub fn home_sale_proceeds(&self) -> f64 {
        self.real_estate_value * HOME_SALE_NET_FACTOR - self.mortgage_balance
    }

    /// Names and values of every monetary field, for validation
    pub(crate) fn monetary_fields(&self) -> [(&'static str, f64); 6] {
        [
            ("real_estate_value", self.real_estate_value),
            ("mortgage_balance", self.mortgage_balance),
            ("liquid_assets", self.liquid_assets),
            ("monthly_income", self.monthly_income),
            ("monthly_expenses", self.monthly_expenses),
            ("other_debt_balance", self.other_debt_balance),
        ]
    }
}
