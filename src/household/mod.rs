//! Household balance sheets for the two generations

mod data;

pub use data::{Generation, Household, HOME_SALE_NET_FACTOR};
