pub mod money;
pub mod totals;
