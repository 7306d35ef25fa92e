pub mod settlement_calculator;

pub use settlement_calculator::{SettlementCalculator, calculate_settlements};
