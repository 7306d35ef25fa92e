#![warn(clippy::uninlined_format_args)]

pub mod model;
pub mod services;
pub mod trip;

pub use model::{
    BalanceEntry, BalanceSheet, BalanceSheetError, Money, ParticipantId, Settlement,
    SettlementContext, Transfer,
};
pub use services::{SettlementCalculator, calculate_settlements};
pub use trip::{
    BalanceAccumulator, NewPayment, Payment, PaymentEdit, PaymentId, PaymentIdGenerator, Trip,
    TripBalances, TripError,
};
