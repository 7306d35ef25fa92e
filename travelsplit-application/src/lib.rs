#![warn(clippy::uninlined_format_args)]

pub mod error;
pub mod model;
pub mod ports;
pub mod settlement_processor;

pub use error::{BalanceInputError, DocumentParseError, ProcessError};
pub use model::{InputDocument, SettlementReport, TripOverview};
pub use ports::DocumentParser;
pub use settlement_processor::SettlementProcessor;
