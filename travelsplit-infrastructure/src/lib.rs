#![warn(clippy::uninlined_format_args)]

pub mod parser;

pub use parser::{JsonDocumentParser, money_from_value, parse_balance_list};
