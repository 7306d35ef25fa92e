#![warn(clippy::uninlined_format_args)]

pub mod error_presenter;
pub mod report_presenter;
pub mod settlement_presenter;

pub use error_presenter::format_process_error;
pub use report_presenter::ReportPresenter;
pub use settlement_presenter::{
    SettlementPresenter, SummaryStyle, format_amount, format_settlement_summary,
};
