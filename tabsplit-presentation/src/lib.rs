#![warn(clippy::uninlined_format_args)]

pub mod error_presenter;
pub mod money;
pub mod payer_presenter;
pub mod settlement_presenter;
pub mod text_table;

pub use error_presenter::{format_bill_load_error, format_session_error};
pub use payer_presenter::PayerSelectionPresenter;
pub use settlement_presenter::{SettlementPresenter, SettlementView};
