#![warn(clippy::uninlined_format_args)]

pub mod bill_processor;
pub mod error;
pub mod model;
pub mod ports;
pub mod session;

pub use bill_processor::BillProcessor;
pub use error::{BillLoadError, SessionError};
pub use model::{
    BillScript, BillStatement, BillStatementWithLine, MemberBreakdown, MemberPreview,
    SettlementLine, SettlementRequest, SettlementResult, SettlementSummary,
};
pub use ports::{BillParser, ChargeParser};
pub use session::{GroupSession, PayerSelectionStep};
