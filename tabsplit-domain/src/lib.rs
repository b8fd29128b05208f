#![warn(clippy::uninlined_format_args)]

pub mod model;
pub mod services;

pub use model::{
    ChargeSpec, Charges, Item, ItemId, Member, MemberId, MemberShare, Money, PayerSelection,
    PayerSelections, Settlement, Transfer,
};
pub use services::{
    BillTotals, RoundingMode, SettlementCalculator, SettlementContext, SettlementContextError,
    ShareCalculator, SplitPolicy,
};
