pub mod bill_totals;
pub mod settlement_calculator;
pub mod settlement_context;
pub mod share_calculator;
pub mod split_policy;

pub use bill_totals::BillTotals;
pub use settlement_calculator::SettlementCalculator;
pub use settlement_context::{
    MAX_SETTLEMENT_SCALE, RoundingMode, SettlementContext, SettlementContextError,
};
pub use share_calculator::ShareCalculator;
pub use split_policy::SplitPolicy;
