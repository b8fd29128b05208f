use crate::{error::BillLoadError, model::BillScript};
use tabsplit_domain::ChargeSpec;

pub trait ChargeParser: Send + Sync {
    /// Resolve free-form tax or tip text. Never fails: unreadable text counts as zero.
    fn parse_charge(&self, text: &str) -> ChargeSpec;
}

pub trait BillParser: Send + Sync {
    fn parse<'a>(&self, content: &'a str) -> Result<BillScript<'a>, BillLoadError<'a>>;
}
