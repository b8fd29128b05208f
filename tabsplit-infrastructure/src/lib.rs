#![warn(clippy::uninlined_format_args)]

pub mod charge;
pub mod parser;

pub use charge::TabsplitChargeParser;
pub use parser::TabsplitBillParser;
