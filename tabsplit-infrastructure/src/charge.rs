use tabsplit_application::ChargeParser;
use tabsplit_domain::{ChargeSpec, Money};
use tabsplit_parser::{Charge, parse_charge};

#[derive(Default)]
pub struct TabsplitChargeParser;

impl ChargeParser for TabsplitChargeParser {
    fn parse_charge(&self, text: &str) -> ChargeSpec {
        match parse_charge(text) {
            Charge::Empty => ChargeSpec::None,
            Charge::Fixed(amount) => ChargeSpec::Fixed(Money::from_decimal(amount)),
            Charge::Percent(percent) => ChargeSpec::Percent(percent),
        }
    }
}
