use crate::model::{Charges, Member, Money};

/// Subtotal and charges of a bill, with tax and tip resolved against the meal total.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BillTotals {
    pub meal: Money,
    pub tax: Money,
    pub tip: Money,
    tax_and_tip: Money,
    total: Money,
}

impl BillTotals {
    /// Resolves the bill, or `None` when a subtotal or the grand total leaves the
    /// decimal range.
    pub fn compute(members: &[Member], charges: Charges) -> Option<Self> {
        let Some(totals) = Self::try_compute(members, charges) else {
            tracing::warn!(
                member_count = members.len(),
                "Bill totals overflowed the decimal range"
            );
            return None;
        };

        if totals.tax.is_negative() || totals.tip.is_negative() {
            tracing::warn!(tax = %totals.tax, tip = %totals.tip, "Negative charge accepted as entered");
        }
        Some(totals)
    }

    fn try_compute(members: &[Member], charges: Charges) -> Option<Self> {
        let costs = members
            .iter()
            .map(Member::meal_cost)
            .collect::<Option<Vec<_>>>()?;
        let meal = Money::checked_sum(costs)?;
        let tax = charges.tax.apportion(meal);
        let tip = charges.tip.apportion(meal);
        let tax_and_tip = tax.checked_add(tip)?;
        let total = meal.checked_add(tax_and_tip)?;

        Some(Self {
            meal,
            tax,
            tip,
            tax_and_tip,
            total,
        })
    }

    pub fn tax_and_tip(self) -> Money {
        self.tax_and_tip
    }

    pub fn grand_total(self) -> Money {
        self.total
    }

    /// Tax and tip split evenly across `member_count`, regardless of spend.
    pub fn tax_and_tip_per_person(self, member_count: usize) -> Money {
        self.tax_and_tip
            .checked_split(member_count)
            .unwrap_or(Money::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ChargeSpec, ItemId, MemberId};
    use rstest::{fixture, rstest};
    use rust_decimal::Decimal;

    #[fixture]
    fn members() -> Vec<Member> {
        vec![
            Member::new(MemberId::new("a"), "Alice").with_item(
                ItemId::new("1"),
                Money::from_i64(60),
                "Steak",
            ),
            Member::new(MemberId::new("b"), "Bob")
                .with_item(ItemId::new("2"), Money::from_i64(25), "Burger")
                .with_item(ItemId::new("3"), Money::from_i64(15), "Beer"),
        ]
    }

    #[rstest]
    #[case::no_charges(ChargeSpec::None, ChargeSpec::None, 0, 0)]
    #[case::percentages(
        ChargeSpec::Percent(Decimal::from(10)),
        ChargeSpec::Percent(Decimal::from(15)),
        10,
        15
    )]
    #[case::fixed(
        ChargeSpec::Fixed(Money::from_i64(8)),
        ChargeSpec::Fixed(Money::from_i64(12)),
        8,
        12
    )]
    #[case::mixed(
        ChargeSpec::Percent(Decimal::from(10)),
        ChargeSpec::Fixed(Money::from_i64(5)),
        10,
        5
    )]
    #[case::negative_fixed_passes_through(
        ChargeSpec::Fixed(Money::from_i64(-4)),
        ChargeSpec::None,
        -4,
        0
    )]
    fn resolves_charges_against_meal_total(
        members: Vec<Member>,
        #[case] tax: ChargeSpec,
        #[case] tip: ChargeSpec,
        #[case] expected_tax: i64,
        #[case] expected_tip: i64,
    ) {
        let totals = BillTotals::compute(&members, Charges { tax, tip }).expect("totals fit");

        assert_eq!(totals.meal, Money::from_i64(100));
        assert_eq!(totals.tax, Money::from_i64(expected_tax));
        assert_eq!(totals.tip, Money::from_i64(expected_tip));
        assert_eq!(
            totals.grand_total(),
            Money::from_i64(100 + expected_tax + expected_tip)
        );
    }

    #[rstest]
    fn splits_tax_and_tip_evenly(members: Vec<Member>) {
        let totals = BillTotals::compute(
            &members,
            Charges {
                tax: ChargeSpec::Percent(Decimal::from(10)),
                tip: ChargeSpec::Percent(Decimal::from(15)),
            },
        )
        .expect("totals fit");

        assert_eq!(totals.tax_and_tip(), Money::from_i64(25));
        assert_eq!(totals.tax_and_tip_per_person(2), Money::new(1250, 2));
    }

    #[test]
    fn empty_group_has_zero_per_person_share() {
        let totals = BillTotals::compute(
            &[],
            Charges {
                tax: ChargeSpec::Fixed(Money::from_i64(3)),
                tip: ChargeSpec::None,
            },
        )
        .expect("totals fit");

        assert_eq!(totals.meal, Money::ZERO);
        assert_eq!(totals.tax_and_tip_per_person(0), Money::ZERO);
    }

    #[test]
    fn percentage_of_zero_meal_is_zero() {
        let totals = BillTotals::compute(
            &[Member::new(MemberId::new("a"), "Alice")],
            Charges {
                tax: ChargeSpec::Percent(Decimal::from(20)),
                tip: ChargeSpec::Fixed(Money::from_i64(6)),
            },
        )
        .expect("totals fit");

        assert_eq!(totals.tax, Money::ZERO);
        assert_eq!(totals.tax_and_tip_per_person(1), Money::from_i64(6));
    }

    #[rstest]
    #[case::items(
        Money::from_decimal(Decimal::MAX),
        Money::from_decimal(Decimal::MAX),
        ChargeSpec::None
    )]
    #[case::fixed_tax(
        Money::from_i64(10),
        Money::ZERO,
        ChargeSpec::Fixed(Money::from_decimal(Decimal::MAX))
    )]
    fn overflowing_bill_has_no_totals(
        #[case] first: Money,
        #[case] second: Money,
        #[case] tax: ChargeSpec,
    ) {
        let members = vec![
            Member::new(MemberId::new("a"), "A").with_item(ItemId::new("1"), first, "x"),
            Member::new(MemberId::new("b"), "B").with_item(ItemId::new("2"), second, "y"),
        ];

        let totals = BillTotals::compute(
            &members,
            Charges {
                tax,
                tip: ChargeSpec::None,
            },
        );

        assert_eq!(totals, None);
    }
}
