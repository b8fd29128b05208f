use crate::{
    model::{Member, MemberId, MemberShare, Money, PayerSelections},
    services::{BillTotals, SettlementContext},
};
use fxhash::FxHashSet;

/// Owed and paid amounts per member.
pub struct ShareCalculator;

impl ShareCalculator {
    /// Meal cost plus an equal share of tax and tip, in member order.
    ///
    /// `None` when a member's amount leaves the decimal range.
    pub fn owed_amounts(&self, members: &[Member], totals: BillTotals) -> Option<Vec<Money>> {
        let per_person = totals.tax_and_tip_per_person(members.len());
        members
            .iter()
            .map(|member| member.meal_cost()?.checked_add(per_person))
            .collect()
    }

    /// `total_amount` split evenly between the selected payers, in member order.
    ///
    /// Everyone pays nothing when no payer is selected.
    pub fn paid_amounts(
        &self,
        members: &[Member],
        payers: &PayerSelections,
        total_amount: Money,
    ) -> Vec<Money> {
        let per_payer = total_amount
            .checked_split(payers.payer_count())
            .unwrap_or(Money::ZERO);
        let paying: FxHashSet<&MemberId> = payers
            .iter()
            .filter(|selection| selection.is_paying)
            .map(|selection| &selection.member_id)
            .collect();

        members
            .iter()
            .map(|member| {
                if paying.contains(&member.id) {
                    per_payer
                } else {
                    Money::ZERO
                }
            })
            .collect()
    }

    /// `None` when a balance leaves the decimal range.
    pub fn shares<'a>(
        &self,
        members: &'a [Member],
        owed: &[Money],
        paid: &[Money],
        context: SettlementContext,
    ) -> Option<Vec<MemberShare<'a>>> {
        debug_assert_eq!(members.len(), owed.len());
        debug_assert_eq!(members.len(), paid.len());

        members
            .iter()
            .zip(owed)
            .zip(paid)
            .map(|((member, &owed), &paid)| {
                Some(MemberShare {
                    id: &member.id,
                    name: &member.name,
                    owed,
                    paid,
                    balance: context.round(paid.checked_sub(owed)?),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ChargeSpec, Charges, ItemId};
    use rstest::{fixture, rstest};
    use rust_decimal::Decimal;

    #[fixture]
    fn calculator() -> ShareCalculator {
        ShareCalculator
    }

    fn member(id: &str, name: &str, amounts: &[i64]) -> Member {
        amounts
            .iter()
            .enumerate()
            .fold(Member::new(MemberId::new(id), name), |member, (idx, &amount)| {
                member.with_item(
                    ItemId::new(format!("{id}-{idx}")),
                    Money::from_i64(amount),
                    "item",
                )
            })
    }

    #[rstest]
    fn owed_includes_even_charge_share(calculator: ShareCalculator) {
        let members = vec![
            member("a", "A", &[50, 10]),
            member("b", "B", &[30]),
            member("c", "C", &[10]),
        ];
        let totals = BillTotals::compute(
            &members,
            Charges {
                tax: ChargeSpec::Percent(Decimal::from(10)),
                tip: ChargeSpec::Fixed(Money::from_i64(5)),
            },
        )
        .expect("totals fit");

        let owed = calculator.owed_amounts(&members, totals);

        assert_eq!(
            owed,
            Some(vec![
                Money::from_i64(65),
                Money::from_i64(35),
                Money::from_i64(15)
            ])
        );
    }

    #[rstest]
    #[case::single_payer(&[true, false, false], &[90, 0, 0])]
    #[case::two_payers(&[true, false, true], &[45, 0, 45])]
    #[case::everyone(&[true, true, true], &[30, 30, 30])]
    #[case::nobody(&[false, false, false], &[0, 0, 0])]
    fn paid_splits_total_between_payers(
        calculator: ShareCalculator,
        #[case] flags: &[bool],
        #[case] expected: &[i64],
    ) {
        let members = vec![
            member("a", "A", &[]),
            member("b", "B", &[]),
            member("c", "C", &[]),
        ];
        let payers: PayerSelections = members
            .iter()
            .zip(flags)
            .map(|(member, &flag)| (member.id.clone(), flag))
            .collect();

        let paid = calculator.paid_amounts(&members, &payers, Money::from_i64(90));

        let expected: Vec<Money> = expected.iter().map(|&v| Money::from_i64(v)).collect();
        assert_eq!(paid, expected);
    }

    #[rstest]
    fn unknown_selection_does_not_pay(calculator: ShareCalculator) {
        let members = vec![member("a", "A", &[]), member("b", "B", &[])];
        let payers: PayerSelections = [
            (MemberId::new("a"), true),
            (MemberId::new("ghost"), true),
            (MemberId::new("b"), false),
        ]
        .into_iter()
        .collect();

        let paid = calculator.paid_amounts(&members, &payers, Money::from_i64(40));

        assert_eq!(paid, vec![Money::from_i64(20), Money::ZERO]);
    }

    #[rstest]
    fn balance_is_rounded_paid_minus_owed(calculator: ShareCalculator) {
        let members = vec![member("a", "A", &[]), member("b", "B", &[])];
        let owed = [Money::new(33_3333, 4), Money::new(66_6667, 4)];
        let paid = [Money::from_i64(100), Money::ZERO];

        let shares = calculator
            .shares(&members, &owed, &paid, SettlementContext::two_decimal_default())
            .expect("balances fit");

        assert_eq!(shares[0].balance, Money::new(6667, 2));
        assert_eq!(shares[1].balance, Money::new(-6667, 2));
        assert_eq!(shares[0].name, "A");
        assert_eq!(shares[1].owed, Money::new(66_6667, 4));
    }

    #[rstest]
    fn overflowing_balance_is_none(calculator: ShareCalculator) {
        let members = vec![member("a", "A", &[])];
        let owed = [Money::from_decimal(Decimal::MAX)];
        let paid = [Money::from_decimal(Decimal::MIN)];

        let shares =
            calculator.shares(&members, &owed, &paid, SettlementContext::two_decimal_default());

        assert_eq!(shares, None);
    }
}
