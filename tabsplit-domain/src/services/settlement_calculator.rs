use crate::{
    model::{MemberShare, Money, Transfer},
    services::SettlementContext,
};

/// Proportional settlement calculation service.
///
/// Every debtor pays every creditor a slice of their debt proportional to that
/// creditor's part of the total surplus. This is not a transaction-minimising
/// scheme: `d` debtors and `c` creditors produce up to `d * c` transfers.
pub struct SettlementCalculator;

impl SettlementCalculator {
    /// Calculate transfers from rounded member balances.
    ///
    /// Debtors are visited in member order, and for each debtor the creditors in
    /// member order. Raw slices at or below the context threshold are dropped;
    /// emitted amounts are rounded to the context scale and are always positive.
    pub fn calculate<'a>(
        &self,
        shares: &[MemberShare<'a>],
        context: SettlementContext,
    ) -> Vec<Transfer<'a>> {
        let creditors: Vec<&MemberShare<'a>> =
            shares.iter().filter(|s| s.balance.is_positive()).collect();
        let debtors: Vec<&MemberShare<'a>> =
            shares.iter().filter(|s| s.balance.is_negative()).collect();

        let Some(total_credit) = Money::checked_sum(creditors.iter().map(|s| s.balance)) else {
            tracing::warn!(
                creditor_count = creditors.len(),
                "Total credit overflowed; no transfers computed"
            );
            return Vec::new();
        };
        if debtors.is_empty() || total_credit.is_zero() {
            return Vec::new();
        }

        let mut transfers = Vec::with_capacity(debtors.len() * creditors.len());
        for debtor in &debtors {
            let owed = debtor.balance.abs().as_decimal();

            for creditor in &creditors {
                let share = creditor.balance.as_decimal() / total_credit.as_decimal();
                let Some(raw) = owed.checked_mul(share).map(Money::from_decimal) else {
                    tracing::warn!(
                        debtor = debtor.name,
                        creditor = creditor.name,
                        "Transfer amount overflowed; skipping"
                    );
                    continue;
                };

                if !context.exceeds_threshold(raw) {
                    tracing::trace!(
                        debtor = debtor.name,
                        creditor = creditor.name,
                        amount = %raw,
                        "Transfer below threshold dropped"
                    );
                    continue;
                }

                // A zero threshold lets slices through that round away to nothing.
                let amount = context.round(raw);
                if !amount.is_positive() {
                    continue;
                }

                transfers.push(Transfer {
                    from: debtor.name,
                    to: creditor.name,
                    amount,
                });
            }
        }

        transfers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MemberId;
    use rstest::{fixture, rstest};

    #[fixture]
    fn calculator() -> SettlementCalculator {
        SettlementCalculator
    }

    fn shares<'a>(ids: &'a [MemberId], entries: &[(&'a str, Money)]) -> Vec<MemberShare<'a>> {
        entries
            .iter()
            .zip(ids)
            .map(|(&(name, balance), id)| MemberShare {
                id,
                name,
                owed: Money::ZERO,
                paid: Money::ZERO,
                balance,
            })
            .collect()
    }

    fn ids(count: usize) -> Vec<MemberId> {
        (0..count).map(|idx| MemberId::new(idx.to_string())).collect()
    }

    #[rstest]
    #[case::single_pair(
        vec![("A", Money::from_i64(10)), ("B", Money::from_i64(-10))],
        vec![("B", "A", Money::from_i64(10))]
    )]
    #[case::one_creditor_two_debtors(
        vec![
            ("A", Money::from_i64(100)),
            ("B", Money::from_i64(-50)),
            ("C", Money::from_i64(-50)),
        ],
        vec![("B", "A", Money::from_i64(50)), ("C", "A", Money::from_i64(50))]
    )]
    #[case::two_creditors_proportional(
        vec![
            ("A", Money::from_i64(30)),
            ("B", Money::from_i64(10)),
            ("C", Money::from_i64(-40)),
        ],
        vec![("C", "A", Money::from_i64(30)), ("C", "B", Money::from_i64(10))]
    )]
    #[case::member_order_is_kept(
        vec![
            ("D", Money::from_i64(-20)),
            ("C", Money::from_i64(20)),
            ("B", Money::from_i64(-20)),
            ("A", Money::from_i64(20)),
        ],
        vec![
            ("D", "C", Money::from_i64(10)),
            ("D", "A", Money::from_i64(10)),
            ("B", "C", Money::from_i64(10)),
            ("B", "A", Money::from_i64(10)),
        ]
    )]
    #[case::all_settled(
        vec![("A", Money::ZERO), ("B", Money::ZERO)],
        vec![]
    )]
    #[case::creditors_only(
        vec![("A", Money::from_i64(5)), ("B", Money::ZERO)],
        vec![]
    )]
    #[case::debtors_only(
        vec![("A", Money::from_i64(-5)), ("B", Money::ZERO)],
        vec![]
    )]
    #[case::thirds_are_rounded(
        vec![
            ("A", Money::from_i64(10)),
            ("B", Money::from_i64(10)),
            ("C", Money::from_i64(10)),
            ("D", Money::from_i64(-10)),
        ],
        vec![
            ("D", "A", Money::new(333, 2)),
            ("D", "B", Money::new(333, 2)),
            ("D", "C", Money::new(333, 2)),
        ]
    )]
    fn settlement_calculator_cases(
        calculator: SettlementCalculator,
        #[case] balances: Vec<(&'static str, Money)>,
        #[case] expected: Vec<(&'static str, &'static str, Money)>,
    ) {
        let ids = ids(balances.len());
        let shares = shares(&ids, &balances);

        let transfers = calculator.calculate(&shares, SettlementContext::two_decimal_default());

        let expected: Vec<Transfer> = expected
            .into_iter()
            .map(|(from, to, amount)| Transfer { from, to, amount })
            .collect();
        assert_eq!(transfers, expected);
    }

    #[rstest]
    fn transfer_of_exactly_threshold_is_dropped(calculator: SettlementCalculator) {
        let ids = ids(3);
        let shares = shares(
            &ids,
            &[
                ("A", Money::new(1, 2)),
                ("B", Money::new(-1, 2)),
                ("C", Money::ZERO),
            ],
        );

        let transfers = calculator.calculate(&shares, SettlementContext::two_decimal_default());

        assert!(transfers.is_empty());
    }

    #[rstest]
    fn transfer_just_above_threshold_is_kept_and_rounded(calculator: SettlementCalculator) {
        // C owes 0.02; A holds 55% of the surplus (0.011), B holds 45% (0.009).
        let ids = ids(4);
        let shares = shares(
            &ids,
            &[
                ("A", Money::new(55, 2)),
                ("B", Money::new(45, 2)),
                ("C", Money::new(-2, 2)),
                ("D", Money::new(-98, 2)),
            ],
        );

        let transfers = calculator.calculate(&shares, SettlementContext::two_decimal_default());

        assert_eq!(
            transfers[0],
            Transfer {
                from: "C",
                to: "A",
                amount: Money::new(1, 2),
            }
        );
        assert!(transfers.iter().all(|t| !(t.from == "C" && t.to == "B")));
        assert_eq!(
            &transfers[1..],
            &[
                Transfer {
                    from: "D",
                    to: "A",
                    amount: Money::new(54, 2),
                },
                Transfer {
                    from: "D",
                    to: "B",
                    amount: Money::new(44, 2),
                },
            ]
        );
    }

    #[rstest]
    fn custom_threshold_suppresses_small_transfers(calculator: SettlementCalculator) {
        let ids = ids(3);
        let shares = shares(
            &ids,
            &[
                ("A", Money::from_i64(100)),
                ("B", Money::from_i64(-99)),
                ("C", Money::from_i64(-1)),
            ],
        );
        let context = SettlementContext {
            transfer_threshold: Money::from_i64(5),
            ..SettlementContext::two_decimal_default()
        };

        let transfers = calculator.calculate(&shares, context);

        assert_eq!(
            transfers,
            vec![Transfer {
                from: "B",
                to: "A",
                amount: Money::from_i64(99),
            }]
        );
    }

    #[rstest]
    fn zero_threshold_never_emits_zero_amounts(calculator: SettlementCalculator) {
        // B's 0.001 slice clears a zero threshold but rounds to 0.00.
        let ids = ids(3);
        let shares = shares(
            &ids,
            &[
                ("A", Money::new(10, 3)),
                ("B", Money::new(-1, 3)),
                ("C", Money::new(-9, 3)),
            ],
        );
        let context = SettlementContext {
            transfer_threshold: Money::ZERO,
            ..SettlementContext::two_decimal_default()
        };

        let transfers = calculator.calculate(&shares, context);

        assert_eq!(
            transfers,
            vec![Transfer {
                from: "C",
                to: "A",
                amount: Money::new(1, 2),
            }]
        );
    }
}
