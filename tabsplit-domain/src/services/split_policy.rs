use crate::{
    model::{Charges, Member, Money, PayerSelections, Settlement},
    services::{BillTotals, SettlementCalculator, SettlementContext, ShareCalculator},
};

/// Runs the whole split: owed, paid, balances, then transfers.
pub struct SplitPolicy;

impl SplitPolicy {
    /// Settle a group bill.
    ///
    /// `total_amount` is the grand total handed over from item entry; it is not
    /// recomputed here. When nobody, or everybody, is marked as paying the result is
    /// empty. Amounts outside the decimal range also give an empty result.
    pub fn settle<'a>(
        members: &'a [Member],
        charges: Charges,
        payers: &PayerSelections,
        total_amount: Money,
        context: SettlementContext,
    ) -> Settlement<'a> {
        let payer_count = payers.payer_count();
        let non_payer_count = payers.non_payer_count();
        if payer_count == 0 || non_payer_count == 0 {
            tracing::debug!(
                payer_count,
                non_payer_count,
                "Settlement skipped: payers and non-payers are both required"
            );
            return Settlement::empty();
        }

        let share_calculator = ShareCalculator;
        let shares = BillTotals::compute(members, charges).and_then(|totals| {
            let owed = share_calculator.owed_amounts(members, totals)?;
            let paid = share_calculator.paid_amounts(members, payers, total_amount);
            let shares = share_calculator.shares(members, &owed, &paid, context)?;
            Some((totals, shares))
        });
        let Some((totals, shares)) = shares else {
            tracing::warn!(
                member_count = members.len(),
                total_amount = %total_amount,
                "Settlement amounts overflowed the decimal range; returning empty settlement"
            );
            return Settlement::empty();
        };

        let transfers = SettlementCalculator.calculate(&shares, context);

        tracing::debug!(
            member_count = members.len(),
            payer_count,
            meal_total = %totals.meal,
            tax_and_tip = %totals.tax_and_tip(),
            total_amount = %total_amount,
            transfer_count = transfers.len(),
            "Settlement computed"
        );

        Settlement { shares, transfers }
    }
}
