use crate::{
    money::{format_money, format_signed_money},
    text_table::{Alignment, TextTableBuilder},
};
use std::borrow::Cow;
use tabsplit_application::{MemberBreakdown, SettlementLine, SettlementSummary};
use tabsplit_domain::SettlementContext;
use tabsplit_i18n as i18n;

pub struct SettlementPresenter;

pub struct SettlementView {
    pub total_line: String,
    pub breakdown_table: Option<String>,
    /// `None` when nobody owes anybody.
    pub transfer_table: Option<String>,
}

impl SettlementView {
    pub fn to_text(&self) -> String {
        let mut sections = vec![self.total_line.clone()];
        if let Some(table) = &self.breakdown_table {
            sections.push(table.clone());
        }
        match &self.transfer_table {
            Some(table) => sections.push(format!("{}\n{table}", i18n::SETTLEMENTS)),
            None => sections.push(i18n::ALL_SETTLED.to_string()),
        }
        sections.join("\n")
    }
}

impl SettlementPresenter {
    pub fn render(summary: &SettlementSummary, context: SettlementContext) -> SettlementView {
        let total_line = format!(
            "{}: {}",
            i18n::TOTAL_AMOUNT,
            format_money(summary.total_amount, context)
        );

        let breakdown_table = (!summary.breakdown().is_empty())
            .then(|| Self::build_breakdown_table(summary.breakdown(), context));
        let transfer_table = (!summary.is_settled())
            .then(|| Self::build_transfer_table(summary.settlements(), context));

        SettlementView {
            total_line,
            breakdown_table,
            transfer_table,
        }
    }

    pub fn build_breakdown_table(breakdown: &[MemberBreakdown], context: SettlementContext) -> String {
        TextTableBuilder::new()
            .alignments(&[
                Alignment::Left,
                Alignment::Right,
                Alignment::Right,
                Alignment::Right,
            ])
            .headers(&[
                Cow::Borrowed(i18n::MEMBER),
                Cow::Borrowed(i18n::OWED),
                Cow::Borrowed(i18n::PAID),
                Cow::Borrowed(i18n::BALANCE),
            ])
            .rows(breakdown.iter().map(|member| {
                [
                    Cow::Borrowed(member.name.as_str()),
                    Cow::Owned(format_money(member.owed, context)),
                    Cow::Owned(format_money(member.paid, context)),
                    Cow::Owned(format_signed_money(member.balance, context)),
                ]
            }))
            .build()
    }

    pub fn build_transfer_table(transfers: &[SettlementLine], context: SettlementContext) -> String {
        let mut builder = TextTableBuilder::new()
            .alignments(&[Alignment::Left, Alignment::Left, Alignment::Right])
            .headers(&[
                Cow::Borrowed(i18n::FROM),
                Cow::Borrowed(i18n::TO),
                Cow::Borrowed(i18n::AMOUNT),
            ]);

        for transfer in transfers {
            builder = builder.row([
                Cow::Borrowed(transfer.from.as_str()),
                Cow::Borrowed(transfer.to.as_str()),
                Cow::Owned(format_money(transfer.amount, context)),
            ]);
        }

        builder.build()
    }
}
