use crate::{
    money::format_money,
    text_table::{Alignment, TextTableBuilder},
};
use std::borrow::Cow;
use tabsplit_application::PayerSelectionStep;
use tabsplit_domain::SettlementContext;
use tabsplit_i18n as i18n;

pub struct PayerSelectionPresenter;

impl PayerSelectionPresenter {
    /// One row per member: meal cost, share with tax and tip, paying flag.
    pub fn render(step: &PayerSelectionStep, context: SettlementContext) -> String {
        let table = TextTableBuilder::new()
            .alignments(&[
                Alignment::Left,
                Alignment::Right,
                Alignment::Right,
                Alignment::Center,
            ])
            .headers(&[
                Cow::Borrowed(i18n::MEMBER),
                Cow::Borrowed(i18n::MEAL),
                Cow::Borrowed(i18n::SHARE),
                Cow::Borrowed(i18n::PAYING),
            ])
            .rows(step.previews().into_iter().map(|preview| {
                [
                    Cow::Borrowed(preview.member.name.as_str()),
                    Cow::Owned(format_money(preview.meal, context)),
                    Cow::Owned(format_money(preview.owed, context)),
                    Cow::Borrowed(if preview.is_paying { i18n::YES } else { i18n::NO }),
                ]
            }))
            .build();

        format!(
            "{}: {}\n{table}",
            i18n::TOTAL_AMOUNT,
            format_money(step.total_amount(), context)
        )
    }
}
