use tabsplit_domain::{Money, SettlementContext};

/// Rounds to the context scale and always prints that many decimals.
pub fn format_money(amount: Money, context: SettlementContext) -> String {
    let rounded = context.round(amount);
    let scale = context.scale as usize;
    format!("{rounded:.scale$}")
}

/// Like [`format_money`], with an explicit `+` on non-negative amounts.
pub fn format_signed_money(amount: Money, context: SettlementContext) -> String {
    let formatted = format_money(amount, context);
    if amount.is_negative() {
        formatted
    } else {
        format!("+{formatted}")
    }
}
