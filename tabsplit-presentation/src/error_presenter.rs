use tabsplit_application::{BillLoadError, SessionError};
use tabsplit_i18n as i18n;

pub fn format_session_error(error: &SessionError) -> String {
    match error {
        SessionError::BlankMemberName => i18n::BLANK_MEMBER_NAME.to_string(),
        SessionError::UnknownMember(id) => i18n::undefined_member(id),
        SessionError::NegativeAmount(amount) => i18n::negative_amount(amount),
        SessionError::NoPayerSelected => i18n::NO_PAYER_SELECTED.to_string(),
        SessionError::UnknownItem(id) => i18n::unknown_item(id),
        SessionError::AmountOverflow => i18n::AMOUNT_OVERFLOW.to_string(),
    }
}

pub fn format_bill_load_error(error: BillLoadError<'_>) -> String {
    match error {
        BillLoadError::SyntaxError { line, detail } => i18n::syntax_error(line, detail).to_string(),
        BillLoadError::MissingMembersDeclaration => i18n::MISSING_MEMBERS_DECLARATION.to_string(),
        BillLoadError::DuplicateMembersDeclaration { line } => {
            i18n::at_line(i18n::DUPLICATE_MEMBERS_DECLARATION, line)
        }
        BillLoadError::DuplicateMember { name, line } => {
            i18n::at_line(i18n::duplicate_member(name), line)
        }
        BillLoadError::UndefinedMember { name, line } => {
            i18n::at_line(i18n::undefined_member(name), line)
        }
        BillLoadError::Session { error, line } => {
            i18n::at_line(format_session_error(&error), line)
        }
    }
}
