use tabsplit_domain::{ItemId, MemberId, Money};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("member name must not be blank")]
    BlankMemberName,
    #[error("unknown member '{0}'")]
    UnknownMember(MemberId),
    #[error("unknown item '{0}'")]
    UnknownItem(ItemId),
    #[error("item amount must not be negative (got {0})")]
    NegativeAmount(Money),
    #[error("at least one payer must be selected")]
    NoPayerSelected,
    #[error("bill amounts exceed the supported range")]
    AmountOverflow,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BillLoadError<'a> {
    SyntaxError { line: usize, detail: String },
    MissingMembersDeclaration,
    DuplicateMembersDeclaration { line: usize },
    DuplicateMember { name: &'a str, line: usize },
    UndefinedMember { name: &'a str, line: usize },
    Session { error: SessionError, line: usize },
}
