#[cfg(all(feature = "ja", feature = "en"))]
compile_error!("Cannot enable both 'ja' and 'en' features at the same time");

#[cfg(feature = "ja")]
pub mod strings {
    pub const MEMBER: &str = "メンバー";
    pub const MEAL: &str = "料理";
    pub const OWED: &str = "負担額";
    pub const PAID: &str = "支払額";
    pub const BALANCE: &str = "収支";
    pub const PAYING: &str = "支払い";
    pub const SHARE: &str = "負担予定額";
    pub const FROM: &str = "支払人";
    pub const TO: &str = "受取人";
    pub const AMOUNT: &str = "金額";
    pub const TOTAL_AMOUNT: &str = "合計金額";
    pub const SETTLEMENTS: &str = "清算";
    pub const ALL_SETTLED: &str = "清算は不要です。全員精算済みです!";
    pub const YES: &str = "はい";
    pub const NO: &str = "いいえ";
    pub const MISSING_MEMBERS_DECLARATION: &str =
        "`MEMBERS := ...` の宣言が見つかりません。";
    pub const DUPLICATE_MEMBERS_DECLARATION: &str =
        "`MEMBERS := ...` の宣言は一度だけ書けます。";
    pub const NO_PAYER_SELECTED: &str = "支払った人を少なくとも一人選んでください。";
    pub const BLANK_MEMBER_NAME: &str = "メンバー名が空です。";
    pub const AMOUNT_OVERFLOW: &str = "金額が扱える範囲を超えています。";
}

#[cfg(feature = "en")]
pub mod strings {
    pub const MEMBER: &str = "Member";
    pub const MEAL: &str = "Meal";
    pub const OWED: &str = "Owed";
    pub const PAID: &str = "Paid";
    pub const BALANCE: &str = "Balance";
    pub const PAYING: &str = "Paying";
    pub const SHARE: &str = "Share";
    pub const FROM: &str = "From";
    pub const TO: &str = "To";
    pub const AMOUNT: &str = "Amount";
    pub const TOTAL_AMOUNT: &str = "Total amount";
    pub const SETTLEMENTS: &str = "Settlements";
    pub const ALL_SETTLED: &str = "No settlements needed. Everyone is settled up!";
    pub const YES: &str = "yes";
    pub const NO: &str = "no";
    pub const MISSING_MEMBERS_DECLARATION: &str = "Could not find `MEMBERS := ...` declaration.";
    pub const DUPLICATE_MEMBERS_DECLARATION: &str =
        "`MEMBERS := ...` may only be declared once.";
    pub const NO_PAYER_SELECTED: &str = "Select at least one member who paid.";
    pub const BLANK_MEMBER_NAME: &str = "Member name must not be blank.";
    pub const AMOUNT_OVERFLOW: &str = "Amounts exceed the supported range.";
}

#[cfg(not(any(feature = "ja", feature = "en")))]
pub mod strings {
    pub const MEMBER: &str = "Member";
    pub const MEAL: &str = "Meal";
    pub const OWED: &str = "Owed";
    pub const PAID: &str = "Paid";
    pub const BALANCE: &str = "Balance";
    pub const PAYING: &str = "Paying";
    pub const SHARE: &str = "Share";
    pub const FROM: &str = "From";
    pub const TO: &str = "To";
    pub const AMOUNT: &str = "Amount";
    pub const TOTAL_AMOUNT: &str = "Total amount";
    pub const SETTLEMENTS: &str = "Settlements";
    pub const ALL_SETTLED: &str = "No settlements needed. Everyone is settled up!";
    pub const YES: &str = "yes";
    pub const NO: &str = "no";
    pub const MISSING_MEMBERS_DECLARATION: &str = "Could not find `MEMBERS := ...` declaration.";
    pub const DUPLICATE_MEMBERS_DECLARATION: &str =
        "`MEMBERS := ...` may only be declared once.";
    pub const NO_PAYER_SELECTED: &str = "Select at least one member who paid.";
    pub const BLANK_MEMBER_NAME: &str = "Member name must not be blank.";
    pub const AMOUNT_OVERFLOW: &str = "Amounts exceed the supported range.";
}

pub use strings::*;

#[cfg(feature = "ja")]
pub fn undefined_member(name: impl std::fmt::Display) -> String {
    format!("未定義のメンバー '{name}' です")
}

#[cfg(feature = "ja")]
pub fn duplicate_member(name: impl std::fmt::Display) -> String {
    format!("メンバー '{name}' が重複しています")
}

#[cfg(feature = "ja")]
pub fn unknown_item(id: impl std::fmt::Display) -> String {
    format!("項目 '{id}' が見つかりません")
}

#[cfg(feature = "ja")]
pub fn negative_amount(amount: impl std::fmt::Display) -> String {
    format!("金額に負の値は使えません ({amount})")
}

#[cfg(feature = "ja")]
pub fn at_line(message: impl std::fmt::Display, line: usize) -> String {
    format!("{message} (行 {line})")
}

#[cfg(not(feature = "ja"))]
pub fn at_line(message: impl std::fmt::Display, line: usize) -> String {
    format!("{message} (line {line})")
}

#[cfg(not(feature = "ja"))]
pub fn undefined_member(name: impl std::fmt::Display) -> String {
    format!("Undefined member '{name}'")
}

#[cfg(not(feature = "ja"))]
pub fn duplicate_member(name: impl std::fmt::Display) -> String {
    format!("Member '{name}' is declared more than once")
}

#[cfg(not(feature = "ja"))]
pub fn unknown_item(id: impl std::fmt::Display) -> String {
    format!("Unknown item '{id}'")
}

#[cfg(not(feature = "ja"))]
pub fn negative_amount(amount: impl std::fmt::Display) -> String {
    format!("Amounts must not be negative ({amount})")
}

pub struct SyntaxErrorMessage {
    line: usize,
    detail: String,
}

pub fn syntax_error(line: usize, detail: String) -> SyntaxErrorMessage {
    SyntaxErrorMessage { line, detail }
}

#[cfg(feature = "ja")]
impl std::fmt::Display for SyntaxErrorMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "構文エラー (行 {}): {}", self.line, self.detail)
    }
}

#[cfg(not(feature = "ja"))]
impl std::fmt::Display for SyntaxErrorMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Syntax error at line {}: {}", self.line, self.detail)
    }
}
