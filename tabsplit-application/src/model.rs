use tabsplit_domain::{Member, MemberId, Money, PayerSelections, Settlement};

#[derive(Debug, Clone, PartialEq)]
pub enum BillStatement<'a> {
    Members(Vec<&'a str>),
    Item {
        member: &'a str,
        amount: Money,
        description: Option<&'a str>,
    },
    Tax(&'a str),
    Tip(&'a str),
    Payers(Vec<&'a str>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct BillStatementWithLine<'a> {
    pub line: usize,
    pub statement: BillStatement<'a>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BillScript<'a> {
    statements: Vec<BillStatementWithLine<'a>>,
}

impl<'a> BillScript<'a> {
    pub fn new(statements: Vec<BillStatementWithLine<'a>>) -> Self {
        Self { statements }
    }

    pub fn statements(&self) -> &[BillStatementWithLine<'a>] {
        &self.statements
    }

    pub fn into_statements(self) -> Vec<BillStatementWithLine<'a>> {
        self.statements
    }
}

/// Raw settlement input: charges are still the text the user typed.
#[derive(Debug, Clone, PartialEq)]
pub struct SettlementRequest {
    pub members: Vec<Member>,
    pub total_amount: Money,
    pub tax: String,
    pub tip: String,
    pub payer_selections: PayerSelections,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberBreakdown {
    pub member_id: MemberId,
    pub name: String,
    pub owed: Money,
    pub paid: Money,
    pub balance: Money,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettlementLine {
    pub from: String,
    pub to: String,
    pub amount: Money,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettlementResult {
    pub breakdown: Vec<MemberBreakdown>,
    pub settlements: Vec<SettlementLine>,
}

impl SettlementResult {
    pub fn is_settled(&self) -> bool {
        self.settlements.is_empty()
    }
}

impl From<&Settlement<'_>> for SettlementResult {
    fn from(settlement: &Settlement<'_>) -> Self {
        let breakdown = settlement
            .shares
            .iter()
            .map(|share| MemberBreakdown {
                member_id: share.id.clone(),
                name: share.name.to_string(),
                owed: share.owed,
                paid: share.paid,
                balance: share.balance,
            })
            .collect();
        let settlements = settlement
            .transfers
            .iter()
            .map(|transfer| SettlementLine {
                from: transfer.from.to_string(),
                to: transfer.to.to_string(),
                amount: transfer.amount,
            })
            .collect();

        Self {
            breakdown,
            settlements,
        }
    }
}

/// What the payer-selection view shows for one member.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MemberPreview<'a> {
    pub member: &'a Member,
    /// Sum of the member's items.
    pub meal: Money,
    pub owed: Money,
    pub is_paying: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettlementSummary {
    pub total_amount: Money,
    pub result: SettlementResult,
}

impl SettlementSummary {
    pub fn settlements(&self) -> &[SettlementLine] {
        &self.result.settlements
    }

    pub fn breakdown(&self) -> &[MemberBreakdown] {
        &self.result.breakdown
    }

    pub fn is_settled(&self) -> bool {
        self.result.is_settled()
    }
}
