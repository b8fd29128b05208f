use crate::{
    error::{BillLoadError, SessionError},
    model::{BillStatement, SettlementRequest, SettlementResult},
    ports::{BillParser, ChargeParser},
    session::{GroupSession, PayerSelectionStep},
};
use indexmap::IndexMap;
use tabsplit_domain::{Charges, MemberId, SettlementContext, SplitPolicy};

#[derive(Clone, Copy)]
pub struct BillProcessor<'a> {
    charge_parser: &'a dyn ChargeParser,
    bill_parser: &'a dyn BillParser,
    context: SettlementContext,
}

impl<'a> BillProcessor<'a> {
    pub fn new(charge_parser: &'a dyn ChargeParser, bill_parser: &'a dyn BillParser) -> Self {
        Self {
            charge_parser,
            bill_parser,
            context: SettlementContext::two_decimal_default(),
        }
    }

    pub fn with_context(self, context: SettlementContext) -> Self {
        Self { context, ..self }
    }

    pub fn context(&self) -> SettlementContext {
        self.context
    }

    pub fn open_session(&self) -> GroupSession<'a> {
        GroupSession::new(self.charge_parser, self.context)
    }

    /// Settles a request whose tax and tip are still raw text.
    pub fn settle(&self, request: &SettlementRequest) -> SettlementResult {
        let charges = Charges {
            tax: self.charge_parser.parse_charge(&request.tax),
            tip: self.charge_parser.parse_charge(&request.tip),
        };
        let settlement = SplitPolicy::settle(
            &request.members,
            charges,
            &request.payer_selections,
            request.total_amount,
            self.context,
        );
        SettlementResult::from(&settlement)
    }

    /// Builds the payer-selection step described by a bill script.
    ///
    /// The script must open with its `MEMBERS` declaration. Items and payers may only
    /// name declared members; later `TAX`/`TIP` lines override earlier ones and
    /// `PAYERS` lines accumulate.
    pub fn load_bill<'b>(
        &self,
        content: &'b str,
    ) -> Result<PayerSelectionStep, BillLoadError<'b>>
    where
        'a: 'b,
    {
        let script = self.bill_parser.parse(content)?;
        let mut statements = script.into_statements().into_iter();

        let Some(first) = statements.next() else {
            return Err(BillLoadError::MissingMembersDeclaration);
        };
        let BillStatement::Members(names) = first.statement else {
            return Err(BillLoadError::MissingMembersDeclaration);
        };

        let mut session = self.open_session();
        let mut member_ids: IndexMap<&'b str, MemberId> = IndexMap::with_capacity(names.len());
        for name in names {
            if member_ids.contains_key(name) {
                return Err(BillLoadError::DuplicateMember {
                    name,
                    line: first.line,
                });
            }
            let id = session
                .add_member(name)
                .map_err(|error| BillLoadError::Session {
                    error,
                    line: first.line,
                })?;
            member_ids.insert(name, id);
        }

        let lookup = |name: &'b str, line: usize| {
            member_ids
                .get(name)
                .cloned()
                .ok_or(BillLoadError::UndefinedMember { name, line })
        };

        let mut payer_ids = Vec::new();
        // Items are range-checked as they are added; only charges can overflow later.
        let mut charge_line = first.line;
        for statement in statements {
            let line = statement.line;
            match statement.statement {
                BillStatement::Members(_) => {
                    return Err(BillLoadError::DuplicateMembersDeclaration { line });
                }
                BillStatement::Item {
                    member,
                    amount,
                    description,
                } => {
                    let member_id = lookup(member, line)?;
                    session
                        .add_item(&member_id, amount, description.unwrap_or_default())
                        .map_err(|error| BillLoadError::Session { error, line })?;
                }
                BillStatement::Tax(text) => {
                    session.set_tax(text);
                    charge_line = line;
                }
                BillStatement::Tip(text) => {
                    session.set_tip(text);
                    charge_line = line;
                }
                BillStatement::Payers(names) => {
                    for name in names {
                        payer_ids.push((lookup(name, line)?, line));
                    }
                }
            }
        }

        let mut step = session
            .snapshot()
            .map_err(|error| BillLoadError::Session {
                error,
                line: charge_line,
            })?;
        for (member_id, line) in payer_ids {
            step.set_paying(&member_id, true)
                .map_err(|error: SessionError| BillLoadError::Session { error, line })?;
        }

        tracing::debug!(
            member_count = member_ids.len(),
            payer_count = step.payers().payer_count(),
            total_amount = %step.total_amount(),
            "Bill script loaded"
        );

        Ok(step)
    }
}
