use crate::{
    error::SessionError,
    model::{MemberPreview, SettlementResult, SettlementSummary},
    ports::ChargeParser,
};
use tabsplit_domain::{
    BillTotals, Charges, Item, ItemId, Member, MemberId, Money, PayerSelections,
    SettlementContext, ShareCalculator, SplitPolicy,
};

/// An editable group: members, their items, and the raw tax and tip text.
pub struct GroupSession<'a> {
    charge_parser: &'a dyn ChargeParser,
    context: SettlementContext,
    members: Vec<Member>,
    tax: String,
    tip: String,
    next_id: u64,
}

impl<'a> GroupSession<'a> {
    pub fn new(charge_parser: &'a dyn ChargeParser, context: SettlementContext) -> Self {
        Self {
            charge_parser,
            context,
            members: Vec::new(),
            tax: String::new(),
            tip: String::new(),
            next_id: 1,
        }
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn member(&self, member_id: &MemberId) -> Option<&Member> {
        self.members.iter().find(|member| &member.id == member_id)
    }

    pub fn tax(&self) -> &str {
        &self.tax
    }

    pub fn tip(&self) -> &str {
        &self.tip
    }

    pub fn add_member(&mut self, name: &str) -> Result<MemberId, SessionError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SessionError::BlankMemberName);
        }

        let id = MemberId::new(format!("member-{}", self.allocate_id()));
        self.members.push(Member::new(id.clone(), name));
        tracing::debug!(member_id = %id, name, "Member added");
        Ok(id)
    }

    /// Removes the member together with their items.
    pub fn remove_member(&mut self, member_id: &MemberId) -> Result<Member, SessionError> {
        let index = self
            .members
            .iter()
            .position(|member| &member.id == member_id)
            .ok_or_else(|| SessionError::UnknownMember(member_id.clone()))?;
        Ok(self.members.remove(index))
    }

    pub fn add_item(
        &mut self,
        member_id: &MemberId,
        amount: Money,
        description: &str,
    ) -> Result<ItemId, SessionError> {
        if amount.is_negative() {
            return Err(SessionError::NegativeAmount(amount));
        }
        let index = self
            .members
            .iter()
            .position(|member| &member.id == member_id)
            .ok_or_else(|| SessionError::UnknownMember(member_id.clone()))?;
        // Items are non-negative, so a fitting meal total bounds every member's cost.
        self.meal_total()?
            .checked_add(amount)
            .ok_or(SessionError::AmountOverflow)?;

        let id = ItemId::new(format!("item-{}", self.allocate_id()));
        self.members[index].items.push(Item {
            id: id.clone(),
            amount,
            description: description.trim().to_string(),
            owners: vec![member_id.clone()],
        });

        Ok(id)
    }

    pub fn remove_item(&mut self, item_id: &ItemId) -> Result<Item, SessionError> {
        for member in &mut self.members {
            if let Some(index) = member.items.iter().position(|item| &item.id == item_id) {
                return Ok(member.items.remove(index));
            }
        }
        Err(SessionError::UnknownItem(item_id.clone()))
    }

    pub fn set_tax(&mut self, text: impl Into<String>) {
        self.tax = text.into();
    }

    pub fn set_tip(&mut self, text: impl Into<String>) {
        self.tip = text.into();
    }

    pub fn meal_total(&self) -> Result<Money, SessionError> {
        self.members
            .iter()
            .map(Member::meal_cost)
            .collect::<Option<Vec<_>>>()
            .and_then(Money::checked_sum)
            .ok_or(SessionError::AmountOverflow)
    }

    pub fn charges(&self) -> Charges {
        Charges {
            tax: self.charge_parser.parse_charge(&self.tax),
            tip: self.charge_parser.parse_charge(&self.tip),
        }
    }

    fn totals(&self, charges: Charges) -> Result<BillTotals, SessionError> {
        BillTotals::compute(&self.members, charges).ok_or(SessionError::AmountOverflow)
    }

    /// Meal total plus resolved tax and tip.
    pub fn grand_total(&self) -> Result<Money, SessionError> {
        self.totals(self.charges()).map(BillTotals::grand_total)
    }

    /// Freezes the group for payer selection. Nobody is marked as paying yet.
    ///
    /// Fails when tax or tip push the grand total out of range.
    pub fn snapshot(&self) -> Result<PayerSelectionStep, SessionError> {
        let charges = self.charges();
        let totals = self.totals(charges)?;
        tracing::debug!(
            member_count = self.members.len(),
            total_amount = %totals.grand_total(),
            "Group snapshot taken for payer selection"
        );

        Ok(PayerSelectionStep {
            members: self.members.clone(),
            charges,
            totals,
            payers: PayerSelections::none_paying(&self.members),
            context: self.context,
        })
    }

    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

/// Owned copy of a group, waiting for the payers to be chosen.
#[derive(Debug, Clone, PartialEq)]
pub struct PayerSelectionStep {
    members: Vec<Member>,
    charges: Charges,
    totals: BillTotals,
    payers: PayerSelections,
    context: SettlementContext,
}

impl PayerSelectionStep {
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn charges(&self) -> Charges {
        self.charges
    }

    pub fn total_amount(&self) -> Money {
        self.totals.grand_total()
    }

    pub fn payers(&self) -> &PayerSelections {
        &self.payers
    }

    pub fn is_paying(&self, member_id: &MemberId) -> bool {
        self.payers.is_paying(member_id)
    }

    pub fn has_payer(&self) -> bool {
        self.payers.payer_count() > 0
    }

    /// Flips the member's flag and returns the new value.
    pub fn toggle_payer(&mut self, member_id: &MemberId) -> Result<bool, SessionError> {
        if !self.payers.toggle(member_id) {
            return Err(SessionError::UnknownMember(member_id.clone()));
        }
        Ok(self.payers.is_paying(member_id))
    }

    pub fn set_paying(&mut self, member_id: &MemberId, is_paying: bool) -> Result<(), SessionError> {
        if self.payers.set_paying(member_id, is_paying) {
            Ok(())
        } else {
            Err(SessionError::UnknownMember(member_id.clone()))
        }
    }

    pub fn previews(&self) -> Vec<MemberPreview<'_>> {
        // The snapshot's totals fit, and with non-negative items so does each share.
        let owed = ShareCalculator
            .owed_amounts(&self.members, self.totals)
            .unwrap_or_else(|| vec![Money::ZERO; self.members.len()]);

        self.members
            .iter()
            .zip(owed)
            .map(|(member, owed)| MemberPreview {
                member,
                meal: member.meal_cost().unwrap_or(Money::ZERO),
                owed,
                is_paying: self.payers.is_paying(&member.id),
            })
            .collect()
    }

    pub fn summary(&self) -> Result<SettlementSummary, SessionError> {
        if !self.has_payer() {
            return Err(SessionError::NoPayerSelected);
        }

        let total_amount = self.total_amount();
        let settlement = SplitPolicy::settle(
            &self.members,
            self.charges,
            &self.payers,
            total_amount,
            self.context,
        );

        Ok(SettlementSummary {
            total_amount,
            result: SettlementResult::from(&settlement),
        })
    }
}
