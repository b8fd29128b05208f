use rust_decimal::{Decimal, RoundingStrategy};
use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(num: i64, scale: u32) -> Self {
        Self(Decimal::new(num, scale))
    }

    pub fn zero() -> Self {
        Self::ZERO
    }

    pub fn from_i64(value: i64) -> Self {
        Self(Decimal::from(value))
    }

    pub fn from_decimal(value: Decimal) -> Self {
        Self(value)
    }

    pub fn as_decimal(self) -> Decimal {
        self.0
    }

    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    pub fn is_positive(self) -> bool {
        self.0 > Decimal::ZERO
    }

    pub fn is_negative(self) -> bool {
        self.0 < Decimal::ZERO
    }

    pub fn round_dp(self, scale: u32, strategy: RoundingStrategy) -> Self {
        Self(self.0.round_dp_with_strategy(scale, strategy))
    }

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Self)
    }

    /// Sums `amounts`, or `None` once the running total leaves the decimal range.
    pub fn checked_sum(amounts: impl IntoIterator<Item = Self>) -> Option<Self> {
        amounts
            .into_iter()
            .try_fold(Self::ZERO, |total, amount| total.checked_add(amount))
    }

    pub fn checked_mul(self, factor: Decimal) -> Option<Self> {
        self.0.checked_mul(factor).map(Self)
    }

    /// Divides evenly into `parts`; `None` when `parts` is zero.
    pub fn checked_split(self, parts: usize) -> Option<Self> {
        if parts == 0 {
            return None;
        }
        self.0.checked_div(Decimal::from(parts)).map(Self)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<Decimal> for Money {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MemberId(pub String);

impl MemberId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemId(pub String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A line item on the bill.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Item {
    pub id: ItemId,
    pub amount: Money,
    pub description: String,
    /// Members the item is billed to. Always the owning member today.
    pub owners: Vec<MemberId>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    pub items: Vec<Item>,
}

impl Member {
    pub fn new(id: MemberId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            items: Vec::new(),
        }
    }

    pub fn with_item(mut self, id: ItemId, amount: Money, description: impl Into<String>) -> Self {
        let owners = vec![self.id.clone()];
        self.items.push(Item {
            id,
            amount,
            description: description.into(),
            owners,
        });
        self
    }

    /// Sum of the member's items; `None` when it does not fit in a `Money`.
    pub fn meal_cost(&self) -> Option<Money> {
        Money::checked_sum(self.items.iter().map(|item| item.amount))
    }
}

/// How a tax or tip line is charged against the pre-tax subtotal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ChargeSpec {
    #[default]
    None,
    Fixed(Money),
    /// Percentage of the base, e.g. `Percent(15)` for "15%".
    Percent(Decimal),
}

impl ChargeSpec {
    /// Resolves the charge against `base`.
    ///
    /// Fixed amounts are returned as-is, negative ones included. A percentage that
    /// overflows the decimal range contributes zero.
    pub fn apportion(self, base: Money) -> Money {
        match self {
            ChargeSpec::None => Money::ZERO,
            ChargeSpec::Fixed(amount) => amount,
            ChargeSpec::Percent(percent) => percent
                .checked_div(Decimal::ONE_HUNDRED)
                .and_then(|rate| base.checked_mul(rate))
                .unwrap_or_else(|| {
                    tracing::warn!(%percent, %base, "Percentage charge overflowed; treating as zero");
                    Money::ZERO
                }),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Charges {
    pub tax: ChargeSpec,
    pub tip: ChargeSpec,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PayerSelection {
    pub member_id: MemberId,
    pub is_paying: bool,
}

/// Payer flags in member order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PayerSelections {
    selections: Vec<PayerSelection>,
}

impl PayerSelections {
    pub fn new(selections: Vec<PayerSelection>) -> Self {
        Self { selections }
    }

    /// Every member starts out as a non-payer.
    pub fn none_paying<'a>(members: impl IntoIterator<Item = &'a Member>) -> Self {
        Self::new(
            members
                .into_iter()
                .map(|member| PayerSelection {
                    member_id: member.id.clone(),
                    is_paying: false,
                })
                .collect(),
        )
    }

    pub fn iter(&self) -> impl Iterator<Item = &PayerSelection> + '_ {
        self.selections.iter()
    }

    pub fn is_paying(&self, member_id: &MemberId) -> bool {
        self.selections
            .iter()
            .find(|selection| &selection.member_id == member_id)
            .is_some_and(|selection| selection.is_paying)
    }

    /// Returns `false` when the member has no selection entry.
    pub fn set_paying(&mut self, member_id: &MemberId, is_paying: bool) -> bool {
        match self
            .selections
            .iter_mut()
            .find(|selection| &selection.member_id == member_id)
        {
            Some(selection) => {
                selection.is_paying = is_paying;
                true
            }
            None => false,
        }
    }

    pub fn toggle(&mut self, member_id: &MemberId) -> bool {
        let current = self.is_paying(member_id);
        self.set_paying(member_id, !current)
    }

    pub fn payer_count(&self) -> usize {
        self.selections.iter().filter(|s| s.is_paying).count()
    }

    pub fn non_payer_count(&self) -> usize {
        self.selections.len() - self.payer_count()
    }
}

impl FromIterator<(MemberId, bool)> for PayerSelections {
    fn from_iter<I: IntoIterator<Item = (MemberId, bool)>>(iter: I) -> Self {
        Self::new(
            iter.into_iter()
                .map(|(member_id, is_paying)| PayerSelection {
                    member_id,
                    is_paying,
                })
                .collect(),
        )
    }
}

/// Per-member outcome of the split, in member order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MemberShare<'a> {
    pub id: &'a MemberId,
    pub name: &'a str,
    pub owed: Money,
    pub paid: Money,
    /// `paid - owed`, rounded to the settlement scale.
    pub balance: Money,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transfer<'a> {
    pub from: &'a str,
    pub to: &'a str,
    pub amount: Money,
}

#[derive(Debug, PartialEq)]
pub struct Settlement<'a> {
    pub shares: Vec<MemberShare<'a>>,
    pub transfers: Vec<Transfer<'a>>,
}

impl Settlement<'_> {
    pub fn empty() -> Self {
        Self {
            shares: Vec::new(),
            transfers: Vec::new(),
        }
    }

    pub fn is_settled(&self) -> bool {
        self.transfers.is_empty()
    }
}
