use crate::model::{BalanceEntry, BalanceSheet, Money, ParticipantId, SettlementContext};
use indexmap::{IndexMap, IndexSet};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PaymentId(pub u64);

impl fmt::Display for PaymentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hands out payment ids for a single trip, starting at 1.
#[derive(Debug, Clone)]
pub struct PaymentIdGenerator {
    next: u64,
}

impl PaymentIdGenerator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    pub fn next_id(&mut self) -> PaymentId {
        let id = PaymentId(self.next);
        self.next += 1;
        id
    }
}

impl Default for PaymentIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payment {
    pub id: PaymentId,
    pub payer: ParticipantId,
    pub amount: Money,
    pub description: String,
    /// Members sharing the cost, payer included.
    pub involved: Vec<ParticipantId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPayment {
    pub payer: ParticipantId,
    pub amount: Money,
    pub description: String,
    /// `None` splits among every current member.
    pub involved: Option<Vec<ParticipantId>>,
}

impl NewPayment {
    pub fn shared_by_all(payer: impl Into<ParticipantId>, amount: Money) -> Self {
        Self {
            payer: payer.into(),
            amount,
            description: String::new(),
            involved: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn involving<I, P>(mut self, members: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<ParticipantId>,
    {
        self.involved = Some(members.into_iter().map(Into::into).collect());
        self
    }
}

/// Fields left as `None` keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentEdit {
    pub amount: Option<Money>,
    pub description: Option<String>,
    pub involved: Option<Vec<ParticipantId>>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TripError {
    #[error("member name must not be empty")]
    EmptyMemberName,
    #[error("'{0}' is already in the group")]
    DuplicateMember(ParticipantId),
    #[error("'{0}' not found in trip")]
    UnknownMember(ParticipantId),
    #[error("'{0}' still has recorded payments")]
    MemberHasPayments(ParticipantId),
    #[error("invalid amount: {0}")]
    InvalidAmount(Money),
    #[error("payment {0} not found")]
    PaymentNotFound(PaymentId),
    #[error("total spent would exceed the supported range")]
    TotalOverflow,
}

/// Net balances of a trip together with spending totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripBalances {
    pub balances: BalanceSheet,
    pub total_spent: Money,
    /// Total spent divided by member count; zero without members.
    pub average_per_person: Money,
}

/// A group of members and the payments they made for each other.
#[derive(Debug, Clone)]
pub struct Trip {
    name: String,
    context: SettlementContext,
    members: IndexSet<ParticipantId>,
    payments: Vec<Payment>,
    ids: PaymentIdGenerator,
}

impl Trip {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_context(name, SettlementContext::default())
    }

    pub fn with_context(name: impl Into<String>, context: SettlementContext) -> Self {
        Self {
            name: name.into(),
            context,
            members: IndexSet::new(),
            payments: Vec::new(),
            ids: PaymentIdGenerator::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn context(&self) -> SettlementContext {
        self.context
    }

    pub fn members(&self) -> impl Iterator<Item = &ParticipantId> + '_ {
        self.members.iter()
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn is_member(&self, name: &str) -> bool {
        self.members.contains(name)
    }

    pub fn add_member(&mut self, name: impl Into<ParticipantId>) -> Result<(), TripError> {
        let name = name.into();
        if name.as_str().trim().is_empty() {
            return Err(TripError::EmptyMemberName);
        }
        if self.members.contains(&name) {
            return Err(TripError::DuplicateMember(name));
        }
        self.members.insert(name);
        Ok(())
    }

    pub fn remove_member(&mut self, name: &str) -> Result<(), TripError> {
        let Some(member) = self.members.get(name).cloned() else {
            return Err(TripError::UnknownMember(ParticipantId::from(name)));
        };
        let referenced = self
            .payments
            .iter()
            .any(|payment| payment.payer == member || payment.involved.contains(&member));
        if referenced {
            return Err(TripError::MemberHasPayments(member));
        }
        self.members.shift_remove(name);
        Ok(())
    }

    pub fn payments(&self) -> &[Payment] {
        &self.payments
    }

    pub fn payment(&self, id: PaymentId) -> Option<&Payment> {
        self.payments.iter().find(|payment| payment.id == id)
    }

    pub fn add_payment(&mut self, payment: NewPayment) -> Result<PaymentId, TripError> {
        self.require_member(&payment.payer)?;
        self.validate_amount(payment.amount)?;
        self.total_spent()
            .checked_add(payment.amount)
            .ok_or(TripError::TotalOverflow)?;
        let involved = match payment.involved {
            None => self.members.iter().cloned().collect(),
            Some(list) => self.resolve_involved(&payment.payer, list)?,
        };

        let id = self.ids.next_id();
        self.payments.push(Payment {
            id,
            payer: payment.payer,
            amount: payment.amount,
            description: payment.description,
            involved,
        });
        tracing::debug!(payment_id = id.0, trip = %self.name, "Payment recorded");
        Ok(id)
    }

    pub fn edit_payment(&mut self, id: PaymentId, edit: PaymentEdit) -> Result<(), TripError> {
        let index = self.payment_index(id)?;
        if let Some(amount) = edit.amount {
            self.validate_amount(amount)?;
            self.payments
                .iter()
                .filter(|payment| payment.id != id)
                .try_fold(amount, |total, payment| total.checked_add(payment.amount))
                .ok_or(TripError::TotalOverflow)?;
        }
        let involved = match edit.involved {
            Some(list) => Some(self.resolve_involved(&self.payments[index].payer, list)?),
            None => None,
        };

        let payment = &mut self.payments[index];
        if let Some(amount) = edit.amount {
            payment.amount = amount;
        }
        if let Some(description) = edit.description {
            payment.description = description;
        }
        if let Some(involved) = involved {
            payment.involved = involved;
        }
        Ok(())
    }

    pub fn delete_payment(&mut self, id: PaymentId) -> Result<Payment, TripError> {
        let index = self.payment_index(id)?;
        Ok(self.payments.remove(index))
    }

    /// Never overflows: recorded payments always add up within range.
    pub fn total_spent(&self) -> Money {
        self.payments.iter().map(|payment| payment.amount).sum()
    }

    /// Net balance per member, in member order.
    pub fn calculate_balances(&self) -> Result<TripBalances, TripError> {
        let mut accumulator = BalanceAccumulator::new(self.context, self.members.iter().cloned());
        for payment in &self.payments {
            accumulator.apply(payment)?;
        }

        let total_spent = self.total_spent();
        let average_per_person = total_spent
            .checked_div_count(self.members.len())
            .unwrap_or(Money::ZERO);

        Ok(TripBalances {
            balances: accumulator.into_balance_sheet(),
            total_spent,
            average_per_person,
        })
    }

    fn require_member(&self, name: &ParticipantId) -> Result<(), TripError> {
        if self.members.contains(name) {
            Ok(())
        } else {
            Err(TripError::UnknownMember(name.clone()))
        }
    }

    fn validate_amount(&self, amount: Money) -> Result<(), TripError> {
        if !amount.is_positive() || self.context.to_atomic_units(amount).is_none() {
            return Err(TripError::InvalidAmount(amount));
        }
        Ok(())
    }

    fn resolve_involved(
        &self,
        payer: &ParticipantId,
        list: Vec<ParticipantId>,
    ) -> Result<Vec<ParticipantId>, TripError> {
        let mut involved: IndexSet<ParticipantId> = IndexSet::with_capacity(list.len() + 1);
        for name in list {
            self.require_member(&name)?;
            involved.insert(name);
        }
        involved.insert(payer.clone());
        Ok(involved.into_iter().collect())
    }

    fn payment_index(&self, id: PaymentId) -> Result<usize, TripError> {
        self.payments
            .iter()
            .position(|payment| payment.id == id)
            .ok_or(TripError::PaymentNotFound(id))
    }
}

/// Folds payments into per-member net balances.
pub struct BalanceAccumulator {
    context: SettlementContext,
    balances: IndexMap<ParticipantId, Money>,
}

impl BalanceAccumulator {
    pub fn new<I>(context: SettlementContext, members: I) -> Self
    where
        I: IntoIterator<Item = ParticipantId>,
    {
        let balances = members
            .into_iter()
            .map(|member| (member, Money::ZERO))
            .collect();
        Self { context, balances }
    }

    pub fn apply(&mut self, payment: &Payment) -> Result<(), TripError> {
        let Some(units) = self.context.to_atomic_units(payment.amount) else {
            return Err(TripError::InvalidAmount(payment.amount));
        };

        *self
            .balances
            .entry(payment.payer.clone())
            .or_insert(Money::ZERO) += payment.amount;
        debit_shares(&mut self.balances, &payment.involved, units, self.context);
        Ok(())
    }

    pub fn into_balance_sheet(self) -> BalanceSheet {
        let entries = self
            .balances
            .into_iter()
            .map(|(participant, net)| BalanceEntry { participant, net })
            .collect();
        // IndexMap keys are unique.
        BalanceSheet::from_unique(entries)
    }
}

/// Debits `units` split evenly across `members`; the first `units % n` members take one extra unit.
fn debit_shares(
    balances: &mut IndexMap<ParticipantId, Money>,
    members: &[ParticipantId],
    units: i64,
    context: SettlementContext,
) {
    if members.is_empty() {
        return;
    }

    let member_count = members.len() as i64;
    let base = units / member_count;
    let remainder = (units % member_count) as usize;

    for (idx, member) in members.iter().enumerate() {
        let share = if idx < remainder { base + 1 } else { base };
        *balances.entry(member.clone()).or_insert(Money::ZERO) -= context.from_atomic_units(share);
    }
}
