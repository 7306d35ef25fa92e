use arcstr::ArcStr;
use fxhash::FxHashSet;
use rust_decimal::{Decimal, RoundingStrategy};
use std::{
    borrow::Borrow,
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
    str::FromStr,
};

/// Identifier of a participant in a balance sheet.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ParticipantId(ArcStr);

impl ParticipantId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ParticipantId {
    fn from(value: &str) -> Self {
        Self(ArcStr::from(value))
    }
}

impl From<String> for ParticipantId {
    fn from(value: String) -> Self {
        Self(ArcStr::from(value))
    }
}

impl Borrow<str> for ParticipantId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Exact decimal amount of money.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// `Money::new(1234, 2)` is `12.34`.
    pub const fn new(num: i64, scale: u32) -> Self {
        let magnitude = num.unsigned_abs();
        Self(Decimal::from_parts(
            magnitude as u32,
            (magnitude >> 32) as u32,
            0,
            num < 0,
            scale,
        ))
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

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    /// Rounds half away from zero to `scale` decimal places. Never yields `-0`.
    pub fn round_dp(self, scale: u32) -> Self {
        let rounded = self
            .0
            .round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero);
        if rounded.is_zero() {
            Self(Decimal::new(0, scale))
        } else {
            Self(rounded)
        }
    }

    /// Whether the amount is strictly below `tolerance` in magnitude.
    pub fn is_negligible(self, tolerance: Money) -> bool {
        self.abs() < tolerance
    }

    pub fn checked_div_count(self, count: usize) -> Option<Self> {
        let divisor = Decimal::from(u64::try_from(count).ok()?);
        self.0.checked_div(divisor).map(Self)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .map(Self)
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
        iter.fold(Money::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Net position of one participant: positive is owed money, negative owes money.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BalanceEntry {
    pub participant: ParticipantId,
    pub net: Money,
}

impl BalanceEntry {
    pub fn new(participant: impl Into<ParticipantId>, net: Money) -> Self {
        Self {
            participant: participant.into(),
            net,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BalanceSheetError {
    #[error("participant '{0}' appears more than once")]
    DuplicateParticipant(ParticipantId),
    #[error("balances are too large to add up")]
    TotalOverflow,
}

/// Ordered list of balance entries with unique participants.
///
/// The credits and the debits each add up without overflow, so any
/// subset of entries (or entries moved toward zero) can be summed safely.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BalanceSheet {
    entries: Vec<BalanceEntry>,
}

impl BalanceSheet {
    pub fn try_new(entries: Vec<BalanceEntry>) -> Result<Self, BalanceSheetError> {
        {
            let mut seen: FxHashSet<&str> = FxHashSet::default();
            for entry in &entries {
                if !seen.insert(entry.participant.as_str()) {
                    return Err(BalanceSheetError::DuplicateParticipant(
                        entry.participant.clone(),
                    ));
                }
            }
        }

        let mut credits = Money::ZERO;
        let mut debits = Money::ZERO;
        for entry in &entries {
            let side = if entry.net.is_negative() {
                &mut debits
            } else {
                &mut credits
            };
            *side = side
                .checked_add(entry.net.abs())
                .ok_or(BalanceSheetError::TotalOverflow)?;
        }

        Ok(Self { entries })
    }

    pub(crate) fn from_unique(entries: Vec<BalanceEntry>) -> Self {
        Self { entries }
    }

    /// Same participants as `sheet`, with `nets` in entry order.
    pub(crate) fn from_settled(sheet: &BalanceSheet, nets: Vec<Money>) -> Self {
        debug_assert_eq!(sheet.len(), nets.len());
        let entries = sheet
            .entries
            .iter()
            .zip(nets)
            .map(|(entry, net)| BalanceEntry {
                participant: entry.participant.clone(),
                net,
            })
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[BalanceEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, participant: &str) -> Option<Money> {
        self.entries
            .iter()
            .find(|entry| entry.participant.as_str() == participant)
            .map(|entry| entry.net)
    }

    pub fn total(&self) -> Money {
        self.entries.iter().map(|entry| entry.net).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BalanceEntry> + '_ {
        self.entries.iter()
    }
}

/// A single instruction: `debtor` pays `creditor` the given amount.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transfer {
    pub debtor: ParticipantId,
    pub creditor: ParticipantId,
    pub amount: Money,
}

/// Result of settlement processing
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settlement {
    pub final_balances: BalanceSheet,
    pub transfers: Vec<Transfer>,
}

/// Scale and zero tolerance shared by the ledger and the settlement engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SettlementContext {
    /// Decimal places of the atomic currency unit (2 for cents).
    pub scale: u32,
    /// Amounts strictly below this magnitude are treated as zero.
    pub tolerance: Money,
}

impl SettlementContext {
    pub const MAX_SCALE: u32 = 10;

    pub const fn cents() -> Self {
        Self {
            scale: 2,
            tolerance: Money::new(1, 2),
        }
    }

    /// Converts an amount to integral atomic units, or `None` if it has finer precision.
    pub fn to_atomic_units(self, amount: Money) -> Option<i64> {
        use rust_decimal::prelude::ToPrimitive;

        let factor = Decimal::from(10_i64.checked_pow(self.scale)?);
        let units = amount.as_decimal().checked_mul(factor)?;
        if !units.fract().is_zero() {
            return None;
        }
        units.to_i64()
    }

    pub fn from_atomic_units(self, units: i64) -> Money {
        Money::new(units, self.scale)
    }
}

impl Default for SettlementContext {
    fn default() -> Self {
        Self::cents()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[test]
    fn balance_sheet_rejects_duplicate_participants() {
        let err = BalanceSheet::try_new(vec![
            BalanceEntry::new("A", Money::from_i64(10)),
            BalanceEntry::new("B", Money::from_i64(-5)),
            BalanceEntry::new("A", Money::from_i64(-5)),
        ])
        .expect_err("duplicate should be rejected");

        assert_eq!(
            err,
            BalanceSheetError::DuplicateParticipant(ParticipantId::from("A"))
        );
    }

    #[test]
    fn balance_sheet_keeps_input_order() {
        let sheet = BalanceSheet::try_new(vec![
            BalanceEntry::new("C", Money::from_i64(-20)),
            BalanceEntry::new("A", Money::from_i64(30)),
            BalanceEntry::new("B", Money::from_i64(-10)),
        ])
        .expect("valid sheet");

        let names: Vec<&str> = sheet.iter().map(|e| e.participant.as_str()).collect();
        assert_eq!(names, ["C", "A", "B"]);
        assert_eq!(sheet.total(), Money::ZERO);
        assert_eq!(sheet.get("A"), Some(Money::from_i64(30)));
        assert_eq!(sheet.get("Z"), None);
    }

    #[test]
    fn balance_sheet_rejects_totals_past_decimal_range() {
        let max = Money::from_decimal(Decimal::MAX);

        let err = BalanceSheet::try_new(vec![
            BalanceEntry::new("A", max),
            BalanceEntry::new("B", max),
            BalanceEntry::new("C", Money::from_i64(-1)),
        ])
        .expect_err("overflowing credits should be rejected");

        assert_eq!(err, BalanceSheetError::TotalOverflow);
    }

    #[test]
    fn balance_sheet_accepts_extremes_that_cancel() {
        let max = Money::from_decimal(Decimal::MAX);

        let sheet = BalanceSheet::try_new(vec![
            BalanceEntry::new("A", max),
            BalanceEntry::new("B", -max),
        ])
        .expect("credits and debits each fit");

        assert_eq!(sheet.total(), Money::ZERO);
    }

    #[rstest]
    #[case::positive(1234, 2, dec!(12.34))]
    #[case::negative(-1234, 2, dec!(-12.34))]
    #[case::wide(-9_000_000_000_000, 3, dec!(-9000000000.000))]
    #[case::integer(7, 0, dec!(7))]
    fn money_new_matches_decimal(#[case] num: i64, #[case] scale: u32, #[case] expected: Decimal) {
        assert_eq!(Money::new(num, scale).as_decimal(), expected);
    }

    #[test]
    fn cents_context_is_usable_in_const_position() {
        const CENTS: SettlementContext = SettlementContext::cents();
        assert_eq!(CENTS.tolerance.as_decimal(), dec!(0.01));
    }

    #[rstest]
    #[case::half_up(dec!(0.125), 2, dec!(0.13))]
    #[case::negative_half(dec!(-0.125), 2, dec!(-0.13))]
    #[case::negative_residue(dec!(-0.004), 2, dec!(0.00))]
    #[case::already_scaled(dec!(12.5), 2, dec!(12.5))]
    fn round_dp_cases(#[case] value: Decimal, #[case] scale: u32, #[case] expected: Decimal) {
        let rounded = Money::from_decimal(value).round_dp(scale);
        assert_eq!(rounded.as_decimal(), expected);
        assert!(!rounded.as_decimal().is_sign_negative() || !rounded.is_zero());
    }

    #[rstest]
    #[case::integer("42", dec!(42))]
    #[case::fraction(" 12.50 ", dec!(12.50))]
    #[case::scientific("1e2", dec!(100))]
    fn money_parses_from_str(#[case] input: &str, #[case] expected: Decimal) {
        assert_eq!(input.parse::<Money>().expect("parse"), Money::from_decimal(expected));
    }

    #[test]
    fn context_converts_to_atomic_units() {
        let ctx = SettlementContext::cents();
        assert_eq!(ctx.to_atomic_units(Money::new(1234, 2)), Some(1234));
        assert_eq!(ctx.to_atomic_units(Money::from_i64(3)), Some(300));
        assert_eq!(ctx.to_atomic_units(Money::new(1, 3)), None);
        assert_eq!(ctx.from_atomic_units(1234), Money::new(1234, 2));
    }

    #[test]
    fn negligible_is_strictly_below_tolerance() {
        let tolerance = Money::new(1, 2);
        assert!(Money::new(9, 3).is_negligible(tolerance));
        assert!(Money::new(-9, 3).is_negligible(tolerance));
        assert!(!Money::new(1, 2).is_negligible(tolerance));
    }
}
