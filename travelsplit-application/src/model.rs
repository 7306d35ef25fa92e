use travelsplit_domain::{BalanceSheet, Money, Payment, Settlement, Trip};

/// Decoded input: either precomputed balances or a full trip ledger.
#[derive(Debug, Clone)]
pub enum InputDocument {
    Balances(BalanceSheet),
    Trip(Trip),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripOverview {
    pub trip_name: String,
    pub total_spent: Money,
    pub average_per_person: Money,
    pub balances: BalanceSheet,
    /// Recorded payments in entry order.
    pub payments: Vec<Payment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettlementReport {
    /// Present when the input was a trip.
    pub overview: Option<TripOverview>,
    pub settlement: Settlement,
}
