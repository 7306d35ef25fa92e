use crate::model::{BalanceSheet, Money, Settlement, SettlementContext, Transfer};

/// Settlement calculation service
///
/// Pairs the largest remaining creditor with the largest remaining debtor
/// until every balance is within tolerance of zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SettlementCalculator {
    tolerance: Money,
}

impl SettlementCalculator {
    pub fn new(tolerance: Money) -> Self {
        Self {
            tolerance: tolerance.abs(),
        }
    }

    pub fn with_context(context: SettlementContext) -> Self {
        Self::new(context.tolerance)
    }

    pub fn tolerance(&self) -> Money {
        self.tolerance
    }

    /// Calculate the transfers that zero every balance
    ///
    /// Borrows the balances; the returned final balances keep the input order.
    ///
    /// # Arguments
    /// * `balances` - Net balance per participant
    ///
    /// # Returns
    /// Balances after settlement and the transfers in application order
    pub fn calculate(&self, balances: &BalanceSheet) -> Settlement {
        let mut working: Vec<Money> = balances.iter().map(|entry| entry.net).collect();
        let mut transfers = Vec::new();

        let total: Money = working.iter().sum();
        if !total.is_negligible(self.tolerance) {
            tracing::warn!(
                participant_count = working.len(),
                total = %total,
                tolerance = %self.tolerance,
                "Balances do not sum to zero; settlement will leave a residue"
            );
        }

        // Every round zeroes at least one participant, so n - 1 rounds suffice.
        let max_rounds = working.len().saturating_sub(1);
        let mut order: Vec<usize> = (0..working.len()).collect();

        for round in 0..max_rounds {
            // Ties keep input order.
            order.sort_by(|&lhs, &rhs| working[rhs].cmp(&working[lhs]).then(lhs.cmp(&rhs)));
            let creditor = order[0];
            let debtor = order[order.len() - 1];

            // Only a debtor pays, and only a creditor is paid.
            if !working[creditor].is_positive() || !working[debtor].is_negative() {
                break;
            }

            let amount = working[creditor].min(working[debtor].abs());
            if amount < self.tolerance {
                break;
            }

            working[creditor] -= amount;
            working[debtor] += amount;

            let transfer = Transfer {
                debtor: balances.entries()[debtor].participant.clone(),
                creditor: balances.entries()[creditor].participant.clone(),
                amount,
            };
            tracing::trace!(
                round,
                debtor = %transfer.debtor,
                creditor = %transfer.creditor,
                amount = %transfer.amount,
                "Settlement transfer"
            );
            transfers.push(transfer);
        }

        let final_balances = BalanceSheet::from_settled(balances, working);

        tracing::debug!(
            participant_count = balances.len(),
            transfer_count = transfers.len(),
            "Settlement calculated"
        );

        Settlement {
            final_balances,
            transfers,
        }
    }
}

impl Default for SettlementCalculator {
    fn default() -> Self {
        Self::with_context(SettlementContext::default())
    }
}

/// Settles `balances` with the default one-cent tolerance.
pub fn calculate_settlements(balances: &BalanceSheet) -> Settlement {
    SettlementCalculator::default().calculate(balances)
}
