use proptest::prelude::*;
use travelsplit_domain::{
    BalanceEntry, BalanceSheet, Money, NewPayment, SettlementCalculator, Trip,
};

/// Balances in cents that sum to exactly zero.
fn zero_sum_balances() -> impl Strategy<Value = BalanceSheet> {
    prop::collection::vec(-100_000i64..=100_000, 1..=12).prop_map(|mut cents| {
        let total: i64 = cents.iter().sum();
        cents.push(-total);
        let entries = cents
            .into_iter()
            .enumerate()
            .map(|(idx, amount)| BalanceEntry::new(format!("P{idx}"), Money::new(amount, 2)))
            .collect();
        BalanceSheet::try_new(entries).expect("generated names are unique")
    })
}

proptest! {
    #[test]
    fn settlement_conserves_total(balances in zero_sum_balances()) {
        let settlement = SettlementCalculator::default().calculate(&balances);
        prop_assert_eq!(settlement.final_balances.total(), balances.total());
    }

    #[test]
    fn settlement_zeroes_every_balance(balances in zero_sum_balances()) {
        let settlement = SettlementCalculator::default().calculate(&balances);
        for entry in settlement.final_balances.iter() {
            prop_assert!(entry.net.is_zero(), "{} kept {}", entry.participant, entry.net);
        }
    }

    #[test]
    fn transfer_count_is_bounded(balances in zero_sum_balances()) {
        let settlement = SettlementCalculator::default().calculate(&balances);
        prop_assert!(settlement.transfers.len() < balances.len().max(1));
    }

    #[test]
    fn transfers_are_positive_and_replay_to_final_balances(balances in zero_sum_balances()) {
        let settlement = SettlementCalculator::default().calculate(&balances);

        let mut replayed: Vec<BalanceEntry> = balances.entries().to_vec();
        for transfer in &settlement.transfers {
            prop_assert!(transfer.amount.is_positive());
            prop_assert_ne!(&transfer.debtor, &transfer.creditor);
            for entry in &mut replayed {
                if entry.participant == transfer.debtor {
                    entry.net += transfer.amount;
                } else if entry.participant == transfer.creditor {
                    entry.net -= transfer.amount;
                }
            }
        }
        prop_assert_eq!(replayed.as_slice(), settlement.final_balances.entries());
    }

    #[test]
    fn settlement_is_deterministic(balances in zero_sum_balances()) {
        let calculator = SettlementCalculator::default();
        prop_assert_eq!(calculator.calculate(&balances), calculator.calculate(&balances));
    }

    #[test]
    fn all_zero_input_is_a_no_op(count in 0usize..=8) {
        let entries = (0..count)
            .map(|idx| BalanceEntry::new(format!("P{idx}"), Money::ZERO))
            .collect();
        let balances = BalanceSheet::try_new(entries).expect("unique names");

        let settlement = SettlementCalculator::default().calculate(&balances);

        prop_assert!(settlement.transfers.is_empty());
        prop_assert_eq!(settlement.final_balances, balances);
    }
}

proptest! {
    #[test]
    fn trip_balances_sum_to_zero_and_settle(
        member_count in 1usize..=6,
        amounts in prop::collection::vec(1i64..=1_000_000, 0..=30),
        payer_indexes in prop::collection::vec(0usize..=5, 0..=30),
        share_masks in prop::collection::vec(0u8..=63, 0..=30),
    ) {
        let members: Vec<String> = (0..member_count).map(|idx| format!("M{idx}")).collect();
        let mut trip = Trip::new("Property");
        for member in &members {
            trip.add_member(member.as_str()).expect("unique member");
        }

        for (idx, &cents) in amounts.iter().enumerate() {
            let payer = &members[payer_indexes.get(idx).copied().unwrap_or(0) % member_count];
            let mask = share_masks.get(idx).copied().unwrap_or(0);
            let involved: Vec<&str> = members
                .iter()
                .enumerate()
                .filter(|(bit, _)| mask & (1 << bit) != 0)
                .map(|(_, name)| name.as_str())
                .collect();
            let payment = NewPayment::shared_by_all(payer.as_str(), Money::new(cents, 2));
            let payment = if involved.is_empty() { payment } else { payment.involving(involved) };
            trip.add_payment(payment).expect("valid payment");
        }

        let balances = trip.calculate_balances().expect("balances").balances;
        prop_assert_eq!(balances.total(), Money::ZERO);

        let settlement = SettlementCalculator::default().calculate(&balances);
        prop_assert!(settlement.final_balances.iter().all(|entry| entry.net.is_zero()));
        prop_assert!(settlement.transfers.len() < member_count.max(2));
    }
}
