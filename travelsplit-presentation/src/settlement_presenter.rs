use std::{borrow::Cow, fmt::Write as _};
use travelsplit_domain::{BalanceEntry, Money, Settlement, Transfer};
use travelsplit_i18n as i18n;

pub(crate) const RULE_WIDTH: usize = 50;

/// How amounts are printed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SummaryStyle {
    pub currency: Cow<'static, str>,
    pub scale: u32,
}

impl Default for SummaryStyle {
    fn default() -> Self {
        Self {
            currency: Cow::Borrowed("$"),
            scale: 2,
        }
    }
}

pub struct SettlementPresenter;

impl SettlementPresenter {
    pub fn render(settlement: &Settlement) -> String {
        Self::render_with_style(
            settlement.final_balances.entries(),
            &settlement.transfers,
            &SummaryStyle::default(),
        )
    }

    pub fn render_with_style(
        final_balances: &[BalanceEntry],
        transfers: &[Transfer],
        style: &SummaryStyle,
    ) -> String {
        let heavy = "=".repeat(RULE_WIDTH);
        let light = "-".repeat(RULE_WIDTH);
        let mut reply = String::with_capacity(256 + 48 * (final_balances.len() + transfers.len()));

        let _ = writeln!(&mut reply, "{heavy}");
        let _ = writeln!(&mut reply, "{}", i18n::SETTLEMENT_SUMMARY);
        let _ = writeln!(&mut reply, "{heavy}");
        let _ = writeln!(&mut reply, "\n{}", i18n::TRANSACTIONS_NEEDED);
        let _ = writeln!(&mut reply, "{light}");
        if transfers.is_empty() {
            let _ = writeln!(&mut reply, "{}", i18n::ALL_SETTLED);
        } else {
            for transfer in transfers {
                let _ = writeln!(
                    &mut reply,
                    "{} → {}: {}",
                    transfer.debtor,
                    transfer.creditor,
                    format_amount(transfer.amount, style)
                );
            }
        }

        let _ = writeln!(&mut reply, "\n{}", i18n::FINAL_BALANCES);
        let _ = writeln!(&mut reply, "{light}");
        for entry in final_balances {
            let _ = writeln!(
                &mut reply,
                "{}: {}",
                entry.participant,
                format_amount(entry.net, style)
            );
        }
        reply.push_str(&heavy);

        reply
    }
}

/// Renders the final balances and transfers as a plain-text block.
pub fn format_settlement_summary(final_balances: &[BalanceEntry], transfers: &[Transfer]) -> String {
    SettlementPresenter::render_with_style(final_balances, transfers, &SummaryStyle::default())
}

/// `12.5` with the default style is `$12.50`.
pub fn format_amount(amount: Money, style: &SummaryStyle) -> String {
    let mut value = amount.round_dp(style.scale).as_decimal();
    value.rescale(style.scale);
    format!("{}{value}", style.currency)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;
    use travelsplit_domain::{BalanceSheet, SettlementCalculator};

    fn sheet(entries: &[(&str, i64)]) -> BalanceSheet {
        BalanceSheet::try_new(
            entries
                .iter()
                .map(|&(name, amount)| BalanceEntry::new(name, Money::from_i64(amount)))
                .collect(),
        )
        .expect("valid sheet")
    }

    #[test]
    fn summary_lists_transfers_then_final_balances() {
        let settlement =
            SettlementCalculator::default().calculate(&sheet(&[("A", 30), ("B", -10), ("C", -20)]));

        let summary = SettlementPresenter::render(&settlement);

        let expected = [
            "=".repeat(50),
            "SETTLEMENT SUMMARY".to_string(),
            "=".repeat(50),
            String::new(),
            "Transactions needed:".to_string(),
            "-".repeat(50),
            "C → A: $20.00".to_string(),
            "B → A: $10.00".to_string(),
            String::new(),
            "Final balances (should be ~0):".to_string(),
            "-".repeat(50),
            "A: $0.00".to_string(),
            "B: $0.00".to_string(),
            "C: $0.00".to_string(),
            "=".repeat(50),
        ]
        .join("\n");
        assert_eq!(summary, expected);
    }

    #[test]
    fn summary_without_transfers_reports_all_settled() {
        let balances = sheet(&[("A", 0), ("B", 0)]);

        let summary = format_settlement_summary(balances.entries(), &[]);

        assert!(summary.contains("No transactions needed - all settled!"));
        assert!(summary.contains("A: $0.00\nB: $0.00"));
    }

    #[test]
    fn summary_is_deterministic() {
        let balances = sheet(&[("A", 50), ("B", -25), ("C", -25)]);
        let settlement = SettlementCalculator::default().calculate(&balances);

        assert_eq!(
            SettlementPresenter::render(&settlement),
            SettlementPresenter::render(&settlement)
        );
    }

    #[rstest]
    #[case::pads_scale(dec!(12.5), "$12.50")]
    #[case::rounds_half_up(dec!(0.125), "$0.13")]
    #[case::negative(dec!(-15), "$-15.00")]
    #[case::negative_residue_is_zero(dec!(-0.001), "$0.00")]
    #[case::long_fraction(dec!(33.333333333333), "$33.33")]
    fn format_amount_cases(#[case] value: rust_decimal::Decimal, #[case] expected: &str) {
        assert_eq!(
            format_amount(Money::from_decimal(value), &SummaryStyle::default()),
            expected
        );
    }

    #[test]
    fn custom_style_changes_symbol_and_scale() {
        let style = SummaryStyle {
            currency: Cow::Borrowed("¥"),
            scale: 0,
        };

        assert_eq!(format_amount(Money::from_decimal(dec!(1234.5)), &style), "¥1235");
    }
}
