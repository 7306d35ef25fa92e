use crate::settlement_presenter::{RULE_WIDTH, SettlementPresenter, SummaryStyle, format_amount};
use std::fmt::Write as _;
use travelsplit_application::{SettlementReport, TripOverview};
use travelsplit_domain::{Money, ParticipantId};
use travelsplit_i18n as i18n;

/// Full CLI output: optional trip overview, summary, transfer count.
pub struct ReportPresenter;

impl ReportPresenter {
    pub fn render(report: &SettlementReport, style: &SummaryStyle, tolerance: Money) -> String {
        let settlement = &report.settlement;
        let mut reply = String::with_capacity(1024);

        if let Some(overview) = &report.overview {
            reply.push_str(&Self::render_overview(overview, style, tolerance));
            let _ = writeln!(&mut reply);
            let _ = writeln!(&mut reply, "{}", banner(i18n::CALCULATING_SETTLEMENTS));
        }

        reply.push_str(&SettlementPresenter::render_with_style(
            settlement.final_balances.entries(),
            &settlement.transfers,
            style,
        ));
        let _ = write!(
            &mut reply,
            "\n\n{}",
            i18n::total_transactions(settlement.transfers.len())
        );

        reply
    }

    pub fn render_overview(overview: &TripOverview, style: &SummaryStyle, tolerance: Money) -> String {
        let mut reply = String::with_capacity(512);

        let _ = writeln!(&mut reply, "{}", banner(i18n::CALCULATING_BALANCES));
        let _ = writeln!(&mut reply);
        if !overview.payments.is_empty() {
            reply.push_str(&Self::render_payments(overview, style));
            let _ = writeln!(&mut reply);
        }
        let _ = writeln!(
            &mut reply,
            "{}",
            i18n::total_spent(format_amount(overview.total_spent, style))
        );
        let _ = writeln!(
            &mut reply,
            "{}",
            i18n::average_per_person(format_amount(overview.average_per_person, style))
        );
        let _ = writeln!(&mut reply);
        let _ = writeln!(&mut reply, "{}", i18n::CURRENT_BALANCES);
        for entry in overview.balances.iter() {
            let (amount, marker) = if entry.net.is_negligible(tolerance) {
                (Money::ZERO, i18n::SETTLED)
            } else if entry.net.is_positive() {
                (entry.net, i18n::IS_OWED)
            } else {
                (entry.net, i18n::OWES)
            };
            let _ = writeln!(
                &mut reply,
                "    {}: {} {marker}",
                entry.participant,
                format_amount(amount, style)
            );
        }

        reply
    }

    /// One line per payment, in entry order.
    pub fn render_payments(overview: &TripOverview, style: &SummaryStyle) -> String {
        let mut reply = String::with_capacity(64 * (overview.payments.len() + 1));

        let _ = writeln!(&mut reply, "{}", i18n::payments_for(&overview.trip_name));
        for payment in &overview.payments {
            let split = payment
                .involved
                .iter()
                .map(ParticipantId::as_str)
                .collect::<Vec<_>>()
                .join(", ");
            let _ = writeln!(
                &mut reply,
                "  {}",
                i18n::payment_line(
                    payment.id,
                    &payment.payer,
                    format_amount(payment.amount, style),
                    &payment.description,
                    split,
                )
            );
        }

        reply
    }
}

fn banner(title: &str) -> String {
    let heavy = "=".repeat(RULE_WIDTH);
    format!("{heavy}\n{title}\n{heavy}")
}
