use crate::{
    error::{DocumentParseError, ProcessError},
    model::{InputDocument, SettlementReport, TripOverview},
    ports::DocumentParser,
};
use travelsplit_domain::{BalanceSheet, SettlementCalculator, Trip};

#[derive(Clone, Copy)]
pub struct SettlementProcessor<'a> {
    parser: &'a dyn DocumentParser,
    calculator: SettlementCalculator,
}

impl<'a> SettlementProcessor<'a> {
    pub fn new(parser: &'a dyn DocumentParser, calculator: SettlementCalculator) -> Self {
        Self { parser, calculator }
    }

    pub fn parse_document(&self, content: &str) -> Result<InputDocument, DocumentParseError> {
        self.parser.parse(content)
    }

    /// Parses `content` and settles it.
    pub fn build_report(&self, content: &str) -> Result<SettlementReport, ProcessError> {
        match self.parse_document(content)? {
            InputDocument::Balances(balances) => Ok(self.report_for_balances(&balances)),
            InputDocument::Trip(trip) => self.report_for_trip(&trip),
        }
    }

    pub fn report_for_balances(&self, balances: &BalanceSheet) -> SettlementReport {
        SettlementReport {
            overview: None,
            settlement: self.calculator.calculate(balances),
        }
    }

    pub fn report_for_trip(&self, trip: &Trip) -> Result<SettlementReport, ProcessError> {
        if trip.payments().is_empty() {
            return Err(ProcessError::NoPayments);
        }

        let trip_balances = trip.calculate_balances()?;
        tracing::debug!(
            trip = trip.name(),
            member_count = trip.member_count(),
            payment_count = trip.payments().len(),
            total_spent = %trip_balances.total_spent,
            "Trip balances calculated"
        );

        let settlement = self.calculator.calculate(&trip_balances.balances);
        Ok(SettlementReport {
            overview: Some(TripOverview {
                trip_name: trip.name().to_string(),
                total_spent: trip_balances.total_spent,
                average_per_person: trip_balances.average_per_person,
                balances: trip_balances.balances,
                payments: trip.payments().to_vec(),
            }),
            settlement,
        })
    }
}
