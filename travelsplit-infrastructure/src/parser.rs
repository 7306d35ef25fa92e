use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use travelsplit_application::{
    BalanceInputError, DocumentParseError, DocumentParser, InputDocument,
};
use travelsplit_domain::{
    BalanceEntry, BalanceSheet, Money, NewPayment, ParticipantId, SettlementContext, Trip,
};

pub const PARTICIPANT_FIELD: &str = "participant";
pub const NET_FIELD: &str = "net";
const DEFAULT_TRIP_NAME: &str = "My Trip";

/// Decodes JSON input: a top-level array is a balance list, an object is a trip.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonDocumentParser {
    context: SettlementContext,
}

impl JsonDocumentParser {
    pub const fn new(context: SettlementContext) -> Self {
        Self { context }
    }

    fn parse_trip(&self, value: Value) -> Result<Trip, DocumentParseError> {
        let document: TripDocument = serde_json::from_value(value)
            .map_err(|err| DocumentParseError::InvalidTrip(err.to_string()))?;

        let name = document
            .name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_TRIP_NAME.to_string());
        let mut trip = Trip::with_context(name, self.context);

        for member in document.members {
            trip.add_member(member)?;
        }
        for payment in document.payments {
            let new_payment = NewPayment {
                payer: ParticipantId::from(payment.payer),
                amount: payment.amount,
                description: payment.description,
                involved: payment
                    .involved
                    .map(|names| names.into_iter().map(ParticipantId::from).collect()),
            };
            trip.add_payment(new_payment)?;
        }

        Ok(trip)
    }
}

impl DocumentParser for JsonDocumentParser {
    fn parse(&self, content: &str) -> Result<InputDocument, DocumentParseError> {
        let value: Value = serde_json::from_str(content)
            .map_err(|err| DocumentParseError::InvalidJson(err.to_string()))?;

        match value {
            Value::Object(_) => {
                let trip = self.parse_trip(value)?;
                tracing::debug!(
                    trip = trip.name(),
                    payment_count = trip.payments().len(),
                    "Parsed trip document"
                );
                Ok(InputDocument::Trip(trip))
            }
            other => {
                let sheet = parse_balance_list(&other)?;
                tracing::debug!(entry_count = sheet.len(), "Parsed balance list");
                Ok(InputDocument::Balances(sheet))
            }
        }
    }
}

/// Validates an untyped balance list and converts it to a [`BalanceSheet`].
///
/// Each element must be an object with a string `participant` and a numeric
/// `net` (a JSON number or a decimal string).
pub fn parse_balance_list(value: &Value) -> Result<BalanceSheet, BalanceInputError> {
    let Value::Array(items) = value else {
        return Err(BalanceInputError::NotAList {
            found: value_kind(value),
        });
    };

    let mut entries = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let Value::Object(record) = item else {
            return Err(BalanceInputError::NotARecord {
                index,
                found: value_kind(item),
            });
        };
        entries.push(parse_balance_record(index, record)?);
    }

    Ok(BalanceSheet::try_new(entries)?)
}

fn parse_balance_record(
    index: usize,
    record: &Map<String, Value>,
) -> Result<BalanceEntry, BalanceInputError> {
    let participant = record
        .get(PARTICIPANT_FIELD)
        .ok_or(BalanceInputError::MissingField {
            index,
            field: PARTICIPANT_FIELD,
        })?;
    let net = record.get(NET_FIELD).ok_or(BalanceInputError::MissingField {
        index,
        field: NET_FIELD,
    })?;

    let participant = match participant {
        Value::String(name) if !name.trim().is_empty() => ParticipantId::from(name.as_str()),
        other => {
            return Err(BalanceInputError::InvalidField {
                index,
                field: PARTICIPANT_FIELD,
                detail: format!("expected a non-empty string, got {}", value_kind(other)),
            });
        }
    };
    let net = money_from_value(net).map_err(|detail| BalanceInputError::InvalidField {
        index,
        field: NET_FIELD,
        detail,
    })?;

    Ok(BalanceEntry { participant, net })
}

/// Reads a JSON number or numeric string as exact decimal money.
pub fn money_from_value(value: &Value) -> Result<Money, String> {
    let text = match value {
        Value::Number(number) => number.to_string(),
        Value::String(text) => text.clone(),
        other => return Err(format!("expected a number, got {}", value_kind(other))),
    };
    text.parse::<Money>()
        .map_err(|err| format!("'{text}' is not a decimal amount ({err})"))
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a record",
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TripDocument {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    members: Vec<String>,
    #[serde(default)]
    payments: Vec<PaymentDocument>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct PaymentDocument {
    payer: String,
    #[serde(deserialize_with = "deserialize_money")]
    amount: Money,
    #[serde(default)]
    description: String,
    #[serde(default)]
    involved: Option<Vec<String>>,
}

fn deserialize_money<'de, D>(deserializer: D) -> Result<Money, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    money_from_value(&value).map_err(serde::de::Error::custom)
}
