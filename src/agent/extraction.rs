use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::{domain::FlowType, errors::AgentError};

/// A transaction as understood by the model, not yet stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExtractedTransaction {
    pub description: String,
    #[serde(deserialize_with = "lenient_amount")]
    pub amount: f64,
    /// Anything other than `income` is read as an expense.
    #[serde(rename = "type", default = "default_kind", deserialize_with = "lenient_kind")]
    pub kind: FlowType,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub date: String,
}

fn default_kind() -> FlowType {
    FlowType::Expense
}

/// Accepts `50`, `"50"`, `"23.50"` and `"23,50"`. Unreadable values become 0
/// and are rejected by [`parse_extraction`].
fn lenient_amount<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(number) => number.as_f64().unwrap_or(0.0),
        Value::String(text) => text.trim().replace(',', ".").parse().unwrap_or(0.0),
        _ => 0.0,
    })
}

fn lenient_kind<'de, D: Deserializer<'de>>(deserializer: D) -> Result<FlowType, D::Error> {
    let kind = Option::<String>::deserialize(deserializer)?;
    Ok(match kind.as_deref().map(str::parse::<FlowType>) {
        Some(Ok(FlowType::Income)) => FlowType::Income,
        _ => FlowType::Expense,
    })
}

/// Parses the model's JSON answer.
///
/// Markdown code fences around the object are tolerated. An answer without a
/// non-zero amount or a description is rejected.
pub fn parse_extraction(text: &str) -> Result<ExtractedTransaction, AgentError> {
    let body = strip_fences(text);
    let parsed: ExtractedTransaction =
        serde_json::from_str(body).map_err(|err| AgentError::Parse(err.to_string()))?;
    if parsed.amount == 0.0 || !parsed.amount.is_finite() {
        return Err(AgentError::Parse("amount is missing or zero".into()));
    }
    if parsed.description.trim().is_empty() {
        return Err(AgentError::Parse("description is missing".into()));
    }
    Ok(parsed)
}

fn strip_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_json() {
        let parsed = parse_extraction(
            r#"{"description":"Market","amount":50,"type":"expense","category":"Food","date":"2025-04-02"}"#,
        )
        .unwrap();
        assert_eq!(parsed.amount, 50.0);
        assert_eq!(parsed.kind, FlowType::Expense);
        assert_eq!(parsed.category, "Food");
    }

    #[test]
    fn tolerates_code_fences() {
        let parsed = parse_extraction(
            "```json\n{\"description\":\"Salary\",\"amount\":1000,\"type\":\"income\"}\n```",
        )
        .unwrap();
        assert_eq!(parsed.kind, FlowType::Income);
        assert!(parsed.date.is_empty());
    }

    #[test]
    fn rejects_zero_amounts_and_blank_descriptions() {
        assert!(parse_extraction(r#"{"description":"x","amount":0,"type":"expense"}"#).is_err());
        assert!(parse_extraction(r#"{"description":" ","amount":5,"type":"expense"}"#).is_err());
    }

    #[test]
    fn amounts_may_arrive_as_text() {
        let parsed = parse_extraction(
            r#"{"description":"Lunch","amount":"23.50","type":"expense","category":"Food"}"#,
        )
        .unwrap();
        assert_eq!(parsed.amount, 23.5);
        let parsed =
            parse_extraction(r#"{"description":"Bus","amount":" 4,80 ","type":"expense"}"#).unwrap();
        assert_eq!(parsed.amount, 4.8);
        assert!(parse_extraction(r#"{"description":"Bus","amount":"a lot"}"#).is_err());
    }

    #[test]
    fn missing_or_unknown_type_is_an_expense() {
        let parsed = parse_extraction(r#"{"description":"Taxi","amount":30}"#).unwrap();
        assert_eq!(parsed.kind, FlowType::Expense);
        let parsed =
            parse_extraction(r#"{"description":"Taxi","amount":30,"type":"transfer"}"#).unwrap();
        assert_eq!(parsed.kind, FlowType::Expense);
        let parsed =
            parse_extraction(r#"{"description":"Bonus","amount":300,"type":"Income"}"#).unwrap();
        assert_eq!(parsed.kind, FlowType::Income);
        let parsed =
            parse_extraction(r#"{"description":"Taxi","amount":30,"type":null}"#).unwrap();
        assert_eq!(parsed.kind, FlowType::Expense);
    }

    #[test]
    fn rejects_non_json() {
        assert!(matches!(
            parse_extraction("I could not read the receipt"),
            Err(AgentError::Parse(_))
        ));
    }
}
