use chrono::NaiveDate;
use serde::Serialize;

use crate::{
    domain::{Mode, Transaction},
    errors::AgentError,
    services::FinancialSummary,
};

use super::{
    extraction::{parse_extraction, ExtractedTransaction},
    media::Media,
    model::{GenerateRequest, LanguageModel, Part},
    prompt,
};

pub const ADVICE_UNAVAILABLE: &str =
    "Could not reach the AI to generate insights right now. Try again later.";
pub const ADVICE_EMPTY: &str = "No analysis available.";

const RECENT_LIMIT: usize = 5;

/// Figures handed to the model when asking for advice.
#[derive(Debug, Clone, Serialize)]
pub struct AdviceInput {
    pub summary: FinancialSummary,
    pub recent_transactions: Vec<Transaction>,
}

impl AdviceInput {
    /// Keeps at most the first five of `transactions`.
    pub fn new(summary: FinancialSummary, transactions: &[Transaction]) -> Self {
        Self {
            summary,
            recent_transactions: transactions.iter().take(RECENT_LIMIT).cloned().collect(),
        }
    }
}

/// Turns free-form input into transactions and dashboards into advice.
pub struct Assistant<M> {
    model: M,
}

impl<M: LanguageModel> Assistant<M> {
    pub fn new(model: M) -> Self {
        Self { model }
    }

    /// Asks the model for a single transaction described by `message` and/or
    /// `media`. Failures are logged and yield `None`.
    pub fn extract_transaction(
        &self,
        message: &str,
        media: Option<&Media>,
        mode: Mode,
        today: NaiveDate,
    ) -> Option<ExtractedTransaction> {
        let audio_only = media.is_some_and(Media::is_audio);
        let mut parts = Vec::with_capacity(2);
        if let Some(media) = media {
            parts.push(Part::InlineData(media.clone()));
        }
        parts.push(Part::Text(prompt::extraction_prompt(
            message, audio_only, mode, today,
        )));
        let request = GenerateRequest {
            parts,
            json_response: true,
        };

        let text = match self.model.generate(&request) {
            Ok(text) => text,
            Err(err) => {
                tracing::error!(error = %err, "transaction extraction request failed");
                return None;
            }
        };
        match parse_extraction(&text) {
            Ok(extracted) => Some(extracted),
            Err(err) => {
                tracing::warn!(error = %err, "model answer is not a usable transaction");
                None
            }
        }
    }

    pub fn financial_advice(&self, mode: Mode, input: &AdviceInput) -> String {
        let data = match serde_json::to_string_pretty(input) {
            Ok(data) => data,
            Err(err) => {
                tracing::error!(error = %err, "advice input could not be encoded");
                return ADVICE_UNAVAILABLE.to_string();
            }
        };
        match self
            .model
            .generate(&GenerateRequest::text(prompt::advice_prompt(mode, &data)))
        {
            Ok(text) if text.trim().is_empty() => ADVICE_EMPTY.to_string(),
            Ok(text) => text.trim().to_string(),
            Err(AgentError::EmptyResponse) => ADVICE_EMPTY.to_string(),
            Err(err) => {
                tracing::error!(error = %err, "advice request failed");
                ADVICE_UNAVAILABLE.to_string()
            }
        }
    }
}
