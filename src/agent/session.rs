use chrono::{Local, NaiveDate};

use crate::{
    db::Database,
    domain::{Mode, Transaction, TransactionStatus},
};

use super::{assistant::Assistant, media::Media, model::LanguageModel};

pub const GREETING: &str = "Hi! I'm your financial assistant. Send a receipt photo, record a voice note, \
or type a transaction (e.g. \"Spent 50 at the market\").";
pub const NOT_UNDERSTOOD: &str = "I couldn't understand that. Try again with a clearer \
image or audio, or type the amount and what it was for.";

const FALLBACK_CATEGORY: &str = "Other";

#[derive(Debug, Clone, PartialEq)]
pub struct AgentReply {
    pub text: String,
    /// The transaction stored for this message, if any.
    pub transaction: Option<Transaction>,
}

/// A chat with the assistant that records what it understands.
pub struct AgentSession<'a, M> {
    db: &'a Database,
    assistant: &'a Assistant<M>,
    mode: Mode,
}

impl<M> AgentSession<'_, M> {
    pub fn greeting() -> &'static str {
        GREETING
    }
}

impl<'a, M: LanguageModel> AgentSession<'a, M> {
    pub fn new(db: &'a Database, assistant: &'a Assistant<M>, mode: Mode) -> Self {
        Self {
            db,
            assistant,
            mode,
        }
    }

    pub fn handle(&self, text: &str, media: Option<Media>) -> AgentReply {
        self.handle_on(text, media, Local::now().date_naive())
    }

    /// Like [`handle`](Self::handle) with an explicit current date.
    pub fn handle_on(&self, text: &str, media: Option<Media>, today: NaiveDate) -> AgentReply {
        let Some(extracted) =
            self.assistant
                .extract_transaction(text, media.as_ref(), self.mode, today)
        else {
            return AgentReply {
                text: NOT_UNDERSTOOD.to_string(),
                transaction: None,
            };
        };

        let date = if extracted.date.trim().is_empty() {
            today.format("%Y-%m-%d").to_string()
        } else {
            extracted.date
        };
        let category = if extracted.category.trim().is_empty() {
            FALLBACK_CATEGORY.to_string()
        } else {
            extracted.category
        };
        let mut transaction = Transaction::new(
            extracted.description,
            extracted.amount.abs(),
            extracted.kind,
            category,
            date,
        )
        .with_status(TransactionStatus::Paid)
        .with_mode(self.mode);
        if let Some(media) = &media {
            transaction = transaction.with_attachment(media.data_url(), media.kind());
        }

        let stored = self.db.transactions().add(transaction);
        tracing::info!(id = %stored.id, "assistant recorded transaction");
        AgentReply {
            text: confirmation(&stored, media.is_some()),
            transaction: Some(stored),
        }
    }
}

fn confirmation(transaction: &Transaction, with_attachment: bool) -> String {
    let mut text = format!(
        "Done! Recorded {} of {:.2} for \"{}\" ({}).",
        transaction.kind, transaction.amount, transaction.description, transaction.category
    );
    if with_attachment {
        text.push_str(" The file was attached to the record.");
    }
    text
}
