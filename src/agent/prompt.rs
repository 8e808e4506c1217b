use chrono::NaiveDate;

use crate::domain::Mode;

pub const CATEGORY_SUGGESTIONS: &[&str] = &[
    "Food",
    "Transport",
    "Leisure",
    "Home",
    "Health",
    "Salary",
    "Sales",
    "Other",
];

/// Instructions for turning a message, receipt photo or voice note into one
/// transaction.
pub fn extraction_prompt(message: &str, audio_only: bool, mode: Mode, today: NaiveDate) -> String {
    let mut prompt = format!(
        "You are the financial assistant of the Gerencie app.\n\
         Read the user's input (text, a receipt image, or audio) and extract a single financial transaction.\n\
         \n\
         Today's date: {today}\n\
         Current mode: {mode}\n\
         \n\
         Rules:\n\
         1. Audio takes priority when present: work out what was said and what the user meant.\n\
            \"I spent 50 at the market\" -> expense, 50, Market, category Food.\n\
            \"I received 1000 today\" -> income, 1000, Payment received, category Salary.\n\
         2. For an image, read the receipt's total, date and merchant.\n\
         3. For text only, extract from the text.\n\
         \n\
         Required fields:\n\
         - amount (plain number)\n\
         - type (\"income\" or \"expense\")\n\
         - description (short summary)\n\
         - category (one of: {categories})\n\
         - date (YYYY-MM-DD, today if not stated)\n\
         \n\
         Answer with ONE valid JSON object and nothing else, no markdown:\n\
         {{\"description\": \"string\", \"amount\": number, \"type\": \"income\" | \"expense\", \"category\": \"string\", \"date\": \"YYYY-MM-DD\"}}\n",
        today = today.format("%Y-%m-%d"),
        categories = CATEGORY_SUGGESTIONS.join(", "),
    );

    if !message.trim().is_empty() {
        prompt.push_str(&format!("\nUser text: \"{}\"", message.trim()));
    } else if audio_only {
        prompt.push_str("\n(This is an audio recording sent by the user. Analyse what is spoken.)");
    }
    prompt
}

/// Asks for a short, actionable reading of the dashboard figures.
pub fn advice_prompt(mode: Mode, data_json: &str) -> String {
    format!(
        "Act as a senior financial advisor for the Gerencie platform.\n\
         \n\
         Analyse the following {mode} dashboard data:\n\
         {data_json}\n\
         \n\
         Give short, direct, actionable feedback (at most 3 sentences) on the current financial health \
         and one suggestion for improvement. Keep a professional but encouraging tone."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    #[test]
    fn extraction_prompt_carries_context_and_text() {
        let prompt = extraction_prompt("spent 20 on uber", false, Mode::Business, day());
        assert!(prompt.contains("2025-06-15"));
        assert!(prompt.contains("Business"));
        assert!(prompt.ends_with("User text: \"spent 20 on uber\""));
    }

    #[test]
    fn audio_only_prompt_gets_hint() {
        let prompt = extraction_prompt("", true, Mode::Personal, day());
        assert!(prompt.contains("audio recording"));
        assert!(!prompt.contains("User text"));
    }

    #[test]
    fn image_only_prompt_has_no_trailer() {
        let prompt = extraction_prompt("  ", false, Mode::Personal, day());
        assert!(!prompt.contains("User text") && !prompt.contains("audio recording sent"));
    }
}
