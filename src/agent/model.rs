use crate::errors::AgentError;

use super::media::Media;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Part {
    Text(String),
    InlineData(Media),
}

/// One generation call: ordered prompt parts, optionally asking for JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateRequest {
    pub parts: Vec<Part>,
    pub json_response: bool,
}

impl GenerateRequest {
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            parts: vec![Part::Text(prompt.into())],
            json_response: false,
        }
    }

    pub fn prompt_text(&self) -> String {
        self.parts
            .iter()
            .filter_map(|part| match part {
                Part::Text(text) => Some(text.as_str()),
                Part::InlineData(_) => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A text-generation backend.
pub trait LanguageModel {
    /// Returns the model's text answer.
    fn generate(&self, request: &GenerateRequest) -> Result<String, AgentError>;
}

impl<M: LanguageModel + ?Sized> LanguageModel for &M {
    fn generate(&self, request: &GenerateRequest) -> Result<String, AgentError> {
        (**self).generate(request)
    }
}
