//! Language-model assistant: transaction extraction from text, receipt images
//! and voice notes, plus dashboard advice.

pub mod assistant;
pub mod extraction;
pub mod gemini;
pub mod media;
pub mod model;
pub mod prompt;
pub mod session;

pub use assistant::{AdviceInput, Assistant};
pub use extraction::{parse_extraction, ExtractedTransaction};
pub use gemini::GeminiClient;
pub use media::Media;
pub use model::{GenerateRequest, LanguageModel, Part};
pub use session::{AgentReply, AgentSession};
