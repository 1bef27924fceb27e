use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Languages the chatbot can answer in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Language {
    /// English, the fallback when no other script is found
    #[serde(rename = "en")]
    English,
    /// Hindi, detected by Devanagari script
    #[serde(rename = "hi")]
    Hindi,
    /// Odia, detected by Odia script
    #[serde(rename = "or")]
    Odia,
}

impl Language {
    /// ISO 639-1 code used on the wire.
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Hindi => "hi",
            Language::Odia => "or",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Chatbot answer for a single message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ChatReply {
    /// Canned advice in the detected language
    pub message: String,
    /// Language detected from the script of the question
    #[serde(rename = "detectedLanguage")]
    pub detected_language: Language,
}
