use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::clients::gemini_client;
use crate::models::member::FamilyMember;

pub type ParserError = Box<dyn std::error::Error + Send + Sync>;

/// What the language model hands back. The tag is trusted far enough to
/// branch on; the payload is not, and gets validated and defaulted at the
/// boundary before anything is stored.
#[derive(Debug, Deserialize)]
pub struct RawParsedInput {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub data: Value,
    #[serde(default)]
    pub confidence: Option<f64>,
}

/// Free text plus the member roster in, a loose tagged payload out. `None`
/// means the text could not be understood; implementations recover their
/// own malformed output to `None` rather than erroring.
#[async_trait]
pub trait AssistantParser: Send + Sync {
    async fn parse(
        &self,
        text: &str,
        members: &[FamilyMember],
    ) -> Result<Option<RawParsedInput>, ParserError>;
}

pub struct GeminiAssistant {
    api_key: String,
}

impl GeminiAssistant {
    pub fn new(api_key: String) -> Self {
        Self { api_key }
    }
}

#[async_trait]
impl AssistantParser for GeminiAssistant {
    async fn parse(
        &self,
        text: &str,
        members: &[FamilyMember],
    ) -> Result<Option<RawParsedInput>, ParserError> {
        let payload = gemini_client::parse_family_input(text, members, &self.api_key).await?;
        Ok(serde_json::from_str(&payload).ok())
    }
}
