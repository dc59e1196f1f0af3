use async_trait::async_trait;
use serde_json::Value;

use crate::{domain::profile::ProfileRecord, error::ExtractionError};

use super::ChatCompletion;

const PROFILE_PARSER_INSTRUCTIONS: &str = r#"You are an AI assistant specialized in parsing LinkedIn profile information.
Your task is to extract structured data from profile content and convert it into a standardized JSON format.

IMPORTANT RULES:
- Extract all available information from the provided LinkedIn profile content
- Make educated guesses for fields when information is implicit but not explicit
- Use null or empty string for fields where information is not available
- Return your response AS A JSON object with the exact structure shown below:

{
  "Name": "Full name of the person",
  "Gender": "Gender if can be determined, else guess and assume the gender (Male or Female)",
  "Profile Image": "URL of the profile image if available",
  "Location": "Location of the person, e.g. 'San Francisco, CA'",
  "Headline": "Current headline or job title",
  "About": "Summary or about section content",
  "Activity Posts": "Recent activity posts if available, else null",
  "Current Position": "Current job title",
  "Current Company": "Name of current employer",
  "Current Company Duration": "Duration at current company",
  "Education": ["List of education institutions"],
  "Education URLs": ["List of education institution URLs"],
  "Degrees": ["List of degrees obtained"],
  "Connection Count": "Number of LinkedIn connections",
  "Languages": ["List of languages spoken"],
  "Skills": ["List of professional skills"],
  "Websites": ["List of personal/professional websites"],
  "Contact Phone": "Phone number if available",
  "Contact Email": "Email address",
  "Contact Twitter": "Twitter/X handle",
  "Birthday": "Birthday if available, don't assume",
  "Position Level": "Whether they are C-level, Junior, Senior, others"
}

Be thorough but do not invent information that is not directly stated or strongly implied in the profile content."#;

#[async_trait]
pub trait ProfileExtractor: Send + Sync {
    /// Never fails: unusable replies come back as an error record.
    async fn extract(&self, profile_text: &str) -> ProfileRecord;
}

pub struct ProfileParser<C> {
    completion: C,
    model: String,
}

impl<C: ChatCompletion> ProfileParser<C> {
    pub fn new(completion: C, model: impl Into<String>) -> Self {
        ProfileParser {
            completion,
            model: model.into(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub async fn parse_profile(&self, profile_text: &str) -> ProfileRecord {
        if profile_text.is_empty() {
            log::warn!("Empty profile data provided");
            return ProfileRecord::new();
        }

        let prompt = format!(
            "Please analyze this LinkedIn profile information and extract the requested details into JSON format:\n\n{}\n",
            profile_text
        );

        log::info!("Sending profile data to {} for parsing", self.model);
        let reply = match self
            .completion
            .complete(&self.model, PROFILE_PARSER_INSTRUCTIONS, &prompt)
            .await
        {
            Ok(reply) => reply,
            Err(e) => {
                log::error!("Error in LLM LinkedIn profile parsing: {}", e);
                return ProfileRecord::parse_failure(e.to_string(), profile_text);
            }
        };

        match extract_json_object(&reply) {
            Ok(record) => {
                log::info!("Successfully parsed LinkedIn profile information");
                record
            }
            Err(e) => {
                log::warn!(
                    "Failed to parse LLM LinkedIn profile response: {} | {}",
                    e,
                    reply.chars().take(200).collect::<String>()
                );
                ProfileRecord::parse_failure(e.to_string(), profile_text)
            }
        }
    }
}

#[async_trait]
impl<C: ChatCompletion> ProfileExtractor for ProfileParser<C> {
    async fn extract(&self, profile_text: &str) -> ProfileRecord {
        self.parse_profile(profile_text).await
    }
}

/// Parses the span between the first `{` and the last `}` of a model reply,
/// ignoring any prose around it.
pub fn extract_json_object(reply: &str) -> Result<ProfileRecord, ExtractionError> {
    let reply = reply.trim();
    let (Some(start), Some(end)) = (reply.find('{'), reply.rfind('}')) else {
        return Err(ExtractionError::NoJsonObject);
    };
    if end < start {
        return Err(ExtractionError::NoJsonObject);
    }

    match serde_json::from_str::<Value>(&reply[start..=end])? {
        Value::Object(map) => Ok(map.into()),
        _ => Err(ExtractionError::NoJsonObject),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::{domain::profile::SCHEMA_FIELDS, services::fake::FakeCompletion};

    use super::*;

    #[test]
    fn instructions_name_every_schema_field() {
        for field in SCHEMA_FIELDS {
            assert!(
                PROFILE_PARSER_INSTRUCTIONS.contains(&format!("\"{}\":", field)),
                "instructions miss {}",
                field
            );
        }
    }

    #[test]
    fn recovers_object_wrapped_in_prose() {
        let reply = "Sure! Here is the profile:\n```json\n{\"Name\": \"Alice Doe\", \"Skills\": [\"Rust\"]}\n```\nLet me know if you need more.";

        let record = extract_json_object(reply).unwrap();

        assert_eq!(record.get("Name"), Some(&json!("Alice Doe")));
        assert_eq!(record.get("Skills"), Some(&json!(["Rust"])));
    }

    #[test]
    fn reply_without_braces_is_an_error() {
        assert!(matches!(
            extract_json_object("I could not find a profile."),
            Err(ExtractionError::NoJsonObject)
        ));
        assert!(matches!(
            extract_json_object("} backwards {"),
            Err(ExtractionError::NoJsonObject)
        ));
    }

    #[test]
    fn malformed_json_is_a_decode_error() {
        assert!(matches!(
            extract_json_object("{\"Name\": \"Alice\",}"),
            Err(ExtractionError::Json(_))
        ));
    }

    #[tokio::test]
    async fn empty_text_skips_the_model() {
        let parser = ProfileParser::new(FakeCompletion::default(), "test-model");

        let record = parser.parse_profile("").await;

        assert!(record.is_empty());
        assert_eq!(parser.completion.call_count(), 0);
    }

    #[tokio::test]
    async fn sends_profile_text_in_prompt() {
        let parser = ProfileParser::new(
            FakeCompletion::replying(&[r#"{"Name": "Alice Doe"}"#]),
            "test-model",
        );

        let record = parser.parse_profile("Alice Doe Rust engineer").await;

        assert_eq!(record.get("Name"), Some(&json!("Alice Doe")));
        let prompts = parser.completion.prompts.lock().unwrap();
        assert!(prompts[0].contains("Alice Doe Rust engineer"));
    }

    #[tokio::test]
    async fn unparseable_reply_becomes_error_record() {
        let parser = ProfileParser::new(
            FakeCompletion::replying(&["No JSON here, sorry."]),
            "test-model",
        );
        let text = "x".repeat(800);

        let record = parser.parse_profile(&text).await;

        assert_eq!(record.error(), Some("Failed to parse profile data"));
        assert_eq!(record.cell("raw_text").len(), 500);
    }

    #[tokio::test]
    async fn completion_failure_becomes_processing_error() {
        let parser = ProfileParser::new(FakeCompletion::failing("rate limited"), "test-model");

        let record = parser.parse_profile("Alice Doe").await;

        assert_eq!(record.error(), Some("Processing error: rate limited"));
        assert_eq!(record.cell("raw_text"), "Alice Doe");
    }

    #[test]
    fn model_can_be_overridden() {
        let parser = ProfileParser::new(FakeCompletion::default(), "default").with_model("other");
        assert_eq!(parser.model(), "other");
    }
}
