use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::{
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;

use crate::{configuration::LlmSettings, error::ExtractionError};

/// A chat-completion endpoint: one system instruction, one user prompt, one
/// text reply.
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    async fn complete(
        &self,
        model: &str,
        instructions: &str,
        prompt: &str,
    ) -> Result<String, ExtractionError>;
}

pub struct OpenaiClient {
    client: Client<OpenAIConfig>,
}

impl Default for OpenaiClient {
    fn default() -> Self {
        OpenaiClient {
            client: Client::new(),
        }
    }
}

impl OpenaiClient {
    pub fn new(settings: &LlmSettings) -> Self {
        let config = OpenAIConfig::new()
            .with_api_key(settings.api_key.clone())
            .with_api_base(settings.api_base.clone());
        OpenaiClient {
            client: Client::with_config(config),
        }
    }
}

impl From<OpenAIError> for ExtractionError {
    fn from(value: OpenAIError) -> Self {
        ExtractionError::Completion(value.to_string())
    }
}

#[async_trait]
impl ChatCompletion for OpenaiClient {
    async fn complete(
        &self,
        model: &str,
        instructions: &str,
        prompt: &str,
    ) -> Result<String, ExtractionError> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(model)
            .messages([
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(instructions)
                    .build()?
                    .into(),
                ChatCompletionRequestUserMessageArgs::default()
                    .content(prompt)
                    .build()?
                    .into(),
            ])
            .build()?;

        let response = self.client.chat().create(request).await?;
        log::debug!("Response: {:?}", response);

        response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ExtractionError::Completion("No choices in Openai response".to_string()))?
            .message
            .content
            .ok_or_else(|| ExtractionError::Completion("No content".to_string()))
    }
}
