use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::models::requests::{NameGender, NamePetType};
use crate::models::GeneratedName;

/// Errors that can occur when calling the chat-completion API.
#[derive(Debug, Error)]
pub enum DeepSeekError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Empty completion received")]
    EmptyCompletion,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Moderation verdict for community content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModerationVerdict {
    Safe,
    Unsafe,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NamesPayload {
    names: Vec<GeneratedName>,
}

const NAMING_SYSTEM_PROMPT: &str = "You are a creative pet naming expert for Western markets. \
Generate 5 unique, creative, and suitable names based on the user's input.\n\
Constraints:\n\
1. Output Language: STRICTLY ENGLISH ONLY. Even if the user input is in another language, \
translate the intent and generate English names and meanings.\n\
2. Format: Return a valid JSON object strictly matching this schema: \
{\"names\": [{\"name\": \"Name1\", \"meaning\": \"Short meaning/reason in English\"}, ...]}\n\
3. Creativity: Avoid overly common names (like \"Spot\" or \"Kitty\") unless requested. \
Focus on the style provided.";

const MODERATION_SYSTEM_PROMPT: &str = "You are a content moderator. Classify the following \
text. If it contains hate speech, violence, explicit adult content, or spam, return 'UNSAFE'. \
Otherwise, return 'SAFE'. Output ONLY the word 'SAFE' or 'UNSAFE'.";

/// Chat-completion client (DeepSeek's OpenAI-compatible API).
///
/// Treated as a fallible, possibly slow collaborator: callers reject the
/// surrounding operation when a call fails, since there is no safe default
/// output to synthesize.
#[derive(Debug, Clone)]
pub struct DeepSeekClient {
    endpoint: String,
    api_key: String,
    model: String,
    client: Client,
}

impl DeepSeekClient {
    pub fn new(endpoint: String, api_key: String, model: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            endpoint,
            api_key,
            model,
            client,
        }
    }

    /// Send one system+user exchange and return the raw completion text.
    async fn chat(
        &self,
        system: &str,
        user: &str,
        temperature: Option<f32>,
        json_mode: bool,
    ) -> Result<String, DeepSeekError> {
        let url = format!(
            "{}/chat/completions",
            self.endpoint.trim_end_matches('/')
        );

        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature,
            response_format: json_mode.then_some(ResponseFormat {
                kind: "json_object",
            }),
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(DeepSeekError::ApiError(format!(
                "Chat completion failed: {}",
                response.status()
            )));
        }

        let payload: ChatResponse = response
            .json()
            .await
            .map_err(|e| DeepSeekError::InvalidResponse(format!("Failed to parse completion: {}", e)))?;

        payload
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(DeepSeekError::EmptyCompletion)
    }

    /// Generate 5 name suggestions for a pet.
    pub async fn generate_names(
        &self,
        pet_type: NamePetType,
        gender: NameGender,
        style: Option<&str>,
        description: Option<&str>,
    ) -> Result<Vec<GeneratedName>, DeepSeekError> {
        let gender_word = match gender {
            NameGender::Unisex => "",
            other => other.as_str(),
        };

        let mut user_prompt = format!(
            "I need names for a {} {}.\nStyle/Vibe: {}.",
            gender_word,
            pet_type.as_str(),
            style.unwrap_or("General")
        );
        if let Some(description) = description {
            user_prompt.push_str(&format!("\nAdditional Description: {}", description));
        }

        let content = self
            .chat(NAMING_SYSTEM_PROMPT, &user_prompt, None, true)
            .await?;

        let payload: NamesPayload = serde_json::from_str(&content)
            .map_err(|e| DeepSeekError::InvalidResponse(format!("Failed to parse names: {}", e)))?;

        if payload.names.is_empty() {
            return Err(DeepSeekError::InvalidResponse(
                "Completion contained no names".to_string(),
            ));
        }

        Ok(payload.names)
    }

    /// Classify community content. Only an explicit UNSAFE verdict blocks;
    /// any other completion passes the content through.
    pub async fn moderate(&self, content: &str) -> Result<ModerationVerdict, DeepSeekError> {
        let verdict = self
            .chat(MODERATION_SYSTEM_PROMPT, content, Some(0.0), false)
            .await?;

        if verdict.trim().eq_ignore_ascii_case("UNSAFE") {
            Ok(ModerationVerdict::Unsafe)
        } else {
            Ok(ModerationVerdict::Safe)
        }
    }
}
