//! Chat-completions request encoding and response validation.

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::config::{EmptyContentPolicy, GenerationSettings};
use crate::error::{RecetteError, Result};
use crate::types::Recipe;

/// Outcome of decoding one service response.
pub type GenerationResult = Result<Recipe>;

/// Secret bearer token. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(..)")
    }
}

/// A fully-formed request for the generation service.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    model: String,
    temperature: f64,
    prompt: String,
    credential: ApiKey,
}

#[derive(Serialize)]
struct ChatBody<'a> {
    model: &'a str,
    temperature: f64,
    messages: [ChatMessage<'a>; 1],
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

impl GenerationRequest {
    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn credential(&self) -> &ApiKey {
        &self.credential
    }

    /// JSON body for `POST /chat/completions`. The credential is not part of it.
    pub fn to_body(&self) -> Value {
        let body = ChatBody {
            model: &self.model,
            temperature: self.temperature,
            messages: [ChatMessage {
                role: "user",
                content: &self.prompt,
            }],
        };
        // Serializing plain strings and a finite f64 into a Value cannot fail.
        serde_json::to_value(body).unwrap_or(Value::Null)
    }
}

/// Build a request from a prompt, a credential, and generation settings.
///
/// Fails with [`RecetteError::MissingCredential`] when the credential is
/// absent, blank, or not usable as bearer token text (visible ASCII only).
pub fn encode(
    prompt: &str,
    credential: Option<&str>,
    settings: &GenerationSettings,
) -> Result<GenerationRequest> {
    let credential = credential
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .ok_or_else(|| RecetteError::MissingCredential("no API key was supplied".into()))?;
    if !credential.chars().all(|c| c.is_ascii_graphic()) {
        return Err(RecetteError::MissingCredential(
            "API key contains characters not allowed in an HTTP header".into(),
        ));
    }

    Ok(GenerationRequest {
        model: settings.model.as_str().to_string(),
        temperature: settings.temperature,
        prompt: prompt.to_string(),
        credential: ApiKey(credential.to_string()),
    })
}

/// Interpret a raw service response.
///
/// Total: every status and byte sequence maps to a recipe or a structured
/// error.
pub fn decode(status: u16, body: &[u8], policy: EmptyContentPolicy) -> GenerationResult {
    if !(200..300).contains(&status) {
        return Err(RecetteError::service(status, String::from_utf8_lossy(body)));
    }

    let text = std::str::from_utf8(body)
        .map_err(|e| RecetteError::decode(format!("response body is not valid UTF-8: {e}")))?;
    let root: Value = serde_json::from_str(text)
        .map_err(|e| RecetteError::decode(format!("response body is not valid JSON: {e}")))?;

    let content = extract_content(&root)?;
    if content.is_empty() && policy == EmptyContentPolicy::Reject {
        return Err(RecetteError::malformed("recipe content is empty"));
    }
    Ok(Recipe::new(content))
}

/// Walk `choices[0].message.content`, naming the first level that is missing
/// or has the wrong type.
fn extract_content(root: &Value) -> Result<&str> {
    let root = expect_object(root, "response root")?;
    let choices = root
        .get("choices")
        .ok_or_else(|| RecetteError::malformed("missing `choices` array"))?;
    let choices = choices.as_array().ok_or_else(|| {
        RecetteError::malformed(format!("`choices` is {}, expected an array", type_name(choices)))
    })?;
    let first = choices
        .first()
        .ok_or_else(|| RecetteError::malformed("`choices` array is empty"))?;
    let choice = expect_object(first, "`choices[0]`")?;
    let message = choice
        .get("message")
        .ok_or_else(|| RecetteError::malformed("missing `choices[0].message`"))?;
    let message = expect_object(message, "`choices[0].message`")?;
    let content = message
        .get("content")
        .ok_or_else(|| RecetteError::malformed("missing `choices[0].message.content`"))?;
    content.as_str().ok_or_else(|| {
        RecetteError::malformed(format!(
            "`choices[0].message.content` is {}, expected a string",
            type_name(content)
        ))
    })
}

fn expect_object<'a>(value: &'a Value, what: &str) -> Result<&'a Map<String, Value>> {
    value.as_object().ok_or_else(|| {
        RecetteError::malformed(format!("{what} is {}, expected an object", type_name(value)))
    })
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
