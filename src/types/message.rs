//! Message types and input normalization.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Error, Result};

/// A single role/content pair in the backend's canonical message list.
///
/// The role vocabulary is backend-defined and passed through verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new("user", content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new("assistant", content)
    }
}

/// Flexible message input accepted by `add`.
///
/// The three accepted shapes are resolved once at this boundary; every other
/// shape is rejected here with a validation error, not at the call sites.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageInput {
    /// A bare string, treated as a single user message.
    Text(String),
    /// A single message.
    Single(Message),
    /// An ordered message list, forwarded as-is.
    Many(Vec<Message>),
}

impl From<&str> for MessageInput {
    fn from(text: &str) -> Self {
        MessageInput::Text(text.to_string())
    }
}

impl From<String> for MessageInput {
    fn from(text: String) -> Self {
        MessageInput::Text(text)
    }
}

impl From<Message> for MessageInput {
    fn from(message: Message) -> Self {
        MessageInput::Single(message)
    }
}

impl From<Vec<Message>> for MessageInput {
    fn from(messages: Vec<Message>) -> Self {
        MessageInput::Many(messages)
    }
}

impl TryFrom<Value> for MessageInput {
    type Error = Error;

    /// Accepts a JSON string, a message object, or an array of message
    /// objects. Missing `role` defaults to `"user"`, missing `content` to
    /// the empty string. Anything else is a validation error naming the
    /// rejected type.
    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::String(text) => Ok(MessageInput::Text(text)),
            Value::Object(map) => Ok(MessageInput::Single(message_from_object(&map))),
            Value::Array(items) => {
                let mut messages = Vec::with_capacity(items.len());
                for item in &items {
                    match item {
                        Value::Object(map) => messages.push(message_from_object(map)),
                        other => {
                            return Err(Error::validation(format!(
                                "messages must be a string, a message object, or an array of \
                                 message objects, got {} in array",
                                json_type_name(other)
                            )))
                        }
                    }
                }
                Ok(MessageInput::Many(messages))
            }
            other => Err(Error::validation(format!(
                "messages must be a string, a message object, or an array of message objects, \
                 got {}",
                json_type_name(&other)
            ))),
        }
    }
}

fn message_from_object(map: &serde_json::Map<String, Value>) -> Message {
    let role = map.get("role").and_then(Value::as_str).unwrap_or("user");
    let content = map.get("content").and_then(Value::as_str).unwrap_or("");
    Message::new(role, content)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Normalize any accepted input shape into the canonical ordered message
/// list. Pure; shared by both facades so their requests are identical.
pub fn normalize_messages(input: MessageInput) -> Vec<Message> {
    match input {
        MessageInput::Text(text) => vec![Message::user(text)],
        MessageInput::Single(message) => vec![message],
        MessageInput::Many(messages) => messages,
    }
}
