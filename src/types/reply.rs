use serde_json::Value;

use crate::error::{Error, Result};

/// The bot's reply, extracted from the first element of the response.
///
/// The endpoint answers with a JSON array. Only element 0 is inspected, and
/// only its `text` field: other fields of element 0 (the upstream bot's
/// `recipient_id`, buttons, images) and every later element are ignored,
/// whatever their shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    text: String,
}

impl Reply {
    /// Extract the reply from a decoded response body.
    ///
    /// Element 0 must be an object with a string `text` field.
    pub fn from_items(items: Vec<Value>) -> Result<Self> {
        let first = items
            .into_iter()
            .next()
            .ok_or_else(|| Error::malformed_reply("response array is empty"))?;
        match first {
            Value::Object(mut fields) => match fields.remove("text") {
                Some(Value::String(text)) => Ok(Self { text }),
                Some(other) => Err(Error::malformed_reply(format!(
                    "first element's text is not a string: {other}"
                ))),
                None => Err(Error::malformed_reply("first element has no text field")),
            },
            other => Err(Error::malformed_reply(format!(
                "first element is not an object: {other}"
            ))),
        }
    }

    /// The reply text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Consume the reply, returning its text.
    pub fn into_text(self) -> String {
        self.text
    }
}
