use serde_json::{Map, Value};

use crate::db::NewQuestion;

use super::error::{TriviaError, TriviaResult};

/// Parses a request body that must be a non-empty JSON object.
///
/// An empty body, malformed JSON, a non-object or `{}` are all `BadRequest`.
pub fn parse_body(body: &[u8]) -> TriviaResult<Map<String, Value>> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(TriviaError::BadRequest);
    }
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(payload)) if !payload.is_empty() => Ok(payload),
        Ok(_) => Err(TriviaError::BadRequest),
        Err(err) => {
            tracing::debug!(%err, "request body is not valid JSON");
            Err(TriviaError::BadRequest)
        }
    }
}

/// What a `POST /questions` payload asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionSubmission {
    Search { term: String },
    Create(NewQuestion),
}

impl TryFrom<Map<String, Value>> for QuestionSubmission {
    type Error = TriviaError;

    fn try_from(mut payload: Map<String, Value>) -> TriviaResult<Self> {
        match payload.remove("searchTerm") {
            Some(Value::String(term)) if !term.is_empty() => {
                return Ok(Self::Search { term });
            }
            None | Some(Value::Null) | Some(Value::String(_)) => {}
            Some(other) => {
                return Err(TriviaError::Unprocessable(format!(
                    "`searchTerm` must be a string, got {other}"
                )));
            }
        }

        Ok(Self::Create(NewQuestion {
            question: required_text(&payload, "question")?,
            answer: required_answer(&payload, "answer")?,
            difficulty: required_positive_integer(&payload, "difficulty")?,
            category: required_positive_integer(&payload, "category")?,
        }))
    }
}

fn required<'a>(payload: &'a Map<String, Value>, field: &str) -> TriviaResult<&'a Value> {
    match payload.get(field) {
        None | Some(Value::Null) => Err(TriviaError::Unprocessable(format!(
            "missing field `{field}`"
        ))),
        Some(value) => Ok(value),
    }
}

fn required_text(payload: &Map<String, Value>, field: &str) -> TriviaResult<String> {
    match required(payload, field)? {
        Value::String(text) if !text.trim().is_empty() => Ok(text.clone()),
        Value::String(_) => Err(TriviaError::Unprocessable(format!(
            "field `{field}` is empty"
        ))),
        other => Err(TriviaError::Unprocessable(format!(
            "field `{field}` must be a string, got {other}"
        ))),
    }
}

// answers like "2022" are routinely sent as bare numbers
fn required_answer(payload: &Map<String, Value>, field: &str) -> TriviaResult<String> {
    match required(payload, field)? {
        Value::Number(number) => Ok(number.to_string()),
        _ => required_text(payload, field),
    }
}

fn required_positive_integer(payload: &Map<String, Value>, field: &str) -> TriviaResult<i64> {
    let value = required(payload, field)?;
    value
        .as_i64()
        .filter(|v| *v > 0)
        .ok_or_else(|| {
            TriviaError::Unprocessable(format!(
                "field `{field}` must be a positive integer, got {value}"
            ))
        })
}
