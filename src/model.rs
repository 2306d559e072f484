//! Homework records and the fixed status vocabulary.
//!
//! The review API is an untrusted external source, so responses stay
//! [`serde_json::Value`] until every field has been checked explicitly.
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl HomeworkStatus {
    /// Parse a status code from the API. Anything outside the closed set,
    /// the empty string included, is rejected.
    pub fn parse(code: &str) -> Option<Self> {
        match code {
            "approved" => Some(HomeworkStatus::Approved),
            "reviewing" => Some(HomeworkStatus::Reviewing),
            "rejected" => Some(HomeworkStatus::Rejected),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "approved",
            HomeworkStatus::Reviewing => "reviewing",
            HomeworkStatus::Rejected => "rejected",
        }
    }

    /// The fixed human-readable verdict sentence for this status.
    pub fn verdict(&self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            HomeworkStatus::Reviewing => "Работа взята на проверку ревьюером.",
            HomeworkStatus::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("response body is not a JSON object")]
    NotAnObject,
    #[error("response has no 'homeworks' field")]
    MissingHomeworks,
    #[error("'homeworks' is not a list")]
    HomeworksNotAList,
    #[error("homework record has no string 'status' field")]
    MissingStatus,
    #[error("homework record has no string 'homework_name' field")]
    MissingName,
    #[error("unknown homework status '{0}'")]
    UnknownStatus(String),
}

/// Check the overall shape of an API response and return the homework list
/// unmodified. Callers pick the entry they care about.
pub fn validate_response(body: &Value) -> Result<&[Value], SchemaError> {
    let obj = body.as_object().ok_or(SchemaError::NotAnObject)?;
    let homeworks = obj.get("homeworks").ok_or(SchemaError::MissingHomeworks)?;
    let list = homeworks.as_array().ok_or(SchemaError::HomeworksNotAList)?;
    Ok(list)
}

/// Build the notification text for a single homework record.
pub fn parse_status(record: &Value) -> Result<String, SchemaError> {
    let code = record
        .get("status")
        .and_then(Value::as_str)
        .ok_or(SchemaError::MissingStatus)?;
    let name = record
        .get("homework_name")
        .and_then(Value::as_str)
        .ok_or(SchemaError::MissingName)?;
    let status = HomeworkStatus::parse(code)
        .ok_or_else(|| SchemaError::UnknownStatus(code.to_owned()))?;
    Ok(format!(
        "Изменился статус проверки работы \"{name}\". {}",
        status.verdict()
    ))
}
