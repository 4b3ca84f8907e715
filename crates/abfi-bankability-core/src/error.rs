use serde::de::DeserializeOwned;
use serde_json::error::Category;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BankabilityError {
    /// A required input field is malformed, out of range or inconsistent.
    #[error("Validation error on {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("Invalid scoring policy: {0}")]
    InvalidPolicy(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl BankabilityError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        BankabilityError::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Qualify the field of a validation failure with the path of the record
    /// that contains it, e.g. `term_years` -> `agreements[2].term_years`.
    pub fn within(self, path: &str) -> Self {
        match self {
            BankabilityError::Validation { field, reason } => BankabilityError::Validation {
                field: format!("{path}.{field}"),
                reason,
            },
            other => other,
        }
    }

    /// Name of the offending field, if this is a validation failure.
    pub fn field(&self) -> Option<&str> {
        match self {
            BankabilityError::Validation { field, .. } => Some(field),
            _ => None,
        }
    }
}

/// Deserialize a JSON document, reporting missing fields and values of the
/// wrong shape as validation failures on the offending path, e.g.
/// `agreements[0].term_years`. Malformed JSON stays a serialization error.
pub fn parse_json<T: DeserializeOwned>(json: &str) -> Result<T, BankabilityError> {
    let mut de = serde_json::Deserializer::from_str(json);
    let value = serde_path_to_error::deserialize(&mut de).map_err(from_path_error)?;
    de.end()?;
    Ok(value)
}

fn from_path_error(err: serde_path_to_error::Error<serde_json::Error>) -> BankabilityError {
    let path = err.path().to_string();
    let inner = err.into_inner();
    if inner.classify() != Category::Data {
        return inner.into();
    }

    // serde_json appends the position; the path already locates the value.
    let message = inner.to_string();
    let reason = message
        .rsplit_once(" at line ")
        .map_or(message.as_str(), |(reason, _)| reason);
    let parent = match path.as_str() {
        "" | "." => "",
        nested => nested,
    };

    match missing_field(reason) {
        Some(name) if parent.is_empty() => {
            BankabilityError::validation(name, "Missing required field")
        }
        Some(name) => {
            BankabilityError::validation(format!("{parent}.{name}"), "Missing required field")
        }
        None if parent.is_empty() => BankabilityError::validation("input", reason),
        None => BankabilityError::validation(parent, reason),
    }
}

fn missing_field(reason: &str) -> Option<&str> {
    reason.strip_prefix("missing field `")?.strip_suffix('`')
}

impl From<serde_json::Error> for BankabilityError {
    fn from(e: serde_json::Error) -> Self {
        BankabilityError::SerializationError(e.to_string())
    }
}
