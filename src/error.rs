//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the crate.

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// We use `derive_more` for boilerplate.
/// Note: String errors default to `General`.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// A resource's (singularized) type had no registered model schema.
    /// Carries the offending wire type and the expected response model name.
    #[from(ignore)]
    #[display("The JSON:API response had a type of \"{_0}\" but the expected model was \"{_1}\"")]
    SchemaNotFound(String, String),

    /// Wrapper for serde_json decode errors at the document boundary.
    #[display("Parse Error: {_0}")]
    Parse(serde_json::Error),

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_conversion() {
        let msg = String::from("something wrong");
        let app_err: AppError = msg.into();
        match app_err {
            AppError::General(s) => assert_eq!(s, "something wrong"),
            _ => panic!("String should convert to AppError::General"),
        }
    }

    #[test]
    fn test_parse_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let app_err: AppError = json_err.into();
        assert!(matches!(app_err, AppError::Parse(_)));
    }

    #[test]
    fn test_schema_not_found_names_both_types() {
        let err = AppError::SchemaNotFound("articles".into(), "article".into());
        let rendered = format!("{}", err);
        assert!(rendered.contains("\"articles\""));
        assert!(rendered.contains("\"article\""));
    }
}
