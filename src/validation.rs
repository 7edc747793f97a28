//! Input parsing. Failures here abort an operation before any mutator runs.

use thiserror::Error;

/// Why a form field was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
	/// A required field was blank.
	#[error("please enter a value for {0}")]
	EmptyInput(&'static str),
	/// Not an integer.
	#[error("'{0}' is not a valid number")]
	NotANumber(String),
	/// Not a non-negative position.
	#[error("'{0}' is not a valid position")]
	InvalidIndex(String),
	/// Not a lowercase word.
	#[error("'{0}' must contain letters a-z only")]
	InvalidWord(String),
	/// Not a non-negative whole weight.
	#[error("'{0}' is not a valid edge weight (whole number >= 0)")]
	InvalidWeight(String),
}

fn non_empty<'a>(input: &'a str, field: &'static str) -> Result<&'a str, ValidationError> {
	let trimmed = input.trim();
	if trimmed.is_empty() {
		return Err(ValidationError::EmptyInput(field));
	}
	Ok(trimmed)
}

/// Integer element value.
pub fn parse_value(input: &str) -> Result<i64, ValidationError> {
	let raw = non_empty(input, "value")?;
	raw.parse()
		.map_err(|_| ValidationError::NotANumber(raw.to_string()))
}

/// Zero-based list position.
pub fn parse_index(input: &str) -> Result<usize, ValidationError> {
	let raw = non_empty(input, "position")?;
	raw.parse()
		.map_err(|_| ValidationError::InvalidIndex(raw.to_string()))
}

/// Trie word, normalised to lowercase.
pub fn parse_word(input: &str) -> Result<String, ValidationError> {
	let raw = non_empty(input, "word")?;
	if !raw.chars().all(|c| c.is_ascii_alphabetic()) {
		return Err(ValidationError::InvalidWord(raw.to_string()));
	}
	Ok(raw.to_ascii_lowercase())
}

/// Graph node label.
pub fn parse_label(input: &str, field: &'static str) -> Result<String, ValidationError> {
	non_empty(input, field).map(str::to_string)
}

/// Non-negative edge weight. An empty field means weight 1.
pub fn parse_weight(input: &str) -> Result<u64, ValidationError> {
	let raw = input.trim();
	if raw.is_empty() {
		return Ok(1);
	}
	raw.parse()
		.map_err(|_| ValidationError::InvalidWeight(raw.to_string()))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn numbers() {
		assert_eq!(parse_value(" -17 "), Ok(-17));
		assert_eq!(parse_value(""), Err(ValidationError::EmptyInput("value")));
		assert_eq!(
			parse_value("12a"),
			Err(ValidationError::NotANumber("12a".into()))
		);
		assert!(parse_index("-1").is_err());
	}

	#[test]
	fn words_and_weights() {
		assert_eq!(parse_word("Cat"), Ok("cat".into()));
		assert!(matches!(parse_word("c4t"), Err(ValidationError::InvalidWord(_))));
		assert_eq!(parse_weight(""), Ok(1));
		assert_eq!(parse_weight("7"), Ok(7));
		assert!(parse_weight("-3").is_err());
		assert_eq!(
			ValidationError::EmptyInput("word").to_string(),
			"please enter a value for word"
		);
	}
}
