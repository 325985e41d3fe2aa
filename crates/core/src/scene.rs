//! Scene text generator with a caller-chosen number of free-text slots.

use crate::error::CoreError;
use crate::prompt::{is_blank, DEFAULT_NEGATIVE_PROMPT};

/// Smallest number of text slots.
pub const MIN_TEXT_SLOTS: i64 = 0;

/// Largest number of text slots.
pub const MAX_TEXT_SLOTS: i64 = 3;

/// Slot count used when none is given.
pub const DEFAULT_TEXT_SLOTS: i64 = 1;

/// Name of the `index`-th (1-based) text slot.
pub fn text_slot_name(index: usize) -> String {
    format!("text_{index}")
}

/// Validate a requested slot count against the allowed range.
pub fn validate_slot_count(count: i64) -> Result<usize, CoreError> {
    if !(MIN_TEXT_SLOTS..=MAX_TEXT_SLOTS).contains(&count) {
        return Err(CoreError::Validation(format!(
            "Text slot count must be between {MIN_TEXT_SLOTS} and {MAX_TEXT_SLOTS} (got {count})"
        )));
    }
    Ok(count as usize)
}

/// Join the non-blank slots with newlines, in slot order.
///
/// The texts are kept as given (not trimmed).
pub fn join_texts<S: AsRef<str>>(texts: &[S]) -> String {
    texts
        .iter()
        .map(AsRef::as_ref)
        .filter(|t| !is_blank(t))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Positive and negative outputs of the scene generator.
///
/// The negative prompt is always the default literal.
pub fn generate(texts: &[String]) -> (String, String) {
    (join_texts(texts), DEFAULT_NEGATIVE_PROMPT.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_names_are_one_based() {
        assert_eq!(text_slot_name(1), "text_1");
        assert_eq!(text_slot_name(3), "text_3");
    }

    #[test]
    fn validate_slot_count_accepts_range() {
        for n in MIN_TEXT_SLOTS..=MAX_TEXT_SLOTS {
            assert_eq!(validate_slot_count(n).unwrap(), n as usize);
        }
    }

    #[test]
    fn validate_slot_count_rejects_out_of_range() {
        assert!(validate_slot_count(-1).is_err());
        let err = validate_slot_count(4).unwrap_err();
        assert!(err.to_string().contains("between 0 and 3"));
    }

    #[test]
    fn join_skips_blank_slots() {
        let texts = vec!["a forest".to_string(), "  ".to_string(), "at night".to_string()];
        assert_eq!(join_texts(&texts), "a forest\nat night");
    }

    #[test]
    fn generate_always_returns_default_negative() {
        let (positive, negative) = generate(&[]);
        assert_eq!(positive, "");
        assert_eq!(negative, DEFAULT_NEGATIVE_PROMPT);
    }
}
