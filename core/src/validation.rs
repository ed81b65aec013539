//! Title validation applied before a create reaches the coordinator.

use thiserror::Error;

/// Longest accepted title, in characters, after trimming.
pub const MAX_TITLE_CHARS: usize = 200;

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum TitleError {
    #[error("Todo title is required")]
    Empty,

    #[error("Todo title must be less than 200 characters")]
    TooLong,
}

/// Trim `raw` and check it is a usable todo title.
pub fn validate_title(raw: &str) -> Result<String, TitleError> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(TitleError::Empty);
    }
    if title.chars().count() > MAX_TITLE_CHARS {
        return Err(TitleError::TooLong);
    }
    Ok(title.to_string())
}
