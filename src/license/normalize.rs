//! Case-insensitive matching helpers shared by the classifier and the recommender.

/// Upper-case an identifier for matching. The original string is never modified.
pub fn upper(identifier: &str) -> String {
    identifier.to_uppercase()
}

/// True when `token` (given upper-case) occurs anywhere in `identifier`, ignoring case.
pub fn contains_token(identifier: &str, token: &str) -> bool {
    upper(identifier).contains(token)
}

/// True when any of `tokens` occurs in `identifier`, ignoring case.
pub fn contains_any(identifier: &str, tokens: &[&str]) -> bool {
    let upper = upper(identifier);
    tokens.iter().any(|t| upper.contains(t))
}

/// Length in characters, not bytes.
pub fn char_len(identifier: &str) -> usize {
    identifier.chars().count()
}
