//! Short-link code generation.

use rand::Rng;
use rand::distr::Alphanumeric;

/// Code length used when the configured length is not positive.
pub const DEFAULT_CODE_LENGTH: usize = 16;

/// Upper bound on the length of a stored code.
pub const MAX_CODE_LENGTH: usize = 32;

/// Generate a random code of ASCII letters and digits.
///
/// A `length` of zero falls back to [`DEFAULT_CODE_LENGTH`]; anything longer
/// than [`MAX_CODE_LENGTH`] is capped.
pub fn generate(length: usize) -> String {
    let n = match length {
        0 => DEFAULT_CODE_LENGTH,
        n => n.min(MAX_CODE_LENGTH),
    };

    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(n)
        .map(char::from)
        .collect()
}

/// Whether `code` could be a stored short-link code.
///
/// Accepts 1-32 characters from `[A-Za-z0-9_-]`. Generated codes only use
/// letters and digits, but hand-assigned ones may carry `_` or `-`.
pub fn is_valid(code: &str) -> bool {
    !code.is_empty()
        && code.len() <= MAX_CODE_LENGTH
        && code
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
