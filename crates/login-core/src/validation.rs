//! Credential format validation.
//!
//! Pure predicates with no side effects; the service layer turns rejections
//! into typed errors.

use regex::Regex;
use std::sync::LazyLock;

const MIN_PASSWORD_LENGTH: usize = 8;
const MAX_PASSWORD_LENGTH: usize = 12;
const MIN_REQUIRED_DIGITS: usize = 2;

// local-part of word/hyphen/dot characters, dot-separated domain labels,
// and a 2-4 word-character tld
static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w.-]+@([\w-]+\.)+[\w-]{2,4}$").expect("valid email regex"));

/// Validate an email address format. No network or MX verification.
pub fn validate_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Validate a password: 8-12 ASCII letters and digits, at least one
/// uppercase letter and at least two digits anywhere in the string.
///
/// The regex crate has no lookaheads, so the rule is spelled out as
/// character checks instead of the usual `(?=...)` pattern.
pub fn validate_password(password: &str) -> bool {
    let len = password.chars().count();
    if !(MIN_PASSWORD_LENGTH..=MAX_PASSWORD_LENGTH).contains(&len) {
        return false;
    }

    if !password.chars().all(|c| c.is_ascii_alphanumeric()) {
        return false;
    }

    let has_uppercase = password.chars().any(|c| c.is_ascii_uppercase());
    let digit_count = password.chars().filter(|c| c.is_ascii_digit()).count();

    has_uppercase && digit_count >= MIN_REQUIRED_DIGITS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email_accepts_well_formed() {
        assert!(validate_email("juan@testssw.cl"));
        assert!(validate_email("fernando@test.com"));
        assert!(validate_email("first.last@sub.domain.org"));
        assert!(validate_email("user-name@my-host.io"));
    }

    #[test]
    fn test_validate_email_rejects_malformed() {
        assert!(!validate_email("invalid-email"));
        assert!(!validate_email(""));
        assert!(!validate_email("user@"));
        assert!(!validate_email("@domain.cl"));
        assert!(!validate_email("user@domain"));
        // tld longer than 4 characters
        assert!(!validate_email("user@domain.software"));
        assert!(!validate_email("user@@domain.cl"));
    }

    #[test]
    fn test_validate_password_accepts_valid() {
        assert!(validate_password("Ab12cd34"));
        assert!(validate_password("Abc12345"));
        assert!(validate_password("aB12cdefghij")); // 12 chars, upper bound
        assert!(validate_password("ZZZZ99zz"));
    }

    #[test]
    fn test_validate_password_length_bounds() {
        assert!(!validate_password("12345"));
        assert!(!validate_password("Ab12cde")); // 7 chars
        assert!(!validate_password("Ab12cdefghijk")); // 13 chars
        assert!(!validate_password(""));
    }

    #[test]
    fn test_validate_password_requires_uppercase() {
        assert!(!validate_password("abcdef12"));
    }

    #[test]
    fn test_validate_password_requires_two_digits() {
        assert!(!validate_password("Abcdefgh"));
        assert!(!validate_password("Abcdefg1"));
        // digits need not be adjacent
        assert!(validate_password("A1bcdef2"));
    }

    #[test]
    fn test_validate_password_rejects_disallowed_characters() {
        assert!(!validate_password("Ab12cd3!"));
        assert!(!validate_password("Ab12 d34"));
        assert!(!validate_password("Áb12cd34"));
    }
}
