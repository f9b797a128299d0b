//! Registration credential rules.
//!
//! Usernames: 4-20 characters from `[A-Za-z0-9_-]`, not starting with a
//! digit or underscore. Passwords: 8-20 characters from the alphanumeric set
//! plus `@#$%^&+=!*_`, with at least one uppercase letter, one lowercase
//! letter, one digit and one special character.

/// Special characters accepted (and one required) in passwords.
const PASSWORD_SPECIALS: &str = "@#$%^&+=!*_";

/// Returns `true` if the username satisfies the registration rules.
#[must_use]
pub fn username_is_valid(username: &str) -> bool {
    let len = username.chars().count();
    if !(4..=20).contains(&len) {
        return false;
    }
    let Some(first) = username.chars().next() else {
        return false;
    };
    if first.is_ascii_digit() || first == '_' {
        return false;
    }
    username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Returns `true` if the password satisfies the registration rules.
#[must_use]
pub fn password_is_valid(password: &str) -> bool {
    let len = password.chars().count();
    if !(8..=20).contains(&len) {
        return false;
    }
    if !password
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || PASSWORD_SPECIALS.contains(c))
    {
        return false;
    }
    password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| PASSWORD_SPECIALS.contains(c))
}

/// Returns `true` if both username and password satisfy the rules.
#[must_use]
pub fn credentials_are_valid(username: &str, password: &str) -> bool {
    username_is_valid(username) && password_is_valid(password)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_usernames() {
        assert!(username_is_valid("alice01"));
        assert!(username_is_valid("backendUnitTest"));
        assert!(username_is_valid("a-b_c"));
        assert!(username_is_valid("-dash"));
    }

    #[test]
    fn test_invalid_usernames() {
        assert!(!username_is_valid("ran")); // too short
        assert!(!username_is_valid("a".repeat(21).as_str())); // too long
        assert!(!username_is_valid("3randomUser")); // starts with digit
        assert!(!username_is_valid("_random")); // starts with underscore
        assert!(!username_is_valid("random User")); // whitespace
        assert!(!username_is_valid("alice01#")); // '#' not allowed
    }

    #[test]
    fn test_valid_passwords() {
        assert!(password_is_valid("Passw0rd!1"));
        assert!(password_is_valid("unitTest#0001"));
        assert!(password_is_valid("Aa1@aaaa"));
    }

    #[test]
    fn test_invalid_passwords() {
        assert!(!password_is_valid("Aa1@aaa")); // too short
        assert!(!password_is_valid(&format!("Aa1@{}", "a".repeat(17)))); // too long
        assert!(!password_is_valid("passw0rd!1")); // no uppercase
        assert!(!password_is_valid("PASSW0RD!1")); // no lowercase
        assert!(!password_is_valid("Password!!")); // no digit
        assert!(!password_is_valid("Passw0rd11")); // no special
        assert!(!password_is_valid("Passw0rd! 1")); // whitespace not allowed
    }

    #[test]
    fn test_credentials_are_valid() {
        assert!(credentials_are_valid("alice01", "Passw0rd!1"));
        assert!(!credentials_are_valid("alice01#", "Passw0rd!1"));
        assert!(!credentials_are_valid("alice01", "weak"));
    }
}
