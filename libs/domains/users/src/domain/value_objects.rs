//! Self-validating value objects. Once constructed they are always valid.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;
use uuid::Uuid;

use crate::error::{UserError, UserResult};

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
});

const NAME_MIN_CHARS: usize = 2;
const NAME_MAX_CHARS: usize = 50;

/// Opaque user identifier, UUID-shaped when generated here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Fresh random (v4) identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wraps an externally supplied id as-is. Blank input is rejected.
    pub fn parse(raw: &str) -> UserResult<Self> {
        if raw.trim().is_empty() {
            return Err(UserError::Validation("UserId cannot be empty".to_string()));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lowercased, trimmed email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    /// The pattern is checked against `raw` exactly as given; the stored
    /// value is trimmed and lowercased.
    pub fn parse(raw: &str) -> UserResult<Self> {
        if !EMAIL_PATTERN.is_match(raw) {
            return Err(UserError::Validation("Invalid email format".to_string()));
        }
        Ok(Self(raw.trim().to_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// First and last name, each 2 to 50 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserName {
    first_name: String,
    last_name: String,
}

impl UserName {
    /// Blank checks run first, then length checks on the untrimmed input;
    /// the stored halves are trimmed.
    pub fn new(first_name: &str, last_name: &str) -> UserResult<Self> {
        if first_name.trim().is_empty() {
            return Err(UserError::Validation("First name cannot be empty".to_string()));
        }
        if last_name.trim().is_empty() {
            return Err(UserError::Validation("Last name cannot be empty".to_string()));
        }
        if !has_name_length(first_name) {
            return Err(UserError::Validation(format!(
                "First name must be between {} and {} characters",
                NAME_MIN_CHARS, NAME_MAX_CHARS
            )));
        }
        if !has_name_length(last_name) {
            return Err(UserError::Validation(format!(
                "Last name must be between {} and {} characters",
                NAME_MIN_CHARS, NAME_MAX_CHARS
            )));
        }

        Ok(Self {
            first_name: first_name.trim().to_string(),
            last_name: last_name.trim().to_string(),
        })
    }

    /// Rebuilds a stored name. `new` measures length before trimming, so a
    /// stored half may be one character; only blank or over-long values fail.
    pub(crate) fn restore(first_name: &str, last_name: &str) -> UserResult<Self> {
        for (label, value) in [("First", first_name), ("Last", last_name)] {
            if value.trim().is_empty() {
                return Err(UserError::Validation(format!("{} name cannot be empty", label)));
            }
            if value.chars().count() > NAME_MAX_CHARS {
                return Err(UserError::Validation(format!(
                    "{} name must be at most {} characters",
                    label, NAME_MAX_CHARS
                )));
            }
        }

        Ok(Self {
            first_name: first_name.trim().to_string(),
            last_name: last_name.trim().to_string(),
        })
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.first_name, self.last_name)
    }
}

fn has_name_length(value: &str) -> bool {
    (NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&value.chars().count())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validation_message<T: fmt::Debug>(result: UserResult<T>) -> String {
        match result {
            Err(UserError::Validation(msg)) => msg,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_email_accepts_valid_addresses_and_lowercases() {
        for (raw, stored) in [
            ("a@b.com", "a@b.com"),
            ("Jane.Doe@Example.COM", "jane.doe@example.com"),
            ("x+tag@sub.domain.io", "x+tag@sub.domain.io"),
        ] {
            assert_eq!(Email::parse(raw).unwrap().as_str(), stored);
        }
    }

    #[test]
    fn test_email_rejects_malformed_addresses() {
        for raw in [
            "",
            "plain",
            "a@b",
            "@b.com",
            "a@.com",
            "a b@c.com",
            "a@b@c.com",
            " a@b.com",
            "a@b.com ",
        ] {
            assert_eq!(validation_message(Email::parse(raw)), "Invalid email format", "{raw:?}");
        }
    }

    #[test]
    fn test_email_equality_is_by_value() {
        assert_eq!(Email::parse("A@B.com").unwrap(), Email::parse("a@b.COM").unwrap());
        assert_ne!(Email::parse("a@b.com").unwrap(), Email::parse("c@b.com").unwrap());
    }

    #[test]
    fn test_user_name_full_name() {
        let name = UserName::new("Jane", "Doe").unwrap();
        assert_eq!(name.first_name(), "Jane");
        assert_eq!(name.last_name(), "Doe");
        assert_eq!(name.full_name(), "Jane Doe");
        assert_eq!(name.to_string(), "Jane Doe");
    }

    #[test]
    fn test_user_name_length_bounds() {
        let fifty = "a".repeat(50);
        assert!(UserName::new("Jo", &fifty).is_ok());
        assert_eq!(
            validation_message(UserName::new("J", "Doe")),
            "First name must be between 2 and 50 characters"
        );
        assert_eq!(
            validation_message(UserName::new("Jane", &"a".repeat(51))),
            "Last name must be between 2 and 50 characters"
        );
    }

    #[test]
    fn test_user_name_blank_checked_before_length() {
        assert_eq!(
            validation_message(UserName::new("   ", "D")),
            "First name cannot be empty"
        );
        assert_eq!(
            validation_message(UserName::new("J", "")),
            "Last name cannot be empty"
        );
    }

    #[test]
    fn test_user_name_length_uses_untrimmed_input() {
        // " J" passes the length check before trimming and is stored as "J".
        let name = UserName::new(" J", "Doe ").unwrap();
        assert_eq!(name.first_name(), "J");
        assert_eq!(name.last_name(), "Doe");

        // 49 letters plus padding exceeds the limit even though the trimmed value would fit.
        let padded = format!("  {}", "a".repeat(49));
        assert!(UserName::new(&padded, "Doe").is_err());
    }

    #[test]
    fn test_user_name_counts_characters_not_bytes() {
        assert!(UserName::new("Ål", "Øy").is_ok());
    }

    #[test]
    fn test_user_name_restore_accepts_stored_trimmed_values() {
        let stored = UserName::new(" J", "Doe").unwrap();
        assert_eq!(stored.first_name(), "J");

        let restored = UserName::restore(stored.first_name(), stored.last_name()).unwrap();
        assert_eq!(restored, stored);

        assert_eq!(
            validation_message(UserName::restore("J", " ")),
            "Last name cannot be empty"
        );
        assert!(UserName::restore(&"a".repeat(51), "Doe").is_err());
    }

    #[test]
    fn test_user_id_parse() {
        assert_eq!(
            validation_message(UserId::parse("")),
            "UserId cannot be empty"
        );
        assert!(UserId::parse("   ").is_err());
        assert_eq!(UserId::parse("abc").unwrap().as_str(), "abc");
        assert_eq!(UserId::parse(" abc ").unwrap().as_str(), " abc ");
    }

    #[test]
    fn test_user_id_generate_is_unique_uuid() {
        let a = UserId::generate();
        let b = UserId::generate();
        assert_ne!(a, b);
        assert!(Uuid::parse_str(a.as_str()).is_ok());
    }
}
