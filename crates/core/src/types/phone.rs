//! Phone number type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Phone`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum PhoneError {
    /// The input string is empty.
    #[error("phone number cannot be empty")]
    Empty,
    /// The input contains a character that is not a digit, separator, or
    /// leading plus.
    #[error("phone number contains invalid character '{0}'")]
    InvalidCharacter(char),
    /// Too few digits to be a dialable number.
    #[error("phone number must have at least {min} digits")]
    TooShort {
        /// Minimum required digit count.
        min: usize,
    },
    /// Too many digits.
    #[error("phone number must have at most {max} digits")]
    TooLong {
        /// Maximum allowed digit count.
        max: usize,
    },
}

/// A customer contact phone number.
///
/// Parsing normalizes the input to `+` (optional) followed by digits only:
/// spaces, dashes, dots, and parentheses are stripped. The stored form is
/// what gets persisted and compared.
///
/// ## Constraints
///
/// - 10-15 digits (ITU-T E.164 upper bound)
/// - Optional single leading `+`
/// - Allowed separators in input: space, `-`, `.`, `(`, `)`
///
/// ## Examples
///
/// ```
/// use flamegrill_core::Phone;
///
/// let phone = Phone::parse("+7 (999) 123-45-67").unwrap();
/// assert_eq!(phone.as_str(), "+79991234567");
///
/// assert!(Phone::parse("").is_err());
/// assert!(Phone::parse("555-01").is_err());      // too short
/// assert!(Phone::parse("call me maybe").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    /// Minimum number of digits in a phone number.
    pub const MIN_DIGITS: usize = 10;
    /// Maximum number of digits (E.164).
    pub const MAX_DIGITS: usize = 15;

    /// Parse a `Phone` from a string, normalizing separators away.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, contains characters other
    /// than digits, separators, and a leading `+`, or has a digit count
    /// outside 10-15.
    pub fn parse(s: &str) -> Result<Self, PhoneError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(PhoneError::Empty);
        }

        let mut normalized = String::with_capacity(trimmed.len());
        let mut digits = 0usize;

        for (index, c) in trimmed.chars().enumerate() {
            match c {
                '+' if index == 0 => normalized.push('+'),
                '0'..='9' => {
                    digits += 1;
                    normalized.push(c);
                }
                ' ' | '-' | '.' | '(' | ')' => {}
                other => return Err(PhoneError::InvalidCharacter(other)),
            }
        }

        if digits < Self::MIN_DIGITS {
            return Err(PhoneError::TooShort {
                min: Self::MIN_DIGITS,
            });
        }
        if digits > Self::MAX_DIGITS {
            return Err(PhoneError::TooLong {
                max: Self::MAX_DIGITS,
            });
        }

        Ok(Self(normalized))
    }

    /// Returns the normalized phone number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Phone` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Phone {
    type Err = PhoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Phone {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// SQLx support (with postgres feature)
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Phone {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Phone {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        // Database values are assumed normalized
        Ok(Self(s))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Phone {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_numbers() {
        assert!(Phone::parse("+79991234567").is_ok());
        assert!(Phone::parse("8 (999) 123-45-67").is_ok());
        assert!(Phone::parse("999.123.45.67").is_ok());
        assert!(Phone::parse("+1 212 555 0142").is_ok());
    }

    #[test]
    fn test_parse_normalizes_separators() {
        let phone = Phone::parse("+7 (999) 123-45-67").unwrap();
        assert_eq!(phone.as_str(), "+79991234567");
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(Phone::parse(""), Err(PhoneError::Empty)));
        assert!(matches!(Phone::parse("   "), Err(PhoneError::Empty)));
    }

    #[test]
    fn test_parse_invalid_character() {
        assert!(matches!(
            Phone::parse("999-123-45-6x"),
            Err(PhoneError::InvalidCharacter('x'))
        ));
        // plus only allowed at the start
        assert!(matches!(
            Phone::parse("999+1234567"),
            Err(PhoneError::InvalidCharacter('+'))
        ));
    }

    #[test]
    fn test_parse_too_short() {
        assert!(matches!(
            Phone::parse("555-0142"),
            Err(PhoneError::TooShort { .. })
        ));
    }

    #[test]
    fn test_parse_too_long() {
        assert!(matches!(
            Phone::parse("+1234567890123456"),
            Err(PhoneError::TooLong { .. })
        ));
    }

    #[test]
    fn test_display() {
        let phone = Phone::parse("+79991234567").unwrap();
        assert_eq!(format!("{phone}"), "+79991234567");
    }

    #[test]
    fn test_from_str() {
        let phone: Phone = "+79991234567".parse().unwrap();
        assert_eq!(phone.as_str(), "+79991234567");
    }

    #[test]
    fn test_serde_roundtrip() {
        let phone = Phone::parse("+79991234567").unwrap();
        let json = serde_json::to_string(&phone).unwrap();
        assert_eq!(json, "\"+79991234567\"");

        let parsed: Phone = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, phone);
    }
}
