//! Course identifier normalization
//!
//! Provides [`Identifier`], the canonical form of a course code, and
//! [`IdentifierKind`], which selects the sign-in backend generation.

use crate::error::IdentifierError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// 32 uppercase hexadecimal characters, nothing else.
static UUID_FORM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9A-F]{32}$").unwrap_or_else(|e| unreachable!("static pattern: {e}"))
});

/// Shape of a canonical identifier
///
/// The platform runs two generations of sign-in backends which are told
/// apart only by the shape of the identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum IdentifierKind {
    /// Digits only (course schedule id)
    #[default]
    Numeric,
    /// 32 uppercase hex characters (timetable id)
    Uuid,
}

impl IdentifierKind {
    /// Classify an already-canonical string
    #[inline]
    #[must_use]
    pub fn of(canonical: &str) -> Self {
        if UUID_FORM.is_match(canonical) {
            Self::Uuid
        } else {
            Self::Numeric
        }
    }

    /// Short lowercase name
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::Uuid => "uuid",
        }
    }
}

impl Display for IdentifierKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical course identifier
///
/// Built only through [`Identifier::normalize`], so the value is always
/// canonical and the kind always agrees with it. May be empty: callers
/// must check [`Identifier::is_empty`] before saving or generating codes.
///
/// # Examples
/// - `" 12-34 5 "` → `12345` (numeric)
/// - `"abcdef0123456789abcdef0123456789"` → `ABCDEF0123456789ABCDEF0123456789` (uuid)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Identifier {
    value: String,
    kind: IdentifierKind,
}

impl Identifier {
    /// Normalize raw user, scanner or import input
    ///
    /// Trims and uppercases; a 32-hex match is kept as the UUID form,
    /// anything else is reduced to its ASCII digits. Never fails and is
    /// idempotent.
    #[must_use]
    pub fn normalize(raw: &str) -> Self {
        let upper = raw.trim().to_uppercase();
        let value = if UUID_FORM.is_match(&upper) {
            upper
        } else {
            upper.chars().filter(char::is_ascii_digit).collect()
        };
        // 32 stripped digits are also hex, so classify the result rather
        // than the branch taken.
        let kind = IdentifierKind::of(&value);
        Self { value, kind }
    }

    /// Normalize and reject an empty result
    ///
    /// # Errors
    /// Returns [`IdentifierError::Empty`] if nothing usable remains.
    pub fn parse_non_empty(raw: &str) -> Result<Self, IdentifierError> {
        let id = Self::normalize(raw);
        if id.is_empty() {
            return Err(IdentifierError::Empty {
                raw: raw.to_string(),
            });
        }
        Ok(id)
    }

    /// Canonical text
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    #[inline]
    #[must_use]
    pub fn kind(&self) -> IdentifierKind {
        self.kind
    }

    #[inline]
    #[must_use]
    pub fn is_uuid(&self) -> bool {
        self.kind == IdentifierKind::Uuid
    }

    /// No usable identifier
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn into_string(self) -> String {
        self.value
    }
}

impl Display for Identifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl FromStr for Identifier {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_non_empty(s)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

impl PartialEq<str> for Identifier {
    fn eq(&self, other: &str) -> bool {
        self.value == other
    }
}

impl PartialEq<&str> for Identifier {
    fn eq(&self, other: &&str) -> bool {
        self.value == *other
    }
}

// Stored and shared as a plain string; re-normalized when read back.
impl serde::Serialize for Identifier {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.value)
    }
}

impl<'de> serde::Deserialize<'de> for Identifier {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct IdentifierVisitor;

        impl serde::de::Visitor<'_> for IdentifierVisitor {
            type Value = Identifier;

            fn expecting(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
                formatter.write_str("a course identifier string")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(Identifier::normalize(v))
            }
        }

        deserializer.deserialize_str(IdentifierVisitor)
    }
}
