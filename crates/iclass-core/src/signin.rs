//! Time-stamped sign-in URLs
//!
//! The backend generation is chosen by [`IdentifierKind`]:
//! - UUID identifiers go to the timetable endpoint as `timeTableId`
//! - numeric identifiers go to the iClass endpoint as `courseSchedId`

use crate::clock::{Clock, SystemClock};
use crate::identifier::{Identifier, IdentifierKind};

/// Sign-in endpoint for timetable (UUID) identifiers
pub const UUID_SIGN_IN_ENDPOINT: &str =
    "http://124.16.75.106:8081/app/course/stu_scan_sign.action";

/// Sign-in endpoint for course schedule (numeric) identifiers
pub const NUMERIC_SIGN_IN_ENDPOINT: &str =
    "https://iclass.ucas.edu.cn:8181/app/course/stu_scan_sign.action";

/// Query parameter carrying the timestamp
pub const TIMESTAMP_PARAM: &str = "timestamp";

impl IdentifierKind {
    /// Base URL of the sign-in action for this kind
    #[inline]
    #[must_use]
    pub const fn endpoint(self) -> &'static str {
        match self {
            Self::Numeric => NUMERIC_SIGN_IN_ENDPOINT,
            Self::Uuid => UUID_SIGN_IN_ENDPOINT,
        }
    }

    /// Query parameter carrying the identifier for this kind
    #[inline]
    #[must_use]
    pub const fn query_param(self) -> &'static str {
        match self {
            Self::Numeric => "courseSchedId",
            Self::Uuid => "timeTableId",
        }
    }
}

/// Builds sign-in URLs against an injectable clock
///
/// Holds no state besides the clock; safe to call from a refresh timer at
/// any rate.
#[derive(Debug, Clone, Default)]
pub struct SignInUrlBuilder<C = SystemClock> {
    clock: C,
}

impl SignInUrlBuilder<SystemClock> {
    /// Builder on the system clock
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self { clock: SystemClock }
    }
}

impl<C: Clock> SignInUrlBuilder<C> {
    /// Builder on a custom clock
    #[inline]
    #[must_use]
    pub fn with_clock(clock: C) -> Self {
        Self { clock }
    }

    #[inline]
    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Milliseconds timestamp `offset_seconds` from now
    #[inline]
    #[must_use]
    pub fn timestamp(&self, offset_seconds: i64) -> i64 {
        self.clock
            .now_millis()
            .saturating_add(offset_seconds.saturating_mul(1000))
    }

    /// Build the sign-in URL for `id`, valid `offset_seconds` from now
    ///
    /// An empty identifier still yields a well-formed URL; callers gate on
    /// [`Identifier::is_empty`].
    #[must_use]
    pub fn build(&self, id: &Identifier, offset_seconds: i64) -> String {
        let kind = id.kind();
        format!(
            "{}?{}={}&{}={}",
            kind.endpoint(),
            kind.query_param(),
            id.as_str(),
            TIMESTAMP_PARAM,
            self.timestamp(offset_seconds),
        )
    }
}

/// Build a sign-in URL on the system clock
#[inline]
#[must_use]
pub fn build_sign_in_url(id: &Identifier, offset_seconds: i64) -> String {
    SignInUrlBuilder::new().build(id, offset_seconds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;

    #[test]
    fn numeric_url_is_bit_exact() {
        let builder = SignInUrlBuilder::with_clock(FixedClock::at(1_700_000_000_000));
        let url = builder.build(&Identifier::normalize("12345"), 10);
        assert_eq!(
            url,
            "https://iclass.ucas.edu.cn:8181/app/course/stu_scan_sign.action\
             ?courseSchedId=12345&timestamp=1700000010000"
        );
    }

    #[test]
    fn uuid_url_is_bit_exact() {
        let builder = SignInUrlBuilder::with_clock(FixedClock::at(5));
        let url = builder.build(&Identifier::normalize("abcdef0123456789abcdef0123456789"), 0);
        assert_eq!(
            url,
            "http://124.16.75.106:8081/app/course/stu_scan_sign.action\
             ?timeTableId=ABCDEF0123456789ABCDEF0123456789&timestamp=5"
        );
    }

    #[test]
    fn negative_offset_moves_back() {
        let builder = SignInUrlBuilder::with_clock(FixedClock::at(60_000));
        assert_eq!(builder.timestamp(-30), 30_000);
    }

    #[test]
    fn empty_identifier_still_builds() {
        let builder = SignInUrlBuilder::with_clock(FixedClock::at(1));
        let url = builder.build(&Identifier::default(), 0);
        assert!(url.ends_with("?courseSchedId=&timestamp=1"));
    }

    #[test]
    fn follows_clock_between_calls() {
        let clock = FixedClock::at(0);
        let builder = SignInUrlBuilder::with_clock(&clock);
        let id = Identifier::normalize("1");
        let first = builder.build(&id, 0);
        clock.advance(5_000);
        let second = builder.build(&id, 0);
        assert!(first.ends_with("timestamp=0"));
        assert!(second.ends_with("timestamp=5000"));
    }
}
