use chrono::{DateTime, Utc};

/// Trait for providing the current UTC time.
///
/// Token issuance reads the clock through this trait so that `iat`/`exp`
/// are deterministic in tests.
pub trait Now: Send + Sync + 'static {
    /// Returns the current UTC time.
    fn now() -> DateTime<Utc>;
}

/// Implementation that returns the actual current system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemNow;

impl Now for SystemNow {
    fn now() -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(feature = "mock")]
pub mod mock {
    use super::*;

    /// Unix timestamp returned by [`MockNow`] (2020-01-01 00:00:00 UTC).
    pub const MOCK_NOW_TIMESTAMP: i64 = 1_577_836_800;

    /// Mock time provider that is frozen at [`MOCK_NOW_TIMESTAMP`].
    #[derive(Debug, Clone, Copy, Default)]
    pub struct MockNow;

    impl Now for MockNow {
        fn now() -> DateTime<Utc> {
            DateTime::from_timestamp(MOCK_NOW_TIMESTAMP, 0).unwrap_or_default()
        }
    }
}
