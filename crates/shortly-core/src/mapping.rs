use crate::shortcode::ShortCode;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A durable record associating a short code with its original URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mapping {
    /// Primary key of the record.
    pub short_code: ShortCode,
    /// The URL the short code redirects to.
    pub original_url: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    /// When the mapping stops being logically valid, if ever.
    pub expiration_time: Option<Timestamp>,
}

/// Logical lifecycle state of a [`Mapping`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappingState {
    Active,
    Expired,
}

impl Mapping {
    /// Creates a freshly inserted mapping stamped with `now`.
    pub fn new(
        short_code: ShortCode,
        original_url: impl Into<String>,
        expiration_time: Option<Timestamp>,
        now: Timestamp,
    ) -> Self {
        Self {
            short_code,
            original_url: original_url.into(),
            created_at: now,
            updated_at: now,
            expiration_time,
        }
    }

    /// Returns `true` once `now` has reached the expiration time.
    pub fn is_expired_at(&self, now: Timestamp) -> bool {
        self.expiration_time
            .is_some_and(|expiration_time| now >= expiration_time)
    }

    pub fn state_at(&self, now: Timestamp) -> MappingState {
        if self.is_expired_at(now) {
            MappingState::Expired
        } else {
            MappingState::Active
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::SignedDuration;

    fn mapping(expiration_time: Option<Timestamp>) -> Mapping {
        Mapping::new(
            ShortCode::from_id(1),
            "https://example.com",
            expiration_time,
            Timestamp::now(),
        )
    }

    #[test]
    fn new_mapping_has_equal_timestamps() {
        let m = mapping(None);
        assert_eq!(m.created_at, m.updated_at);
    }

    #[test]
    fn never_expires_without_expiration_time() {
        let m = mapping(None);
        let far_future = Timestamp::now() + SignedDuration::from_hours(24 * 365);
        assert_eq!(m.state_at(far_future), MappingState::Active);
    }

    #[test]
    fn expires_at_expiration_time() {
        let expiration = Timestamp::now() + SignedDuration::from_secs(60);
        let m = mapping(Some(expiration));

        assert_eq!(
            m.state_at(expiration - SignedDuration::from_secs(1)),
            MappingState::Active
        );
        assert_eq!(m.state_at(expiration), MappingState::Expired);
    }
}
