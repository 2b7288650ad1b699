use crate::base62;
use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// The public key of a shortened URL: the base62 encoding of one identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ShortCode(String);

impl ShortCode {
    /// Encodes an identifier into its short code.
    pub fn from_id(id: u64) -> Self {
        Self(base62::encode(id))
    }

    /// Parses a short code received from outside the service.
    ///
    /// Valid codes are 1 to 11 characters from the base62 alphabet. Anything
    /// else cannot have been produced by [`ShortCode::from_id`].
    pub fn parse(code: impl Into<String>) -> Result<Self, CoreError> {
        let code = code.into();
        Self::validate(&code)?;
        Ok(Self(code))
    }

    /// Creates a `ShortCode` without validation.
    ///
    /// Use this only for codes read back from trusted storage.
    pub fn new_unchecked(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Generates the full shortened URL based on the provided base URL.
    pub fn to_url(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self.0)
    }

    /// Returns the short code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(code: &str) -> Result<(), CoreError> {
        if code.is_empty() || code.len() > base62::MAX_ENCODED_LEN {
            return Err(CoreError::InvalidShortCode(format!(
                "length must be between 1 and {}, got {}",
                base62::MAX_ENCODED_LEN,
                code.len()
            )));
        }

        if !code.bytes().all(base62::is_symbol) {
            return Err(CoreError::InvalidShortCode(format!(
                "must contain only base62 characters: '{}'",
                code
            )));
        }

        Ok(())
    }
}

impl TryFrom<String> for ShortCode {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<ShortCode> for String {
    fn from(code: ShortCode) -> Self {
        code.0
    }
}

impl Display for ShortCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_id_uses_base62() {
        assert_eq!(ShortCode::from_id(0).as_str(), "0");
        assert_eq!(ShortCode::from_id(125).as_str(), "21");
    }

    #[test]
    fn valid_codes() {
        assert!(ShortCode::parse("a").is_ok());
        assert!(ShortCode::parse("Zz09").is_ok());
        assert!(ShortCode::parse("a".repeat(11)).is_ok());
    }

    #[test]
    fn empty_or_too_long() {
        assert!(ShortCode::parse("").is_err());
        assert!(ShortCode::parse("a".repeat(12)).is_err());
    }

    #[test]
    fn invalid_characters() {
        assert!(ShortCode::parse("abc def").is_err());
        assert!(ShortCode::parse("abc-def").is_err());
        assert!(ShortCode::parse("abc/def").is_err());
        assert!(ShortCode::parse("ünï").is_err());
    }

    #[test]
    fn parse_accepts_every_generated_code() {
        for id in [0, 1, 62, 1_000_000, u64::MAX] {
            let code = ShortCode::from_id(id);
            assert_eq!(ShortCode::parse(code.as_str()).unwrap(), code);
        }
    }

    #[test]
    fn deserialize_validates() {
        let code: ShortCode = serde_json::from_str("\"Zz09\"").unwrap();
        assert_eq!(code.as_str(), "Zz09");
        assert_eq!(serde_json::to_string(&code).unwrap(), "\"Zz09\"");

        assert!(serde_json::from_str::<ShortCode>("\"abc-def\"").is_err());
        assert!(serde_json::from_str::<ShortCode>("\"\"").is_err());
    }

    #[test]
    fn to_url() {
        let code = ShortCode::from_id(3844);
        assert_eq!(code.to_url("https://sho.rt"), "https://sho.rt/100");
        assert_eq!(code.to_url("https://sho.rt/"), "https://sho.rt/100");
    }
}
