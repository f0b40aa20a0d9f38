//! Generate a response for the MD5 challenge-response login scheme used by the
//! FRITZ!Box.
//!
//! <https://avm.de/fileadmin/user_upload/Global/Service/Schnittstellen/AVM_Technical_Note_-_Session_ID_english_2021-05-03.pdf>

use std::fmt::Display;
use std::str::FromStr;

/// `<Challenge>` as sent by `login_sid.lua`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Challenge(String);

/// The value of the `response` parameter, `{challenge}-{hash}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub challenge: String,
    pub hash: String,
}

impl Display for Response {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.challenge, self.hash)
    }
}

impl Challenge {
    pub fn new(challenge: impl Into<String>) -> Challenge {
        Challenge(challenge.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn make_response(&self, password: &str) -> Response {
        Response {
            challenge: self.0.clone(),
            hash: hash(&self.0, password),
        }
    }
}

impl FromStr for Challenge {
    type Err = std::convert::Infallible;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Challenge::new(s))
    }
}

impl Display for Challenge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// MD5 over the UTF-16LE encoding of `{challenge}-{password}`, as lowercase hex.
pub fn hash(challenge: &str, password: &str) -> String {
    let bytes = format!("{challenge}-{password}")
        .encode_utf16()
        .flat_map(u16::to_le_bytes)
        .collect::<Vec<u8>>();

    hex::encode(md5::compute(&bytes).0)
}

#[cfg(test)]
mod tests {
    use super::{hash, Challenge};

    #[test]
    fn avm_example() {
        let ch = Challenge::new("1234567z");
        let response = ch.make_response("äbc");

        assert_eq!(response.hash, "9e224a41eeefa284df7bb0f26c2913e2");
        assert_eq!(
            response.to_string(),
            "1234567z-9e224a41eeefa284df7bb0f26c2913e2"
        );
    }

    #[test]
    fn hash_is_lowercase_hex_and_deterministic() {
        let first = hash("a1b2c3d4", "hunter2");
        let second = hash("a1b2c3d4", "hunter2");

        assert_eq!(first, second);
        assert_eq!(first.len(), 32);
        assert!(first
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
        assert_ne!(first, hash("a1b2c3d4", "hunter3"));
    }
}
