use std::fmt::Display;
use std::num::ParseIntError;
use std::str::FromStr;

use roxmltree::Document;
use thiserror::Error;

use super::challenge::Challenge;
use crate::xml::{element_text, find_element};

const INVALID_SESSION_ID: [u8; 8] = [0; 8];

/// Parsed `<SessionInfo>` answer of `login_sid.lua`.
///
/// `<Rights>` is ignored.
#[derive(Debug, Clone)]
pub struct SessionInfo {
    /// `<SID>`
    pub session_id: SessionId,
    /// `<Challenge>`
    pub challenge: Challenge,
    /// `<BlockTime>`
    pub block_time: u32,
    /// `<Users>`, absent on older firmware
    pub users: Vec<String>,
}

#[derive(Debug, Error)]
pub enum SessionInfoParseError {
    #[error("text is not valid xml: {0}")]
    Xml(#[from] roxmltree::Error),
    #[error("{0}")]
    Element(#[from] crate::xml::Error),
    #[error("couldn't parse session id: {0}")]
    SessionId(#[from] SessionIdParseError),
    #[error("couldn't parse block time: {0}")]
    BlockTime(#[from] ParseIntError),
}

impl SessionInfo {
    pub fn from_xml(xml: &str) -> Result<SessionInfo, SessionInfoParseError> {
        let doc = Document::parse(xml)?;
        let session_info = find_element(doc.root(), "SessionInfo")?;

        let session_id: SessionId = element_text(session_info, "SID")?.parse()?;
        let challenge = Challenge::new(element_text(session_info, "Challenge")?);
        let block_time: u32 = element_text(session_info, "BlockTime")?.parse()?;

        let users = match find_element(session_info, "Users") {
            Err(_) => Vec::new(),
            Ok(users) => users
                .children()
                .filter(|n| n.is_element() && n.has_tag_name("User"))
                .filter_map(|n| n.text())
                .map(|name| name.trim().to_string())
                .collect(),
        };

        Ok(SessionInfo {
            session_id,
            challenge,
            block_time,
            users,
        })
    }

    pub fn has_user(&self, username: &str) -> bool {
        self.users.iter().any(|user| user == username)
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct SessionId {
    id: [u8; 8],
}

impl SessionId {
    /// `0000000000000000`, what the FRITZ!Box hands out when not logged in.
    pub const INVALID: SessionId = SessionId {
        id: INVALID_SESSION_ID,
    };

    pub fn is_valid(&self) -> bool {
        self.id != INVALID_SESSION_ID
    }

    pub fn as_bytes(&self) -> &[u8; 8] {
        &self.id
    }
}

impl Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&hex::encode(self.id))
    }
}

#[derive(Debug, Error)]
pub enum SessionIdParseError {
    #[error("invalid id: {0}")]
    Id(#[from] hex::FromHexError),
}

impl FromStr for SessionId {
    type Err = SessionIdParseError;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut id = [0u8; 8];
        hex::decode_to_slice(s, &mut id)?;
        Ok(SessionId { id })
    }
}

/// An authenticated session, the result of [`crate::Client::login`].
#[derive(Debug, Clone)]
pub struct Session {
    session_id: SessionId,
    challenge: Challenge,
    endpoint: String,
    block_time: u32,
    language: String,
}

impl Session {
    pub fn new(
        session_id: SessionId,
        challenge: Challenge,
        endpoint: impl Into<String>,
        block_time: u32,
        language: impl Into<String>,
    ) -> Session {
        Session {
            session_id,
            challenge,
            endpoint: endpoint.into(),
            block_time,
            language: language.into(),
        }
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }
    /// Challenge the session was obtained with
    pub fn challenge(&self) -> &Challenge {
        &self.challenge
    }
    /// Example: `http://fritz.box`
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
    pub fn block_time(&self) -> u32 {
        self.block_time
    }
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Example: `session.url("/data.lua")` produces `{endpoint}/data.lua`
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.endpoint.trim_end_matches('/'), path)
    }
}

impl Display for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.session_id, f)
    }
}
