use thiserror::Error;

use crate::data::ConnectionInfoError;
use crate::login::SessionInfoParseError;

/// Everything that can go wrong while talking to the FRITZ!Box.
#[derive(Debug, Error)]
pub enum Error {
    /// Network failure or a non 2XX response.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The response didn't have the expected shape.
    #[error("couldn't decode response: {0}")]
    Decode(#[from] DecodeError),
    /// The FRITZ!Box answered the login with the zero session id.
    ///
    /// Don't try again before `block_time` seconds have passed.
    #[error("failed to login, try again in {block_time} second(s)")]
    AuthenticationFailed { block_time: u32 },
    /// The FRITZ!Box didn't acknowledge a command.
    #[error("command `{command}` failed, response: {body:?}")]
    CommandFailed { command: &'static str, body: String },
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid session info: {0}")]
    SessionInfo(#[from] SessionInfoParseError),
    #[error("traffic statistics are empty")]
    EmptyStats,
    #[error("field `{0}` is missing")]
    MissingField(&'static str),
    #[error("invalid connection info: {0}")]
    ConnectionInfo(#[from] ConnectionInfoError),
}

macro_rules! impl_from_decode {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Error {
                fn from(err: $ty) -> Self {
                    Error::Decode(DecodeError::from(err))
                }
            }
        )*
    };
}

impl_from_decode!(serde_json::Error, SessionInfoParseError, ConnectionInfoError);

pub type Result<T> = std::result::Result<T, Error>;
