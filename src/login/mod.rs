pub mod challenge;
pub use challenge::{Challenge, Response};

mod session;
pub use session::{Session, SessionId, SessionIdParseError, SessionInfo, SessionInfoParseError};
