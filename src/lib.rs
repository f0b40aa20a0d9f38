//! Client for the (undocumented) web interface of the FRITZ!Box.
//!
//! ```no_run
//! # async fn run() -> fritzbox_client::Result<()> {
//! let client = fritzbox_client::Client::new("http://fritz.box")?;
//! let session = client.login("fritz3713", "password").await?;
//!
//! let status = client.status(&session).await?;
//! if let Some(internet) = status.internet {
//!     println!("online: {}, provider: {}", internet.online, internet.provider);
//! }
//!
//! let logs = client.logs(&session).await?;
//! for entry in logs.filter(2).iter() {
//!     println!("{}", entry);
//! }
//! # Ok(())
//! # }
//! ```

mod client;
pub use client::Client;

pub mod config;
pub use config::Config;

pub mod data;

mod error;
pub use error::{DecodeError, Error, Result};

pub mod login;
pub use login::{Challenge, Session, SessionId, SessionInfo};

pub mod logger;

mod xml;
