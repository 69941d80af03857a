//! This module defines the narrow interface the
//! query needs from a remote console (RCON) client:
//! connect with a password, send one command, close.
//!
//! The wire protocol itself lives behind these traits,
//! see [`crate::connection`] for the implementation used
//! by the command line tools.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error("failed to connect to {address}")]
    FailedToConnect {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("error reading or writing data")]
    Io(#[from] std::io::Error),

    #[error("authentication rejected by server")]
    AuthRejected,

    #[error("remote console error: {0}")]
    Protocol(String),

    #[error("remote console session already closed")]
    Closed,
}

/// An authenticated remote console session.
///
/// Sessions are exclusively owned by one query and must
/// be closed once the query is done with them.
#[async_trait]
pub trait RemoteConsole: Send {
    /// Sends a single command and returns the server's
    /// textual response.
    async fn send(&mut self, command: &str) -> Result<String, ConsoleError>;

    /// Releases the session. Calling this more than once
    /// is a no-op.
    fn close(&mut self);
}

/// Opens [`RemoteConsole`] sessions.
#[async_trait]
pub trait Connector: Sync {
    type Console: RemoteConsole;

    async fn connect(
        &self,
        host: &str,
        port: u16,
        password: &str,
    ) -> Result<Self::Console, ConsoleError>;
}
