//! This module wraps the [`rcon`] crate's client
//! in the [`Connector`]/[`RemoteConsole`] interface.

use async_trait::async_trait;
use log::debug;
use rcon::Connection;
use tokio::net::TcpStream;

use crate::console::{ConsoleError, Connector, RemoteConsole};

/// Port Factorio listens on for RCON unless
/// `--rcon-port` says otherwise in the server config.
pub const DEFAULT_PORT: u16 = 27015;

impl From<rcon::Error> for ConsoleError {
    fn from(err: rcon::Error) -> Self {
        match err {
            rcon::Error::Auth => ConsoleError::AuthRejected,
            rcon::Error::Io(err) => ConsoleError::Io(err),
            other => ConsoleError::Protocol(other.to_string()),
        }
    }
}

/// Builder for an RCON connection.
pub struct ConnectionConfig {
    factorio_quirks: bool,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self::build()
    }
}

impl ConnectionConfig {
    /// Initiates the connection build process.
    /// Factorio quirks are enabled by default.
    pub fn build() -> Self {
        ConnectionConfig {
            factorio_quirks: true,
        }
    }

    /// Toggles the client library's workarounds for
    /// Factorio's handling of multi-packet responses.
    /// Turn this off to talk to a plain Source RCON
    /// server.
    pub fn with_factorio_quirks(mut self, enabled: bool) -> Self {
        self.factorio_quirks = enabled;
        self
    }
}

#[async_trait]
impl Connector for ConnectionConfig {
    type Console = RconConsole;

    async fn connect(
        &self,
        host: &str,
        port: u16,
        password: &str,
    ) -> Result<RconConsole, ConsoleError> {
        let address = format!("{}:{}", host, port);
        debug!("connecting to {}", address);

        let connection = <Connection<TcpStream>>::builder()
            .enable_factorio_quirks(self.factorio_quirks)
            .connect(address.as_str(), password)
            .await
            .map_err(|err| match err {
                rcon::Error::Io(source) => ConsoleError::FailedToConnect {
                    address: address.clone(),
                    source,
                },
                other => other.into(),
            })?;

        Ok(RconConsole {
            connection: Some(connection),
        })
    }
}

/// Wraps an authenticated RCON connection.
///
/// The socket is released by [`RemoteConsole::close`], or
/// when the console is dropped.
pub struct RconConsole {
    connection: Option<Connection<TcpStream>>,
}

#[async_trait]
impl RemoteConsole for RconConsole {
    async fn send(&mut self, command: &str) -> Result<String, ConsoleError> {
        let connection = self.connection.as_mut().ok_or(ConsoleError::Closed)?;
        Ok(connection.cmd(command).await?)
    }

    fn close(&mut self) {
        if self.connection.take().is_some() {
            debug!("closed remote console session");
        }
    }
}
