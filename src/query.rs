//! This module runs the online player query: one
//! session, one `/players online` command, one pattern
//! match over the reply.

use std::fmt;
use std::ops::{Deref, DerefMut};
use std::process::ExitCode;

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;
use thiserror::Error;

use crate::args::{ArgsError, Target};
use crate::console::{ConsoleError, Connector, RemoteConsole};

/// Command asking the server who is online.
pub const PLAYERS_COMMAND: &str = "/players online";

/// Printed in place of a count when anything fails.
pub const FAILURE_SENTINEL: &str = "-1";

lazy_static! {
    static ref ONLINE_PLAYERS: Regex = Regex::new(r"Online players\s*\((\d+)\)").unwrap();
}

#[derive(Error, Debug)]
pub enum QueryError {
    #[error("invalid arguments")]
    Args(#[from] ArgsError),

    #[error("remote console failure")]
    Console(#[from] ConsoleError),

    #[error("no online player count in response: \"{0}\"")]
    UnexpectedResponse(String),
}

/// Number of online players, kept as the digit text
/// the server sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerCount(String);

impl PlayerCount {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Pulls the count out of a `/players online` reply,
/// e.g. `Online players (3):` followed by one line per
/// player.
pub fn parse_online_players(response: &str) -> Option<PlayerCount> {
    ONLINE_PLAYERS
        .captures(response)
        .and_then(|captures| captures.get(1))
        .map(|digits| PlayerCount(digits.as_str().to_string()))
}

/// Holds a console for the duration of a query and
/// closes it when dropped, whichever way the query
/// ends.
struct Session<C: RemoteConsole>(C);

impl<C: RemoteConsole> Deref for Session<C> {
    type Target = C;

    fn deref(&self) -> &C {
        &self.0
    }
}

impl<C: RemoteConsole> DerefMut for Session<C> {
    fn deref_mut(&mut self) -> &mut C {
        &mut self.0
    }
}

impl<C: RemoteConsole> Drop for Session<C> {
    fn drop(&mut self) {
        self.0.close();
    }
}

/// Connects to `target`, asks for the online players
/// and parses the count out of the reply.
///
/// The session is closed before this returns, on
/// success and on every error.
pub async fn query_online_players<C: Connector>(
    connector: &C,
    target: &Target,
) -> Result<PlayerCount, QueryError> {
    let console = connector
        .connect(&target.host, target.port, &target.password)
        .await?;

    let response = {
        let mut session = Session(console);
        session.send(PLAYERS_COMMAND).await?
    };

    parse_online_players(&response).ok_or(QueryError::UnexpectedResponse(response))
}

/// The only thing a caller of the command line tools
/// gets to see: a count, or a failure with no detail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Count(PlayerCount),
    Failure,
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Count(_))
    }

    /// 0 on success, 1 on any failure.
    pub fn code(&self) -> u8 {
        if self.is_success() {
            0
        } else {
            1
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.code())
    }
}

impl From<Result<PlayerCount, QueryError>> for Outcome {
    fn from(result: Result<PlayerCount, QueryError>) -> Self {
        match result {
            Ok(count) => Outcome::Count(count),
            Err(err) => {
                match std::error::Error::source(&err) {
                    Some(cause) => debug!("query failed: {}: {}", err, cause),
                    None => debug!("query failed: {}", err),
                }
                Outcome::Failure
            }
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Count(count) => write!(f, "{}", count),
            Outcome::Failure => f.write_str(FAILURE_SENTINEL),
        }
    }
}
