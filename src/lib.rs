//! Asks a Factorio server how many players are online,
//! over RCON.
//!
//! The command line tools print the count, or `-1` if
//! anything at all went wrong, and exit with 0 or 1
//! respectively:
//!
//! ```text
//! $ factorio-online factorio.example.com 27015 hunter2
//! 3
//! ```
//!
//! Library users can call [`query_online_players`] with
//! any [`Connector`] to get the typed error instead.

pub mod args;
pub mod connection;
pub mod console;
pub mod query;

use std::ffi::OsString;

use env_logger::Env;

pub use args::{ArgsError, Mode, Target};
pub use connection::{ConnectionConfig, RconConsole, DEFAULT_PORT};
pub use console::{ConsoleError, Connector, RemoteConsole};
pub use query::{parse_online_players, query_online_players, Outcome, PlayerCount, QueryError};

/// Sets up logging to stderr. Silent unless `RUST_LOG`
/// asks for something, so stdout stays a single line.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or("off")).try_init();
}

/// Parses `args` for `mode`, runs the query against
/// `connector` and flattens the result.
pub async fn run<I, T, F, C>(mode: Mode, args: I, env: F, connector: &C) -> Outcome
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    F: FnOnce(&str) -> Option<String>,
    C: Connector,
{
    let result = match mode.parse(args, env) {
        Ok(target) => query_online_players(connector, &target).await,
        Err(err) => Err(err.into()),
    };

    Outcome::from(result)
}
