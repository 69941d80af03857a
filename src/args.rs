//! Command line handling for the two front ends.
//!
//! Both take `<host> <port> <password>` positionally.
//! [`Mode::EnvFallback`] lets the password come from
//! `FACTORIO_RCON_PASSWORD` instead and ignores any
//! trailing arguments, [`Mode::Strict`] wants exactly
//! three arguments.

use std::ffi::OsString;

use structopt::clap::AppSettings;
use structopt::StructOpt;
use thiserror::Error;

/// Environment variable consulted for the password in
/// [`Mode::EnvFallback`].
pub const PASSWORD_ENV: &str = "FACTORIO_RCON_PASSWORD";

#[derive(Error, Debug)]
pub enum ArgsError {
    #[error("usage: {0}")]
    Usage(String),

    #[error("host is empty")]
    MissingHost,

    #[error("invalid port \"{0}\"")]
    InvalidPort(String),

    #[error("no password given and {} is unset or empty", PASSWORD_ENV)]
    MissingPassword,
}

impl From<structopt::clap::Error> for ArgsError {
    fn from(err: structopt::clap::Error) -> Self {
        ArgsError::Usage(err.message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// `<host> <port> [password]`, password falling back
    /// to the environment.
    EnvFallback,

    /// `<host> <port> <password>`, nothing else.
    Strict,
}

/// Where to connect and how to authenticate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub host: String,
    pub port: u16,
    pub password: String,
}

#[derive(Debug, StructOpt)]
#[structopt(
    name = "factorio-online",
    settings = &[
        AppSettings::AllowLeadingHyphen,
        AppSettings::StrictUtf8,
        AppSettings::DisableHelpFlags,
        AppSettings::DisableVersion,
    ]
)]
struct FallbackArgs {
    host: String,

    port: String,

    password: Option<String>,

    /// Absorbs anything after the password, which is ignored.
    #[structopt(hidden = true)]
    #[allow(dead_code)]
    rest: Vec<String>,
}

#[derive(Debug, StructOpt)]
#[structopt(
    name = "factorio-online-strict",
    settings = &[
        AppSettings::AllowLeadingHyphen,
        AppSettings::StrictUtf8,
        AppSettings::DisableHelpFlags,
        AppSettings::DisableVersion,
    ]
)]
struct StrictArgs {
    host: String,

    port: String,

    password: String,
}

impl Mode {
    /// Parses `args` (program name first) into a
    /// [`Target`]. `env` looks up environment variables
    /// and is only consulted in [`Mode::EnvFallback`].
    pub fn parse<I, T, F>(self, args: I, env: F) -> Result<Target, ArgsError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
        F: FnOnce(&str) -> Option<String>,
    {
        match self {
            Mode::EnvFallback => {
                let args = FallbackArgs::from_iter_safe(args)?;
                let password = args
                    .password
                    .filter(|password| !password.is_empty())
                    .or_else(|| env(PASSWORD_ENV));
                Target::new(args.host, &args.port, password)
            }
            Mode::Strict => {
                let args = StrictArgs::from_iter_safe(args)?;
                Target::new(args.host, &args.port, Some(args.password))
            }
        }
    }
}

impl Target {
    fn new(host: String, port: &str, password: Option<String>) -> Result<Self, ArgsError> {
        if host.is_empty() {
            return Err(ArgsError::MissingHost);
        }

        let password = match password {
            Some(password) if !password.is_empty() => password,
            _ => return Err(ArgsError::MissingPassword),
        };

        let port = port
            .trim()
            .parse()
            .map_err(|_| ArgsError::InvalidPort(port.to_string()))?;

        Ok(Target {
            host,
            port,
            password,
        })
    }
}
