use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] geosave_core::Error),
    #[error(transparent)]
    Api(#[from] geosave_core::api::ApiError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Authentication error: {0}")]
    Auth(String),
    #[error("Destination error: {0}")]
    Destination(String),
    #[error("Session cookie cannot be empty")]
    EmptyCookie,
    #[error(
        "Not logged in. Run `geosave auth login --cookie <_ncfa value>` or set GEOSAVE_NCFA."
    )]
    NotAuthenticated,
    #[error("No destination folder configured. Pass --dir or run `geosave config init --destination <PATH>`.")]
    NoDestination,
}
