use std::{panic::Location as StdLocation, path::PathBuf};

use berthplan_core::XmlGenerationError;
use snafu::{Location, Snafu};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Snafu)]
#[snafu(module, visibility(pub))]
pub enum Error {
    #[snafu(display("HTTP request failed"))]
    Http {
        #[snafu(implicit)]
        location: Location,
        #[snafu(source)]
        error: http_client::Error,
    },
    #[snafu(display("Failed to connect to the ETC database at '{address}'"))]
    Connect {
        #[snafu(implicit)]
        location: Location,
        address: String,
        #[snafu(source)]
        error: std::io::Error,
    },
    #[snafu(display("ETC database query failed"))]
    Database {
        #[snafu(implicit)]
        location: Location,
        #[snafu(source)]
        error: tiberius::error::Error,
    },
    #[snafu(display("Archive operation failed on '{}'", path.display()))]
    Archive {
        #[snafu(implicit)]
        location: Location,
        path: PathBuf,
        #[snafu(source)]
        error: std::io::Error,
    },
    #[snafu(display("Failed to generate xml document"))]
    XmlGeneration {
        #[snafu(implicit)]
        location: Location,
        source: XmlGenerationError,
    },
}

impl From<http_client::Error> for Error {
    #[track_caller]
    fn from(error: http_client::Error) -> Self {
        let location = StdLocation::caller();
        Self::Http {
            location: Location::new(location.file(), location.line(), location.column()),
            error,
        }
    }
}
