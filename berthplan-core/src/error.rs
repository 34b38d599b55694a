use snafu::{Location, Snafu};
use std::num::ParseIntError;

#[derive(Debug, Snafu)]
#[snafu(module, visibility(pub))]
pub enum BollardError {
    #[snafu(display("Unknown bollard '{bollard}'"))]
    UnknownBollard {
        #[snafu(implicit)]
        location: Location,
        bollard: String,
    },
    #[snafu(display("Invalid sub-offset '{sub_offset}' in bollard reference '{reference}'"))]
    InvalidSubOffset {
        #[snafu(implicit)]
        location: Location,
        reference: String,
        sub_offset: String,
        #[snafu(source)]
        error: ParseIntError,
    },
    #[snafu(display("Sub-offset '{sub_offset}' in bollard reference '{reference}' is out of range"))]
    SubOffsetOverflow {
        #[snafu(implicit)]
        location: Location,
        reference: String,
        sub_offset: String,
    },
}

#[derive(Debug, Snafu)]
#[snafu(module, visibility(pub))]
pub enum XmlGenerationError {
    #[snafu(display("Failed to compute berth metrics for record {index}, voyage '{voyage}'"))]
    Metrics {
        #[snafu(implicit)]
        location: Location,
        index: usize,
        voyage: String,
        source: BollardError,
    },
    #[snafu(display("Failed to write xml document"))]
    Write {
        #[snafu(implicit)]
        location: Location,
        #[snafu(source)]
        error: std::fmt::Error,
    },
}
