#![deny(rust_2018_idioms)]

//! Domain logic for converting terminal berth plans into the planning system's XML schema.
//!
//! Bollard references are mapped onto linear quay coordinates by [`BerthMetricCalculator`] and
//! every planned vessel call is rendered by [`BerthPlanXmlBuilder`]. Everything in this crate is a
//! pure, synchronous transform, fetching and delivering documents is left to the caller.

mod agency;
mod berth_plan_xml;
mod berth_record;
mod bollard;
mod date_format;
mod deserialize_utils;
mod error;
mod etc;
mod metrics;
mod xml_writer;

pub use agency::*;
pub use berth_plan_xml::*;
pub use berth_record::*;
pub use bollard::*;
pub use date_format::*;
pub use error::*;
pub use etc::*;
pub use metrics::*;
