#![deny(rust_2018_idioms)]

//! Synchronises the terminal's berth plan and ETC data with the port community planning system.
//!
//! One run performs a single cycle: the ETC fragment is read from the terminal operating system's
//! database and delivered, then the berth plan is fetched from the terminal API, converted and
//! delivered. Every generated document is archived locally.

pub mod archive;
pub mod berth_plan_api;
pub mod error;
pub mod etc_database;
pub mod oauth;
pub mod ports;
pub mod settings;
pub mod soap;
pub mod startup;
