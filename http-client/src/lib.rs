//! HTTP client shared by the berth plan source, the OAuth token request and SOAP delivery.
//!
//! Requests are traced and non-success responses are turned into [`Error::FailedRequest`] so
//! callers only ever see successful responses.

mod client;
mod error;
mod request;
mod response;

pub use reqwest::StatusCode;

pub use client::{HttpClient, HttpClientBuilder};
pub use error::{Error, Result};
pub use request::RequestBuilder;
pub use response::Response;
