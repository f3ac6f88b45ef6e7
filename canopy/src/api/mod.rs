//! Typed client for the Canopy dashboard REST API

pub mod client;
pub mod common;
pub mod devices;
pub mod error;
pub mod networks;
pub mod organizations;
pub mod sensor;
pub mod switch;
pub mod wireless;

pub use client::Client;
pub use common::ApiQueryParams;
pub use error::ApiError;
