//! HTTP inbound adapter exposing the gateway's REST endpoints.

pub mod error;
pub mod health;
pub mod slack;
pub mod state;
pub mod tools;

pub use error::{ApiResult, json_config};
