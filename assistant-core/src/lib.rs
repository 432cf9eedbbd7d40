//! Core library for the weather assistant client.
//!
//! This crate defines:
//! - Input validation for a city/date query
//! - The fetch orchestrator that issues the forecast and recommendation requests
//! - The HTTP client for the assistant backend
//! - Shared domain models and the card mapping used by front ends
//!
//! It is used by `assistant-cli`, but can also be reused by other front ends.

pub mod api;
pub mod config;
pub mod error;
pub mod input;
pub mod model;
pub mod orchestrator;
pub mod view;

pub use api::{AssistantApi, api_from_config, http::HttpApi};
pub use config::Config;
pub use error::ApiError;
pub use input::InputController;
pub use model::{Activities, Forecast, Health, Outfit, Payload, Query, Recommendation, RequestStatus};
pub use orchestrator::{FetchOrchestrator, Snapshot, StalePolicy, SubmitOutcome};
