use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A validated lookup: trimmed location plus the date text exactly as entered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub location: String,
    pub date: String,
}

/// Body of `GET /forecast`.
///
/// The first five fields are required; a body missing one of them fails to decode.
/// The optional ones stay `None` when absent and are never serialized back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub city: String,
    pub country: String,
    pub date: NaiveDate,
    pub description: String,
    pub temperature_c: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feels_like_c: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub humidity_percent: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind_speed_mps: Option<f64>,
    /// Probability in `0.0..=1.0`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precipitation_probability: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Outfit {
    #[serde(default)]
    pub top: Vec<String>,
    #[serde(default)]
    pub bottom: Vec<String>,
    #[serde(default)]
    pub shoes: Vec<String>,
    #[serde(default)]
    pub outerwear: Vec<String>,
    #[serde(default)]
    pub accessories: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Activities {
    #[serde(default)]
    pub outdoor: Vec<String>,
    #[serde(default)]
    pub indoor: Vec<String>,
}

/// Body of `GET /recommend`. `summary`, `outfit` and `activities` are required;
/// the lists inside them default to empty.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Recommendation {
    pub summary: String,
    pub outfit: Outfit,
    pub activities: Activities,
    #[serde(default)]
    pub warnings: Vec<String>,
    #[serde(default)]
    pub tips: Vec<String>,
}

/// A success response: the decoded body, or the marker for a body that was not
/// JSON at all. The latter is shown with every field omitted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Payload<T> {
    Parsed(T),
    Unreadable,
}

impl<T> Payload<T> {
    pub fn parsed(&self) -> Option<&T> {
        match self {
            Payload::Parsed(value) => Some(value),
            Payload::Unreadable => None,
        }
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    pub status: String,
}

/// Lifecycle of the current submission.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "lowercase")]
pub enum RequestStatus {
    #[default]
    Idle,
    Loading,
    Error(String),
    Success,
}

impl RequestStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestStatus::Loading)
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            RequestStatus::Error(msg) => Some(msg),
            _ => None,
        }
    }
}

/// Range checks applied after a body has decoded.
pub trait CheckedPayload {
    fn check(&self) -> Result<(), String>;
}

impl CheckedPayload for Forecast {
    fn check(&self) -> Result<(), String> {
        if let Some(h) = self.humidity_percent.filter(|h| *h > 100) {
            return Err(format!("humidity_percent out of range: {h}"));
        }
        if let Some(p) = self.precipitation_probability.filter(|p| !(0.0..=1.0).contains(p)) {
            return Err(format!("precipitation_probability out of range: {p}"));
        }
        Ok(())
    }
}

impl CheckedPayload for Recommendation {
    fn check(&self) -> Result<(), String> {
        Ok(())
    }
}

impl CheckedPayload for Health {
    fn check(&self) -> Result<(), String> {
        Ok(())
    }
}
