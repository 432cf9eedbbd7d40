//! Turns a validated query into one pair of concurrent requests and a single
//! [`RequestStatus`].
//!
//! The orchestrator is the only writer of [`Snapshot`]. Renderers either read
//! [`FetchOrchestrator::snapshot`] or follow changes through
//! [`FetchOrchestrator::subscribe`].

use serde::{Deserialize, Serialize};
use std::{convert::TryFrom, sync::Arc};
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::{
    api::AssistantApi,
    input::InputController,
    model::{Forecast, Payload, Recommendation, RequestStatus},
};

/// What happens to a response pair that completes after a newer submission began.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StalePolicy {
    /// Every completion lands in the state, newest submission or not.
    #[default]
    Apply,
    /// Only the latest submission may update the state.
    Discard,
}

impl StalePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            StalePolicy::Apply => "apply",
            StalePolicy::Discard => "discard",
        }
    }

    pub const fn all() -> &'static [StalePolicy] {
        &[StalePolicy::Apply, StalePolicy::Discard]
    }
}

impl std::fmt::Display for StalePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for StalePolicy {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "apply" => Ok(StalePolicy::Apply),
            "discard" => Ok(StalePolicy::Discard),
            _ => Err(anyhow::anyhow!(
                "Unknown stale policy '{value}'. Supported policies: apply, discard."
            )),
        }
    }
}

/// Everything a renderer needs.
///
/// `forecast` and `recommendation` are set and cleared together.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Snapshot {
    pub status: RequestStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forecast: Option<Payload<Forecast>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<Payload<Recommendation>>,
    /// Sequence number of the latest submission; 0 before the first one.
    pub sequence: u64,
}

/// Result of one call to [`FetchOrchestrator::submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Input did not allow submission; nothing was sent and nothing changed.
    Rejected,
    /// Both requests settled and the state now carries this status.
    Completed(RequestStatus),
    /// A newer submission started first, so this result was dropped.
    Discarded,
}

#[derive(Debug)]
pub struct FetchOrchestrator {
    api: Arc<dyn AssistantApi>,
    policy: StalePolicy,
    state: watch::Sender<Snapshot>,
}

impl FetchOrchestrator {
    pub fn new(api: Arc<dyn AssistantApi>, policy: StalePolicy) -> Self {
        let (state, _) = watch::channel(Snapshot::default());
        Self { api, policy, state }
    }

    pub fn policy(&self) -> StalePolicy {
        self.policy
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.state.subscribe()
    }

    /// Fetch forecast and recommendation for the current input.
    ///
    /// Both requests run concurrently and are joined all-or-nothing: the first
    /// failure becomes the error message and any partial result is dropped.
    pub async fn submit(&self, input: &InputController) -> SubmitOutcome {
        let Some(query) = input.query() else {
            debug!("submission not allowed, ignoring");
            return SubmitOutcome::Rejected;
        };

        let mut seq = 0;
        self.state.send_modify(|s| {
            s.sequence += 1;
            s.status = RequestStatus::Loading;
            seq = s.sequence;
        });
        debug!(seq, city = %query.location, date = %query.date, "submitting");

        let result = tokio::try_join!(self.api.forecast(&query), self.api.recommend(&query));

        let mut outcome = SubmitOutcome::Discarded;
        self.state.send_if_modified(|s| {
            if self.policy == StalePolicy::Discard && s.sequence != seq {
                return false;
            }

            match result {
                Ok((forecast, recommendation)) => {
                    s.status = RequestStatus::Success;
                    s.forecast = Some(forecast);
                    s.recommendation = Some(recommendation);
                }
                Err(err) => {
                    s.status = RequestStatus::Error(err.to_string());
                    s.forecast = None;
                    s.recommendation = None;
                }
            }
            outcome = SubmitOutcome::Completed(s.status.clone());
            true
        });

        match &outcome {
            SubmitOutcome::Discarded => warn!(seq, "dropping response for a superseded submission"),
            SubmitOutcome::Completed(status) => debug!(seq, ?status, "submission settled"),
            SubmitOutcome::Rejected => {}
        }

        outcome
    }
}
