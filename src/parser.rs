//! Boundary with the free-text trip parser.
//!
//! The parser itself (a language model behind some API) lives outside this
//! crate. It hands back a [`TripRequest`] or nothing; the store applies it.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::store::{ScheduleStore, StoreError};
use crate::types::TechnicianId;

/// Structured trip extracted from free text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripRequest {
    pub technician_name: String,
    pub start_date:      NaiveDate,
    pub end_date:        NaiveDate,
    #[serde(default)]
    pub destination:     Option<String>,
}

#[async_trait]
pub trait TripRequestParser: Send + Sync {
    /// Returns `None` when the text could not be understood
    async fn parse(&self, text: &str) -> Option<TripRequest>;
}

/// Decodes a parser's raw JSON answer. Malformed answers are logged and
/// reported as absent.
pub fn parse_trip_request_json(raw: &str) -> Option<TripRequest> {
    match serde_json::from_str(raw) {
        Ok(request) => Some(request),
        Err(err) => {
            error!(error = %err, "failed to decode trip request");
            None
        },
    }
}

/// What happened to a free-text request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestOutcome {
    /// The trip was added for this technician
    Applied(TechnicianId),
    /// Blank input, the parser was not called
    Ignored,
    /// The parser returned nothing
    NotUnderstood,
}

/// Runs `text` through `parser` and applies the result to `store`.
///
/// # Errors
/// Returns the `StoreError` of [`ScheduleStore::apply_trip_request`].
pub async fn ingest_trip_request<P>(
    store: &mut ScheduleStore,
    parser: &P,
    text: &str,
) -> Result<IngestOutcome, StoreError>
where
    P: TripRequestParser + ?Sized,
{
    let text = text.trim();
    if text.is_empty() {
        return Ok(IngestOutcome::Ignored);
    }

    let Some(request) = parser.parse(text).await else {
        warn!("trip request not understood");
        return Ok(IngestOutcome::NotUnderstood);
    };

    let id = store.apply_trip_request(&request)?;
    Ok(IngestOutcome::Applied(id))
}
