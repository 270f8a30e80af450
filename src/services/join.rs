//! Participation join strategies
//!
//! `build_attendance` needs one participation list per meeting in the
//! window. The baseline fetches them one at a time, matching the
//! portal's simple remote contract; the bounded variant fans out up to
//! `limit` requests with identical output semantics.

use std::collections::HashMap;

use futures::{stream, StreamExt};

use crate::models::{Meeting, ParticipationRecord};
use crate::services::source::ReportSource;

/// How per-meeting participation lists are fetched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinStrategy {
    /// One request at a time, in meeting order
    Sequential,
    /// Up to `limit` requests in flight at once
    Concurrent { limit: usize },
}

impl Default for JoinStrategy {
    fn default() -> Self {
        JoinStrategy::Sequential
    }
}

/// Fetch participation for every meeting, tolerating per-meeting
/// failures.
///
/// A failed fetch contributes an empty list, so that meeting drops out
/// of every staff member's totals without aborting the aggregation.
/// Output order always follows `meetings` regardless of completion
/// order, so the two strategies produce identical aggregates.
pub async fn fetch_participation<S: ReportSource>(
    source: &S,
    meetings: &[Meeting],
    strategy: JoinStrategy,
) -> Vec<(String, Vec<ParticipationRecord>)> {
    match strategy {
        JoinStrategy::Sequential => {
            let mut lists = Vec::with_capacity(meetings.len());
            for meeting in meetings {
                lists.push((meeting.id.clone(), fetch_one(source, &meeting.id).await));
            }
            lists
        }
        JoinStrategy::Concurrent { limit } => {
            let limit = limit.max(1);
            let mut by_id: HashMap<String, Vec<ParticipationRecord>> = stream::iter(meetings)
                .map(|meeting| async move {
                    (meeting.id.clone(), fetch_one(source, &meeting.id).await)
                })
                .buffer_unordered(limit)
                .collect()
                .await;
            meetings
                .iter()
                .map(|meeting| {
                    (
                        meeting.id.clone(),
                        by_id.remove(&meeting.id).unwrap_or_default(),
                    )
                })
                .collect()
        }
    }
}

async fn fetch_one<S: ReportSource>(source: &S, meeting_id: &str) -> Vec<ParticipationRecord> {
    match source.meeting_participation(meeting_id).await {
        Ok(records) => records,
        Err(err) => {
            log::warn!(
                "participation fetch failed for meeting {}: {}, treating as empty",
                meeting_id,
                err
            );
            Vec::new()
        }
    }
}
