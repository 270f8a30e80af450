//! Data-access contract for the reporting core
//!
//! The reports are built from three remote collections (meetings,
//! staff, per-meeting participation) plus the ambient dashboard
//! counters. This trait is the only way the aggregation reaches them;
//! the production implementation is [`ApiClient`](super::api::ApiClient)
//! and tests substitute an in-memory source.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{DashboardOverview, Meeting, ParticipationRecord, StaffMember};
use crate::window::DateWindow;

/// Trait for the remote collections reports are built from
#[async_trait]
pub trait ReportSource: Send + Sync {
    /// Meetings whose date falls inside the window, both ends inclusive
    async fn meetings_in_window(&self, window: &DateWindow) -> Result<Vec<Meeting>>;

    /// Every staff member eligible to attend meetings
    async fn all_staff(&self) -> Result<Vec<StaffMember>>;

    /// Participation records for one meeting
    async fn meeting_participation(&self, meeting_id: &str) -> Result<Vec<ParticipationRecord>>;

    /// Ambient dashboard counters (informational, never aggregated)
    async fn dashboard_overview(&self) -> Result<DashboardOverview>;
}
