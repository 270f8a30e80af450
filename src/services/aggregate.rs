//! Report aggregation
//!
//! Joins meetings, staff, and participation records into the three
//! report projections, plus the single-meeting participant view. All
//! projections are pure functions of the fetched data: the same window
//! over unchanged backing data yields identical rows.

use std::collections::{HashMap, HashSet};

use crate::error::Result;
use crate::models::{
    AttendanceRow, CancelledRow, MeetingStatus, ParticipantRow, SummaryRow,
};
use crate::services::join::{fetch_participation, JoinStrategy};
use crate::services::source::ReportSource;
use crate::window::DateWindow;

/// Per-staff tallies accumulated over the window cross-product
#[derive(Debug, Default, Clone, Copy)]
struct Tally {
    total: u32,
    attended: u32,
}

/// Builds report projections from a [`ReportSource`]
pub struct AggregationEngine<S> {
    source: S,
    strategy: JoinStrategy,
}

impl<S: ReportSource> AggregationEngine<S> {
    pub fn new(source: S) -> Self {
        Self::with_strategy(source, JoinStrategy::default())
    }

    pub fn with_strategy(source: S, strategy: JoinStrategy) -> Self {
        Self { source, strategy }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Meeting Summary: one row per meeting in the window, fetch order
    pub async fn build_summary(&self, window: &DateWindow) -> Result<Vec<SummaryRow>> {
        let meetings = self.source.meetings_in_window(window).await?;
        Ok(meetings.iter().map(SummaryRow::from_meeting).collect())
    }

    /// Attendance: per-staff totals across every meeting in the window.
    ///
    /// Meeting-list and staff-list failures abort the report; a single
    /// meeting's participation failure only removes that meeting from
    /// the totals. Staff who appear in no meeting are excluded rather
    /// than shown as 0%.
    pub async fn build_attendance(&self, window: &DateWindow) -> Result<Vec<AttendanceRow>> {
        let meetings = self.source.meetings_in_window(window).await?;
        let staff = self.source.all_staff().await?;
        if meetings.is_empty() || staff.is_empty() {
            return Ok(Vec::new());
        }

        let known: HashSet<&str> = staff.iter().map(|member| member.id.as_str()).collect();
        let lists = fetch_participation(&self.source, &meetings, self.strategy).await;

        let mut tallies: HashMap<&str, Tally> = HashMap::new();
        for (_meeting_id, records) in &lists {
            // Uniqueness of (meeting, staff) is assumed, not enforced:
            // only the first record per staff member counts here.
            let mut seen: HashSet<&str> = HashSet::new();
            for record in records {
                let staff_id = record.staff_id.as_str();
                if !known.contains(staff_id) || !seen.insert(staff_id) {
                    continue;
                }
                let tally = tallies.entry(staff_id).or_default();
                tally.total += 1;
                if record.is_present {
                    tally.attended += 1;
                }
            }
        }

        Ok(staff
            .iter()
            .filter_map(|member| {
                tallies
                    .get(member.id.as_str())
                    .map(|tally| AttendanceRow::new(member.name.clone(), tally.total, tally.attended))
            })
            .collect())
    }

    /// Cancelled meetings in the window
    pub async fn build_cancelled(&self, window: &DateWindow) -> Result<Vec<CancelledRow>> {
        let meetings = self.source.meetings_in_window(window).await?;
        Ok(meetings
            .iter()
            .filter(|meeting| meeting.status == MeetingStatus::Cancelled)
            .map(CancelledRow::from_meeting)
            .collect())
    }

    /// Participant list for one selected meeting: the one-meeting case
    /// of the attendance join, kept in the same projection shape.
    pub async fn meeting_participants(&self, meeting_id: &str) -> Result<Vec<ParticipantRow>> {
        let records = self.source.meeting_participation(meeting_id).await?;
        Ok(records.iter().map(ParticipantRow::from_record).collect())
    }
}
