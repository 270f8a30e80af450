//! Report orchestration
//!
//! Single coordination point between the UI-selected report type /
//! window and the aggregation engine. The orchestrator owns all
//! mutable report state; the row collections change only through
//! [`ReportOrchestrator::generate_report`] and
//! [`ReportOrchestrator::load_selected_meeting_attendance`].

use std::path::Path;

use chrono::NaiveDate;

use crate::error::{Error, Result};
use crate::models::{
    AttendanceRow, CancelledRow, ParticipantRow, ReportRows, ReportType, SummaryRow,
};
use crate::services::aggregate::AggregationEngine;
use crate::services::document;
use crate::services::excel::ExcelReportGenerator;
use crate::services::join::JoinStrategy;
use crate::services::source::ReportSource;
use crate::window::{DateWindow, NavDirection};

enum Projection {
    Summary(Vec<SummaryRow>),
    Attendance(Vec<AttendanceRow>),
    Cancelled(Vec<CancelledRow>),
    None,
}

/// Drives fetch + aggregation + error/loading state for the Reports
/// feature
pub struct ReportOrchestrator<S: ReportSource> {
    engine: AggregationEngine<S>,
    report_type: ReportType,
    window: DateWindow,
    loading: bool,
    last_error: Option<String>,
    summary_rows: Vec<SummaryRow>,
    attendance_rows: Vec<AttendanceRow>,
    cancelled_rows: Vec<CancelledRow>,
    selected_meeting_id: Option<String>,
    selected_meeting_members: Vec<ParticipantRow>,
    // Which projection was generated last; exports serialize this one.
    active: Option<ReportType>,
}

impl<S: ReportSource> ReportOrchestrator<S> {
    pub fn new(source: S) -> Self {
        Self::with_strategy(source, JoinStrategy::default())
    }

    pub fn with_strategy(source: S, strategy: JoinStrategy) -> Self {
        Self {
            engine: AggregationEngine::with_strategy(source, strategy),
            report_type: ReportType::default(),
            window: DateWindow::current(),
            loading: false,
            last_error: None,
            summary_rows: Vec::new(),
            attendance_rows: Vec::new(),
            cancelled_rows: Vec::new(),
            selected_meeting_id: None,
            selected_meeting_members: Vec::new(),
            active: None,
        }
    }

    pub fn report_type(&self) -> ReportType {
        self.report_type
    }

    pub fn set_report_type(&mut self, report_type: ReportType) {
        self.report_type = report_type;
    }

    pub fn window(&self) -> &DateWindow {
        &self.window
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn summary_rows(&self) -> &[SummaryRow] {
        &self.summary_rows
    }

    pub fn attendance_rows(&self) -> &[AttendanceRow] {
        &self.attendance_rows
    }

    pub fn cancelled_rows(&self) -> &[CancelledRow] {
        &self.cancelled_rows
    }

    pub fn selected_meeting_id(&self) -> Option<&str> {
        self.selected_meeting_id.as_deref()
    }

    pub fn selected_meeting_members(&self) -> &[ParticipantRow] {
        &self.selected_meeting_members
    }

    /// Select a summary row for the single-meeting report
    pub fn select_meeting(&mut self, meeting_id: impl Into<String>) {
        self.selected_meeting_id = Some(meeting_id.into());
    }

    pub fn clear_selection(&mut self) {
        self.selected_meeting_id = None;
        self.selected_meeting_members.clear();
    }

    pub fn navigate_week(&mut self, direction: NavDirection) {
        self.window = self.window.navigate(direction);
    }

    pub fn go_to_current_week(&mut self) {
        self.window = DateWindow::current();
    }

    /// Manual edit of the "From" date; the window stays a full week
    pub fn set_window_start(&mut self, from: NaiveDate) {
        self.window = DateWindow::for_start(from);
    }

    /// Generate the report for the current type and window.
    ///
    /// A call made while one is already in flight is ignored, so
    /// overlapping aggregations can never interleave writes to the row
    /// collections. On failure the previous rows are left untouched and
    /// the error is mirrored into `last_error` for banner-style UIs.
    pub async fn generate_report(&mut self) -> Result<()> {
        if self.loading {
            log::debug!("generate_report ignored: a report is already in flight");
            return Ok(());
        }
        if !self.window.is_valid() {
            let err = Error::validation(format!(
                "Invalid date range: {} is after {}",
                self.window.from, self.window.to
            ));
            self.last_error = Some(err.to_string());
            return Err(err);
        }

        self.loading = true;
        let window = self.window;
        let outcome = match self.report_type {
            ReportType::Summary => self
                .engine
                .build_summary(&window)
                .await
                .map(Projection::Summary),
            ReportType::Attendance => self
                .engine
                .build_attendance(&window)
                .await
                .map(Projection::Attendance),
            ReportType::Cancelled => self
                .engine
                .build_cancelled(&window)
                .await
                .map(Projection::Cancelled),
            // The export tab has no aggregation of its own; it reuses
            // whichever projection was generated last.
            ReportType::Export => Ok(Projection::None),
        };
        self.loading = false;

        match outcome {
            Ok(Projection::Summary(rows)) => {
                self.summary_rows = rows;
                self.active = Some(ReportType::Summary);
                self.last_error = None;
                Ok(())
            }
            Ok(Projection::Attendance(rows)) => {
                self.attendance_rows = rows;
                self.active = Some(ReportType::Attendance);
                self.last_error = None;
                Ok(())
            }
            Ok(Projection::Cancelled(rows)) => {
                self.cancelled_rows = rows;
                self.active = Some(ReportType::Cancelled);
                self.last_error = None;
                Ok(())
            }
            Ok(Projection::None) => {
                self.last_error = None;
                Ok(())
            }
            Err(err) => {
                self.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Load the participant list for the selected meeting
    pub async fn load_selected_meeting_attendance(&mut self) -> Result<()> {
        if self.loading {
            log::debug!("meeting attendance load ignored: a report is already in flight");
            return Ok(());
        }
        let meeting_id = match &self.selected_meeting_id {
            Some(id) => id.clone(),
            None => {
                let err = Error::validation("No meeting selected");
                self.last_error = Some(err.to_string());
                return Err(err);
            }
        };

        self.loading = true;
        let result = self.engine.meeting_participants(&meeting_id).await;
        self.loading = false;

        match result {
            Ok(rows) => {
                self.selected_meeting_members = rows;
                self.last_error = None;
                Ok(())
            }
            Err(err) => {
                self.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// The projection the exporters serialize: the last generated one,
    /// falling back to the currently selected report type.
    pub fn active_rows(&self) -> ReportRows<'_> {
        let kind = self.active.unwrap_or(self.report_type);
        match kind {
            ReportType::Summary | ReportType::Export => ReportRows::Summary(&self.summary_rows),
            ReportType::Attendance => ReportRows::Attendance(&self.attendance_rows),
            ReportType::Cancelled => ReportRows::Cancelled(&self.cancelled_rows),
        }
    }

    /// Write the active projection as an .xlsx workbook
    pub fn export_excel<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut generator = ExcelReportGenerator::new()?;
        generator.add_report(&self.active_rows())?;
        generator.save(path)
    }

    /// Write the active projection as a print-ready document
    pub fn export_document<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        document::save_report(&self.active_rows(), &self.window, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Duration;

    use crate::models::{DashboardOverview, Meeting, MeetingStatus, ParticipationRecord, StaffMember};

    struct StubSource {
        meetings: Vec<Meeting>,
        fail_meetings: bool,
    }

    fn meeting(id: &str, date: NaiveDate) -> Meeting {
        Meeting {
            id: id.to_string(),
            title: format!("Meeting {}", id),
            date: Some(date),
            time: None,
            duration: "1h".to_string(),
            status: MeetingStatus::Scheduled,
            cancellation_reason: "No reason provided".to_string(),
            cancelled_by: "Unknown".to_string(),
            participant_count: 2,
        }
    }

    #[async_trait]
    impl ReportSource for StubSource {
        async fn meetings_in_window(&self, window: &DateWindow) -> Result<Vec<Meeting>> {
            if self.fail_meetings {
                return Err(Error::api(500, "meetings unavailable"));
            }
            Ok(self
                .meetings
                .iter()
                .filter(|m| m.date.map(|d| window.contains(d)).unwrap_or(false))
                .cloned()
                .collect())
        }

        async fn all_staff(&self) -> Result<Vec<StaffMember>> {
            Ok(Vec::new())
        }

        async fn meeting_participation(&self, _: &str) -> Result<Vec<ParticipationRecord>> {
            Ok(Vec::new())
        }

        async fn dashboard_overview(&self) -> Result<DashboardOverview> {
            Ok(DashboardOverview::default())
        }
    }

    fn orchestrator_with(meetings: Vec<Meeting>) -> ReportOrchestrator<StubSource> {
        ReportOrchestrator::new(StubSource {
            meetings,
            fail_meetings: false,
        })
    }

    #[tokio::test]
    async fn test_generate_summary_populates_rows() {
        let mut orchestrator = orchestrator_with(vec![meeting("m1", DateWindow::current().from)]);
        orchestrator.generate_report().await.unwrap();
        assert_eq!(orchestrator.summary_rows().len(), 1);
        assert!(orchestrator.last_error().is_none());
        assert!(!orchestrator.is_loading());
    }

    #[tokio::test]
    async fn test_generate_ignored_while_loading() {
        let mut orchestrator = orchestrator_with(vec![meeting("m1", DateWindow::current().from)]);
        orchestrator.loading = true;
        orchestrator.generate_report().await.unwrap();
        // Ignored: no rows were written and the in-flight flag stands
        assert!(orchestrator.summary_rows().is_empty());
        assert!(orchestrator.is_loading());
    }

    #[tokio::test]
    async fn test_invalid_window_is_a_validation_error() {
        let mut orchestrator = orchestrator_with(Vec::new());
        let from = orchestrator.window.from;
        orchestrator.window = DateWindow {
            from,
            to: from - Duration::days(1),
            week_offset: 0,
        };
        let err = orchestrator.generate_report().await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(orchestrator.last_error().unwrap().contains("Validation"));
    }

    #[tokio::test]
    async fn test_fatal_fetch_keeps_prior_rows() {
        let mut orchestrator = orchestrator_with(vec![meeting("m1", DateWindow::current().from)]);
        orchestrator.generate_report().await.unwrap();
        assert_eq!(orchestrator.summary_rows().len(), 1);

        orchestrator.engine = AggregationEngine::new(StubSource {
            meetings: Vec::new(),
            fail_meetings: true,
        });
        let err = orchestrator.generate_report().await.unwrap_err();
        assert!(matches!(err, Error::Api { .. }));
        // Prior rows survive the failed regeneration
        assert_eq!(orchestrator.summary_rows().len(), 1);
        assert!(orchestrator.last_error().is_some());
        assert!(!orchestrator.is_loading());
    }

    #[tokio::test]
    async fn test_load_attendance_without_selection() {
        let mut orchestrator = orchestrator_with(Vec::new());
        let err = orchestrator
            .load_selected_meeting_attendance()
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[tokio::test]
    async fn test_export_tab_generates_nothing() {
        let mut orchestrator = orchestrator_with(vec![meeting("m1", DateWindow::current().from)]);
        orchestrator.set_report_type(ReportType::Export);
        orchestrator.generate_report().await.unwrap();
        assert!(orchestrator.summary_rows().is_empty());
        assert_eq!(orchestrator.active_rows().kind(), ReportType::Summary);
    }

    #[test]
    fn test_window_navigation_round_trip() {
        let mut orchestrator = orchestrator_with(Vec::new());
        let original = *orchestrator.window();
        orchestrator.navigate_week(NavDirection::Next);
        orchestrator.navigate_week(NavDirection::Prev);
        assert_eq!(*orchestrator.window(), original);
        assert_eq!(orchestrator.window().week_offset, 0);
    }
}
