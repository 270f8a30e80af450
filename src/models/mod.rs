//! Data models for the reporting core
//!
//! Wire DTOs exactly as the portal REST API emits them, the normalized
//! entities the aggregation works on, and the derived report row
//! projections. Default values are filled once here, at the repository
//! boundary, so projection code never needs fallback checks.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Fallback title for meetings stored without one
pub const DEFAULT_MEETING_TITLE: &str = "Untitled Meeting";
/// Fallback reason for cancelled meetings stored without one
pub const DEFAULT_CANCEL_REASON: &str = "No reason provided";
/// Fallback canceller for cancelled meetings stored without one
pub const DEFAULT_CANCELLED_BY: &str = "Unknown";
/// Generic placeholder for absent display fields
pub const FIELD_NA: &str = "N/A";

/// Format a calendar day the way the portal UI does (M/D/YYYY, no
/// zero padding).
pub fn format_us_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(d) => d.format("%-m/%-d/%Y").to_string(),
        None => FIELD_NA.to_string(),
    }
}

// ── Wire DTOs ────────────────────────────────────────────────

/// Meeting record as returned by `GET /meetings`
///
/// The API emits two generations of field names for duration and
/// status; both are accepted.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingDto {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(alias = "title")]
    pub meeting_title: Option<String>,
    pub meeting_date: Option<DateTime<Utc>>,
    pub meeting_time: Option<DateTime<Utc>>,
    #[serde(alias = "duration")]
    pub meeting_duration: Option<String>,
    #[serde(alias = "status")]
    pub meeting_status: Option<String>,
    pub cancellation_reason: Option<String>,
    pub cancelled_by: Option<String>,
    pub participant_count: Option<u32>,
}

/// Staff record as returned by `GET /staff`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffDto {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(alias = "name")]
    pub staff_name: Option<String>,
    #[serde(alias = "email")]
    pub email_address: Option<String>,
    pub role: Option<String>,
}

/// The `staffId` field of a participation record: either a bare id or
/// the populated staff document.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum StaffRef {
    Embedded(StaffDto),
    Id(String),
}

/// Participation record as returned by `GET /meetings/{id}/members`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipationDto {
    pub staff_id: Option<StaffRef>,
    pub is_present: Option<bool>,
    pub role: Option<String>,
}

impl ParticipationDto {
    /// Normalize into a joinable record. Returns `None` when the record
    /// carries no staff link at all; such records cannot participate in
    /// the attendance join and are dropped by the caller.
    pub fn normalize(self) -> Option<ParticipationRecord> {
        let (staff_id, staff_name, staff_email, staff_role) = match self.staff_id? {
            StaffRef::Embedded(staff) => {
                (staff.id, staff.staff_name, staff.email_address, staff.role)
            }
            StaffRef::Id(id) => (id, None, None, None),
        };
        Some(ParticipationRecord {
            staff_id,
            staff_name,
            staff_email,
            role: self
                .role
                .or(staff_role)
                .filter(|r| !r.trim().is_empty())
                .unwrap_or_else(|| FIELD_NA.to_string()),
            is_present: self.is_present.unwrap_or(false),
        })
    }
}

// ── Normalized entities ──────────────────────────────────────

/// Lifecycle state of a meeting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MeetingStatus {
    #[default]
    Scheduled,
    Completed,
    Cancelled,
}

impl MeetingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MeetingStatus::Scheduled => "Scheduled",
            MeetingStatus::Completed => "Completed",
            MeetingStatus::Cancelled => "Cancelled",
        }
    }

    /// Parse a wire status string; unknown values fall back to
    /// `Scheduled`, matching how the portal stores new meetings.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "completed" => MeetingStatus::Completed,
            "cancelled" => MeetingStatus::Cancelled,
            _ => MeetingStatus::Scheduled,
        }
    }
}

/// A scheduled event, read-only to this core
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Meeting {
    pub id: String,
    pub title: String,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub duration: String,
    pub status: MeetingStatus,
    pub cancellation_reason: String,
    pub cancelled_by: String,
    pub participant_count: u32,
}

impl From<MeetingDto> for Meeting {
    fn from(dto: MeetingDto) -> Self {
        Self {
            id: dto.id,
            title: dto
                .meeting_title
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_MEETING_TITLE.to_string()),
            date: dto.meeting_date.map(|d| d.date_naive()),
            time: dto.meeting_time.map(|t| t.time()),
            duration: dto
                .meeting_duration
                .filter(|d| !d.trim().is_empty())
                .unwrap_or_else(|| FIELD_NA.to_string()),
            status: dto
                .meeting_status
                .as_deref()
                .map(MeetingStatus::parse)
                .unwrap_or_default(),
            cancellation_reason: dto
                .cancellation_reason
                .filter(|r| !r.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_CANCEL_REASON.to_string()),
            cancelled_by: dto
                .cancelled_by
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_CANCELLED_BY.to_string()),
            participant_count: dto.participant_count.unwrap_or(0),
        }
    }
}

/// A person eligible to attend meetings, read-only to this core
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StaffMember {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<StaffDto> for StaffMember {
    fn from(dto: StaffDto) -> Self {
        Self {
            id: dto.id,
            name: dto
                .staff_name
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| FIELD_NA.to_string()),
            email: dto.email_address.unwrap_or_default(),
        }
    }
}

/// One staff member's link to one meeting
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParticipationRecord {
    pub staff_id: String,
    pub staff_name: Option<String>,
    pub staff_email: Option<String>,
    pub role: String,
    pub is_present: bool,
}

/// Ambient dashboard counters from `GET /dashboard/overview`.
/// Informational only; never aggregated into reports.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardOverview {
    pub upcoming: u32,
    pub completed: u32,
    pub cancelled: u32,
    pub pending: u32,
}

// ── Report projections ───────────────────────────────────────

/// Which report the user selected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportType {
    #[default]
    Summary,
    Attendance,
    Cancelled,
    Export,
}

impl ReportType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportType::Summary => "summary",
            ReportType::Attendance => "attendance",
            ReportType::Cancelled => "cancelled",
            ReportType::Export => "export",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "attendance" => ReportType::Attendance,
            "cancelled" => ReportType::Cancelled,
            "export" => ReportType::Export,
            _ => ReportType::Summary,
        }
    }
}

/// One row of the Meeting Summary report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub meeting_id: String,
    pub meeting: String,
    pub date: String,
    pub participants: u32,
    pub duration: String,
    pub status: String,
}

impl SummaryRow {
    pub fn from_meeting(meeting: &Meeting) -> Self {
        Self {
            meeting_id: meeting.id.clone(),
            meeting: meeting.title.clone(),
            date: format_us_date(meeting.date),
            participants: meeting.participant_count,
            duration: meeting.duration.clone(),
            status: meeting.status.as_str().to_string(),
        }
    }
}

/// One row of the Attendance report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttendanceRow {
    pub name: String,
    pub total_meetings: u32,
    pub attended: u32,
    pub absent: u32,
    pub percentage: String,
}

impl AttendanceRow {
    /// Build a row from raw tallies. Only meaningful for staff who
    /// appeared in at least one meeting; callers exclude the rest.
    pub fn new(name: impl Into<String>, total_meetings: u32, attended: u32) -> Self {
        debug_assert!(total_meetings > 0);
        debug_assert!(attended <= total_meetings);
        let percent = ((attended as f64 / total_meetings as f64) * 100.0).round() as u32;
        Self {
            name: name.into(),
            total_meetings,
            attended,
            absent: total_meetings - attended,
            percentage: format!("{}%", percent),
        }
    }
}

/// One row of the Cancelled Meeting report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CancelledRow {
    pub meeting: String,
    pub scheduled_date: String,
    pub reason: String,
    pub cancelled_by: String,
}

impl CancelledRow {
    pub fn from_meeting(meeting: &Meeting) -> Self {
        Self {
            meeting: meeting.title.clone(),
            scheduled_date: format_us_date(meeting.date),
            reason: meeting.cancellation_reason.clone(),
            cancelled_by: meeting.cancelled_by.clone(),
        }
    }
}

/// One participant of a single selected meeting — the one-meeting case
/// of the attendance projection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParticipantRow {
    pub name: String,
    pub email: String,
    pub role: String,
    pub is_present: bool,
}

impl ParticipantRow {
    pub fn from_record(record: &ParticipationRecord) -> Self {
        Self {
            name: record
                .staff_name
                .clone()
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| FIELD_NA.to_string()),
            email: record
                .staff_email
                .clone()
                .filter(|e| !e.trim().is_empty())
                .unwrap_or_else(|| FIELD_NA.to_string()),
            role: record.role.clone(),
            is_present: record.is_present,
        }
    }

    pub fn attendance_label(&self) -> &'static str {
        if self.is_present {
            "Present"
        } else {
            "Absent"
        }
    }
}

/// The active projection handed to the exporters
#[derive(Debug, Clone, Copy)]
pub enum ReportRows<'a> {
    Summary(&'a [SummaryRow]),
    Attendance(&'a [AttendanceRow]),
    Cancelled(&'a [CancelledRow]),
}

impl ReportRows<'_> {
    pub fn kind(&self) -> ReportType {
        match self {
            ReportRows::Summary(_) => ReportType::Summary,
            ReportRows::Attendance(_) => ReportType::Attendance,
            ReportRows::Cancelled(_) => ReportType::Cancelled,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ReportRows::Summary(rows) => rows.len(),
            ReportRows::Attendance(rows) => rows.len(),
            ReportRows::Cancelled(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meeting_dto_current_field_names() {
        let json = r#"{
            "_id": "m1",
            "meetingTitle": "Quarterly Review",
            "meetingDate": "2025-10-08T00:00:00.000Z",
            "meetingTime": "2025-10-08T14:30:00.000Z",
            "meetingDuration": "1 hour",
            "meetingStatus": "Completed",
            "participantCount": 4
        }"#;
        let meeting: Meeting = serde_json::from_str::<MeetingDto>(json).unwrap().into();
        assert_eq!(meeting.id, "m1");
        assert_eq!(meeting.title, "Quarterly Review");
        assert_eq!(meeting.date, NaiveDate::from_ymd_opt(2025, 10, 8));
        assert_eq!(meeting.duration, "1 hour");
        assert_eq!(meeting.status, MeetingStatus::Completed);
        assert_eq!(meeting.participant_count, 4);
    }

    #[test]
    fn test_meeting_dto_legacy_field_names() {
        let json = r#"{
            "_id": "m2",
            "title": "Standup",
            "duration": "15m",
            "status": "Cancelled",
            "cancellationReason": "Venue unavailable",
            "cancelledBy": "Admin"
        }"#;
        let meeting: Meeting = serde_json::from_str::<MeetingDto>(json).unwrap().into();
        assert_eq!(meeting.title, "Standup");
        assert_eq!(meeting.duration, "15m");
        assert_eq!(meeting.status, MeetingStatus::Cancelled);
        assert_eq!(meeting.cancellation_reason, "Venue unavailable");
        assert_eq!(meeting.cancelled_by, "Admin");
    }

    #[test]
    fn test_meeting_defaults_filled_at_boundary() {
        let json = r#"{"_id": "m3"}"#;
        let meeting: Meeting = serde_json::from_str::<MeetingDto>(json).unwrap().into();
        assert_eq!(meeting.title, DEFAULT_MEETING_TITLE);
        assert_eq!(meeting.date, None);
        assert_eq!(meeting.duration, FIELD_NA);
        assert_eq!(meeting.status, MeetingStatus::Scheduled);
        assert_eq!(meeting.cancellation_reason, DEFAULT_CANCEL_REASON);
        assert_eq!(meeting.cancelled_by, DEFAULT_CANCELLED_BY);
        assert_eq!(meeting.participant_count, 0);
    }

    #[test]
    fn test_meeting_status_parse() {
        assert_eq!(MeetingStatus::parse("Completed"), MeetingStatus::Completed);
        assert_eq!(MeetingStatus::parse("cancelled"), MeetingStatus::Cancelled);
        assert_eq!(MeetingStatus::parse("Scheduled"), MeetingStatus::Scheduled);
        assert_eq!(MeetingStatus::parse("garbage"), MeetingStatus::Scheduled);
    }

    #[test]
    fn test_participation_with_embedded_staff() {
        let json = r#"{
            "staffId": {"_id": "s1", "staffName": "Alice", "emailAddress": "alice@example.com", "role": "Chair"},
            "isPresent": true
        }"#;
        let record = serde_json::from_str::<ParticipationDto>(json)
            .unwrap()
            .normalize()
            .unwrap();
        assert_eq!(record.staff_id, "s1");
        assert_eq!(record.staff_name.as_deref(), Some("Alice"));
        assert_eq!(record.role, "Chair");
        assert!(record.is_present);
    }

    #[test]
    fn test_participation_with_bare_staff_id() {
        let json = r#"{"staffId": "s2", "role": "Secretary", "isPresent": false}"#;
        let record = serde_json::from_str::<ParticipationDto>(json)
            .unwrap()
            .normalize()
            .unwrap();
        assert_eq!(record.staff_id, "s2");
        assert_eq!(record.staff_name, None);
        assert_eq!(record.role, "Secretary");
        assert!(!record.is_present);
    }

    #[test]
    fn test_participation_record_role_falls_back_to_staff_role() {
        let json = r#"{"staffId": {"_id": "s3", "staffName": "Bo", "role": "Member"}}"#;
        let record = serde_json::from_str::<ParticipationDto>(json)
            .unwrap()
            .normalize()
            .unwrap();
        assert_eq!(record.role, "Member");
        assert!(!record.is_present);
    }

    #[test]
    fn test_participation_without_staff_link_is_dropped() {
        let json = r#"{"isPresent": true}"#;
        let dto: ParticipationDto = serde_json::from_str(json).unwrap();
        assert!(dto.normalize().is_none());
    }

    #[test]
    fn test_attendance_row_arithmetic() {
        let row = AttendanceRow::new("Alice", 5, 3);
        assert_eq!(row.total_meetings, 5);
        assert_eq!(row.attended, 3);
        assert_eq!(row.absent, 2);
        assert_eq!(row.percentage, "60%");
    }

    #[test]
    fn test_attendance_row_percentage_rounds() {
        assert_eq!(AttendanceRow::new("A", 3, 1).percentage, "33%");
        assert_eq!(AttendanceRow::new("B", 3, 2).percentage, "67%");
        assert_eq!(AttendanceRow::new("C", 6, 6).percentage, "100%");
    }

    #[test]
    fn test_format_us_date() {
        assert_eq!(
            format_us_date(NaiveDate::from_ymd_opt(2025, 10, 8)),
            "10/8/2025"
        );
        assert_eq!(
            format_us_date(NaiveDate::from_ymd_opt(2025, 1, 15)),
            "1/15/2025"
        );
        assert_eq!(format_us_date(None), FIELD_NA);
    }

    #[test]
    fn test_report_type_round_trip() {
        for kind in [
            ReportType::Summary,
            ReportType::Attendance,
            ReportType::Cancelled,
            ReportType::Export,
        ] {
            assert_eq!(ReportType::parse(kind.as_str()), kind);
        }
        assert_eq!(ReportType::parse("unknown"), ReportType::Summary);
    }

    #[test]
    fn test_dashboard_overview_defaults() {
        let overview: DashboardOverview = serde_json::from_str(r#"{"upcoming": 3}"#).unwrap();
        assert_eq!(overview.upcoming, 3);
        assert_eq!(overview.completed, 0);
        assert_eq!(overview.pending, 0);
    }

    #[test]
    fn test_participant_row_labels() {
        let record = ParticipationRecord {
            staff_id: "s1".to_string(),
            staff_name: Some("Alice".to_string()),
            staff_email: None,
            role: "Chair".to_string(),
            is_present: true,
        };
        let row = ParticipantRow::from_record(&record);
        assert_eq!(row.name, "Alice");
        assert_eq!(row.email, FIELD_NA);
        assert_eq!(row.attendance_label(), "Present");
    }
}
