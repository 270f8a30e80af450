//! Excel export
//!
//! Serializes the active report projection to an .xlsx workbook, one
//! sheet named by report type. Pure serialization: no network access
//! and no aggregation.

use std::path::Path;

use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook};

use crate::error::Result;
use crate::models::{AttendanceRow, CancelledRow, ReportRows, ReportType, SummaryRow};

/// Default download filename for a report type
pub fn default_filename(kind: ReportType) -> String {
    format!("{}_report.xlsx", kind.as_str())
}

/// Excel report generator
pub struct ExcelReportGenerator {
    workbook: Workbook,
    header_format: Format,
    cell_format: Format,
    number_format: Format,
}

impl ExcelReportGenerator {
    /// Create a new Excel report generator
    pub fn new() -> Result<Self> {
        let workbook = Workbook::new();

        // Header style: blue background, white bold text
        let header_format = Format::new()
            .set_bold()
            .set_font_color(Color::White)
            .set_background_color(Color::RGB(0x4472C4))
            .set_align(FormatAlign::Center)
            .set_border(FormatBorder::Thin);

        let cell_format = Format::new().set_border(FormatBorder::Thin);

        let number_format = Format::new()
            .set_num_format("0")
            .set_align(FormatAlign::Center)
            .set_border(FormatBorder::Thin);

        Ok(Self {
            workbook,
            header_format,
            cell_format,
            number_format,
        })
    }

    /// Write the active projection as a sheet named by its report type
    pub fn add_report(&mut self, rows: &ReportRows<'_>) -> Result<()> {
        match rows {
            ReportRows::Summary(rows) => self.add_summary_sheet(rows),
            ReportRows::Attendance(rows) => self.add_attendance_sheet(rows),
            ReportRows::Cancelled(rows) => self.add_cancelled_sheet(rows),
        }
    }

    fn add_summary_sheet(&mut self, rows: &[SummaryRow]) -> Result<()> {
        let worksheet = self.workbook.add_worksheet();
        worksheet.set_name("Summary")?;

        let headers = ["Meeting ID", "Meeting", "Date", "Participants", "Duration", "Status"];
        for (col, header) in headers.iter().enumerate() {
            worksheet.write_with_format(0, col as u16, *header, &self.header_format)?;
        }

        for (idx, row) in rows.iter().enumerate() {
            let r = 1 + idx as u32;
            worksheet.write_with_format(r, 0, &row.meeting_id, &self.cell_format)?;
            worksheet.write_with_format(r, 1, &row.meeting, &self.cell_format)?;
            worksheet.write_with_format(r, 2, &row.date, &self.cell_format)?;
            worksheet.write_with_format(r, 3, row.participants, &self.number_format)?;
            worksheet.write_with_format(r, 4, &row.duration, &self.cell_format)?;
            worksheet.write_with_format(r, 5, &row.status, &self.cell_format)?;
        }

        worksheet.set_column_width(0, 24)?;
        worksheet.set_column_width(1, 40)?;
        worksheet.set_column_width(2, 12)?;
        worksheet.set_column_width(3, 12)?;
        worksheet.set_column_width(4, 12)?;
        worksheet.set_column_width(5, 12)?;

        Ok(())
    }

    fn add_attendance_sheet(&mut self, rows: &[AttendanceRow]) -> Result<()> {
        let worksheet = self.workbook.add_worksheet();
        worksheet.set_name("Attendance")?;

        let headers = ["Participant", "Total Meetings", "Attended", "Absent", "Percentage"];
        for (col, header) in headers.iter().enumerate() {
            worksheet.write_with_format(0, col as u16, *header, &self.header_format)?;
        }

        for (idx, row) in rows.iter().enumerate() {
            let r = 1 + idx as u32;
            worksheet.write_with_format(r, 0, &row.name, &self.cell_format)?;
            worksheet.write_with_format(r, 1, row.total_meetings, &self.number_format)?;
            worksheet.write_with_format(r, 2, row.attended, &self.number_format)?;
            worksheet.write_with_format(r, 3, row.absent, &self.number_format)?;
            worksheet.write_with_format(r, 4, &row.percentage, &self.cell_format)?;
        }

        worksheet.set_column_width(0, 30)?;
        worksheet.set_column_width(1, 15)?;
        worksheet.set_column_width(2, 10)?;
        worksheet.set_column_width(3, 10)?;
        worksheet.set_column_width(4, 12)?;

        Ok(())
    }

    fn add_cancelled_sheet(&mut self, rows: &[CancelledRow]) -> Result<()> {
        let worksheet = self.workbook.add_worksheet();
        worksheet.set_name("Cancelled")?;

        let headers = ["Meeting", "Scheduled Date", "Reason", "Cancelled By"];
        for (col, header) in headers.iter().enumerate() {
            worksheet.write_with_format(0, col as u16, *header, &self.header_format)?;
        }

        for (idx, row) in rows.iter().enumerate() {
            let r = 1 + idx as u32;
            worksheet.write_with_format(r, 0, &row.meeting, &self.cell_format)?;
            worksheet.write_with_format(r, 1, &row.scheduled_date, &self.cell_format)?;
            worksheet.write_with_format(r, 2, &row.reason, &self.cell_format)?;
            worksheet.write_with_format(r, 3, &row.cancelled_by, &self.cell_format)?;
        }

        worksheet.set_column_width(0, 40)?;
        worksheet.set_column_width(1, 15)?;
        worksheet.set_column_width(2, 40)?;
        worksheet.set_column_width(3, 20)?;

        Ok(())
    }

    /// Save the workbook to a file
    pub fn save<P: AsRef<Path>>(mut self, path: P) -> Result<()> {
        self.workbook.save(path)?;
        Ok(())
    }

    /// Save the workbook to a byte vector (for in-browser downloads)
    pub fn save_to_buffer(mut self) -> Result<Vec<u8>> {
        let buffer = self.workbook.save_to_buffer()?;
        Ok(buffer)
    }
}
