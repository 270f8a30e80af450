//! Print-ready document export
//!
//! Renders the active report projection as a titled HTML table that
//! prints cleanly to PDF for archival. Pure serialization: no network
//! access and no aggregation.

use std::fs;
use std::path::Path;

use chrono::Local;

use crate::error::Result;
use crate::models::{ReportRows, ReportType};
use crate::window::DateWindow;

/// Default download filename for the document export
pub const DEFAULT_FILENAME: &str = "report.html";

fn report_title(kind: ReportType) -> &'static str {
    match kind {
        ReportType::Summary | ReportType::Export => "Meeting Summary Report",
        ReportType::Attendance => "Attendance Report",
        ReportType::Cancelled => "Cancelled Meeting Report",
    }
}

fn column_titles(rows: &ReportRows<'_>) -> &'static [&'static str] {
    match rows {
        ReportRows::Summary(_) => &["Meeting", "Date", "Participants", "Duration", "Status"],
        ReportRows::Attendance(_) => {
            &["Participant", "Total Meetings", "Attended", "Absent", "Percentage"]
        }
        ReportRows::Cancelled(_) => &["Meeting", "Scheduled Date", "Reason", "Cancelled By"],
    }
}

fn body_rows(rows: &ReportRows<'_>) -> Vec<Vec<String>> {
    match rows {
        ReportRows::Summary(rows) => rows
            .iter()
            .map(|row| {
                vec![
                    row.meeting.clone(),
                    row.date.clone(),
                    row.participants.to_string(),
                    row.duration.clone(),
                    row.status.clone(),
                ]
            })
            .collect(),
        ReportRows::Attendance(rows) => rows
            .iter()
            .map(|row| {
                vec![
                    row.name.clone(),
                    row.total_meetings.to_string(),
                    row.attended.to_string(),
                    row.absent.to_string(),
                    row.percentage.clone(),
                ]
            })
            .collect(),
        ReportRows::Cancelled(rows) => rows
            .iter()
            .map(|row| {
                vec![
                    row.meeting.clone(),
                    row.scheduled_date.clone(),
                    row.reason.clone(),
                    row.cancelled_by.clone(),
                ]
            })
            .collect(),
    }
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Render the active projection as a standalone print-ready HTML page
pub fn render_report(rows: &ReportRows<'_>, window: &DateWindow) -> String {
    let title = report_title(rows.kind());
    let columns = column_titles(rows);
    let generated = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();

    let header_cells = columns
        .iter()
        .map(|c| format!("<th>{}</th>", c))
        .collect::<Vec<_>>()
        .join("");

    let table_body = if rows.is_empty() {
        format!(
            r#"<tr><td class="empty" colspan="{}">No data for the selected date range</td></tr>"#,
            columns.len()
        )
    } else {
        body_rows(rows)
            .into_iter()
            .map(|cells| {
                let tds = cells
                    .into_iter()
                    .map(|cell| format!("<td>{}</td>", escape_html(&cell)))
                    .collect::<Vec<_>>()
                    .join("");
                format!("<tr>{}</tr>", tds)
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>{title}</title>
    <style>
        * {{ margin: 0; padding: 0; box-sizing: border-box; }}
        body {{
            font-family: -apple-system, system-ui, 'Segoe UI', Roboto, sans-serif;
            line-height: 1.6;
            color: #333;
            background: #fff;
        }}
        .page {{ max-width: 900px; margin: 0 auto; padding: 2rem; }}
        header {{
            border-bottom: 3px solid #333;
            padding-bottom: 1.5rem;
            margin-bottom: 2rem;
        }}
        h1 {{ font-size: 1.75rem; margin-bottom: 0.5rem; }}
        .meta {{ font-size: 0.9rem; color: #666; }}
        .meta span {{ margin-right: 1.5rem; }}
        table {{ width: 100%; border-collapse: collapse; }}
        th, td {{
            border: 1px solid #ddd;
            padding: 0.5rem 0.75rem;
            text-align: left;
        }}
        th {{ background: #f4f4f5; font-weight: 600; }}
        td.empty {{ text-align: center; color: #999; }}
        footer {{
            margin-top: 3rem;
            padding-top: 1.5rem;
            border-top: 1px solid #ddd;
            font-size: 0.85rem;
            color: #999;
            text-align: center;
        }}
        @media print {{
            .page {{ max-width: none; padding: 0; }}
            table {{ page-break-inside: avoid; }}
            h1 {{ page-break-after: avoid; }}
        }}
    </style>
</head>
<body>
    <div class="page">
        <header>
            <h1>{title}</h1>
            <div class="meta">
                <span>Period: {from} ~ {to}</span>
                <span>Generated: {generated}</span>
            </div>
        </header>
        <main>
            <table>
                <thead><tr>{header_cells}</tr></thead>
                <tbody>
{table_body}
                </tbody>
            </table>
        </main>
        <footer>
            <p>Print this page to PDF for permanent archival.</p>
        </footer>
    </div>
</body>
</html>"#,
        title = title,
        from = window.from,
        to = window.to,
        generated = generated,
        header_cells = header_cells,
        table_body = table_body,
    )
}

/// Render and write the document to disk
pub fn save_report<P: AsRef<Path>>(
    rows: &ReportRows<'_>,
    window: &DateWindow,
    path: P,
) -> Result<()> {
    fs::write(path, render_report(rows, window))?;
    Ok(())
}
