//! Services module

pub mod aggregate;
pub mod api;
pub mod document;
pub mod excel;
pub mod join;
pub mod orchestrator;
pub mod source;

pub use aggregate::AggregationEngine;
pub use api::{ApiClient, ApiConfig};
pub use excel::ExcelReportGenerator;
pub use join::JoinStrategy;
pub use orchestrator::ReportOrchestrator;
pub use source::ReportSource;
