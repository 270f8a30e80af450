//! Portal REST API client
//!
//! Reqwest-backed [`ReportSource`] over the meeting portal's JSON API.
//! Responses arrive wrapped in a `{ "data": ... }` envelope; older
//! endpoints return bare payloads, so both shapes are accepted.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client};
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};
use crate::models::{
    DashboardOverview, Meeting, MeetingDto, ParticipationDto, ParticipationRecord, StaffDto,
    StaffMember,
};
use crate::services::source::ReportSource;
use crate::window::DateWindow;

const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// The portal bounds meeting fetches to a fixed page size
const DEFAULT_MEETING_LIMIT: u32 = 50;

/// Configuration for the portal API client
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub auth_token: Option<String>,
    pub timeout_secs: u64,
    pub meeting_limit: u32,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            auth_token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            meeting_limit: DEFAULT_MEETING_LIMIT,
        }
    }

    /// Set the bearer token attached to every request
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_meeting_limit(mut self, limit: u32) -> Self {
        self.meeting_limit = limit;
        self
    }
}

/// REST client for the meeting portal
pub struct ApiClient {
    base_url: String,
    meeting_limit: u32,
    client: Client,
}

impl ApiClient {
    /// Create a new client from config
    pub fn new(config: ApiConfig) -> Result<Self> {
        let base_url = config.base_url.trim_end_matches('/').to_string();

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );
        if let Some(ref token) = config.auth_token {
            headers.insert(
                header::AUTHORIZATION,
                header::HeaderValue::from_str(&format!("Bearer {}", token))
                    .map_err(|e| Error::internal(format!("Invalid auth token: {}", e)))?,
            );
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            base_url,
            meeting_limit: config.meeting_limit,
            client,
        })
    }

    async fn get_json(&self, path: &str, query: &[(&str, String)]) -> Result<serde_json::Value> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.client.get(&url).query(query).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_default()
                .chars()
                .take(500)
                .collect::<String>();
            return Err(Error::api(status, message));
        }

        Ok(response.json().await?)
    }
}

/// Unwrap the `{ "data": ... }` envelope the portal wraps payloads in;
/// bare payloads pass through untouched.
fn unwrap_data(value: serde_json::Value) -> serde_json::Value {
    match value {
        serde_json::Value::Object(mut map) if map.contains_key("data") => {
            map.remove("data").unwrap_or(serde_json::Value::Null)
        }
        other => other,
    }
}

/// Parse a list payload, treating a null/absent body as empty
fn parse_list<T: DeserializeOwned>(value: serde_json::Value) -> Result<Vec<T>> {
    let data = unwrap_data(value);
    if data.is_null() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_value(data)?)
}

#[async_trait]
impl ReportSource for ApiClient {
    async fn meetings_in_window(&self, window: &DateWindow) -> Result<Vec<Meeting>> {
        let query = [
            ("limit", self.meeting_limit.to_string()),
            ("startDate", window.from.to_string()),
            ("endDate", window.to.to_string()),
        ];
        let dtos: Vec<MeetingDto> = parse_list(self.get_json("/meetings", &query).await?)?;

        // The server already filters by date; drop anything outside the
        // window (or undated) that slips through anyway.
        let meetings = dtos
            .into_iter()
            .map(Meeting::from)
            .filter(|meeting| match meeting.date {
                Some(date) => window.contains(date),
                None => {
                    log::debug!("meeting {} has no date, dropped from window", meeting.id);
                    false
                }
            })
            .collect();
        Ok(meetings)
    }

    async fn all_staff(&self) -> Result<Vec<StaffMember>> {
        let dtos: Vec<StaffDto> = parse_list(self.get_json("/staff", &[]).await?)?;
        Ok(dtos.into_iter().map(StaffMember::from).collect())
    }

    async fn meeting_participation(&self, meeting_id: &str) -> Result<Vec<ParticipationRecord>> {
        let path = format!("/meetings/{}/members", meeting_id);
        let dtos: Vec<ParticipationDto> = parse_list(self.get_json(&path, &[]).await?)?;

        let mut records = Vec::with_capacity(dtos.len());
        for dto in dtos {
            match dto.normalize() {
                Some(record) => records.push(record),
                None => log::warn!(
                    "participation record without staff link in meeting {}, dropped",
                    meeting_id
                ),
            }
        }
        Ok(records)
    }

    async fn dashboard_overview(&self) -> Result<DashboardOverview> {
        let data = unwrap_data(self.get_json("/dashboard/overview", &[]).await?);
        // The counters sit one level deeper: { data: { overview: {...} } }
        let overview = match data {
            serde_json::Value::Object(mut map) if map.contains_key("overview") => {
                map.remove("overview").unwrap_or(serde_json::Value::Null)
            }
            other => other,
        };
        if overview.is_null() {
            return Ok(DashboardOverview::default());
        }
        Ok(serde_json::from_value(overview)?)
    }
}
