use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use rmcp::{
    handler::server::{wrapper::Parameters, ServerHandler, tool::ToolRouter},
    model::{CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
    ErrorData as McpError,
};
use tokio::sync::Mutex;

use crate::briefing::HttpBriefingAggregator;
use crate::config::BriefingConfig;
use crate::formatters::{format_briefing, format_compact_briefing, format_refresh_status};
use crate::models::{CheckRefreshRequest, GetBriefingRequest, Location, SaveSnapshotRequest};
use crate::refresh::Session;
use crate::snapshot::BriefingSnapshot;

/// MCP service exposing zone briefings as tools
#[derive(Clone)]
pub struct ZoneBriefing {
    aggregator: Arc<HttpBriefingAggregator>,
    session: Arc<Mutex<Session>>,
    snapshot_path: PathBuf,
    tool_router: ToolRouter<Self>,
}

impl ZoneBriefing {
    /// Creates a new service from configuration
    pub fn new(config: &BriefingConfig) -> Result<Self> {
        let aggregator = HttpBriefingAggregator::from_config(config)?;

        Ok(Self {
            aggregator: Arc::new(aggregator),
            session: Arc::new(Mutex::new(Session::new(
                Utc::now(),
                config.refresh_interval_minutes,
            ))),
            snapshot_path: config.snapshot_path.clone(),
            tool_router: Self::tool_router(),
        })
    }
}

#[tool_handler]
impl ServerHandler for ZoneBriefing {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "courier-zone-briefing".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some(
                "Courier zone briefings: current weather, delivery-relevant news, \
                expected delivery load and safety tips for a city or postal code."
                    .to_string(),
            ),
        }
    }
}

#[tool_router]
impl ZoneBriefing {
    /// Generates a briefing for a delivery zone
    #[tool(description = "Generate a delivery briefing for a zone. Provide a city or postal code and a two-letter country code (e.g., location: 'Barcelona', country: 'es'). Set compact to true for a short numbered summary.")]
    async fn get_zone_briefing(
        &self,
        Parameters(request): Parameters<GetBriefingRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(
            "Briefing requested for {}, {}",
            request.location,
            request.country
        );

        let location = Location::new(&request.location, &request.country)
            .map_err(|e| McpError::invalid_params(e.user_message(), None))?;

        let report = self.aggregator.build(&location).await;

        let formatted = if request.compact.unwrap_or(false) {
            format_compact_briefing(&report)
        } else {
            format_briefing(&report)
        };

        self.session.lock().await.record(report, Utc::now());

        Ok(CallToolResult::success(vec![Content::text(formatted)]))
    }

    /// Saves the most recent briefing to the snapshot file
    #[tool(description = "Save the most recently generated briefing as a JSON snapshot. Optionally provide a file path; otherwise the configured snapshot path is used. Any existing file is overwritten.")]
    async fn save_briefing_snapshot(
        &self,
        Parameters(request): Parameters<SaveSnapshotRequest>,
    ) -> Result<CallToolResult, McpError> {
        let snapshot = {
            let session = self.session.lock().await;
            let report = session.last_report.as_ref().ok_or_else(|| {
                McpError::invalid_params(
                    "No briefing has been generated yet. Call get_zone_briefing first.",
                    None,
                )
            })?;
            BriefingSnapshot::from(report)
        };

        let path = request
            .path
            .map(PathBuf::from)
            .unwrap_or_else(|| self.snapshot_path.clone());

        snapshot.save(&path).map_err(|e| {
            tracing::warn!("Saving snapshot to {} failed: {}", path.display(), e);
            McpError::internal_error(format!("Error saving data: {}", e), None)
        })?;

        Ok(CallToolResult::success(vec![Content::text(format!(
            "Briefing data saved to '{}'",
            path.display()
        ))]))
    }

    /// Reports whether the current briefing is due for a refresh
    #[tool(description = "Check whether the last briefing is due for a refresh. Optionally set a new auto-refresh interval in minutes (0-60, 0 disables auto-refresh).")]
    async fn check_refresh(
        &self,
        Parameters(request): Parameters<CheckRefreshRequest>,
    ) -> Result<CallToolResult, McpError> {
        let mut session = self.session.lock().await;

        if let Some(interval) = request.interval_minutes {
            session
                .refresh
                .set_interval(interval)
                .map_err(|e| McpError::invalid_params(e.user_message(), None))?;
        }

        let status = format_refresh_status(&session.refresh, Utc::now());
        Ok(CallToolResult::success(vec![Content::text(status)]))
    }
}
