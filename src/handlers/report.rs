use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;

use crate::aggregate;
use crate::chart::render_chart;
use crate::error::AppError;
use crate::models::report::{CreateReportRequest, ReportResponse};
use crate::services::discord::Embed;
use crate::services::record_store::{scan_records, HISTORY_SCAN_LIMIT};
use crate::utils::format_seconds;
use crate::AppState;

const REPORT_COLOR: u32 = 0x1ABC9C;

#[utoipa::path(
    post,
    path = "/api/report",
    request_body = CreateReportRequest,
    responses(
        (status = 200, description = "Report delivered to the reports channel", body = ReportResponse),
        (status = 404, description = "No records for the player"),
        (status = 502, description = "Reports channel misconfigured")
    )
)]
pub async fn create_report(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateReportRequest>,
) -> Result<impl IntoResponse, AppError> {
    let records = scan_records(
        &state.discord,
        state.config.database_channel_id,
        HISTORY_SCAN_LIMIT,
    );
    let report = aggregate::build_report(records, &payload.player).await?;

    // Dropped at the end of this function on every path, so the temp file
    // never outlives the send attempt.
    let chart = render_chart(&report.sessions)?;

    let embed = Embed::new(format!("Activity Report: {}", report.username), REPORT_COLOR)
        .field(
            "Total Playtime",
            format!("`{}`", format_seconds(report.total_seconds)),
            false,
        )
        .field("Sessions", report.session_count.to_string(), true)
        .timestamp_now();

    let reports_channel = state.config.reports_channel_id;
    let delivery = async {
        state.discord.send_embed(reports_channel, &embed).await?;
        state
            .discord
            .send_file(reports_channel, chart.path(), "report.svg")
            .await
    }
    .await;

    if let Err(e) = delivery {
        tracing::error!(
            "Failed to deliver report to channel {}: {}",
            reports_channel,
            e
        );
        return Err(AppError::MisconfiguredDestination);
    }

    Ok((
        StatusCode::OK,
        Json(ReportResponse {
            message: format!("Report for '{}' sent to the reports channel", report.username),
            channel_id: reports_channel,
        }),
    ))
}
