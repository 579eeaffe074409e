use plotters::prelude::*;
use tempfile::NamedTempFile;

use crate::error::AppError;
use crate::models::record::SessionRecord;
use crate::utils::parse_duration;

const CHART_SIZE: (u32, u32) = (1000, 500);

/// Series color, same teal the original reports used.
const SERIES_COLOR: RGBColor = RGBColor(0x1A, 0xBC, 0x9C);

/// Render a per-session playtime line chart into a temporary SVG file.
///
/// The file is deleted when the returned handle drops, whatever happens
/// to it in between; callers just let it go out of scope after the send
/// attempt.
///
/// `sessions` must be in chronological order and non-empty; an empty
/// slice is refused rather than rendered as a blank plot.
pub fn render_chart(sessions: &[SessionRecord]) -> Result<NamedTempFile, AppError> {
    if sessions.is_empty() {
        return Err(AppError::Chart("no sessions to plot".to_string()));
    }

    let durations: Vec<u64> = sessions
        .iter()
        .map(|record| parse_duration(&record.duration))
        .collect();
    let labels = session_labels(sessions);

    let file = tempfile::Builder::new()
        .prefix("playtime-report-")
        .suffix(".svg")
        .tempfile()?;

    let x_max = (sessions.len() - 1).max(1);
    let y_peak = durations.iter().copied().max().unwrap_or(0).max(1);
    let y_max = y_peak + y_peak / 10 + 1;

    {
        let root = SVGBackend::new(file.path(), CHART_SIZE).into_drawing_area();
        root.fill(&WHITE)
            .map_err(|e| AppError::Chart(e.to_string()))?;

        let mut chart = ChartBuilder::on(&root)
            .caption("Play Time Over Sessions", ("sans-serif", 24))
            .margin(15)
            .x_label_area_size(50)
            .y_label_area_size(70)
            .build_cartesian_2d(0..x_max, 0u64..y_max)
            .map_err(|e| AppError::Chart(e.to_string()))?;

        chart
            .configure_mesh()
            .light_line_style(BLACK.mix(0.15))
            .y_desc("Seconds Played")
            .x_labels(labels.len().min(12))
            .x_label_formatter(&|idx| labels.get(*idx).cloned().unwrap_or_default())
            .draw()
            .map_err(|e| AppError::Chart(e.to_string()))?;

        let points: Vec<(usize, u64)> = durations.iter().copied().enumerate().collect();

        chart
            .draw_series(LineSeries::new(points.iter().copied(), &SERIES_COLOR))
            .map_err(|e| AppError::Chart(e.to_string()))?;
        chart
            .draw_series(
                points
                    .iter()
                    .map(|&point| Circle::new(point, 4, SERIES_COLOR.filled())),
            )
            .map_err(|e| AppError::Chart(e.to_string()))?;

        root.present().map_err(|e| AppError::Chart(e.to_string()))?;
    }

    Ok(file)
}

/// X-axis labels: the calendar-date prefix of each session's join
/// timestamp. This is a plain character truncation, not date parsing;
/// short or missing timestamps come through partial or empty.
fn session_labels(sessions: &[SessionRecord]) -> Vec<String> {
    sessions
        .iter()
        .map(|record| {
            record
                .joined_at
                .as_deref()
                .unwrap_or("")
                .chars()
                .take(10)
                .collect()
        })
        .collect()
}
