use axum::{
    routing::{get, post},
    Router,
};
use dotenvy::dotenv;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod aggregate;
mod chart;
mod config;
mod error;
mod handlers;
mod models;
mod services;
mod utils;

use config::Config;
use services::discord::DiscordService;

// Application State
pub struct AppState {
    pub config: Config,
    pub discord: DiscordService,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::leaderboard::leaderboard,
        handlers::lastseen::lastseen,
        handlers::report::create_report,
        handlers::players::list_players,
    ),
    components(schemas(
        models::record::SessionRecord,
        models::record::LastSeenResponse,
        models::leaderboard::LeaderboardEntry,
        models::leaderboard::LeaderboardRow,
        models::leaderboard::LeaderboardResponse,
        models::report::CreateReportRequest,
        models::report::ReportResponse,
        models::player::PlayerChoice,
    ))
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;
    tracing::info!(
        "Tracking guild {}, database channel {}, reports channel {}",
        config.guild_id,
        config.database_channel_id,
        config.reports_channel_id
    );

    let discord = DiscordService::new(&config.discord_token);
    let state = Arc::new(AppState { config, discord });

    let app = Router::new()
        .route("/", get(root))
        .route("/api/leaderboard", get(handlers::leaderboard::leaderboard))
        .route("/api/lastseen", get(handlers::lastseen::lastseen))
        .route("/api/report", post(handlers::report::create_report))
        .route("/api/players", get(handlers::players::list_players))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let host = std::env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("SERVER_PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("{}:{}", host, port).parse::<SocketAddr>()?;

    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn root() -> &'static str {
    "Playtime Tracker API"
}
