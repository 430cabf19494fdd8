mod app;
mod catalog;
mod config;
mod db;
mod dishes;
mod dto;
mod error;
mod extract;
mod menus;
mod state;
mod submenus;

use crate::{app::build_app, state::AppState};

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        "menu_catalog=debug,axum=info,tower_http=info,sqlx=warn".to_string()
    });
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let app_state = AppState::init().await?;
    let addr = app_state.config.listen_addr()?;

    let app = build_app(app_state);
    app::serve(app, addr).await
}
