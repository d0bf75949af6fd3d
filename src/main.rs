// Main entry point - Dependency injection, background tasks and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::application::feed_poller::FeedPoller;
use crate::application::feed_repository::FeedRepository;
use crate::application::radial_graph::RadialGraph;
use crate::application::repaint_loop::RepaintLoop;
use crate::domain::settings::RenderSettings;
use crate::infrastructure::config::{load_app_config, parse_options, FeedSettings};
use crate::infrastructure::fixture_repository::FixtureRepository;
use crate::infrastructure::pachube_repository::PachubeRepository;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{graph_page, graph_svg, health_check};

fn build_repository(feed: &FeedSettings) -> Arc<dyn FeedRepository> {
    match &feed.fixture {
        Some(path) => {
            tracing::info!("Serving datapoints from fixture {}", path);
            Arc::new(FixtureRepository::new(path))
        }
        None => Arc::new(PachubeRepository::new(
            feed.api_base.clone(),
            feed.resource.clone(),
            feed.api_key.clone(),
        )),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = load_app_config().context("Failed to load configuration")?;
    let options = parse_options(&config.widget.options);
    let settings = RenderSettings::resolve(
        &options,
        config.widget.width,
        config.widget.height,
        &config.widget.font,
    );

    // Start the feed poll and the repaint loop
    let repository = build_repository(&config.feed);
    let (poll_task, feed) = FeedPoller::new(repository, settings.time_span).spawn();

    let (repaint_task, frames) = RepaintLoop::new(RadialGraph::new(settings.clone()), feed).spawn();

    let state = Arc::new(AppState {
        frames,
        width: settings.width,
        height: settings.height,
    });

    let router = Router::new()
        .route("/", get(graph_page))
        .route("/graph.svg", get(graph_svg))
        .route("/healthz", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr: SocketAddr = config
        .server
        .bind
        .parse()
        .with_context(|| format!("Invalid bind address {}", config.server.bind))?;
    tracing::info!("Starting pachube-radial on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down");
            poll_task.cancel();
            repaint_task.cancel();
        })
        .await?;

    Ok(())
}
