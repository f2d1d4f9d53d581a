//! HTTP server facade for handyhub with Axum, error handling, and OpenAPI support.

use anyhow::Context;
use axum::{routing::get, Router};

use handyhub_kernel::{settings::Settings, ModuleRegistry};
use handyhub_store::Store;

pub mod error;
pub mod router;
pub mod wire;

use router::RouterBuilder;

/// Start the HTTP server with the given module registry and store handle.
/// Serves until a ctrl-c signal arrives.
pub async fn start_server(
    registry: &ModuleRegistry,
    store: &Store,
    settings: &Settings,
) -> anyhow::Result<()> {
    tracing::info!(
        "starting HTTP server on {}:{}",
        settings.server.host,
        settings.server.port
    );

    let app = build_router(registry, store, settings)
        .await
        .context("failed to build HTTP router")?;

    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", settings.server.host, settings.server.port))
            .await
            .context("failed to bind to address")?;

    tracing::info!(
        "HTTP server listening on http://{}:{}",
        settings.server.host,
        settings.server.port
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    Ok(())
}

/// Build the main HTTP router with all module routes merged in.
/// Public so the integration tests can drive the exact production router.
pub async fn build_router(
    registry: &ModuleRegistry,
    store: &Store,
    settings: &Settings,
) -> anyhow::Result<Router> {
    let mut router_builder = RouterBuilder::new();

    // Global middlewares
    router_builder = router_builder
        .with_tracing()
        .with_cors()
        .with_request_id()
        .with_timeout(settings.server.request_timeout_ms);

    // Health check route
    router_builder = router_builder.route("/healthz", get(health_check));

    // Merge module routes; each module wires its own collection handles.
    for module in registry.modules() {
        router_builder = router_builder.mount_module(module.name(), module.routes(store));
    }

    // OpenAPI documentation
    router_builder = router_builder.with_openapi(registry);

    Ok(router_builder.build())
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "ok"
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        tracing::warn!("failed to install ctrl-c handler; serving until killed");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
