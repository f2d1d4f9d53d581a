use anyhow::Context;
use handyhub_app::modules;
use handyhub_kernel::{settings::Settings, InitCtx, ModuleRegistry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load HANDYHUB settings")?;
    handyhub_telemetry::init(&settings.telemetry)?;

    tracing::info!(
        env = ?settings.environment,
        db = %settings.database.endpoint,
        "handyhub bootstrap starting"
    );

    // An unreachable store here aborts the process; once serving, store
    // failures stay scoped to the request that hit them.
    let store = handyhub_store::mongo::connect(
        &settings.database.endpoint,
        &settings.database.database,
    )
    .await
    .with_context(|| "failed to reach the document store")?;

    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry);

    let ctx = InitCtx {
        settings: &settings,
        store: &store,
    };
    registry.init_all(&ctx).await?;

    handyhub_http::start_server(&registry, &store, &settings).await?;

    registry.stop_all().await?;
    tracing::info!("handyhub shutdown complete");
    Ok(())
}
