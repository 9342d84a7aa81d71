use anyhow::Context;

use folio_kernel::settings::Settings;
use folio_kernel::InitCtx;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load Folio settings")?;
    folio_telemetry::init(&settings.telemetry);

    tracing::info!(
        env = ?settings.environment,
        host = %settings.server.host,
        port = settings.server.port,
        "folio-app bootstrap starting"
    );

    let registry = folio_app::bootstrap::build_registry();
    let ctx = InitCtx {
        settings: &settings,
    };
    registry.init_modules(&ctx).await?;
    registry.start_modules(&ctx).await?;

    folio_http::start_server(&registry, &settings).await?;

    registry.stop_modules().await?;
    Ok(())
}
