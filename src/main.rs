use anyhow::{Context, Result};
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use trip_itinerary::config::{DatabaseConfig, EnvironmentConfig};
use trip_itinerary::database::{create_pool, run_migrations};
use trip_itinerary::routes::create_router;
use trip_itinerary::state::AppState;

const DEFAULT_LOG_FILTER: &str = "trip_itinerary=debug,tower_http=info";

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)))
        .init();

    info!("🧳 Trip Itinerary API");
    info!("====================");

    let config = EnvironmentConfig::from_env().context("invalid environment configuration")?;
    let db_config = DatabaseConfig::from_env().context("invalid database configuration")?;

    // Inicializar base de datos
    let pool = match create_pool(&db_config).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {:#}", e);
            return Err(e);
        }
    };
    run_migrations(&pool).await?;

    let addr = config.server_url();
    if config.is_development() {
        log_endpoints();
    }

    let app = create_router(AppState::new(pool, config));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("cannot bind {}", addr))?;
    info!("🌐 Servidor iniciando en http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("👋 Servidor terminado");
    Ok(())
}

fn log_endpoints() {
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health, /ping");
    info!("🧳 Viajes:");
    info!("   POST/GET  /api/trips");
    info!("   GET/DELETE /api/trips/:id");
    info!("   POST /api/trips/:id/resort");
    info!("   POST /api/admin/resort-all");
    info!("📍 Paradas:");
    info!("   POST /api/trips/:id/stops");
    info!("   PUT/DELETE /api/stops/:id");
    info!("   POST /api/stops/:id/reorder");
    info!("💸 Gastos, actividades, documentos, transportes y alojamientos:");
    info!("   POST/GET /api/trips/:id/{{expenses,activities,documents,transports,lodgings}}");
    info!("   PUT      /api/{{activities,documents,transports,lodgings}}/:id");
    info!("   DELETE   /api/{{expenses,activities,documents,transports,lodgings}}/:id");
    info!("   POST     /api/activities/:id/complete");
    info!("📊 Reportes:");
    info!("   GET /api/trips/:id/activities/stats");
    info!("   GET /api/trips/:id/documents/{{stats,check}}");
    info!("   GET /api/trips/:id/transports/{{itinerary,check}}");
    info!("   GET /api/trips/:id/lodgings/{{coverage,check}}");
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("⚠️ No se pudo escuchar Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("⚠️ No se pudo escuchar SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
