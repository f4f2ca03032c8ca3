use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::signal;
use tracing_subscriber::EnvFilter;

use freshplus_web::admin::AdminAuth;
use freshplus_web::bookings::PgBookingStore;
use freshplus_web::cache::{start_cache_warmer, AppCache};
use freshplus_web::notify::LogNotifier;
use freshplus_web::pricing::Catalog;
use freshplus_web::routes::app_router;
use freshplus_web::{config, db, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("freshplus_web=info,tower_http=info")),
        )
        .init();

    let config = config::load_from_env()?;
    config.print_summary();

    let catalog = Catalog::load(config.catalog_path.as_deref())?;
    tracing::info!(
        categories = catalog.categories.len(),
        extras = catalog.extras.len(),
        "Price catalog loaded"
    );

    let pool = db::connect(&config).await?;

    let cache = AppCache::new(Duration::from_secs(config.session_ttl_seconds));
    tokio::spawn(start_cache_warmer(cache.clone(), pool.clone()));

    let state = AppState {
        db: pool.clone(),
        cache,
        catalog: Arc::new(catalog),
        bookings: Arc::new(PgBookingStore::new(pool)),
        notifier: Arc::new(LogNotifier),
        auth: Arc::new(AdminAuth::new(
            config.admin_email.clone(),
            config.admin_password_hash.clone(),
            config.auth_secret.clone(),
            config.session_ttl_seconds,
        )),
        notify_email: config.notify_email.clone(),
    };

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, app_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for ctrl-c: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => tracing::error!("Failed to listen for SIGTERM: {}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
