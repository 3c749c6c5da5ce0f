
use todo_service::{MetricsProviderGuard, Settings, StartupError, TracingGuard};

use thiserror::Error;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};

#[derive(Debug, Error)]
enum TodoServiceError {
    #[error("Startup error")]
    Startup(#[from] StartupError),

    #[error("Io error")]
    Io(#[from] std::io::Error),
}

fn main() -> Result<(), TodoServiceError> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(num_cpus::get())
        .max_blocking_threads(num_cpus::get() * 2)
        .enable_all()
        .build()?;

    runtime.block_on(async_main())
}

#[cfg(unix)]
async fn terminate() {
    use tokio::signal::unix::{signal, SignalKind};

    match signal(SignalKind::terminate()) {
        Ok(mut sigterm) => {
            sigterm.recv().await;
        }
        Err(e) => {
            error!(error = %e, "failed to bind to SIGTERM");
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(not(unix))]
async fn terminate() {
    std::future::pending::<()>().await;
}

async fn shutdown_signal() {
    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("SIGINT received.");
        },
        _ = terminate() => {
            info!("SIGTERM received.");
        },
    }
}

async fn async_main() -> Result<(), TodoServiceError> {
    let settings = Settings::new()?;

    let _tracing_guard = TracingGuard::new(&settings)?;

    let _metrics_provider_guard = settings
        .metrics_enabled()
        .then(|| MetricsProviderGuard::new(&settings))
        .transpose()?;

    let server_addr = settings.server_addr();
    let (app, service) = todo_service::init_app(settings).await?;

    let listener = TcpListener::bind(&server_addr).await?;
    info!(addr = %server_addr, "Server listening");

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Err(e) = service.flush_storage().await {
        error!(error = %e, "failed to flush storage on shutdown");
    }

    Ok(())
}
