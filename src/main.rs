use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use dotenvy::dotenv;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use media_transcriber::app;
use media_transcriber::config::settings::{AppConfig, LogFormat};
use media_transcriber::infrastructure::media::HttpMediaFetcher;
use media_transcriber::infrastructure::webhook::HttpNotifier;
use media_transcriber::infrastructure::whisper::WhisperTranscriber;
use media_transcriber::modules::transcription::dispatcher::JobDispatcher;
use media_transcriber::modules::transcription::service::TranscriptionService;
use media_transcriber::state::AppState;
use media_transcriber::workers::transcriber::start_transcription_workers;

fn init_tracing(format: LogFormat) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,media_transcriber=debug,tower_http=debug"));

    let registry = tracing_subscriber::registry().with(env_filter);
    match format {
        LogFormat::Json => registry.with(fmt::layer().json().with_target(true)).init(),
        LogFormat::Pretty => registry.with(fmt::layer().with_target(true)).init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = AppConfig::new().context("API_KEY must be set")?;

    init_tracing(config.log_format);

    info!("Starting server...");

    let service = Arc::new(TranscriptionService::new(
        Arc::new(HttpMediaFetcher::new(config.storage_path.clone())),
        Arc::new(WhisperTranscriber::new(
            &config.whisper_api_url,
            &config.whisper_api_key,
            &config.whisper_model,
        )),
    ));
    let notifier = Arc::new(
        HttpNotifier::new(config.webhook_timeout).context("Failed to build webhook client")?,
    );

    let (job_tx, job_rx) = async_channel::bounded(config.job_queue_capacity);
    let workers = start_transcription_workers(
        config.worker_count,
        job_rx,
        Arc::clone(&service),
        notifier,
    );

    let dispatcher = Arc::new(JobDispatcher::new(service, job_tx));
    let state = AppState::new(config.clone(), Arc::clone(&dispatcher));
    let app = app::create_app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Server running on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Draining queued transcription jobs...");
    dispatcher.close();
    for worker in workers {
        worker.await.ok();
    }
    info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.ok();
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
