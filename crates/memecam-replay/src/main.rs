//! Landmark replay binary.

use anyhow::Context;
use metrics_exporter_prometheus::PrometheusBuilder;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use memecam_models::StateChange;
use memecam_replay::{
    replay, RecordedFaceLandmarker, RecordedFrame, RecordedHandLandmarker, Recording, ReplayConfig,
};
use memecam_vision::{BoxedFaceLandmarker, BoxedHandLandmarker, FramePipeline};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    init_tracing()?;

    info!("Starting memecam-replay");

    let config = ReplayConfig::from_env_and_args(std::env::args().skip(1));
    info!("Replay config: {:?}", config);

    let metrics = if config.metrics {
        Some(
            PrometheusBuilder::new()
                .install_recorder()
                .context("failed to install Prometheus recorder")?,
        )
    } else {
        None
    };

    let path = config
        .recording_path
        .clone()
        .context("no recording given: set MEMECAM_REPLAY_FILE or pass a path")?;
    let recording = Recording::load(&path)?;
    info!(path = %path.display(), frames = recording.len(), "Recording loaded");

    let mut pipeline = FramePipeline::initialize(
        config.pipeline.clone(),
        &config.host,
        || Ok(Box::new(RecordedFaceLandmarker::default()) as BoxedFaceLandmarker<RecordedFrame>),
        || Ok(Some(Box::new(RecordedHandLandmarker::default()) as BoxedHandLandmarker<RecordedFrame>)),
    )
    .context("failed to initialize frame pipeline")?;

    pipeline.add_listener(|change: &StateChange| match serde_json::to_string(change) {
        Ok(line) => println!("{line}"),
        Err(e) => warn!("Failed to serialize state change: {}", e),
    });

    let shutdown = async {
        tokio::signal::ctrl_c().await.ok();
        info!("Received shutdown signal");
    };

    let summary = replay(&recording, config.frame_interval(), &mut pipeline, shutdown).await;
    pipeline.shutdown();

    info!(
        delivered = summary.frames_delivered,
        processed = summary.frames_processed,
        changes = summary.changes,
        interrupted = summary.interrupted,
        final_state = summary.final_state.map(|s| s.as_str()).unwrap_or("none"),
        "Replay complete"
    );

    if let Some(handle) = metrics {
        println!("{}", handle.render());
    }

    Ok(())
}

/// Colored output for dev, JSON for production.
fn init_tracing() -> anyhow::Result<()> {
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::from_default_env().add_directive("memecam=info".parse()?);

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false)
                    .with_writer(std::io::stderr),
            )
            .with(env_filter)
            .init();
    }
    Ok(())
}
