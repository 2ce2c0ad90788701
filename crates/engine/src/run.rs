use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use insight_engine::config::EngineConfig;
use insight_engine::host::{DirReportStore, JsonFileProvider};
use insight_engine::metrics::render_prometheus;
use insight_engine::orchestrator::{render_digest, MonitoringOrchestrator, MonitoringSummary};

pub fn build(config: &EngineConfig) -> MonitoringOrchestrator {
    let provider = Arc::new(JsonFileProvider::new(&config.host.snapshots_path));
    let orchestrator = MonitoringOrchestrator::new(config, provider);
    match &config.host.reports_dir {
        Some(dir) => {
            tracing::info!(dir = %dir, "precomputed reports enabled");
            orchestrator.with_store(Arc::new(DirReportStore::new(dir)))
        }
        None => orchestrator,
    }
}

pub fn tick(orchestrator: &MonitoringOrchestrator, config: &EngineConfig) -> anyhow::Result<()> {
    let report = orchestrator.analyze()?;
    let summary = MonitoringSummary::from(&report);
    tracing::info!(
        score = summary.score,
        grade = summary.grade.as_str(),
        firing = summary.firing_alerts,
        critical = summary.critical_alerts,
        servers = summary.status_counts.total,
        source = ?summary.source,
        "analysis"
    );
    tracing::info!(digest = %render_digest(&report, &config.digest), "digest");

    if let Some(path) = &config.host.metrics_textfile {
        write_textfile(Path::new(path), &render_prometheus(orchestrator.metrics()))?;
    }
    Ok(())
}

pub async fn run(config: EngineConfig) -> anyhow::Result<()> {
    let orchestrator = build(&config);
    tracing::info!(
        snapshots = %config.host.snapshots_path,
        interval_s = config.host.interval_seconds,
        "engine running"
    );

    let mut interval = tokio::time::interval(Duration::from_secs(config.host.interval_seconds));
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    let shutdown = crate::shutdown::wait_for_shutdown();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            _ = interval.tick() => {
                if let Err(e) = tick(&orchestrator, &config) {
                    tracing::error!(error = %e, "analysis tick failed");
                }
            }
        }
    }

    tracing::info!(
        analyses = orchestrator.metrics().analyses_val(),
        "shutting down"
    );
    Ok(())
}

// Written beside the target then renamed so scrapers never see a partial file.
fn write_textfile(path: &Path, body: &str) -> anyhow::Result<()> {
    let tmp = path.with_extension("prom.tmp");
    std::fs::write(&tmp, body).with_context(|| format!("writing {}", tmp.display()))?;
    std::fs::rename(&tmp, path).with_context(|| format!("renaming to {}", path.display()))?;
    Ok(())
}
