use std::path::Path;

use insight_common::MetricKind;

use super::schema::EngineConfig;

#[derive(Debug)]
pub enum LoadError {
    Io(std::io::Error),
    Parse(serde_yaml::Error),
    Validation(String),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Parse(e) => write!(f, "parse: {e}"),
            Self::Validation(msg) => write!(f, "validation: {msg}"),
        }
    }
}

impl std::error::Error for LoadError {}

impl From<std::io::Error> for LoadError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_yaml::Error> for LoadError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::Parse(e)
    }
}

pub fn load_from_file(path: &Path) -> Result<EngineConfig, LoadError> {
    let contents = std::fs::read_to_string(path)?;
    load_from_str(&contents)
}

pub fn load_from_str(yaml: &str) -> Result<EngineConfig, LoadError> {
    let cfg: EngineConfig = if yaml.trim().is_empty() {
        EngineConfig::default()
    } else {
        serde_yaml::from_str(yaml)?
    };
    validate(&cfg)?;
    Ok(cfg)
}

fn validate(cfg: &EngineConfig) -> Result<(), LoadError> {
    for kind in MetricKind::ALL {
        let pair = cfg.thresholds.get(kind);
        if !pair.warning.is_finite() || !pair.critical.is_finite() {
            return Err(LoadError::Validation(format!(
                "thresholds.{kind} must be finite"
            )));
        }
        if pair.warning > pair.critical {
            return Err(LoadError::Validation(format!(
                "thresholds.{kind}.warning must be <= critical"
            )));
        }
    }

    let s = &cfg.scoring;
    if !s.cpu_baseline.is_finite() || !s.cpu_factor.is_finite() || s.cpu_factor < 0.0 {
        return Err(LoadError::Validation(
            "scoring.cpu_baseline and scoring.cpu_factor must be finite, cpu_factor >= 0".into(),
        ));
    }
    if s.long_firing_secs < 0 {
        return Err(LoadError::Validation(
            "scoring.long_firing_secs must be >= 0".into(),
        ));
    }

    if cfg.alerts.history_capacity == 0 {
        return Err(LoadError::Validation(
            "alerts.history_capacity must be > 0".into(),
        ));
    }
    if cfg.aggregation.top_n == 0 {
        return Err(LoadError::Validation("aggregation.top_n must be > 0".into()));
    }

    let slot = cfg.clock.slot_minutes;
    if slot == 0 || 60 % slot != 0 {
        return Err(LoadError::Validation(
            "clock.slot_minutes must be a divisor of 60".into(),
        ));
    }
    if cfg.clock.utc_offset_minutes.abs() >= 24 * 60 {
        return Err(LoadError::Validation(
            "clock.utc_offset_minutes must be within one day".into(),
        ));
    }

    if cfg.host.interval_seconds == 0 {
        return Err(LoadError::Validation(
            "host.interval_seconds must be > 0".into(),
        ));
    }
    if cfg.host.snapshots_path.is_empty() {
        return Err(LoadError::Validation(
            "host.snapshots_path must not be empty".into(),
        ));
    }
    Ok(())
}
