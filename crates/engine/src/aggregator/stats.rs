use insight_common::ServerStatus;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub total: usize,
    pub online: usize,
    pub warning: usize,
    pub critical: usize,
    pub offline: usize,
}

impl StatusCounts {
    pub fn record(&mut self, status: ServerStatus) {
        self.total += 1;
        match status {
            ServerStatus::Online => self.online += 1,
            ServerStatus::Warning => self.warning += 1,
            ServerStatus::Critical => self.critical += 1,
            ServerStatus::Offline => self.offline += 1,
        }
    }
}

/// Per `serverType` statistics. Averages are rounded to whole percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerTypeStats {
    pub server_type: String,
    pub count: usize,
    pub avg_cpu: f64,
    pub avg_memory: f64,
    pub avg_disk: f64,
    pub avg_network: f64,
    pub max_cpu: f64,
    pub max_memory: f64,
    pub online: usize,
    pub warning: usize,
    pub critical: usize,
    pub offline: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopEntry {
    pub server_id: String,
    pub instance: String,
    pub server_type: String,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalAverages {
    pub cpu: f64,
    pub memory: f64,
    pub disk: f64,
    pub network: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedMetrics {
    pub status_counts: StatusCounts,
    /// In order of first appearance of each type.
    pub by_server_type: Vec<ServerTypeStats>,
    pub top_cpu: Vec<TopEntry>,
    pub top_memory: Vec<TopEntry>,
    pub averages: GlobalAverages,
}

impl AggregatedMetrics {
    pub fn server_type(&self, name: &str) -> Option<&ServerTypeStats> {
        self.by_server_type.iter().find(|s| s.server_type == name)
    }
}
