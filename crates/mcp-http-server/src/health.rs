//! `GET /health` and `GET /` response bodies (spec §6.2).

use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub server: ServerInfo,
    pub transport: TransportInfo,
    pub resources: ResourceCounts,
    pub uptime: u64,
    pub timestamp: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TransportInfo {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub mode: &'static str,
    pub sessions: usize,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResourceCounts {
    pub tools: usize,
    pub prompts: usize,
    pub resources: usize,
}

pub fn unix_timestamp() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_secs()).unwrap_or(0)
}
