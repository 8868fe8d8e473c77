use serde::{Deserialize, Serialize};

/// Aggregated view count for a single URI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewStats {
    /// Application identifier the hits were recorded under.
    pub app: String,
    /// The URI the hits were recorded against, e.g. `/events/{id}`.
    pub uri: String,
    /// Number of recorded hits.
    pub hits: u64,
}
