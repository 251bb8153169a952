/// Tuning for a [`Pathfinder`](crate::Pathfinder) session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PathfinderConfig {
    /// Log every node expansion at `trace` level.
    pub debug_trace: bool,
    /// Give up after finalizing this many nodes. The search then reports
    /// failure, as if no path existed.
    pub max_expansions: Option<usize>,
}

impl PathfinderConfig {
    pub fn with_debug_trace(mut self, on: bool) -> Self {
        self.debug_trace = on;
        self
    }

    pub fn with_max_expansions(mut self, limit: usize) -> Self {
        self.max_expansions = Some(limit);
        self
    }
}
