//! Row cap for list queries

use serde::Deserialize;

use super::query::empty_as_none;

/// Maximum rows a single list query may return
const MAX_LIMIT: u32 = 100;

/// Rows returned when the caller does not say
const DEFAULT_LIMIT: u32 = 10;

/// Row cap, clamped to 1..=100
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limit(u32);

impl Limit {
    /// Create a limit, clamping into range.
    pub fn new(limit: u32) -> Self {
        Self(limit.clamp(1, MAX_LIMIT))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Value for binding to a SQL `LIMIT` placeholder.
    pub fn as_i64(self) -> i64 {
        i64::from(self.0)
    }

    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl Default for Limit {
    fn default() -> Self {
        Self(DEFAULT_LIMIT)
    }
}

/// Query parameter for list endpoints
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LimitParams {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub limit: Option<u32>,
}

impl From<LimitParams> for Limit {
    fn from(params: LimitParams) -> Self {
        params.limit.map(Self::new).unwrap_or_default()
    }
}
