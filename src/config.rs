//! Construction-time settings for `ChainHash`.

/// Bucket count used when no capacity is requested.
pub const DEFAULT_INITIAL_CAPACITY: usize = 10;

/// Ratio of non-empty buckets to capacity above which `set` grows the table.
pub const DEFAULT_MAX_FILL_FACTOR: f64 = 0.8;

/// Smallest accepted fill factor. Below it a single used bucket would keep
/// doubling the table on every `set`.
pub const MIN_MAX_FILL_FACTOR: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChainHashConfig {
    pub initial_capacity: usize,
    pub max_fill_factor: f64,
}

impl ChainHashConfig {
    pub fn new() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            max_fill_factor: DEFAULT_MAX_FILL_FACTOR,
        }
    }

    /// Zero is raised to one bucket so the modulo reduction stays defined.
    pub fn initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity.max(1);
        self
    }

    /// Non-finite or non-positive factors fall back to the default; small
    /// positive ones are raised to [`MIN_MAX_FILL_FACTOR`].
    pub fn max_fill_factor(mut self, factor: f64) -> Self {
        self.max_fill_factor = sanitize_fill_factor(factor);
        self
    }

    /// The same clamping the setters apply, for configs built as struct
    /// literals.
    pub(crate) fn sanitized(self) -> Self {
        Self {
            initial_capacity: self.initial_capacity.max(1),
            max_fill_factor: sanitize_fill_factor(self.max_fill_factor),
        }
    }
}

fn sanitize_fill_factor(factor: f64) -> f64 {
    if factor.is_finite() && factor > 0.0 {
        factor.max(MIN_MAX_FILL_FACTOR)
    } else {
        DEFAULT_MAX_FILL_FACTOR
    }
}

impl Default for ChainHashConfig {
    fn default() -> Self {
        Self::new()
    }
}
