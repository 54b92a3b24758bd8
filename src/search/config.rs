//! Configuration types for the search engine.

/// Configuration for creating a [`Solver`](super::Solver).
///
/// The defaults are what production callers want; the knobs exist so a test
/// harness can fall back to the plain algorithm and compare results.
///
/// # Examples
///
/// ```
/// use misere4::search::SolverConfig;
///
/// let config = SolverConfig::new()
///     .with_symmetry_reduction(false)
///     .with_memoization(true);
/// assert!(!config.symmetry_reduction);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolverConfig {
    /// Cache position values across searches
    pub memoization: bool,
    /// Canonicalize memoization keys under D4 symmetry of the square
    pub symmetry_reduction: bool,
}

impl SolverConfig {
    /// Create the default configuration (memoization and symmetry on).
    pub fn new() -> Self {
        Self {
            memoization: true,
            symmetry_reduction: true,
        }
    }

    /// Enable or disable the memoization table.
    pub fn with_memoization(mut self, enabled: bool) -> Self {
        self.memoization = enabled;
        self
    }

    /// Enable or disable D4 canonicalization of memoization keys.
    pub fn with_symmetry_reduction(mut self, enabled: bool) -> Self {
        self.symmetry_reduction = enabled;
        self
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self::new()
    }
}
