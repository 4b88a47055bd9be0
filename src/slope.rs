/// The pair of pivot slopes that delimit an open compression corridor.
///
/// Both slopes are measured as rise/run from the current anchor. `upper`
/// tracks the steepest slope forced from below (it only ever grows) and
/// `lower` the shallowest slope forced from above (it only ever shrinks).
/// While every sample since the anchor fits some straight line within
/// `±tolerance`, the interval `[upper, lower]` is non-empty; the corridor
/// closes the moment `upper > lower`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlopeBounds {
    upper: f64,
    lower: f64,
}

impl SlopeBounds {
    /// Creates bounds that admit every slope (nothing constrains them yet).
    pub fn permissive() -> Self {
        Self {
            upper: f64::NEG_INFINITY,
            lower: f64::INFINITY,
        }
    }

    /// Tightens the bounds with one sample at vertical offset `rise` and
    /// horizontal offset `run` from the anchor.
    ///
    /// A non-positive `run` (two samples sharing a timestamp across an anchor
    /// transition) is a degenerate segment: it constrains nothing and leaves
    /// the bounds untouched rather than dividing by zero.
    pub fn tighten(&mut self, rise: f64, run: f64, tolerance: f64) {
        if run <= 0.0 {
            return;
        }
        self.upper = self.upper.max((rise - tolerance) / run);
        self.lower = self.lower.min((rise + tolerance) / run);
    }

    /// Returns `true` once the pivot slopes have crossed: no single line from
    /// the anchor can pass within tolerance of every sample seen.
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.upper > self.lower
    }

    /// The steepest admissible slope from below.
    #[inline]
    pub fn upper(&self) -> f64 {
        self.upper
    }

    /// The shallowest admissible slope from above.
    #[inline]
    pub fn lower(&self) -> f64 {
        self.lower
    }
}

impl Default for SlopeBounds {
    fn default() -> Self {
        Self::permissive()
    }
}
