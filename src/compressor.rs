use std::mem;

use crate::slope::SlopeBounds;

/// A measured value at one position of the stream, or the absence of one.
///
/// `Absent` marks a gap in the series (no measurement at that timestamp) and
/// is distinct from every numeric value, including zero. It replaces the NaN
/// sentinel often used for this purpose, so a gap can never be mistaken for
/// data by an accidental comparison.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Present(f64),
    Absent,
}

impl Value {
    /// Returns `true` if this is a gap marker.
    #[inline]
    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }
}

/// A single time-series sample: a timestamp and a value that may be absent.
///
/// The same type describes input samples and emitted output points; gap
/// markers appear in the compressed sequence with [`Value::Absent`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub timestamp: f64,
    pub value: Value,
}

impl Sample {
    /// Creates a sample carrying a measured value.
    pub fn new(timestamp: f64, value: f64) -> Self {
        Self {
            timestamp,
            value: Value::Present(value),
        }
    }

    /// Creates a gap marker at the given timestamp.
    pub fn gap(timestamp: f64) -> Self {
        Self {
            timestamp,
            value: Value::Absent,
        }
    }
}

/// Error returned when a compressor is constructed with an unusable tolerance.
///
/// The tolerance is half the vertical width of the compression corridor and
/// must be a finite, strictly positive number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvalidTolerance(pub f64);

impl std::fmt::Display for InvalidTolerance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "tolerance must be a finite positive number, got {}",
            self.0
        )
    }
}

impl std::error::Error for InvalidTolerance {}

/// Where the compressor currently stands in the stream.
#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
    /// Nothing pending: fresh, flushed, or just past a full series break.
    Idle,
    /// Exactly one committed point. Already emitted; it becomes the anchor
    /// as soon as a second sample opens a corridor.
    Anchored { t: f64, v: f64 },
    /// Corridor open: the anchor is in the output, the candidate is pending,
    /// and `bounds` has been tightened by every sample since the anchor.
    Open {
        anchor_t: f64,
        anchor_v: f64,
        cand_t: f64,
        cand_v: f64,
        bounds: SlopeBounds,
    },
    /// First valid sample after a gap, held back until the next sample makes
    /// it the anchor of a fresh segment (or the stream is flushed).
    Resuming { t: f64, v: f64 },
    /// A gap marker pending emission.
    Gap { at: f64 },
}

/// The swinging-door compressor.
///
/// Feeds on a time-ordered stream of [`Sample`]s and retains only the points
/// needed so that the straight line between any two consecutive retained
/// points stays within `tolerance` of the samples it replaces. Each call to
/// [`feed`](Compressor::feed) performs an O(1) state transition and emits at
/// most one point; [`flush`](Compressor::flush) must be called once after the
/// last sample, or the pending tail point is lost.
///
/// # Example
/// ```
/// use swingdoor::{Compressor, Sample};
///
/// let mut c = Compressor::new(0.1).unwrap();
/// c.feed(Sample::new(0.0, 1.0));
/// c.feed(Sample::new(1.0, 2.0));
/// c.feed(Sample::new(2.0, 3.0));
/// c.flush();
///
/// // Collinear samples collapse to their endpoints.
/// assert_eq!(c.points(), &[Sample::new(0.0, 1.0), Sample::new(2.0, 3.0)]);
/// ```
#[derive(Debug, Clone)]
pub struct Compressor {
    /// Half-width of the error corridor.
    tolerance: f64,
    state: State,
    /// The compressed series, strictly increasing in time, append-only.
    points: Vec<Sample>,
    /// Samples dropped for a non-increasing timestamp or a NaN input.
    rejected: u64,
}

impl Compressor {
    /// Creates a compressor with the given corridor half-width.
    ///
    /// Returns [`InvalidTolerance`] unless `tolerance` is finite and
    /// strictly positive.
    pub fn new(tolerance: f64) -> Result<Self, InvalidTolerance> {
        if !tolerance.is_finite() || tolerance <= 0.0 {
            return Err(InvalidTolerance(tolerance));
        }
        Ok(Self {
            tolerance,
            state: State::Idle,
            points: Vec::new(),
            rejected: 0,
        })
    }

    /// Consumes one sample and returns the point it forced out, if any.
    ///
    /// Samples are expected in strictly increasing timestamp order; a sample
    /// whose timestamp does not advance past the pending candidate — gap
    /// markers included — is dropped and counted in
    /// [`rejected`](Compressor::rejected), as is any sample carrying a NaN
    /// timestamp or a NaN payload.
    pub fn feed(&mut self, sample: Sample) -> Option<Sample> {
        // NaN never orders against anything, so it could slip past the
        // timestamp guards below; a NaN payload would sail through the slope
        // arithmetic unnoticed (`max`/`min` ignore NaN) and end up retained
        // as data. Neither may reach the state machine.
        if sample.timestamp.is_nan() {
            return self.reject();
        }
        match sample.value {
            Value::Present(v) if v.is_nan() => self.reject(),
            Value::Present(v) => self.feed_present(sample.timestamp, v),
            Value::Absent => self.feed_absent(sample.timestamp),
        }
    }

    /// Drains the pending candidate at end of stream.
    ///
    /// Emits the held point (or a held gap marker) and resets the compressor
    /// to its idle state, so the call is idempotent: a second flush returns
    /// `None`. Without this call the final point of the stream would never
    /// appear in the output.
    pub fn flush(&mut self) -> Option<Sample> {
        match mem::replace(&mut self.state, State::Idle) {
            State::Idle | State::Anchored { .. } => None,
            State::Open { cand_t, cand_v, .. } => self.emit(Sample::new(cand_t, cand_v)),
            State::Resuming { t, v } => self.emit(Sample::new(t, v)),
            State::Gap { at } => self.emit(Sample::gap(at)),
        }
    }

    /// The compressed series accumulated so far.
    pub fn points(&self) -> &[Sample] {
        &self.points
    }

    /// Consumes the compressor and returns the compressed series.
    pub fn into_points(self) -> Vec<Sample> {
        self.points
    }

    /// The corridor half-width this compressor was built with.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Number of samples dropped: non-increasing timestamps, NaN timestamps,
    /// or NaN values.
    pub fn rejected(&self) -> u64 {
        self.rejected
    }

    // ── state transitions ──────────────────────────────────────────────

    fn feed_present(&mut self, t: f64, v: f64) -> Option<Sample> {
        match mem::replace(&mut self.state, State::Idle) {
            State::Idle => {
                // First sample of a series: commit it right away. It seeds
                // both the output and the first anchor.
                self.state = State::Anchored { t, v };
                self.emit(Sample::new(t, v))
            }
            State::Anchored { t: at, v: av } => {
                if t <= at {
                    self.state = State::Anchored { t: at, v: av };
                    return self.reject();
                }
                self.state = State::Open {
                    anchor_t: at,
                    anchor_v: av,
                    cand_t: t,
                    cand_v: v,
                    bounds: Self::seed_bounds(at, av, t, v, self.tolerance),
                };
                None
            }
            State::Open {
                anchor_t,
                anchor_v,
                cand_t,
                cand_v,
                mut bounds,
            } => {
                if t <= cand_t {
                    self.state = State::Open {
                        anchor_t,
                        anchor_v,
                        cand_t,
                        cand_v,
                        bounds,
                    };
                    return self.reject();
                }
                bounds.tighten(v - anchor_v, t - anchor_t, self.tolerance);
                if bounds.is_closed() {
                    // The previous candidate is the last point provably
                    // inside the corridor: commit it and swing a new door
                    // from it to the incoming sample.
                    self.state = State::Open {
                        anchor_t: cand_t,
                        anchor_v: cand_v,
                        cand_t: t,
                        cand_v: v,
                        bounds: Self::seed_bounds(cand_t, cand_v, t, v, self.tolerance),
                    };
                    self.emit(Sample::new(cand_t, cand_v))
                } else {
                    self.state = State::Open {
                        anchor_t,
                        anchor_v,
                        cand_t: t,
                        cand_v: v,
                        bounds,
                    };
                    None
                }
            }
            State::Resuming { t: ht, v: hv } => {
                if t <= ht {
                    self.state = State::Resuming { t: ht, v: hv };
                    return self.reject();
                }
                // The held sample becomes the anchor of the fresh segment
                // and enters the output now.
                self.state = State::Open {
                    anchor_t: ht,
                    anchor_v: hv,
                    cand_t: t,
                    cand_v: v,
                    bounds: Self::seed_bounds(ht, hv, t, v, self.tolerance),
                };
                self.emit(Sample::new(ht, hv))
            }
            State::Gap { at } => {
                if t <= at {
                    self.state = State::Gap { at };
                    return self.reject();
                }
                // The gap marker goes out; the incoming sample is held until
                // the corridor of the new segment opens.
                self.state = State::Resuming { t, v };
                self.emit(Sample::gap(at))
            }
        }
    }

    fn feed_absent(&mut self, t: f64) -> Option<Sample> {
        match mem::replace(&mut self.state, State::Idle) {
            // A gap before any data carries no information.
            State::Idle => None,
            // The lone committed point is already in the output; only the
            // marker remains to be recorded.
            State::Anchored { t: at, v: av } => {
                if t <= at {
                    self.state = State::Anchored { t: at, v: av };
                    return self.reject();
                }
                self.state = State::Gap { at: t };
                None
            }
            State::Open {
                anchor_t,
                anchor_v,
                cand_t,
                cand_v,
                bounds,
            } => {
                if t <= cand_t {
                    self.state = State::Open {
                        anchor_t,
                        anchor_v,
                        cand_t,
                        cand_v,
                        bounds,
                    };
                    return self.reject();
                }
                self.state = State::Gap { at: t };
                self.emit(Sample::new(cand_t, cand_v))
            }
            State::Resuming { t: ht, v: hv } => {
                if t <= ht {
                    self.state = State::Resuming { t: ht, v: hv };
                    return self.reject();
                }
                self.state = State::Gap { at: t };
                self.emit(Sample::new(ht, hv))
            }
            // A second consecutive gap breaks the series entirely; the next
            // valid sample restarts from scratch.
            State::Gap { at } => {
                if t <= at {
                    self.state = State::Gap { at };
                    return self.reject();
                }
                self.emit(Sample::gap(at))
            }
        }
    }

    // ── internal helpers ───────────────────────────────────────────────

    /// Opens a door from a freshly committed anchor to the sample that
    /// follows it. A zero run would be a degenerate segment; `tighten`
    /// leaves the bounds permissive in that case.
    fn seed_bounds(anchor_t: f64, anchor_v: f64, t: f64, v: f64, tolerance: f64) -> SlopeBounds {
        let mut bounds = SlopeBounds::permissive();
        bounds.tighten(v - anchor_v, t - anchor_t, tolerance);
        bounds
    }

    fn emit(&mut self, sample: Sample) -> Option<Sample> {
        debug_assert!(
            self.points
                .last()
                .map_or(true, |last| last.timestamp < sample.timestamp),
            "output timestamps must be strictly increasing"
        );
        self.points.push(sample);
        Some(sample)
    }

    fn reject(&mut self) -> Option<Sample> {
        self.rejected += 1;
        None
    }
}
