//! Rolling road grade from GPS altitude.
//!
//! The estimator keeps a fixed ring of `(cumulative distance, altitude)`
//! samples taken at fixed distance intervals and maintains the mean of the
//! grades of all ring-adjacent sample pairs. Segment `i` joins slot `i` and
//! slot `(i + 1) % N`, so a full ring of `N` samples has exactly `N`
//! segments, including the one that wraps from the newest sample back to the
//! oldest.
//!
//! # States
//!
//! ```text
//! Cold ──add──▶ Filling ──(N-th sample, seed O(N))──▶ Steady ──add (O(1))──▶ Steady
//! ```
//!
//! - **Cold**: no samples, no mean.
//! - **Filling**: samples are stored, no mean yet. A partially filled ring
//!   has no well-defined wrap segment.
//! - **Steady**: the ring is full and the mean is valid. Each new sample
//!   overwrites the oldest slot.
//!
//! # Incremental Update
//!
//! Overwriting slot `c` changes the two segments that touch it, `c - 1` and
//! `c`. Their old contributions are removed and the new ones added, each
//! divided by `N` before being combined with the running mean. The mean is
//! never re-normalized from the full ring after seeding, so samples with a
//! non-finite position or altitude are dropped before they reach the ring.

/// One ring entry.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GradeSample {
    pub position_m: f32,
    pub altitude_m: f32,
}

impl GradeSample {
    pub const ZERO: Self = Self { position_m: 0.0, altitude_m: 0.0 };
}

/// Grade in percent from `a` to `b`. Zero when the run is zero.
#[inline]
fn segment_grade(
    a: GradeSample,
    b: GradeSample,
) -> f32 {
    let run = a.position_m - b.position_m;
    if run == 0.0 { 0.0 } else { (a.altitude_m - b.altitude_m) / run * 100.0 }
}

/// Estimator lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradePhase {
    Cold,
    Filling,
    Steady,
}

/// Fixed-capacity rolling grade estimator over `N` samples.
#[derive(Debug, Clone)]
pub struct RollingGradeEstimator<const N: usize> {
    samples: [GradeSample; N],
    /// Segment grades in percent, indexed by their first slot.
    segments: [f32; N],
    len: usize,
    /// Next slot to write.
    cursor: usize,
    mean: f32,
    phase: GradePhase,
    step_m: f32,
    min_distance_m: f32,
    travelled_m: f32,
    last_timestamp_s: Option<f32>,
}

impl<const N: usize> RollingGradeEstimator<N> {
    /// Estimator with the default sample spacing and minimum distance.
    pub const fn new() -> Self {
        Self::with_spacing(crate::config::GRADE_STEP_M, crate::config::GRADE_MIN_DISTANCE_M)
    }

    /// Estimator sampling every `step_m` meters and reporting once the
    /// latest sample is at least `min_distance_m` from the start.
    pub const fn with_spacing(
        step_m: f32,
        min_distance_m: f32,
    ) -> Self {
        const { assert!(N >= 2, "a grade ring needs at least two samples") };
        Self {
            samples: [GradeSample::ZERO; N],
            segments: [0.0; N],
            len: 0,
            cursor: 0,
            mean: 0.0,
            phase: GradePhase::Cold,
            step_m,
            min_distance_m,
            travelled_m: 0.0,
            last_timestamp_s: None,
        }
    }

    pub const fn phase(&self) -> GradePhase { self.phase }

    /// Number of resident samples (at most `N`).
    pub const fn len(&self) -> usize { self.len }

    pub const fn is_empty(&self) -> bool { self.len == 0 }

    pub const fn capacity(&self) -> usize { N }

    /// Position of the most recent sample, 0 when empty.
    pub fn latest_position(&self) -> f32 {
        if self.len == 0 { 0.0 } else { self.samples[(self.cursor + N - 1) % N].position_m }
    }

    /// Distance accumulated since the last appended sample.
    pub const fn pending_distance(&self) -> f32 { self.travelled_m }

    fn segment(
        &self,
        i: usize,
    ) -> f32 {
        segment_grade(self.samples[i], self.samples[(i + 1) % N])
    }

    /// Append a sample at the write cursor.
    ///
    /// Non-finite samples are dropped.
    pub fn add_sample(
        &mut self,
        position_m: f32,
        altitude_m: f32,
    ) {
        if !position_m.is_finite() || !altitude_m.is_finite() {
            log::debug!("grade sample dropped: position {}, altitude {}", position_m, altitude_m);
            return;
        }
        let sample = GradeSample { position_m, altitude_m };
        let c = self.cursor;
        match self.phase {
            GradePhase::Cold | GradePhase::Filling => {
                self.samples[c] = sample;
                self.len += 1;
                if self.len == N {
                    self.seed();
                } else {
                    self.phase = GradePhase::Filling;
                }
            }
            GradePhase::Steady => {
                let prev = (c + N - 1) % N;
                let n = N as f32;
                let removed = self.segments[prev] / n + self.segments[c] / n;

                self.samples[c] = sample;
                self.segments[prev] = self.segment(prev);
                self.segments[c] = self.segment(c);

                let added = self.segments[prev] / n + self.segments[c] / n;
                self.mean = self.mean - removed + added;
            }
        }
        self.cursor = (c + 1) % N;
    }

    /// One full pass over the ring on the Filling to Steady transition.
    fn seed(&mut self) {
        let mut sum = 0.0;
        for i in 0..N {
            self.segments[i] = self.segment(i);
            sum += self.segments[i];
        }
        self.mean = sum / N as f32;
        self.phase = GradePhase::Steady;
        log::debug!("grade estimator seeded over {} samples, mean {:.2}%", N, self.mean);
    }

    /// Integrate odometry and append a sample once a full step is covered.
    ///
    /// Only positive speeds accumulate distance. A timestamp that does not
    /// advance contributes nothing, and a non-finite one is ignored.
    pub fn observe(
        &mut self,
        speed_mps: f32,
        timestamp_s: f32,
        altitude_m: f32,
    ) {
        if !timestamp_s.is_finite() {
            log::debug!("grade odometry skipped: timestamp {}", timestamp_s);
            return;
        }
        let dt = match self.last_timestamp_s {
            Some(last) if timestamp_s > last => timestamp_s - last,
            _ => 0.0,
        };
        self.last_timestamp_s = Some(timestamp_s);

        if speed_mps > 0.0 && speed_mps.is_finite() {
            self.travelled_m += speed_mps * dt;
        }
        if self.travelled_m > self.step_m {
            let position = self.latest_position() + self.travelled_m;
            self.add_sample(position, altitude_m);
            self.travelled_m = 0.0;
        }
    }

    /// Running mean grade in percent, once Steady.
    pub fn mean(&self) -> Option<f32> {
        match self.phase {
            GradePhase::Steady => Some(self.mean),
            GradePhase::Cold | GradePhase::Filling => None,
        }
    }

    /// Mean grade gated on minimum distance and a valid position fix.
    ///
    /// `accuracy_m == 0` means the receiver has no fix.
    pub fn mean_grade(
        &self,
        accuracy_m: f32,
    ) -> Option<f32> {
        if accuracy_m == 0.0 || self.latest_position() < self.min_distance_m {
            return None;
        }
        self.mean()
    }
}

impl<const N: usize> Default for RollingGradeEstimator<N> {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Tests
// =============================================================================
