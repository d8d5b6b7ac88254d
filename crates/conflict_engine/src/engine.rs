//! Conflict detector facade.

use contracts::{ConflictError, ConflictResult, DetectorConfig, MotionPath, TimeSpan};
use tracing::{debug, instrument, warn};

use crate::advancement::ConservativeAdvancement;
use crate::broad_phase::{overlap_window, require_overlap};
use crate::narrow_phase;

/// Pairwise conflict detector.
///
/// Stateless apart from its configuration; a single instance can be shared
/// across threads and reused for any number of pairs.
#[derive(Debug, Clone, Default)]
pub struct DetectConflict {
    config: DetectorConfig,
}

impl DetectConflict {
    /// Create a detector.
    ///
    /// # Errors
    /// `ConflictError::ConfigValidation` if the time tolerance is not a
    /// positive finite number.
    pub fn new(config: DetectorConfig) -> Result<Self, ConflictError> {
        config.check()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Cheap necessary condition for a conflict: same map and overlapping
    /// time spans.
    pub fn broad_phase<A, B>(a: &A, b: &B) -> bool
    where
        A: MotionPath + ?Sized,
        B: MotionPath + ?Sized,
    {
        overlap_window(a, b).is_some()
    }

    /// Check two paths for a conflict.
    ///
    /// Runs the broad phase first and only searches pairs that pass it, so
    /// any two paths may be given.
    #[instrument(
        name = "conflict_between",
        level = "debug",
        skip(self, a, b),
        fields(map_a = %a.surface_id(), map_b = %b.surface_id())
    )]
    pub fn between<A, B>(&self, a: &A, b: &B) -> ConflictResult
    where
        A: MotionPath + ?Sized,
        B: MotionPath + ?Sized,
    {
        metrics::counter!("conflict_checks_total", "phase" => "broad").increment(1);

        let Some(window) = overlap_window(a, b) else {
            debug!("broad phase rejected pair");
            return ConflictResult::none();
        };

        self.search(a, b, window)
    }

    /// Search two paths that already passed the broad phase.
    ///
    /// # Errors
    /// `SurfaceMismatch`, `EmptyPath` or `DisjointTimeSpans` if the pair
    /// would not pass [`DetectConflict::broad_phase`].
    #[instrument(
        name = "conflict_narrow_phase",
        level = "debug",
        skip(self, a, b),
        fields(map = %a.surface_id())
    )]
    pub fn narrow_phase<A, B>(&self, a: &A, b: &B) -> Result<ConflictResult, ConflictError>
    where
        A: MotionPath + ?Sized,
        B: MotionPath + ?Sized,
    {
        let window = require_overlap(a, b)?;
        Ok(self.search(a, b, window))
    }

    fn search<A, B>(&self, a: &A, b: &B, window: TimeSpan) -> ConflictResult
    where
        A: MotionPath + ?Sized,
        B: MotionPath + ?Sized,
    {
        metrics::counter!("conflict_checks_total", "phase" => "narrow").increment(1);

        let advancement = ConservativeAdvancement::new(self.config.time_tolerance);
        let outcome = narrow_phase::search(a, b, window, &advancement);

        metrics::histogram!("conflict_narrow_phase_samples").record(outcome.samples as f64);

        if let Ok(conflict) = outcome.result.data() {
            metrics::counter!("conflict_detected_total").increment(1);
            let (segment_a, segment_b) = conflict.segments();
            if outcome.conservative {
                warn!(
                    time = conflict.time(),
                    %segment_a,
                    %segment_b,
                    samples = outcome.samples,
                    "clearance below time resolution, reporting conflict"
                );
            } else {
                debug!(
                    time = conflict.time(),
                    %segment_a,
                    %segment_b,
                    pairs = outcome.pairs,
                    samples = outcome.samples,
                    "conflict detected"
                );
            }
        } else {
            debug!(
                %window,
                pairs = outcome.pairs,
                samples = outcome.samples,
                "no conflict"
            );
        }

        outcome.result
    }
}
