//! Shoot windows: the `[start, end)` interval a scheduled scene occupies.
//!
//! A window is derived from a scene's `scheduled_time` plus its effective
//! duration. Unscheduled scenes have no window and never overlap anything.

use chrono::Duration;

use crate::error::CoreError;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Duration policy
// ---------------------------------------------------------------------------

/// Window length used when a scheduled scene has no positive duration.
pub const DEFAULT_NOMINAL_WINDOW_MINS: i64 = 60;

/// Smallest configurable nominal window (1 minute).
pub const MIN_NOMINAL_WINDOW_MINS: i64 = 1;

/// Largest configurable nominal window (24 hours).
pub const MAX_NOMINAL_WINDOW_MINS: i64 = 1440;

/// How a scene's effective duration is resolved.
///
/// `duration_minutes` wins when positive, then `expected_duration_minutes`,
/// then `nominal_window_mins`. The nominal window keeps two scheduled scenes
/// without durations at the same instant from slipping past detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationPolicy {
    pub nominal_window_mins: i64,
}

impl Default for DurationPolicy {
    fn default() -> Self {
        Self {
            nominal_window_mins: DEFAULT_NOMINAL_WINDOW_MINS,
        }
    }
}

impl DurationPolicy {
    /// Build a policy, validating the nominal window length.
    pub fn with_nominal_window(mins: i64) -> Result<Self, CoreError> {
        validate_nominal_window_mins(mins)?;
        Ok(Self {
            nominal_window_mins: mins,
        })
    }

    /// Effective duration in minutes. Non-positive values count as absent.
    pub fn effective_duration_mins(
        &self,
        duration_minutes: Option<i32>,
        expected_duration_minutes: Option<i32>,
    ) -> i64 {
        duration_minutes
            .filter(|d| *d > 0)
            .or(expected_duration_minutes.filter(|d| *d > 0))
            .map(i64::from)
            .unwrap_or_else(|| self.nominal_window_mins.max(MIN_NOMINAL_WINDOW_MINS))
    }
}

/// Validate a configured nominal window length.
pub fn validate_nominal_window_mins(mins: i64) -> Result<(), CoreError> {
    if !(MIN_NOMINAL_WINDOW_MINS..=MAX_NOMINAL_WINDOW_MINS).contains(&mins) {
        return Err(CoreError::Validation(format!(
            "nominal window must be between {MIN_NOMINAL_WINDOW_MINS} and \
             {MAX_NOMINAL_WINDOW_MINS} minutes, got {mins}"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Shoot window
// ---------------------------------------------------------------------------

/// Half-open interval `[start, end)` during which a scene shoots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShootWindow {
    pub start: Timestamp,
    pub end: Timestamp,
}

impl ShootWindow {
    /// Derive the window for a scene. Returns `None` for unscheduled scenes.
    pub fn for_schedule(
        scheduled_time: Option<Timestamp>,
        duration_minutes: Option<i32>,
        expected_duration_minutes: Option<i32>,
        policy: &DurationPolicy,
    ) -> Option<Self> {
        let start = scheduled_time?;
        let mins = policy.effective_duration_mins(duration_minutes, expected_duration_minutes);
        Some(Self {
            start,
            end: start + Duration::minutes(mins),
        })
    }

    /// Length of the window in whole minutes.
    pub fn duration_mins(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Strict overlap: windows that merely touch do not overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Overlap test that treats a missing window (unscheduled scene) as never
/// overlapping.
pub fn windows_overlap(a: Option<&ShootWindow>, b: Option<&ShootWindow>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.overlaps(b),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn at(hour: u32, minute: u32) -> Timestamp {
        Utc.with_ymd_and_hms(2026, 3, 14, hour, minute, 0).unwrap()
    }

    fn window(start: Timestamp, mins: i32) -> ShootWindow {
        ShootWindow::for_schedule(Some(start), Some(mins), None, &DurationPolicy::default())
            .unwrap()
    }

    // -- effective duration --------------------------------------------------

    #[test]
    fn duration_wins_when_positive() {
        let policy = DurationPolicy::default();
        assert_eq!(policy.effective_duration_mins(Some(45), Some(90)), 45);
    }

    #[test]
    fn expected_duration_is_fallback() {
        let policy = DurationPolicy::default();
        assert_eq!(policy.effective_duration_mins(None, Some(90)), 90);
        assert_eq!(policy.effective_duration_mins(Some(0), Some(90)), 90);
    }

    #[test]
    fn negative_duration_is_ignored() {
        let policy = DurationPolicy::default();
        assert_eq!(policy.effective_duration_mins(Some(-30), Some(20)), 20);
        assert_eq!(
            policy.effective_duration_mins(Some(-30), Some(-5)),
            DEFAULT_NOMINAL_WINDOW_MINS
        );
    }

    #[test]
    fn nominal_window_when_nothing_set() {
        let policy = DurationPolicy::with_nominal_window(15).unwrap();
        assert_eq!(policy.effective_duration_mins(None, None), 15);
    }

    #[test]
    fn nominal_window_bounds_are_validated() {
        assert!(DurationPolicy::with_nominal_window(0).is_err());
        assert!(DurationPolicy::with_nominal_window(MAX_NOMINAL_WINDOW_MINS + 1).is_err());
        assert!(DurationPolicy::with_nominal_window(MIN_NOMINAL_WINDOW_MINS).is_ok());
        assert!(DurationPolicy::with_nominal_window(MAX_NOMINAL_WINDOW_MINS).is_ok());
    }

    // -- window derivation ---------------------------------------------------

    #[test]
    fn unscheduled_scene_has_no_window() {
        let w = ShootWindow::for_schedule(None, Some(60), None, &DurationPolicy::default());
        assert!(w.is_none());
    }

    #[test]
    fn window_end_is_start_plus_duration() {
        let w = window(at(10, 0), 60);
        assert_eq!(w.end, at(11, 0));
        assert_eq!(w.duration_mins(), 60);
    }

    // -- overlap -------------------------------------------------------------

    #[test]
    fn partial_overlap() {
        assert!(window(at(10, 0), 60).overlaps(&window(at(10, 30), 60)));
    }

    #[test]
    fn containment_overlaps() {
        assert!(window(at(9, 0), 240).overlaps(&window(at(10, 0), 15)));
        assert!(window(at(10, 0), 15).overlaps(&window(at(9, 0), 240)));
    }

    #[test]
    fn touching_boundaries_do_not_overlap() {
        let a = window(at(9, 0), 60);
        let b = window(at(10, 0), 60);
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn identical_windows_overlap() {
        assert!(window(at(8, 0), 30).overlaps(&window(at(8, 0), 30)));
    }

    #[test]
    fn missing_window_never_overlaps() {
        let a = window(at(10, 0), 60);
        assert!(!windows_overlap(Some(&a), None));
        assert!(!windows_overlap(None, Some(&a)));
        assert!(!windows_overlap(None, None));
        assert!(windows_overlap(Some(&a), Some(&a)));
    }
}
