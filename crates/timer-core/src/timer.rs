//! The task timer state machine.

use std::fmt;
use std::time::{Duration, Instant};

use tracing::trace;

use crate::clock::{Clock, MonotonicClock};
use crate::fmt::format_duration;
use crate::label::Label;

/// A named, resumable stopwatch.
///
/// A timer accumulates the elapsed time of repeated, possibly interrupted,
/// units of work identified by a component/subcomponent label pair. It is a
/// two-state machine (idle/running) whose entry points are deliberately
/// idempotent: a duplicate [`start`](Self::start) never resets the interval
/// already in progress, and a [`stop`](Self::stop) without a matching start
/// is silently absorbed. Instrumented code can therefore call start and stop
/// defensively from multiple sites without corrupting the total.
///
/// Labels are copied into owned storage at construction and never change
/// afterwards. The timer is not synchronized; it assumes a single owner
/// issuing calls sequentially.
#[derive(Debug, Clone)]
pub struct TaskTimer<C: Clock = MonotonicClock> {
    component: Label,
    subcomponent: Label,
    enabled: bool,
    total: Duration,
    /// `Some` exactly while running.
    started_at: Option<Instant>,
    clock: C,
}

impl TaskTimer {
    /// Creates an idle timer with zero accumulated time.
    ///
    /// An absent subcomponent normalizes to the empty label; it never
    /// survives as an "absent" state inside the timer.
    #[must_use]
    pub fn new(component: Label, subcomponent: Option<Label>) -> Self {
        Self::with_clock(component, subcomponent, MonotonicClock)
    }

    /// Convenience constructor taking plain strings for both labels.
    #[must_use]
    pub fn from_names(component: impl Into<Label>, subcomponent: impl Into<Label>) -> Self {
        Self::new(component.into(), Some(subcomponent.into()))
    }
}

impl<C: Clock> TaskTimer<C> {
    /// Like [`TaskTimer::new`] with an explicit time source.
    #[must_use]
    pub fn with_clock(component: Label, subcomponent: Option<Label>, clock: C) -> Self {
        Self {
            component,
            subcomponent: subcomponent.unwrap_or_default(),
            enabled: true,
            total: Duration::ZERO,
            started_at: None,
            clock,
        }
    }

    /// Starts the clock if it is not already running.
    ///
    /// Calling start while running is a no-op: the original start instant is
    /// kept so the interval in progress is not truncated.
    pub fn start(&mut self) {
        if self.started_at.is_none() {
            self.started_at = Some(self.clock.now());
            trace!(
                component = %self.component,
                subcomponent = %self.subcomponent,
                "task timer started"
            );
        }
    }

    /// Stops the clock and banks the elapsed time since the effective start.
    ///
    /// Calling stop while idle (no matching start, or a second consecutive
    /// stop) is a no-op and leaves the total untouched.
    pub fn stop(&mut self) {
        if let Some(started_at) = self.started_at.take() {
            let elapsed = self.clock.now().saturating_duration_since(started_at);
            self.total += elapsed;
            trace!(
                component = %self.component,
                subcomponent = %self.subcomponent,
                elapsed_ms = elapsed.as_secs_f64() * 1000.0,
                "task timer stopped"
            );
        }
    }

    /// The component label, as set at construction.
    #[must_use]
    pub const fn component(&self) -> &Label {
        &self.component
    }

    /// The subcomponent label; empty when none was given at construction.
    #[must_use]
    pub const fn subcomponent(&self) -> &Label {
        &self.subcomponent
    }

    /// Whether the timer records time. Always true in the current design;
    /// kept for forward compatibility with a disabled/no-op mode.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Whether a start has been recorded without a matching stop.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    /// Accumulated time across all completed runs.
    ///
    /// Monotonically non-decreasing over the timer's lifetime; a run in
    /// progress contributes nothing until its stop.
    #[must_use]
    pub const fn total_time(&self) -> Duration {
        self.total
    }

    /// Accumulated time in milliseconds, as a non-negative float.
    #[must_use]
    pub fn total_time_ms(&self) -> f64 {
        self.total.as_secs_f64() * 1000.0
    }
}

impl<C: Clock> fmt::Display for TaskTimer<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.subcomponent.is_empty() {
            write!(f, "{}: {}", self.component, format_duration(self.total))
        } else {
            write!(
                f,
                "{}/{}: {}",
                self.component,
                self.subcomponent,
                format_duration(self.total)
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    const MS: Duration = Duration::from_millis(1);

    /// A timer driven by a manual clock, plus the handle that advances it.
    fn manual_timer(component: &str, subcomponent: Option<&str>) -> (TaskTimer<ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        let timer = TaskTimer::with_clock(
            Label::new(component),
            subcomponent.map(Label::new),
            clock.clone(),
        );
        (timer, clock)
    }

    #[test]
    fn new_timer_is_enabled_idle_and_zeroed() {
        let timer = TaskTimer::new(Label::new("component"), Some(Label::new("subcomponent")));

        assert!(timer.is_enabled());
        assert!(!timer.is_running());
        assert_eq!(timer.total_time(), Duration::ZERO);
        assert_eq!(*timer.component(), "component");
        assert_eq!(*timer.subcomponent(), "subcomponent");
    }

    #[test]
    #[expect(clippy::float_cmp, reason = "a fresh timer is exactly zero")]
    fn new_timer_reports_exactly_zero_milliseconds() {
        let timer = TaskTimer::new(Label::new("component"), None);
        assert_eq!(timer.total_time_ms(), 0.0);
    }

    #[test]
    fn empty_component_is_valid() {
        let timer = TaskTimer::new(Label::empty(), Some(Label::new("subcomponent")));
        assert!(timer.component().is_empty());
        assert_eq!(*timer.subcomponent(), "subcomponent");
    }

    #[test]
    fn empty_subcomponent_is_valid() {
        let timer = TaskTimer::new(Label::new("component"), Some(Label::empty()));
        assert_eq!(*timer.component(), "component");
        assert!(timer.subcomponent().is_empty());
    }

    #[test]
    fn absent_subcomponent_normalizes_to_empty() {
        let absent = TaskTimer::new(Label::new("component"), None);
        let explicit = TaskTimer::new(Label::new("component"), Some(Label::empty()));

        assert_eq!(absent.subcomponent(), explicit.subcomponent());
        assert!(absent.subcomponent().is_empty());
    }

    #[test]
    fn from_names_behaves_like_new() {
        let timer = TaskTimer::from_names("component", "subcomponent");

        assert!(timer.is_enabled());
        assert_eq!(*timer.component(), "component");
        assert_eq!(*timer.subcomponent(), "subcomponent");
        assert_eq!(timer.total_time(), Duration::ZERO);
    }

    #[test]
    fn single_run_accumulates_its_duration() {
        let (mut timer, clock) = manual_timer("component", Some("subcomponent"));

        timer.start();
        clock.advance(10 * MS);
        timer.stop();

        assert_eq!(timer.total_time(), 10 * MS);
        assert!(!timer.is_running());
    }

    #[test]
    fn repeated_runs_accumulate() {
        let (mut timer, clock) = manual_timer("component", Some("subcomponent"));

        for _ in 0..5 {
            timer.start();
            clock.advance(10 * MS);
            timer.stop();
        }

        assert_eq!(timer.total_time(), 50 * MS);
    }

    #[test]
    fn duplicate_start_does_not_truncate_the_run() {
        let (mut timer, clock) = manual_timer("component", Some("subcomponent"));

        timer.start();
        clock.advance(5 * MS);
        // Must not reset the start instant recorded above.
        timer.start();
        clock.advance(5 * MS);
        timer.stop();

        assert_eq!(timer.total_time(), 10 * MS);
    }

    #[test]
    fn duplicate_stop_adds_nothing() {
        let (mut timer, clock) = manual_timer("component", Some("subcomponent"));

        timer.start();
        clock.advance(10 * MS);
        timer.stop();
        clock.advance(30 * MS);
        timer.stop();

        assert_eq!(timer.total_time(), 10 * MS);
    }

    #[test]
    fn stop_before_any_start_is_a_no_op() {
        let (mut timer, clock) = manual_timer("component", Some("subcomponent"));

        timer.stop();
        assert_eq!(timer.total_time(), Duration::ZERO);

        timer.start();
        clock.advance(10 * MS);
        timer.stop();

        assert_eq!(timer.total_time(), 10 * MS);
    }

    #[test]
    fn idle_time_between_runs_is_not_counted() {
        let (mut timer, clock) = manual_timer("component", Some("subcomponent"));

        timer.start();
        clock.advance(10 * MS);
        timer.stop();
        clock.advance(100 * MS);
        timer.start();
        clock.advance(7 * MS);
        timer.stop();

        assert_eq!(timer.total_time(), 17 * MS);
    }

    #[test]
    fn mixed_sequence_counts_only_effective_runs() {
        let (mut timer, clock) = manual_timer("component", Some("subcomponent"));

        // stop while idle, double start, double stop, interleaved with idle gaps
        timer.stop();
        timer.start();
        clock.advance(3 * MS);
        timer.start();
        clock.advance(4 * MS);
        timer.stop();
        timer.stop();
        clock.advance(50 * MS);
        timer.start();
        clock.advance(2 * MS);
        timer.stop();

        assert_eq!(timer.total_time(), 9 * MS);
    }

    #[test]
    fn total_never_decreases() {
        let (mut timer, clock) = manual_timer("component", Some("subcomponent"));
        let mut last = timer.total_time();
        let mut check = |timer: &TaskTimer<ManualClock>| {
            assert!(timer.total_time() >= last);
            last = timer.total_time();
        };

        for _ in 0..5 {
            timer.start();
            check(&timer);
            clock.advance(MS);
            check(&timer);
            timer.stop();
            check(&timer);
            timer.stop();
            check(&timer);
        }
    }

    #[test]
    fn running_state_tracks_effective_transitions() {
        let (mut timer, _clock) = manual_timer("component", None);

        assert!(!timer.is_running());
        timer.start();
        assert!(timer.is_running());
        timer.start();
        assert!(timer.is_running());
        timer.stop();
        assert!(!timer.is_running());
        timer.stop();
        assert!(!timer.is_running());
    }

    #[test]
    fn labels_are_independent_of_caller_storage() {
        let mut name = String::from("component");
        let timer = TaskTimer::from_names(name.as_str(), "subcomponent");
        name.clear();

        assert_eq!(*timer.component(), "component");
    }

    #[test]
    fn display_includes_labels_and_formatted_total() {
        let (mut timer, clock) = manual_timer("plugin", Some("process"));
        timer.start();
        clock.advance(1_234 * MS);
        timer.stop();

        assert_eq!(timer.to_string(), "plugin/process: 1.234s");
    }

    #[test]
    fn display_omits_empty_subcomponent() {
        let (timer, _clock) = manual_timer("plugin", None);
        assert_eq!(timer.to_string(), "plugin: 0ms");
    }
}
