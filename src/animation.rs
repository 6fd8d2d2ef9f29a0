//! Count-up and progress-fill state for elements revealed on scroll.
//!
//! Everything here is independent of the DOM: the reveal wiring feeds in
//! frame timestamps and writes out whatever these types compute.

use crate::pricing::{format_plain_number, format_whole_euros};

/// Ease-out cubic: fast start, gentle landing on 1.0.
pub fn ease_out_cubic(progress: f64) -> f64 {
    1.0 - (1.0 - progress).powi(3)
}

/// Fraction of `duration_ms` covered after `elapsed_ms`, clamped to [0, 1].
pub fn progress_at(elapsed_ms: f64, duration_ms: f64) -> f64 {
    if duration_ms <= 0.0 {
        return 1.0;
    }
    (elapsed_ms / duration_ms).clamp(0.0, 1.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CounterFormat {
    #[default]
    Plain,
    Currency,
}

impl CounterFormat {
    /// Read the `data-format` attribute; anything unknown is plain.
    pub fn from_attr(attr: Option<&str>) -> Self {
        match attr.map(str::trim) {
            Some("currency") => CounterFormat::Currency,
            _ => CounterFormat::Plain,
        }
    }

    pub fn render(self, value: f64) -> String {
        match self {
            CounterFormat::Plain => format_plain_number(value),
            CounterFormat::Currency => format_whole_euros(value),
        }
    }
}

/// What a tracked element does when it is first seen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RevealKind {
    Counter(AnimatedCounter),
    Progress(ProgressIndicator),
    Generic(FireOnce),
}

impl RevealKind {
    pub fn generic() -> Self {
        RevealKind::Generic(FireOnce::default())
    }

    /// Classify an element from its data attributes. Counters win over
    /// progress bars, which win over plain reveals.
    pub fn from_attrs(counter: Option<&str>, format: Option<&str>, progress: Option<&str>) -> Self {
        match (counter, progress) {
            (Some(target), _) => RevealKind::Counter(AnimatedCounter::from_attrs(target, format)),
            (None, Some(percent)) => RevealKind::Progress(ProgressIndicator::from_attr(percent)),
            (None, None) => RevealKind::generic(),
        }
    }

    /// Single-fire trigger shared by every kind.
    pub fn fire(&mut self) -> bool {
        match self {
            RevealKind::Counter(counter) => counter.fire(),
            RevealKind::Progress(bar) => bar.fire(),
            RevealKind::Generic(once) => once.fire(),
        }
    }

    /// Minimum visible fraction before this kind fires.
    pub fn threshold(&self, reveal: f64, counter: f64) -> f64 {
        match self {
            RevealKind::Generic(_) => reveal,
            RevealKind::Counter(_) | RevealKind::Progress(_) => counter,
        }
    }
}

/// Whether an observer entry counts as seen: intersecting, and with at
/// least `threshold` of the element inside the viewport.
pub fn crosses_threshold(intersecting: bool, ratio: f64, threshold: f64) -> bool {
    intersecting && ratio >= threshold
}

/// How reveal targets reach their final state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealMode {
    /// Wait for visibility, then count up and fill.
    Animate,
    /// Final state right away, no frames.
    Immediate,
}

impl RevealMode {
    pub fn for_motion(reduced_motion: bool) -> Self {
        if reduced_motion {
            RevealMode::Immediate
        } else {
            RevealMode::Animate
        }
    }
}

/// Pick the page-wide mode. Disabled effects, reduced motion and a browser
/// without `IntersectionObserver` all show every target immediately.
pub fn reveal_mode(enabled: bool, reduced_motion: bool, has_observer: bool) -> RevealMode {
    if !enabled || !has_observer {
        return RevealMode::Immediate;
    }
    RevealMode::for_motion(reduced_motion)
}

/// What to write into an element when it fires.
#[derive(Debug, Clone, PartialEq)]
pub enum RevealEffect {
    /// Visible class only.
    Show,
    /// Counter text, already final.
    FinalText(String),
    /// Show `initial`, then drive `run` once per frame.
    CountUp { initial: String, run: CounterRun },
    /// Progress bar width.
    Fill(String),
}

impl RevealKind {
    pub fn effect(&self, mode: RevealMode, duration_ms: f64) -> RevealEffect {
        match (self, mode) {
            (RevealKind::Counter(counter), RevealMode::Immediate) => {
                RevealEffect::FinalText(counter.final_text())
            }
            (RevealKind::Counter(counter), RevealMode::Animate) => RevealEffect::CountUp {
                initial: counter.format.render(0.0),
                run: counter.start(duration_ms),
            },
            (RevealKind::Progress(bar), _) => RevealEffect::Fill(bar.css_width()),
            (RevealKind::Generic(_), _) => RevealEffect::Show,
        }
    }
}

/// Reveal targets keyed by their element handle.
#[derive(Debug, Clone)]
pub struct RevealSet<T> {
    targets: Vec<(T, RevealKind)>,
}

impl<T: PartialEq> RevealSet<T> {
    pub fn new(targets: Vec<(T, RevealKind)>) -> Self {
        Self { targets }
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(T, RevealKind)> {
        self.targets.iter()
    }

    /// Fire `target` and return its effect. `None` for unknown targets and
    /// for targets that already fired.
    pub fn fire(&mut self, target: &T, mode: RevealMode, duration_ms: f64) -> Option<RevealEffect> {
        let (_, kind) = self.targets.iter_mut().find(|(t, _)| t == target)?;
        if !kind.fire() {
            return None;
        }
        Some(kind.effect(mode, duration_ms))
    }
}

/// A single-fire reveal. `fire` answers `true` exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FireOnce {
    fired: bool,
}

impl FireOnce {
    pub fn fire(&mut self) -> bool {
        !std::mem::replace(&mut self.fired, true)
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimatedCounter {
    pub target: f64,
    pub format: CounterFormat,
    once: FireOnce,
}

impl AnimatedCounter {
    pub fn new(target: f64, format: CounterFormat) -> Self {
        Self {
            target,
            format,
            once: FireOnce::default(),
        }
    }

    /// Build from the `data-counter` and `data-format` attributes. A target
    /// that is not a number counts up to zero.
    pub fn from_attrs(target: &str, format: Option<&str>) -> Self {
        let target = target.trim().parse::<f64>().ok().filter(|v| v.is_finite()).unwrap_or(0.0);
        Self::new(target, CounterFormat::from_attr(format))
    }

    pub fn fire(&mut self) -> bool {
        self.once.fire()
    }

    pub fn has_fired(&self) -> bool {
        self.once.has_fired()
    }

    /// Text shown once the animation has finished.
    pub fn final_text(&self) -> String {
        self.format.render(self.target)
    }

    pub fn start(&self, duration_ms: f64) -> CounterRun {
        CounterRun {
            target: self.target,
            format: self.format,
            duration_ms,
            started_at: None,
        }
    }
}

/// One frame of a running count-up.
#[derive(Debug, Clone, PartialEq)]
pub struct CounterFrame {
    pub text: String,
    pub done: bool,
}

/// An in-flight count-up, anchored to the first frame timestamp it sees.
#[derive(Debug, Clone, PartialEq)]
pub struct CounterRun {
    target: f64,
    format: CounterFormat,
    duration_ms: f64,
    started_at: Option<f64>,
}

impl CounterRun {
    /// Compute the text for the frame at `timestamp_ms`.
    pub fn frame(&mut self, timestamp_ms: f64) -> CounterFrame {
        let start = *self.started_at.get_or_insert(timestamp_ms);
        let progress = progress_at(timestamp_ms - start, self.duration_ms);
        if progress >= 1.0 {
            return self.finish();
        }
        CounterFrame {
            text: self.format.render(ease_out_cubic(progress) * self.target),
            done: false,
        }
    }

    /// Jump straight to the final value.
    pub fn finish(&self) -> CounterFrame {
        CounterFrame {
            text: self.format.render(self.target),
            done: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressIndicator {
    pub target_percent: f64,
    once: FireOnce,
}

impl ProgressIndicator {
    pub fn new(target_percent: f64) -> Self {
        let target_percent = if target_percent.is_finite() {
            target_percent.clamp(0.0, 100.0)
        } else {
            0.0
        };
        Self {
            target_percent,
            once: FireOnce::default(),
        }
    }

    pub fn from_attr(percent: &str) -> Self {
        Self::new(percent.trim().trim_end_matches('%').parse().unwrap_or(0.0))
    }

    pub fn fire(&mut self) -> bool {
        self.once.fire()
    }

    pub fn has_fired(&self) -> bool {
        self.once.has_fired()
    }

    /// CSS width for the filled bar.
    pub fn css_width(&self) -> String {
        format!("{}%", self.target_percent)
    }
}
