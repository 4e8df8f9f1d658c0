use std::time::Duration;

use tracing::debug;

use crate::view_id::ViewTypeId;

/// Durations of the three fades the container plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionTimings {
    /// Fade-in of the very first view shown in an empty container.
    pub initial_fade_in: Duration,
    /// Fade-out of the current view before it is replaced.
    pub fade_out: Duration,
    /// Fade-in of a view that replaced another one.
    pub fade_in: Duration,
}

impl TransitionTimings {
    pub const DEFAULT_INITIAL_FADE_IN: Duration = Duration::from_millis(250);
    pub const DEFAULT_FADE_OUT: Duration = Duration::from_millis(100);
    pub const DEFAULT_FADE_IN: Duration = Duration::from_millis(300);

    /// All fades complete on the next `advance`, whatever `dt` is.
    pub fn instant() -> Self {
        Self {
            initial_fade_in: Duration::ZERO,
            fade_out: Duration::ZERO,
            fade_in: Duration::ZERO,
        }
    }
}

impl Default for TransitionTimings {
    fn default() -> Self {
        Self {
            initial_fade_in: Self::DEFAULT_INITIAL_FADE_IN,
            fade_out: Self::DEFAULT_FADE_OUT,
            fade_in: Self::DEFAULT_FADE_IN,
        }
    }
}

/// Emitted by [`Crossfade::advance`] when a phase completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionEvent {
    /// The fade-out finished and this view is now the displayed child.
    Swapped(ViewTypeId),
    /// The fade-in finished; the container is fully opaque again.
    Settled(ViewTypeId),
}

/// Linear opacity ramp.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Fade {
    from: f32,
    to: f32,
    elapsed: Duration,
    duration: Duration,
}

impl Fade {
    fn new(from: f32, to: f32, duration: Duration) -> Self {
        Self {
            from,
            to,
            elapsed: Duration::ZERO,
            duration,
        }
    }

    fn advance(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt).min(self.duration);
    }

    fn is_done(&self) -> bool {
        self.elapsed >= self.duration
    }

    fn value(&self) -> f32 {
        if self.is_done() {
            return self.to;
        }
        let t = self.elapsed.as_secs_f32() / self.duration.as_secs_f32();
        self.from + (self.to - self.from) * t
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Phase {
    Steady,
    FadingIn(Fade),
    FadingOut { fade: Fade, target: ViewTypeId },
}

/// Two-phase crossfade between the views of a single-child container.
///
/// The state machine never reads a clock: the host drives it with
/// [`advance`](Self::advance) and reacts to the returned events. At any time
/// exactly one view (or none) is displayed; a replacement only becomes the
/// displayed view once the fade-out has completed, and every swap is followed
/// by a fade-in.
///
/// A `display` call while a transition is running supersedes it: during a
/// fade-out the pending target is replaced, during a fade-in a fade-out starts
/// from the current opacity.
#[derive(Debug, Clone)]
pub struct Crossfade {
    timings: TransitionTimings,
    displayed: Option<ViewTypeId>,
    opacity: f32,
    phase: Phase,
}

impl Crossfade {
    pub fn new(timings: TransitionTimings) -> Self {
        Self {
            timings,
            displayed: None,
            opacity: 0.0,
            phase: Phase::Steady,
        }
    }

    /// Start a transition towards `id`. Returns immediately.
    pub fn display(&mut self, id: ViewTypeId) {
        if self.displayed.is_none() {
            debug!("Fading in first view {id}");
            self.displayed = Some(id);
            self.opacity = 0.0;
            self.phase = Phase::FadingIn(Fade::new(0.0, 1.0, self.timings.initial_fade_in));
            return;
        }

        if let Phase::FadingOut { target, .. } = &mut self.phase {
            debug!("Retargeting fade-out from {target} to {id}");
            *target = id;
            return;
        }

        debug!("Fading out towards {id}");
        self.phase = Phase::FadingOut {
            fade: Fade::new(self.opacity, 0.0, self.timings.fade_out),
            target: id,
        };
    }

    /// Move the running fade forward by `dt`.
    pub fn advance(&mut self, dt: Duration) -> Option<TransitionEvent> {
        match &mut self.phase {
            Phase::Steady => None,
            Phase::FadingIn(fade) => {
                fade.advance(dt);
                self.opacity = fade.value();
                if !fade.is_done() {
                    return None;
                }
                self.phase = Phase::Steady;
                self.opacity = 1.0;
                self.displayed.clone().map(TransitionEvent::Settled)
            }
            Phase::FadingOut { fade, target } => {
                fade.advance(dt);
                self.opacity = fade.value();
                if !fade.is_done() {
                    return None;
                }
                let target = target.clone();
                self.displayed = Some(target.clone());
                self.opacity = 0.0;
                self.phase = Phase::FadingIn(Fade::new(0.0, 1.0, self.timings.fade_in));
                Some(TransitionEvent::Swapped(target))
            }
        }
    }

    /// Run every remaining phase to completion and return the events in order.
    pub fn finish(&mut self) -> Vec<TransitionEvent> {
        let mut events = Vec::new();
        while self.is_animating() {
            if let Some(event) = self.advance(Duration::MAX) {
                events.push(event);
            }
        }
        events
    }

    /// The view currently composited into the container.
    pub fn displayed(&self) -> Option<&ViewTypeId> {
        self.displayed.as_ref()
    }

    /// The view the container is heading towards: the pending swap target
    /// during a fade-out, the displayed view otherwise.
    pub fn target(&self) -> Option<&ViewTypeId> {
        match &self.phase {
            Phase::FadingOut { target, .. } => Some(target),
            _ => self.displayed.as_ref(),
        }
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn is_animating(&self) -> bool {
        self.phase != Phase::Steady
    }

    pub fn timings(&self) -> TransitionTimings {
        self.timings
    }

    /// New timings apply to fades started after this call.
    pub fn set_timings(&mut self, timings: TransitionTimings) {
        self.timings = timings;
    }
}

impl Default for Crossfade {
    fn default() -> Self {
        Self::new(TransitionTimings::default())
    }
}
