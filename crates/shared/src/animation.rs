//! Animation sequencers for the title and the legend.
//!
//! Each sequencer is a small state machine. Starting a run hands out a
//! [`Ticket`]; timer and transition callbacks pass it back, and callbacks from
//! a run that has since been superseded are ignored. The frontend owns the
//! clocks and the DOM, these types own the ordering.

use std::fmt;

/// Durations and spacing shared by all animations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationTimings {
    /// Title text/icon opacity fade, both directions.
    pub title_fade_ms: u32,
    /// Title container width morph.
    pub title_resize_ms: u32,
    /// Extra width added around the measured title text.
    pub title_padding_px: f64,
    /// Legend items opacity transition.
    pub legend_fade_ms: u32,
    /// Legend gradient crossfade on palette change.
    pub crossfade_ms: u32,
}

impl Default for AnimationTimings {
    fn default() -> Self {
        Self {
            title_fade_ms: 300,
            title_resize_ms: 700,
            title_padding_px: 30.0,
            legend_fade_ms: 500,
            crossfade_ms: 3000,
        }
    }
}

impl AnimationTimings {
    /// The legend hides once the title text has faded out...
    pub fn legend_hide_after_ms(&self) -> u32 {
        self.title_fade_ms
    }

    /// ...and reappears once the title has finished resizing.
    pub fn legend_hold_ms(&self) -> u32 {
        self.title_resize_ms
    }
}

/// CSS `transition` value for one property.
pub fn transition(property: &str, duration_ms: u32, easing: &str) -> String {
    format!("{property} {}s {easing}", f64::from(duration_ms) / 1000.0)
}

/// Identifies one animation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Ticket(u64);

impl Ticket {
    fn next(self) -> Self {
        Ticket(self.0 + 1)
    }
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TitlePhase {
    #[default]
    Idle,
    FadingOut,
    Measuring,
    Resizing,
    FadingIn,
}

/// What to do with the title container once the new text is measured.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResizeStep {
    /// Pin the width at `from`, then transition to `to`.
    Animate { from: f64, to: f64 },
    /// Width is unchanged, so no transition will fire; the new text is already swapped in.
    Skip,
}

/// Title cross-fade: fade out, measure, morph width, swap text, fade in.
#[derive(Debug, Clone, PartialEq)]
pub struct TitleAnimator {
    phase: TitlePhase,
    ticket: Ticket,
    text: String,
    pending: Option<String>,
    timings: AnimationTimings,
}

impl TitleAnimator {
    pub fn new(text: impl Into<String>, timings: AnimationTimings) -> Self {
        Self {
            phase: TitlePhase::Idle,
            ticket: Ticket::default(),
            text: text.into(),
            pending: None,
            timings,
        }
    }

    #[cfg(test)]
    pub fn phase(&self) -> TitlePhase {
        self.phase
    }

    #[cfg(test)]
    pub fn ticket(&self) -> Ticket {
        self.ticket
    }

    /// Text currently displayed.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn timings(&self) -> AnimationTimings {
        self.timings
    }

    /// Opacity of the title text and the metric icon.
    pub fn content_opacity(&self) -> f64 {
        match self.phase {
            TitlePhase::Idle | TitlePhase::FadingIn => 1.0,
            _ => 0.0,
        }
    }

    /// Start a new run towards `text`, superseding any run in flight.
    pub fn request(&mut self, text: impl Into<String>) -> Ticket {
        self.ticket = self.ticket.next();
        self.pending = Some(text.into());
        self.phase = TitlePhase::FadingOut;
        self.ticket
    }

    /// The fade-out timer fired. Returns the text to measure.
    pub fn fade_out_elapsed(&mut self, ticket: Ticket) -> Option<&str> {
        if ticket != self.ticket || self.phase != TitlePhase::FadingOut {
            return None;
        }
        self.phase = TitlePhase::Measuring;
        self.pending.as_deref()
    }

    /// The new text measures `text_px` wide and the container is `current_px` wide.
    pub fn begin_resize(&mut self, ticket: Ticket, current_px: f64, text_px: f64) -> Option<ResizeStep> {
        if ticket != self.ticket || self.phase != TitlePhase::Measuring {
            return None;
        }
        let target = text_px + self.timings.title_padding_px;
        if (target - current_px).abs() < 0.5 {
            self.skip_resize(ticket);
            return Some(ResizeStep::Skip);
        }
        self.phase = TitlePhase::Resizing;
        Some(ResizeStep::Animate {
            from: current_px,
            to: target,
        })
    }

    /// Swap the text in without resizing, e.g. when the container can't be measured.
    pub fn skip_resize(&mut self, ticket: Ticket) -> bool {
        if ticket != self.ticket || self.phase != TitlePhase::Measuring {
            return false;
        }
        self.swap_in();
        true
    }

    /// A CSS transition on the title container ended. Only the end of the
    /// width morph matters; returns the ticket to schedule the fade-in with.
    pub fn transition_ended(&mut self, property: &str) -> Option<Ticket> {
        if property != "width" || self.phase != TitlePhase::Resizing {
            return None;
        }
        self.swap_in();
        Some(self.ticket)
    }

    /// The fade-in duration elapsed.
    pub fn fade_in_elapsed(&mut self, ticket: Ticket) -> bool {
        if ticket != self.ticket || self.phase != TitlePhase::FadingIn {
            return false;
        }
        self.phase = TitlePhase::Idle;
        true
    }

    fn swap_in(&mut self) {
        if let Some(text) = self.pending.take() {
            self.text = text;
        }
        self.phase = TitlePhase::FadingIn;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LegendPhase {
    #[default]
    Shown,
    FadingOut,
    Hidden,
    FadingIn,
}

/// Legend fade-out, rebuild while hidden, fade back in.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LegendAnimator {
    phase: LegendPhase,
    ticket: Ticket,
}

impl LegendAnimator {
    #[cfg(test)]
    pub fn phase(&self) -> LegendPhase {
        self.phase
    }

    pub fn opacity(&self) -> f64 {
        match self.phase {
            LegendPhase::Shown | LegendPhase::FadingIn => 1.0,
            LegendPhase::FadingOut | LegendPhase::Hidden => 0.0,
        }
    }

    pub fn visible(&self) -> bool {
        self.phase != LegendPhase::Hidden
    }

    pub fn request(&mut self) -> Ticket {
        self.ticket = self.ticket.next();
        self.phase = LegendPhase::FadingOut;
        self.ticket
    }

    /// Items are faded out; hide them. The caller rebuilds content when this returns true.
    pub fn hide_elapsed(&mut self, ticket: Ticket) -> bool {
        self.advance(ticket, LegendPhase::FadingOut, LegendPhase::Hidden)
    }

    /// The title has had time to resize; show the rebuilt items again.
    pub fn hold_elapsed(&mut self, ticket: Ticket) -> bool {
        self.advance(ticket, LegendPhase::Hidden, LegendPhase::FadingIn)
    }

    pub fn fade_in_elapsed(&mut self, ticket: Ticket) -> bool {
        self.advance(ticket, LegendPhase::FadingIn, LegendPhase::Shown)
    }

    fn advance(&mut self, ticket: Ticket, from: LegendPhase, to: LegendPhase) -> bool {
        if ticket != self.ticket || self.phase != from {
            return false;
        }
        self.phase = to;
        true
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    pub background: String,
    pub opacity: f64,
    pub ticket: Ticket,
}

/// Color-bar background crossfade through a transparent overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientCrossfade {
    base: String,
    overlay: Option<Overlay>,
    ticket: Ticket,
}

impl GradientCrossfade {
    pub fn new(background: impl Into<String>) -> Self {
        Self {
            base: background.into(),
            overlay: None,
            ticket: Ticket::default(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn overlay(&self) -> Option<&Overlay> {
        self.overlay.as_ref()
    }

    /// Lay a transparent overlay with `background` on top. An overlay still
    /// fading in is promoted to the base first.
    pub fn start(&mut self, background: impl Into<String>) -> Ticket {
        if let Some(previous) = self.overlay.take() {
            self.base = previous.background;
        }
        self.ticket = self.ticket.next();
        self.overlay = Some(Overlay {
            background: background.into(),
            opacity: 0.0,
            ticket: self.ticket,
        });
        self.ticket
    }

    /// The overlay is in the DOM at opacity 0; begin its transition to 1.
    pub fn reveal(&mut self, ticket: Ticket) -> bool {
        match self.overlay.as_mut() {
            Some(overlay) if overlay.ticket == ticket => {
                overlay.opacity = 1.0;
                true
            }
            _ => false,
        }
    }

    /// The crossfade duration elapsed; the overlay becomes the base.
    pub fn finish(&mut self, ticket: Ticket) -> bool {
        match self.overlay.take() {
            Some(overlay) if overlay.ticket == ticket => {
                self.base = overlay.background;
                true
            }
            other => {
                self.overlay = other;
                false
            }
        }
    }

    /// Drop any overlay and show `background` directly.
    pub fn reset(&mut self, background: impl Into<String>) {
        self.ticket = self.ticket.next();
        self.overlay = None;
        self.base = background.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn title() -> TitleAnimator {
        TitleAnimator::new("Population of Kenya", AnimationTimings::default())
    }

    #[test]
    fn test_default_timings() {
        let t = AnimationTimings::default();
        assert_eq!(t.title_fade_ms, 300);
        assert_eq!(t.title_resize_ms, 700);
        assert_eq!(t.legend_fade_ms, 500);
        assert_eq!(t.crossfade_ms, 3000);
        assert_eq!(t.legend_hide_after_ms(), 300);
        assert_eq!(t.legend_hold_ms(), 700);
    }

    #[test]
    fn test_transition_css() {
        assert_eq!(transition("opacity", 300, "ease"), "opacity 0.3s ease");
        assert_eq!(transition("width", 700, "ease"), "width 0.7s ease");
        assert_eq!(transition("opacity", 3000, "ease-out"), "opacity 3s ease-out");
    }

    #[test]
    fn test_title_full_cycle() {
        let mut a = title();
        assert_eq!(a.phase(), TitlePhase::Idle);

        let ticket = a.request("Marital Status: Divorced");
        assert_eq!(a.phase(), TitlePhase::FadingOut);
        assert_eq!(a.content_opacity(), 0.0);
        assert_eq!(a.text(), "Population of Kenya");

        assert_eq!(a.fade_out_elapsed(ticket), Some("Marital Status: Divorced"));
        assert_eq!(a.phase(), TitlePhase::Measuring);

        let step = a.begin_resize(ticket, 220.0, 240.0);
        assert_eq!(step, Some(ResizeStep::Animate { from: 220.0, to: 270.0 }));
        assert_eq!(a.phase(), TitlePhase::Resizing);
        assert_eq!(a.text(), "Population of Kenya");

        assert_eq!(a.transition_ended("opacity"), None);
        assert_eq!(a.transition_ended("width"), Some(ticket));
        assert_eq!(a.phase(), TitlePhase::FadingIn);
        assert_eq!(a.text(), "Marital Status: Divorced");
        assert_eq!(a.content_opacity(), 1.0);

        assert!(a.fade_in_elapsed(ticket));
        assert_eq!(a.phase(), TitlePhase::Idle);
    }

    #[test]
    fn test_title_unchanged_width_skips_transition() {
        let mut a = title();
        let ticket = a.request("Housing Type: Flat");
        a.fade_out_elapsed(ticket);
        assert_eq!(a.begin_resize(ticket, 180.0, 150.0), Some(ResizeStep::Skip));
        assert_eq!(a.phase(), TitlePhase::FadingIn);
        assert_eq!(a.text(), "Housing Type: Flat");
        assert!(a.fade_in_elapsed(ticket));
    }

    #[test]
    fn test_title_skip_resize_only_while_measuring() {
        let mut a = title();
        let ticket = a.request("Housing Type: Flat");
        assert!(!a.skip_resize(ticket));
        a.fade_out_elapsed(ticket);
        assert!(a.skip_resize(ticket));
        assert_eq!(a.text(), "Housing Type: Flat");
        assert_eq!(a.phase(), TitlePhase::FadingIn);
    }

    #[test]
    fn test_title_new_request_supersedes() {
        let mut a = title();
        let first = a.request("Education Level: Secondary");
        let second = a.request("Housing Tenure: Owns");
        assert_ne!(first, second);

        assert_eq!(a.fade_out_elapsed(first), None);
        assert_eq!(a.fade_out_elapsed(second), Some("Housing Tenure: Owns"));
        assert_eq!(a.begin_resize(first, 100.0, 200.0), None);
        assert!(a.begin_resize(second, 100.0, 200.0).is_some());
    }

    #[test]
    fn test_title_supersede_during_resize_ignores_stale_transition_end() {
        let mut a = title();
        let first = a.request("Education Level: Secondary");
        a.fade_out_elapsed(first);
        a.begin_resize(first, 100.0, 200.0);
        a.request("Housing Tenure: Owns");
        // The first run's width transition finishing must not swap any text.
        assert_eq!(a.transition_ended("width"), None);
        assert_eq!(a.text(), "Population of Kenya");
        assert_eq!(a.content_opacity(), 0.0);
    }

    #[test]
    fn test_title_stale_fade_in_does_not_reset() {
        let mut a = title();
        let first = a.request("Owns");
        a.fade_out_elapsed(first);
        a.begin_resize(first, 100.0, 200.0);
        a.transition_ended("width");
        let second = a.request("Flat");
        assert!(!a.fade_in_elapsed(first));
        assert_eq!(a.phase(), TitlePhase::FadingOut);
        assert_eq!(a.ticket(), second);
    }

    #[test]
    fn test_legend_cycle() {
        let mut l = LegendAnimator::default();
        assert!(l.visible());
        assert_eq!(l.opacity(), 1.0);

        let t = l.request();
        assert_eq!(l.opacity(), 0.0);
        assert!(l.visible());

        assert!(l.hide_elapsed(t));
        assert!(!l.visible());

        assert!(l.hold_elapsed(t));
        assert!(l.visible());
        assert_eq!(l.opacity(), 1.0);

        assert!(l.fade_in_elapsed(t));
        assert_eq!(l.phase(), LegendPhase::Shown);
    }

    #[test]
    fn test_legend_out_of_order_steps_rejected() {
        let mut l = LegendAnimator::default();
        let t = l.request();
        assert!(!l.hold_elapsed(t));
        assert!(!l.fade_in_elapsed(t));
        assert_eq!(l.phase(), LegendPhase::FadingOut);
    }

    #[test]
    fn test_legend_superseded_run_is_ignored() {
        let mut l = LegendAnimator::default();
        let first = l.request();
        assert!(l.hide_elapsed(first));
        let second = l.request();
        assert!(!l.hold_elapsed(first));
        assert_eq!(l.phase(), LegendPhase::FadingOut);
        assert!(l.hide_elapsed(second));
        assert!(l.hold_elapsed(second));
    }

    #[test]
    fn test_crossfade_cycle() {
        let mut c = GradientCrossfade::new("red");
        let t = c.start("blue");
        assert_eq!(c.base(), "red");
        assert_eq!(c.overlay().unwrap().opacity, 0.0);

        assert!(c.reveal(t));
        assert_eq!(c.overlay().unwrap().opacity, 1.0);

        assert!(c.finish(t));
        assert_eq!(c.base(), "blue");
        assert!(c.overlay().is_none());
    }

    #[test]
    fn test_crossfade_restart_promotes_pending_overlay() {
        let mut c = GradientCrossfade::new("red");
        let first = c.start("blue");
        c.reveal(first);
        let second = c.start("grey");
        assert_eq!(c.base(), "blue");
        assert_eq!(c.overlay().unwrap().background, "grey");

        assert!(!c.finish(first));
        assert_eq!(c.overlay().unwrap().background, "grey");
        assert!(c.finish(second));
        assert_eq!(c.base(), "grey");
    }

    #[test]
    fn test_crossfade_reset_cancels() {
        let mut c = GradientCrossfade::new("red");
        let t = c.start("blue");
        c.reset("blue");
        assert!(!c.reveal(t));
        assert!(!c.finish(t));
        assert_eq!(c.base(), "blue");
        assert!(c.overlay().is_none());
    }
}
