//! Exit/entrance animation state shared by the themed layers
//!
//! Animations are keyed on theme identity (key plus store generation), never
//! on attribute equality: every change notification replays the full
//! sequence, even between themes that only differ in layout.
//!
//! The exit is drawn from the record of the theme being left, so a layer
//! keeps the last record it was handed until its exit has played out.

use crate::color::ease_in_out;
use crate::store::ThemeChange;
use crate::theme::Theme;
use crate::transition::progress;
use std::time::Duration;

/// Running animation bound to one theme identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyframe {
    pub key: String,
    pub generation: u64,
    pub elapsed: Duration,
}

impl Keyframe {
    fn new(key: &str, generation: u64) -> Self {
        Self {
            key: key.to_string(),
            generation,
            elapsed: Duration::ZERO,
        }
    }
}

/// Where a layer is in its exit/entrance sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationStage<'a> {
    /// Leaving the appearance of the previous theme
    Exiting { key: &'a str },
    /// Arriving at the appearance of the new theme
    Entering { key: &'a str },
    /// Fully shown
    Settled,
}

/// Exit then entrance, one pair per theme change
#[derive(Debug, Clone)]
pub struct LayerAnimation {
    exit_duration: Duration,
    entrance_duration: Duration,
    exit: Option<Keyframe>,
    entrance: Option<Keyframe>,
    generation: Option<u64>,
    triggers: u64,
    shown: Option<Theme>,
    exit_theme: Option<Theme>,
}

impl LayerAnimation {
    pub fn new(exit_duration: Duration, entrance_duration: Duration) -> Self {
        Self {
            exit_duration,
            entrance_duration,
            exit: None,
            entrance: None,
            generation: None,
            triggers: 0,
            shown: None,
            exit_theme: None,
        }
    }

    /// Start the sequence for `change`, arriving at `theme`
    ///
    /// Returns false for a generation this animation has already seen.
    pub fn trigger(&mut self, change: &ThemeChange, theme: &Theme) -> bool {
        if self.generation.is_some_and(|seen| change.generation <= seen) {
            return false;
        }
        self.generation = Some(change.generation);
        self.triggers += 1;

        // The intro change at startup has nothing to exit from.
        self.exit = (change.previous != change.current).then(|| {
            Keyframe::new(&change.previous, change.generation.saturating_sub(1))
        });
        self.entrance = Some(Keyframe::new(&change.current, change.generation));

        let outgoing = self.shown.replace(theme.clone());
        self.exit_theme = match self.exit {
            Some(_) => outgoing.filter(|t| t.key == change.previous),
            None => None,
        };
        true
    }

    pub fn tick(&mut self, dt: Duration) {
        if let Some(exit) = self.exit.as_mut() {
            exit.elapsed += dt;
            if exit.elapsed < self.exit_duration {
                return;
            }
            let carry = exit.elapsed - self.exit_duration;
            self.exit = None;
            self.exit_theme = None;
            if let Some(entrance) = self.entrance.as_mut() {
                entrance.elapsed += carry;
            }
        } else if let Some(entrance) = self.entrance.as_mut() {
            entrance.elapsed += dt;
        }

        if self
            .entrance
            .as_ref()
            .is_some_and(|e| e.elapsed >= self.entrance_duration)
        {
            self.entrance = None;
        }
    }

    /// How much of the layer content is shown, `0.0..=1.0`
    pub fn visibility(&self) -> f32 {
        if let Some(exit) = &self.exit {
            1.0 - ease_in_out(progress(exit.elapsed, self.exit_duration))
        } else if let Some(entrance) = &self.entrance {
            ease_in_out(progress(entrance.elapsed, self.entrance_duration))
        } else {
            1.0
        }
    }

    pub fn stage(&self) -> AnimationStage<'_> {
        match (&self.exit, &self.entrance) {
            (Some(exit), _) => AnimationStage::Exiting { key: &exit.key },
            (None, Some(entrance)) => AnimationStage::Entering { key: &entrance.key },
            (None, None) => AnimationStage::Settled,
        }
    }

    pub fn is_exiting(&self) -> bool {
        self.exit.is_some()
    }

    /// Record to draw this frame with: the theme being left while exiting,
    /// `current` otherwise
    pub fn frame_theme<'a>(&'a self, current: &'a Theme) -> &'a Theme {
        match (&self.exit, &self.exit_theme) {
            (Some(_), Some(previous)) => previous,
            _ => current,
        }
    }

    pub fn is_settled(&self) -> bool {
        self.exit.is_none() && self.entrance.is_none()
    }

    /// Number of sequences started so far
    pub fn triggers(&self) -> u64 {
        self.triggers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::{CRIMSON, MIDNIGHT, MIDNIGHT_WIDE, SOLAR};

    fn change(previous: &str, current: &str, generation: u64) -> ThemeChange {
        ThemeChange {
            previous: previous.to_string(),
            current: current.to_string(),
            generation,
        }
    }

    fn anim() -> LayerAnimation {
        LayerAnimation::new(Duration::from_millis(100), Duration::from_millis(200))
    }

    #[test]
    fn test_new_is_settled_and_visible() {
        let a = anim();
        assert!(a.is_settled());
        assert_eq!(a.visibility(), 1.0);
        assert_eq!(a.triggers(), 0);
    }

    #[test]
    fn test_exit_then_entrance() {
        let mut a = anim();
        assert!(a.trigger(&change("midnight", "crimson", 1), &CRIMSON));
        assert_eq!(a.stage(), AnimationStage::Exiting { key: "midnight" });
        assert_eq!(a.visibility(), 1.0);

        a.tick(Duration::from_millis(100));
        assert_eq!(a.stage(), AnimationStage::Entering { key: "crimson" });
        assert_eq!(a.visibility(), 0.0);

        a.tick(Duration::from_millis(100));
        assert_eq!(a.visibility(), 0.5);

        a.tick(Duration::from_millis(100));
        assert!(a.is_settled());
        assert_eq!(a.visibility(), 1.0);
    }

    #[test]
    fn test_exit_overflow_carries_into_entrance() {
        let mut a = anim();
        a.trigger(&change("midnight", "crimson", 1), &CRIMSON);
        a.tick(Duration::from_millis(200));
        assert_eq!(a.stage(), AnimationStage::Entering { key: "crimson" });
        assert_eq!(a.visibility(), 0.5);
    }

    #[test]
    fn test_intro_has_no_exit() {
        let mut a = anim();
        a.trigger(&change("midnight", "midnight", 0), &MIDNIGHT);
        assert_eq!(a.stage(), AnimationStage::Entering { key: "midnight" });
        assert_eq!(a.visibility(), 0.0);
    }

    #[test]
    fn test_stale_generation_ignored() {
        let mut a = anim();
        assert!(a.trigger(&change("midnight", "crimson", 2), &CRIMSON));
        assert!(!a.trigger(&change("midnight", "solar", 1), &SOLAR));
        assert!(!a.trigger(&change("midnight", "solar", 2), &SOLAR));
        assert_eq!(a.triggers(), 1);
    }

    #[test]
    fn test_layout_only_switch_replays_every_time() {
        let mut a = anim();
        a.trigger(&change("midnight", "midnight-wide", 1), &MIDNIGHT_WIDE);
        a.tick(Duration::from_secs(1));
        assert!(a.is_settled());
        assert!(a.trigger(&change("midnight-wide", "midnight", 2), &MIDNIGHT));
        assert_eq!(a.stage(), AnimationStage::Exiting { key: "midnight-wide" });
        assert_eq!(a.triggers(), 2);
    }

    #[test]
    fn test_retrigger_mid_animation_restarts() {
        let mut a = anim();
        a.trigger(&change("midnight", "crimson", 1), &CRIMSON);
        a.tick(Duration::from_millis(150));
        a.trigger(&change("crimson", "solar", 2), &SOLAR);
        assert_eq!(a.stage(), AnimationStage::Exiting { key: "crimson" });
    }

    #[test]
    fn test_exit_draws_the_theme_being_left() {
        let mut a = anim();
        a.trigger(&change("midnight", "midnight", 0), &MIDNIGHT);
        a.tick(Duration::from_secs(1));
        assert_eq!(a.frame_theme(&MIDNIGHT).key, "midnight");

        a.trigger(&change("midnight", "crimson", 1), &CRIMSON);
        assert!(a.is_exiting());
        assert_eq!(a.frame_theme(&CRIMSON).key, "midnight");

        a.tick(Duration::from_millis(100));
        assert!(!a.is_exiting());
        assert_eq!(a.frame_theme(&CRIMSON).key, "crimson");
    }

    #[test]
    fn test_exit_without_known_previous_uses_current() {
        let mut a = anim();
        a.trigger(&change("midnight", "crimson", 1), &CRIMSON);
        assert!(a.is_exiting());
        assert_eq!(a.frame_theme(&CRIMSON).key, "crimson");
    }
}
