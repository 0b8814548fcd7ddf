//! Themed view layers
//!
//! Every visual consumer of the active theme implements [`ThemedLayer`].
//! Layers never read the store directly: a [`ViewStack`] owns the single
//! store subscription, fans each [`ThemeChange`] out to its layers and
//! renders them in z-order with the current theme record.
//!
//! Each layer draws its exit from the record of the theme being left and its
//! entrance from the new one. The standard layers share one timing, so they
//! cross over on the same frame and never mix the attributes of two themes.

pub mod animation;
pub mod avatar;
pub mod background;
pub mod curtain;
pub mod halo;
pub mod hero;

pub use animation::{AnimationStage, LayerAnimation};
pub use avatar::{AvatarFrame, AvatarSource, FileAvatarSource};
pub use background::BackgroundLayer;
pub use curtain::CurtainOverlay;
pub use halo::GlowHalo;
pub use hero::{HeroCopy, HeroHeading};

use crate::particles::ParticleField;
use crate::store::{ThemeChange, ThemeStore, ThemeSubscription};
use crate::theme::{AvatarLayout, Theme};
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use std::time::Duration;

#[cfg(test)]
use mockall::automock;

/// A visual component that re-renders for the active theme
#[cfg_attr(test, automock)]
pub trait ThemedLayer {
    /// Short identifier used in diagnostics
    fn name(&self) -> &'static str;

    /// Called once per selection change, with the new theme record
    fn on_theme_change(&mut self, change: &ThemeChange, theme: &Theme);

    /// Advance animations
    fn tick(&mut self, dt: Duration);

    /// Draw into `buf` for `theme`
    fn render(&self, area: Rect, buf: &mut Buffer, theme: &Theme);

    /// Number of exit/entrance sequences started so far
    fn triggers(&self) -> u64;
}

/// Exit/entrance durations applied to every standard layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationTiming {
    pub exit: Duration,
    pub entrance: Duration,
}

impl AnimationTiming {
    pub fn animation(&self) -> LayerAnimation {
        LayerAnimation::new(self.exit, self.entrance)
    }
}

impl Default for AnimationTiming {
    fn default() -> Self {
        Self {
            exit: Duration::from_millis(150),
            entrance: Duration::from_millis(600),
        }
    }
}

/// Composition of themed layers around one store subscription
pub struct ViewStack {
    subscription: ThemeSubscription,
    backdrop: Vec<Box<dyn ThemedLayer>>,
    foreground: Vec<Box<dyn ThemedLayer>>,
}

impl ViewStack {
    /// Empty stack subscribed to `store`
    pub fn new(store: &mut ThemeStore) -> Self {
        Self {
            subscription: store.subscribe(),
            backdrop: Vec::new(),
            foreground: Vec::new(),
        }
    }

    /// Background, hero heading, glow halo and avatar, in that order
    pub fn standard(
        store: &mut ThemeStore,
        copy: HeroCopy,
        source: Box<dyn AvatarSource>,
        timing: AnimationTiming,
    ) -> Self {
        let avatar = AvatarFrame::new(source, store.current_theme(), timing);
        let mut stack = Self::new(store);
        stack.push_backdrop(Box::new(BackgroundLayer::new(timing)));
        stack.push(Box::new(HeroHeading::new(copy, timing)));
        stack.push(Box::new(GlowHalo::new(timing)));
        stack.push(Box::new(avatar));
        stack
    }

    /// Add a layer drawn below the decoration
    pub fn push_backdrop(&mut self, layer: Box<dyn ThemedLayer>) {
        self.backdrop.push(layer);
    }

    /// Add a layer drawn above the decoration
    pub fn push(&mut self, layer: Box<dyn ThemedLayer>) {
        self.foreground.push(layer);
    }

    fn layers_mut(&mut self) -> impl Iterator<Item = &mut Box<dyn ThemedLayer>> {
        self.backdrop.iter_mut().chain(self.foreground.iter_mut())
    }

    fn layers(&self) -> impl Iterator<Item = &Box<dyn ThemedLayer>> {
        self.backdrop.iter().chain(self.foreground.iter())
    }

    /// Play the entrance of the current theme on every layer
    pub fn intro(&mut self, store: &ThemeStore) {
        let change = ThemeChange {
            previous: store.current().to_string(),
            current: store.current().to_string(),
            generation: store.generation(),
        };
        let theme = store.current_theme();
        for layer in self.layers_mut() {
            layer.on_theme_change(&change, theme);
        }
    }

    /// Deliver pending selection changes to every layer
    ///
    /// Returns the number of changes delivered.
    pub fn sync(&mut self, store: &ThemeStore) -> usize {
        let changes = self.subscription.drain();
        for change in &changes {
            let Ok(theme) = store.registry().lookup(&change.current) else {
                continue;
            };
            for layer in self.layers_mut() {
                layer.on_theme_change(change, theme);
            }
        }
        changes.len()
    }

    pub fn tick(&mut self, dt: Duration) {
        for layer in self.layers_mut() {
            layer.tick(dt);
        }
    }

    /// Draw backdrop layers, the decoration, then foreground layers
    pub fn render(
        &self,
        area: Rect,
        buf: &mut Buffer,
        theme: &Theme,
        decoration: Option<&ParticleField>,
    ) {
        for layer in &self.backdrop {
            layer.render(area, buf, theme);
        }
        if let Some(particles) = decoration {
            particles.render(area, buf);
        }
        for layer in &self.foreground {
            layer.render(area, buf, theme);
        }
    }

    /// `(name, triggers)` for each layer in z-order
    pub fn triggers(&self) -> Vec<(&'static str, u64)> {
        self.layers().map(|l| (l.name(), l.triggers())).collect()
    }

    pub fn len(&self) -> usize {
        self.backdrop.len() + self.foreground.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ==================== Layout ====================

/// Split of the hero area into the heading column and the avatar column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeroAreas {
    pub heading: Rect,
    pub avatar: Rect,
}

pub fn hero_areas(area: Rect) -> HeroAreas {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);
    HeroAreas {
        heading: chunks[0],
        avatar: chunks[1],
    }
}

/// Avatar box for `layout` inside the avatar column
///
/// The box is centered on the column, shifted by the layout offsets and
/// clamped so it never leaves the column.
pub fn avatar_rect(column: Rect, layout: &AvatarLayout) -> Rect {
    let width = layout.max_width.min(column.width);
    let height = layout.max_height.min(column.height);

    let cx = column.x as i32 + column.width as i32 / 2 + layout.offset_x as i32;
    let cy = column.y as i32 + column.height as i32 / 2 + layout.offset_y as i32;

    let max_x = (column.x + column.width - width) as i32;
    let max_y = (column.y + column.height - height) as i32;
    let x = (cx - width as i32 / 2).clamp(column.x as i32, max_x);
    let y = (cy - height as i32 / 2).clamp(column.y as i32, max_y);

    Rect::new(x as u16, y as u16, width, height)
}

/// `rect` scaled around its center by `t` in `0.0..=1.0`
pub fn scale_rect(rect: Rect, t: f32) -> Rect {
    let t = t.clamp(0.0, 1.0);
    let width = (rect.width as f32 * t).round() as u16;
    let height = (rect.height as f32 * t).round() as u16;
    Rect::new(
        rect.x + (rect.width - width) / 2,
        rect.y + (rect.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{DEFAULT_THEME, ThemeRegistry};
    use mockall::predicate::*;

    fn store() -> ThemeStore {
        ThemeStore::new(ThemeRegistry::builtin(), DEFAULT_THEME).unwrap()
    }

    #[test]
    fn test_sync_fans_out_to_every_layer() {
        let mut store = store();
        let mut stack = ViewStack::new(&mut store);

        for _ in 0..3 {
            let mut layer = MockThemedLayer::new();
            layer
                .expect_on_theme_change()
                .withf(|change, theme| change.current == "crimson" && theme.key == "crimson")
                .times(1)
                .return_const(());
            stack.push(Box::new(layer));
        }

        store.select("crimson").unwrap();
        assert_eq!(stack.sync(&store), 1);
        assert_eq!(stack.sync(&store), 0);
    }

    #[test]
    fn test_failed_select_reaches_no_layer() {
        let mut store = store();
        let mut stack = ViewStack::new(&mut store);
        let mut layer = MockThemedLayer::new();
        layer.expect_on_theme_change().never();
        stack.push(Box::new(layer));

        assert!(store.select("nonexistent").is_err());
        assert_eq!(stack.sync(&store), 0);
    }

    #[test]
    fn test_render_order_backdrop_then_foreground() {
        use std::sync::{Arc, Mutex};

        let order = Arc::new(Mutex::new(Vec::new()));
        let mut store = store();
        let mut stack = ViewStack::new(&mut store);

        let mut front = MockThemedLayer::new();
        let log = Arc::clone(&order);
        front
            .expect_render()
            .returning(move |_, _, _| log.lock().unwrap().push("front"));
        let mut back = MockThemedLayer::new();
        let log = Arc::clone(&order);
        back.expect_render()
            .returning(move |_, _, _| log.lock().unwrap().push("back"));

        stack.push(Box::new(front));
        stack.push_backdrop(Box::new(back));

        let area = Rect::new(0, 0, 10, 4);
        let mut buf = Buffer::empty(area);
        stack.render(area, &mut buf, store.current_theme(), None);
        assert_eq!(*order.lock().unwrap(), vec!["back", "front"]);
    }

    #[test]
    fn test_tick_reaches_every_layer() {
        let mut store = store();
        let mut stack = ViewStack::new(&mut store);
        let mut layer = MockThemedLayer::new();
        layer
            .expect_tick()
            .with(eq(Duration::from_millis(16)))
            .times(2)
            .return_const(());
        stack.push(Box::new(layer));
        stack.tick(Duration::from_millis(16));
        stack.tick(Duration::from_millis(16));
    }

    #[test]
    fn test_standard_stack_layers() {
        let mut store = store();
        let stack = ViewStack::standard(
            &mut store,
            HeroCopy::default(),
            Box::new(FileAvatarSource::new("/nonexistent")),
            AnimationTiming::default(),
        );
        let names: Vec<&str> = stack.triggers().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["background", "hero", "halo", "avatar"]);
        assert_eq!(stack.len(), 4);
    }

    #[test]
    fn test_layout_only_switch_replays_all_layers() {
        let mut store = store();
        let mut stack = ViewStack::standard(
            &mut store,
            HeroCopy::default(),
            Box::new(FileAvatarSource::new("/nonexistent")),
            AnimationTiming::default(),
        );

        store.select("midnight-wide").unwrap();
        stack.sync(&store);
        stack.tick(Duration::from_secs(2));
        store.select("midnight").unwrap();
        stack.sync(&store);

        for (name, triggers) in stack.triggers() {
            assert_eq!(triggers, 2, "{name} did not replay");
        }
    }

    #[test]
    fn test_intro_triggers_once() {
        let mut store = store();
        let mut stack = ViewStack::standard(
            &mut store,
            HeroCopy::default(),
            Box::new(FileAvatarSource::new("/nonexistent")),
            AnimationTiming::default(),
        );
        stack.intro(&store);
        assert!(stack.triggers().iter().all(|(_, t)| *t == 1));
    }

    #[test]
    fn test_hero_areas_split() {
        let areas = hero_areas(Rect::new(0, 0, 100, 30));
        assert_eq!(areas.heading, Rect::new(0, 0, 55, 30));
        assert_eq!(areas.avatar, Rect::new(55, 0, 45, 30));
    }

    #[test]
    fn test_avatar_rect_centered_with_offsets() {
        let column = Rect::new(50, 0, 40, 20);
        let layout = AvatarLayout {
            max_width: 20,
            max_height: 10,
            offset_x: 0,
            offset_y: 0,
        };
        assert_eq!(avatar_rect(column, &layout), Rect::new(60, 5, 20, 10));

        let shifted = AvatarLayout {
            offset_x: 3,
            offset_y: -2,
            ..layout
        };
        assert_eq!(avatar_rect(column, &shifted), Rect::new(63, 3, 20, 10));
    }

    #[test]
    fn test_avatar_rect_clamped_to_column() {
        let column = Rect::new(10, 2, 12, 6);
        let layout = AvatarLayout {
            max_width: 30,
            max_height: 30,
            offset_x: -40,
            offset_y: 40,
        };
        assert_eq!(avatar_rect(column, &layout), column);

        let small = AvatarLayout {
            max_width: 4,
            max_height: 2,
            offset_x: 100,
            offset_y: -100,
        };
        assert_eq!(avatar_rect(column, &small), Rect::new(18, 2, 4, 2));
    }

    #[test]
    fn test_scale_rect() {
        let rect = Rect::new(10, 10, 20, 10);
        assert_eq!(scale_rect(rect, 1.0), rect);
        assert_eq!(scale_rect(rect, 0.5), Rect::new(15, 12, 10, 5));
        assert_eq!(scale_rect(rect, 0.0).area(), 0);
    }
}
