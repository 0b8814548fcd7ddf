//! Application state and logic

pub mod types;

pub use types::{AppMode, Notification, NotifyLevel};

use anyhow::{Context, Result};
use ratatui::layout::Rect;
use showreel::transition::{Submission, TransitionEvent, select_theme};
use showreel::view::{FileAvatarSource, ViewStack};
use showreel::{Config, ParticleField, ThemeStore, TransitionOrchestrator, debug};
use std::time::Duration;

/// Application state
pub struct App {
    pub config: Config,
    /// Active theme selection
    pub store: ThemeStore,
    /// Curtain sequencing for cinematic switches
    pub orchestrator: TransitionOrchestrator,
    /// Themed layers of the hero scene
    pub views: ViewStack,
    /// Background decoration (None when disabled)
    pub particles: Option<ParticleField>,
    /// Current application mode
    pub mode: AppMode,
    /// Theme picker: currently highlighted index
    pub picker_index: usize,
    /// Theme the scene is heading to once queued transitions finish
    pub target: String,
    /// Notifications to display
    pub notifications: Vec<Notification>,
    pub should_quit: bool,
    /// Scene size
    pub area: Rect,
}

impl App {
    pub fn new(config: Config, area: Rect) -> Result<Self> {
        let registry = config.registry()?;
        let mut store = ThemeStore::new(registry, &config.default_theme)
            .context("Invalid default_theme in configuration")?;

        let mut views = ViewStack::standard(
            &mut store,
            config.hero.clone(),
            Box::new(FileAvatarSource::new(config.avatar_root())),
            config.animation_timing(),
        );
        views.intro(&store);

        let particles = config.particles.enabled.then(|| {
            let mut field = ParticleField::new(config.particles.field);
            field.mount(area);
            field
        });

        Ok(Self {
            orchestrator: TransitionOrchestrator::new(config.transition_config()),
            target: store.current().to_string(),
            config,
            store,
            views,
            particles,
            mode: AppMode::Showcase,
            picker_index: 0,
            notifications: Vec::new(),
            should_quit: false,
            area,
        })
    }

    /// Switch to `key` behind the curtain
    pub fn cinematic_select(&mut self, key: &str) {
        if key == self.target {
            return;
        }
        match self.orchestrator.run_transition(select_theme(key)) {
            Submission::Started { id } | Submission::Queued { id, .. } => {
                debug::log_transition(id, &self.target, key);
                self.target = key.to_string();
            }
            Submission::Ignored => {
                self.add_notification(
                    "Transition in progress, try again in a moment".to_string(),
                    NotifyLevel::Warning,
                );
            }
        }
    }

    /// Next theme in registry order
    pub fn next_theme(&mut self) {
        if let Ok(key) = self.store.registry().next_key(&self.target) {
            let key = key.to_string();
            self.cinematic_select(&key);
        }
    }

    /// Previous theme in registry order
    pub fn prev_theme(&mut self) {
        if let Ok(key) = self.store.registry().prev_key(&self.target) {
            let key = key.to_string();
            self.cinematic_select(&key);
        }
    }

    /// Open theme picker
    pub fn open_theme_picker(&mut self) {
        // Set index to the theme we are heading to
        self.picker_index = self.store.registry().index_of(&self.target).unwrap_or(0);
        self.mode = AppMode::ThemePicker;
    }

    pub fn close_theme_picker(&mut self) {
        self.mode = AppMode::Showcase;
    }

    pub fn picker_up(&mut self) {
        let count = self.store.registry().len();
        if self.picker_index > 0 {
            self.picker_index -= 1;
        } else {
            self.picker_index = count.saturating_sub(1);
        }
    }

    pub fn picker_down(&mut self) {
        let count = self.store.registry().len();
        if self.picker_index < count.saturating_sub(1) {
            self.picker_index += 1;
        } else {
            self.picker_index = 0;
        }
    }

    fn picked_key(&self) -> Option<String> {
        self.store
            .registry()
            .themes()
            .get(self.picker_index)
            .map(|t| t.key.to_string())
    }

    /// Apply the highlighted theme through the curtain
    pub fn apply_picked(&mut self) {
        self.mode = AppMode::Showcase;
        if let Some(key) = self.picked_key() {
            self.cinematic_select(&key);
        }
    }

    /// Apply the highlighted theme without the curtain
    ///
    /// Only allowed while no transition is running or queued, so it never
    /// races a pending mutation.
    pub fn instant_apply(&mut self) {
        if self.orchestrator.is_transitioning() || self.orchestrator.queued_len() > 0 {
            self.add_notification(
                "Wait for the transition to finish".to_string(),
                NotifyLevel::Warning,
            );
            return;
        }
        let Some(key) = self.picked_key() else {
            return;
        };
        self.mode = AppMode::Showcase;
        match self.store.select(&key) {
            Ok(()) => {
                self.target = self.store.current().to_string();
                let name = self.store.current_theme().display_name.to_string();
                self.add_notification(format!("Theme changed to {name}"), NotifyLevel::Success);
            }
            Err(e) => self.add_notification(e.to_string(), NotifyLevel::Error),
        }
    }

    /// Advance transitions, layers, particles and notifications by `dt`
    pub fn update(&mut self, dt: Duration) {
        for event in self.orchestrator.tick(dt, &mut self.store) {
            match event {
                TransitionEvent::Mutated { .. } => {
                    let name = self.store.current_theme().display_name.to_string();
                    self.add_notification(format!("Theme changed to {name}"), NotifyLevel::Success);
                }
                TransitionEvent::MutationFailed { error, .. } => {
                    if self.orchestrator.queued_len() == 0 {
                        self.target = self.store.current().to_string();
                    }
                    self.add_notification(
                        format!("Theme switch failed: {error}"),
                        NotifyLevel::Error,
                    );
                }
                TransitionEvent::CurtainEngaged { .. }
                | TransitionEvent::CurtainOpaque { .. }
                | TransitionEvent::CurtainCleared { .. } => {}
            }
        }

        self.views.sync(&self.store);
        self.views.tick(dt);
        if let Some(particles) = self.particles.as_mut() {
            particles.tick(dt);
        }
        self.notifications.retain_mut(|n| n.tick(dt));
    }

    /// Add a notification
    pub fn add_notification(&mut self, message: String, level: NotifyLevel) {
        self.notifications.push(Notification::new(message, level));
    }

    pub fn resize(&mut self, area: Rect) {
        self.area = area;
        if let Some(particles) = self.particles.as_mut() {
            particles.mount(area);
        }
    }
}
