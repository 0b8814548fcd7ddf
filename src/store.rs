//! Theme store
//!
//! Holds the active theme selection. `select` is the only way to change it;
//! every successful change bumps a generation counter and is pushed to all
//! live subscriptions. The store is created at the composition root and
//! passed down explicitly.

use crate::debug;
use crate::error::{RegistryError, UnknownThemeError};
use crate::registry::ThemeRegistry;
use crate::theme::Theme;
use std::sync::mpsc::{self, Receiver, Sender};

/// Notification delivered to subscribers after a selection change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeChange {
    /// Key that was active before the change
    pub previous: String,
    /// Key that is active now
    pub current: String,
    /// Store generation after the change; unique per change
    pub generation: u64,
}

/// Receiving end of a store subscription
///
/// Dropping it unsubscribes; the store prunes it on its next change.
#[derive(Debug)]
pub struct ThemeSubscription {
    rx: Receiver<ThemeChange>,
}

impl ThemeSubscription {
    /// Take every change delivered since the last call, oldest first
    pub fn drain(&self) -> Vec<ThemeChange> {
        self.rx.try_iter().collect()
    }
}

/// Owner of the active theme selection
#[derive(Debug)]
pub struct ThemeStore {
    registry: ThemeRegistry,
    current: String,
    generation: u64,
    subscribers: Vec<Sender<ThemeChange>>,
}

impl ThemeStore {
    /// Create a store whose selection starts at `default`
    pub fn new(registry: ThemeRegistry, default: &str) -> Result<Self, RegistryError> {
        let current = registry.lookup(default)?.key.to_string();
        Ok(Self {
            registry,
            current,
            generation: 0,
            subscribers: Vec::new(),
        })
    }

    /// Active theme key
    pub fn current(&self) -> &str {
        &self.current
    }

    /// Active theme record
    pub fn current_theme(&self) -> &Theme {
        // The selection only ever holds keys that passed lookup.
        self.registry
            .themes()
            .iter()
            .find(|t| t.key == self.current)
            .unwrap_or(&self.registry.themes()[0])
    }

    /// Number of selection changes since creation
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn registry(&self) -> &ThemeRegistry {
        &self.registry
    }

    /// Replace the active selection
    ///
    /// Unknown keys are rejected without touching the selection. Selecting
    /// the already active theme is a no-op and notifies nobody.
    pub fn select(&mut self, name: &str) -> Result<(), UnknownThemeError> {
        let key = self.registry.lookup(name)?.key.to_string();
        if key == self.current {
            return Ok(());
        }

        let previous = std::mem::replace(&mut self.current, key);
        self.generation += 1;
        debug::log_theme(&previous, &self.current, self.generation);

        let change = ThemeChange {
            previous,
            current: self.current.clone(),
            generation: self.generation,
        };
        self.subscribers.retain(|tx| tx.send(change.clone()).is_ok());
        Ok(())
    }

    /// Register a new consumer of selection changes
    pub fn subscribe(&mut self) -> ThemeSubscription {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        ThemeSubscription { rx }
    }

    /// Number of subscriptions still registered
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}
