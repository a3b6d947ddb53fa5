//! Editing session
//!
//! The session is the adapter between a host and the outline core. It owns
//! the active document, the settings and their compiled outline view, the
//! notification log and the keyword decorator, and feeds them to the core
//! on every command.

use super::events::{EventKind, HostEvent, Subscriptions};
use crate::commands::{self, Command, CommandOutcome};
use crate::config::Settings;
use crate::decorations::{DecorationRenderer, DecorationSnapshot, TodoDecorator};
use crate::document::TextBuffer;
use crate::error::{Error, Result};
use crate::outline::OutlineConfig;
use log::{debug, info, warn};
use std::cell::{Ref, RefCell};
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Instant;

/// The document currently being edited.
#[derive(Debug, Clone)]
pub struct ActiveDocument {
    pub buffer: TextBuffer,
    /// Where the document was loaded from, if anywhere
    pub path: Option<PathBuf>,
}

pub struct Session<R: DecorationRenderer + 'static = DecorationSnapshot> {
    active: Option<ActiveDocument>,
    settings: Settings,
    outline: OutlineConfig,
    notifications: Vec<String>,
    decorator: Rc<RefCell<TodoDecorator<R>>>,
    subscriptions: Subscriptions,
}

impl Session<DecorationSnapshot> {
    /// Session with the recording renderer.
    pub fn with_settings(settings: Settings) -> Result<Self> {
        Self::new(settings, DecorationSnapshot::default())
    }
}

impl<R: DecorationRenderer + 'static> Session<R> {
    pub fn new(mut settings: Settings, renderer: R) -> Result<Self> {
        settings.sanitize();
        let outline = OutlineConfig::from_settings(&settings)?;
        let decorator = Rc::new(RefCell::new(TodoDecorator::new(
            &outline,
            settings.debounce(),
            renderer,
        )?));

        let mut session = Self {
            active: None,
            settings,
            outline,
            notifications: Vec::new(),
            decorator,
            subscriptions: Subscriptions::new(),
        };
        session.register_decorator();
        Ok(session)
    }

    /// Wire the decorator to the events that require a rescan.
    fn register_decorator(&mut self) {
        let decorator = Rc::clone(&self.decorator);
        self.subscriptions
            .subscribe(EventKind::ConfigurationChanged, move |event| {
                let mut decorator = decorator.borrow_mut();
                match decorator.reconfigure(event.config, event.settings.debounce()) {
                    Ok(()) => decorator.trigger(event.now),
                    Err(e) => warn!("Keeping previous keyword highlighting: {}", e),
                }
            });

        for kind in [EventKind::ActiveDocumentChanged, EventKind::DocumentChanged] {
            let decorator = Rc::clone(&self.decorator);
            self.subscriptions.subscribe(kind, move |event| {
                decorator.borrow_mut().trigger(event.now);
            });
        }
    }

    /// Register an additional host handler.
    pub fn subscribe<F>(&mut self, kind: EventKind, handler: F)
    where
        F: FnMut(&HostEvent<'_>) + 'static,
    {
        self.subscriptions.subscribe(kind, handler);
    }

    fn emit(&mut self, kind: EventKind, now: Instant) {
        let event = HostEvent {
            kind,
            settings: &self.settings,
            config: &self.outline,
            now,
        };
        let handled = self.subscriptions.emit(&event);
        debug!("{:?} delivered to {} handler(s)", kind, handled);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Documents
    // ─────────────────────────────────────────────────────────────────────────

    /// Make `buffer` the active document.
    pub fn open(&mut self, buffer: TextBuffer, path: Option<PathBuf>, now: Instant) {
        self.active = Some(ActiveDocument { buffer, path });
        self.emit(EventKind::ActiveDocumentChanged, now);
    }

    /// Load a file and make it the active document.
    pub fn open_file(&mut self, path: &Path, now: Instant) -> Result<()> {
        let text = fs::read_to_string(path).map_err(|source| Error::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Opened {}", path.display());
        self.open(TextBuffer::new(&text), Some(path.to_path_buf()), now);
        Ok(())
    }

    /// Write the active document back to where it was loaded from.
    pub fn save(&self) -> Result<()> {
        let document = self
            .active
            .as_ref()
            .ok_or_else(|| Error::Application("No active document".to_string()))?;
        let path = document
            .path
            .as_ref()
            .ok_or_else(|| Error::Application("Document has no file path".to_string()))?;

        fs::write(path, document.buffer.to_text()).map_err(|source| Error::FileWrite {
            path: path.clone(),
            source,
        })?;
        info!("Saved {}", path.display());
        Ok(())
    }

    pub fn active(&self) -> Option<&ActiveDocument> {
        self.active.as_ref()
    }

    pub fn buffer(&self) -> Option<&TextBuffer> {
        self.active.as_ref().map(|document| &document.buffer)
    }

    /// Mutable access for host-side edits such as cursor moves. Call
    /// [`Session::document_changed`] after changing the text.
    pub fn buffer_mut(&mut self) -> Option<&mut TextBuffer> {
        self.active.as_mut().map(|document| &mut document.buffer)
    }

    /// Notify the session that the host changed the active document's text.
    pub fn document_changed(&mut self, now: Instant) {
        self.emit(EventKind::DocumentChanged, now);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Settings
    // ─────────────────────────────────────────────────────────────────────────

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn outline(&self) -> &OutlineConfig {
        &self.outline
    }

    /// Replace the settings. On error the previous settings stay in effect.
    pub fn apply_settings(&mut self, mut settings: Settings, now: Instant) -> Result<()> {
        settings.sanitize();
        self.outline = OutlineConfig::from_settings(&settings)?;
        self.settings = settings;
        self.emit(EventKind::ConfigurationChanged, now);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Commands
    // ─────────────────────────────────────────────────────────────────────────

    /// Run a command against the active document at time `now`.
    ///
    /// Warnings are logged and appended to the notification log. Without an
    /// active document nothing happens.
    pub fn execute_at(&mut self, command: Command, now: Instant) -> CommandOutcome {
        let Some(document) = self.active.as_mut() else {
            debug!("{}: no active document", command);
            return CommandOutcome::default();
        };

        let buffer = &mut document.buffer;
        let outcome = commands::execute(command, &*buffer, buffer.cursors(), &self.outline);

        if let Some(cursors) = outcome.cursors.clone() {
            buffer.set_cursors(cursors);
        }
        buffer.apply_edits(&outcome.edits);

        if let Some(warning) = outcome.warning {
            warn!("{}: {}", command, warning);
            self.notifications.push(warning.to_string());
        }
        if !outcome.edits.is_empty() {
            self.emit(EventKind::DocumentChanged, now);
        }
        outcome
    }

    pub fn execute(&mut self, command: Command) -> CommandOutcome {
        self.execute_at(command, Instant::now())
    }

    pub fn notifications(&self) -> &[String] {
        &self.notifications
    }

    pub fn take_notifications(&mut self) -> Vec<String> {
        std::mem::take(&mut self.notifications)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Decorations
    // ─────────────────────────────────────────────────────────────────────────

    /// Run a due decoration scan over the active document. Returns whether a
    /// scan ran.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut decorator = self.decorator.borrow_mut();
        if !decorator.take_due(now) {
            return false;
        }
        match &self.active {
            Some(document) => {
                decorator.refresh(&document.buffer.to_text());
                true
            }
            None => false,
        }
    }

    /// Scan the active document now, bypassing the debounce.
    pub fn refresh_decorations(&mut self) {
        if let Some(document) = &self.active {
            self.decorator.borrow_mut().refresh(&document.buffer.to_text());
        }
    }

    pub fn decorator(&self) -> Ref<'_, TodoDecorator<R>> {
        self.decorator.borrow()
    }
}

impl<R: DecorationRenderer + 'static> std::fmt::Debug for Session<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("active", &self.active)
            .field("settings", &self.settings)
            .field("notifications", &self.notifications)
            .field("subscriptions", &self.subscriptions)
            .finish_non_exhaustive()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
