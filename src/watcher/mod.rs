//! File system watcher
//!
//! Subscribes to create and rename events and feeds the affected file of
//! each through the renamer. One event is processed to completion before
//! the next is looked at.

mod handler;

pub use handler::EventHandler;

use anyhow::Result;
use notify::event::{CreateKind, ModifyKind, RenameMode};
use notify::{
    Config, EventKind, RecommendedWatcher, RecursiveMode, Watcher as NotifyWatcher,
};
use std::path::Path;
use std::sync::mpsc;
use std::time::Duration;
use tracing::{debug, error, info};

use crate::renamer::{Outcome, Renamer};
use crate::store::ContentStore;
use crate::templates::TemplateApplier;

/// Watches directories and applies rename rules to arriving files
pub struct Watcher<S, T> {
    watcher: RecommendedWatcher,
    renamer: Renamer<S, T>,
    rx: mpsc::Receiver<Result<notify::Event, notify::Error>>,
    event_handler: EventHandler,
    files_renamed: u64,
}

impl<S: ContentStore, T: TemplateApplier> Watcher<S, T> {
    /// Create a new watcher with the given renamer, polling interval, and debounce duration
    pub fn new(
        renamer: Renamer<S, T>,
        polling_interval_secs: u64,
        debounce_seconds: u64,
    ) -> Result<Self> {
        let (tx, rx) = mpsc::channel();

        let watcher = RecommendedWatcher::new(
            move |res| {
                if let Err(e) = tx.send(res) {
                    error!("Failed to send watch event: {}", e);
                }
            },
            Config::default().with_poll_interval(Duration::from_secs(polling_interval_secs)),
        )?;

        Ok(Self {
            watcher,
            renamer,
            rx,
            event_handler: EventHandler::new(debounce_seconds),
            files_renamed: 0,
        })
    }

    /// Start watching a directory
    pub fn watch(&mut self, path: &Path, recursive: bool) -> Result<()> {
        let mode = if recursive {
            RecursiveMode::Recursive
        } else {
            RecursiveMode::NonRecursive
        };

        self.watcher.watch(path, mode)?;
        info!("Watching: {} (recursive: {})", path.display(), recursive);
        Ok(())
    }

    /// Process pending events (non-blocking)
    pub fn poll(&self) -> Result<Vec<notify::Event>> {
        let mut events = Vec::new();

        while let Ok(result) = self.rx.try_recv() {
            match result {
                Ok(event) => events.push(event),
                Err(e) => error!("Watch error: {}", e),
            }
        }

        Ok(events)
    }

    /// Process already-polled events and apply rules (with debouncing)
    pub fn process_polled_events(&mut self, events: Vec<notify::Event>) -> Result<usize> {
        let mut renamed = 0;

        for event in events {
            debug!("Event: {:?}", event.kind);

            if !is_arrival(&event.kind) {
                debug!("Ignoring event kind: {:?}", event.kind);
                continue;
            }

            for path in self.event_handler.should_process(&event) {
                if self.event_handler.take_suppressed(&path) {
                    debug!("Skipping self-generated event: {}", path.display());
                    continue;
                }

                // Rename events also carry the old path, which is gone by now
                if !path.is_file() {
                    continue;
                }

                info!("File event detected: {}", path.display());
                match self.renamer.handle(&path) {
                    Ok(Outcome::Renamed { to, .. }) => {
                        // The create event for the destination is ours
                        self.event_handler.suppress(to);
                        renamed += 1;
                    }
                    Ok(Outcome::Passed) => {}
                    Err(e) => {
                        error!("Rename failed for {}: {}", path.display(), e);
                        crate::notifications::notify_rename_error(
                            &path.display().to_string(),
                            &e.to_string(),
                        );
                    }
                }
            }
        }

        // Periodically clean up old entries
        self.event_handler.cleanup();

        self.files_renamed += renamed as u64;
        Ok(renamed)
    }

    /// Process events and apply rules (polls + processes, convenience method)
    pub fn process_events(&mut self) -> Result<usize> {
        let events = self.poll()?;
        self.process_polled_events(events)
    }

    /// Get total number of files renamed
    pub fn files_renamed(&self) -> u64 {
        self.files_renamed
    }

    /// Get the renamer
    pub fn renamer(&self) -> &Renamer<S, T> {
        &self.renamer
    }
}

/// Create events and rename-to events both deliver a freshly named file.
fn is_arrival(kind: &EventKind) -> bool {
    matches!(
        kind,
        EventKind::Create(CreateKind::File | CreateKind::Any)
            | EventKind::Modify(ModifyKind::Name(
                RenameMode::To | RenameMode::Both | RenameMode::Any
            ))
    )
}
