//! Keeps every tab group on the page on the same label.
//!
//! The controller owns no DOM or storage handles itself: the page, the
//! preference store and the deferral primitive are injected, so the same
//! logic runs against `web_sys` in the browser and against fakes in tests.

use super::labels::TabLabels;
use super::scheduler::Scheduler;
use super::store::PreferenceStore;
use contracts::shared::tab_sync::normalize_label;
use std::cell::Cell;
use std::rc::Rc;

pub struct TabSyncController<S, L, D> {
    store: S,
    labels: Rc<L>,
    scheduler: D,
    // Set while we synthesize clicks, so our own listener skips them.
    broadcasting: Rc<Cell<bool>>,
}

impl<S, L, D> TabSyncController<S, L, D>
where
    S: PreferenceStore,
    L: TabLabels + 'static,
    D: Scheduler,
{
    pub fn new(store: S, labels: L, scheduler: D) -> Self {
        Self {
            store,
            labels: Rc::new(labels),
            scheduler,
            broadcasting: Rc::new(Cell::new(false)),
        }
    }

    pub fn labels(&self) -> &L {
        &self.labels
    }

    /// Apply the stored preference to every group that offers it.
    ///
    /// Returns the number of labels activated; zero when nothing is stored.
    pub fn restore(&self) -> usize {
        let Some(saved) = self.store.load() else {
            log::debug!("No stored tab preference");
            return 0;
        };
        let saved = normalize_label(&saved);
        if saved.is_empty() {
            return 0;
        }

        let activated = broadcast(&*self.labels, &self.broadcasting, saved);
        log::debug!("Restored tab preference '{}' on {} label(s)", saved, activated);
        activated
    }

    /// Entry point for document clicks. `clicked` is the caption of the tab
    /// label the click landed on, `None` when it hit anything else.
    pub fn handle_click(&self, clicked: Option<&str>) {
        if self.broadcasting.get() {
            return;
        }
        if let Some(label) = clicked {
            self.select(label);
        }
    }

    /// Persist `label` and re-broadcast it once the current dispatch is done.
    pub fn select(&self, label: &str) {
        let label = normalize_label(label).to_string();
        self.store.save(&label);
        log::debug!("Tab preference set to '{}'", label);

        let labels = Rc::clone(&self.labels);
        let broadcasting = Rc::clone(&self.broadcasting);
        self.scheduler.defer(Box::new(move || {
            let activated = broadcast(&*labels, &broadcasting, &label);
            log::debug!("Synced '{}' across {} label(s)", label, activated);
        }));
    }
}

/// Activate every label whose caption equals `text`.
fn broadcast<L: TabLabels + ?Sized>(
    labels: &L,
    broadcasting: &Cell<bool>,
    text: &str,
) -> usize {
    let matches = labels.find_labels_by_text(text);

    let was_broadcasting = broadcasting.replace(true);
    for label in &matches {
        labels.activate(label);
    }
    broadcasting.set(was_broadcasting);

    matches.len()
}
