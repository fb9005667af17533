//! Language tab synchronization for MkDocs-style tabbed code samples.
//!
//! Selecting a tab label switches every other tab group on the page to the
//! same label, and the choice is kept in localStorage across page loads.

pub mod controller;
pub mod labels;
pub mod scheduler;
pub mod store;

pub use controller::TabSyncController;
pub use labels::{DomTabLabels, TabLabels};
pub use scheduler::{Scheduler, TimeoutScheduler};
pub use store::{LocalStoragePreferenceStore, MemoryPreferenceStore, PreferenceStore};
