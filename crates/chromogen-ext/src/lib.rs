//! Chromogen extension layer.
//!
//! Glues the core transform to an application: decoding image files into
//! servers, persisting user preferences, and swapping the currently
//! displayed image for its transformed view.

pub mod extension;
pub mod loader;
pub mod prefs;

pub use extension::{ChromogenExtension, ExtensionError, ImageSlot};
pub use loader::{LoadError, load_image};
pub use prefs::{Preferences, PrefsError};
