//! Extension entry point: metadata, installation, and the transform action.

use std::io;
use std::sync::Arc;

use chromogen_core::{ImageServer, RegionRequest, SublinearServer};
use parking_lot::RwLock;

use crate::prefs::Preferences;

/// Display name of the extension.
pub const EXTENSION_NAME: &str = "Chromogen";

/// Short description shown in the installed-extensions list.
pub const EXTENSION_DESCRIPTION: &str = "Sublinear intensity transform for tiled images";

/// Host application version the extension targets.
pub const EXTENSION_HOST_VERSION: &str = "v0.5.1";

/// Where updates are published.
pub const EXTENSION_REPOSITORY: GitHubRepo = GitHubRepo {
    owner: "tweber225",
    name: "qupath-extension-chromogen",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GitHubRepo {
    pub owner: &'static str,
    pub name: &'static str,
}

impl GitHubRepo {
    pub fn url(&self) -> String {
        format!("https://github.com/{}/{}", self.owner, self.name)
    }
}

/// The image currently on display, shared between the viewer and actions.
#[derive(Default)]
pub struct ImageSlot {
    current: RwLock<Option<Arc<dyn ImageServer>>>,
}

impl ImageSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<Arc<dyn ImageServer>> {
        self.current.read().clone()
    }

    pub fn set(&self, server: Arc<dyn ImageServer>) {
        *self.current.write() = Some(server);
    }

    pub fn clear(&self) {
        *self.current.write() = None;
    }
}

/// Errors that can occur while applying the transform.
#[derive(Debug, thiserror::Error)]
pub enum ExtensionError {
    #[error("Chromogen is disabled in preferences")]
    Disabled,
    #[error("no image is currently open")]
    NoImage,
    #[error("failed to apply transform: {0}")]
    Io(#[from] io::Error),
}

pub struct ChromogenExtension {
    prefs: Preferences,
    installed: bool,
}

impl ChromogenExtension {
    pub fn new(prefs: Preferences) -> Self {
        Self {
            prefs,
            installed: false,
        }
    }

    pub fn name(&self) -> &'static str {
        EXTENSION_NAME
    }

    pub fn description(&self) -> &'static str {
        EXTENSION_DESCRIPTION
    }

    pub fn host_version(&self) -> &'static str {
        EXTENSION_HOST_VERSION
    }

    pub fn repository(&self) -> GitHubRepo {
        EXTENSION_REPOSITORY
    }

    pub fn prefs(&self) -> &Preferences {
        &self.prefs
    }

    pub fn prefs_mut(&mut self) -> &mut Preferences {
        &mut self.prefs
    }

    pub fn is_installed(&self) -> bool {
        self.installed
    }

    /// Mark the extension installed. Returns `false` if it already was.
    pub fn install(&mut self) -> bool {
        if self.installed {
            tracing::debug!("{} is already installed", EXTENSION_NAME);
            return false;
        }
        self.installed = true;
        tracing::info!("installed {} ({})", EXTENSION_NAME, EXTENSION_REPOSITORY.url());
        true
    }

    /// Replace the image in `slot` with its sublinear-transformed view.
    ///
    /// The first tile is read through the new server before it is installed,
    /// so a source that cannot be read leaves the slot untouched.
    pub fn apply_transform(&self, slot: &ImageSlot) -> Result<Arc<dyn ImageServer>, ExtensionError> {
        if !self.prefs.enable_extension {
            tracing::warn!("transform requested while {} is disabled", EXTENSION_NAME);
            return Err(ExtensionError::Disabled);
        }
        let current = slot.current().ok_or(ExtensionError::NoImage)?;
        tracing::info!("applying sublinear transform to {}", current.path());

        let server: Arc<dyn ImageServer> = Arc::new(SublinearServer::new(current));
        let meta = server.metadata();
        let first_tile = RegionRequest::new(
            server.path(),
            0,
            0,
            meta.tile_width.min(meta.width),
            meta.tile_height.min(meta.height),
        );
        if let Err(e) = server.read_region(&first_tile) {
            tracing::error!("failed to apply {} transform: {e}", EXTENSION_NAME);
            return Err(ExtensionError::Io(e));
        }

        slot.set(Arc::clone(&server));
        Ok(server)
    }
}

impl Default for ChromogenExtension {
    fn default() -> Self {
        Self::new(Preferences::default())
    }
}
