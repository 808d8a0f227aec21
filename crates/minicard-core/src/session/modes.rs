//! Global display modes.

use tracing::info;

use super::Session;
use crate::error::Result;
use crate::host::Presentation;
use crate::storage::KeyValueStore;
use crate::view::Surface;

impl<S: KeyValueStore, V: Surface> Session<S, V> {
    /// Flip secret mode, apply it and persist. Returns the new value.
    pub fn toggle_secret_mode(&mut self) -> Result<bool> {
        let enabled = self.store.mutate(|state| {
            state.secret_mode = !state.secret_mode;
            state.secret_mode
        })?;
        self.view.apply_secret_mode(enabled);
        info!(enabled, "Secret mode toggled");
        Ok(enabled)
    }

    #[must_use]
    pub const fn is_pure_mode(&self) -> bool {
        self.pure_mode
    }

    /// Hide the toolbar and go fullscreen. Not persisted.
    ///
    /// A refused fullscreen request is reported as a notification; the
    /// toolbar stays hidden.
    pub fn enter_pure_mode(&mut self, presentation: &mut dyn Presentation) -> Result<()> {
        self.pure_mode = true;
        self.view.set_toolbar_visible(false);
        if let Err(error) = presentation.request_fullscreen() {
            self.notify(error.to_string());
            return Err(error);
        }
        Ok(())
    }

    /// Show the toolbar again and leave fullscreen
    pub fn exit_pure_mode(&mut self, presentation: &mut dyn Presentation) -> Result<()> {
        self.pure_mode = false;
        self.view.set_toolbar_visible(true);
        if let Err(error) = presentation.exit_fullscreen() {
            self.notify(error.to_string());
            return Err(error);
        }
        Ok(())
    }
}
