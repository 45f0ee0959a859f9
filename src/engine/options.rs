//! Options methods for [`Viewport`].

use super::Viewport;
use crate::options::Options;

impl Viewport {
    /// Replace options and apply all changes to subsystems.
    pub fn set_options(&mut self, new: Options) {
        self.options = new;
        self.apply_options();
    }

    /// Push current option values to the pose, input translator and pick
    /// cascade. Display toggles go through their setters so the host is
    /// notified of changes.
    pub fn apply_options(&mut self) {
        self.pose.apply_options(&self.options.camera);
        self.input.apply_options(&self.options);
        self.cascade.apply_options(&self.options.picking);

        let display = self.options.display.clone();
        self.set_ortho(display.ortho);
        self.set_tonemapping(display.tonemapping);
    }

    /// Current options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }
}
