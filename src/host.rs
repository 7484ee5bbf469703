//! Mini-app host bridge.
//!
//! The embedding host provides lifecycle (`ready`, `expand`, `close`) and
//! back-button chrome. The app only talks to it through [`MiniAppHost`].

use tracing::info;

/// Capabilities offered by the embedding host.
pub trait MiniAppHost {
    /// Tells the host the UI is ready to be shown.
    fn ready(&mut self);
    /// Asks the host to give the app its full height.
    fn expand(&mut self);
    /// Asks the host to close the app surface.
    fn close(&mut self);
    /// Shows or hides the host back button.
    fn set_back_button(&mut self, visible: bool);
    /// Whether the app runs inside a host that can close it.
    fn is_embedded(&self) -> bool;
}

/// Host used when running in a terminal.
///
/// Lifecycle calls are only logged; the app quits itself after `close`.
#[derive(Debug, Clone, Default)]
pub struct TerminalHost {
    embedded: bool,
    back_button: bool,
}

impl TerminalHost {
    pub fn new(embedded: bool) -> Self {
        Self {
            embedded,
            back_button: false,
        }
    }

    /// Whether the back button is currently shown.
    pub fn back_button(&self) -> bool {
        self.back_button
    }
}

impl MiniAppHost for TerminalHost {
    fn ready(&mut self) {
        info!(embedded = self.embedded, "host ready");
    }

    fn expand(&mut self) {
        info!("host expand");
    }

    fn close(&mut self) {
        info!("host close");
    }

    fn set_back_button(&mut self, visible: bool) {
        self.back_button = visible;
    }

    fn is_embedded(&self) -> bool {
        self.embedded
    }
}
