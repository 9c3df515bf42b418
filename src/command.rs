//! Async command pattern for side effects.
//!
//! Commands represent async operations that run outside the main event loop,
//! such as API calls. The browser returns commands from its update pass and
//! the app spawns each one on the tokio runtime.

use async_trait::async_trait;

/// An async operation with side effects.
///
/// Commands report their outcome by sending messages back through the
/// channel they were constructed with, never by returning data.
#[async_trait]
pub trait Command: Send + 'static {
    /// Human-readable name for logging.
    fn name(&self) -> String;

    /// Execute the command.
    async fn execute(self: Box<Self>) -> color_eyre::Result<()>;
}
