//! Share-link construction and the clipboard collaborator.

use thiserror::Error;

use crate::location::FragmentHost;

/// Failure reported by a clipboard implementation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Clipboard write failed: {0}")]
pub struct ClipboardError(pub String);

/// Somewhere a share link can be copied to
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// What the share button currently offers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareState {
    /// Nothing to share
    Disabled,
    Ready,
    Copied,
}

/// Result of pressing the share button
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareOutcome {
    /// The list is empty or a copy is still being acknowledged
    Disabled,
    Copied(String),
    /// The clipboard rejected the link; already logged
    Failed(String),
}

/// Origin followed by the current fragment, copied verbatim.
pub fn share_link(host: &impl FragmentHost) -> String {
    match host.fragment() {
        Some(fragment) => format!("{}#{fragment}", host.origin()),
        None => host.origin(),
    }
}
