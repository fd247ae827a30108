use arboard::Clipboard as SystemClipboard;
use grocer_core::share::{Clipboard, ClipboardError, ShareOutcome};

use crate::commands::common::open_session;
use crate::config::CliConfig;
use crate::error::CliError;

/// Whether copied text is served by this process rather than handed to the
/// OS (X11 and Wayland). The text is gone once the process exits unless a
/// clipboard manager has taken it over.
pub const SERVES_CLIPBOARD: bool = cfg!(all(
    unix,
    not(any(target_os = "macos", target_os = "android", target_os = "emscripten"))
));

/// System clipboard
#[derive(Debug, Default)]
pub struct ArboardClipboard;

impl Clipboard for ArboardClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let mut clipboard = SystemClipboard::new().map_err(clipboard_error)?;
        set_text(&mut clipboard, text).map_err(clipboard_error)
    }
}

/// Blocks until another copy (or a clipboard manager) takes the selection
/// over, so the link outlives `grocer share`.
#[cfg(all(
    unix,
    not(any(target_os = "macos", target_os = "android", target_os = "emscripten"))
))]
fn set_text(clipboard: &mut SystemClipboard, text: &str) -> Result<(), arboard::Error> {
    use arboard::SetExtLinux;

    clipboard.set().wait().text(text)
}

#[cfg(not(all(
    unix,
    not(any(target_os = "macos", target_os = "android", target_os = "emscripten"))
)))]
fn set_text(clipboard: &mut SystemClipboard, text: &str) -> Result<(), arboard::Error> {
    clipboard.set_text(text)
}

fn clipboard_error(error: arboard::Error) -> ClipboardError {
    ClipboardError(error.to_string())
}

/// What `grocer share` tells the user: a note for stderr and the link for
/// stdout.
#[derive(Debug, PartialEq, Eq)]
pub struct ShareReport {
    pub notice: &'static str,
    pub link: String,
}

pub fn share_report(outcome: ShareOutcome) -> Result<ShareReport, CliError> {
    match outcome {
        ShareOutcome::Disabled => Err(CliError::NothingToShare),
        ShareOutcome::Copied(link) => Ok(ShareReport {
            notice: "Copied!",
            link,
        }),
        // Already logged by the session; still hand the link over.
        ShareOutcome::Failed(link) => Ok(ShareReport {
            notice: "Could not copy to the clipboard; here is the link instead:",
            link,
        }),
    }
}

pub fn run_share(print: bool, url: Option<&str>, config: &CliConfig) -> Result<(), CliError> {
    let mut session = open_session(url, config)?;
    let link = session.share_link().ok_or(CliError::NothingToShare)?;

    if print {
        println!("{link}");
        return Ok(());
    }

    if SERVES_CLIPBOARD {
        eprintln!("Keeping the link on the clipboard until something else is copied...");
    }
    let report = share_report(session.share(&mut ArboardClipboard))?;
    eprintln!("{}", report.notice);
    println!("{}", report.link);
    Ok(())
}
