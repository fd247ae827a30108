//! The page location the buy list is mirrored into.

use url::Url;

use crate::error::{Error, Result};
use crate::util::is_http_url;

/// Read/replace access to the current location's fragment.
///
/// Implementations must replace the fragment in place (no new history entry).
pub trait FragmentHost {
    /// Scheme, host and port, e.g. `https://grocer.example`
    fn origin(&self) -> String;

    /// Fragment without the leading `#`; `None` when absent or empty
    fn fragment(&self) -> Option<String>;

    /// Replace the fragment; `None` clears it.
    fn replace_fragment(&mut self, fragment: Option<&str>);
}

/// A location held in memory, used by the CLI and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryLocation {
    url: Url,
}

impl MemoryLocation {
    /// Parse an absolute `http(s)` URL.
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        if !is_http_url(input) {
            return Err(Error::InvalidInput(format!(
                "location must be an http:// or https:// URL: {input}"
            )));
        }
        Ok(Self {
            url: Url::parse(input)?,
        })
    }

    /// Full URL including the fragment.
    #[must_use]
    pub fn href(&self) -> &str {
        self.url.as_str()
    }
}

impl FragmentHost for MemoryLocation {
    fn origin(&self) -> String {
        self.url.origin().ascii_serialization()
    }

    fn fragment(&self) -> Option<String> {
        self.url
            .fragment()
            .filter(|fragment| !fragment.is_empty())
            .map(str::to_string)
    }

    fn replace_fragment(&mut self, fragment: Option<&str>) {
        self.url.set_fragment(fragment);
    }
}
