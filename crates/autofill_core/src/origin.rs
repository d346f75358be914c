use url::Url;

/// The page that hosts the bookmark form.
///
/// Candidate URLs are resolved against it the way an anchor's `href` is, so
/// relative input lands on this page's host and is rejected by
/// [`PageOrigin::is_valid_url`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageOrigin {
    base: Url,
}

impl PageOrigin {
    pub fn new(base: Url) -> Self {
        Self { base }
    }

    pub fn parse(page_url: &str) -> Result<Self, url::ParseError> {
        Url::parse(page_url).map(Self::new)
    }

    pub fn url(&self) -> &Url {
        &self.base
    }

    /// `host[:port]` of the page, empty if the page URL has no host.
    pub fn host(&self) -> String {
        authority(&self.base).unwrap_or_default()
    }

    /// True when `candidate` resolves to a non-empty host other than the page's.
    pub fn is_valid_url(&self, candidate: &str) -> bool {
        let Some(host) = self.resolve_host(candidate) else {
            return false;
        };
        host != self.host()
    }

    /// Host of `candidate` after resolution against the page URL.
    ///
    /// `None` for strings that do not resolve or resolve to a host-less URL
    /// (`mailto:`, `data:` and similar).
    pub fn resolve_host(&self, candidate: &str) -> Option<String> {
        let resolved = self.base.join(candidate).ok()?;
        authority(&resolved)
    }
}

fn authority(url: &Url) -> Option<String> {
    let host = url.host_str().filter(|host| !host.is_empty())?;
    // `port()` is None for the scheme's default port, matching `Location.host`.
    Some(match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    })
}
