use url::Url;

/// Facts about the incoming request that the session needs. One per request.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct RequestContext {
    site_root: Url,
    current_url: Option<Url>,
}

impl RequestContext {
    /// Creates a context for a site served at `site_root`, e.g. `https://example.com`. The
    /// scheme says whether the site is served over HTTPS; any path, query or fragment is
    /// dropped.
    pub fn new(site_root: &str) -> Result<Self, url::ParseError> {
        let mut site_root = Url::parse(site_root)?;

        if site_root.cannot_be_a_base() {
            return Err(url::ParseError::RelativeUrlWithCannotBeABaseBase);
        }

        site_root.set_path("/");
        site_root.set_query(None);
        site_root.set_fragment(None);

        Ok(Self {
            site_root,
            current_url: None,
        })
    }

    /// Sets the page the user is on, typically taken from the `Referer` header.
    pub fn with_current_url(mut self, current_url: &str) -> Self {
        self.current_url = self.site_root.join(current_url).ok();
        self
    }

    pub fn site_root(&self) -> &Url {
        &self.site_root
    }

    pub fn current_url(&self) -> Option<&Url> {
        self.current_url.as_ref()
    }

    pub fn is_https(&self) -> bool {
        self.site_root.scheme() == "https"
    }
}
