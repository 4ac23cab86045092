use url::Url;

/// Name of the query parameter that carries the original page through Steam and back.
pub const REDIRECT_PARAM: &str = "redirect_to";

/// Resolves `page` against the site root. Pages on another origin, or on the login or
/// callback route, resolve to the site root so a login can never redirect off-site or loop.
pub fn resolve_original_page(
    site_root: &Url,
    page: &str,
    internal_routes: &[&str],
) -> Url {
    let page = page.trim();

    if page.is_empty() {
        return site_root.clone();
    }

    match site_root.join(page) {
        Ok(url) if url.origin() != site_root.origin() => {
            log::debug!("Ignoring off-site redirect {url}");
            site_root.clone()
        },
        Ok(url) if is_internal_route(&url, internal_routes) => site_root.clone(),
        Ok(url) => url,
        Err(_) => site_root.clone(),
    }
}

fn is_internal_route(url: &Url, routes: &[&str]) -> bool {
    let path = url.path().trim_end_matches('/');

    routes
        .iter()
        .any(|route| route.trim_end_matches('/') == path)
}
