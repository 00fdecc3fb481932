use url::Url;

/// Path of the search-results page on every board domain
const SEARCH_PATH: &str = "/jobs";

/// Path of the canonical detail page, keyed by the `jk` query parameter
const DETAIL_PATH: &str = "/viewjob";

/// Makes a listing href absolute
///
/// Hrefs that already start with `http` are kept verbatim; anything else is
/// joined onto `base_domain`. Returns None for blank hrefs or when the join
/// fails.
///
/// # Examples
///
/// ```
/// use job_sift::url::resolve_href;
///
/// assert_eq!(
///     resolve_href("/rc/clk?jk=abc", "https://www.indeed.com"),
///     Some("https://www.indeed.com/rc/clk?jk=abc".to_string())
/// );
/// assert_eq!(
///     resolve_href("https://other.example/job/1", "https://www.indeed.com"),
///     Some("https://other.example/job/1".to_string())
/// );
/// ```
pub fn resolve_href(href: &str, base_domain: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }

    if href.starts_with("http") {
        return Some(href.to_string());
    }

    let base = Url::parse(base_domain).ok()?;
    base.join(href).ok().map(|u| u.to_string())
}

/// Canonical detail-page URL for a listing key
///
/// # Examples
///
/// ```
/// use job_sift::url::detail_url;
///
/// assert_eq!(
///     detail_url("https://de.indeed.com", "test123"),
///     "https://de.indeed.com/viewjob?jk=test123"
/// );
/// ```
pub fn detail_url(base_domain: &str, listing_id: &str) -> String {
    match Url::parse(base_domain).and_then(|base| base.join(DETAIL_PATH)) {
        Ok(mut url) => {
            url.query_pairs_mut().clear().append_pair("jk", listing_id);
            url.to_string()
        }
        Err(_) => format!(
            "{}{}?jk={}",
            base_domain.trim_end_matches('/'),
            DETAIL_PATH,
            listing_id
        ),
    }
}

/// Search-results URL for a board domain; query parameters are added per request
pub fn search_url(base_domain: &str) -> String {
    format!("{}{}", base_domain.trim_end_matches('/'), SEARCH_PATH)
}
