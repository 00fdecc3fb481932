use std::collections::BTreeMap;

/// Board domain used for regions missing from the table
pub const DEFAULT_DOMAIN: &str = "https://www.indeed.com";

/// Built-in region → board domain entries
const BUILTIN_REGIONS: &[(&str, &str)] = &[
    ("United States", "https://www.indeed.com"),
    ("United Kingdom", "https://www.indeed.co.uk"),
    ("Germany", "https://de.indeed.com"),
    ("Australia", "https://au.indeed.com"),
    ("New Zealand", "https://www.indeed.co.nz"),
];

/// Closed lookup from region name to the board domain serving it
///
/// Unknown regions resolve to a single fallback entry. The table is plain
/// data: extend it through configuration rather than in the parsers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionTable {
    domains: BTreeMap<String, String>,
    fallback: String,
}

impl Default for RegionTable {
    fn default() -> Self {
        Self {
            domains: BUILTIN_REGIONS
                .iter()
                .map(|(region, domain)| (region.to_string(), domain.to_string()))
                .collect(),
            fallback: DEFAULT_DOMAIN.to_string(),
        }
    }
}

impl RegionTable {
    /// Built-in table extended (or overridden) by `extra`
    pub fn with_overrides(extra: &BTreeMap<String, String>) -> Self {
        let mut table = Self::default();
        for (region, domain) in extra {
            table.insert(region, domain);
        }
        table
    }

    pub fn insert(&mut self, region: &str, domain: &str) {
        self.domains.insert(
            region.to_string(),
            domain.trim_end_matches('/').to_string(),
        );
    }

    /// Domain for a region, or the fallback when the region is unknown or absent
    ///
    /// # Examples
    ///
    /// ```
    /// use job_sift::url::RegionTable;
    ///
    /// let table = RegionTable::default();
    /// assert_eq!(table.resolve(Some("Germany")), "https://de.indeed.com");
    /// assert_eq!(table.resolve(Some("Atlantis")), "https://www.indeed.com");
    /// assert_eq!(table.resolve(None), "https://www.indeed.com");
    /// ```
    pub fn resolve(&self, region: Option<&str>) -> &str {
        region
            .and_then(|r| self.domains.get(r))
            .map(String::as_str)
            .unwrap_or(&self.fallback)
    }

    /// An explicit domain wins; otherwise the region decides
    pub fn base_domain<'a>(&'a self, region: Option<&str>, domain: Option<&'a str>) -> &'a str {
        match domain {
            Some(d) if !d.trim().is_empty() => d,
            _ => self.resolve(region),
        }
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}
