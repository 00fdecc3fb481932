use crate::skills::fuzzy::partial_ratio;
use crate::skills::taxonomy::SkillTaxonomy;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Knobs for one matching call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchOptions {
    /// Run the fuzzy pass over skills the patterns missed
    pub use_fuzzy: bool,

    /// Minimum partial similarity (0-100) for a fuzzy hit
    pub fuzzy_threshold: u8,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            use_fuzzy: false,
            fuzzy_threshold: 90,
        }
    }
}

impl From<&crate::config::MatchingConfig> for MatchOptions {
    fn from(config: &crate::config::MatchingConfig) -> Self {
        Self {
            use_fuzzy: config.use_fuzzy,
            fuzzy_threshold: config.fuzzy_threshold,
        }
    }
}

/// Tags free text with canonical skill names
///
/// Holds no state between calls: the result depends only on the text, the
/// options and the injected taxonomy.
#[derive(Debug, Clone)]
pub struct SkillMatcher {
    taxonomy: Arc<SkillTaxonomy>,
}

impl Default for SkillMatcher {
    fn default() -> Self {
        Self::new(SkillTaxonomy::builtin())
    }
}

impl SkillMatcher {
    pub fn new(taxonomy: SkillTaxonomy) -> Self {
        Self {
            taxonomy: Arc::new(taxonomy),
        }
    }

    pub fn taxonomy(&self) -> &SkillTaxonomy {
        &self.taxonomy
    }

    /// Pattern-only matching with default options
    ///
    /// # Example
    ///
    /// ```
    /// use job_sift::skills::SkillMatcher;
    ///
    /// let skills = SkillMatcher::default().find("Experience with MATLAB/Simulink");
    /// assert_eq!(skills.into_iter().collect::<Vec<_>>(), vec!["matlab", "simulink"]);
    /// ```
    pub fn find(&self, text: &str) -> BTreeSet<String> {
        self.find_with(Some(text), MatchOptions::default())
    }

    /// Canonical skills mentioned in `text`, in lexicographic order
    ///
    /// A skill matches when any of its patterns occurs anywhere in the text.
    /// The fuzzy pass, when enabled, only adds skills the patterns missed.
    pub fn find_with(&self, text: Option<&str>, options: MatchOptions) -> BTreeSet<String> {
        let mut found = BTreeSet::new();
        let text = match text {
            Some(t) if !t.is_empty() => t,
            _ => return found,
        };

        for skill in self.taxonomy.iter() {
            if skill.is_mentioned_in(text) {
                found.insert(skill.name().to_string());
            }
        }

        if options.use_fuzzy {
            let lowered = text.to_lowercase();
            let threshold = f64::from(options.fuzzy_threshold);
            for skill in self.taxonomy.iter() {
                if found.contains(skill.name()) {
                    continue;
                }
                if partial_ratio(&skill.name().to_lowercase(), &lowered) >= threshold {
                    tracing::trace!("Fuzzy match for skill '{}'", skill.name());
                    found.insert(skill.name().to_string());
                }
            }
        }

        found
    }
}
