use crate::ConfigError;
use regex::{Regex, RegexBuilder};
use std::collections::BTreeMap;

/// Built-in canonical skills and their textual variants
///
/// Patterns are matched case-insensitively and unanchored. The regex engine
/// has no look-around, so "not preceded/followed by a word character" is
/// spelled `(?:^|\W)` / `(?:\W|$)`.
const BUILTIN_SKILLS: &[(&str, &[&str])] = &[
    ("python", &[r"python\b"]),
    ("c++", &[r"(?:^|\W)c\+\+(?:\W|$)", r"\bcpp\b", r"cplusplus\b"]),
    ("matlab", &[r"matlab\b"]),
    ("simulink", &[r"simulink\b"]),
    ("ros", &[r"\bros2?\b", r"\bRobot Operating System\b"]),
    ("gazebo", &[r"gazebo\b"]),
    ("nvidia isaac", &[r"nvidia\s+isaac\b", r"isaac\b"]),
    ("solidworks", &[r"solidworks\b"]),
    ("cad", &[r"\bcad\b"]),
    ("embedded", &[r"\bembedded\b"]),
    ("pcb", &[r"\bpcb\b"]),
    ("kicad", &[r"kicad\b"]),
    ("altium", &[r"altium\b"]),
    ("rtos", &[r"\brtos\b"]),
    ("firmware", &[r"firmware\b"]),
    ("plc", &[r"\bplc\b"]),
    ("siemens", &[r"siemens\b"]),
    ("allen-bradley", &[r"allen-?bradley\b"]),
    ("control theory", &[r"control\s+theory\b"]),
    ("pid", &[r"\bPID\b", r"pid\b"]),
    ("mpc", &[r"\bMPC\b", r"model\s*predictive\s*control"]),
    ("kalman", &[r"kalman\b"]),
    ("state estimation", &[r"state\s+estimation\b"]),
    ("sensor fusion", &[r"sensor\s+fusion\b"]),
    (
        "computer vision",
        &[r"computer\s+vision\b", r"\bCV\b", r"open\s*cv\b", r"opencv\b"],
    ),
    (
        "ai",
        &[
            r"\bAI\b",
            r"artificial\s+intelligence\b",
            r"machine\s+learning\b",
            r"deep\s+learning\b",
        ],
    ),
    ("opencv", &[r"opencv\b", r"open\s*cv\b"]),
    ("automation", &[r"automation\b"]),
    ("test", &[r"\btest(ing)?\b"]),
    ("validation", &[r"validation\b"]),
    ("integration", &[r"integration\b", r"system\s+integration\b"]),
    ("mechatronics", &[r"mechatronics\b"]),
    ("scada", &[r"scada\b"]),
];

/// One canonical skill and its compiled variants, in priority order
#[derive(Debug, Clone)]
pub struct CanonicalSkill {
    name: String,
    patterns: Vec<Regex>,
}

impl CanonicalSkill {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn patterns(&self) -> &[Regex] {
        &self.patterns
    }

    /// True when any variant occurs anywhere in `text`; stops at the first hit
    pub fn is_mentioned_in(&self, text: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(text))
    }
}

/// Read-only mapping from canonical skill name to its match patterns
///
/// Patterns are compiled once when the taxonomy is built.
#[derive(Debug, Clone)]
pub struct SkillTaxonomy {
    skills: Vec<CanonicalSkill>,
}

impl Default for SkillTaxonomy {
    fn default() -> Self {
        Self::builtin()
    }
}

impl SkillTaxonomy {
    /// The built-in taxonomy
    pub fn builtin() -> Self {
        let mut skills = Vec::with_capacity(BUILTIN_SKILLS.len());
        for (name, patterns) in BUILTIN_SKILLS {
            match compile_skill(name, patterns.iter().copied()) {
                Ok(skill) => skills.push(skill),
                Err(e) => tracing::error!("Dropping built-in skill '{}': {}", name, e),
            }
        }
        Self { skills }
    }

    /// Builds a taxonomy from (name, patterns) entries
    pub fn from_entries<'a, I, P>(entries: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (&'a str, P)>,
        P: IntoIterator<Item = &'a str>,
    {
        let mut taxonomy = Self { skills: Vec::new() };
        for (name, patterns) in entries {
            taxonomy.upsert(compile_skill(name, patterns)?);
        }
        Ok(taxonomy)
    }

    /// Adds configured skills, replacing built-ins with the same name
    pub fn with_overrides(mut self, extra: &BTreeMap<String, Vec<String>>) -> Result<Self, ConfigError> {
        for (name, patterns) in extra {
            let skill = compile_skill(name, patterns.iter().map(String::as_str))?;
            self.upsert(skill);
        }
        Ok(self)
    }

    fn upsert(&mut self, skill: CanonicalSkill) {
        match self.skills.iter_mut().find(|s| s.name == skill.name) {
            Some(existing) => *existing = skill,
            None => self.skills.push(skill),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &CanonicalSkill> {
        self.skills.iter()
    }

    pub fn get(&self, name: &str) -> Option<&CanonicalSkill> {
        self.skills.iter().find(|s| s.name == name)
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}

fn compile_skill<'a, P>(name: &str, patterns: P) -> Result<CanonicalSkill, ConfigError>
where
    P: IntoIterator<Item = &'a str>,
{
    let patterns = patterns
        .into_iter()
        .map(|pattern| {
            RegexBuilder::new(pattern)
                .case_insensitive(true)
                .build()
                .map_err(|source| ConfigError::InvalidPattern {
                    skill: name.to_string(),
                    source,
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CanonicalSkill {
        name: name.trim().to_string(),
        patterns,
    })
}
