//! Skill tagging
//!
//! A [`SkillTaxonomy`] maps canonical skill names to compiled regex variants.
//! It is built once at startup and handed to a [`SkillMatcher`], which tags
//! free text with the canonical names it mentions.

mod fuzzy;
mod matcher;
mod taxonomy;

pub use fuzzy::partial_ratio;
pub use matcher::{MatchOptions, SkillMatcher};
pub use taxonomy::{CanonicalSkill, SkillTaxonomy};
