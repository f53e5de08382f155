//! Ordered rule table.
//!
//! Rules are evaluated top to bottom and the first whose predicate holds
//! picks the category. The last rule always applies, so classification is
//! total.

use super::ladder::{bucket_mobile, bucket_tablet, width_ladder};
use super::{Classification, DeviceFacts};
use crate::config::DetectionConfig;
use crate::types::DeviceCategory;

/// One row of the decision table.
#[derive(Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub applies: fn(&DeviceFacts, &DetectionConfig) -> bool,
    pub bucket: fn(&DeviceFacts, &DetectionConfig) -> DeviceCategory,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule").field("name", &self.name).finish()
    }
}

// =============================================================================
// Standard Rules
// =============================================================================

const MOBILE_UA: Rule = Rule {
    name: "mobile-ua",
    applies: |facts, _| facts.ua.is_mobile() && facts.is_touch() && !facts.ipad_like,
    bucket: |facts, config| bucket_mobile(facts.width(), &config.breakpoints),
};

const TABLET_UA: Rule = Rule {
    name: "tablet-ua",
    applies: |facts, _| (facts.ua.is_tablet() || facts.ipad_like) && facts.is_touch(),
    bucket: |facts, config| bucket_tablet(facts.width(), &config.breakpoints),
};

const REDUCED_FUNCTIONALITY: Rule = Rule {
    name: "reduced-functionality",
    applies: |_, config| config.reduced_functionality,
    bucket: |_, _| DeviceCategory::Desktop,
};

const WIDTH_LADDER: Rule = Rule {
    name: "width-ladder",
    applies: |_, _| true,
    bucket: |facts, config| width_ladder(facts.width(), &config.breakpoints),
};

// =============================================================================
// Rule Set
// =============================================================================

/// Priority-ordered rules ending in a catch-all.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<Rule>,
    fallback: Rule,
}

impl RuleSet {
    /// mobile-ua, tablet-ua, reduced-functionality, width-ladder.
    pub fn standard() -> Self {
        Self {
            rules: vec![MOBILE_UA, TABLET_UA, REDUCED_FUNCTIONALITY],
            fallback: WIDTH_LADDER,
        }
    }

    /// Custom rules evaluated before the width ladder.
    pub fn with_rules(rules: Vec<Rule>) -> Self {
        Self {
            rules,
            fallback: WIDTH_LADDER,
        }
    }

    /// Rules in evaluation order, including the catch-all.
    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter().chain(std::iter::once(&self.fallback))
    }

    pub fn classify(&self, facts: &DeviceFacts, config: &DetectionConfig) -> Classification {
        let rule = self
            .rules
            .iter()
            .find(|rule| (rule.applies)(facts, config))
            .unwrap_or(&self.fallback);

        Classification {
            category: (rule.bucket)(facts, config),
            rule: rule.name,
        }
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::standard()
    }
}
