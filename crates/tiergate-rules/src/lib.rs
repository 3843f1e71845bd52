//! The built-in rule catalog.
//!
//! Each rule claims that the fixed code path (variant) runs faster than the
//! hazardous one (baseline). The catalog is compiled in and read-only;
//! declaration order is evaluation and report order.

use tiergate_types::{Direction, RuleDefinition};

pub static RULES: [RuleDefinition; 7] = [
    RuleDefinition::new("FL001", "large (192B)", "split (32B)", Direction::Lower),
    RuleDefinition::new("FL002", "hazardous", "fixed", Direction::Lower),
    RuleDefinition::new("FL010", "seq_cst store", "release store", Direction::Lower),
    RuleDefinition::new("FL012", "mutex", "atomic", Direction::Lower),
    RuleDefinition::new("FL020", "heap alloc", "preallocated", Direction::Lower),
    RuleDefinition::new("FL030", "virtual", "crtp", Direction::Lower),
    RuleDefinition::new("FL041", "unpadded", "padded", Direction::Lower),
];

/// Ordered, read-only view over a rule catalog.
#[derive(Debug, Clone, Copy)]
pub struct RuleRegistry {
    rules: &'static [RuleDefinition],
}

impl RuleRegistry {
    pub fn builtin() -> Self {
        Self::new(&RULES)
    }

    /// Identifiers must be unique.
    pub fn new(rules: &'static [RuleDefinition]) -> Self {
        debug_assert!(
            rules
                .iter()
                .enumerate()
                .all(|(i, r)| rules[..i].iter().all(|p| p.id != r.id)),
            "duplicate rule id in catalog"
        );
        Self { rules }
    }

    pub fn iter(&self) -> std::slice::Iter<'static, RuleDefinition> {
        self.rules.iter()
    }

    pub fn lookup(&self, id: &str) -> Option<&'static RuleDefinition> {
        self.rules.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
