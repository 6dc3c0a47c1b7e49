//! Ban and ignore rules.
//!
//! `pattern` compiles wildcard strings to anchored matchers; this module
//! builds the immutable [`RuleSet`] from configuration; `engine` applies
//! it to a class's dependency set.

pub mod engine;
pub mod pattern;

use thiserror::Error;

use crate::config::AuditConfig;
use pattern::CompiledPattern;

/// One banned class name, literal or trailing-`*` prefix wildcard.
///
/// Ban rules deliberately use only the prefix-wildcard case: full wildcard
/// semantics are reserved for ignore-class patterns and coordinate
/// matchers.
#[derive(Debug, Clone)]
pub struct BanRule {
    text: String,
}

impl BanRule {
    /// Tests a dotted class name against this rule.
    pub fn matches(&self, dotted: &str) -> bool {
        match self.text.strip_suffix('*') {
            Some(prefix) => dotted.starts_with(prefix),
            None => dotted == self.text,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// One compiled ignore entry: coordinate matchers plus exempted class
/// patterns.
///
/// An absent coordinate matcher accepts every value, so an entry with no
/// coordinate fields at all is a global exception.
#[derive(Debug, Clone)]
pub struct IgnoreRule {
    group_id: Option<CompiledPattern>,
    artifact_id: Option<CompiledPattern>,
    classifier: Option<CompiledPattern>,
    kind: Option<CompiledPattern>,

    /// Compiled over slash-separated names.
    classes: Vec<CompiledPattern>,
}

impl IgnoreRule {
    pub(crate) fn coordinate_matchers(
        &self,
    ) -> (
        Option<&CompiledPattern>,
        Option<&CompiledPattern>,
        Option<&CompiledPattern>,
        Option<&CompiledPattern>,
    ) {
        (
            self.group_id.as_ref(),
            self.artifact_id.as_ref(),
            self.classifier.as_ref(),
            self.kind.as_ref(),
        )
    }

    pub(crate) fn class_patterns(&self) -> &[CompiledPattern] {
        &self.classes
    }
}

/// All compiled rules of one run. Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    bans: Vec<BanRule>,
    ignores: Vec<IgnoreRule>,
}

impl RuleSet {
    /// Compiles a rule set from configuration.
    ///
    /// Ban rules are kept verbatim in declaration order. Ignore class
    /// patterns are written in dotted form and converted to slash form
    /// before compilation, because matching happens on internal names.
    pub fn compile(config: &AuditConfig) -> Result<Self, RuleError> {
        let bans = config
            .banned
            .iter()
            .map(|text| BanRule { text: text.clone() })
            .collect();

        let mut ignores = Vec::with_capacity(config.ignore.len());
        for entry in &config.ignore {
            ignores.push(IgnoreRule {
                group_id: compile_opt(entry.group_id.as_deref())?,
                artifact_id: compile_opt(entry.artifact_id.as_deref())?,
                classifier: compile_opt(entry.classifier.as_deref())?,
                kind: compile_opt(entry.kind.as_deref())?,
                classes: entry
                    .classes
                    .iter()
                    .map(|pattern| CompiledPattern::compile(&pattern.replace('.', "/")))
                    .collect::<Result<_, _>>()?,
            });
        }

        Ok(RuleSet { bans, ignores })
    }

    pub fn bans(&self) -> &[BanRule] {
        &self.bans
    }

    pub fn ignores(&self) -> &[IgnoreRule] {
        &self.ignores
    }

    pub fn ban_count(&self) -> usize {
        self.bans.len()
    }

    pub fn ignore_count(&self) -> usize {
        self.ignores.len()
    }
}

fn compile_opt(wildcard: Option<&str>) -> Result<Option<CompiledPattern>, RuleError> {
    wildcard.map(CompiledPattern::compile).transpose()
}

#[derive(Debug, Error)]
pub enum RuleError {
    #[error("cannot compile pattern {pattern:?}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IgnoreEntry;

    #[test]
    fn ban_rule_exact_and_prefix_semantics() {
        let exact = BanRule {
            text: "com.sun.misc.Unsafe".into(),
        };
        assert!(exact.matches("com.sun.misc.Unsafe"));
        assert!(!exact.matches("com.sun.misc.UnsafeHolder"));

        let prefix = BanRule {
            text: "com.evil.*".into(),
        };
        assert!(prefix.matches("com.evil.Helper"));
        assert!(prefix.matches("com.evil.deep.Nested"));
        assert!(!prefix.matches("com.evilish.Helper"));
    }

    #[test]
    fn a_bare_star_bans_everything() {
        let rule = BanRule { text: "*".into() };
        assert!(rule.matches("anything.at.All"));
    }

    #[test]
    fn compile_preserves_ban_order() {
        let config = AuditConfig {
            banned: vec!["b.Second".into(), "a.First".into()],
            ..Default::default()
        };
        let rules = RuleSet::compile(&config).unwrap();
        assert_eq!(rules.ban_count(), 2);
        assert_eq!(rules.bans()[0].text(), "b.Second");
        assert_eq!(rules.bans()[1].text(), "a.First");
    }

    #[test]
    fn ignore_class_patterns_compile_over_slash_form() {
        let config = AuditConfig {
            ignore: vec![IgnoreEntry {
                classes: vec!["org.apache.commons.io.*".into()],
                ..Default::default()
            }],
            ..Default::default()
        };
        let rules = RuleSet::compile(&config).unwrap();
        let patterns = rules.ignores()[0].class_patterns();
        assert!(patterns[0].matches("org/apache/commons/io/IOUtils"));
        assert!(!patterns[0].matches("org.apache.commons.io.IOUtils"));
    }

    #[test]
    fn empty_config_compiles_to_empty_rule_set() {
        let rules = RuleSet::compile(&AuditConfig::default()).unwrap();
        assert_eq!(rules.ban_count(), 0);
        assert_eq!(rules.ignore_count(), 0);
    }
}
