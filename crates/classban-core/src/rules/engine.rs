//! The match engine: dependency set in, violations out.
//!
//! Pure decision function over (dependency set, artifact coordinate,
//! rule set). Nothing here mutates the rule set or remembers anything
//! between classes.
//!
//! Precedence: a name is a violation iff some ban rule matches it and no
//! applicable ignore rule exempts it. Ignore always wins over ban.

use std::collections::BTreeSet;

use crate::artifact::ArtifactCoordinate;
use crate::classfile::ClassName;
use crate::rules::pattern::CompiledPattern;
use crate::rules::{IgnoreRule, RuleSet};

/// Computes the banned, non-exempted subset of a class's dependency set
/// for the given artifact.
pub fn violations(
    deps: &BTreeSet<ClassName>,
    artifact: &ArtifactCoordinate,
    rules: &RuleSet,
) -> BTreeSet<ClassName> {
    deps.iter()
        .filter(|name| is_banned(name, rules) && !is_exempt(name, artifact, rules))
        .cloned()
        .collect()
}

/// Ban rules match dotted names; first match wins (any later rule is
/// irrelevant once one fires).
fn is_banned(name: &ClassName, rules: &RuleSet) -> bool {
    let dotted = name.dotted();
    rules.bans().iter().any(|ban| ban.matches(&dotted))
}

/// Ignore class patterns match slash names; the rule applies only when
/// every present coordinate matcher accepts the artifact.
fn is_exempt(name: &ClassName, artifact: &ArtifactCoordinate, rules: &RuleSet) -> bool {
    rules.ignores().iter().any(|rule| {
        applies_to(rule, artifact)
            && rule
                .class_patterns()
                .iter()
                .any(|pattern| pattern.matches(name.as_slashed()))
    })
}

fn applies_to(rule: &IgnoreRule, artifact: &ArtifactCoordinate) -> bool {
    let (group_id, artifact_id, classifier, kind) = rule.coordinate_matchers();
    matches_field(group_id, &artifact.group_id)
        && matches_field(artifact_id, &artifact.artifact_id)
        && matches_field(classifier, artifact.classifier.as_deref().unwrap_or(""))
        && matches_field(kind, &artifact.kind)
}

fn matches_field(matcher: Option<&CompiledPattern>, value: &str) -> bool {
    matcher.is_none_or(|pattern| pattern.matches(value))
}
