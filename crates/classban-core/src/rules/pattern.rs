//! Wildcard pattern compilation.
//!
//! A wildcard pattern uses `*` for any sequence (including empty) and `?`
//! for exactly one character; everything else is literal. Compilation
//! produces an anchored regex that also accepts the input with a literal
//! `.class` suffix appended, so patterns written against class names keep
//! matching archive entry names.
//!
//! The translation itself cannot fail: every literal run is escaped whole.
//! The regex engine's compiled-size guard is the only residual failure,
//! and it surfaces as a [`RuleError`](super::RuleError) at configuration
//! time, never at match time.

use regex::Regex;

use super::RuleError;

/// A compiled, reusable wildcard matcher.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    source: String,
    regex: Regex,
}

impl CompiledPattern {
    /// Compiles a wildcard string into an anchored matcher.
    pub fn compile(wildcard: &str) -> Result<Self, RuleError> {
        let mut expr = String::with_capacity(wildcard.len() + 16);
        expr.push('^');
        let mut literal = String::new();
        for ch in wildcard.chars() {
            match ch {
                '*' | '?' => {
                    if !literal.is_empty() {
                        expr.push_str(&regex::escape(&literal));
                        literal.clear();
                    }
                    expr.push_str(if ch == '*' { ".*" } else { "." });
                }
                other => literal.push(other),
            }
        }
        if !literal.is_empty() {
            expr.push_str(&regex::escape(&literal));
        }
        expr.push_str(r"(?:\.class)?$");

        let regex = Regex::new(&expr).map_err(|source| RuleError::Pattern {
            pattern: wildcard.to_string(),
            source,
        })?;
        Ok(CompiledPattern {
            source: wildcard.to_string(),
            regex,
        })
    }

    /// The wildcard string this matcher was compiled from.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn matches(&self, input: &str) -> bool {
        self.regex.is_match(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile(wildcard: &str) -> CompiledPattern {
        CompiledPattern::compile(wildcard).expect("pattern compiles")
    }

    #[test]
    fn literal_pattern_matches_itself_and_class_suffix() {
        let pattern = compile("com.foo.Bar");
        assert!(pattern.matches("com.foo.Bar"));
        assert!(pattern.matches("com.foo.Bar.class"));
        assert!(!pattern.matches("com.foo.Barn"));
        assert!(!pattern.matches("a.com.foo.Bar"));
    }

    #[test]
    fn star_matches_any_sequence_including_empty() {
        let pattern = compile("com.foo.*");
        assert!(pattern.matches("com.foo.Bar"));
        assert!(pattern.matches("com.foo.Bar.class"));
        assert!(pattern.matches("com.foo."));
        assert!(!pattern.matches("com.food.Bar"));
    }

    #[test]
    fn question_mark_matches_exactly_one_character() {
        let pattern = compile("com.v?.Api");
        assert!(pattern.matches("com.v1.Api"));
        assert!(pattern.matches("com.v2.Api"));
        assert!(!pattern.matches("com.v10.Api"));
        assert!(!pattern.matches("com.v.Api"));
    }

    #[test]
    fn dots_are_literal_not_regex_any() {
        let pattern = compile("com.foo.Bar");
        assert!(!pattern.matches("comxfooxBar"));
    }

    #[test]
    fn regex_metacharacters_are_escaped() {
        let pattern = compile("com.foo.Bar$Inner");
        assert!(pattern.matches("com.foo.Bar$Inner"));
        assert!(!pattern.matches("com.foo.BarInner"));

        let brackets = compile("weird[name](x)+");
        assert!(brackets.matches("weird[name](x)+"));
        assert!(!brackets.matches("weirdname(x)"));
    }

    #[test]
    fn pattern_works_on_slashed_names_too() {
        let pattern = compile("org/apache/commons/io/*");
        assert!(pattern.matches("org/apache/commons/io/IOUtils"));
        assert!(pattern.matches("org/apache/commons/io/IOUtils.class"));
        assert!(!pattern.matches("org/apache/commons/lang/Validate"));
    }

    #[test]
    fn empty_pattern_matches_empty_and_bare_suffix() {
        let pattern = compile("");
        assert!(pattern.matches(""));
        assert!(pattern.matches(".class"));
        assert!(!pattern.matches("x"));
    }

    #[test]
    fn source_is_preserved() {
        assert_eq!(compile("com.foo.*").source(), "com.foo.*");
    }
}
