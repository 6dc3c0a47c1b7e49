//! Binary class file decoding.
//!
//! `decode` turns one `.class` payload into a plain structural model
//! (`model::ClassStructure`); `descriptor`, `signature` and `bytecode` are the
//! grammar walks over the pieces the container format leaves opaque. Nothing
//! in here evaluates rules or touches archives.

pub mod bytecode;
pub mod decode;
pub mod descriptor;
pub mod model;
pub mod signature;

use std::fmt;

use thiserror::Error;

/// A JVM class name in internal (slash-separated) form, e.g. `java/util/List`.
///
/// Primitive types and `void` never become a `ClassName`; the grammar walks
/// drop them before this type is constructed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClassName(String);

impl ClassName {
    pub fn from_slashed(name: impl Into<String>) -> Self {
        ClassName(name.into())
    }

    /// Internal form, as stored in the constant pool.
    pub fn as_slashed(&self) -> &str {
        &self.0
    }

    /// Source form, as written in ban rules and reports.
    pub fn dotted(&self) -> String {
        self.0.replace('/', ".")
    }
}

impl fmt::Display for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dotted())
    }
}

/// Failure while decoding a single class file.
///
/// One of these fails the whole class: extraction is all-or-nothing per
/// entry, and the archive scanner decides whether to recover.
#[derive(Debug, Error)]
pub enum ClassFileError {
    #[error("not a parseable class file")]
    Container,

    #[error("constant pool index {index} out of range")]
    PoolBounds { index: u16 },

    #[error("constant pool entry {index} is not a {expected}")]
    PoolKind { index: u16, expected: &'static str },

    #[error("truncated {attribute} attribute")]
    Truncated { attribute: &'static str },

    #[error("malformed {attribute} attribute: {detail}")]
    Attribute {
        attribute: &'static str,
        detail: String,
    },

    #[error("malformed descriptor {input:?} at offset {at}")]
    Descriptor { input: String, at: usize },

    #[error("malformed signature {input:?} at offset {at}")]
    Signature { input: String, at: usize },

    #[error("malformed method body at pc {pc}: {detail}")]
    Bytecode { pc: usize, detail: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_name_converts_between_forms() {
        let name = ClassName::from_slashed("java/util/List");
        assert_eq!(name.as_slashed(), "java/util/List");
        assert_eq!(name.dotted(), "java.util.List");
        assert_eq!(name.to_string(), "java.util.List");
    }

    #[test]
    fn class_name_orders_lexicographically() {
        let a = ClassName::from_slashed("com/a/B");
        let b = ClassName::from_slashed("com/a/C");
        assert!(a < b);
    }

    #[test]
    fn nested_class_names_keep_dollar_separator() {
        let name = ClassName::from_slashed("com/foo/Outer$Inner");
        assert_eq!(name.dotted(), "com.foo.Outer$Inner");
    }
}
