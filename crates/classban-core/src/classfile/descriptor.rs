//! Field and method descriptor walks.
//!
//! Descriptors are the erased-type grammar of the class file format:
//! `[` prefixes for array dimensions, one-letter primitives, and
//! `L<internal name>;` object types. Only object types name classes, so
//! only they contribute to a dependency set. Array dimensions are
//! unwrapped down to the element type.

use std::collections::BTreeSet;

use super::{ClassFileError, ClassName};

/// Collects the object type of a single field descriptor, e.g.
/// `[[Lcom/foo/Bar;` contributes `com/foo/Bar` and `[[J` contributes
/// nothing.
pub fn add_field_types(
    descriptor: &str,
    deps: &mut BTreeSet<ClassName>,
) -> Result<(), ClassFileError> {
    let mut cursor = DescriptorCursor::new(descriptor);
    cursor.read_type(false, deps)?;
    cursor.expect_end()
}

/// Collects all object types of a method descriptor: every parameter type
/// and the return type.
pub fn add_method_types(
    descriptor: &str,
    deps: &mut BTreeSet<ClassName>,
) -> Result<(), ClassFileError> {
    let mut cursor = DescriptorCursor::new(descriptor);
    cursor.expect(b'(')?;
    while cursor.peek()? != b')' {
        cursor.read_type(false, deps)?;
    }
    cursor.expect(b')')?;
    cursor.read_type(true, deps)?;
    cursor.expect_end()
}

/// Collects the object type of a constant-style descriptor, where `V` is
/// legal. Class literals in annotation values use this form: `void.class`
/// serializes as `V` and `int.class` as `I`.
pub fn add_constant_types(
    descriptor: &str,
    deps: &mut BTreeSet<ClassName>,
) -> Result<(), ClassFileError> {
    let mut cursor = DescriptorCursor::new(descriptor);
    cursor.read_type(true, deps)?;
    cursor.expect_end()
}

struct DescriptorCursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> DescriptorCursor<'a> {
    fn new(input: &'a str) -> Self {
        DescriptorCursor { input, pos: 0 }
    }

    fn error(&self) -> ClassFileError {
        ClassFileError::Descriptor {
            input: self.input.to_string(),
            at: self.pos,
        }
    }

    fn peek(&self) -> Result<u8, ClassFileError> {
        self.input
            .as_bytes()
            .get(self.pos)
            .copied()
            .ok_or_else(|| self.error())
    }

    fn expect(&mut self, byte: u8) -> Result<(), ClassFileError> {
        if self.peek()? != byte {
            return Err(self.error());
        }
        self.pos += 1;
        Ok(())
    }

    fn expect_end(&self) -> Result<(), ClassFileError> {
        if self.pos == self.input.len() {
            Ok(())
        } else {
            Err(self.error())
        }
    }

    /// Reads one type, unwrapping array dimensions, and records the object
    /// type if there is one.
    fn read_type(
        &mut self,
        allow_void: bool,
        deps: &mut BTreeSet<ClassName>,
    ) -> Result<(), ClassFileError> {
        while self.peek()? == b'[' {
            self.pos += 1;
        }
        match self.peek()? {
            b'L' => {
                self.pos += 1;
                let start = self.pos;
                while self.peek()? != b';' {
                    self.pos += 1;
                }
                if self.pos == start {
                    return Err(self.error());
                }
                deps.insert(ClassName::from_slashed(&self.input[start..self.pos]));
                self.pos += 1;
                Ok(())
            }
            b'B' | b'C' | b'D' | b'F' | b'I' | b'J' | b'S' | b'Z' => {
                self.pos += 1;
                Ok(())
            }
            b'V' if allow_void => {
                self.pos += 1;
                Ok(())
            }
            _ => Err(self.error()),
        }
    }
}
