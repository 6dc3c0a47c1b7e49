//! Generic signature walks.
//!
//! The `Signature` attribute carries the unerased type grammar: formal type
//! parameters with bounds, parameterized class types with `.`-separated
//! inner segments, type variables and wildcards. One entry point accepts
//! all three attachment forms (class, method and field signatures), the
//! same way one reader serves all three in the bytecode libraries this
//! format grew up with.
//!
//! Collection rules:
//! - every class type contributes its internal name
//! - inner segments contribute the qualified `Outer$Inner` name
//! - type variables contribute nothing; their bounds were already
//!   collected at the declaring formal
//! - primitives and wildcards contribute nothing by themselves

use std::collections::BTreeSet;

use super::{ClassFileError, ClassName};

/// Walks one signature, collecting every referenced class type.
///
/// Accepts class signatures (`<T:...>LSuper;LIface;`), method signatures
/// (`<T:...>(params)ret^thrown`) and field type signatures
/// (`Ljava/util/List<Ljava/lang/String;>;`).
pub fn add_signature_types(
    signature: &str,
    deps: &mut BTreeSet<ClassName>,
) -> Result<(), ClassFileError> {
    let mut cursor = SignatureCursor::new(signature);

    if cursor.peek()? == b'<' {
        cursor.formal_parameters(deps)?;
    }

    if !cursor.at_end() && cursor.peek()? == b'(' {
        cursor.method_signature(deps)?;
    } else {
        // Class signature: superclass followed by zero or more interfaces.
        // A field type signature is the degenerate single-type case.
        cursor.reference_type(deps)?;
        while !cursor.at_end() {
            cursor.reference_type(deps)?;
        }
    }

    cursor.expect_end()
}

struct SignatureCursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> SignatureCursor<'a> {
    fn new(input: &'a str) -> Self {
        SignatureCursor { input, pos: 0 }
    }

    fn error(&self) -> ClassFileError {
        ClassFileError::Signature {
            input: self.input.to_string(),
            at: self.pos,
        }
    }

    fn at_end(&self) -> bool {
        self.pos == self.input.len()
    }

    fn peek(&self) -> Result<u8, ClassFileError> {
        self.input
            .as_bytes()
            .get(self.pos)
            .copied()
            .ok_or_else(|| self.error())
    }

    fn bump(&mut self) -> Result<u8, ClassFileError> {
        let byte = self.peek()?;
        self.pos += 1;
        Ok(byte)
    }

    fn expect(&mut self, byte: u8) -> Result<(), ClassFileError> {
        if self.bump()? != byte {
            self.pos -= 1;
            return Err(self.error());
        }
        Ok(())
    }

    fn expect_end(&self) -> Result<(), ClassFileError> {
        if self.at_end() { Ok(()) } else { Err(self.error()) }
    }

    /// `<` FormalTypeParameter+ `>` where each formal is
    /// `Identifier : ClassBound? ( : InterfaceBound )*`.
    fn formal_parameters(
        &mut self,
        deps: &mut BTreeSet<ClassName>,
    ) -> Result<(), ClassFileError> {
        self.expect(b'<')?;
        loop {
            let start = self.pos;
            while self.peek()? != b':' {
                self.pos += 1;
            }
            if self.pos == start {
                return Err(self.error());
            }
            self.expect(b':')?;
            // The class bound may be empty: `T::LIface;` declares only
            // interface bounds.
            if self.peek()? != b':' && self.peek()? != b'>' {
                self.reference_type(deps)?;
            }
            while self.peek()? == b':' {
                self.pos += 1;
                self.reference_type(deps)?;
            }
            if self.peek()? == b'>' {
                self.pos += 1;
                return Ok(());
            }
        }
    }

    /// `(` JavaTypeSignature* `)` Result ThrowsSignature*
    fn method_signature(
        &mut self,
        deps: &mut BTreeSet<ClassName>,
    ) -> Result<(), ClassFileError> {
        self.expect(b'(')?;
        while self.peek()? != b')' {
            self.java_type(deps)?;
        }
        self.expect(b')')?;
        if self.peek()? == b'V' {
            self.pos += 1;
        } else {
            self.java_type(deps)?;
        }
        while !self.at_end() && self.peek()? == b'^' {
            self.pos += 1;
            match self.peek()? {
                b'T' => self.type_variable()?,
                b'L' => self.class_type(deps)?,
                _ => return Err(self.error()),
            }
        }
        Ok(())
    }

    /// Any type position: reference types plus primitives.
    fn java_type(&mut self, deps: &mut BTreeSet<ClassName>) -> Result<(), ClassFileError> {
        match self.peek()? {
            b'B' | b'C' | b'D' | b'F' | b'I' | b'J' | b'S' | b'Z' => {
                self.pos += 1;
                Ok(())
            }
            _ => self.reference_type(deps),
        }
    }

    /// ClassTypeSignature, TypeVariableSignature or ArrayTypeSignature.
    fn reference_type(
        &mut self,
        deps: &mut BTreeSet<ClassName>,
    ) -> Result<(), ClassFileError> {
        match self.peek()? {
            b'L' => self.class_type(deps),
            b'T' => self.type_variable(),
            b'[' => {
                self.pos += 1;
                self.java_type(deps)
            }
            _ => Err(self.error()),
        }
    }

    /// `T` Identifier `;` contributes nothing.
    fn type_variable(&mut self) -> Result<(), ClassFileError> {
        self.expect(b'T')?;
        let start = self.pos;
        while self.peek()? != b';' {
            self.pos += 1;
        }
        if self.pos == start {
            return Err(self.error());
        }
        self.pos += 1;
        Ok(())
    }

    /// `L` Name TypeArguments? ( `.` Name TypeArguments? )* `;`
    ///
    /// Each `.` segment contributes the qualified name built so far, so
    /// `Lcom/a/Outer<TT;>.Inner;` contributes both `com/a/Outer` and
    /// `com/a/Outer$Inner`.
    fn class_type(&mut self, deps: &mut BTreeSet<ClassName>) -> Result<(), ClassFileError> {
        self.expect(b'L')?;
        let mut qualified = self.segment_name(true)?;
        deps.insert(ClassName::from_slashed(qualified.clone()));
        if self.peek()? == b'<' {
            self.type_arguments(deps)?;
        }
        while self.peek()? == b'.' {
            self.pos += 1;
            let segment = self.segment_name(false)?;
            qualified.push('$');
            qualified.push_str(&segment);
            deps.insert(ClassName::from_slashed(qualified.clone()));
            if self.peek()? == b'<' {
                self.type_arguments(deps)?;
            }
        }
        self.expect(b';')
    }

    fn segment_name(&mut self, allow_slash: bool) -> Result<String, ClassFileError> {
        let start = self.pos;
        loop {
            match self.peek()? {
                b'<' | b'.' | b';' => break,
                b'/' if !allow_slash => return Err(self.error()),
                _ => self.pos += 1,
            }
        }
        if self.pos == start {
            return Err(self.error());
        }
        Ok(self.input[start..self.pos].to_string())
    }

    /// `<` TypeArgument+ `>` where an argument is `*`, or an optional
    /// variance marker followed by a reference type.
    fn type_arguments(
        &mut self,
        deps: &mut BTreeSet<ClassName>,
    ) -> Result<(), ClassFileError> {
        self.expect(b'<')?;
        if self.peek()? == b'>' {
            return Err(self.error());
        }
        while self.peek()? != b'>' {
            match self.peek()? {
                b'*' => self.pos += 1,
                b'+' | b'-' => {
                    self.pos += 1;
                    self.reference_type(deps)?;
                }
                _ => self.reference_type(deps)?,
            }
        }
        self.pos += 1;
        Ok(())
    }
}
