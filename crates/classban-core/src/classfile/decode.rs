//! Decodes one class file payload into a `ClassStructure`.
//!
//! `classfile-parser` frames the container (constant pool, field, method
//! and attribute tables) and leaves attribute payloads opaque; this module
//! resolves pool indices and decodes the payloads that can name types:
//!
//! 1. `Signature` at class, field and method level
//! 2. `Exceptions` and `InnerClasses`
//! 3. the annotation family, including parameter and type annotations and
//!    `AnnotationDefault`
//! 4. `Code`, resolving type-bearing instruction operands via
//!    `bytecode::walk`
//!
//! Anything else (`SourceFile`, debug tables, `BootstrapMethods`, stack
//! maps) is stepped over. A malformed sub-structure fails the whole class:
//! recovery happens at the archive boundary, not here.

use classfile_parser::class_parser;
use classfile_parser::constant_info::ConstantInfo;

use super::bytecode::{self, InsnRef};
use super::model::{
    Annotation, AnnotationValue, BodyRef, ClassStructure, FieldStructure, InnerClassRecord,
    MethodBody, MethodStructure,
};
use super::ClassFileError;

/// Decodes a single `.class` payload.
pub fn decode_class(bytes: &[u8]) -> Result<ClassStructure, ClassFileError> {
    let (_, raw) = class_parser(bytes).map_err(|_| ClassFileError::Container)?;
    let pool = Pool::new(&raw.const_pool);

    let name = pool.class_name(raw.this_class)?.to_string();
    let super_name = match raw.super_class {
        // Only java/lang/Object has no superclass.
        0 => None,
        index => Some(pool.class_name(index)?.to_string()),
    };
    let interfaces = raw
        .interfaces
        .iter()
        .map(|&index| pool.class_name(index).map(str::to_string))
        .collect::<Result<Vec<_>, _>>()?;

    let mut class = ClassStructure {
        name,
        super_name,
        interfaces,
        ..Default::default()
    };

    for attr in &raw.attributes {
        match pool.utf8(attr.attribute_name_index)? {
            "Signature" => class.signature = Some(signature_attribute(&pool, &attr.info)?),
            "InnerClasses" => {
                class.inner_classes = inner_classes_attribute(&pool, &attr.info)?;
            }
            "RuntimeVisibleAnnotations" | "RuntimeInvisibleAnnotations" => {
                class
                    .annotations
                    .extend(annotations_attribute(&pool, &attr.info)?);
            }
            "RuntimeVisibleTypeAnnotations" | "RuntimeInvisibleTypeAnnotations" => {
                class
                    .annotations
                    .extend(type_annotations_attribute(&pool, &attr.info)?);
            }
            _ => {}
        }
    }

    for field in &raw.fields {
        let mut decoded = FieldStructure {
            name: pool.utf8(field.name_index)?.to_string(),
            descriptor: pool.utf8(field.descriptor_index)?.to_string(),
            signature: None,
            annotations: Vec::new(),
        };
        for attr in &field.attributes {
            match pool.utf8(attr.attribute_name_index)? {
                "Signature" => decoded.signature = Some(signature_attribute(&pool, &attr.info)?),
                "RuntimeVisibleAnnotations" | "RuntimeInvisibleAnnotations" => {
                    decoded
                        .annotations
                        .extend(annotations_attribute(&pool, &attr.info)?);
                }
                "RuntimeVisibleTypeAnnotations" | "RuntimeInvisibleTypeAnnotations" => {
                    decoded
                        .annotations
                        .extend(type_annotations_attribute(&pool, &attr.info)?);
                }
                _ => {}
            }
        }
        class.fields.push(decoded);
    }

    for method in &raw.methods {
        let mut decoded = MethodStructure {
            name: pool.utf8(method.name_index)?.to_string(),
            descriptor: pool.utf8(method.descriptor_index)?.to_string(),
            signature: None,
            exceptions: Vec::new(),
            annotations: Vec::new(),
            parameter_annotations: Vec::new(),
            annotation_default: None,
            body: None,
        };
        for attr in &method.attributes {
            match pool.utf8(attr.attribute_name_index)? {
                "Signature" => decoded.signature = Some(signature_attribute(&pool, &attr.info)?),
                "Exceptions" => decoded.exceptions = exceptions_attribute(&pool, &attr.info)?,
                "AnnotationDefault" => {
                    decoded.annotation_default =
                        Some(annotation_default_attribute(&pool, &attr.info)?);
                }
                "RuntimeVisibleAnnotations" | "RuntimeInvisibleAnnotations" => {
                    decoded
                        .annotations
                        .extend(annotations_attribute(&pool, &attr.info)?);
                }
                "RuntimeVisibleTypeAnnotations" | "RuntimeInvisibleTypeAnnotations" => {
                    decoded
                        .annotations
                        .extend(type_annotations_attribute(&pool, &attr.info)?);
                }
                "RuntimeVisibleParameterAnnotations" | "RuntimeInvisibleParameterAnnotations" => {
                    decoded
                        .parameter_annotations
                        .extend(parameter_annotations_attribute(&pool, &attr.info)?);
                }
                "Code" => decoded.body = Some(code_attribute(&pool, &attr.info)?),
                _ => {}
            }
        }
        class.methods.push(decoded);
    }

    Ok(class)
}

/// Constant pool accessor. Entries are 1-based in the format; the parsed
/// vector is 0-based with `Unusable` fillers after 8-byte constants.
struct Pool<'a> {
    entries: &'a [ConstantInfo],
}

impl<'a> Pool<'a> {
    fn new(entries: &'a [ConstantInfo]) -> Self {
        Pool { entries }
    }

    fn get(&self, index: u16) -> Result<&'a ConstantInfo, ClassFileError> {
        index
            .checked_sub(1)
            .and_then(|i| self.entries.get(i as usize))
            .ok_or(ClassFileError::PoolBounds { index })
    }

    fn utf8(&self, index: u16) -> Result<&'a str, ClassFileError> {
        match self.get(index)? {
            ConstantInfo::Utf8(value) => Ok(&value.utf8_string),
            _ => Err(ClassFileError::PoolKind {
                index,
                expected: "Utf8",
            }),
        }
    }

    fn class_name(&self, index: u16) -> Result<&'a str, ClassFileError> {
        match self.get(index)? {
            ConstantInfo::Class(class) => self.utf8(class.name_index),
            _ => Err(ClassFileError::PoolKind {
                index,
                expected: "Class",
            }),
        }
    }

    /// Descriptor string of a `NameAndType` entry.
    fn member_descriptor(&self, index: u16) -> Result<&'a str, ClassFileError> {
        match self.get(index)? {
            ConstantInfo::NameAndType(entry) => self.utf8(entry.descriptor_index),
            _ => Err(ClassFileError::PoolKind {
                index,
                expected: "NameAndType",
            }),
        }
    }
}

/// Byte cursor over one attribute payload.
struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
    attribute: &'static str,
}

impl<'a> Cursor<'a> {
    fn new(bytes: &'a [u8], attribute: &'static str) -> Self {
        Cursor {
            bytes,
            pos: 0,
            attribute,
        }
    }

    fn truncated(&self) -> ClassFileError {
        ClassFileError::Truncated {
            attribute: self.attribute,
        }
    }

    fn malformed(&self, detail: impl Into<String>) -> ClassFileError {
        ClassFileError::Attribute {
            attribute: self.attribute,
            detail: detail.into(),
        }
    }

    fn u1(&mut self) -> Result<u8, ClassFileError> {
        let byte = self.bytes.get(self.pos).copied().ok_or_else(|| self.truncated())?;
        self.pos += 1;
        Ok(byte)
    }

    fn u2(&mut self) -> Result<u16, ClassFileError> {
        let bytes = self.take(2)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    fn u4(&mut self) -> Result<u32, ClassFileError> {
        let bytes = self.take(4)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    fn take(&mut self, count: usize) -> Result<&'a [u8], ClassFileError> {
        let end = self.pos.checked_add(count).ok_or_else(|| self.truncated())?;
        let slice = self.bytes.get(self.pos..end).ok_or_else(|| self.truncated())?;
        self.pos = end;
        Ok(slice)
    }

    fn skip(&mut self, count: usize) -> Result<(), ClassFileError> {
        self.take(count).map(|_| ())
    }
}

fn signature_attribute(pool: &Pool, info: &[u8]) -> Result<String, ClassFileError> {
    let mut cur = Cursor::new(info, "Signature");
    Ok(pool.utf8(cur.u2()?)?.to_string())
}

fn exceptions_attribute(pool: &Pool, info: &[u8]) -> Result<Vec<String>, ClassFileError> {
    let mut cur = Cursor::new(info, "Exceptions");
    let count = cur.u2()?;
    let mut thrown = Vec::with_capacity(count as usize);
    for _ in 0..count {
        thrown.push(pool.class_name(cur.u2()?)?.to_string());
    }
    Ok(thrown)
}

fn inner_classes_attribute(
    pool: &Pool,
    info: &[u8],
) -> Result<Vec<InnerClassRecord>, ClassFileError> {
    let mut cur = Cursor::new(info, "InnerClasses");
    let count = cur.u2()?;
    let mut records = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let inner_index = cur.u2()?;
        let outer_index = cur.u2()?;
        cur.skip(4)?; // inner name and access flags
        records.push(InnerClassRecord {
            inner: pool.class_name(inner_index)?.to_string(),
            outer: match outer_index {
                0 => None,
                index => Some(pool.class_name(index)?.to_string()),
            },
        });
    }
    Ok(records)
}

fn annotations_attribute(pool: &Pool, info: &[u8]) -> Result<Vec<Annotation>, ClassFileError> {
    let mut cur = Cursor::new(info, "RuntimeAnnotations");
    let count = cur.u2()?;
    let mut annotations = Vec::with_capacity(count as usize);
    for _ in 0..count {
        annotations.push(annotation(pool, &mut cur)?);
    }
    Ok(annotations)
}

/// Parameter annotations, flattened across parameters.
fn parameter_annotations_attribute(
    pool: &Pool,
    info: &[u8],
) -> Result<Vec<Annotation>, ClassFileError> {
    let mut cur = Cursor::new(info, "RuntimeParameterAnnotations");
    let parameters = cur.u1()?;
    let mut annotations = Vec::new();
    for _ in 0..parameters {
        let count = cur.u2()?;
        for _ in 0..count {
            annotations.push(annotation(pool, &mut cur)?);
        }
    }
    Ok(annotations)
}

/// Type annotations reduce to plain annotations once the target and path
/// framing is stepped over; the target only says where the annotation
/// sits, never what it names.
fn type_annotations_attribute(
    pool: &Pool,
    info: &[u8],
) -> Result<Vec<Annotation>, ClassFileError> {
    let mut cur = Cursor::new(info, "RuntimeTypeAnnotations");
    let count = cur.u2()?;
    let mut annotations = Vec::with_capacity(count as usize);
    for _ in 0..count {
        skip_type_annotation_target(&mut cur)?;
        annotations.push(annotation(pool, &mut cur)?);
    }
    Ok(annotations)
}

fn skip_type_annotation_target(cur: &mut Cursor) -> Result<(), ClassFileError> {
    let target_type = cur.u1()?;
    match target_type {
        // type parameter and formal parameter targets: one index byte
        0x00 | 0x01 | 0x16 => cur.skip(1)?,
        // supertype, bound, throws, catch and offset targets: two bytes
        0x10..=0x12 | 0x17 | 0x42..=0x46 => cur.skip(2)?,
        // empty targets
        0x13..=0x15 => {}
        // local variable table targets
        0x40 | 0x41 => {
            let entries = cur.u2()?;
            cur.skip(entries as usize * 6)?;
        }
        // type argument targets: offset plus argument index
        0x47..=0x4b => cur.skip(3)?,
        other => {
            return Err(cur.malformed(format!("unknown annotation target 0x{other:02x}")));
        }
    }
    let path_length = cur.u1()?;
    cur.skip(path_length as usize * 2)
}

fn annotation_default_attribute(
    pool: &Pool,
    info: &[u8],
) -> Result<AnnotationValue, ClassFileError> {
    let mut cur = Cursor::new(info, "AnnotationDefault");
    element_value(pool, &mut cur)
}

fn annotation(pool: &Pool, cur: &mut Cursor) -> Result<Annotation, ClassFileError> {
    let type_descriptor = pool.utf8(cur.u2()?)?.to_string();
    let pairs = cur.u2()?;
    let mut elements = Vec::with_capacity(pairs as usize);
    for _ in 0..pairs {
        let name = pool.utf8(cur.u2()?)?.to_string();
        elements.push((name, element_value(pool, cur)?));
    }
    Ok(Annotation {
        type_descriptor,
        elements,
    })
}

fn element_value(pool: &Pool, cur: &mut Cursor) -> Result<AnnotationValue, ClassFileError> {
    match cur.u1()? {
        // Primitive and string constants: the payload never names a type.
        b'B' | b'C' | b'D' | b'F' | b'I' | b'J' | b'S' | b'Z' | b's' => {
            cur.u2()?;
            Ok(AnnotationValue::Const)
        }
        b'e' => Ok(AnnotationValue::Enum {
            type_descriptor: pool.utf8(cur.u2()?)?.to_string(),
            const_name: pool.utf8(cur.u2()?)?.to_string(),
        }),
        b'c' => Ok(AnnotationValue::ClassLiteral {
            descriptor: pool.utf8(cur.u2()?)?.to_string(),
        }),
        b'@' => Ok(AnnotationValue::Nested(annotation(pool, cur)?)),
        b'[' => {
            let count = cur.u2()?;
            let mut values = Vec::with_capacity(count as usize);
            for _ in 0..count {
                values.push(element_value(pool, cur)?);
            }
            Ok(AnnotationValue::Array(values))
        }
        other => Err(cur.malformed(format!("unknown element value tag 0x{other:02x}"))),
    }
}

fn code_attribute(pool: &Pool, info: &[u8]) -> Result<MethodBody, ClassFileError> {
    let mut cur = Cursor::new(info, "Code");
    cur.skip(4)?; // max_stack, max_locals
    let code_length = cur.u4()? as usize;
    let code = cur.take(code_length)?;

    // Exception handler entries are stepped over whole; catch types are
    // not collected.
    let handlers = cur.u2()?;
    cur.skip(handlers as usize * 8)?;

    let mut body = MethodBody::default();
    let attribute_count = cur.u2()?;
    for _ in 0..attribute_count {
        let name_index = cur.u2()?;
        let length = cur.u4()? as usize;
        let payload = cur.take(length)?;
        match pool.utf8(name_index)? {
            "RuntimeVisibleTypeAnnotations" | "RuntimeInvisibleTypeAnnotations" => {
                body.annotations
                    .extend(type_annotations_attribute(pool, payload)?);
            }
            // LineNumberTable, LocalVariableTable, StackMapTable, ...
            _ => {}
        }
    }

    bytecode::walk(code, |insn| {
        if let Some(body_ref) = resolve_insn(pool, insn)? {
            body.type_refs.push(body_ref);
        }
        Ok(())
    })?;

    Ok(body)
}

/// Maps a raw instruction operand to a `BodyRef`.
///
/// Field, method and dynamic references resolve to the member descriptor
/// only; the owner class is dropped. Loaded constants resolve only when
/// they are class constants: strings, numbers, method types and method
/// handles contribute nothing.
fn resolve_insn(pool: &Pool, insn: InsnRef) -> Result<Option<BodyRef>, ClassFileError> {
    match insn {
        InsnRef::Class(index) => Ok(Some(BodyRef::ClassRef(
            pool.class_name(index)?.to_string(),
        ))),
        InsnRef::Field(index) => match pool.get(index)? {
            ConstantInfo::FieldRef(field) => Ok(Some(BodyRef::FieldDescriptor(
                pool.member_descriptor(field.name_and_type_index)?.to_string(),
            ))),
            _ => Err(ClassFileError::PoolKind {
                index,
                expected: "Fieldref",
            }),
        },
        InsnRef::Method(index) => match pool.get(index)? {
            ConstantInfo::MethodRef(method) => Ok(Some(BodyRef::MethodDescriptor(
                pool.member_descriptor(method.name_and_type_index)?.to_string(),
            ))),
            ConstantInfo::InterfaceMethodRef(method) => Ok(Some(BodyRef::MethodDescriptor(
                pool.member_descriptor(method.name_and_type_index)?.to_string(),
            ))),
            _ => Err(ClassFileError::PoolKind {
                index,
                expected: "Methodref",
            }),
        },
        InsnRef::Dynamic(index) => match pool.get(index)? {
            ConstantInfo::InvokeDynamic(site) => Ok(Some(BodyRef::MethodDescriptor(
                pool.member_descriptor(site.name_and_type_index)?.to_string(),
            ))),
            _ => Err(ClassFileError::PoolKind {
                index,
                expected: "InvokeDynamic",
            }),
        },
        InsnRef::Constant(index) => match pool.get(index)? {
            ConstantInfo::Class(class) => Ok(Some(BodyRef::ClassRef(
                pool.utf8(class.name_index)?.to_string(),
            ))),
            _ => Ok(None),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use classfile_parser::constant_info::{
        ClassConstant, FieldRefConstant, NameAndTypeConstant, Utf8Constant,
    };

    fn utf8(value: &str) -> ConstantInfo {
        ConstantInfo::Utf8(Utf8Constant {
            utf8_string: value.to_string(),
            bytes: value.as_bytes().to_vec(),
        })
    }

    fn class(name_index: u16) -> ConstantInfo {
        ConstantInfo::Class(ClassConstant { name_index })
    }

    fn push_u2(bytes: &mut Vec<u8>, value: u16) {
        bytes.extend_from_slice(&value.to_be_bytes());
    }

    #[test]
    fn pool_is_one_based() {
        let entries = vec![utf8("com/a/B")];
        let pool = Pool::new(&entries);
        assert_eq!(pool.utf8(1).unwrap(), "com/a/B");
        assert!(matches!(
            pool.utf8(0),
            Err(ClassFileError::PoolBounds { index: 0 })
        ));
        assert!(matches!(
            pool.utf8(2),
            Err(ClassFileError::PoolBounds { index: 2 })
        ));
    }

    #[test]
    fn pool_kind_mismatch_errors() {
        let entries = vec![utf8("com/a/B"), class(1)];
        let pool = Pool::new(&entries);
        assert_eq!(pool.class_name(2).unwrap(), "com/a/B");
        assert!(matches!(
            pool.class_name(1),
            Err(ClassFileError::PoolKind { index: 1, .. })
        ));
    }

    #[test]
    fn decodes_annotation_with_nested_values() {
        // pool: 1 = anno descriptor, 2 = element name, 3 = enum type,
        // 4 = enum const, 5 = class literal, 6 = nested descriptor
        let entries = vec![
            utf8("Lcom/a/Audit;"),
            utf8("value"),
            utf8("Lcom/a/Color;"),
            utf8("RED"),
            utf8("Ljava/lang/Thread;"),
            utf8("Lcom/a/Tag;"),
        ];
        let pool = Pool::new(&entries);

        let mut info = Vec::new();
        push_u2(&mut info, 1); // one annotation
        push_u2(&mut info, 1); // type_index
        push_u2(&mut info, 1); // one pair
        push_u2(&mut info, 2); // element name
        info.push(b'['); // array of three values
        push_u2(&mut info, 3);
        info.push(b'e');
        push_u2(&mut info, 3);
        push_u2(&mut info, 4);
        info.push(b'c');
        push_u2(&mut info, 5);
        info.push(b'@'); // nested annotation, no pairs
        push_u2(&mut info, 6);
        push_u2(&mut info, 0);

        let decoded = annotations_attribute(&pool, &info).expect("valid annotation");
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0].type_descriptor, "Lcom/a/Audit;");
        assert_eq!(decoded[0].elements.len(), 1);
        assert_eq!(decoded[0].elements[0].0, "value");
        match &decoded[0].elements[0].1 {
            AnnotationValue::Array(values) => {
                assert_eq!(values.len(), 3);
                assert_eq!(
                    values[0],
                    AnnotationValue::Enum {
                        type_descriptor: "Lcom/a/Color;".into(),
                        const_name: "RED".into(),
                    }
                );
                assert_eq!(
                    values[1],
                    AnnotationValue::ClassLiteral {
                        descriptor: "Ljava/lang/Thread;".into(),
                    }
                );
                assert!(matches!(values[2], AnnotationValue::Nested(_)));
            }
            other => panic!("expected array value, got {other:?}"),
        }
    }

    #[test]
    fn unknown_element_tag_errors() {
        let entries = vec![utf8("Lcom/a/Audit;"), utf8("value")];
        let pool = Pool::new(&entries);

        let mut info = Vec::new();
        push_u2(&mut info, 1);
        push_u2(&mut info, 1);
        push_u2(&mut info, 1);
        push_u2(&mut info, 2);
        info.push(b'?');
        push_u2(&mut info, 0);

        assert!(matches!(
            annotations_attribute(&pool, &info),
            Err(ClassFileError::Attribute { .. })
        ));
    }

    #[test]
    fn type_annotation_target_is_stepped_over() {
        let entries = vec![utf8("Lcom/a/NotNull;")];
        let pool = Pool::new(&entries);

        let mut info = Vec::new();
        push_u2(&mut info, 1); // one type annotation
        info.push(0x00); // class type parameter target
        info.push(0x01); // parameter index
        info.push(0x01); // path length 1
        info.extend_from_slice(&[0x00, 0x00]); // path entry
        push_u2(&mut info, 1); // type_index
        push_u2(&mut info, 0); // no pairs

        let decoded = type_annotations_attribute(&pool, &info).expect("valid type annotation");
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0].type_descriptor, "Lcom/a/NotNull;");
    }

    #[test]
    fn unknown_annotation_target_errors() {
        let entries = vec![utf8("Lcom/a/NotNull;")];
        let pool = Pool::new(&entries);

        let mut info = Vec::new();
        push_u2(&mut info, 1);
        info.push(0x99); // not a target type
        push_u2(&mut info, 1);
        push_u2(&mut info, 0);

        assert!(type_annotations_attribute(&pool, &info).is_err());
    }

    #[test]
    fn code_attribute_resolves_refs_and_skips_tables() {
        // pool: 1 = "com/evil/Helper", 2 = Class(1), 3 = "LineNumberTable",
        // 4 = field name, 5 = field descriptor, 6 = NameAndType(4, 5),
        // 7 = FieldRef(2, 6)
        let entries = vec![
            utf8("com/evil/Helper"),
            class(1),
            utf8("LineNumberTable"),
            utf8("handle"),
            utf8("Lcom/evil/Handle;"),
            ConstantInfo::NameAndType(NameAndTypeConstant {
                name_index: 4,
                descriptor_index: 5,
            }),
            ConstantInfo::FieldRef(FieldRefConstant {
                class_index: 2,
                name_and_type_index: 6,
            }),
        ];
        let pool = Pool::new(&entries);

        // new #2; pop; getstatic #7; pop; return
        let code = [0xbb, 0x00, 0x02, 0x57, 0xb2, 0x00, 0x07, 0x57, 0xb1];

        let mut info = Vec::new();
        push_u2(&mut info, 1); // max_stack
        push_u2(&mut info, 1); // max_locals
        info.extend_from_slice(&(code.len() as u32).to_be_bytes());
        info.extend_from_slice(&code);
        push_u2(&mut info, 1); // one exception handler, stepped over
        info.extend_from_slice(&[0u8; 8]);
        push_u2(&mut info, 1); // one nested attribute
        push_u2(&mut info, 3); // LineNumberTable
        info.extend_from_slice(&2u32.to_be_bytes());
        push_u2(&mut info, 0); // empty table

        let body = code_attribute(&pool, &info).expect("valid code attribute");
        assert_eq!(
            body.type_refs,
            vec![
                BodyRef::ClassRef("com/evil/Helper".into()),
                BodyRef::FieldDescriptor("Lcom/evil/Handle;".into()),
            ]
        );
        assert!(body.annotations.is_empty());
    }

    #[test]
    fn loaded_non_class_constants_resolve_to_nothing() {
        let entries = vec![utf8("just a string")];
        let pool = Pool::new(&entries);
        // A Utf8 entry is not loadable in real code, but the filter only
        // cares that it is not a class constant.
        assert_eq!(resolve_insn(&pool, InsnRef::Constant(1)).unwrap(), None);
    }

    #[test]
    fn garbage_bytes_fail_as_container_error() {
        let result = decode_class(b"not a class file");
        assert!(matches!(result, Err(ClassFileError::Container)));
    }

    #[test]
    fn truncated_attribute_errors() {
        let entries = vec![utf8("Lcom/a/Audit;")];
        let pool = Pool::new(&entries);
        // Claims one annotation, then ends.
        let info = [0x00, 0x01];
        assert!(matches!(
            annotations_attribute(&pool, &info),
            Err(ClassFileError::Truncated { .. })
        ));
    }
}
