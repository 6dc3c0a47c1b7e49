//! Dependency extraction: one decoded class to its set of referenced types.
//!
//! `collect` is a single pure traversal over a `ClassStructure`. Every
//! place the class file format can name an external object type feeds the
//! same `BTreeSet`, so the result is deduplicated and lexicographically
//! ordered by construction.
//!
//! What contributes:
//! - the superclass and every declared interface (never the class's own
//!   name at header level)
//! - the outer class of each inner-class record
//! - field and method descriptor object types, arrays unwrapped
//! - every class type in a generic signature, at any position
//! - declared thrown exceptions
//! - annotation types and their values, recursively, at every attachment
//!   point: enum values add the enum's type, class-literal values add the
//!   literal's type, nested and array values recurse
//! - instruction operands: type instructions and loaded class literals add
//!   the referenced type; field instructions add the field's value type;
//!   invoke instructions add the argument and return types
//!
//! Field and method instructions never add the owning class of the member
//! they touch, only the member's descriptor types. A class whose only use
//! of some type is `Owner.CONSTANT` or `Owner.helper()` will therefore not
//! report `Owner`.

use std::collections::BTreeSet;

use crate::classfile::model::{Annotation, AnnotationValue, BodyRef, ClassStructure};
use crate::classfile::{descriptor, signature, ClassFileError, ClassName};

/// Collects every external type the class references.
///
/// Fails as a unit: a malformed descriptor or signature anywhere in the
/// structure invalidates the whole extraction, and the caller decides
/// whether to recover.
pub fn collect(class: &ClassStructure) -> Result<BTreeSet<ClassName>, ClassFileError> {
    let mut deps = BTreeSet::new();

    if let Some(super_name) = &class.super_name {
        deps.insert(ClassName::from_slashed(super_name));
    }
    for interface in &class.interfaces {
        deps.insert(ClassName::from_slashed(interface));
    }
    for record in &class.inner_classes {
        if let Some(outer) = &record.outer {
            deps.insert(ClassName::from_slashed(outer));
        }
    }
    if let Some(sig) = &class.signature {
        signature::add_signature_types(sig, &mut deps)?;
    }
    for annotation in &class.annotations {
        add_annotation(annotation, &mut deps)?;
    }

    for field in &class.fields {
        descriptor::add_field_types(&field.descriptor, &mut deps)?;
        if let Some(sig) = &field.signature {
            signature::add_signature_types(sig, &mut deps)?;
        }
        for annotation in &field.annotations {
            add_annotation(annotation, &mut deps)?;
        }
    }

    for method in &class.methods {
        descriptor::add_method_types(&method.descriptor, &mut deps)?;
        if let Some(sig) = &method.signature {
            signature::add_signature_types(sig, &mut deps)?;
        }
        for exception in &method.exceptions {
            deps.insert(ClassName::from_slashed(exception));
        }
        for annotation in method
            .annotations
            .iter()
            .chain(&method.parameter_annotations)
        {
            add_annotation(annotation, &mut deps)?;
        }
        if let Some(default) = &method.annotation_default {
            add_value(default, &mut deps)?;
        }
        if let Some(body) = &method.body {
            for body_ref in &body.type_refs {
                add_body_ref(body_ref, &mut deps)?;
            }
            for annotation in &body.annotations {
                add_annotation(annotation, &mut deps)?;
            }
        }
    }

    Ok(deps)
}

/// One recursive scanner for every annotation attachment point.
fn add_annotation(
    annotation: &Annotation,
    deps: &mut BTreeSet<ClassName>,
) -> Result<(), ClassFileError> {
    descriptor::add_field_types(&annotation.type_descriptor, deps)?;
    for (_, value) in &annotation.elements {
        add_value(value, deps)?;
    }
    Ok(())
}

fn add_value(value: &AnnotationValue, deps: &mut BTreeSet<ClassName>) -> Result<(), ClassFileError> {
    match value {
        // String and primitive constants never name a type.
        AnnotationValue::Const => Ok(()),
        AnnotationValue::Enum {
            type_descriptor, ..
        } => descriptor::add_field_types(type_descriptor, deps),
        AnnotationValue::ClassLiteral { descriptor } => {
            descriptor::add_constant_types(descriptor, deps)
        }
        AnnotationValue::Nested(annotation) => add_annotation(annotation, deps),
        AnnotationValue::Array(values) => {
            for value in values {
                add_value(value, deps)?;
            }
            Ok(())
        }
    }
}

fn add_body_ref(body_ref: &BodyRef, deps: &mut BTreeSet<ClassName>) -> Result<(), ClassFileError> {
    match body_ref {
        // Class operands are internal names, except array classes, which
        // appear in descriptor form and unwrap to their element type.
        BodyRef::ClassRef(name) => {
            if name.starts_with('[') {
                descriptor::add_field_types(name, deps)
            } else {
                deps.insert(ClassName::from_slashed(name));
                Ok(())
            }
        }
        BodyRef::FieldDescriptor(descriptor) => descriptor::add_field_types(descriptor, deps),
        BodyRef::MethodDescriptor(descriptor) => descriptor::add_method_types(descriptor, deps),
    }
}
