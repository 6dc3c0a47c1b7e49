//! Structural representation of one decoded class file.
//!
//! This is the output of the decoding stage only: constant pool indices are
//! already resolved to strings, attribute payloads are already framed, and
//! instruction operands are reduced to the type-bearing references.
//!
//! No policy decisions are made here:
//! - no dependency set is built
//! - no rules are evaluated
//! - nothing is deduplicated

/// A decoded class file, pool-free and ready for traversal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassStructure {
    /// This class's own internal name, e.g. `com/foo/Service`.
    pub name: String,

    /// Superclass internal name. `None` only for `java/lang/Object`.
    pub super_name: Option<String>,

    /// Directly implemented interfaces, internal names.
    pub interfaces: Vec<String>,

    /// Generic class signature, verbatim from the `Signature` attribute.
    pub signature: Option<String>,

    /// Class-level annotations: visible, invisible and type annotations,
    /// in attribute order.
    pub annotations: Vec<Annotation>,

    /// `InnerClasses` attribute entries.
    pub inner_classes: Vec<InnerClassRecord>,

    pub fields: Vec<FieldStructure>,
    pub methods: Vec<MethodStructure>,
}

/// One `InnerClasses` table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InnerClassRecord {
    /// Internal name of the nested class itself.
    pub inner: String,

    /// Internal name of the enclosing class. `None` for local and
    /// anonymous classes.
    pub outer: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldStructure {
    pub name: String,
    pub descriptor: String,
    pub signature: Option<String>,
    pub annotations: Vec<Annotation>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodStructure {
    pub name: String,
    pub descriptor: String,
    pub signature: Option<String>,

    /// Thrown exception classes from the `Exceptions` attribute,
    /// internal names.
    pub exceptions: Vec<String>,

    /// Method-level annotations: visible, invisible and type annotations.
    pub annotations: Vec<Annotation>,

    /// Parameter annotations, flattened across all parameters.
    pub parameter_annotations: Vec<Annotation>,

    /// Default value of an annotation interface member, if any.
    pub annotation_default: Option<AnnotationValue>,

    /// Decoded `Code` attribute. `None` for abstract and native methods.
    pub body: Option<MethodBody>,
}

/// The type-relevant content of a `Code` attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MethodBody {
    /// Type-bearing instruction operands in instruction order.
    pub type_refs: Vec<BodyRef>,

    /// Type annotations nested inside the `Code` attribute (instruction,
    /// local variable and try/catch annotations).
    pub annotations: Vec<Annotation>,
}

/// A type reference made by one instruction.
///
/// Field and method references carry only the member's descriptor. The
/// owner class of the referenced member is not represented here, so plain
/// field reads and method calls never contribute the owning type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyRef {
    /// Operand of `new`, `anewarray`, `checkcast`, `instanceof`,
    /// `multianewarray`, or a loaded class literal. Either an internal
    /// class name or an array descriptor.
    ClassRef(String),

    /// Value descriptor of a `getfield`/`putfield`/`getstatic`/`putstatic`
    /// target.
    FieldDescriptor(String),

    /// Call-site descriptor of an `invoke*` or `invokedynamic` target.
    MethodDescriptor(String),
}

/// One annotation with its element values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    /// Annotation interface as a field descriptor, e.g. `Lcom/foo/Audit;`.
    pub type_descriptor: String,

    /// Named element values, in declaration order.
    pub elements: Vec<(String, AnnotationValue)>,
}

/// A recursive annotation element value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnnotationValue {
    /// Primitive or string constant. The payload is not resolved; nothing
    /// in it names a type.
    Const,

    /// Enum constant: the enum type's field descriptor plus the constant
    /// name.
    Enum {
        type_descriptor: String,
        const_name: String,
    },

    /// Class literal as a descriptor. May be a primitive, `V`, an array
    /// descriptor or an object descriptor.
    ClassLiteral { descriptor: String },

    Nested(Annotation),

    Array(Vec<AnnotationValue>),
}
