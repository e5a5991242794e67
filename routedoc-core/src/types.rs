//! Structural type descriptors.
//!
//! A [`TypeDescriptor`] is the build-time stand-in for runtime reflection: a
//! closed union over the shapes the schema builder understands, tagged with
//! the `TypeId` of the Rust type it describes. Types opt in through the
//! [`Describe`] trait, implemented here for std and well-known third-party
//! types and generated for user structs by `#[derive(Describe)]`.
//!
//! Nested types are referenced through [`TypeRef`], a plain function pointer,
//! so describing a self-referential struct never recurses eagerly.

use std::any::TypeId;
use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, LinkedList, VecDeque};
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use serde_json::Value;

/// Types that can describe their own structure.
pub trait Describe: 'static {
    fn describe() -> TypeDescriptor;
}

/// Lazy handle to another type's descriptor.
#[derive(Clone, Copy)]
pub struct TypeRef(fn() -> TypeDescriptor);

impl TypeRef {
    /// Reference the descriptor of `T`.
    pub fn of<T: Describe + ?Sized>() -> Self {
        TypeRef(T::describe)
    }

    /// Wrap a hand-written descriptor function.
    pub fn from_fn(describe: fn() -> TypeDescriptor) -> Self {
        TypeRef(describe)
    }

    /// Produce the descriptor. Cheap: struct fields stay lazy.
    pub fn resolve(&self) -> TypeDescriptor {
        (self.0)()
    }
}

impl fmt::Debug for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypeRef")
            .field(&self.resolve().type_name())
            .finish()
    }
}

impl PartialEq for TypeRef {
    fn eq(&self, other: &Self) -> bool {
        self.resolve().id() == other.resolve().id()
    }
}

/// Description of a single Rust type.
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
    id: TypeId,
    type_name: &'static str,
    kind: TypeKind,
}

impl TypeDescriptor {
    /// Describe `T` as having the given structural kind.
    pub fn of<T: ?Sized + 'static>(kind: TypeKind) -> Self {
        Self {
            id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            kind,
        }
    }

    /// Identity used by the schema cache.
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Fully qualified type name, as reported by `std::any::type_name`.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn kind(&self) -> &TypeKind {
        &self.kind
    }

    /// The wrapped type when this is an optional layer.
    pub fn optional_inner(&self) -> Option<TypeRef> {
        match self.kind {
            TypeKind::Optional(inner) => Some(inner),
            _ => None,
        }
    }

    /// True for a single unsigned byte (`u8`).
    pub fn is_byte(&self) -> bool {
        matches!(
            self.kind,
            TypeKind::Integer(Integer {
                bits: 8,
                signed: false
            })
        )
    }
}

/// Width and signedness of an integer type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Integer {
    pub bits: u8,
    pub signed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Float {
    F32,
    F64,
}

/// The structural kinds a type can take.
#[derive(Debug, Clone)]
pub enum TypeKind {
    Bool,
    Integer(Integer),
    Float(Float),
    String,
    /// A value that may be absent (`Option<T>`).
    Optional(TypeRef),
    /// Ordered or unordered collection of `T`.
    Sequence(TypeRef),
    Map {
        key: TypeRef,
        value: TypeRef,
    },
    /// Arbitrary JSON value.
    Any,
    Timestamp,
    Uuid,
    Decimal,
    Struct(StructDescriptor),
    /// A shape with no schema mapping; building it fails with this label.
    Unsupported(&'static str),
}

impl TypeKind {
    /// Short label used in diagnostics.
    pub fn label(&self) -> &'static str {
        match self {
            TypeKind::Bool => "bool",
            TypeKind::Integer(_) => "integer",
            TypeKind::Float(_) => "float",
            TypeKind::String => "string",
            TypeKind::Optional(_) => "optional",
            TypeKind::Sequence(_) => "sequence",
            TypeKind::Map { .. } => "map",
            TypeKind::Any => "any",
            TypeKind::Timestamp => "timestamp",
            TypeKind::Uuid => "uuid",
            TypeKind::Decimal => "decimal",
            TypeKind::Struct(_) => "struct",
            TypeKind::Unsupported(kind) => kind,
        }
    }

    /// Kinds that can naturally represent absence, and are therefore not
    /// required unless explicitly marked.
    pub fn is_absent_representable(&self) -> bool {
        matches!(
            self,
            TypeKind::Optional(_) | TypeKind::Sequence(_) | TypeKind::Map { .. } | TypeKind::Any
        )
    }
}

/// Struct metadata, produced once per type.
#[derive(Debug, Clone)]
pub struct StructDescriptor {
    name: Cow<'static, str>,
    module_path: &'static str,
    inline: bool,
    fields: Vec<FieldSpec>,
}

impl StructDescriptor {
    pub fn new(name: impl Into<Cow<'static, str>>, module_path: &'static str) -> Self {
        Self {
            name: name.into(),
            module_path,
            inline: false,
            fields: Vec::new(),
        }
    }

    /// Mark the struct as having no stable name: it is rendered inline and
    /// never becomes a shared component.
    pub fn inline(mut self) -> Self {
        self.inline = true;
        self
    }

    /// Append a field. Fields keep declaration order.
    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn module_path(&self) -> &'static str {
        self.module_path
    }

    pub fn is_inline(&self) -> bool {
        self.inline
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }
}

/// Serialization metadata of one struct field.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub ident: &'static str,
    pub serialized_name: Option<Cow<'static, str>>,
    pub skip: bool,
    pub exported: bool,
    pub embedded: bool,
    pub omit_empty: bool,
    pub required_marker: bool,
    pub description: Option<Cow<'static, str>>,
    pub example: Option<Value>,
    pub ty: TypeRef,
}

impl FieldSpec {
    pub fn new(ident: &'static str, ty: TypeRef) -> Self {
        Self {
            ident,
            serialized_name: None,
            skip: false,
            exported: true,
            embedded: false,
            omit_empty: false,
            required_marker: false,
            description: None,
            example: None,
            ty,
        }
    }

    pub fn rename(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.serialized_name = Some(name.into());
        self
    }

    /// Exclude the field from the serialized form entirely.
    pub fn skip(mut self) -> Self {
        self.skip = true;
        self
    }

    /// Leave the field out of the document even though it serializes.
    /// Only hand-written descriptors use this; the derive never does.
    pub fn private(mut self) -> Self {
        self.exported = false;
        self
    }

    /// Compose the field's type into the parent via `allOf`.
    pub fn embedded(mut self) -> Self {
        self.embedded = true;
        self
    }

    pub fn omit_empty(mut self) -> Self {
        self.omit_empty = true;
        self
    }

    pub fn required(mut self) -> Self {
        self.required_marker = true;
        self
    }

    pub fn description(mut self, description: impl Into<Cow<'static, str>>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn example(mut self, example: impl Into<Value>) -> Self {
        self.example = Some(example.into());
        self
    }

    /// Name the field serializes under, or `None` when skipped. An empty
    /// rename falls back to the Rust identifier.
    pub fn serialized_name(&self) -> Option<String> {
        if self.skip {
            return None;
        }
        match self.serialized_name.as_deref() {
            Some(name) if !name.is_empty() => Some(name.to_string()),
            _ => Some(self.ident.trim_start_matches("r#").to_string()),
        }
    }

    /// Required-ness given the resolved kind of the field's type.
    pub fn is_required(&self, kind: &TypeKind) -> bool {
        if self.omit_empty {
            return self.required_marker;
        }
        if self.required_marker {
            return true;
        }
        !kind.is_absent_representable()
    }
}

/// Strip module paths from every segment of a type name:
/// `app::dto::Page<app::dto::User>` becomes `Page<User>`.
pub fn short_type_name(full: &str) -> String {
    let mut out = String::with_capacity(full.len());
    let mut segment = String::new();
    for c in full.chars() {
        match c {
            '<' | '>' | ',' | ' ' | '[' | ']' | '(' | ')' | ';' | '&' => {
                out.push_str(last_path_segment(&segment));
                segment.clear();
                out.push(c);
            }
            _ => segment.push(c),
        }
    }
    out.push_str(last_path_segment(&segment));
    out
}

fn last_path_segment(path: &str) -> &str {
    path.rsplit("::").next().unwrap_or(path)
}

// ── Describe implementations ────────────────────────────────────────────────

macro_rules! describe_integer {
    ($($ty:ty => $bits:expr, $signed:expr;)*) => {
        $(
            impl Describe for $ty {
                fn describe() -> TypeDescriptor {
                    TypeDescriptor::of::<Self>(TypeKind::Integer(Integer {
                        bits: $bits,
                        signed: $signed,
                    }))
                }
            }
        )*
    };
}

describe_integer! {
    i8 => 8, true;
    i16 => 16, true;
    i32 => 32, true;
    i64 => 64, true;
    i128 => 128, true;
    isize => 64, true;
    u8 => 8, false;
    u16 => 16, false;
    u32 => 32, false;
    u64 => 64, false;
    u128 => 128, false;
    usize => 64, false;
}

impl Describe for bool {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::of::<Self>(TypeKind::Bool)
    }
}

impl Describe for f32 {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::of::<Self>(TypeKind::Float(Float::F32))
    }
}

impl Describe for f64 {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::of::<Self>(TypeKind::Float(Float::F64))
    }
}

macro_rules! describe_string {
    ($($ty:ty),*) => {
        $(
            impl Describe for $ty {
                fn describe() -> TypeDescriptor {
                    TypeDescriptor::of::<Self>(TypeKind::String)
                }
            }
        )*
    };
}

describe_string!(String, str, char, Cow<'static, str>);

impl<T: Describe> Describe for Option<T> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::of::<Self>(TypeKind::Optional(TypeRef::of::<T>()))
    }
}

// Smart pointers and references are transparent: they share the identity of
// the pointee.
macro_rules! describe_transparent {
    ($($ptr:ident),*) => {
        $(
            impl<T: Describe + ?Sized> Describe for $ptr<T> {
                fn describe() -> TypeDescriptor {
                    T::describe()
                }
            }
        )*
    };
}

describe_transparent!(Box, Arc, Rc);

impl<T: Describe + ?Sized> Describe for &'static T {
    fn describe() -> TypeDescriptor {
        T::describe()
    }
}

macro_rules! describe_sequence {
    ($($coll:ident),*) => {
        $(
            impl<T: Describe> Describe for $coll<T> {
                fn describe() -> TypeDescriptor {
                    TypeDescriptor::of::<Self>(TypeKind::Sequence(TypeRef::of::<T>()))
                }
            }
        )*
    };
}

describe_sequence!(Vec, VecDeque, LinkedList, BTreeSet);

impl<T: Describe, S: 'static> Describe for HashSet<T, S> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::of::<Self>(TypeKind::Sequence(TypeRef::of::<T>()))
    }
}

impl<T: Describe> Describe for [T] {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::of::<Self>(TypeKind::Sequence(TypeRef::of::<T>()))
    }
}

impl<T: Describe, const N: usize> Describe for [T; N] {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::of::<Self>(TypeKind::Sequence(TypeRef::of::<T>()))
    }
}

impl<K: Describe, V: Describe, S: 'static> Describe for HashMap<K, V, S> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::of::<Self>(TypeKind::Map {
            key: TypeRef::of::<K>(),
            value: TypeRef::of::<V>(),
        })
    }
}

impl<K: Describe, V: Describe> Describe for BTreeMap<K, V> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::of::<Self>(TypeKind::Map {
            key: TypeRef::of::<K>(),
            value: TypeRef::of::<V>(),
        })
    }
}

impl Describe for Value {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::of::<Self>(TypeKind::Any)
    }
}

impl Describe for serde_json::Map<String, Value> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::of::<Self>(TypeKind::Map {
            key: TypeRef::of::<String>(),
            value: TypeRef::of::<Value>(),
        })
    }
}

impl<T: 'static> Describe for std::sync::mpsc::Sender<T> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::of::<Self>(TypeKind::Unsupported("channel"))
    }
}

impl<T: 'static> Describe for std::sync::mpsc::Receiver<T> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::of::<Self>(TypeKind::Unsupported("channel"))
    }
}

#[cfg(feature = "chrono")]
impl<Tz: chrono::TimeZone + 'static> Describe for chrono::DateTime<Tz> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::of::<Self>(TypeKind::Timestamp)
    }
}

#[cfg(feature = "chrono")]
impl Describe for chrono::NaiveDateTime {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::of::<Self>(TypeKind::Timestamp)
    }
}

#[cfg(feature = "uuid")]
impl Describe for uuid::Uuid {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::of::<Self>(TypeKind::Uuid)
    }
}

#[cfg(feature = "decimal")]
impl Describe for rust_decimal::Decimal {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::of::<Self>(TypeKind::Decimal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_name_strips_paths() {
        assert_eq!(short_type_name("app::dto::User"), "User");
        assert_eq!(
            short_type_name("app::dto::Page<app::dto::User>"),
            "Page<User>"
        );
        assert_eq!(
            short_type_name("alloc::vec::Vec<core::option::Option<i32>>"),
            "Vec<Option<i32>>"
        );
    }

    #[test]
    fn box_is_transparent() {
        assert_eq!(Box::<String>::describe().id(), String::describe().id());
    }

    #[test]
    fn vec_of_u8_has_byte_items() {
        let desc = Vec::<u8>::describe();
        match desc.kind() {
            TypeKind::Sequence(item) => assert!(item.resolve().is_byte()),
            other => panic!("unexpected kind {other:?}"),
        }
    }

    #[test]
    fn empty_rename_falls_back_to_ident() {
        let field = FieldSpec::new("user_name", TypeRef::of::<String>()).rename("");
        assert_eq!(field.serialized_name().as_deref(), Some("user_name"));
    }

    #[test]
    fn skipped_field_has_no_name() {
        let field = FieldSpec::new("secret", TypeRef::of::<String>()).skip();
        assert!(field.serialized_name().is_none());
    }
}
