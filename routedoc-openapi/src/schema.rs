//! Type-to-schema conversion.
//!
//! [`SchemaBuilder`] walks [`TypeDescriptor`]s and produces [`Schema`] nodes.
//! Named structs become shared components referenced through `$ref`; every
//! other shape is emitted inline. Results are memoized per `TypeId` for the
//! lifetime of one builder, which the document assembler creates fresh for
//! every build.

use std::any::TypeId;
use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use routedoc_core::{
    Float, Hooks, Integer, Schema, StructDescriptor, TypeDescriptor, TypeKind, TypeRef,
};
use tracing::debug;

use crate::error::{BuildError, Result};

const DECIMAL_DESCRIPTION: &str = "Decimal number represented as string for precision";
const DECIMAL_EXAMPLE: &str = "123.45";

/// Build-scoped converter from type descriptors to schemas.
///
/// ```ignore
/// let mut schemas = SchemaBuilder::new();
/// let user = schemas.schema_for(&User::describe())?;
/// assert_eq!(user.component_name(), Some("dto_User"));
/// let components = schemas.into_components();
/// ```
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    hooks: Arc<Hooks>,
    cache: HashMap<TypeId, Schema>,
    components: BTreeMap<String, Schema>,
    owners: HashMap<String, (TypeId, &'static str)>,
    inline_stack: HashSet<TypeId>,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `hooks` on every named component once it is populated.
    pub fn with_hooks(hooks: Arc<Hooks>) -> Self {
        Self {
            hooks,
            ..Self::default()
        }
    }

    /// Schema for `T`.
    pub fn schema_of<T: routedoc_core::Describe + ?Sized>(&mut self) -> Result<Schema> {
        self.schema_for_ref(TypeRef::of::<T>())
    }

    pub fn schema_for_ref(&mut self, ty: TypeRef) -> Result<Schema> {
        self.schema_for(&ty.resolve())
    }

    /// Schema for a described type. Optional layers make the result
    /// nullable without touching the cached non-null schema.
    pub fn schema_for(&mut self, descriptor: &TypeDescriptor) -> Result<Schema> {
        let mut base = Cow::Borrowed(descriptor);
        let mut nullable = false;
        while let Some(inner) = base.optional_inner() {
            nullable = true;
            base = Cow::Owned(inner.resolve());
        }

        let schema = self.non_null(&base)?;
        Ok(if nullable {
            wrap_nullable(schema)
        } else {
            schema
        })
    }

    /// Components generated so far, keyed by component name.
    pub fn components(&self) -> &BTreeMap<String, Schema> {
        &self.components
    }

    pub fn into_components(self) -> BTreeMap<String, Schema> {
        self.components
    }

    fn non_null(&mut self, descriptor: &TypeDescriptor) -> Result<Schema> {
        if let Some(cached) = self.cache.get(&descriptor.id()) {
            return Ok(cached.clone());
        }

        let schema = match descriptor.kind() {
            TypeKind::Bool => Schema::boolean(),
            TypeKind::Integer(int) => integer_schema(*int),
            TypeKind::Float(Float::F32) => Schema::number().with_format("float"),
            TypeKind::Float(Float::F64) => Schema::number(),
            TypeKind::String => Schema::string(),
            TypeKind::Sequence(item) => {
                let item = item.resolve();
                if item.is_byte() {
                    Schema::string().with_format("byte")
                } else {
                    Schema::array(self.schema_for(&item)?)
                }
            }
            TypeKind::Map { key, value } => {
                let key = key.resolve();
                if !matches!(key.kind(), TypeKind::String) {
                    return Err(BuildError::UnsupportedMapKey {
                        type_name: descriptor.type_name(),
                        key: key.type_name(),
                    });
                }
                Schema::map(self.schema_for_ref(*value)?)
            }
            TypeKind::Any => Schema::object(),
            TypeKind::Timestamp => Schema::string().with_format("date-time"),
            TypeKind::Uuid => Schema::string().with_format("uuid"),
            TypeKind::Decimal => Schema::string()
                .with_format("decimal")
                .with_description(DECIMAL_DESCRIPTION)
                .with_example(DECIMAL_EXAMPLE),
            TypeKind::Struct(def) if def.is_inline() => return self.inline_struct(descriptor, def),
            TypeKind::Struct(def) => return self.named_struct(descriptor, def),
            // `schema_for` strips optional layers before getting here.
            TypeKind::Optional(inner) => return Ok(wrap_nullable(self.schema_for_ref(*inner)?)),
            TypeKind::Unsupported(kind) => {
                return Err(BuildError::UnsupportedType {
                    type_name: descriptor.type_name(),
                    kind: *kind,
                })
            }
        };

        self.cache.insert(descriptor.id(), schema.clone());
        Ok(schema)
    }

    fn named_struct(&mut self, descriptor: &TypeDescriptor, def: &StructDescriptor) -> Result<Schema> {
        let name = component_name(def);

        if let Some(&(owner, owner_name)) = self.owners.get(&name) {
            if owner != descriptor.id() {
                return Err(BuildError::ComponentNameConflict {
                    name,
                    first: owner_name,
                    second: descriptor.type_name(),
                });
            }
        }
        self.owners
            .insert(name.clone(), (descriptor.id(), descriptor.type_name()));

        // Cached before population so self-references resolve to the `$ref`.
        let reference = Schema::reference(&name);
        self.cache.insert(descriptor.id(), reference.clone());

        let mut schema = Schema::object();
        self.populate(&mut schema, def)?;
        self.hooks.run_schema_generate(&name, &mut schema)?;

        debug!(component = %name, properties = schema.properties.len(), "schema generated");
        self.components.insert(name, schema);
        Ok(reference)
    }

    fn inline_struct(&mut self, descriptor: &TypeDescriptor, def: &StructDescriptor) -> Result<Schema> {
        if !self.inline_stack.insert(descriptor.id()) {
            return Err(BuildError::RecursiveInlineType {
                type_name: descriptor.type_name(),
            });
        }

        let mut schema = Schema::object();
        let populated = self.populate(&mut schema, def);
        self.inline_stack.remove(&descriptor.id());
        populated?;

        self.cache.insert(descriptor.id(), schema.clone());
        Ok(schema)
    }

    fn populate(&mut self, schema: &mut Schema, def: &StructDescriptor) -> Result<()> {
        for field in def.fields() {
            if !field.exported && !field.embedded {
                continue;
            }

            let field_type = field.ty.resolve();

            if field.embedded {
                let embedded = self.schema_for(&field_type)?;
                schema.all_of.push(embedded);
                continue;
            }

            let Some(name) = field.serialized_name() else {
                continue;
            };

            let mut property = self.schema_for(&field_type)?;
            if let Some(description) = &field.description {
                property.description = Some(description.to_string());
            }
            if let Some(example) = &field.example {
                property.example = Some(example.clone());
            }

            if field.is_required(field_type.kind()) {
                schema.required.push(name.clone());
            }
            schema.properties.insert(name, property);
        }
        Ok(())
    }
}

fn integer_schema(int: Integer) -> Schema {
    match int.bits {
        0..=32 => Schema::integer().with_format("int32"),
        33..=64 => Schema::integer().with_format("int64"),
        _ => Schema::integer(),
    }
}

/// Mark a schema nullable. A component reference is wrapped in `allOf`
/// so the shared component itself stays non-nullable.
fn wrap_nullable(schema: Schema) -> Schema {
    if schema.is_reference() {
        return Schema {
            nullable: true,
            all_of: vec![schema],
            ..Schema::default()
        };
    }
    Schema {
        nullable: true,
        ..schema
    }
}

/// Component name of a named struct: last module segment, `_`, type name.
pub fn component_name(def: &StructDescriptor) -> String {
    let module = def.module_path().rsplit("::").next().unwrap_or_default();
    if module.is_empty() {
        sanitize_component_name(def.name())
    } else {
        sanitize_component_name(&format!("{module}_{}", def.name()))
    }
}

/// Replace characters that are not valid in a component key.
pub fn sanitize_component_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '-' | '.' | ' ' | '[' | ']' | '<' | '>' | ',' | ':' => '_',
            c => c,
        })
        .collect()
}
