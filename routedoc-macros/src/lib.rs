extern crate proc_macro;
use proc_macro::TokenStream;

pub(crate) mod case;
pub(crate) mod crate_path;
pub(crate) mod describe_derive;

/// Derive macro producing a structural type descriptor for a struct.
///
/// The generated `Describe` impl is what the schema builder walks; nothing
/// is inspected at runtime.
///
/// # Struct-level attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `#[serde(rename_all = "...")]` | Applied to every field without an explicit rename |
/// | `#[serde(transparent)]` | Described as its single non-skipped field |
/// | `#[describe(inline)]` | The struct has no stable name: it is emitted inline instead of as a component |
///
/// # Field attributes
///
/// | Attribute | Effect on the field |
/// |-----------|---------------------|
/// | `#[serde(rename = "...")]` | Property name (a deserialize-only rename is ignored) |
/// | `#[serde(skip)]`, `#[serde(skip_serializing)]` | Excluded |
/// | `#[serde(skip_serializing_if = "...")]` | Omit-empty: only required with a `required` marker |
/// | `#[serde(flatten)]` | Embedded: its schema joins the parent's `allOf` |
/// | `#[garde(required)]`, `#[validate(required)]`, `#[describe(required)]` | Required marker |
/// | `#[describe(description = "...")]` | Description; the doc comment is used otherwise |
/// | `#[describe(example = ...)]` | Example value (any literal) |
/// | `#[describe(skip)]` | Excluded without touching serde |
///
/// Rust visibility plays no part: serde serializes private fields, so they
/// are documented like public ones.
///
/// Newtype structs describe as their inner type, unit-only enums as strings.
/// Other enums and tuple structs are described as unsupported and fail the
/// document build if they are reached.
///
/// # Example
///
/// ```ignore
/// use routedoc::prelude::*;
///
/// #[derive(Serialize, Describe)]
/// #[serde(rename_all = "camelCase")]
/// pub struct User {
///     /// Unique identifier.
///     pub id: u64,
///     #[describe(example = "alice@example.com")]
///     pub email: String,
///     #[serde(skip_serializing_if = "Option::is_none")]
///     pub display_name: Option<String>,
///     pub created_at: chrono::DateTime<chrono::Utc>,
/// }
/// ```
#[proc_macro_derive(Describe, attributes(describe, serde, garde, validate))]
pub fn derive_describe(input: TokenStream) -> TokenStream {
    describe_derive::expand(input)
}
