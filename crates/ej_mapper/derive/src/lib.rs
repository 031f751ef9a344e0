//! See [`Mappable`].
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static MAPPING_ATTRIBUTE_NAME: &str = "mapping";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;

// -----------------------------------------------------------------------------
// Macros

/// # Record Derivation
///
/// `#[derive(Mappable)]` implements `Mappable`, `Record` and `RecordMut` for
/// a struct with named fields (or a unit struct). Every field type must be
/// `Mappable` itself, and the struct must implement `Default`: fields whose
/// key is absent, or which are excluded, keep their default value.
///
/// Enums, tuple structs and generic types are not supported.
///
/// The generated descriptors are `'static`, so exclusion decisions never
/// allocate.
///
/// ```rust, ignore
/// #[derive(Mappable, Default)]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
/// ```
///
/// ## Type Path
///
/// The type path used by class based exclusion and in error messages
/// defaults to `module_path!()::Ident`. It can be replaced:
///
/// ```rust, ignore
/// #[derive(Mappable, Default)]
/// #[mapping(type_path = "geo::Point")]
/// struct Point { /* ... */ }
/// ```
///
/// ## Nesting
///
/// Declares where the type lives relative to other types. The exclusion
/// engine skips `inner` types when inner class serialization is disabled,
/// and always skips `anonymous` and `local` types.
///
/// ```rust, ignore
/// #[derive(Mappable, Default)]
/// #[mapping(nesting = "inner")]
/// struct Engine { /* ... */ }
/// ```
///
/// Available values: `top_level` (the default), `nested`, `inner`,
/// `anonymous`, `local` and `unknown`.
///
/// These attributes can only be applied at the type level.
///
/// ## Field Keys
///
/// A field is written under its own name (raw identifiers lose their `r#`).
/// `rename` chooses another key:
///
/// ```rust, ignore
/// #[derive(Mappable, Default)]
/// struct User {
///     #[mapping(rename = "userName")]
///     user_name: String,
/// }
/// ```
///
/// ## Modifiers
///
/// Fields carry no modifiers unless declared. Modifiers are what
/// `ExclusionConfiguration::with_modifiers` matches against; by default
/// `static` and `transient` fields are skipped in both directions.
///
/// ```rust, ignore
/// #[derive(Mappable, Default)]
/// struct Session {
///     id: u64,
///     #[mapping(modifiers(transient))]
///     cache: Vec<u8>,
///     #[mapping(modifiers(private, final))]
///     secret: String,
/// }
/// ```
///
/// Available modifiers: `public`, `private`, `protected`, `static`, `final`,
/// `volatile`, `transient` and `synthetic`.
///
/// These attributes can only be applied at the field level.
#[proc_macro_derive(Mappable, attributes(mapping))]
pub fn derive_mappable(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    match derive_data::MappableDerive::from_input(&ast) {
        Ok(derive) => impls::impl_record(&derive).into(),
        Err(err) => err.into_compile_error().into(),
    }
}
