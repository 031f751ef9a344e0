#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// no_std support

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

extern crate self as ej_mapper;

// -----------------------------------------------------------------------------
// Modules

mod error;
mod from_tree;
mod impls;
mod mappable;
mod mapper;
mod path;
mod to_tree;

pub mod foreign;

#[cfg(feature = "derive")]
pub mod derive {
    //! `#[derive(Mappable)]`.
    pub use ej_mapper_derive::Mappable;
}

// -----------------------------------------------------------------------------
// Exports

pub use error::{CycleDetectedError, Error, ForeignError, KeyProjectionError, MappingError, Result};
pub use foreign::{from_foreign, to_foreign};
pub use from_tree::FromTreeContext;
pub use mappable::{Entries, Items, Mappable, MappableRef, Mapping, Record, RecordMut, ScalarRef, Sequence};
pub use mapper::{Mapper, from_tree, to_tree};
pub use path::JsonPath;

pub use ej_exclusion as exclusion;
pub use ej_node as node;

#[cfg(all(test, feature = "derive"))]
mod tests;
