#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// no_std support

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod array;
mod display;
mod node;
mod number;
mod object;
mod primitive;

#[cfg(feature = "serde")]
mod serde;

// -----------------------------------------------------------------------------
// Exports

pub use array::JsonArray;
pub use node::{JsonNode, NodeKind};
pub use number::JsonNumber;
pub use object::{JsonObject, ObjectIter};
pub use primitive::JsonPrimitive;
