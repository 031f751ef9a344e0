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

mod configuration;
mod descriptor;
mod modifiers;
mod strategy;

// -----------------------------------------------------------------------------
// Exports

pub use configuration::ExclusionConfiguration;
pub use descriptor::{ClassDescriptor, FieldDescriptor, Nesting};
pub use modifiers::Modifiers;
pub use strategy::{ExclusionStrategy, FnExclusion, SkipClasses, SkipFieldNames};
