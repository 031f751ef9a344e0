//! `Mappable` for standard types.

mod collections;
mod node;
mod scalars;
mod wrappers;
