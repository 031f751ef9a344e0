#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

pub use ej_exclusion as exclusion;
pub use ej_mapper as mapper;
pub use ej_node as node;
