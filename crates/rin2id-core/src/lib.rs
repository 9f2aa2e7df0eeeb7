//! rin2id Core Library
//!
//! Record tree, GEDCOM text boundary and the RIN => ID remapping passes.
//! Reads and writes files only through [`GedcomDocument`]; never touches stdout.
//!

pub mod config;
pub mod error;
pub mod gedcom;
pub mod model;
pub mod remap;
pub mod tree;

pub use config::RemapConfig;
pub use error::{ParseError, Rin2IdError};
pub use gedcom::GedcomDocument;
pub use model::{NodeId, Record};
pub use remap::{build_id_map, remap_ids, rewrite_ids, IdMap, RemapReport};
pub use tree::RecordTree;
