//! # Annotation Indexer Shared
//!
//! Value types shared by the annotation indexer crates: the read-only view
//! over annotation records, the store query model, the output document and
//! the module toggles that drive document assembly.

pub mod document;
pub mod module;
pub mod query;
pub mod record;

pub use document::{DateRange, Document};
pub use module::{Module, ModuleSet};
pub use query::{Constraint, Query, IS_IN_KEY, OVERLAP_KEY};
pub use record::{Anchor, Record, Target};
