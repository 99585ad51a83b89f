//! Component data model shared by the extractor, differ and reporters.
//!
//! Every document is reduced to a sequence of [`ComponentRecord`]s and then
//! to a [`ComponentIndex`] keyed by identity. License fields are folded into
//! a single canonical string at extraction time (see [`canonical_license`]).

mod component;
mod index;
mod license;

pub use component::*;
pub use index::*;
pub use license::*;
