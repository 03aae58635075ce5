//! Type definitions for tag reconciliation.

mod common;
mod tag_set;

pub use common::*;
pub use tag_set::*;
