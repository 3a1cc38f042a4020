//! Aggregate statistics over a library.
//!
//! Everything here is a pure function of the book list: computing a
//! [`Snapshot`] never touches the store, and the same books always produce
//! the same snapshot (including the order of tied rows).

mod snapshot;
mod table;

pub use crate::snapshot::{Decade, Snapshot};
pub use crate::table::{Entry, FrequencyTable};

/// Number of authors shown on the statistics screen.
pub const TOP_AUTHORS: usize = 5;
