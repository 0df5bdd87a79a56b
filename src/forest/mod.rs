//! General-purpose forest operations: building from flat records, flattening
//! back, querying and editing.

pub mod builder;
pub mod flatten;
pub mod mutate;
pub mod query;

pub use builder::{build_from_roots, build_ordered};
pub use flatten::{flatten, FlattenOptions};
pub use mutate::{delete_first, filter_out};
pub use query::{find_by_ids, find_first, find_first_by_key};
