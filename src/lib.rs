pub mod error;
pub mod forest;
pub mod lazy;
pub mod store;
pub mod tree;
pub mod types;
pub mod utils;

pub use error::{Result, TreeError};
pub use forest::{
    build_from_roots, build_ordered, delete_first, filter_out, find_by_ids, find_first,
    find_first_by_key, flatten, FlattenOptions,
};
pub use lazy::{load_children, reconstruct};
pub use store::NodeStore;
pub use tree::{Forest, TreeNode};
pub use types::{FieldNames, Record, RecordKey};
