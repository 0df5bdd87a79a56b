//! Incremental exploration primitives: one level at a time, or the strip of
//! levels around a known breadcrumb. Neither builds the whole hierarchy.

pub mod children;
pub mod reconstruct;

pub use children::load_children;
pub use reconstruct::reconstruct;
