mod policy;
mod tree;

pub use policy::{MergePolicy, RangeMax, RangeMin};
pub use tree::LazySegmentTree;
