/// Combining operation shared by range queries and range updates.
///
/// `absent()` is the "nothing here" sentinel: it marks an empty lazy slot and
/// is the result of querying outside the target range. It must act as an
/// identity for `merge` on both sides, and `merge` must be associative; the
/// structure validates neither.
///
/// Range updates fold the new value into whatever is already pending with the
/// same `merge`, so the operation should be an idempotent selection (min or
/// max) for a range update to read as "raise/lower every element in the
/// range". A summing merge would compound across updates instead.
pub trait MergePolicy {
    type Value: Clone + PartialEq;

    fn absent() -> Self::Value;
    fn merge(a: &Self::Value, b: &Self::Value) -> Self::Value;
}

/// Range-maximum policy: an update raises the range to at least the given
/// value.
pub struct RangeMax;

impl MergePolicy for RangeMax {
    type Value = i64;

    fn absent() -> i64 {
        i64::MIN
    }

    fn merge(a: &i64, b: &i64) -> i64 {
        (*a).max(*b)
    }
}

/// Range-minimum policy: an update lowers the range to at most the given
/// value.
pub struct RangeMin;

impl MergePolicy for RangeMin {
    type Value = i64;

    fn absent() -> i64 {
        i64::MAX
    }

    fn merge(a: &i64, b: &i64) -> i64 {
        (*a).min(*b)
    }
}
