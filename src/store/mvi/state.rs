/// State owned by one store slice.
///
/// Snapshots are replaced, never mutated in place. `PartialEq` lets the store
/// keep the previous `Arc` when a reduction changes nothing.
pub trait SliceState: Clone + PartialEq + Default + Send + Sync + 'static {}
