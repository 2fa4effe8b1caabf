use std::num::NonZeroUsize;

/// Split `items` into consecutive chunks of at most `capacity` items.
///
/// Every chunk but the last holds exactly `capacity` items, and the chunks
/// joined in order give back `items`. An empty slice yields no chunks.
pub fn paginate<T>(items: &[T], capacity: NonZeroUsize) -> Vec<&[T]> {
    items.chunks(capacity.get()).collect()
}

/// Number of chunks [`paginate`] produces for `len` items.
pub fn page_count(len: usize, capacity: NonZeroUsize) -> usize {
    len.div_ceil(capacity.get())
}
