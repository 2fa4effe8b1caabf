use std::num::NonZeroUsize;

use traineval_export::paginate::{page_count, paginate};

fn cap(n: usize) -> NonZeroUsize {
    NonZeroUsize::new(n).unwrap()
}

#[test]
fn empty_input_yields_no_chunks() {
    let items: Vec<String> = Vec::new();
    assert!(paginate(&items, cap(16)).is_empty());
    assert_eq!(page_count(0, cap(16)), 0);
}

#[test]
fn chunks_reassemble_to_input_for_many_lengths() {
    for capacity in 1..=7 {
        for len in 0..=30 {
            let items: Vec<usize> = (0..len).collect();
            let chunks = paginate(&items, cap(capacity));

            assert_eq!(chunks.len(), len.div_ceil(capacity), "len={len} cap={capacity}");
            assert_eq!(chunks.len(), page_count(len, cap(capacity)));

            let joined: Vec<usize> = chunks.iter().flat_map(|c| c.iter().copied()).collect();
            assert_eq!(joined, items);

            if let Some((last, full)) = chunks.split_last() {
                assert!(full.iter().all(|c| c.len() == capacity));
                assert!(!last.is_empty() && last.len() <= capacity);
            }
        }
    }
}

#[test]
fn twenty_responses_at_sixteen_per_page() {
    let items: Vec<String> = (1..=20).map(|i| format!("answer {i}")).collect();
    let chunks = paginate(&items, cap(16));

    assert_eq!(chunks.len(), 2);
    assert_eq!(chunks[0].len(), 16);
    assert_eq!(chunks[1], &items[16..]);
}
