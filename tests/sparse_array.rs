use trellis::collections::{HugeSparseArrayBuilder, PAGE_SIZE};

#[test]
fn unwritten_indices_read_default() {
    let builder = HugeSparseArrayBuilder::<i64>::new(-1);
    builder.set(7, 42);
    let array = builder.build();

    assert_eq!(array.get(7), 42);
    assert_eq!(array.get(0), -1);
    assert_eq!(array.get(1_000_000_000), -1);
}

#[test]
fn set_then_get_round_trips() {
    let builder = HugeSparseArrayBuilder::<f64>::with_zero_default();
    for i in 0..200u64 {
        builder.set(i * 1000, i as f64 * 0.5);
    }
    let array = builder.build();
    for i in 0..200u64 {
        assert!((array.get(i * 1000) - i as f64 * 0.5).abs() < f64::EPSILON);
    }
}

#[test]
fn set_if_absent_claims_only_default_slots() {
    let builder = HugeSparseArrayBuilder::<i64>::new(0);
    assert!(builder.set_if_absent(5, 10));
    // Slot already holds a non-default value: no write, value unchanged.
    assert!(!builder.set_if_absent(5, 20));
    let array = builder.build();
    assert_eq!(array.get(5), 10);
}

#[test]
fn add_to_accumulates() {
    let builder = HugeSparseArrayBuilder::<i64>::with_zero_default();
    builder.add_to(3, 5);
    builder.add_to(3, 7);
    builder.add_to(3, -2);
    assert_eq!(builder.build().get(3), 10);
}

#[test]
fn contains_requires_non_default_value_on_allocated_page() {
    let builder = HugeSparseArrayBuilder::<u64>::with_zero_default();
    builder.set(100, 1);
    // Writing the default value allocates the page but does not make the
    // index "contained".
    builder.set(101, 0);
    let array = builder.build();

    assert!(array.contains(100));
    assert!(!array.contains(101));
    assert!(!array.contains(102)); // same page, never written
    assert!(!array.contains(PAGE_SIZE as u64 * 50)); // unallocated page
}

#[test]
fn capacity_tracks_allocated_pages() {
    let builder = HugeSparseArrayBuilder::<u64>::with_zero_default();
    assert_eq!(builder.capacity(), 0);
    builder.set(0, 1);
    assert_eq!(builder.capacity(), PAGE_SIZE as u64);
    builder.set(PAGE_SIZE as u64 * 10, 1);
    let array = builder.build();
    assert_eq!(array.capacity(), PAGE_SIZE as u64 * 11);
}

#[test]
fn racing_workers_claim_each_slot_exactly_once() {
    let builder = HugeSparseArrayBuilder::<i64>::new(-1);
    let wins: Vec<usize> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|worker| {
                let builder = &builder;
                scope.spawn(move || {
                    let mut won = 0usize;
                    for index in 0..1000u64 {
                        if builder.set_if_absent(index, worker) {
                            won += 1;
                        }
                    }
                    won
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    // Every slot has exactly one winner.
    assert_eq!(wins.iter().sum::<usize>(), 1000);
    let array = builder.build();
    for index in 0..1000u64 {
        let value = array.get(index);
        assert!((0..4).contains(&value), "slot {index} holds {value}");
    }
}

#[test]
fn concurrent_add_to_is_lossless() {
    let builder = HugeSparseArrayBuilder::<i64>::with_zero_default();
    std::thread::scope(|scope| {
        for _ in 0..4 {
            let builder = &builder;
            scope.spawn(move || {
                for _ in 0..10_000 {
                    builder.add_to(17, 1);
                }
            });
        }
    });
    assert_eq!(builder.build().get(17), 40_000);
}
