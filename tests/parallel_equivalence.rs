#![cfg(feature = "parallel")]
use dijkstra_steiner::pruning::exclusion_mask;
use dijkstra_steiner::{solve_terminals, BoundingBoxBound, Settings};
use proptest::prelude::*;

/// Direct definition: excluded if on some axis pair (j < i) no terminal with
/// layer <= the vertex's layer on axis j brackets its position on axis i.
fn reference_mask(terminals: &[Vec<usize>], sizes: &[usize]) -> Vec<bool> {
    let volume: usize = sizes.iter().product();
    let d = sizes.len();
    (0..volume)
        .map(|mut idx| {
            let pos: Vec<usize> = sizes
                .iter()
                .map(|&s| {
                    let p = idx % s;
                    idx /= s;
                    p
                })
                .collect();
            (1..d).any(|i| {
                (0..i).any(|j| {
                    let below: Vec<usize> = terminals
                        .iter()
                        .filter(|t| t[j] <= pos[j])
                        .map(|t| t[i])
                        .collect();
                    match (below.iter().min(), below.iter().max()) {
                        (Some(&lo), Some(&hi)) => pos[i] < lo || pos[i] > hi,
                        _ => true,
                    }
                })
            })
        })
        .collect()
}

proptest! {
    #[test]
    fn parallel_planes_match_reference(
        (sizes, terminals) in (2usize..=4)
            .prop_flat_map(|d| prop::collection::vec(1usize..5, d))
            .prop_flat_map(|sizes| {
                let point = sizes.iter().map(|&s| 0..s).collect::<Vec<_>>();
                (Just(sizes), prop::collection::vec(point, 1..6))
            })
    ) {
        prop_assert_eq!(exclusion_mask(&terminals, &sizes), reference_mask(&terminals, &sizes));
    }
}

#[test]
fn parallel_pruning_keeps_lengths() {
    let terminals = vec![
        vec![0, 0, 0],
        vec![5, 2, 1],
        vec![1, 6, 3],
        vec![4, 4, 6],
        vec![6, 1, 5],
        vec![2, 5, 2],
    ];
    let pruned = solve_terminals(&terminals, &Settings::default(), &BoundingBoxBound).unwrap();
    let full = solve_terminals(
        &terminals,
        &Settings {
            dominance_pruning: false,
            ..Settings::default()
        },
        &BoundingBoxBound,
    )
    .unwrap();
    assert_eq!(pruned.length, full.length);
}
