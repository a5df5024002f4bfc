use dijkstra_steiner::{solve, BoundingBoxBound, GridInstance, Settings, SteinerSolverBuilder};
use proptest::prelude::*;

fn normalized(edges: &[(usize, usize)]) -> Vec<(usize, usize)> {
    let mut out: Vec<(usize, usize)> = edges.iter().map(|&(a, b)| (a.min(b), a.max(b))).collect();
    out.sort_unstable();
    out
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn repeated_solves_agree(
        raw in (2usize..=3).prop_flat_map(|d| {
            prop::collection::vec(prop::collection::vec(0i32..9, d), 2..=7)
        })
    ) {
        let mut terminals: Vec<Vec<i32>> = Vec::new();
        for p in raw {
            if !terminals.contains(&p) {
                terminals.push(p);
            }
        }
        let mut instance = GridInstance::from_terminals(&terminals).unwrap();
        instance.apply_dominance_pruning();
        let settings = Settings::default();
        let first = solve(&instance, &settings, &BoundingBoxBound).unwrap();
        for _ in 0..3 {
            let again = solve(&instance, &settings, &BoundingBoxBound).unwrap();
            prop_assert_eq!(again.length, first.length);
            prop_assert_eq!(normalized(&again.edges), normalized(&first.edges));
        }
    }
}

#[test]
fn solver_reuse_matches_fresh_solver() {
    let terminals = vec![vec![0, 0, 0], vec![3, 1, 2], vec![1, 4, 0], vec![4, 4, 4]];
    let solver = SteinerSolverBuilder::new(BoundingBoxBound).build();
    let first = solver.solve_terminals(&terminals).unwrap();
    let second = solver.solve_terminals(&terminals).unwrap();
    let fresh = SteinerSolverBuilder::new(BoundingBoxBound)
        .build()
        .solve_terminals(&terminals)
        .unwrap();
    assert_eq!(first, second);
    assert_eq!(first, fresh);
}
