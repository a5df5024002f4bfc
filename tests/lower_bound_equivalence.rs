use dijkstra_steiner::{
    solve, BoundingBoxBound, Distance, GridInstance, LowerBound, Settings, SubsetKey, ZeroBound,
};
use proptest::prelude::*;

fn distinct(points: Vec<Vec<i32>>) -> Vec<Vec<i32>> {
    let mut out: Vec<Vec<i32>> = Vec::with_capacity(points.len());
    for p in points {
        if !out.contains(&p) {
            out.push(p);
        }
    }
    out
}

fn instances() -> impl Strategy<Value = GridInstance> {
    (2usize..=3)
        .prop_flat_map(|d| prop::collection::vec(prop::collection::vec(-4i32..6, d), 2..=6))
        .prop_map(distinct)
        .prop_map(|terminals| {
            let mut instance = GridInstance::from_terminals(&terminals).unwrap();
            instance.apply_dominance_pruning();
            instance
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn bound_choice_does_not_change_length(instance in instances()) {
        let settings = Settings::default();
        let zero = solve(&instance, &settings, &ZeroBound).unwrap();
        let bbox = solve(&instance, &settings, &BoundingBoxBound).unwrap();
        prop_assert_eq!(zero.length, bbox.length);
        prop_assert!(
            bbox.stats.extracted <= zero.stats.extracted,
            "bbox extracted {} > zero extracted {}",
            bbox.stats.extracted,
            zero.stats.extracted
        );
    }

    #[test]
    fn weaker_closure_bound_is_still_exact(instance in instances()) {
        let settings = Settings::default();
        let half = |subset: SubsetKey, vertex: usize, g: &GridInstance| -> Distance {
            BoundingBoxBound.estimate(subset, vertex, g) / 2
        };
        let exact = solve(&instance, &settings, &ZeroBound).unwrap();
        let got = solve(&instance, &settings, &half).unwrap();
        prop_assert_eq!(exact.length, got.length);
    }

    #[test]
    fn bbox_never_exceeds_optimum_from_terminals(instance in instances()) {
        let length = solve(&instance, &Settings::default(), &ZeroBound).unwrap().length;
        let first = instance.terminals()[0];
        prop_assert!(BoundingBoxBound.estimate(1, first, &instance) <= length);
    }
}
