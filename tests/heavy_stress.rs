#![cfg(feature = "heavy")]
use dijkstra_steiner::{solve_terminals, BoundingBoxBound, Settings, ZeroBound};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_terminals(rng: &mut StdRng, count: usize, dimension: usize, span: i32) -> Vec<Vec<i32>> {
    let mut terminals: Vec<Vec<i32>> = Vec::with_capacity(count);
    while terminals.len() < count {
        let point: Vec<i32> = (0..dimension).map(|_| rng.gen_range(0..span)).collect();
        if !terminals.contains(&point) {
            terminals.push(point);
        }
    }
    terminals
}

#[test]
fn heavy_stress_planar_sixteen() {
    let mut rng = StdRng::seed_from_u64(123);
    for _ in 0..4 {
        let terminals = random_terminals(&mut rng, 16, 2, 1000);
        let tree = solve_terminals(&terminals, &Settings::default(), &BoundingBoxBound).unwrap();
        assert_eq!(tree.edge_length(), tree.length);
        assert_eq!(
            tree.edges.len() + 1,
            tree.terminals.len() + tree.steiner_points.len()
        );
    }
}

#[test]
fn heavy_stress_small_memory_matches() {
    let mut rng = StdRng::seed_from_u64(7);
    let terminals = random_terminals(&mut rng, 12, 3, 50);
    let lean = Settings {
        small_memory_mode: true,
        ..Settings::default()
    };
    let a = solve_terminals(&terminals, &Settings::default(), &BoundingBoxBound).unwrap();
    let b = solve_terminals(&terminals, &lean, &BoundingBoxBound).unwrap();
    assert_eq!(a, b);
}

#[test]
fn heavy_stress_bounds_agree() {
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..3 {
        let terminals = random_terminals(&mut rng, 10, 2, 200);
        let bbox = solve_terminals(&terminals, &Settings::default(), &BoundingBoxBound).unwrap();
        let zero = solve_terminals(&terminals, &Settings::default(), &ZeroBound).unwrap();
        assert_eq!(bbox.length, zero.length);
        assert!(bbox.stats.extracted <= zero.stats.extracted);
    }
}
