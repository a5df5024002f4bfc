use std::env;

use dijkstra_steiner::io::read_instance;
use dijkstra_steiner::{projection, solve, BoundingBoxBound, Settings};

fn main() {
    let Some(path) = env::args().nth(1) else {
        eprintln!("usage: cargo run --example solve_file -- <instance>");
        std::process::exit(2);
    };
    let settings = Settings::default();
    let mut instance = match read_instance(&path) {
        Ok(instance) => instance,
        Err(err) => {
            eprintln!("{path}: {err}");
            std::process::exit(1);
        }
    };
    let pruned = instance.apply_dominance_pruning();
    println!(
        "{} vertices, {} pruned, {} terminals",
        instance.vertex_count(),
        pruned,
        instance.terminal_count()
    );
    let solution = match solve(&instance, &settings, &BoundingBoxBound) {
        Ok(solution) => solution,
        Err(err) => {
            eprintln!("{path}: {err}");
            std::process::exit(1);
        }
    };
    let tree = projection::reduce(&instance, &solution, settings.edge_as_steiner_point);
    println!("length {}", tree.length);
    for point in &tree.steiner_points {
        println!("steiner {point:?}");
    }
    for &(a, b) in &tree.edges {
        println!("edge {:?} {:?}", tree.point(a), tree.point(b));
    }
}
