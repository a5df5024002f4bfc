use dijkstra_steiner::{solve_terminals, BoundingBoxBound, Settings};

fn main() {
    let terminals = vec![vec![0, 0, 0], vec![4, 0, 0], vec![0, 4, 0]];
    let tree = solve_terminals(&terminals, &Settings::default(), &BoundingBoxBound)
        .expect("corner instance is well formed");
    println!("length = {}", tree.length);
    println!("steiner points = {:?}", tree.steiner_points);
    for &(a, b) in &tree.edges {
        println!("{:?} -- {:?}", tree.point(a), tree.point(b));
    }
    println!(
        "extracted {} of {} created states",
        tree.stats.extracted, tree.stats.created
    );
}
