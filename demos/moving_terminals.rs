use std::time::Instant;

use dijkstra_steiner::{BoundingBoxBound, Coord, SteinerSolverBuilder};

/// Terminals bouncing inside a box, one step per frame.
struct Swarm {
    points: Vec<Vec<Coord>>,
    velocity: Vec<Vec<Coord>>,
    extent: Coord,
}

impl Swarm {
    fn new(count: usize, extent: Coord) -> Self {
        let points = (0..count)
            .map(|i| {
                let i = i as Coord;
                vec![(i * 7) % extent, (i * 13 + 5) % extent]
            })
            .collect();
        let velocity = (0..count)
            .map(|i| {
                let i = i as Coord;
                vec![1 + i % 3, 2 - i % 4]
            })
            .collect();
        Self {
            points,
            velocity,
            extent,
        }
    }

    fn step(&mut self) {
        for (p, v) in self.points.iter_mut().zip(&mut self.velocity) {
            for (x, dx) in p.iter_mut().zip(v.iter_mut()) {
                *x += *dx;
                if *x < 0 || *x >= self.extent {
                    *dx = -*dx;
                    *x = (*x).clamp(0, self.extent - 1);
                }
            }
        }
    }

    /// Terminal positions with collisions dropped.
    fn terminals(&self) -> Vec<Vec<Coord>> {
        let mut out: Vec<Vec<Coord>> = Vec::with_capacity(self.points.len());
        for p in &self.points {
            if !out.contains(p) {
                out.push(p.clone());
            }
        }
        out
    }
}

fn main() {
    let solver = SteinerSolverBuilder::new(BoundingBoxBound)
        .with_extraction_limit(2_000_000)
        .build();
    let mut swarm = Swarm::new(8, 40);
    for frame in 0..30 {
        let terminals = swarm.terminals();
        let start = Instant::now();
        match solver.solve_terminals(&terminals) {
            Ok(tree) => println!(
                "frame {frame:>2}: {} terminals, length {:>4}, {} steiner points, {:.2} ms",
                terminals.len(),
                tree.length,
                tree.steiner_points.len(),
                start.elapsed().as_secs_f64() * 1e3
            ),
            Err(err) => println!("frame {frame:>2}: skipped ({err})"),
        }
        swarm.step();
    }
}
