//! Spring layout
//!
//! Seeded Fruchterman-Reingold force-directed placement. Positions feed the
//! dashboard's node coordinates; determinism matters more than layout
//! quality, so the node count, seed, and edge set fully determine the
//! output.

use crate::graph::CollabGraph;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Iterations of the force simulation
const ITERATIONS: usize = 50;

/// Compute node positions scaled to `[-scale, scale]`
pub fn spring_layout(graph: &CollabGraph, scale: f64, seed: u64) -> Vec<[f64; 2]> {
    let n = graph.node_count();
    if n == 0 {
        return Vec::new();
    }
    if n == 1 {
        return vec![[0.0, 0.0]];
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut pos: Vec<[f64; 2]> = (0..n)
        .map(|_| [rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)])
        .collect();

    // Optimal pairwise distance for a unit-area frame
    let k = (1.0 / n as f64).sqrt();

    let mut temperature = 0.1;
    let cooling = temperature / (ITERATIONS as f64 + 1.0);

    let edges: Vec<(usize, usize)> = graph.edges().collect();

    for _ in 0..ITERATIONS {
        let mut disp = vec![[0.0f64; 2]; n];

        // Repulsion between all pairs
        for i in 0..n {
            for j in (i + 1)..n {
                let dx = pos[i][0] - pos[j][0];
                let dy = pos[i][1] - pos[j][1];
                let dist = (dx * dx + dy * dy).sqrt().max(1e-9);
                let force = k * k / dist;

                let fx = dx / dist * force;
                let fy = dy / dist * force;
                disp[i][0] += fx;
                disp[i][1] += fy;
                disp[j][0] -= fx;
                disp[j][1] -= fy;
            }
        }

        // Attraction along edges
        for &(i, j) in &edges {
            let dx = pos[i][0] - pos[j][0];
            let dy = pos[i][1] - pos[j][1];
            let dist = (dx * dx + dy * dy).sqrt().max(1e-9);
            let force = dist * dist / k;

            let fx = dx / dist * force;
            let fy = dy / dist * force;
            disp[i][0] -= fx;
            disp[i][1] -= fy;
            disp[j][0] += fx;
            disp[j][1] += fy;
        }

        // Apply displacements, capped by the temperature
        for i in 0..n {
            let dx = disp[i][0];
            let dy = disp[i][1];
            let length = (dx * dx + dy * dy).sqrt().max(1e-9);
            let capped = length.min(temperature);
            pos[i][0] += dx / length * capped;
            pos[i][1] += dy / length * capped;
        }

        temperature -= cooling;
    }

    rescale(&mut pos, scale);
    pos
}

/// Center positions on the origin and scale the largest coordinate to
/// `scale`
fn rescale(pos: &mut [[f64; 2]], scale: f64) {
    let n = pos.len() as f64;

    let mean_x = pos.iter().map(|p| p[0]).sum::<f64>() / n;
    let mean_y = pos.iter().map(|p| p[1]).sum::<f64>() / n;

    let mut max_abs = 0.0f64;
    for p in pos.iter_mut() {
        p[0] -= mean_x;
        p[1] -= mean_y;
        max_abs = max_abs.max(p[0].abs()).max(p[1].abs());
    }

    if max_abs > 0.0 {
        let factor = scale / max_abs;
        for p in pos.iter_mut() {
            p[0] *= factor;
            p[1] *= factor;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path_graph(n: usize) -> CollabGraph {
        let mut graph = CollabGraph::new();
        let names: Vec<String> = (0..n).map(|i| format!("n{i}")).collect();
        for name in &names {
            graph.add_node(name);
        }
        for w in names.windows(2) {
            graph.add_edge(&w[0], &w[1]);
        }
        graph
    }

    #[test]
    fn test_layout_deterministic() {
        let graph = path_graph(6);
        let a = spring_layout(&graph, 2.0, 0);
        let b = spring_layout(&graph, 2.0, 0);
        assert_eq!(a, b);
    }

    #[test]
    fn test_layout_bounded() {
        let graph = path_graph(10);
        let pos = spring_layout(&graph, 2.0, 0);

        assert_eq!(pos.len(), 10);
        for p in &pos {
            assert!(p[0].abs() <= 2.0 + 1e-9);
            assert!(p[1].abs() <= 2.0 + 1e-9);
        }

        // The scale is actually reached on the widest axis
        let max = pos
            .iter()
            .flat_map(|p| [p[0].abs(), p[1].abs()])
            .fold(0.0f64, f64::max);
        assert!((max - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_layout_degenerate_sizes() {
        assert!(spring_layout(&CollabGraph::new(), 2.0, 0).is_empty());

        let single = CollabGraph::with_nodes(["a"]);
        assert_eq!(spring_layout(&single, 2.0, 0), vec![[0.0, 0.0]]);
    }
}
