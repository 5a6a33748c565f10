//! Hub graph planning and the corridor pass that realises each edge.

use crate::types::Pos;

use super::config::{LinkParams, TerrainTable};
use super::grid::GridBuilder;
use super::seed::GenRng;
use super::tunnel::{CarveRule, carve_path};

/// Undirected link between two hub indices, stored as `(min, max)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge {
    pub a: usize,
    pub b: usize,
}

impl Edge {
    pub fn new(first: usize, second: usize) -> Self {
        Self { a: first.min(second), b: first.max(second) }
    }
}

struct DisjointSet {
    parent: Vec<usize>,
}

impl DisjointSet {
    fn new(len: usize) -> Self {
        Self { parent: (0..len).collect() }
    }

    fn find(&mut self, mut node: usize) -> usize {
        while self.parent[node] != node {
            self.parent[node] = self.parent[self.parent[node]];
            node = self.parent[node];
        }
        node
    }

    /// Returns `false` when both nodes already shared a root.
    fn union(&mut self, left: usize, right: usize) -> bool {
        let left_root = self.find(left);
        let right_root = self.find(right);
        if left_root == right_root {
            return false;
        }
        self.parent[right_root] = left_root;
        true
    }
}

/// Plans which hubs get linked.
///
/// Every regular hub links to its nearest `k` hubs (`k` drawn from
/// `params.links_per_hub`), then `params.extra_edges` random pairs are added
/// for loops. Components left apart are merged through their shortest
/// crossing edge, and the special hub, if any, is linked to its nearest
/// regular hub last.
pub fn plan_links(
    hubs: &[Pos],
    special: Option<usize>,
    params: &LinkParams,
    rng: &mut GenRng,
) -> Vec<Edge> {
    let regular: Vec<usize> = (0..hubs.len()).filter(|&index| Some(index) != special).collect();
    let mut edges: Vec<Edge> = Vec::new();

    for &hub in &regular {
        let wanted = rng.range_usize(params.links_per_hub.min, params.links_per_hub.max);
        let mut neighbours: Vec<usize> =
            regular.iter().copied().filter(|&other| other != hub).collect();
        neighbours.sort_by_key(|&other| (hubs[hub].distance_squared(hubs[other]), other));

        let mut added = 0;
        for other in neighbours {
            if added >= wanted {
                break;
            }
            if push_edge(&mut edges, Edge::new(hub, other)) {
                added += 1;
            }
        }
    }

    if regular.len() >= 2 {
        for _ in 0..params.extra_edges {
            let first = regular[rng.index(regular.len())];
            let second = regular[rng.index(regular.len())];
            push_edge(&mut edges, Edge::new(first, second));
        }
    }

    let mut components = DisjointSet::new(hubs.len());
    for edge in &edges {
        components.union(edge.a, edge.b);
    }
    while let Some(bridge) = shortest_crossing_edge(hubs, &regular, &mut components) {
        components.union(bridge.a, bridge.b);
        push_edge(&mut edges, bridge);
    }

    if let Some(special) = special
        && let Some(&nearest) = regular
            .iter()
            .min_by_key(|&&other| (hubs[special].distance_squared(hubs[other]), other))
    {
        push_edge(&mut edges, Edge::new(special, nearest));
    }
    edges
}

fn push_edge(edges: &mut Vec<Edge>, edge: Edge) -> bool {
    if edge.a == edge.b || edges.contains(&edge) {
        return false;
    }
    edges.push(edge);
    true
}

fn shortest_crossing_edge(
    hubs: &[Pos],
    regular: &[usize],
    components: &mut DisjointSet,
) -> Option<Edge> {
    let mut best: Option<(i64, Edge)> = None;
    for (position, &first) in regular.iter().enumerate() {
        for &second in &regular[position + 1..] {
            if components.find(first) == components.find(second) {
                continue;
            }
            let candidate = (hubs[first].distance_squared(hubs[second]), Edge::new(first, second));
            if best.is_none_or(|current| candidate < current) {
                best = Some(candidate);
            }
        }
    }
    best.map(|(_, edge)| edge)
}

/// Carves one corridor per edge with a width drawn from `params.width`.
pub fn carve_links(
    grid: &mut GridBuilder,
    rng: &mut GenRng,
    hubs: &[Pos],
    edges: &[Edge],
    params: &LinkParams,
    table: &TerrainTable,
    margin: i32,
) {
    for edge in edges {
        let width = rng.range_i32(params.width.min, params.width.max);
        let rule =
            CarveRule::corridor(table.corridor, width, params.windiness, table.link_protected())
                .with_margin(margin);
        carve_path(grid, rng, hubs[edge.a], hubs[edge.b], &rule);
    }
}
