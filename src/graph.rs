//! General adjacency substrate consumed by the graph-topology Hamiltonian.
//!
//! Vertices carry a payload that, for spin systems, is the index in the spin
//! configuration the vertex maps to. An edge's length field stores the
//! coupling constant for its pair of sites.

/// A vertex with a payload and a unique index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vertex {
    index: usize,
    data: usize,
}

impl Vertex {
    pub fn new(index: usize, data: usize) -> Self {
        Self { index, data }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Payload: the spin-array index this vertex maps to.
    pub fn data(&self) -> usize {
        self.data
    }

    pub fn set_data(&mut self, data: usize) {
        self.data = data;
    }
}

/// A weighted edge between two vertex indices. Directed edges traverse only
/// from `start`; undirected edges traverse from either endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    index: usize,
    start: usize,
    end: usize,
    length: f64,
    directed: bool,
}

impl Edge {
    pub fn new(index: usize, start: usize, end: usize, length: f64, directed: bool) -> Self {
        Self {
            index,
            start,
            end,
            length,
            directed,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    /// Edge length, doubling as the spin-coupling constant.
    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn set_length(&mut self, length: f64) {
        self.length = length;
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Whether the edge can be walked starting at `vertex`.
    pub fn can_traverse(&self, vertex: usize) -> bool {
        self.start == vertex || (!self.directed && self.end == vertex)
    }

    /// Step across the edge from `vertex`, yielding the far endpoint and the
    /// edge length. `None` when the edge cannot be walked from there.
    pub fn traverse(&self, vertex: usize) -> Option<(usize, f64)> {
        if self.start == vertex {
            Some((self.end, self.length))
        } else if !self.directed && self.end == vertex {
            Some((self.start, self.length))
        } else {
            None
        }
    }
}

/// Neighbor record from [`Graph::neighbors`]: the far vertex index, the edge
/// weight, and whether the edge is undirected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub vertex: usize,
    pub weight: f64,
    pub undirected: bool,
}

/// A general graph over indexed vertices.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    verts: Vec<Vertex>,
    edges: Vec<Edge>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// `n` vertices whose payload is their own position, the identity
    /// mapping onto spin indices.
    pub fn with_vertices(n: usize) -> Self {
        Self {
            verts: (0..n).map(|i| Vertex::new(i, i)).collect(),
            edges: Vec::new(),
        }
    }

    /// Ring of `n` vertices joined by undirected edges of uniform weight,
    /// the same topology as a periodic chain.
    pub fn cycle(n: usize, coupling: f64) -> Self {
        let mut graph = Self::with_vertices(n);
        for i in 0..n {
            graph.add_edge(i, (i + 1) % n, coupling, false);
        }
        graph
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.verts
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn vertex(&self, index: usize) -> Option<&Vertex> {
        self.verts.get(index)
    }

    pub fn edge(&self, index: usize) -> Option<&Edge> {
        self.edges.get(index)
    }

    /// Append a vertex and return its index.
    pub fn add_vertex(&mut self, data: usize) -> usize {
        let index = self.verts.len();
        self.verts.push(Vertex::new(index, data));
        index
    }

    /// Append an edge between existing vertices and return its index.
    pub fn add_edge(&mut self, start: usize, end: usize, length: f64, directed: bool) -> usize {
        assert!(
            start < self.verts.len() && end < self.verts.len(),
            "edge endpoints must be existing vertices"
        );
        let index = self.edges.len();
        self.edges.push(Edge::new(index, start, end, length, directed));
        index
    }

    /// All vertices reachable from `vertex` in one step, with edge weights.
    /// Both endpoints of an undirected edge report each other.
    pub fn neighbors(&self, vertex: usize) -> Vec<Neighbor> {
        self.edges
            .iter()
            .filter_map(|edge| {
                edge.traverse(vertex).map(|(to, weight)| Neighbor {
                    vertex: to,
                    weight,
                    undirected: !edge.is_directed(),
                })
            })
            .collect()
    }
}

/// Dijkstra's shortest path over edge lengths, returning the vertex path and
/// its total length. A test utility for the graph substrate; the
/// thermodynamic calculations never call it.
pub fn dijkstra(graph: &Graph, start: usize, end: usize) -> Option<(Vec<usize>, f64)> {
    let n = graph.vertices().len();
    if start >= n || end >= n {
        return None;
    }

    let mut dist = vec![f64::INFINITY; n];
    let mut prev = vec![usize::MAX; n];
    let mut done = vec![false; n];
    dist[start] = 0.0;

    loop {
        let mut current = usize::MAX;
        let mut best = f64::INFINITY;
        for v in 0..n {
            if !done[v] && dist[v] < best {
                best = dist[v];
                current = v;
            }
        }
        if current == usize::MAX || current == end {
            break;
        }
        done[current] = true;
        for neighbor in graph.neighbors(current) {
            let alt = dist[current] + neighbor.weight;
            if alt < dist[neighbor.vertex] {
                dist[neighbor.vertex] = alt;
                prev[neighbor.vertex] = current;
            }
        }
    }

    if !dist[end].is_finite() {
        return None;
    }
    let mut path = vec![end];
    let mut current = end;
    while current != start {
        current = prev[current];
        path.push(current);
    }
    path.reverse();
    Some((path, dist[end]))
}
