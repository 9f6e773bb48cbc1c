//! Dependency graph and topological ordering for extensions.
//!
//! Nodes keep the order in which they were added. Among nodes whose
//! dependencies are all satisfied, the earliest-added one is emitted first,
//! so the order is deterministic and only reorders nodes when a dependency
//! forces it.
//!
//! # Example
//!
//! ```
//! use specgen_extensions::dependency::DependencyGraph;
//!
//! let mut graph = DependencyGraph::new();
//! graph.add_node("python_venv");
//! graph.add_node("core");
//! graph.add_edge("python_venv", "core");
//!
//! let order = graph.topological_sort().unwrap();
//! assert_eq!(order, vec!["core", "python_venv"]);
//! ```

use std::cmp::Reverse;
use std::collections::{BTreeSet, BinaryHeap, HashMap};

use crate::error::{Error, Result};

/// Directed graph of "runs after" relations.
///
/// If A depends on B the edge is `A -> B`, and B sorts before A.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    nodes: Vec<String>,
    index: HashMap<String, usize>,
    /// `edges[i]` holds the nodes `i` depends on.
    edges: Vec<BTreeSet<usize>>,
}

impl DependencyGraph {
    /// Create an empty dependency graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node, returning its position. Adding an existing node is a
    /// no-op that returns the original position.
    pub fn add_node(&mut self, id: impl Into<String>) -> usize {
        let id = id.into();
        if let Some(&existing) = self.index.get(&id) {
            return existing;
        }
        let position = self.nodes.len();
        self.index.insert(id.clone(), position);
        self.nodes.push(id);
        self.edges.push(BTreeSet::new());
        position
    }

    /// Declare that `from` depends on `to`.
    ///
    /// Returns `false` and leaves the graph unchanged if either node is
    /// missing.
    pub fn add_edge(&mut self, from: &str, to: &str) -> bool {
        match (self.index.get(from), self.index.get(to)) {
            (Some(&from), Some(&to)) => {
                self.edges[from].insert(to);
                true
            }
            _ => false,
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.iter().map(BTreeSet::len).sum()
    }

    /// Direct dependencies of a node, in registration order.
    pub fn dependencies_of(&self, id: &str) -> Vec<&str> {
        self.index
            .get(id)
            .map(|&i| self.edges[i].iter().map(|&d| self.nodes[d].as_str()).collect())
            .unwrap_or_default()
    }

    /// Sort nodes dependency-first using Kahn's algorithm.
    ///
    /// # Errors
    ///
    /// Returns `Error::DependencyCycle` naming the nodes that lie on a cycle.
    /// Nodes that merely depend on a cycle, or sit between two cycles, are
    /// not named.
    pub fn topological_sort(&self) -> Result<Vec<&str>> {
        let count = self.nodes.len();
        let mut remaining: Vec<usize> = self.edges.iter().map(BTreeSet::len).collect();
        let dependents = self.dependents();

        let mut ready: BinaryHeap<Reverse<usize>> =
            (0..count).filter(|&i| remaining[i] == 0).map(Reverse).collect();
        let mut order = Vec::with_capacity(count);

        while let Some(Reverse(current)) = ready.pop() {
            order.push(current);
            for &dependent in &dependents[current] {
                remaining[dependent] -= 1;
                if remaining[dependent] == 0 {
                    ready.push(Reverse(dependent));
                }
            }
        }

        if order.len() != count {
            let unsorted: BTreeSet<usize> = (0..count).filter(|&i| remaining[i] > 0).collect();
            return Err(Error::DependencyCycle {
                participants: self.cycle_participants(&unsorted),
            });
        }

        Ok(order.into_iter().map(|i| self.nodes[i].as_str()).collect())
    }

    /// `dependents[i]` holds the nodes that depend on `i`.
    fn dependents(&self) -> Vec<Vec<usize>> {
        let mut dependents = vec![Vec::new(); self.nodes.len()];
        for (from, deps) in self.edges.iter().enumerate() {
            for &to in deps {
                dependents[to].push(from);
            }
        }
        dependents
    }

    /// Nodes of `unsorted` that lie on a cycle, in insertion order.
    ///
    /// A node is on a cycle when its strongly connected component has more
    /// than one node or the node depends on itself.
    fn cycle_participants(&self, unsorted: &BTreeSet<usize>) -> Vec<String> {
        let mut tarjan = Tarjan::new(self.nodes.len());
        for &node in unsorted {
            if tarjan.index[node].is_none() {
                tarjan.visit(node, &self.edges, unsorted);
            }
        }

        let mut on_cycle = BTreeSet::new();
        for component in tarjan.components {
            let cyclic = match component.as_slice() {
                [single] => self.edges[*single].contains(single),
                _ => true,
            };
            if cyclic {
                on_cycle.extend(component);
            }
        }

        on_cycle.into_iter().map(|i| self.nodes[i].clone()).collect()
    }
}

/// Tarjan's strongly connected components, restricted to a node subset.
struct Tarjan {
    next: usize,
    index: Vec<Option<usize>>,
    low: Vec<usize>,
    stack: Vec<usize>,
    on_stack: Vec<bool>,
    components: Vec<Vec<usize>>,
}

impl Tarjan {
    fn new(count: usize) -> Self {
        Self {
            next: 0,
            index: vec![None; count],
            low: vec![0; count],
            stack: Vec::new(),
            on_stack: vec![false; count],
            components: Vec::new(),
        }
    }

    fn visit(&mut self, node: usize, edges: &[BTreeSet<usize>], within: &BTreeSet<usize>) {
        self.index[node] = Some(self.next);
        self.low[node] = self.next;
        self.next += 1;
        self.stack.push(node);
        self.on_stack[node] = true;

        for &dep in &edges[node] {
            if !within.contains(&dep) {
                continue;
            }
            match self.index[dep] {
                None => {
                    self.visit(dep, edges, within);
                    self.low[node] = self.low[node].min(self.low[dep]);
                }
                Some(dep_index) if self.on_stack[dep] => {
                    self.low[node] = self.low[node].min(dep_index);
                }
                Some(_) => {}
            }
        }

        if self.index[node] == Some(self.low[node]) {
            let mut component = Vec::new();
            while let Some(member) = self.stack.pop() {
                self.on_stack[member] = false;
                component.push(member);
                if member == node {
                    break;
                }
            }
            self.components.push(component);
        }
    }
}
