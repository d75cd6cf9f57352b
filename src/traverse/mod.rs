//! Iterator-based graph traversals: BFS, DFS, and weighted shortest paths.
//!
//! The iterators yield *original* node ids in visit order, matching the
//! result streams the host-side collaborators consume. Source (and
//! target) ids are validated up front; traversal never starts against an
//! invalid id.

pub mod dijkstra;

pub use dijkstra::{dijkstra, ShortestPaths};

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::graph::{Graph, IdMap};

/// When a traversal stops yielding nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExitCondition {
    /// Visit every reachable node.
    RunToCompletion,
    /// Stop after yielding the given node (original id).
    TargetNode(u64),
    /// Do not descend past the given depth (source is depth 0).
    MaxDepth(u64),
}

/// Resolved exit condition in mapped-id space.
#[derive(Clone, Copy)]
enum Exit {
    Never,
    Target(u64),
    Depth(u64),
}

fn resolve_exit<G: Graph>(graph: &G, exit: ExitCondition) -> Result<Exit> {
    Ok(match exit {
        ExitCondition::RunToCompletion => Exit::Never,
        ExitCondition::TargetNode(original) => Exit::Target(
            graph
                .to_mapped_node_id(original)
                .ok_or(Error::UnknownNodeId(original))?,
        ),
        ExitCondition::MaxDepth(depth) => Exit::Depth(depth),
    })
}

/// Breadth-first traversal yielding original node ids.
pub struct Bfs<'g, G: Graph> {
    graph: &'g G,
    visited: Vec<bool>,
    queue: VecDeque<(u64, u64)>,
    exit: Exit,
    done: bool,
}

impl<'g, G: Graph> Bfs<'g, G> {
    /// Starts a BFS from `source` (original id).
    ///
    /// Fails with [`Error::UnknownNodeId`] if the source — or the target
    /// named by the exit condition — is not in the graph.
    pub fn new(graph: &'g G, source: u64, exit: ExitCondition) -> Result<Self> {
        let mapped = graph
            .to_mapped_node_id(source)
            .ok_or(Error::UnknownNodeId(source))?;
        let exit = resolve_exit(graph, exit)?;
        #[allow(clippy::cast_possible_truncation)]
        let mut visited = vec![false; graph.node_count() as usize];
        #[allow(clippy::cast_possible_truncation)]
        {
            visited[mapped as usize] = true;
        }
        let mut queue = VecDeque::new();
        queue.push_back((mapped, 0));
        Ok(Self {
            graph,
            visited,
            queue,
            exit,
            done: false,
        })
    }
}

impl<G: Graph> Iterator for Bfs<'_, G> {
    type Item = u64;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let (node, depth) = self.queue.pop_front()?;
        match self.exit {
            Exit::Target(target) if node == target => self.done = true,
            Exit::Depth(max) if depth >= max => {
                // At the depth limit: yield but do not expand.
                return Some(self.graph.to_original_node_id(node));
            }
            _ => {}
        }
        if !self.done {
            let visited = &mut self.visited;
            let queue = &mut self.queue;
            self.graph.for_each_relationship(node, &mut |_, target| {
                #[allow(clippy::cast_possible_truncation)]
                let slot = target as usize;
                if !visited[slot] {
                    visited[slot] = true;
                    queue.push_back((target, depth + 1));
                }
                true
            });
        }
        Some(self.graph.to_original_node_id(node))
    }
}

/// Depth-first traversal yielding original node ids.
pub struct Dfs<'g, G: Graph> {
    graph: &'g G,
    visited: Vec<bool>,
    stack: Vec<(u64, u64)>,
    exit: Exit,
    done: bool,
}

impl<'g, G: Graph> Dfs<'g, G> {
    /// Starts a DFS from `source` (original id).
    pub fn new(graph: &'g G, source: u64, exit: ExitCondition) -> Result<Self> {
        let mapped = graph
            .to_mapped_node_id(source)
            .ok_or(Error::UnknownNodeId(source))?;
        let exit = resolve_exit(graph, exit)?;
        #[allow(clippy::cast_possible_truncation)]
        let mut visited = vec![false; graph.node_count() as usize];
        #[allow(clippy::cast_possible_truncation)]
        {
            visited[mapped as usize] = true;
        }
        Ok(Self {
            graph,
            visited,
            stack: vec![(mapped, 0)],
            exit,
            done: false,
        })
    }
}

impl<G: Graph> Iterator for Dfs<'_, G> {
    type Item = u64;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let (node, depth) = self.stack.pop()?;
        match self.exit {
            Exit::Target(target) if node == target => self.done = true,
            Exit::Depth(max) if depth >= max => {
                return Some(self.graph.to_original_node_id(node));
            }
            _ => {}
        }
        if !self.done {
            let visited = &mut self.visited;
            let stack = &mut self.stack;
            self.graph.for_each_relationship(node, &mut |_, target| {
                #[allow(clippy::cast_possible_truncation)]
                let slot = target as usize;
                if !visited[slot] {
                    visited[slot] = true;
                    stack.push((target, depth + 1));
                }
                true
            });
        }
        Some(self.graph.to_original_node_id(node))
    }
}
