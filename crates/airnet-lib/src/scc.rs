//! Strongly connected components of the flight graph (Tarjan).
//!
//! The depth-first search runs on an explicit work stack so that long chains
//! of airports cannot exhaust the call stack.

use crate::graph::{FlightGraph, NodeHandle};

struct TarjanState {
    index: Vec<Option<usize>>,
    lowlink: Vec<usize>,
    on_stack: Vec<bool>,
    stack: Vec<NodeHandle>,
    next_index: usize,
    components: Vec<Vec<NodeHandle>>,
}

impl TarjanState {
    fn new(node_count: usize) -> Self {
        Self {
            index: vec![None; node_count + 1],
            lowlink: vec![0; node_count + 1],
            on_stack: vec![false; node_count + 1],
            stack: Vec::new(),
            next_index: 0,
            components: Vec::new(),
        }
    }

    fn discover(&mut self, node: NodeHandle) {
        self.index[node] = Some(self.next_index);
        self.lowlink[node] = self.next_index;
        self.next_index += 1;
        self.stack.push(node);
        self.on_stack[node] = true;
    }

    fn pop_component(&mut self, root: NodeHandle) {
        let mut component = Vec::new();
        while let Some(member) = self.stack.pop() {
            self.on_stack[member] = false;
            component.push(member);
            if member == root {
                break;
            }
        }
        self.components.push(component);
    }
}

/// Partition every node of `graph` into strongly connected components.
///
/// Components are emitted in the order Tarjan's algorithm completes them
/// (reverse topological order of the condensation).
pub fn strongly_connected_components(graph: &FlightGraph) -> Vec<Vec<NodeHandle>> {
    let mut state = TarjanState::new(graph.node_count());
    // (node, index of the next outgoing edge to examine)
    let mut work: Vec<(NodeHandle, usize)> = Vec::new();

    for root in graph.handles() {
        if state.index[root].is_some() {
            continue;
        }
        state.discover(root);
        work.push((root, 0));

        while let Some(frame) = work.last_mut() {
            let node = frame.0;
            if let Some(edge) = graph.edges(node).get(frame.1) {
                frame.1 += 1;
                let next = edge.target;
                match state.index[next] {
                    None => {
                        state.discover(next);
                        work.push((next, 0));
                    }
                    Some(next_index) if state.on_stack[next] => {
                        state.lowlink[node] = state.lowlink[node].min(next_index);
                    }
                    Some(_) => {}
                }
                continue;
            }

            work.pop();
            if let Some(&(parent, _)) = work.last() {
                state.lowlink[parent] = state.lowlink[parent].min(state.lowlink[node]);
            }
            if Some(state.lowlink[node]) == state.index[node] {
                state.pop_component(node);
            }
        }
    }

    state.components
}

/// Number of strongly connected components in `graph`.
pub fn scc_count(graph: &FlightGraph) -> usize {
    strongly_connected_components(graph).len()
}
