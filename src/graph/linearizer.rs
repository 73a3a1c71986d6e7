//! Topological linearization of a normalized flow into a single execution
//! chain.
//!
//! The pipeline model assumes the graph is one directed path: exactly one
//! entry point, every node with at most one outgoing connection, no
//! disconnected pieces. These preconditions are checked explicitly and
//! violations surface as typed [`LinearizeError`]s rather than undefined
//! looping. General DAG support (fan-out/fan-in) is a documented extension
//! point, not silently attempted.

use crate::error::LinearizeError;
use crate::flow::{Flow, Node, NodeId};
use ahash::AHashSet;
use itertools::Itertools;

/// Orders the nodes of a normalized flow into the unique execution chain.
///
/// A flow with a single node and no connections linearizes trivially to
/// that node.
pub fn linearize(flow: &Flow) -> Result<Vec<&Node>, LinearizeError> {
    if flow.nodes.is_empty() {
        return Ok(Vec::new());
    }

    let entry_points = flow.nodes.iter().filter(|n| n.num_inputs == 0).count();
    match entry_points {
        0 => return Err(LinearizeError::NoEntryPoint),
        1 => {}
        count => return Err(LinearizeError::MultipleEntryPoints { count }),
    }

    let by_degree: Vec<&Node> = flow
        .nodes
        .iter()
        .sorted_by_key(|n| n.num_inputs)
        .collect_vec();
    let mut ordered = vec![by_degree[0]];
    let mut placed: AHashSet<NodeId> = AHashSet::from_iter([by_degree[0].id]);

    while ordered.len() < flow.nodes.len() {
        let last = ordered[ordered.len() - 1];
        let outgoing = flow.outgoing(last.id).collect_vec();
        let connection = match outgoing.as_slice() {
            [] => {
                return Err(LinearizeError::Disconnected {
                    node_id: last.id,
                    placed: ordered.len(),
                    total: flow.nodes.len(),
                });
            }
            [single] => *single,
            many => {
                return Err(LinearizeError::BranchingNode {
                    node_id: last.id,
                    count: many.len(),
                });
            }
        };

        let next = flow
            .node(connection.in_id)
            .ok_or(LinearizeError::DanglingConnection {
                out_id: connection.out_id,
                in_id: connection.in_id,
            })?;
        if !placed.insert(next.id) {
            return Err(LinearizeError::CycleDetected { node_id: next.id });
        }
        ordered.push(next);
    }

    Ok(ordered)
}
