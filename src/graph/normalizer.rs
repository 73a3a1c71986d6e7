//! Graph normalization: strips value-carrier nodes, prunes dangling
//! connections, and recomputes every node's in-degree.
//!
//! Normalization is idempotent; running it on an already-normalized flow
//! returns the same flow.

use crate::flow::{Flow, NodeKind};
use ahash::AHashSet;

/// Produces the pruned flow the linearizer operates on.
///
/// String/Boolean carrier nodes are removed (their values were folded into
/// the referencing ports upstream), connections with a pruned endpoint are
/// silently dropped, and `num_inputs` is recomputed as the number of
/// connections where the node is the consumer. A recognized node left with
/// no connections at all is retained.
pub fn normalize(flow: Flow) -> Flow {
    let mut nodes: Vec<_> = flow
        .nodes
        .into_iter()
        .filter(|node| !matches!(node.kind, NodeKind::Value(_)))
        .collect();

    let ids: AHashSet<_> = nodes.iter().map(|n| n.id).collect();
    let connections: Vec<_> = flow
        .connections
        .into_iter()
        .filter(|c| ids.contains(&c.in_id) && ids.contains(&c.out_id))
        .collect();

    for node in &mut nodes {
        node.num_inputs = connections.iter().filter(|c| c.in_id == node.id).count();
    }

    Flow { nodes, connections }
}
