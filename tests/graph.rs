//! Tests for graph normalization and topological linearization.
mod common;
use common::*;
use flowc::prelude::*;

#[test]
fn normalize_drops_value_carrier_nodes() {
    let flow = Flow::from_json_str(three_node_document()).expect("document should parse");
    assert_eq!(flow.nodes.len(), 4);

    let flow = normalize(flow);
    assert_eq!(flow.nodes.len(), 3);
    assert!(
        flow.nodes
            .iter()
            .all(|n| !matches!(n.kind, NodeKind::Value(_)))
    );
}

#[test]
fn normalize_leaves_no_dangling_connections() {
    let flow = normalize(Flow::from_json_str(three_node_document()).unwrap());
    for connection in &flow.connections {
        assert!(flow.node(connection.in_id).is_some());
        assert!(flow.node(connection.out_id).is_some());
    }
    // The carrier edge referenced the pruned String node and must be gone.
    assert_eq!(flow.connections.len(), 2);
}

#[test]
fn normalize_computes_in_degrees() {
    let flow = normalize(three_node_flow());
    let degree = |id: i64| flow.node(NodeId(id)).unwrap().num_inputs;
    assert_eq!(degree(1), 0);
    assert_eq!(degree(2), 1);
    assert_eq!(degree(3), 1);
}

#[test]
fn normalize_is_idempotent() {
    let once = normalize(three_node_flow());
    let twice = normalize(once.clone());
    assert_eq!(once, twice);
}

#[test]
fn normalize_retains_recognized_node_without_connections() {
    let flow = Flow {
        nodes: vec![tool_node(7, "/bin/date", vec![])],
        connections: vec![],
    };
    let flow = normalize(flow);
    assert_eq!(flow.nodes.len(), 1);
    assert_eq!(flow.nodes[0].num_inputs, 0);
}

#[test]
fn linearize_orders_the_single_path() {
    let (flow, order) = normalized_and_ordered(three_node_flow());
    assert_eq!(order, vec![1, 2, 3]);

    // Each consecutive pair is joined by exactly one connection.
    for pair in order.windows(2) {
        let count = flow
            .connections
            .iter()
            .filter(|c| c.out_id == NodeId(pair[0] as i64) && c.in_id == NodeId(pair[1] as i64))
            .count();
        assert_eq!(count, 1);
    }
}

#[test]
fn linearize_visits_each_node_exactly_once() {
    let (flow, order) = normalized_and_ordered(three_node_flow());
    assert_eq!(order.len(), flow.nodes.len());
    let mut sorted = order.clone();
    sorted.sort_unstable();
    sorted.dedup();
    assert_eq!(sorted.len(), order.len());
}

#[test]
fn linearize_single_node_is_trivial() {
    let flow = normalize(Flow {
        nodes: vec![tool_node(1, "/bin/date", vec![])],
        connections: vec![],
    });
    let ordered = linearize(&flow).unwrap();
    assert_eq!(ordered.len(), 1);
    assert_eq!(ordered[0].id, NodeId(1));
}

#[test]
fn linearize_rejects_cycles_without_entry_point() {
    let flow = normalize(Flow {
        nodes: vec![tool_node(1, "/bin/a", vec![]), tool_node(2, "/bin/b", vec![])],
        connections: vec![data_connection(1, 2), data_connection(2, 1)],
    });
    assert_eq!(linearize(&flow), Err(LinearizeError::NoEntryPoint));
}

#[test]
fn linearize_rejects_multiple_entry_points() {
    let flow = normalize(Flow {
        nodes: vec![tool_node(1, "/bin/a", vec![]), tool_node(2, "/bin/b", vec![])],
        connections: vec![],
    });
    assert_eq!(
        linearize(&flow),
        Err(LinearizeError::MultipleEntryPoints { count: 2 })
    );
}

#[test]
fn linearize_rejects_disconnected_chain() {
    // 1 -> 2 is a complete chain, but 3 hangs off a self-loop and can
    // never be reached.
    let flow = normalize(Flow {
        nodes: vec![
            tool_node(1, "/bin/a", vec![]),
            tool_node(2, "/bin/b", vec![]),
            tool_node(3, "/bin/c", vec![]),
        ],
        connections: vec![data_connection(1, 2), data_connection(3, 3)],
    });
    match linearize(&flow) {
        Err(LinearizeError::Disconnected { placed, total, .. }) => {
            assert_eq!(placed, 2);
            assert_eq!(total, 3);
        }
        other => panic!("expected Disconnected, got {other:?}"),
    }
}

#[test]
fn linearize_rejects_cycle_reachable_from_the_entry_point() {
    // 1 is a valid entry point, but the chain runs into the 2 -> 3 -> 2
    // loop; the walk must not revisit a placed node. Node 4's self-loop
    // keeps the entry-point count at one.
    let flow = normalize(Flow {
        nodes: vec![
            tool_node(1, "/bin/a", vec![]),
            tool_node(2, "/bin/b", vec![]),
            tool_node(3, "/bin/c", vec![]),
            tool_node(4, "/bin/d", vec![]),
        ],
        connections: vec![
            data_connection(1, 2),
            data_connection(2, 3),
            data_connection(3, 2),
            data_connection(4, 4),
        ],
    });
    assert_eq!(
        linearize(&flow),
        Err(LinearizeError::CycleDetected { node_id: NodeId(2) })
    );
}

#[test]
fn linearize_rejects_branching_nodes() {
    let flow = normalize(Flow {
        nodes: vec![
            tool_node(1, "/bin/a", vec![]),
            tool_node(2, "/bin/b", vec![]),
            tool_node(3, "/bin/c", vec![]),
        ],
        connections: vec![data_connection(1, 2), data_connection(1, 3)],
    });
    assert_eq!(
        linearize(&flow),
        Err(LinearizeError::BranchingNode {
            node_id: NodeId(1),
            count: 2
        })
    );
}

#[test]
fn malformed_document_fails_before_any_processing() {
    let result = Flow::from_json_str(r#"{ "nodes": [ { "id": 1 } ], "connections": [] }"#);
    assert!(matches!(result, Err(FlowError::JsonParseError(_))));

    let unknown_kind = r#"{
        "nodes": [ { "id": 1, "model": { "name": "Teleport", "path": "x" } } ],
        "connections": []
    }"#;
    assert!(matches!(
        Flow::from_json_str(unknown_kind),
        Err(FlowError::JsonParseError(_))
    ));

    let empty_tool_path = r#"{
        "nodes": [
            { "id": 1, "model": { "name": "ToolNode", "tool": { "path": "  ", "ports": [] } } }
        ],
        "connections": []
    }"#;
    assert!(matches!(
        Flow::from_json_str(empty_tool_path),
        Err(FlowError::ValidationError(_))
    ));
}
