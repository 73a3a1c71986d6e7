//! Common test utilities for building flow graphs and documents.
use flowc::flow::slot;
use flowc::prelude::*;

/// Creates a tool node with the given id, command path, and ports.
#[allow(dead_code)]
pub fn tool_node(id: i64, path: &str, ports: Vec<Port>) -> Node {
    Node {
        id: NodeId(id),
        kind: NodeKind::Tool(ToolSpec {
            path: path.to_string(),
            ports,
        }),
        num_inputs: 0,
    }
}

/// Creates a string-typed port with a value.
#[allow(dead_code)]
pub fn port(name: &str, value: &str, position: i64) -> Port {
    Port {
        name: name.to_string(),
        port_type: PortType::String,
        value: Some(PortValue::Str(value.to_string())),
        position,
        short_name: None,
    }
}

/// A stream connection: producer's stdout slot into consumer's stdin slot.
#[allow(dead_code)]
pub fn stream_connection(out_id: i64, in_id: i64) -> Connection {
    Connection {
        out_id: NodeId(out_id),
        in_id: NodeId(in_id),
        out_index: slot::STDOUT,
        in_index: slot::STDIN,
    }
}

/// A plain data connection on ordinary parameter slots.
#[allow(dead_code)]
pub fn data_connection(out_id: i64, in_id: i64) -> Connection {
    Connection {
        out_id: NodeId(out_id),
        in_id: NodeId(in_id),
        out_index: 0,
        in_index: 0,
    }
}

/// The canonical 3-node pipeline:
/// `FileInput(/tmp/in.txt) -> grep pattern -> FileOutput(/tmp/out.txt)`,
/// stream-linked end to end.
#[allow(dead_code)]
pub fn three_node_flow() -> Flow {
    Flow {
        nodes: vec![
            Node {
                id: NodeId(1),
                kind: NodeKind::FileInput {
                    path: "/tmp/in.txt".to_string(),
                },
                num_inputs: 0,
            },
            tool_node(2, "/bin/grep", vec![port("arg0", "pattern", 0)]),
            Node {
                id: NodeId(3),
                kind: NodeKind::FileOutput {
                    path: "/tmp/out.txt".to_string(),
                },
                num_inputs: 0,
            },
        ],
        connections: vec![stream_connection(1, 2), stream_connection(2, 3)],
    }
}

/// The raw JSON form of the 3-node pipeline, with presentational positions
/// and a String carrier node wired to the tool, as the editor emits it.
#[allow(dead_code)]
pub fn three_node_document() -> &'static str {
    r#"{
        "nodes": [
            {
                "id": 1,
                "model": { "name": "FileInput", "path": "/tmp/in.txt" },
                "position": { "x": 10.0, "y": 20.0 }
            },
            {
                "id": 2,
                "model": {
                    "name": "ToolNode",
                    "tool": {
                        "path": "/bin/grep",
                        "ports": [
                            {
                                "name": "arg0",
                                "type": "string",
                                "value": "pattern",
                                "position": 0,
                                "shortName": null,
                                "port_index": 0
                            }
                        ]
                    }
                },
                "position": { "x": 200.0, "y": 20.0 }
            },
            {
                "id": 3,
                "model": { "name": "FileOutput", "outputFilePath": "/tmp/out.txt" },
                "position": { "x": 400.0, "y": 20.0 }
            },
            {
                "id": 4,
                "model": { "name": "String", "value": "pattern" },
                "position": { "x": 200.0, "y": 200.0 }
            }
        ],
        "connections": [
            { "out_id": 1, "in_id": 2, "out_index": 4, "in_index": 1 },
            { "out_id": 2, "in_id": 3, "out_index": 4, "in_index": 1 },
            { "out_id": 4, "in_id": 2, "out_index": 0, "in_index": 0 }
        ]
    }"#
}

/// Normalizes and linearizes a flow, panicking on malformed test data.
#[allow(dead_code)]
pub fn normalized_and_ordered(flow: Flow) -> (Flow, Vec<usize>) {
    let flow = normalize(flow);
    let order: Vec<usize> = linearize(&flow)
        .expect("test flow should linearize")
        .iter()
        .map(|n| n.id.0 as usize)
        .collect();
    (flow, order)
}
