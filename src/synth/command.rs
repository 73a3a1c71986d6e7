//! The flat synthesis dialect: one shell-command fragment per node, with
//! adjacent stream-linked fragments concatenated into single command
//! strings. This is the dialect the task-chain front end executes directly.

use crate::flow::{Node, NodeKind, ToolSpec};

/// How a fragment attaches to its neighbors in the chain.
enum Linkage {
    /// Merges with the following node's fragment (`cat path | ...`).
    Forward,
    /// Appends to the previous command (`... > path`).
    Backward,
    /// Stands alone unless a neighbor pulls it in.
    None,
}

struct Fragment {
    text: String,
    linkage: Linkage,
}

fn fragment(node: &Node) -> Fragment {
    match &node.kind {
        NodeKind::FileInput { path } => Fragment {
            text: format!("cat {path} | "),
            linkage: Linkage::Forward,
        },
        NodeKind::FileOutput { path } => Fragment {
            text: format!(" > {path}"),
            linkage: Linkage::Backward,
        },
        NodeKind::Tool(tool) => Fragment {
            text: tool_command(tool),
            linkage: Linkage::None,
        },
        // Value carriers are pruned during normalization; a chain that still
        // contains one contributes nothing to the command line.
        NodeKind::Value(_) => Fragment {
            text: String::new(),
            linkage: Linkage::None,
        },
    }
}

/// Renders a tool invocation: the command path followed by its active ports
/// in declaration order. Ports named like `arg` render as bare values,
/// everything else as `--<name> <value>`; boolean values render as an empty
/// token.
fn tool_command(tool: &ToolSpec) -> String {
    let mut command = format!("{} ", tool.path);
    for port in tool.ports.iter().filter(|p| p.is_active()) {
        let value = port.value.as_ref().map(|v| v.render()).unwrap_or_default();
        if port.is_positional() {
            command.push_str(&format!("{value} "));
        } else {
            command.push_str(&format!("--{} {} ", port.name, value));
        }
    }
    command
}

/// Synthesizes the linear node chain into a sequence of shell commands, one
/// per connected group: a `FileInput` merges with its successor, a
/// `FileOutput` appends to the command before it.
pub fn flat_commands(ordered: &[&Node]) -> Vec<String> {
    let mut commands: Vec<String> = Vec::new();
    let mut skip = false;

    for (idx, node) in ordered.iter().enumerate() {
        if skip {
            skip = false;
            continue;
        }
        let frag = fragment(node);
        match frag.linkage {
            Linkage::Forward => match ordered.get(idx + 1) {
                Some(next) => {
                    commands.push(format!("{}{}", frag.text, fragment(next).text));
                    skip = true;
                }
                // A file input at the end of the chain has nothing to pipe
                // into; emit it on its own.
                None => commands.push(frag.text),
            },
            Linkage::Backward => match commands.last_mut() {
                Some(last) => last.push_str(&frag.text),
                None => commands.push(frag.text),
            },
            Linkage::None => commands.push(frag.text),
        }
    }

    commands
}

/// The whole pipeline as one shell invocation, commands chained so each
/// runs only after its predecessor succeeded.
pub fn pipeline_string(ordered: &[&Node]) -> String {
    flat_commands(ordered).join(" && ")
}
