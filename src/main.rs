//! Nodle pack list runner
//!
//! Headless entry point: loads a workspace file (or seeds a demo one),
//! optionally runs one operator call, prints the sockets and saves.
//!
//! Usage: `nodle-packlist <workspace.json> [<operator-call-json>]`

use std::path::Path;
use std::process::ExitCode;

use log::{error, info};
use nodle_packlist::{
    DataType, FixedSocketDecl, Node, NodeGraph, Operator, OperatorCall, PackListConfig, PackListDecl, PortType,
    Result, Workspace,
};

fn demo_workspace() -> Workspace {
    let mut workspace = Workspace::new();
    let registry = workspace.registry().clone();
    let config = PackListConfig {
        identifier: "_values".to_string(),
        prop_name: "values".to_string(),
        base_type: DataType::Float,
        default_amount: 2,
    };

    let mut tree = NodeGraph::new("NodeTree");
    tree.add_node(
        Node::new(0, "Pack List", "Pack List")
            .with_input(PackListDecl::from_config(config, &registry))
            .with_output(FixedSocketDecl::new("list", "List", DataType::list_of(DataType::Float))),
        &registry,
    );
    workspace.insert_tree(tree);
    workspace
}

fn print_workspace(workspace: &Workspace) {
    for tree in workspace.trees() {
        println!("{}", tree.name);
        let mut nodes: Vec<&Node> = tree.nodes.values().collect();
        nodes.sort_by_key(|node| node.id);
        for node in nodes {
            println!("  {} ({})", node.name, node.title);
            for port_type in [PortType::Input, PortType::Output] {
                let side = if port_type.is_output() { "out" } else { "in" };
                for socket in node.sockets(port_type) {
                    let kind = socket
                        .data_type()
                        .map(|data_type| data_type.to_string())
                        .unwrap_or_else(|| socket.name.clone());
                    println!("    [{}] {:<14} {}", side, kind, socket.identifier);
                }
            }
        }
        println!("  {} links", tree.connections.len());
    }
}

fn run(args: &[String]) -> Result<()> {
    let Some(path) = args.first().map(Path::new) else {
        println!("Usage: nodle-packlist <workspace.json> [<operator-call-json>]");
        return Ok(());
    };

    let mut workspace = if path.exists() {
        Workspace::load(path)?
    } else {
        info!("{} does not exist, starting from the demo workspace", path.display());
        demo_workspace()
    };

    if let Some(json) = args.get(1) {
        let call = OperatorCall::from_json(json)?;
        call.execute(&mut workspace)?;
        info!("Ran {}", call.idname());
    }

    print_workspace(&workspace);
    workspace.save(path)
}

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
