use nodle_packlist::{
    DataType, FixedSocketDecl, Node, NodeGraph, NodeId, Operator, OperatorCall, PackListDecl, PortType, SlotKind,
    SocketRef, UIElement, Workspace,
};

const TREE: &str = "NodeTree";

fn setup() -> (Workspace, NodeId, NodeId, NodeId) {
    let mut workspace = Workspace::new();
    let registry = workspace.registry().clone();
    let mut tree = NodeGraph::new(TREE);
    let pack = tree.add_node(
        Node::new(0, "Pack", "Pack List")
            .with_input(PackListDecl::new("_values", "values", DataType::Float, 2, &registry))
            .with_output(FixedSocketDecl::new("list", "List", DataType::list_of(DataType::Float))),
        &registry,
    );
    let number = tree.add_node(
        Node::new(0, "Number", "Number").with_output(FixedSocketDecl::new("out", "Out", DataType::Integer)),
        &registry,
    );
    let numbers = tree.add_node(
        Node::new(0, "Numbers", "Numbers")
            .with_output(FixedSocketDecl::new("out", "Out", DataType::list_of(DataType::Float))),
        &registry,
    );
    workspace.insert_tree(tree);
    (workspace, pack, number, numbers)
}

fn connector(workspace: &Workspace, pack: NodeId) -> SocketRef {
    let node = workspace.tree(TREE).unwrap().node(pack).unwrap();
    node.inputs.last().unwrap().to_ref(pack)
}

#[test]
fn drag_add_remove_and_reload() {
    let (mut workspace, pack, number, numbers) = setup();
    let registry = workspace.registry().clone();

    // Drag an integer and a float list onto the connector
    let target = connector(&workspace, pack);
    let tree = workspace.tree_mut(TREE).unwrap();
    tree.drop_link(&SocketRef::new(number, "out", PortType::Output), &target, &registry)
        .unwrap();
    let target = tree.node(pack).unwrap().inputs.last().unwrap().to_ref(pack);
    tree.drop_link(&SocketRef::new(numbers, "out", PortType::Output), &target, &registry)
        .unwrap();

    let node = tree.node(pack).unwrap();
    let kinds: Vec<SlotKind> = node
        .pack_list("values")
        .unwrap()
        .slots()
        .iter()
        .map(|slot| slot.kind)
        .collect();
    assert_eq!(kinds, vec![SlotKind::Base, SlotKind::Base, SlotKind::Base, SlotKind::List]);
    assert_eq!(tree.connections.len(), 2);
    let dropped = node.inputs[2].clone();
    let list_socket = node.inputs[3].clone();

    // The connector row offers "New Input"; run the bound call
    let rows = node.draw_sockets(TREE, PortType::Input);
    let call = match rows.last() {
        Some(UIElement::Button { call, .. }) => call.clone(),
        other => panic!("expected connector button, got {:?}", other),
    };
    call.execute(&mut workspace).unwrap();
    let node = workspace.tree(TREE).unwrap().node(pack).unwrap();
    assert_eq!(node.inputs.len(), 6);
    assert!(node.validate());

    // Remove the first data socket through a JSON call
    let remove = OperatorCall::from_json(&format!(
        r#"{{"idname": "fn.remove_pack_list_input", "tree_name": "{}", "node_name": "Pack",
            "prop_name": "values", "index": 0}}"#,
        TREE
    ))
    .unwrap();
    remove.execute(&mut workspace).unwrap();

    let tree = workspace.tree(TREE).unwrap();
    let node = tree.node(pack).unwrap();
    assert_eq!(node.inputs[1], dropped);
    assert_eq!(node.inputs[2], list_socket);
    assert_eq!(tree.connections.len(), 2);

    // Links and identities survive a save/load round trip
    let path = std::env::temp_dir().join(format!("packlist-workflow-{}.json", std::process::id()));
    workspace.save(&path).unwrap();
    let loaded = Workspace::load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    let tree = loaded.tree(TREE).unwrap();
    let node = tree.node(pack).unwrap();
    assert_eq!(node.inputs[1], dropped);
    assert_eq!(tree.links_on(&list_socket.to_ref(pack)).len(), 1);
    assert_eq!(tree.links_on(&dropped.to_ref(pack)).len(), 1);
}

#[test]
fn every_edit_leaves_node_valid() {
    let (mut workspace, pack, _, _) = setup();
    let add = OperatorCall::from_json(
        r#"{"idname": "fn.new_pack_list_input", "tree_name": "NodeTree",
            "node_name": "Pack", "prop_name": "values"}"#,
    )
    .unwrap();

    for step in 0..12 {
        if step % 3 == 2 {
            let remove = OperatorCall::from_json(&format!(
                r#"{{"idname": "fn.remove_pack_list_input", "tree_name": "NodeTree",
                    "node_name": "Pack", "prop_name": "values", "index": {}}}"#,
                step % 2
            ))
            .unwrap();
            remove.execute(&mut workspace).unwrap();
        } else {
            add.execute(&mut workspace).unwrap();
        }
        let node = workspace.tree(TREE).unwrap().node(pack).unwrap();
        assert!(node.validate(), "node invalid after step {}", step);
        let slots = node.pack_list("values").unwrap().slots().len();
        assert_eq!(node.inputs.len(), slots + 1);
    }
}
