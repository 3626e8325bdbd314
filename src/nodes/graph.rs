//! Node graph data structures and operations
//!
//! Connections address sockets by identifier, not by position, so they
//! survive node rebuilds as long as the socket they point at still exists.

use std::collections::HashMap;

use log::{debug, error, info};
use serde::{Deserialize, Serialize};

use super::declaration::Relink;
use super::node::{Node, NodeId};
use super::port::{PortType, Socket, SocketRef};
use super::types::TypeRegistry;
use crate::error::{PackListError, Result};

/// Represents a connection from an output socket to an input socket
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Connection {
    pub from_node: NodeId,
    pub from_socket: String,
    pub to_node: NodeId,
    pub to_socket: String,
}

impl Connection {
    /// Creates a new connection
    pub fn new(
        from_node: NodeId,
        from_socket: impl Into<String>,
        to_node: NodeId,
        to_socket: impl Into<String>,
    ) -> Self {
        Self {
            from_node,
            from_socket: from_socket.into(),
            to_node,
            to_socket: to_socket.into(),
        }
    }

    pub fn from_ref(&self) -> SocketRef {
        SocketRef::new(self.from_node, self.from_socket.clone(), PortType::Output)
    }

    pub fn to_ref(&self) -> SocketRef {
        SocketRef::new(self.to_node, self.to_socket.clone(), PortType::Input)
    }

    /// Whether one end of the connection is the given socket
    pub fn touches(&self, socket: &SocketRef) -> bool {
        match socket.port_type {
            PortType::Output => self.from_node == socket.node && self.from_socket == socket.identifier,
            PortType::Input => self.to_node == socket.node && self.to_socket == socket.identifier,
        }
    }

    /// The end opposite to `socket`
    pub fn other_end(&self, socket: &SocketRef) -> SocketRef {
        match socket.port_type {
            PortType::Output => self.to_ref(),
            PortType::Input => self.from_ref(),
        }
    }
}

/// A named tree containing nodes and their connections
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeGraph {
    pub name: String,
    pub nodes: HashMap<NodeId, Node>,
    pub connections: Vec<Connection>,
    next_node_id: NodeId,
}

impl NodeGraph {
    /// Creates a new empty node graph
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes: HashMap::new(),
            connections: Vec::new(),
            next_node_id: 0,
        }
    }

    /// Adds a freshly created node, initializes its declarations and returns its ID
    pub fn add_node(&mut self, mut node: Node, registry: &dyn TypeRegistry) -> NodeId {
        let id = self.next_node_id;
        node.id = id;
        node.init(registry);
        self.nodes.insert(id, node);
        self.next_node_id += 1;
        id
    }

    /// Removes a node and all its connections
    pub fn remove_node(&mut self, node_id: NodeId) -> Option<Node> {
        self.connections
            .retain(|conn| conn.from_node != node_id && conn.to_node != node_id);
        self.nodes.remove(&node_id)
    }

    pub fn node(&self, node_id: NodeId) -> Option<&Node> {
        self.nodes.get(&node_id)
    }

    pub fn node_mut(&mut self, node_id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&node_id)
    }

    /// Look up a node by its name
    pub fn find_node_id(&self, name: &str) -> Option<NodeId> {
        self.nodes
            .values()
            .find(|node| node.name == name)
            .map(|node| node.id)
    }

    /// Live socket behind a reference
    pub fn socket(&self, socket: &SocketRef) -> Option<&Socket> {
        self.nodes
            .get(&socket.node)?
            .find_socket(&socket.identifier, socket.is_output())
    }

    fn require_socket(&self, socket: &SocketRef) -> Result<&Socket> {
        self.socket(socket).ok_or_else(|| PackListError::SocketNotFound {
            node: socket.node,
            identifier: socket.identifier.clone(),
        })
    }

    /// Links two sockets in either order. An existing link on the input
    /// side is replaced, since inputs hold a single link.
    pub fn new_link(&mut self, a: &SocketRef, b: &SocketRef) -> Result<()> {
        let (from, to) = match (a.port_type, b.port_type) {
            (PortType::Output, PortType::Input) => (a, b),
            (PortType::Input, PortType::Output) => (b, a),
            _ => return Err(PackListError::InvalidLink("both sockets are on the same side")),
        };
        if from.node == to.node {
            return Err(PackListError::InvalidLink("cannot connect a node to itself"));
        }
        self.require_socket(from)?;
        self.require_socket(to)?;

        self.connections.retain(|conn| !conn.touches(to));
        self.connections
            .push(Connection::new(from.node, from.identifier.clone(), to.node, to.identifier.clone()));
        debug!(
            "Linked {}:{} -> {}:{}",
            from.node, from.identifier, to.node, to.identifier
        );
        Ok(())
    }

    /// Connections attached to a socket
    pub fn links_on(&self, socket: &SocketRef) -> Vec<&Connection> {
        self.connections
            .iter()
            .filter(|conn| conn.touches(socket))
            .collect()
    }

    /// Drops connections whose sockets no longer exist on the node
    pub fn prune_links(&mut self, node_id: NodeId) -> usize {
        let Some(node) = self.nodes.get(&node_id) else {
            return 0;
        };
        let before = self.connections.len();
        self.connections.retain(|conn| {
            let from_ok = conn.from_node != node_id || node.find_socket(&conn.from_socket, true).is_some();
            let to_ok = conn.to_node != node_id || node.find_socket(&conn.to_socket, false).is_some();
            from_ok && to_ok
        });
        let removed = before - self.connections.len();
        if removed > 0 {
            debug!("Dropped {} dangling links on node {}", removed, node_id);
        }
        removed
    }

    /// Rebuild a node's sockets and reconcile links by identifier
    pub fn rebuild_node(&mut self, node_id: NodeId, registry: &dyn TypeRegistry) {
        if let Some(node) = self.nodes.get_mut(&node_id) {
            node.rebuild(registry);
            self.prune_links(node_id);
        }
    }

    /// Rebuild a node only if its sockets are stale, then reconcile links
    pub fn refresh_node(&mut self, node_id: NodeId, registry: &dyn TypeRegistry) -> bool {
        let rebuilt = self
            .nodes
            .get_mut(&node_id)
            .is_some_and(|node| node.refresh(registry));
        if rebuilt {
            self.prune_links(node_id);
        }
        rebuilt
    }

    /// Refresh every node, e.g. after loading
    pub fn refresh_all(&mut self, registry: &dyn TypeRegistry) {
        let ids: Vec<NodeId> = self.nodes.keys().copied().collect();
        for node_id in ids {
            self.refresh_node(node_id, registry);
        }
    }

    /// Link two sockets as a user drag would, then run connector handling
    pub fn drop_link(&mut self, a: &SocketRef, b: &SocketRef, registry: &dyn TypeRegistry) -> Result<usize> {
        self.new_link(a, b)?;
        Ok(self.update(registry))
    }

    /// Runs connector handling for every link attached to a connector
    /// socket. Connector links are always removed afterwards; a compatible
    /// drop is moved onto a new socket. Returns the number of sockets grown.
    pub fn update(&mut self, registry: &dyn TypeRegistry) -> usize {
        let mut connectors: Vec<SocketRef> = Vec::new();
        for conn in &self.connections {
            for end in [conn.from_ref(), conn.to_ref()] {
                let is_connector = self.socket(&end).is_some_and(Socket::is_operator);
                if is_connector && !connectors.contains(&end) {
                    connectors.push(end);
                }
            }
        }

        let mut grown = 0;
        for connector in connectors {
            let linked: Vec<SocketRef> = self
                .links_on(&connector)
                .into_iter()
                .map(|conn| conn.other_end(&connector))
                .collect();
            let connected: Vec<Socket> = linked
                .iter()
                .filter_map(|socket| self.socket(socket).cloned())
                .collect();
            self.connections.retain(|conn| !conn.touches(&connector));

            for linked_socket in &linked {
                let Some(node) = self.nodes.get_mut(&connector.node) else {
                    break;
                };
                let Some(relink) = node.operator_socket_call(registry, &connector, linked_socket, &connected) else {
                    continue;
                };
                match self.apply_relink(connector.node, relink, registry) {
                    Ok(()) => grown += 1,
                    Err(err) => error!("Failed to move link off connector {}: {}", connector.identifier, err),
                }
            }
        }
        grown
    }

    fn apply_relink(&mut self, node_id: NodeId, relink: Relink, registry: &dyn TypeRegistry) -> Result<()> {
        self.rebuild_node(node_id, registry);
        let new_socket = self
            .node(node_id)
            .and_then(|node| node.socket_ref(&relink.identifier, relink.is_output))
            .ok_or_else(|| PackListError::SocketNotFound {
                node: node_id,
                identifier: relink.identifier.clone(),
            })?;
        self.new_link(&relink.linked, &new_socket)?;
        info!("Moved connector link onto socket {} of node {}", relink.identifier, node_id);
        Ok(())
    }
}
