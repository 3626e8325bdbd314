//! Node types and socket reconciliation
//!
//! A node's sockets are derived data: each side is the concatenation of what
//! its declarations build. Sockets are not persisted; loading a node and
//! calling [`Node::refresh`] restores them.

use log::debug;
use serde::{Deserialize, Serialize};

use super::declaration::{Declaration, DrawContext, PackListDecl, Relink, SocketDecl};
use super::port::{PortType, Socket, SocketRef};
use super::types::TypeRegistry;
use crate::interface::UIElement;

/// Unique identifier for a node
pub type NodeId = usize;

/// Core node structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    /// Unique name within the tree, used by operators to address the node
    pub name: String,
    pub title: String,
    input_decls: Vec<Declaration>,
    output_decls: Vec<Declaration>,
    #[serde(skip)]
    pub inputs: Vec<Socket>,
    #[serde(skip)]
    pub outputs: Vec<Socket>,
}

impl Node {
    /// Creates a node without declarations
    pub fn new(id: NodeId, name: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            title: title.into(),
            input_decls: vec![],
            output_decls: vec![],
            inputs: vec![],
            outputs: vec![],
        }
    }

    /// Adds an input declaration
    pub fn with_input(mut self, decl: impl Into<Declaration>) -> Self {
        self.input_decls.push(decl.into());
        self
    }

    /// Adds an output declaration
    pub fn with_output(mut self, decl: impl Into<Declaration>) -> Self {
        self.output_decls.push(decl.into());
        self
    }

    pub fn declarations(&self, port_type: PortType) -> &[Declaration] {
        match port_type {
            PortType::Input => &self.input_decls,
            PortType::Output => &self.output_decls,
        }
    }

    pub fn sockets(&self, port_type: PortType) -> &[Socket] {
        match port_type {
            PortType::Input => &self.inputs,
            PortType::Output => &self.outputs,
        }
    }

    /// Initialize all declarations and build sockets. Call once, at creation.
    pub fn init(&mut self, registry: &dyn TypeRegistry) {
        for decl in self.input_decls.iter_mut().chain(self.output_decls.iter_mut()) {
            decl.init();
        }
        self.rebuild(registry);
    }

    /// Regenerate every socket from the declarations
    pub fn rebuild(&mut self, registry: &dyn TypeRegistry) {
        self.inputs = Self::build_side(&self.input_decls, registry, PortType::Input);
        self.outputs = Self::build_side(&self.output_decls, registry, PortType::Output);
        debug!(
            "Rebuilt node '{}' with {} inputs and {} outputs",
            self.name,
            self.inputs.len(),
            self.outputs.len()
        );
    }

    fn build_side(decls: &[Declaration], registry: &dyn TypeRegistry, port_type: PortType) -> Vec<Socket> {
        let capacity = decls.iter().map(|decl| decl.amount()).sum();
        let mut sockets = Vec::with_capacity(capacity);
        for decl in decls {
            sockets.extend(decl.build(registry, port_type));
        }
        sockets
    }

    /// Whether the live sockets match the declarations
    pub fn validate(&self) -> bool {
        Self::validate_side(&self.input_decls, &self.inputs)
            && Self::validate_side(&self.output_decls, &self.outputs)
    }

    fn validate_side(decls: &[Declaration], sockets: &[Socket]) -> bool {
        let expected: usize = decls.iter().map(|decl| decl.amount()).sum();
        if sockets.len() != expected {
            return false;
        }
        let mut start = 0;
        for decl in decls {
            let end = start + decl.amount();
            if !decl.validate(&sockets[start..end]) {
                return false;
            }
            start = end;
        }
        true
    }

    /// Rebuild only when the live sockets are stale. Returns whether it rebuilt.
    pub fn refresh(&mut self, registry: &dyn TypeRegistry) -> bool {
        if self.validate() {
            return false;
        }
        self.rebuild(registry);
        true
    }

    pub fn find_socket(&self, identifier: &str, is_output: bool) -> Option<&Socket> {
        self.sockets(PortType::from_is_output(is_output))
            .iter()
            .find(|socket| socket.identifier == identifier)
    }

    /// Reference to a live socket on this node
    pub fn socket_ref(&self, identifier: &str, is_output: bool) -> Option<SocketRef> {
        self.find_socket(identifier, is_output)
            .map(|socket| socket.to_ref(self.id))
    }

    /// Declaration index and local socket index for a live socket
    pub fn declaration_for_socket(&self, port_type: PortType, identifier: &str) -> Option<(usize, usize)> {
        let position = self
            .sockets(port_type)
            .iter()
            .position(|socket| socket.identifier == identifier)?;

        let mut start = 0;
        for (decl_index, decl) in self.declarations(port_type).iter().enumerate() {
            let end = start + decl.amount();
            if position < end {
                return Some((decl_index, position - start));
            }
            start = end;
        }
        None
    }

    /// Pack list declaration persisted under `prop_name`, on either side
    pub fn pack_list(&self, prop_name: &str) -> Option<&PackListDecl> {
        self.input_decls
            .iter()
            .chain(self.output_decls.iter())
            .filter_map(Declaration::as_pack_list)
            .find(|decl| decl.prop_name() == prop_name)
    }

    pub fn pack_list_mut(&mut self, prop_name: &str) -> Option<&mut PackListDecl> {
        self.input_decls
            .iter_mut()
            .chain(self.output_decls.iter_mut())
            .filter_map(Declaration::as_pack_list_mut)
            .find(|decl| decl.prop_name() == prop_name)
    }

    /// Hand a connector drop to the declaration owning the connector socket
    pub fn operator_socket_call(
        &mut self,
        registry: &dyn TypeRegistry,
        own_socket: &SocketRef,
        linked_socket: &SocketRef,
        connected_sockets: &[Socket],
    ) -> Option<Relink> {
        let port_type = own_socket.port_type;
        let (decl_index, _) = self.declaration_for_socket(port_type, &own_socket.identifier)?;
        let own = self.find_socket(&own_socket.identifier, port_type.is_output())?.clone();
        if !own.is_operator() {
            return None;
        }

        let decls = match port_type {
            PortType::Input => &mut self.input_decls,
            PortType::Output => &mut self.output_decls,
        };
        decls[decl_index].operator_socket_call(registry, &own, linked_socket, connected_sockets)
    }

    /// UI rows for every socket on one side, delegated to the owning declarations
    pub fn draw_sockets(&self, tree_name: &str, port_type: PortType) -> Vec<UIElement> {
        let ctx = DrawContext {
            tree_name,
            node_name: &self.name,
        };
        let sockets = self.sockets(port_type);
        let mut elements = Vec::with_capacity(sockets.len());
        let mut start = 0;
        for decl in self.declarations(port_type) {
            let end = (start + decl.amount()).min(sockets.len());
            for (index, socket) in sockets[start..end].iter().enumerate() {
                elements.push(decl.draw_socket(ctx, socket, index));
            }
            start = end;
        }
        elements
    }
}
