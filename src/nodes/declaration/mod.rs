//! Socket declarations
//!
//! A declaration owns the state behind a contiguous run of sockets on one
//! side of a node. The node concatenates what each declaration builds and
//! asks each declaration to validate its own run before deciding to rebuild.

pub mod fixed;
pub mod pack_list;

pub use fixed::FixedSocketDecl;
pub use pack_list::{PackListConfig, PackListDecl};

use serde::{Deserialize, Serialize};

use super::port::{PortType, Socket, SocketRef};
use super::types::{DataType, TypeRegistry};
use crate::interface::UIElement;

/// Names of the tree and node a declaration is drawn for
#[derive(Debug, Clone, Copy)]
pub struct DrawContext<'a> {
    pub tree_name: &'a str,
    pub node_name: &'a str,
}

/// Message from a declaration that grew after a connector drop.
///
/// The owner rebuilds the node, looks up the socket carrying `identifier`
/// on the connector's side and links `linked` to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relink {
    pub identifier: String,
    pub is_output: bool,
    pub linked: SocketRef,
}

/// Behaviour shared by all socket declarations
pub trait SocketDecl {
    /// Populate initial state. Called once when the node is created.
    fn init(&mut self) {}

    /// Sockets this declaration currently describes, in order
    fn build(&self, registry: &dyn TypeRegistry, port_type: PortType) -> Vec<Socket>;

    /// Whether the live sockets match what `build` would produce
    fn validate(&self, sockets: &[Socket]) -> bool;

    /// Number of sockets `build` produces
    fn amount(&self) -> usize;

    /// UI for one of this declaration's sockets; `index` is local to the declaration
    fn draw_socket(&self, _ctx: DrawContext<'_>, socket: &Socket, _index: usize) -> UIElement {
        socket.draw_self(socket.name.clone())
    }

    /// Called when a link lands on one of this declaration's connector sockets
    fn operator_socket_call(
        &mut self,
        _registry: &dyn TypeRegistry,
        _own_socket: &Socket,
        _linked_socket: &SocketRef,
        _connected_sockets: &[Socket],
    ) -> Option<Relink> {
        None
    }
}

/// Exact-match test for a data socket
pub(crate) fn data_socket_test(socket: &Socket, name: &str, data_type: &DataType, identifier: &str) -> bool {
    socket.data_type() == Some(data_type) && socket.name == name && socket.identifier == identifier
}

/// Any declaration a node can carry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Declaration {
    Fixed(FixedSocketDecl),
    PackList(PackListDecl),
}

impl Declaration {
    pub fn as_pack_list(&self) -> Option<&PackListDecl> {
        match self {
            Declaration::PackList(decl) => Some(decl),
            Declaration::Fixed(_) => None,
        }
    }

    pub fn as_pack_list_mut(&mut self) -> Option<&mut PackListDecl> {
        match self {
            Declaration::PackList(decl) => Some(decl),
            Declaration::Fixed(_) => None,
        }
    }

    fn inner(&self) -> &dyn SocketDecl {
        match self {
            Declaration::Fixed(decl) => decl,
            Declaration::PackList(decl) => decl,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn SocketDecl {
        match self {
            Declaration::Fixed(decl) => decl,
            Declaration::PackList(decl) => decl,
        }
    }
}

impl SocketDecl for Declaration {
    fn init(&mut self) {
        self.inner_mut().init()
    }

    fn build(&self, registry: &dyn TypeRegistry, port_type: PortType) -> Vec<Socket> {
        self.inner().build(registry, port_type)
    }

    fn validate(&self, sockets: &[Socket]) -> bool {
        self.inner().validate(sockets)
    }

    fn amount(&self) -> usize {
        self.inner().amount()
    }

    fn draw_socket(&self, ctx: DrawContext<'_>, socket: &Socket, index: usize) -> UIElement {
        self.inner().draw_socket(ctx, socket, index)
    }

    fn operator_socket_call(
        &mut self,
        registry: &dyn TypeRegistry,
        own_socket: &Socket,
        linked_socket: &SocketRef,
        connected_sockets: &[Socket],
    ) -> Option<Relink> {
        self.inner_mut()
            .operator_socket_call(registry, own_socket, linked_socket, connected_sockets)
    }
}

impl From<FixedSocketDecl> for Declaration {
    fn from(decl: FixedSocketDecl) -> Self {
        Declaration::Fixed(decl)
    }
}

impl From<PackListDecl> for Declaration {
    fn from(decl: PackListDecl) -> Self {
        Declaration::PackList(decl)
    }
}
