//! Node system - graph, node and socket declaration data structures

pub mod declaration;
pub mod graph;
pub mod node;
pub mod port;
pub mod slots;
pub mod types;

// Re-export core types
pub use declaration::{
    Declaration, DrawContext, FixedSocketDecl, PackListConfig, PackListDecl, Relink, SocketDecl,
};
pub use graph::{Connection, NodeGraph};
pub use node::{Node, NodeId};
pub use port::{PortType, Socket, SocketKind, SocketRef};
pub use slots::{Slot, SlotKind, SlotStore};
pub use types::{type_infos, DataType, TypeInfos, TypeRegistry};
