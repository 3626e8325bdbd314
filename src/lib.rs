//! Nodle pack lists
//!
//! Dynamic-arity socket declarations for node graphs. A pack list lets the
//! user grow or shrink a run of input sockets, each carrying either a base
//! value or a list of base values, while keeping every socket's identifier,
//! and therefore its links, stable across rebuilds.

pub mod constants;
pub mod error;
pub mod interface;
pub mod nodes;
pub mod operators;
pub mod workspace;

// Re-export commonly used types
pub use error::{PackListError, Result};
pub use interface::UIElement;
pub use nodes::{
    type_infos, DataType, Declaration, FixedSocketDecl, Node, NodeGraph, NodeId, PackListConfig, PackListDecl,
    PortType, Slot, SlotKind, SlotStore, Socket, SocketDecl, SocketRef, TypeInfos, TypeRegistry,
};
pub use operators::{NewPackListInput, Operator, OperatorCall, RemovePackListInput};
pub use workspace::Workspace;
