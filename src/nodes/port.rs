//! Socket types and functionality for node connections

use serde::{Deserialize, Serialize};

use super::node::NodeId;
use super::types::DataType;
use crate::constants::socket::OPERATOR_SOCKET_LABEL;
use crate::interface::UIElement;

/// Type of port (input or output)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PortType {
    Input,
    Output,
}

impl PortType {
    /// Side matching an `is_output` flag
    pub fn from_is_output(is_output: bool) -> Self {
        if is_output {
            PortType::Output
        } else {
            PortType::Input
        }
    }

    pub fn is_output(self) -> bool {
        matches!(self, PortType::Output)
    }
}

/// What a socket carries
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SocketKind {
    /// Typed data socket
    Data(DataType),
    /// Untyped connector used as a drop target to grow a declaration
    Operator,
}

/// A concrete socket materialized on a node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Socket {
    pub identifier: String,
    pub name: String,
    pub kind: SocketKind,
    pub port_type: PortType,
}

impl Socket {
    /// Creates a typed data socket
    pub fn data(
        data_type: DataType,
        port_type: PortType,
        name: impl Into<String>,
        identifier: impl Into<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            name: name.into(),
            kind: SocketKind::Data(data_type),
            port_type,
        }
    }

    /// Creates a connector socket
    pub fn operator(port_type: PortType, identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            name: OPERATOR_SOCKET_LABEL.to_string(),
            kind: SocketKind::Operator,
            port_type,
        }
    }

    /// Checks if this socket is an input
    pub fn is_input(&self) -> bool {
        matches!(self.port_type, PortType::Input)
    }

    /// Checks if this socket is an output
    pub fn is_output(&self) -> bool {
        matches!(self.port_type, PortType::Output)
    }

    pub fn is_operator(&self) -> bool {
        matches!(self.kind, SocketKind::Operator)
    }

    /// Data type of a data socket, `None` for connectors
    pub fn data_type(&self) -> Option<&DataType> {
        match &self.kind {
            SocketKind::Data(data_type) => Some(data_type),
            SocketKind::Operator => None,
        }
    }

    /// Reference to this socket on the given node
    pub fn to_ref(&self, node: NodeId) -> SocketRef {
        SocketRef::new(node, self.identifier.clone(), self.port_type)
    }

    /// Default UI for a socket: its identifier with the given text
    pub fn draw_self(&self, text: impl Into<String>) -> UIElement {
        UIElement::Socket {
            identifier: self.identifier.clone(),
            text: text.into(),
        }
    }
}

/// Addresses a socket by node and identifier, independent of its position
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SocketRef {
    pub node: NodeId,
    pub identifier: String,
    pub port_type: PortType,
}

impl SocketRef {
    pub fn new(node: NodeId, identifier: impl Into<String>, port_type: PortType) -> Self {
        Self {
            node,
            identifier: identifier.into(),
            port_type,
        }
    }

    pub fn is_output(&self) -> bool {
        self.port_type.is_output()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_kinds() {
        let data = Socket::data(DataType::Float, PortType::Input, "", "a-in");
        assert!(!data.is_operator());
        assert_eq!(data.data_type(), Some(&DataType::Float));

        let operator = Socket::operator(PortType::Output, "Operator-out");
        assert!(operator.is_operator());
        assert!(operator.is_output());
        assert_eq!(operator.data_type(), None);
        assert_eq!(operator.name, "Operator");
    }

    #[test]
    fn test_port_type_from_flag() {
        assert_eq!(PortType::from_is_output(true), PortType::Output);
        assert_eq!(PortType::from_is_output(false), PortType::Input);
        assert!(!PortType::Input.is_output());
    }
}
