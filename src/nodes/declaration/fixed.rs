//! Declaration for a single socket of a fixed type

use serde::{Deserialize, Serialize};

use super::{data_socket_test, SocketDecl};
use crate::nodes::port::{PortType, Socket};
use crate::nodes::types::{DataType, TypeRegistry};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedSocketDecl {
    identifier: String,
    name: String,
    data_type: DataType,
}

impl FixedSocketDecl {
    pub fn new(identifier: impl Into<String>, name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            identifier: identifier.into(),
            name: name.into(),
            data_type,
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn data_type(&self) -> &DataType {
        &self.data_type
    }
}

impl SocketDecl for FixedSocketDecl {
    fn build(&self, registry: &dyn TypeRegistry, port_type: PortType) -> Vec<Socket> {
        vec![registry.build(&self.data_type, port_type, &self.name, &self.identifier)]
    }

    fn validate(&self, sockets: &[Socket]) -> bool {
        match sockets {
            [socket] => data_socket_test(socket, &self.name, &self.data_type, &self.identifier),
            _ => false,
        }
    }

    fn amount(&self) -> usize {
        1
    }
}
