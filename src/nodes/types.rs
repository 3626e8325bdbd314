//! Data types that flow through sockets and the registry relating them

use std::collections::HashSet;
use std::fmt;

use log::warn;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::port::{PortType, Socket};

/// Data types that can flow through data sockets
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    /// Floating point number
    Float,
    /// Signed integer
    Integer,
    /// 3D vector (x, y, z)
    Vector,
    /// Boolean value
    Boolean,
    /// Text string
    Text,
    /// Opaque object handle
    Object,
    /// Homogeneous list of another data type
    List(Box<DataType>),
}

impl DataType {
    /// Wrap a type into a list of that type
    pub fn list_of(element: DataType) -> Self {
        DataType::List(Box::new(element))
    }

    /// Element type if this is a list
    pub fn element(&self) -> Option<&DataType> {
        match self {
            DataType::List(element) => Some(element),
            _ => None,
        }
    }

    /// Get a human-readable name for this data type
    pub fn name(&self) -> String {
        match self {
            DataType::Float => "Float".to_string(),
            DataType::Integer => "Integer".to_string(),
            DataType::Vector => "Vector".to_string(),
            DataType::Boolean => "Boolean".to_string(),
            DataType::Text => "Text".to_string(),
            DataType::Object => "Object".to_string(),
            DataType::List(element) => format!("{} List", element.name()),
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// Type information a socket declaration needs from the host.
pub trait TypeRegistry {
    /// List type derived from a base type
    fn to_list(&self, base: &DataType) -> DataType;

    /// Whether the type is a registered base type
    fn is_base(&self, data_type: &DataType) -> bool;

    /// Whether the type is a list of a registered base type
    fn is_list(&self, data_type: &DataType) -> bool;

    /// Symmetric link compatibility between two data types
    fn is_link_allowed(&self, from: &DataType, to: &DataType) -> bool;

    /// Materialize one concrete data socket
    fn build(&self, data_type: &DataType, port_type: PortType, name: &str, identifier: &str) -> Socket {
        Socket::data(data_type.clone(), port_type, name, identifier)
    }
}

/// Default type registry: registered base types, their lists and the
/// implicit conversions allowed between them.
#[derive(Debug, Clone, Default)]
pub struct TypeInfos {
    base_types: Vec<DataType>,
    implicit_conversions: HashSet<(DataType, DataType)>,
}

impl TypeInfos {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the standard base types and Float/Integer conversions
    pub fn with_defaults() -> Self {
        let mut infos = Self::new();
        for base in [
            DataType::Float,
            DataType::Integer,
            DataType::Vector,
            DataType::Boolean,
            DataType::Text,
            DataType::Object,
        ] {
            infos.insert_base(base);
        }
        infos.add_implicit_conversion(DataType::Float, DataType::Integer);
        infos
    }

    /// Register a base type. Lists cannot be base types.
    pub fn insert_base(&mut self, data_type: DataType) -> bool {
        if data_type.element().is_some() {
            warn!("Refusing to register list type {} as a base type", data_type);
            return false;
        }
        if self.base_types.contains(&data_type) {
            return false;
        }
        self.base_types.push(data_type);
        true
    }

    /// Allow links between two base types and between their lists
    pub fn add_implicit_conversion(&mut self, from: DataType, to: DataType) {
        let list_pair = (self.to_list(&from), self.to_list(&to));
        self.implicit_conversions.insert((from, to));
        self.implicit_conversions.insert(list_pair);
    }

    /// All registered base types in registration order
    pub fn base_types(&self) -> &[DataType] {
        &self.base_types
    }
}

impl TypeRegistry for TypeInfos {
    fn to_list(&self, base: &DataType) -> DataType {
        DataType::list_of(base.clone())
    }

    fn is_base(&self, data_type: &DataType) -> bool {
        self.base_types.contains(data_type)
    }

    fn is_list(&self, data_type: &DataType) -> bool {
        data_type.element().is_some_and(|element| self.is_base(element))
    }

    fn is_link_allowed(&self, from: &DataType, to: &DataType) -> bool {
        if from == to {
            return true;
        }
        let forward = (from.clone(), to.clone());
        let backward = (to.clone(), from.clone());
        self.implicit_conversions.contains(&forward) || self.implicit_conversions.contains(&backward)
    }
}

static TYPE_INFOS: Lazy<TypeInfos> = Lazy::new(TypeInfos::with_defaults);

/// Process-wide default registry
pub fn type_infos() -> &'static TypeInfos {
    &TYPE_INFOS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        let infos = TypeInfos::with_defaults();
        assert!(infos.is_base(&DataType::Float));
        assert!(!infos.is_list(&DataType::Float));

        let float_list = infos.to_list(&DataType::Float);
        assert_eq!(float_list, DataType::list_of(DataType::Float));
        assert!(infos.is_list(&float_list));
        assert!(!infos.is_base(&float_list));

        // Nested lists are neither base nor list
        let nested = DataType::list_of(float_list);
        assert!(!infos.is_base(&nested));
        assert!(!infos.is_list(&nested));
    }

    #[test]
    fn test_unregistered_types() {
        let infos = TypeInfos::new();
        assert!(!infos.is_base(&DataType::Float));
        assert!(!infos.is_list(&DataType::list_of(DataType::Float)));
    }

    #[test]
    fn test_insert_base_rejects_lists() {
        let mut infos = TypeInfos::new();
        assert!(infos.insert_base(DataType::Text));
        assert!(!infos.insert_base(DataType::Text));
        assert!(!infos.insert_base(DataType::list_of(DataType::Text)));
        assert_eq!(infos.base_types(), &[DataType::Text]);
    }

    #[test]
    fn test_link_allowed_is_symmetric() {
        let infos = TypeInfos::with_defaults();
        assert!(infos.is_link_allowed(&DataType::Float, &DataType::Float));
        assert!(infos.is_link_allowed(&DataType::Float, &DataType::Integer));
        assert!(infos.is_link_allowed(&DataType::Integer, &DataType::Float));
        assert!(infos.is_link_allowed(
            &DataType::list_of(DataType::Integer),
            &DataType::list_of(DataType::Float)
        ));
        assert!(!infos.is_link_allowed(&DataType::Float, &DataType::Text));
        assert!(!infos.is_link_allowed(&DataType::Float, &DataType::list_of(DataType::Float)));
    }

    #[test]
    fn test_names() {
        assert_eq!(DataType::Float.to_string(), "Float");
        assert_eq!(DataType::list_of(DataType::Vector).to_string(), "Vector List");
    }

    #[test]
    fn test_build_materializes_data_socket() {
        let socket = type_infos().build(&DataType::Boolean, PortType::Input, "", "abc");
        assert_eq!(socket.identifier, "abc");
        assert_eq!(socket.data_type(), Some(&DataType::Boolean));
        assert!(socket.is_input());
    }
}
