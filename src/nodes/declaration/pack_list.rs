//! Pack list declaration: a user-sized run of base or list sockets
//!
//! The declaration owns its slot store. Every slot becomes one data socket,
//! typed with the base type or its list type, and a connector socket always
//! closes the run. Dropping a link on the connector grows the store by one
//! slot whose kind follows the type of the dropped endpoint.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::{data_socket_test, DrawContext, Relink, SocketDecl};
use crate::constants::socket::{DATA_SOCKET_GROUP_LABEL, OPERATOR_SOCKET_LABEL};
use crate::constants::ui::{ADD_ICON, NEW_INPUT_TEXT, REMOVE_ICON};
use crate::error::Result;
use crate::interface::UIElement;
use crate::nodes::port::{PortType, Socket, SocketRef};
use crate::nodes::slots::{Slot, SlotKind, SlotStore};
use crate::nodes::types::{DataType, TypeRegistry};
use crate::operators::{NewPackListInput, OperatorCall, RemovePackListInput};

fn default_amount() -> usize {
    2
}

/// Parameters of a pack list declaration as they appear in node definitions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackListConfig {
    /// Suffix appended to every slot identity to form socket identifiers
    pub identifier: String,
    /// Property name the slot store is persisted and addressed under
    pub prop_name: String,
    pub base_type: DataType,
    #[serde(default = "default_amount")]
    pub default_amount: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackListDecl {
    identifier_suffix: String,
    prop_name: String,
    base_type: DataType,
    list_type: DataType,
    default_amount: usize,
    slots: SlotStore,
}

impl PackListDecl {
    pub fn new(
        identifier: impl Into<String>,
        prop_name: impl Into<String>,
        base_type: DataType,
        default_amount: usize,
        registry: &dyn TypeRegistry,
    ) -> Self {
        let list_type = registry.to_list(&base_type);
        Self {
            identifier_suffix: identifier.into(),
            prop_name: prop_name.into(),
            base_type,
            list_type,
            default_amount,
            slots: SlotStore::new(),
        }
    }

    pub fn from_config(config: PackListConfig, registry: &dyn TypeRegistry) -> Self {
        Self::new(
            config.identifier,
            config.prop_name,
            config.base_type,
            config.default_amount,
            registry,
        )
    }

    pub fn identifier_suffix(&self) -> &str {
        &self.identifier_suffix
    }

    pub fn prop_name(&self) -> &str {
        &self.prop_name
    }

    pub fn base_type(&self) -> &DataType {
        &self.base_type
    }

    pub fn list_type(&self) -> &DataType {
        &self.list_type
    }

    pub fn default_amount(&self) -> usize {
        self.default_amount
    }

    pub fn slots(&self) -> &SlotStore {
        &self.slots
    }

    /// Identifier of the socket built for a slot
    pub fn socket_identifier(&self, slot: &Slot) -> String {
        slot.identifier(&self.identifier_suffix)
    }

    /// Identifier of the trailing connector socket
    pub fn operator_identifier(&self) -> String {
        format!("{}{}", OPERATOR_SOCKET_LABEL, self.identifier_suffix)
    }

    fn data_type_for(&self, kind: SlotKind) -> &DataType {
        match kind {
            SlotKind::Base => &self.base_type,
            SlotKind::List => &self.list_type,
        }
    }

    /// Append a slot of the given kind and return its socket identifier.
    /// The owner must rebuild the node afterwards.
    pub fn append(&mut self, kind: SlotKind) -> String {
        let identifier = self.slots.push(kind).identifier(&self.identifier_suffix);
        debug!("Pack list '{}' appended {:?} slot {}", self.prop_name, kind, identifier);
        identifier
    }

    /// Explicit add from the UI: always a base slot
    pub fn add_input(&mut self) -> String {
        self.append(SlotKind::Base)
    }

    /// Explicit remove by position. The owner must rebuild the node afterwards.
    pub fn remove_input(&mut self, index: usize) -> Result<Slot> {
        let slot = self.slots.remove(index)?;
        debug!("Pack list '{}' removed slot {} at {}", self.prop_name, slot.identity, index);
        Ok(slot)
    }

    fn remove_call(&self, ctx: DrawContext<'_>, index: usize) -> OperatorCall {
        OperatorCall::RemovePackListInput(RemovePackListInput {
            tree_name: ctx.tree_name.to_string(),
            node_name: ctx.node_name.to_string(),
            prop_name: self.prop_name.clone(),
            index,
        })
    }

    fn new_input_call(&self, ctx: DrawContext<'_>) -> OperatorCall {
        OperatorCall::NewPackListInput(NewPackListInput {
            tree_name: ctx.tree_name.to_string(),
            node_name: ctx.node_name.to_string(),
            prop_name: self.prop_name.clone(),
        })
    }
}

impl SocketDecl for PackListDecl {
    fn init(&mut self) {
        for _ in 0..self.default_amount {
            self.slots.push(SlotKind::Base);
        }
    }

    fn build(&self, registry: &dyn TypeRegistry, port_type: PortType) -> Vec<Socket> {
        let mut sockets = Vec::with_capacity(self.amount());
        for slot in &self.slots {
            sockets.push(registry.build(
                self.data_type_for(slot.kind),
                port_type,
                DATA_SOCKET_GROUP_LABEL,
                &self.socket_identifier(slot),
            ));
        }
        sockets.push(Socket::operator(port_type, self.operator_identifier()));
        sockets
    }

    fn validate(&self, sockets: &[Socket]) -> bool {
        let Some((last, data_sockets)) = sockets.split_last() else {
            return false;
        };
        if data_sockets.len() != self.slots.len() {
            return false;
        }

        for (socket, slot) in data_sockets.iter().zip(&self.slots) {
            let data_type = self.data_type_for(slot.kind);
            let identifier = self.socket_identifier(slot);
            if !data_socket_test(socket, DATA_SOCKET_GROUP_LABEL, data_type, &identifier) {
                return false;
            }
        }

        last.is_operator()
    }

    fn amount(&self) -> usize {
        self.slots.len() + 1
    }

    fn draw_socket(&self, ctx: DrawContext<'_>, socket: &Socket, index: usize) -> UIElement {
        if socket.is_operator() {
            UIElement::Button {
                text: NEW_INPUT_TEXT.to_string(),
                icon: Some(ADD_ICON),
                call: self.new_input_call(ctx),
            }
        } else {
            UIElement::Row(vec![
                socket.draw_self(index.to_string()),
                UIElement::Button {
                    text: String::new(),
                    icon: Some(REMOVE_ICON),
                    call: self.remove_call(ctx, index),
                },
            ])
        }
    }

    fn operator_socket_call(
        &mut self,
        registry: &dyn TypeRegistry,
        own_socket: &Socket,
        linked_socket: &SocketRef,
        connected_sockets: &[Socket],
    ) -> Option<Relink> {
        let [connected_socket] = connected_sockets else {
            debug!(
                "Pack list '{}' ignoring drop with {} connected sockets",
                self.prop_name,
                connected_sockets.len()
            );
            return None;
        };
        let Some(data_type) = connected_socket.data_type() else {
            debug!("Pack list '{}' ignoring drop from a connector socket", self.prop_name);
            return None;
        };

        let kind = if registry.is_base(data_type) {
            if !registry.is_link_allowed(data_type, &self.base_type) {
                debug!("Pack list '{}' cannot take {} as {}", self.prop_name, data_type, self.base_type);
                return None;
            }
            SlotKind::Base
        } else if registry.is_list(data_type) {
            if !registry.is_link_allowed(data_type, &self.list_type) {
                debug!("Pack list '{}' cannot take {} as {}", self.prop_name, data_type, self.list_type);
                return None;
            }
            SlotKind::List
        } else {
            debug!("Pack list '{}' ignoring unclassified type {}", self.prop_name, data_type);
            return None;
        };

        let identifier = self.append(kind);
        info!("Pack list '{}' grew a {:?} socket from a {} link", self.prop_name, kind, data_type);

        Some(Relink {
            identifier,
            is_output: own_socket.is_output(),
            linked: linked_socket.clone(),
        })
    }
}
