//! Operators exposed to the editor UI
//!
//! Each operator addresses its pack list by tree name, node name and the
//! declaration's property name, mutates the slot store, then refreshes the
//! node so the live sockets and links follow.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::constants::operator::{
    NEW_PACK_LIST_INPUT, NEW_PACK_LIST_INPUT_LABEL, REMOVE_PACK_LIST_INPUT, REMOVE_PACK_LIST_INPUT_LABEL,
};
use crate::error::{PackListError, Result};
use crate::workspace::Workspace;

/// An action the editor can run against a workspace
pub trait Operator {
    /// Stable name the operator is registered under
    fn idname(&self) -> &'static str;

    /// Human-readable label
    fn label(&self) -> &'static str;

    fn execute(&self, workspace: &mut Workspace) -> Result<()>;
}

/// Appends a base slot to a pack list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPackListInput {
    pub tree_name: String,
    pub node_name: String,
    pub prop_name: String,
}

impl Operator for NewPackListInput {
    fn idname(&self) -> &'static str {
        NEW_PACK_LIST_INPUT
    }

    fn label(&self) -> &'static str {
        NEW_PACK_LIST_INPUT_LABEL
    }

    fn execute(&self, workspace: &mut Workspace) -> Result<()> {
        let identifier = workspace.edit_pack_list(&self.tree_name, &self.node_name, &self.prop_name, |decl| {
            Ok(decl.add_input())
        })?;
        debug!("{} added socket {} to '{}'", self.idname(), identifier, self.node_name);
        Ok(())
    }
}

/// Removes the slot at `index` from a pack list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemovePackListInput {
    pub tree_name: String,
    pub node_name: String,
    pub prop_name: String,
    pub index: usize,
}

impl Operator for RemovePackListInput {
    fn idname(&self) -> &'static str {
        REMOVE_PACK_LIST_INPUT
    }

    fn label(&self) -> &'static str {
        REMOVE_PACK_LIST_INPUT_LABEL
    }

    fn execute(&self, workspace: &mut Workspace) -> Result<()> {
        workspace.edit_pack_list(&self.tree_name, &self.node_name, &self.prop_name, |decl| {
            decl.remove_input(self.index).map(|_| ())
        })
    }
}

/// A bound operator call, serialized with its idname as tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "idname")]
pub enum OperatorCall {
    #[serde(rename = "fn.new_pack_list_input")]
    NewPackListInput(NewPackListInput),
    #[serde(rename = "fn.remove_pack_list_input")]
    RemovePackListInput(RemovePackListInput),
}

impl OperatorCall {
    /// Parse a call such as `{"idname": "fn.new_pack_list_input", "tree_name": ...}`
    pub fn from_json(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let idname = value
            .get("idname")
            .and_then(serde_json::Value::as_str)
            .unwrap_or_default();
        if idname != NEW_PACK_LIST_INPUT && idname != REMOVE_PACK_LIST_INPUT {
            return Err(PackListError::UnknownOperator(idname.to_string()));
        }
        Ok(serde_json::from_value(value)?)
    }

    fn operator(&self) -> &dyn Operator {
        match self {
            OperatorCall::NewPackListInput(op) => op,
            OperatorCall::RemovePackListInput(op) => op,
        }
    }
}

impl Operator for OperatorCall {
    fn idname(&self) -> &'static str {
        self.operator().idname()
    }

    fn label(&self) -> &'static str {
        self.operator().label()
    }

    fn execute(&self, workspace: &mut Workspace) -> Result<()> {
        self.operator().execute(workspace)
    }
}
