//! Workspace: the named node trees being edited, plus their file format
//!
//! Saving writes declarations and links only. Sockets are derived, so
//! loading refreshes every node before handing the workspace back.

use std::collections::BTreeMap;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::constants::file::{CREATOR, FORMAT_VERSION};
use crate::error::{PackListError, Result};
use crate::nodes::{NodeGraph, PackListDecl, TypeInfos};

/// Save file data structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveData {
    pub version: String,
    pub metadata: SaveMetadata,
    pub node_groups: BTreeMap<String, NodeGraph>,
}

/// Metadata for save files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveMetadata {
    pub created: String,  // ISO 8601 timestamp
    pub modified: String, // ISO 8601 timestamp
    pub creator: String,
}

/// Node trees by name, with the type registry they are built against
#[derive(Debug, Clone)]
pub struct Workspace {
    node_groups: BTreeMap<String, NodeGraph>,
    registry: TypeInfos,
    created: Option<String>,
}

impl Workspace {
    /// Empty workspace using the default type registry
    pub fn new() -> Self {
        Self::with_registry(TypeInfos::with_defaults())
    }

    pub fn with_registry(registry: TypeInfos) -> Self {
        Self {
            node_groups: BTreeMap::new(),
            registry,
            created: None,
        }
    }

    pub fn registry(&self) -> &TypeInfos {
        &self.registry
    }

    /// Adds a tree, replacing any tree with the same name
    pub fn insert_tree(&mut self, tree: NodeGraph) -> Option<NodeGraph> {
        self.node_groups.insert(tree.name.clone(), tree)
    }

    pub fn tree(&self, name: &str) -> Option<&NodeGraph> {
        self.node_groups.get(name)
    }

    pub fn tree_mut(&mut self, name: &str) -> Option<&mut NodeGraph> {
        self.node_groups.get_mut(name)
    }

    pub fn trees(&self) -> impl Iterator<Item = &NodeGraph> {
        self.node_groups.values()
    }

    /// Resolve a pack list by tree, node and property name, apply `edit`,
    /// then refresh the node so sockets and links match the new slots.
    pub fn edit_pack_list<T>(
        &mut self,
        tree_name: &str,
        node_name: &str,
        prop_name: &str,
        edit: impl FnOnce(&mut PackListDecl) -> Result<T>,
    ) -> Result<T> {
        let tree = self
            .node_groups
            .get_mut(tree_name)
            .ok_or_else(|| PackListError::TreeNotFound(tree_name.to_string()))?;
        let node_id = tree.find_node_id(node_name).ok_or_else(|| PackListError::NodeNotFound {
            tree: tree_name.to_string(),
            node: node_name.to_string(),
        })?;
        let decl = tree
            .node_mut(node_id)
            .and_then(|node| node.pack_list_mut(prop_name))
            .ok_or_else(|| PackListError::PropertyNotFound {
                node: node_name.to_string(),
                prop_name: prop_name.to_string(),
            })?;

        let output = edit(decl)?;
        tree.refresh_node(node_id, &self.registry);
        Ok(output)
    }

    /// Refresh every node of every tree
    pub fn refresh_all(&mut self) {
        for tree in self.node_groups.values_mut() {
            tree.refresh_all(&self.registry);
        }
    }

    /// Save the workspace to a JSON file
    pub fn save(&mut self, file_path: &Path) -> Result<()> {
        let now = chrono::Utc::now().to_rfc3339();
        let created = self.created.get_or_insert_with(|| now.clone()).clone();
        let save_data = SaveData {
            version: FORMAT_VERSION.to_string(),
            metadata: SaveMetadata {
                created,
                modified: now,
                creator: CREATOR.to_string(),
            },
            node_groups: self.node_groups.clone(),
        };

        let json_content = serde_json::to_string_pretty(&save_data)?;
        std::fs::write(file_path, json_content)?;
        info!("Saved {} node trees to {}", self.node_groups.len(), file_path.display());
        Ok(())
    }

    /// Load a workspace from a JSON file, rebuilding all sockets
    pub fn load(file_path: &Path) -> Result<Self> {
        let file_content = std::fs::read_to_string(file_path)?;
        let save_data: SaveData = serde_json::from_str(&file_content)?;

        let mut workspace = Self::new();
        workspace.created = Some(save_data.metadata.created);
        workspace.node_groups = save_data.node_groups;
        workspace.refresh_all();
        info!("Loaded {} node trees from {}", workspace.node_groups.len(), file_path.display());
        Ok(workspace)
    }
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}
