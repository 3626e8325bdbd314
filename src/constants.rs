//! Application-wide constants and default values
//!
//! Centralized location for all hard-coded names, labels and file markers

/// Socket naming constants
pub mod socket {
    /// Type name of the trailing connector socket
    pub const OPERATOR_SOCKET_IDNAME: &str = "fn_OperatorSocket";

    /// Display name of the connector socket, also the prefix of its identifier
    pub const OPERATOR_SOCKET_LABEL: &str = "Operator";

    /// Group label given to every pack list data socket
    pub const DATA_SOCKET_GROUP_LABEL: &str = "";
}

/// Operator idnames, stable across releases since they are stored in UI bindings
pub mod operator {
    pub const NEW_PACK_LIST_INPUT: &str = "fn.new_pack_list_input";
    pub const NEW_PACK_LIST_INPUT_LABEL: &str = "New Pack List Input";

    pub const REMOVE_PACK_LIST_INPUT: &str = "fn.remove_pack_list_input";
    pub const REMOVE_PACK_LIST_INPUT_LABEL: &str = "Remove Pack List Input";
}

/// UI text and icon names
pub mod ui {
    pub const NEW_INPUT_TEXT: &str = "New Input";
    pub const ADD_ICON: &str = "ADD";
    pub const REMOVE_ICON: &str = "X";
}

/// Workspace file constants
pub mod file {
    /// Format version written into saved workspaces
    pub const FORMAT_VERSION: &str = "1.0";

    /// Creator string written into saved workspaces
    pub const CREATOR: &str = "nodle-packlist 0.1";
}
