//! Request handlers

pub mod cohorts;
pub mod faculty;
pub mod health;
pub mod hires;
pub mod subsets;
pub mod years;

use collabnet_network::NodeRole;

/// Dashboard colors for ego-network roles
pub(crate) fn ego_color(role: NodeRole) -> &'static str {
    match role {
        NodeRole::Focus => "#0033cc",
        NodeRole::Member => "#99d6ff",
        NodeRole::External => "#666666",
    }
}

/// Dashboard colors for subset views: subset members get the focus blue
pub(crate) fn subset_color(role: NodeRole) -> &'static str {
    match role {
        NodeRole::Focus | NodeRole::Member => "#0033cc",
        NodeRole::External => "#666666",
    }
}
