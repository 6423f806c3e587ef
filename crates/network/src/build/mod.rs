//! Network builders
//!
//! Each module turns the faculty directory into one family of
//! collaboration graphs.

pub mod cohort;
pub mod ego;
pub mod hire;
pub mod subset;
pub mod year;

pub use cohort::{excellence_graph, management_graph, position_graph, CohortGraph};
pub use ego::{EgoGraph, EgoNetworks, EgoNode, EgoYear, NodeRole, YearlyCollaborations};
pub use hire::{HireAnalysis, HireCandidate};
pub use subset::{SubsetNetworks, SubsetYear};
pub use year::{YearSeries, YearSnapshot};
