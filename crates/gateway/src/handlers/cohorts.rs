//! Cohort graph handlers

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::AppState;
use collabnet_network::{excellence_graph, management_graph, position_graph, CohortGraph};

#[derive(Serialize)]
pub struct CohortResponse {
    pub cohort: String,
    pub members: Vec<String>,
    pub member_count: usize,
    pub edge_count: usize,
    pub edges: Vec<CohortEdge>,
}

#[derive(Serialize)]
pub struct CohortEdge {
    pub source: String,
    pub target: String,
}

fn cohort_response(cohort: String, graph: CohortGraph) -> CohortResponse {
    let edges = graph
        .edges()
        .into_iter()
        .map(|(source, target)| CohortEdge { source, target })
        .collect();

    CohortResponse {
        cohort,
        member_count: graph.member_count(),
        edge_count: graph.edge_count(),
        members: graph.members,
        edges,
    }
}

/// Management members and their roster collaborations
pub async fn management(State(state): State<AppState>) -> Json<CohortResponse> {
    let graph = management_graph(&state.directory);
    Json(cohort_response("management".to_string(), graph))
}

/// Holders of one position and their collaborations within the cohort
pub async fn position(
    State(state): State<AppState>,
    Path(position): Path<String>,
) -> Json<CohortResponse> {
    let graph = position_graph(&state.directory, &position);
    Json(cohort_response(position, graph))
}

/// Excellence nodes and their collaborations within the cohort
pub async fn excellence(State(state): State<AppState>) -> Json<CohortResponse> {
    let graph = excellence_graph(&state.directory);
    Json(cohort_response("excellence".to_string(), graph))
}
