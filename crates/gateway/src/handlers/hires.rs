//! Hiring analysis handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;
use collabnet_common::errors::{AppError, Result};
use collabnet_network::HireCandidate;

#[derive(Serialize)]
pub struct HiresResponse {
    pub from_year: i32,
    pub to_year: i32,
    pub shortlist: Vec<HireCandidate>,
    pub graph: HireGraph,
}

#[derive(Serialize)]
pub struct HireGraph {
    pub nodes: Vec<String>,
    pub edges: Vec<HireEdge>,
}

#[derive(Serialize)]
pub struct HireEdge {
    pub source: String,
    pub target: String,
}

/// The hiring shortlist and its collaboration structure
pub async fn get_hires(State(state): State<AppState>) -> Result<Json<HiresResponse>> {
    let analysis = state
        .hires
        .as_ref()
        .as_ref()
        .ok_or_else(|| AppError::ServiceUnavailable {
            message: "No candidate pool configured".to_string(),
        })?;

    let edges = analysis
        .graph
        .edge_names()
        .into_iter()
        .map(|(source, target)| HireEdge { source, target })
        .collect();

    Ok(Json(HiresResponse {
        from_year: analysis.from_year,
        to_year: analysis.to_year,
        shortlist: analysis.shortlist.clone(),
        graph: HireGraph {
            nodes: analysis.graph.names().map(str::to_string).collect(),
            edges,
        },
    }))
}
