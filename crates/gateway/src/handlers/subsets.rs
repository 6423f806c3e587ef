//! Faculty subset handlers

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::handlers::faculty::{colored_nodes, edge_payload, ColoredNode, EgoEdge, YearCounts};
use crate::handlers::subset_color;
use crate::AppState;
use collabnet_common::errors::{AppError, Result};
use collabnet_network::SubsetNetworks;

/// Largest subset the endpoint will analyze in one request
const MAX_SUBSET_SIZE: usize = 25;

#[derive(Debug, Deserialize)]
pub struct AnalyzeSubsetRequest {
    pub names: Vec<String>,
}

#[derive(Serialize)]
pub struct SubsetResponse {
    pub names: Vec<String>,
    pub yearly: Vec<SubsetYearPayload>,
    pub members: BTreeMap<String, Vec<YearCounts>>,
}

#[derive(Serialize)]
pub struct SubsetYearPayload {
    pub year: i32,
    pub collaboration_count: usize,
    pub nodes: Vec<ColoredNode>,
    pub edges: Vec<EgoEdge>,
}

/// Analyze a subset of the roster
pub async fn analyze_subset(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeSubsetRequest>,
) -> Result<Json<SubsetResponse>> {
    if request.names.is_empty() {
        return Err(AppError::Validation {
            message: "At least one faculty name required".to_string(),
            field: Some("names".to_string()),
        });
    }

    if request.names.len() > MAX_SUBSET_SIZE {
        return Err(AppError::Validation {
            message: format!("Maximum {MAX_SUBSET_SIZE} faculty names"),
            field: Some("names".to_string()),
        });
    }

    let subset = SubsetNetworks::build(&state.directory, &request.names, &state.config.network)?;

    let yearly = subset
        .yearly
        .iter()
        .map(|(&year, subset_year)| SubsetYearPayload {
            year,
            collaboration_count: subset_year.collaboration_count,
            nodes: colored_nodes(&subset_year.graph, subset_color),
            edges: edge_payload(&subset_year.graph),
        })
        .collect();

    let members = subset
        .members
        .iter()
        .map(|(name, ego)| {
            let counts = ego
                .yearly
                .iter()
                .map(|(&year, ego_year)| YearCounts {
                    year,
                    roster: ego_year.counts.roster,
                    total: ego_year.counts.total,
                })
                .collect();
            (name.clone(), counts)
        })
        .collect();

    Ok(Json(SubsetResponse {
        names: subset.names,
        yearly,
        members,
    }))
}
