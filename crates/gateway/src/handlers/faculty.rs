//! Faculty handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::handlers::ego_color;
use crate::AppState;
use collabnet_common::errors::{AppError, Result};
use collabnet_common::model::FacultyProfile;
use collabnet_network::{EgoGraph, EgoNetworks};

/// Roster listing entry
#[derive(Serialize)]
pub struct FacultySummary {
    pub name: String,
    pub position: String,
    pub management: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
    pub excellence: bool,
    pub publication_count: usize,
}

/// Profile plus yearly collaboration counts
#[derive(Serialize)]
pub struct FacultyDetail {
    pub profile: FacultyProfile,
    pub excellence: bool,
    pub publication_count: usize,
    pub yearly: Vec<YearCounts>,
}

#[derive(Serialize)]
pub struct YearCounts {
    pub year: i32,

    /// Collaborations with other roster members
    pub roster: usize,

    /// All collaborations, externals included
    pub total: usize,
}

/// Which ego graph to return
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EgoScope {
    /// Declared over the whole roster, roster co-authors only
    #[default]
    Roster,
    /// Every co-author, externals included
    Full,
}

#[derive(Debug, Deserialize)]
pub struct EgoGraphParams {
    pub year: i32,
    #[serde(default)]
    pub scope: EgoScope,
}

/// Renderable ego graph with display colors
#[derive(Serialize)]
pub struct EgoGraphPayload {
    pub name: String,
    pub year: i32,
    pub scope: EgoScope,
    pub nodes: Vec<ColoredNode>,
    pub edges: Vec<EgoEdge>,
}

#[derive(Serialize)]
pub struct ColoredNode {
    pub name: String,
    pub role: collabnet_network::NodeRole,
    pub color: String,
}

#[derive(Serialize)]
pub struct EgoEdge {
    pub source: String,
    pub target: String,
}

pub(crate) fn colored_nodes<F>(graph: &EgoGraph, color: F) -> Vec<ColoredNode>
where
    F: Fn(collabnet_network::NodeRole) -> &'static str,
{
    graph
        .nodes
        .iter()
        .map(|node| ColoredNode {
            name: node.name.clone(),
            role: node.role,
            color: color(node.role).to_string(),
        })
        .collect()
}

pub(crate) fn edge_payload(graph: &EgoGraph) -> Vec<EgoEdge> {
    graph
        .edges
        .iter()
        .map(|(source, target)| EgoEdge {
            source: source.clone(),
            target: target.clone(),
        })
        .collect()
}

/// List the roster
pub async fn list_faculty(State(state): State<AppState>) -> Json<Vec<FacultySummary>> {
    let faculty = state
        .directory
        .iter()
        .map(|member| FacultySummary {
            name: member.name().to_string(),
            position: member.profile.position.clone(),
            management: member.profile.management,
            area: member.profile.area.clone(),
            excellence: member.excellence,
            publication_count: member.publications.len(),
        })
        .collect();

    Json(faculty)
}

/// Profile and yearly collaboration counts of one member
pub async fn get_faculty(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<FacultyDetail>> {
    let member = state
        .directory
        .get(&name)
        .ok_or_else(|| AppError::FacultyNotFound { name: name.clone() })?;

    let highlight: BTreeSet<String> = state.directory.names().map(str::to_string).collect();
    let ego = EgoNetworks::build(&state.directory, &name, &highlight, &state.config.network)?;

    let yearly = ego
        .yearly
        .iter()
        .map(|(&year, ego_year)| YearCounts {
            year,
            roster: ego_year.counts.roster,
            total: ego_year.counts.total,
        })
        .collect();

    Ok(Json(FacultyDetail {
        profile: member.profile.clone(),
        excellence: member.excellence,
        publication_count: member.publications.len(),
        yearly,
    }))
}

/// Renderable ego graph of one member for one year
pub async fn get_faculty_graph(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(params): Query<EgoGraphParams>,
) -> Result<Json<EgoGraphPayload>> {
    let config = &state.config.network;
    if params.year < config.first_year || params.year > config.last_year {
        return Err(AppError::YearOutOfRange {
            year: params.year,
            first: config.first_year,
            last: config.last_year,
        });
    }

    let highlight: BTreeSet<String> = state.directory.names().map(str::to_string).collect();
    let ego = EgoNetworks::build(&state.directory, &name, &highlight, config)?;

    let ego_year = ego.yearly.get(&params.year).ok_or(AppError::YearOutOfRange {
        year: params.year,
        first: config.first_year,
        last: config.last_year,
    })?;

    let graph = match params.scope {
        EgoScope::Roster => &ego_year.roster_graph,
        EgoScope::Full => &ego_year.full_graph,
    };

    Ok(Json(EgoGraphPayload {
        name,
        year: params.year,
        scope: params.scope,
        nodes: colored_nodes(graph, ego_color),
        edges: edge_payload(graph),
    }))
}
