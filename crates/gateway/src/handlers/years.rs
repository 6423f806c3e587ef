//! Year network handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::AppState;
use collabnet_common::errors::{AppError, Result};
use collabnet_network::{GraphMetrics, NodeReport, YearSnapshot};

/// Year range and per-year summaries
#[derive(Serialize)]
pub struct YearsResponse {
    pub first_year: i32,
    pub last_year: i32,
    pub years: Vec<YearSummary>,
}

#[derive(Serialize)]
pub struct YearSummary {
    pub year: i32,
    pub annual: GraphSummary,
    pub cumulative: GraphSummary,
}

#[derive(Serialize)]
pub struct GraphSummary {
    pub node_count: usize,
    pub edge_count: usize,
    pub average_degree: f64,
    pub density: f64,
}

impl GraphSummary {
    fn from_metrics(metrics: &GraphMetrics) -> Self {
        Self {
            node_count: metrics.node_count,
            edge_count: metrics.edge_count,
            average_degree: metrics.average_degree,
            density: metrics.density,
        }
    }
}

/// Full metric reports of one year
#[derive(Serialize)]
pub struct YearDetail {
    pub year: i32,
    pub annual: GraphMetrics,
    pub cumulative: GraphMetrics,
}

/// Which of the year's two graphs to return
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GraphView {
    #[default]
    Annual,
    Cumulative,
}

#[derive(Debug, Deserialize)]
pub struct GraphViewParams {
    #[serde(default)]
    pub view: GraphView,
}

/// Renderable graph payload: node attributes plus edge list
#[derive(Serialize)]
pub struct GraphPayload {
    pub year: i32,
    pub view: GraphView,
    pub nodes: Vec<NodeReport>,
    pub edges: Vec<GraphEdge>,
}

#[derive(Serialize)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
}

fn snapshot<'a>(state: &'a AppState, year: i32) -> Result<&'a YearSnapshot> {
    state.years.get(year).ok_or(AppError::YearOutOfRange {
        year,
        first: state.years.first_year(),
        last: state.years.last_year(),
    })
}

/// List all covered years with summaries
pub async fn list_years(State(state): State<AppState>) -> Json<YearsResponse> {
    let years = state
        .years
        .iter()
        .map(|snapshot| YearSummary {
            year: snapshot.year,
            annual: GraphSummary::from_metrics(&snapshot.annual.metrics),
            cumulative: GraphSummary::from_metrics(&snapshot.cumulative.metrics),
        })
        .collect();

    Json(YearsResponse {
        first_year: state.years.first_year(),
        last_year: state.years.last_year(),
        years,
    })
}

/// Full metric reports for one year
pub async fn get_year(
    State(state): State<AppState>,
    Path(year): Path<i32>,
) -> Result<Json<YearDetail>> {
    let snapshot = snapshot(&state, year)?;

    Ok(Json(YearDetail {
        year,
        annual: snapshot.annual.metrics.clone(),
        cumulative: snapshot.cumulative.metrics.clone(),
    }))
}

/// Renderable graph of one year
pub async fn get_year_graph(
    State(state): State<AppState>,
    Path(year): Path<i32>,
    Query(params): Query<GraphViewParams>,
) -> Result<Json<GraphPayload>> {
    let snapshot = snapshot(&state, year)?;

    let analyzed = match params.view {
        GraphView::Annual => &snapshot.annual,
        GraphView::Cumulative => &snapshot.cumulative,
    };

    let edges = analyzed
        .edges()
        .into_iter()
        .map(|(source, target)| GraphEdge { source, target })
        .collect();

    Ok(Json(GraphPayload {
        year,
        view: params.view,
        nodes: analyzed.nodes.clone(),
        edges,
    }))
}
