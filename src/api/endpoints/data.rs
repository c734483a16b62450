//! JSON views of the merged, derived and coloured datasets.

use axum::extract::{Query, State};
use axum::Json;
use serde::Serialize;

use super::SortQuery;
use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::dashboard::{self, AplTable, PressureGrid, RiskBoard};
use crate::stats::{BarEntry, StatsOverview};
use crate::view::SortOrder;

#[derive(Serialize)]
pub struct StatsResponse {
    #[serde(flatten)]
    pub overview: StatsOverview,
    pub bars: Vec<BarEntry>,
}

/// `GET /data/apl?sort=desc|asc`
pub async fn apl(
    State(ctx): State<ApiContext>,
    Query(q): Query<SortQuery>,
) -> Result<Json<AplTable>, ApiError> {
    let order = SortOrder::from_query(q.sort.as_deref());
    let table = dashboard::load_apl(ctx.backend()).await?;
    Ok(Json(table.sorted(order)))
}

/// `GET /data/carte`
pub async fn pressure(State(ctx): State<ApiContext>) -> Result<Json<PressureGrid>, ApiError> {
    Ok(Json(dashboard::load_pressure(ctx.backend()).await?))
}

/// `GET /data/zones-risque`
pub async fn risk(State(ctx): State<ApiContext>) -> Result<Json<RiskBoard>, ApiError> {
    Ok(Json(dashboard::load_risk(ctx.backend()).await?))
}

/// `GET /data/statistiques`
pub async fn stats(State(ctx): State<ApiContext>) -> Result<Json<StatsResponse>, ApiError> {
    let overview = dashboard::load_stats(ctx.backend()).await?;
    let bars = overview.bars();
    Ok(Json(StatsResponse { overview, bars }))
}
