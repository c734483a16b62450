//! HTML page handlers. Each request is one view mount: fetch, render, discard.
//!
//! A failed load renders the page in its error state with `502 Bad Gateway`.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use super::{SortQuery, StatsQuery};
use crate::api::types::ApiContext;
use crate::dashboard;
use crate::models::DepartmentCode;
use crate::render::layout::{not_found_page, Section};
use crate::render::{apl, guide, landing, map, pressure, risk, stats};
use crate::view::{SortOrder, ViewState};

fn respond<T>(state: &ViewState<T>, html: String) -> Response {
    let status = if state.is_error() {
        StatusCode::BAD_GATEWAY
    } else {
        StatusCode::OK
    };
    (status, Html(html)).into_response()
}

fn not_found(section: Section, code: &str) -> Response {
    (StatusCode::NOT_FOUND, Html(not_found_page(section, code))).into_response()
}

/// `GET /`
pub async fn home() -> Html<String> {
    Html(landing::render_landing(Section::Home))
}

/// `GET /propos`
pub async fn about() -> Html<String> {
    Html(landing::render_landing(Section::About))
}

/// `GET /guide`
pub async fn guide() -> Html<String> {
    Html(guide::render_guide())
}

/// `GET /apl?sort=desc|asc`
pub async fn apl_table(State(ctx): State<ApiContext>, Query(q): Query<SortQuery>) -> Response {
    let order = SortOrder::from_query(q.sort.as_deref());
    let loaded = dashboard::load_apl(ctx.backend()).await;
    let state = ViewState::Loading.resolve(loaded.map(|table| table.sorted(order)));
    respond(&state, apl::render_apl_page(&state, order))
}

/// `GET /apl/:code`
pub async fn apl_detail(State(ctx): State<ApiContext>, Path(code): Path<String>) -> Response {
    let state = ViewState::Loading.resolve(dashboard::load_apl(ctx.backend()).await);
    let Some(table) = state.ready() else {
        return respond(&state, apl::render_apl_page(&state, SortOrder::Unordered));
    };
    match table.find(&DepartmentCode::canonical(&code)) {
        Some(row) => Html(apl::render_apl_detail(row)).into_response(),
        None => not_found(Section::Apl, &code),
    }
}

/// `GET /carte`
pub async fn pressure_grid(State(ctx): State<ApiContext>) -> Response {
    let state = ViewState::Loading.resolve(dashboard::load_pressure(ctx.backend()).await);
    respond(&state, pressure::render_pressure_page(&state))
}

/// `GET /carte/:code`
pub async fn pressure_detail(State(ctx): State<ApiContext>, Path(code): Path<String>) -> Response {
    let state = ViewState::Loading.resolve(dashboard::load_pressure(ctx.backend()).await);
    let Some(grid) = state.ready() else {
        return respond(&state, pressure::render_pressure_page(&state));
    };
    match grid.find(&DepartmentCode::canonical(&code)) {
        Some(cell) => Html(pressure::render_pressure_detail(cell)).into_response(),
        None => not_found(Section::Pressure, &code),
    }
}

/// `GET /zones-risque`
pub async fn risk_board(State(ctx): State<ApiContext>) -> Response {
    let state = ViewState::Loading.resolve(dashboard::load_risk(ctx.backend()).await);
    respond(&state, risk::render_risk_page(&state))
}

/// `GET /zones-risque/:code`
pub async fn risk_detail(State(ctx): State<ApiContext>, Path(code): Path<String>) -> Response {
    let state = ViewState::Loading.resolve(dashboard::load_risk(ctx.backend()).await);
    let Some(board) = state.ready() else {
        return respond(&state, risk::render_risk_page(&state));
    };
    match board.find(&DepartmentCode::canonical(&code)) {
        Some(card) => Html(risk::render_risk_detail(card)).into_response(),
        None => not_found(Section::Risk, &code),
    }
}

/// `GET /statistiques?vue=tableau`
pub async fn national_stats(State(ctx): State<ApiContext>, Query(q): Query<StatsQuery>) -> Response {
    let layout = stats::StatsLayout::from_query(q.vue.as_deref());
    let state = ViewState::Loading.resolve(dashboard::load_stats(ctx.backend()).await);
    respond(&state, stats::render_stats_page(&state, layout))
}

/// `GET /map`
pub async fn apl_map(State(ctx): State<ApiContext>) -> Response {
    let state = ViewState::Loading.resolve(dashboard::load_map(ctx.backend()).await);
    respond(&state, map::render_map_page(&state))
}
