//! View models: everything a page needs, fetched concurrently and coloured.
//!
//! Each loader is one "view mount". All of its resources are requested at
//! once; the first failure fails the whole view, so a page never renders a
//! partial join.

use futures_util::future::{try_join, try_join3};
use serde::Serialize;

use crate::backend::{fetch_boundaries, fetch_records, Backend, FetchError, Resource};
use crate::color::{Rgb, ValueRange, APL_SCALE, PRESSURE_SCALE};
use crate::merge::{self, CodeIndex, PressureView, RiskView};
use crate::models::geo::Geometry;
use crate::models::{
    AplRecord, DepartmentCode, DepartmentStats, DoctorsRecord, Keyed, Over55Record,
    PassagesRecord, RetireesRecord,
};
use crate::stats::StatsOverview;
use crate::view::SortOrder;

/// A row plus the colour it is drawn with.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Colored<T> {
    #[serde(flatten)]
    pub item: T,
    pub color: Rgb,
}

// ── APL table ──────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AplRow {
    pub code: DepartmentCode,
    pub label: String,
    pub year: Option<String>,
    pub apl: Option<f64>,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AplTable {
    pub rows: Vec<AplRow>,
    pub range: Option<ValueRange>,
}

impl AplTable {
    pub fn build(records: Vec<AplRecord>) -> Self {
        let range = ValueRange::observe(records.iter().map(|r| r.apl));
        let rows = records
            .into_iter()
            .map(|r| AplRow {
                code: r.department_code(),
                color: APL_SCALE.color_for(r.apl, range),
                label: r.label,
                year: r.year,
                apl: r.apl,
            })
            .collect();
        Self { rows, range }
    }

    /// Reorder rows by APL. Colours are unaffected.
    pub fn sorted(mut self, order: SortOrder) -> Self {
        order.apply(&mut self.rows, |row| row.apl);
        self
    }

    pub fn find(&self, code: &DepartmentCode) -> Option<&AplRow> {
        self.rows.iter().find(|row| &row.code == code)
    }

    /// Legend swatches: (best, worst).
    pub fn legend(&self) -> (Rgb, Rgb) {
        let high = APL_SCALE.color_for(self.range.map(|r| r.max), self.range);
        let low = APL_SCALE.color_for(self.range.map(|r| r.min), self.range);
        (high, low)
    }
}

// ── Pressure grid ──────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PressureGrid {
    pub cells: Vec<Colored<PressureView>>,
    /// Bounds of the non-null ratios.
    pub range: Option<ValueRange>,
}

impl PressureGrid {
    pub fn build(views: Vec<PressureView>) -> Self {
        let range = ValueRange::observe(views.iter().map(|v| v.ratio));
        let cells = views
            .into_iter()
            .map(|item| Colored {
                color: PRESSURE_SCALE.color_for(item.ratio, range),
                item,
            })
            .collect();
        Self { cells, range }
    }

    pub fn find(&self, code: &DepartmentCode) -> Option<&Colored<PressureView>> {
        self.cells.iter().find(|cell| &cell.item.code == code)
    }
}

// ── Risk board ─────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskCard {
    /// 1-based position by descending risk.
    pub rank: usize,
    #[serde(flatten)]
    pub view: RiskView,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskBoard {
    pub cards: Vec<RiskCard>,
}

impl RiskBoard {
    /// Rank by descending risk score; equal scores keep backend order.
    pub fn build(mut views: Vec<RiskView>) -> Self {
        SortOrder::Descending.apply(&mut views, |v| Some(v.risk_score));
        let cards = views
            .into_iter()
            .enumerate()
            .map(|(i, view)| RiskCard { rank: i + 1, view })
            .collect();
        Self { cards }
    }

    pub fn find(&self, code: &DepartmentCode) -> Option<&RiskCard> {
        self.cards.iter().find(|card| &card.view.code == code)
    }
}

// ── Choropleth ─────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct MapRegion {
    pub code: DepartmentCode,
    pub name: String,
    pub apl: Option<f64>,
    pub year: Option<String>,
    pub color: Rgb,
    pub geometry: Geometry,
}

#[derive(Debug, Clone)]
pub struct AplMap {
    pub regions: Vec<MapRegion>,
    pub range: Option<ValueRange>,
}

impl AplMap {
    /// Join boundary features with APL records. Features without a drawable
    /// geometry are skipped; features without APL data get the placeholder.
    pub fn build(features: Vec<crate::models::geo::Feature>, records: &[AplRecord]) -> Self {
        let range = ValueRange::observe(records.iter().map(|r| r.apl));
        let apl_by_code = CodeIndex::build(records);

        let mut skipped = 0usize;
        let mut regions = Vec::with_capacity(features.len());
        for feature in features {
            let code = feature.department_code();
            let Some(geometry) = feature.geometry.filter(|g| !g.rings().is_empty()) else {
                skipped += 1;
                continue;
            };

            let record = apl_by_code.get(&code);
            let apl = record.and_then(|r| r.apl);
            let name = record
                .map(|r| r.label.clone())
                .filter(|label| !label.is_empty())
                .or(feature.properties.nom)
                .unwrap_or_else(|| code.to_string());

            regions.push(MapRegion {
                name,
                apl,
                year: record.and_then(|r| r.year.clone()),
                color: APL_SCALE.color_for(apl, range),
                geometry,
                code,
            });
        }

        if skipped > 0 {
            tracing::debug!(skipped, "Boundary features without drawable geometry");
        }
        Self { regions, range }
    }
}

// ── Loaders ────────────────────────────────────────────────

pub async fn load_apl(backend: &dyn Backend) -> Result<AplTable, FetchError> {
    let records = fetch_records::<AplRecord>(backend, Resource::Apl).await?;
    Ok(AplTable::build(records))
}

pub async fn load_pressure(backend: &dyn Backend) -> Result<PressureGrid, FetchError> {
    let (passages, doctors) = try_join(
        fetch_records::<PassagesRecord>(backend, Resource::Passages),
        fetch_records::<DoctorsRecord>(backend, Resource::Doctors),
    )
    .await?;
    Ok(PressureGrid::build(merge::merge_pressure(&passages, &doctors)))
}

pub async fn load_risk(backend: &dyn Backend) -> Result<RiskBoard, FetchError> {
    let (retirees, over55, doctors) = try_join3(
        fetch_records::<RetireesRecord>(backend, Resource::ActiveRetirees),
        fetch_records::<Over55Record>(backend, Resource::Over55),
        fetch_records::<DoctorsRecord>(backend, Resource::Doctors),
    )
    .await?;
    Ok(RiskBoard::build(merge::merge_risk(&retirees, &over55, &doctors)))
}

pub async fn load_stats(backend: &dyn Backend) -> Result<StatsOverview, FetchError> {
    let rows = fetch_records::<DepartmentStats>(backend, Resource::DepartmentStats).await?;
    Ok(StatsOverview::build(rows))
}

pub async fn load_map(backend: &dyn Backend) -> Result<AplMap, FetchError> {
    let (boundaries, records) = try_join(
        fetch_boundaries(backend),
        fetch_records::<AplRecord>(backend, Resource::Apl),
    )
    .await?;
    Ok(AplMap::build(boundaries.features, &records))
}
