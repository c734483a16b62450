//! Join engine: combine datasets by canonical department code.
//!
//! The primary dataset drives the output (one row per primary record, in
//! primary order). Secondary datasets are indexed by canonical code; a code
//! missing from a secondary leaves the corresponding fields `None`.

use std::collections::HashMap;

use serde::Serialize;

use crate::metrics::{self, RiskTier};
use crate::models::{
    DepartmentCode, DoctorsRecord, Keyed, Over55Record, PassagesRecord, RetireesRecord,
};

/// Lookup table over a secondary dataset. The first record for a code wins.
pub struct CodeIndex<'a, T> {
    entries: HashMap<DepartmentCode, &'a T>,
}

impl<'a, T: Keyed> CodeIndex<'a, T> {
    pub fn build(records: &'a [T]) -> Self {
        let mut entries = HashMap::with_capacity(records.len());
        for record in records {
            let code = record.department_code();
            if code.is_empty() {
                continue;
            }
            entries.entry(code).or_insert(record);
        }
        Self { entries }
    }

    pub fn get(&self, code: &DepartmentCode) -> Option<&'a T> {
        self.entries.get(code).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Emergency visits joined with doctor headcount.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PressureView {
    pub code: DepartmentCode,
    pub label: String,
    pub daily_visits: Option<f64>,
    pub doctor_count: Option<u64>,
    /// Daily visits per doctor.
    pub ratio: Option<f64>,
}

/// Ageing indicators joined with doctor headcount.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskView {
    pub code: DepartmentCode,
    pub label: String,
    pub active_retirees: Option<u64>,
    pub generalists_over55: Option<u64>,
    pub specialists_over55: Option<u64>,
    pub total_doctors: Option<u64>,
    /// Active retirees / total doctors.
    pub retiree_ratio: Option<f64>,
    /// (generalists + specialists over 55) / total doctors.
    pub over55_share: Option<f64>,
    pub risk_score: f64,
    pub tier: RiskTier,
}

/// Join passages (primary) with doctors.
pub fn merge_pressure(passages: &[PassagesRecord], doctors: &[DoctorsRecord]) -> Vec<PressureView> {
    let doctors_by_code = CodeIndex::build(doctors);

    let rows: Vec<PressureView> = passages
        .iter()
        .map(|p| {
            let code = p.department_code();
            let doctor = doctors_by_code.get(&code);
            let doctor_count = doctor.and_then(|d| d.doctor_count);

            let label = if p.label.is_empty() {
                doctor.map(|d| d.label.clone()).unwrap_or_default()
            } else {
                p.label.clone()
            };

            PressureView {
                label,
                daily_visits: p.daily_visits,
                doctor_count,
                ratio: metrics::ratio(p.daily_visits, metrics::as_f64(doctor_count)),
                code,
            }
        })
        .collect();

    let unmatched = rows.iter().filter(|r| r.doctor_count.is_none()).count();
    tracing::debug!(rows = rows.len(), unmatched, "Pressure join complete");
    rows
}

/// Join active retirees (primary) with over-55 counts and doctors.
pub fn merge_risk(
    retirees: &[RetireesRecord],
    over55: &[Over55Record],
    doctors: &[DoctorsRecord],
) -> Vec<RiskView> {
    let over55_by_code = CodeIndex::build(over55);
    let doctors_by_code = CodeIndex::build(doctors);

    retirees
        .iter()
        .map(|r| {
            let code = r.department_code();
            let senior = over55_by_code.get(&code);
            let doctor = doctors_by_code.get(&code);

            let total_doctors = doctor.and_then(|d| d.doctor_count);
            let generalists_over55 = senior.and_then(|s| s.generalists);
            let specialists_over55 = senior.and_then(|s| s.specialists);

            let retiree_ratio = metrics::ratio(
                metrics::as_f64(r.active_retirees),
                metrics::as_f64(total_doctors),
            );
            let over55_share = metrics::share(
                metrics::as_f64(generalists_over55),
                metrics::as_f64(specialists_over55),
                metrics::as_f64(total_doctors),
            );
            let risk_score = metrics::risk_score(retiree_ratio, over55_share);

            let label = [
                Some(r.label.as_str()),
                senior.map(|s| s.label.as_str()),
                doctor.map(|d| d.label.as_str()),
            ]
            .into_iter()
            .flatten()
            .find(|l| !l.is_empty())
            .unwrap_or_default()
            .to_string();

            RiskView {
                code,
                label,
                active_retirees: r.active_retirees,
                generalists_over55,
                specialists_over55,
                total_doctors,
                retiree_ratio,
                over55_share,
                risk_score,
                tier: RiskTier::from_score(risk_score),
            }
        })
        .collect()
}
