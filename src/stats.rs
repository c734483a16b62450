//! National statistics: totals, mean densities and the headcount bar chart.

use serde::Serialize;

use crate::metrics;
use crate::models::DepartmentStats;

/// Rows carrying national aggregates rather than a department.
pub const AGGREGATE_ROW_IDS: [&str; 2] = ["100", "101"];

pub fn is_aggregate_row(stats: &DepartmentStats) -> bool {
    AGGREGATE_ROW_IDS.contains(&stats.id.trim())
}

/// Mean density per speciality over the departments that report one.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DensityAverages {
    pub overall: Option<f64>,
    pub generalists: Option<f64>,
    pub specialists: Option<f64>,
    pub dentists: Option<f64>,
    pub pharmacists: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarEntry {
    pub label: String,
    pub doctors: u64,
    /// Bar length relative to the largest headcount, in percent.
    pub width_percent: f64,
    /// Share of the national headcount, in percent.
    pub share_percent: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsOverview {
    pub departments: Vec<DepartmentStats>,
    pub total_doctors: u64,
    pub averages: DensityAverages,
}

impl StatsOverview {
    /// Drop aggregate rows and summarise the rest. Backend order is kept.
    pub fn build(rows: Vec<DepartmentStats>) -> Self {
        let departments: Vec<DepartmentStats> =
            rows.into_iter().filter(|s| !is_aggregate_row(s)).collect();

        let total_doctors: u64 = departments.iter().filter_map(|s| s.doctor_count).sum();

        let averages = DensityAverages {
            overall: mean(departments.iter().map(|s| s.density_overall)),
            generalists: mean(departments.iter().map(|s| s.density_generalists)),
            specialists: mean(departments.iter().map(|s| s.density_specialists)),
            dentists: mean(departments.iter().map(|s| s.density_dentists)),
            pharmacists: mean(departments.iter().map(|s| s.density_pharmacists)),
        };

        tracing::debug!(
            departments = departments.len(),
            total_doctors,
            "National statistics aggregated"
        );

        Self {
            departments,
            total_doctors,
            averages,
        }
    }

    /// Headcount bars, largest first. Departments without a headcount are left out.
    pub fn bars(&self) -> Vec<BarEntry> {
        let mut counted: Vec<(&DepartmentStats, u64)> = self
            .departments
            .iter()
            .filter_map(|s| s.doctor_count.map(|c| (s, c)))
            .collect();
        counted.sort_by(|a, b| b.1.cmp(&a.1));

        let largest = counted.first().map(|(_, c)| *c as f64);
        let total = self.total_doctors as f64;

        counted
            .into_iter()
            .map(|(s, doctors)| BarEntry {
                label: s.label.clone(),
                doctors,
                width_percent: metrics::ratio(Some(doctors as f64), largest)
                    .map_or(0.0, |r| r * 100.0),
                share_percent: metrics::ratio(Some(doctors as f64), Some(total)).map(|r| r * 100.0),
            })
            .collect()
    }
}

fn mean<I: Iterator<Item = Option<f64>>>(values: I) -> Option<f64> {
    let (sum, n) = values
        .flatten()
        .filter(|v| v.is_finite())
        .fold((0.0, 0u32), |(sum, n), v| (sum + v, n + 1));
    metrics::ratio(Some(sum), Some(f64::from(n)))
}
