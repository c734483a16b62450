//! Endpoint handlers: HTML pages, JSON data and health.

pub mod data;
pub mod health;
pub mod pages;

use serde::Deserialize;

/// `?sort=desc|asc`
#[derive(Debug, Default, Deserialize)]
pub struct SortQuery {
    pub sort: Option<String>,
}

/// `?vue=tableau`
#[derive(Debug, Default, Deserialize)]
pub struct StatsQuery {
    pub vue: Option<String>,
}
