//! Per-view lifecycle and display ordering.

use std::cmp::Ordering;
use std::fmt::Display;

/// The only message a user ever sees for a failed load.
pub const GENERIC_ERROR_MESSAGE: &str = "Erreur lors du chargement des données.";

/// Loading → (Error | Ready). Both outcomes are terminal for the view instance.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    Loading,
    Error(String),
    Ready(T),
}

impl<T> ViewState<T> {
    /// Apply the fetch-completion event. Ignored once the view has settled.
    pub fn resolve<E: Display>(self, outcome: Result<T, E>) -> Self {
        match self {
            ViewState::Loading => match outcome {
                Ok(data) => ViewState::Ready(data),
                Err(e) => {
                    tracing::warn!(error = %e, "View failed to load");
                    ViewState::Error(GENERIC_ERROR_MESSAGE.to_string())
                }
            },
            settled => settled,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ViewState::Error(_))
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            ViewState::Ready(data) => Some(data),
            _ => None,
        }
    }
}

/// Three-way sort toggle over already-fetched rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Unordered,
    Descending,
    Ascending,
}

impl SortOrder {
    /// Parse the `sort` query parameter; anything unknown means unordered.
    pub fn from_query(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("desc") => SortOrder::Descending,
            Some("asc") => SortOrder::Ascending,
            _ => SortOrder::Unordered,
        }
    }

    pub fn as_query(&self) -> Option<&'static str> {
        match self {
            SortOrder::Unordered => None,
            SortOrder::Descending => Some("desc"),
            SortOrder::Ascending => Some("asc"),
        }
    }

    /// Stable reorder of `rows` by `key`. Missing keys rank below every value.
    pub fn apply<T, F>(&self, rows: &mut [T], key: F)
    where
        F: Fn(&T) -> Option<f64>,
    {
        match self {
            SortOrder::Unordered => {}
            SortOrder::Descending => rows.sort_by(|a, b| compare_keys(key(b), key(a))),
            SortOrder::Ascending => rows.sort_by(|a, b| compare_keys(key(a), key(b))),
        }
    }
}

fn compare_keys(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
    }
}
