//! Wire records for each backend endpoint.
//!
//! Field names follow the backend's JSON; Rust names follow what the value means.

use serde::{Deserialize, Serialize};

use super::code::Keyed;
use super::lenient;

/// `GET /api/apl-dep`: APL (HMEP method) per department.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AplRecord {
    #[serde(rename = "codgeo", default, deserialize_with = "lenient::text")]
    pub code: String,
    #[serde(rename = "libgeo", default, deserialize_with = "lenient::text")]
    pub label: String,
    #[serde(rename = "an", default, deserialize_with = "lenient::optional_text")]
    pub year: Option<String>,
    #[serde(rename = "apl_mg_hmep", default, deserialize_with = "lenient::number")]
    pub apl: Option<f64>,
}

/// `GET /api/passages`: average daily emergency visits.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PassagesRecord {
    #[serde(rename = "dep", default, deserialize_with = "lenient::text")]
    pub code: String,
    #[serde(rename = "libelle_dep", default, deserialize_with = "lenient::text")]
    pub label: String,
    #[serde(
        rename = "moyenne_journaliere_passages",
        default,
        deserialize_with = "lenient::number"
    )]
    pub daily_visits: Option<f64>,
}

/// `GET /api/medecins_dep`: doctor headcount.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DoctorsRecord {
    #[serde(rename = "id", default, deserialize_with = "lenient::text")]
    pub code: String,
    #[serde(rename = "departement", default, deserialize_with = "lenient::text")]
    pub label: String,
    #[serde(rename = "effectif", default, deserialize_with = "lenient::count")]
    pub doctor_count: Option<u64>,
}

/// `GET /api/test-db`: headcount and densities per 100 000 inhabitants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentStats {
    #[serde(default, deserialize_with = "lenient::text")]
    pub id: String,
    #[serde(rename = "departement", default, deserialize_with = "lenient::text")]
    pub label: String,
    #[serde(rename = "effectif", default, deserialize_with = "lenient::count")]
    pub doctor_count: Option<u64>,
    #[serde(rename = "densite_ensemble", default, deserialize_with = "lenient::number")]
    pub density_overall: Option<f64>,
    #[serde(rename = "densite_generalistes", default, deserialize_with = "lenient::number")]
    pub density_generalists: Option<f64>,
    #[serde(rename = "densite_specialistes", default, deserialize_with = "lenient::number")]
    pub density_specialists: Option<f64>,
    #[serde(rename = "densite_chir_dent", default, deserialize_with = "lenient::number")]
    pub density_dentists: Option<f64>,
    #[serde(rename = "densite_pharma", default, deserialize_with = "lenient::number")]
    pub density_pharmacists: Option<f64>,
}

/// `GET /api/medecins-retraites-actifs`: retired doctors still practising.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RetireesRecord {
    #[serde(default, deserialize_with = "lenient::text")]
    pub code: String,
    #[serde(rename = "dept", default, deserialize_with = "lenient::text")]
    pub label: String,
    #[serde(rename = "nbr", default, deserialize_with = "lenient::count")]
    pub active_retirees: Option<u64>,
}

/// `GET /api/part-medecins-sup-55`: doctors aged over 55.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Over55Record {
    #[serde(default, deserialize_with = "lenient::text")]
    pub code: String,
    #[serde(rename = "departement", default, deserialize_with = "lenient::text")]
    pub label: String,
    #[serde(rename = "omnipraticiens", default, deserialize_with = "lenient::count")]
    pub generalists: Option<u64>,
    #[serde(rename = "specialistes", default, deserialize_with = "lenient::count")]
    pub specialists: Option<u64>,
}

macro_rules! keyed_by_code {
    ($($record:ty),+ $(,)?) => {
        $(
            impl Keyed for $record {
                fn raw_code(&self) -> &str {
                    &self.code
                }
            }
        )+
    };
}

keyed_by_code!(AplRecord, PassagesRecord, DoctorsRecord, RetireesRecord, Over55Record);

impl Keyed for DepartmentStats {
    fn raw_code(&self) -> &str {
        &self.id
    }
}
