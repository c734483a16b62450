//! HTTP surface of the dashboard.
//!
//! `dashboard_router()` returns a composable `Router` serving the HTML
//! views, their JSON counterparts under `/data`, and `/health`.

pub mod endpoints;
pub mod error;
pub mod router;
pub mod server;
pub mod types;

pub use router::dashboard_router;
pub use server::{start_dashboard_server, DashboardServer, DashboardSession};
pub use types::ApiContext;
