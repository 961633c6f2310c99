//! Services connecting the fetch layer to stores.

mod alerts;
mod api;

pub use alerts::{AlertListView, AlertsService};
pub use api::{AlertListQuery, AlertsApi};
