//! Data models for catalog state.
//!
//! Records held in normalized collections, the pagination payloads that
//! carry them, and the events stores emit.

mod alert;
mod alerts_config;
mod events;
mod page;

pub use alert::{Alert, AlertId, AlertStatus, AlertTotals, AlertType, DataEntityId};
pub use alerts_config::AlertsConfig;
pub use events::{EventMeta, StoreEvent};
pub use page::{Page, PageInfo};
