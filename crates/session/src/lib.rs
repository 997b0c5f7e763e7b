//! The session layer: live collections bound to a store subscription,
//! per-page services (roster, inventory, ledger, attendance sheet), and
//! the dashboard overview.
//!
//! A session owns an `Arc<dyn RecordStore>` plus whatever services the
//! caller opens. Services hold live snapshots and view state; all
//! derivation math lives in `civilcrm-core`.

pub mod attendance;
pub mod clients;
pub mod collection;
pub mod config;
pub mod confirm;
pub mod dashboard;
pub mod error;
pub mod materials;
pub mod paths;
pub mod projects;
pub mod workers;

pub use attendance::AttendanceSheet;
pub use clients::{ClientLedger, ClientView};
pub use collection::LiveCollection;
pub use config::SessionConfig;
pub use confirm::RemovalRequest;
pub use dashboard::ProjectOverview;
pub use error::{SessionError, SessionResult};
pub use materials::{MaterialInventory, MaterialView};
pub use projects::ProjectRegistry;
pub use workers::{WorkerRoster, WorkerView};
