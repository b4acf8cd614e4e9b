// Theme profile store
// Single-table persistence for backed-up theme selections

mod error;
mod mapper;
mod store;
mod task;

pub use error::{ProfileStoreError, StoreResult};
pub use store::ThemeProfileStore;
pub use task::ProfileWriteTask;
