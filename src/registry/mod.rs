//! In-memory project registry.
//!
//! The registry maps project names to their Cursor `state.vscdb` files and
//! records where the global storage database lives. It is rebuilt wholesale
//! on every refresh:
//!
//! 1. Projects are discovered under `<cursor root>/workspaceStorage`
//! 2. The global store is looked up at `<cursor root>/globalStorage/state.vscdb`
//! 3. Explicit project directories are added, replacing same-named entries
//!
//! Each rebuild produces a new immutable [`RegistrySnapshot`] that
//! [`RegistryHandle`] publishes in one step.

mod handle;
mod project;
mod snapshot;

pub use handle::RegistryHandle;
pub use project::{project_name_from_dir, project_name_from_uri, ProjectInfo};
pub use snapshot::{ProjectListing, RegistrySnapshot};
