//! Project persistence.
//!
//! - [`encode`] / [`decode`] turn a [`Project`](crate::project::Project)
//!   into an ASCII blob and back
//! - [`KeyValueStore`] abstracts the host's durable storage
//! - [`save_project`], [`load_session`] and friends store the editor session

mod codec;
mod session;
mod store;

pub use codec::{decode, encode};
pub use session::{
    clamp_zoom, clear_project, load_session, save_document, save_project, save_zoom, Restored,
    DEFAULT_ZOOM, MAX_ZOOM, MIN_ZOOM,
};
pub use store::{KeyValueStore, MemoryStore};
