//! Small JSON-file persistence for per-user and per-room settings.
//!
//! - [`JsonStore`]: a string-keyed map loaded from and written to one JSON file
//! - [`UserRegistry`]: the PUBG handle each chat user registered
//! - [`RoomDefaultsStore`]: the default season, region and mode of a group room

mod json_store;
mod registry;
mod room_defaults;

pub use crate::storage::json_store::JsonStore;
pub use crate::storage::registry::{RegistryChange, UserRegistry};
pub use crate::storage::room_defaults::{RoomDefaults, RoomDefaultsStore};
