//! Player fly state persistence.

pub mod codec;
pub mod schema;
pub mod store;

pub use codec::CodecError;
pub use schema::{DEFAULT_STORE_NAME, FlagRecord, FlyState, ParseFlyStateError, STORE_EXTENSION};
pub use store::{LoadError, SaveError, StateStore, StoreFile};
