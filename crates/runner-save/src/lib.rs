//! Player progress persistence: lifetime coins, high score, and the
//! character roster, stored in a small key-value store.

pub mod characters;
pub mod error;
pub mod save_data;
pub mod store;

pub use characters::{Character, CharacterStatus, CharacterStore};
pub use error::SaveError;
pub use save_data::{CharacterId, SaveData};
pub use store::{JsonFileStore, KeyValueStore, MemoryStore, Value};
