pub mod backends;
pub mod session;

pub use backends::{MemoryIndex, QdrantIndex};
pub use session::{MemorySessionStore, RedisSessionStore};

pub mod prelude {
    pub use super::backends::{MemoryIndex, QdrantIndex};
    pub use super::session::{MemorySessionStore, RedisSessionStore};
    pub use kiosk_core::{SessionStore, VectorIndex};
}
