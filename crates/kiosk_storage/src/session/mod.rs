pub mod memory;
pub mod redis;

pub use memory::MemorySessionStore;
pub use redis::RedisSessionStore;
