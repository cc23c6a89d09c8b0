pub mod error;
pub mod models;
pub mod sources;
pub mod storage;
pub mod types;

pub use error::Error;
pub use models::{Embedder, Generator};
pub use sources::{ArticleExtractor, ArticleFeed};
pub use storage::{SessionStore, VectorIndex};
pub use types::{
    Chunk, EmbeddingTask, FeedArticle, IndexPoint, PointPayload, Role, SessionMessage,
    COLLECTION_NAME, EMBEDDING_DIM,
};

pub type Result<T> = std::result::Result<T, Error>;
