pub mod gemini;
pub mod jina;
pub mod retrieval;

pub use gemini::GeminiGenerator;
pub use jina::JinaEmbedder;
pub use retrieval::{RetrievalPipeline, DEFAULT_TOP_K};

pub mod prelude {
    pub use crate::retrieval::RetrievalPipeline;
    pub use kiosk_core::{Embedder, Generator, Result};
}
