pub mod chunk;
pub mod extract;
pub mod feed;
pub mod identity;
pub mod pipeline;

pub use extract::HttpExtractor;
pub use feed::NewsApiFeed;
pub use pipeline::{IngestPipeline, IngestReport};

pub mod prelude {
    pub use crate::pipeline::{IngestPipeline, IngestReport};
    pub use kiosk_core::{Error, Result};
}
