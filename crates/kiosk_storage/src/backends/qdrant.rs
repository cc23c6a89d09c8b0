use async_trait::async_trait;
use kiosk_core::{Error, IndexPoint, PointPayload, Result, VectorIndex, COLLECTION_NAME, EMBEDDING_DIM};
use qdrant_client::{
    qdrant::{
        vectors_config::Config, CreateCollection, Distance, PointStruct, SearchPoints,
        UpsertPoints, VectorParams, Vectors, VectorsConfig, WithPayloadSelector,
    },
    Qdrant,
};
use std::collections::HashMap;
use tracing::info;

/// Qdrant-backed vector index over the `news_articles` collection.
pub struct QdrantIndex {
    client: Qdrant,
    collection_name: String,
}

impl QdrantIndex {
    pub fn new(url: &str, api_key: Option<&str>) -> Result<Self> {
        let mut builder = Qdrant::from_url(url);
        if let Some(key) = api_key {
            builder = builder.api_key(key);
        }
        let client = builder
            .build()
            .map_err(|e| Error::Index(format!("Failed to connect to Qdrant: {}", e)))?;
        Ok(Self {
            client,
            collection_name: COLLECTION_NAME.to_string(),
        })
    }
}

#[async_trait]
impl VectorIndex for QdrantIndex {
    async fn ensure_collection(&self) -> Result<()> {
        let collections = self
            .client
            .list_collections()
            .await
            .map_err(|e| Error::Index(e.to_string()))?;

        if collections
            .collections
            .iter()
            .any(|c| c.name == self.collection_name)
        {
            return Ok(());
        }

        let vector_config = VectorsConfig {
            config: Some(Config::Params(VectorParams {
                size: EMBEDDING_DIM as u64,
                distance: Distance::Cosine.into(),
                ..Default::default()
            })),
        };

        self.client
            .create_collection(CreateCollection {
                collection_name: self.collection_name.clone(),
                vectors_config: Some(vector_config),
                ..Default::default()
            })
            .await
            .map_err(|e| Error::Index(e.to_string()))?;

        info!(collection = %self.collection_name, "created vector collection");
        Ok(())
    }

    async fn upsert(&self, points: Vec<IndexPoint>) -> Result<()> {
        let points: Vec<PointStruct> = points
            .into_iter()
            .map(|point| {
                let mut payload = HashMap::new();
                payload.insert("url".to_string(), point.payload.url.into());
                payload.insert("title".to_string(), point.payload.title.into());
                payload.insert(
                    "chunk_index".to_string(),
                    (point.payload.chunk_index as i64).into(),
                );
                payload.insert("chunk".to_string(), point.payload.chunk.into());
                payload.insert("uid".to_string(), point.payload.uid.into());

                PointStruct {
                    id: Some(point.id.to_string().into()),
                    vectors: Some(Vectors::from(point.vector)),
                    payload,
                }
            })
            .collect();

        self.client
            .upsert_points(UpsertPoints {
                collection_name: self.collection_name.clone(),
                points,
                ..Default::default()
            })
            .await
            .map_err(|e| Error::Index(e.to_string()))?;

        Ok(())
    }

    async fn search(&self, vector: &[f32], k: usize) -> Result<Vec<PointPayload>> {
        let results = self
            .client
            .search_points(SearchPoints {
                collection_name: self.collection_name.clone(),
                vector: vector.to_vec(),
                limit: k as u64,
                with_payload: Some(WithPayloadSelector::from(true)),
                ..Default::default()
            })
            .await
            .map_err(|e| Error::Index(e.to_string()))?;

        let mut payloads = Vec::new();
        for point in results.result {
            let payload = point.payload;
            let chunk = payload
                .get("chunk")
                .and_then(|v| v.as_str())
                .cloned()
                .unwrap_or_default();
            let url = payload
                .get("url")
                .and_then(|v| v.as_str())
                .cloned()
                .unwrap_or_default();
            let title = payload
                .get("title")
                .and_then(|v| v.as_str())
                .cloned()
                .unwrap_or_default();
            let uid = payload
                .get("uid")
                .and_then(|v| v.as_str())
                .cloned()
                .unwrap_or_default();
            let chunk_index = payload
                .get("chunk_index")
                .and_then(|v| v.as_integer())
                .unwrap_or_default() as usize;

            payloads.push(PointPayload {
                url,
                title,
                chunk_index,
                chunk,
                uid,
            });
        }

        Ok(payloads)
    }
}
