use async_trait::async_trait;
use kiosk_core::{IndexPoint, PointPayload, Result, VectorIndex};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-memory vector index with real cosine scoring. Used as the
/// substitutable fake in pipeline tests; upsert semantics match the
/// external index (same id overwrites).
#[derive(Default)]
pub struct MemoryIndex {
    points: RwLock<HashMap<Uuid, (Vec<f32>, PointPayload)>>,
}

impl MemoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.points.read().await.len()
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

#[async_trait]
impl VectorIndex for MemoryIndex {
    async fn ensure_collection(&self) -> Result<()> {
        Ok(())
    }

    async fn upsert(&self, points: Vec<IndexPoint>) -> Result<()> {
        let mut store = self.points.write().await;
        for point in points {
            store.insert(point.id, (point.vector, point.payload));
        }
        Ok(())
    }

    async fn search(&self, vector: &[f32], k: usize) -> Result<Vec<PointPayload>> {
        let store = self.points.read().await;
        let mut scored: Vec<(f32, &PointPayload)> = store
            .values()
            .map(|(v, payload)| (cosine_similarity(vector, v), payload))
            .collect();
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        Ok(scored
            .into_iter()
            .take(k)
            .map(|(_, payload)| payload.clone())
            .collect())
    }
}
