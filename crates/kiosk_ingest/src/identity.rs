use uuid::Uuid;

/// Stable identity for a (source url, chunk index) pair.
///
/// A name-based v5 UUID under a fixed namespace: re-ingesting the same URL
/// regenerates identical ids for identical chunk positions, so upserts
/// overwrite instead of duplicating.
pub fn chunk_point_id(url: &str, index: usize) -> Uuid {
    Uuid::new_v5(&Uuid::NAMESPACE_DNS, format!("{}-{}", url, index).as_bytes())
}

/// Human-readable display label for a chunk. Not unique by construction
/// (a URL ending in "-1" collides) and never used as a storage key.
pub fn chunk_uid(url: &str, index: usize) -> String {
    format!("{}-{}", url, index + 1)
}
