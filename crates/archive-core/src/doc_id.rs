use std::fmt;

use crate::error::{ArchiveError, Result};

/// A stable, deterministic vector-document identifier.
///
/// Earlier integer ids required scanning the vector index for a "next free id"
/// during incremental updates, which produced duplicates after deletions.
/// String ids derived from the article's own primary key eliminate that race:
/// the same article always maps to the same id(s), regardless of index state.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DocId {
    Article { article_id: i64 },
    Chunk { article_id: i64, chunk_index: usize },
}

impl DocId {
    pub fn article(article_id: i64) -> Self {
        DocId::Article { article_id }
    }

    pub fn chunk(article_id: i64, chunk_index: usize) -> Self {
        DocId::Chunk {
            article_id,
            chunk_index,
        }
    }

    /// Renders the canonical string form: `a_{n}` or `c_{n}_{i}`.
    pub fn to_key(&self) -> String {
        match self {
            DocId::Article { article_id } => format!("a_{}", article_id),
            DocId::Chunk {
                article_id,
                chunk_index,
            } => format!("c_{}_{}", article_id, chunk_index),
        }
    }

    /// Parses a key produced by [`DocId::to_key`]. Any other shape is `MalformedId`.
    pub fn parse(key: &str) -> Result<Self> {
        let mut parts = key.splitn(3, '_');
        let tag = parts.next().ok_or_else(|| ArchiveError::malformed_id(key))?;
        match tag {
            "a" => {
                let id_str = parts.next().ok_or_else(|| ArchiveError::malformed_id(key))?;
                if parts.next().is_some() {
                    return Err(ArchiveError::malformed_id(key));
                }
                let article_id = id_str
                    .parse::<i64>()
                    .map_err(|_| ArchiveError::malformed_id(key))?;
                Ok(DocId::Article { article_id })
            }
            "c" => {
                let id_str = parts.next().ok_or_else(|| ArchiveError::malformed_id(key))?;
                let idx_str = parts.next().ok_or_else(|| ArchiveError::malformed_id(key))?;
                let article_id = id_str
                    .parse::<i64>()
                    .map_err(|_| ArchiveError::malformed_id(key))?;
                let chunk_index = idx_str
                    .parse::<usize>()
                    .map_err(|_| ArchiveError::malformed_id(key))?;
                Ok(DocId::Chunk {
                    article_id,
                    chunk_index,
                })
            }
            _ => Err(ArchiveError::malformed_id(key)),
        }
    }

    /// The article this document belongs to, whether it's the whole article or a chunk of it.
    pub fn article_id(&self) -> i64 {
        match self {
            DocId::Article { article_id } => *article_id,
            DocId::Chunk { article_id, .. } => *article_id,
        }
    }

    pub fn is_chunk(&self) -> bool {
        matches!(self, DocId::Chunk { .. })
    }

    pub fn chunk_index(&self) -> Option<usize> {
        match self {
            DocId::Article { .. } => None,
            DocId::Chunk { chunk_index, .. } => Some(*chunk_index),
        }
    }
}

impl fmt::Display for DocId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn article_id_roundtrip() {
        let id = DocId::article(42);
        assert_eq!(id.to_key(), "a_42");
        assert_eq!(DocId::parse("a_42").unwrap(), id);
    }

    #[test]
    fn chunk_id_roundtrip() {
        let id = DocId::chunk(42, 3);
        assert_eq!(id.to_key(), "c_42_3");
        assert_eq!(DocId::parse("c_42_3").unwrap(), id);
    }

    #[test]
    fn extract_article_id_for_both_variants() {
        assert_eq!(DocId::parse("a_7").unwrap().article_id(), 7);
        assert_eq!(DocId::parse("c_7_2").unwrap().article_id(), 7);
    }

    #[test]
    fn malformed_ids_are_rejected() {
        assert!(DocId::parse("").is_err());
        assert!(DocId::parse("b_1").is_err());
        assert!(DocId::parse("a_").is_err());
        assert!(DocId::parse("a_x").is_err());
        assert!(DocId::parse("c_1").is_err());
        assert!(DocId::parse("c_1_x").is_err());
        assert!(DocId::parse("a_1_2").is_err());
    }

    #[test]
    fn no_collisions_between_variants() {
        // An article id and a chunk sharing the same numeric article_id never collide
        // because the tag + separator scheme is unambiguous.
        assert_ne!(DocId::article(1).to_key(), DocId::chunk(1, 0).to_key());
    }
}
