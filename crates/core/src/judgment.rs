//! Relevance judgments, search hits, and the joiner that pairs them
//!
//! A judgment set is keyed by [`DocumentKey`]. Joining walks the hits in rank
//! order and attaches the rating of the matching judgment, if any. The joined
//! sequence always has the same length and order as the hits it was built from.
//! A document may appear at most once in the judgments and at most once in the
//! hits, so a relevant document is never counted twice.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Identity of a document within a collection
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DocumentKey {
    /// Collection (index) the document lives in
    #[serde(rename = "_index")]
    pub index: String,
    /// Document identifier within the collection
    #[serde(rename = "_id")]
    pub id: String,
}

impl DocumentKey {
    pub fn new(index: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            index: index.into(),
            id: id.into(),
        }
    }
}

impl fmt::Display for DocumentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.index, self.id)
    }
}

/// A human or offline relevance rating for one document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Judgment {
    #[serde(flatten)]
    pub key: DocumentKey,
    pub rating: u32,
}

impl Judgment {
    pub fn new(index: impl Into<String>, id: impl Into<String>, rating: u32) -> Self {
        Self {
            key: DocumentKey::new(index, id),
            rating,
        }
    }
}

/// One ranked search result. Rank is implied by position in the hit list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hit {
    #[serde(flatten)]
    pub key: DocumentKey,
    /// Engine score, carried through for reporting only
    #[serde(default, rename = "_score", skip_serializing_if = "Option::is_none")]
    pub score: Option<f32>,
}

impl Hit {
    pub fn new(index: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            key: DocumentKey::new(index, id),
            score: None,
        }
    }

    pub fn with_score(mut self, score: f32) -> Self {
        self.score = Some(score);
        self
    }
}

/// A hit paired with its rating, `None` when the document was never judged
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatedHit {
    pub hit: Hit,
    pub rating: Option<u32>,
}

impl RatedHit {
    pub fn is_unrated(&self) -> bool {
        self.rating.is_none()
    }
}

/// Pair each hit with the rating of the judgment sharing its document key.
///
/// Hits are never dropped or reordered. Duplicate judgments for the same key
/// are rejected rather than silently letting one rating win, and so are
/// repeated hits.
pub fn join_hits_with_ratings(hits: &[Hit], judgments: &[Judgment]) -> Result<Vec<RatedHit>> {
    let mut ratings: HashMap<&DocumentKey, u32> = HashMap::with_capacity(judgments.len());
    for judgment in judgments {
        if ratings.insert(&judgment.key, judgment.rating).is_some() {
            return Err(Error::duplicate_judgment(
                judgment.key.index.clone(),
                judgment.key.id.clone(),
            ));
        }
    }

    let mut seen: HashSet<&DocumentKey> = HashSet::with_capacity(hits.len());
    hits.iter()
        .map(|hit| {
            if !seen.insert(&hit.key) {
                return Err(Error::duplicate_hit(hit.key.index.clone(), hit.key.id.clone()));
            }
            Ok(RatedHit {
                hit: hit.clone(),
                rating: ratings.get(&hit.key).copied(),
            })
        })
        .collect()
}
