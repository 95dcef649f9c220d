use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::{CollectionError, Link, LinkId, OrderedCollection, OwnerId, RelationshipConfig};
use crate::item::Identified;
use crate::position::PositionKey;

/// Stored form of a link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord<T> {
    pub id: LinkId,
    pub item: T,
    pub key: PositionKey,
}

/// Stored form of a collection: its owner, configuration and links.
///
/// Links are written in key order, but [`OrderedCollection::restore`] accepts
/// them in any order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot<T> {
    pub owner: OwnerId,
    pub config: RelationshipConfig,
    #[serde(default = "Vec::new")]
    pub links: Vec<LinkRecord<T>>,
}

impl<T: Identified + Clone> OrderedCollection<T> {
    /// Captures the collection's links.
    pub fn snapshot(&self) -> Snapshot<T> {
        Snapshot {
            owner: self.owner,
            config: self.config.clone(),
            links: self
                .links
                .iter()
                .map(|link| LinkRecord {
                    id: link.id,
                    item: link.item.clone(),
                    key: link.key,
                })
                .collect(),
        }
    }
}

impl<T: Identified> OrderedCollection<T> {
    /// Rebuilds a collection from stored links.
    ///
    /// The result is not attached to any context.
    ///
    /// # Errors
    /// - [`CollectionError::DuplicateKey`] if two links share a key
    /// - [`CollectionError::DuplicateItem`] if two links hold the same item
    pub fn restore(snapshot: Snapshot<T>) -> Result<Self, CollectionError> {
        let Snapshot {
            owner,
            config,
            links,
        } = snapshot;

        let mut links: Vec<Link<T>> = links
            .into_iter()
            .map(|record| Link {
                id: record.id,
                owner,
                item: record.item,
                key: record.key,
            })
            .collect();
        links.sort_by_key(Link::key);

        if let Some(pair) = links.windows(2).find(|pair| pair[0].key == pair[1].key) {
            return Err(CollectionError::DuplicateKey { key: pair[0].key });
        }

        let mut seen = HashSet::with_capacity(links.len());
        for (index, link) in links.iter().enumerate() {
            let id = link.item.id();
            if seen.contains(&id) {
                return Err(CollectionError::DuplicateItem {
                    index,
                    item: format!("{id:?}"),
                });
            }
            seen.insert(id);
        }

        tracing::debug!(%owner, links = links.len(), "Restored collection");
        Ok(Self {
            owner,
            config,
            context: None,
            links,
        })
    }
}
