//! In-memory tag registry.
//!
//! # Responsibility
//! - Own every tag known to the store.
//! - Provide create-or-fetch (upsert) by case-insensitive name.
//!
//! # Invariants
//! - No two tags share a name under trim + lowercase.
//! - Upserting an existing name returns it unchanged; the color argument is
//!   ignored on match.
//! - Tags are never removed or renamed here.

use crate::model::tag::{tag_name_key, Tag, TagId};
use crate::store::id::new_tag_id;
use crate::store::TagRepository;
use log::debug;
use std::collections::HashMap;

/// Tag registry keyed by tag id.
#[derive(Debug, Default)]
pub struct TagRegistry {
    tags: HashMap<TagId, Tag>,
}

impl TagRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Returns whether `tag_id` resolves to a registered tag.
    pub fn contains(&self, tag_id: &str) -> bool {
        self.tags.contains_key(tag_id)
    }

    fn find_by_name(&self, name: &str) -> Option<&Tag> {
        let key = tag_name_key(name);
        self.tags.values().find(|tag| tag_name_key(&tag.name) == key)
    }
}

impl TagRepository for TagRegistry {
    fn list_tags(&self) -> Vec<Tag> {
        let mut tags: Vec<Tag> = self.tags.values().cloned().collect();
        tags.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.name.cmp(&b.name))
                .then_with(|| a.id.cmp(&b.id))
        });
        tags
    }

    fn upsert_tag(&mut self, name: &str, color: Option<&str>) -> Tag {
        if let Some(existing) = self.find_by_name(name) {
            debug!(
                "event=tag_upsert module=store status=ok outcome=existing tag_id={}",
                existing.id
            );
            return existing.clone();
        }

        let tag = Tag {
            id: new_tag_id(),
            name: name.trim().to_string(),
            color: color.map(str::to_string),
        };
        self.tags.insert(tag.id.clone(), tag.clone());
        debug!(
            "event=tag_upsert module=store status=ok outcome=created tag_id={}",
            tag.id
        );
        tag
    }

    fn get_tag(&self, tag_id: &str) -> Option<Tag> {
        self.tags.get(tag_id).cloned()
    }
}
