#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use flavor_sweep::{CatalogClient, EntityPage, Error, FlavorAsset, MediaEntity, Prompter, SweepOptions};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ListEntities(u32),
    ListVariants(String),
    Delete(String),
}

/// In-memory catalog that records every call made against it.
#[derive(Default)]
pub struct FakeCatalog {
    pages: Vec<Vec<MediaEntity>>,
    total_count: u64,
    flavors: HashMap<String, Vec<FlavorAsset>>,
    failing_pages: HashSet<u32>,
    failing_entities: HashSet<String>,
    failing_deletes: HashSet<String>,
    calls: Arc<Mutex<Vec<Call>>>,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a page of entities; each entity gets the given flavors.
    pub fn with_page(mut self, entities: Vec<(&str, Vec<FlavorAsset>)>) -> Self {
        let mut page = Vec::new();
        for (id, flavors) in entities {
            page.push(MediaEntity::new(id));
            self.flavors.insert(id.to_string(), flavors);
        }
        self.total_count += page.len() as u64;
        self.pages.push(page);
        self
    }

    /// Append `count` entities that each have a single flavor.
    pub fn with_plain_page(mut self, prefix: &str, count: usize) -> Self {
        let entities: Vec<(String, Vec<FlavorAsset>)> = (0..count)
            .map(|i| {
                let id = format!("{}_{}", prefix, i);
                let flavor = FlavorAsset::new(format!("{}_src", id), true);
                (id, vec![flavor])
            })
            .collect();
        let mut page = Vec::new();
        for (id, flavors) in entities {
            page.push(MediaEntity::new(id.clone()));
            self.flavors.insert(id, flavors);
        }
        self.total_count += page.len() as u64;
        self.pages.push(page);
        self
    }

    pub fn failing_page(mut self, page_index: u32) -> Self {
        self.failing_pages.insert(page_index);
        self
    }

    pub fn failing_entity(mut self, entity_id: &str) -> Self {
        self.failing_entities.insert(entity_id.to_string());
        self
    }

    pub fn failing_delete(mut self, variant_id: &str) -> Self {
        self.failing_deletes.insert(variant_id.to_string());
        self
    }

    pub fn calls(&self) -> Arc<Mutex<Vec<Call>>> {
        Arc::clone(&self.calls)
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl CatalogClient for FakeCatalog {
    async fn list_entities(&self, page_index: u32, page_size: u32) -> Result<EntityPage, Error> {
        self.record(Call::ListEntities(page_index));
        if self.failing_pages.contains(&page_index) {
            return Err(Error::Malformed(format!("page {} unreadable", page_index)));
        }
        let entities = self
            .pages
            .get(page_index as usize)
            .cloned()
            .unwrap_or_default();
        assert!(entities.len() <= page_size as usize, "fake page larger than page size");
        Ok(EntityPage {
            entities,
            total_count: self.total_count,
        })
    }

    async fn list_variants(&self, entity_id: &str) -> Result<Vec<FlavorAsset>, Error> {
        self.record(Call::ListVariants(entity_id.to_string()));
        if self.failing_entities.contains(entity_id) {
            return Err(Error::Status {
                status: 503,
                body: "unavailable".to_string(),
            });
        }
        Ok(self.flavors.get(entity_id).cloned().unwrap_or_default())
    }

    async fn delete_variant(&self, variant_id: &str) -> Result<(), Error> {
        self.record(Call::Delete(variant_id.to_string()));
        if self.failing_deletes.contains(variant_id) {
            return Err(Error::Api {
                code: "FLAVOR_ASSET_ID_NOT_FOUND".to_string(),
                message: format!("Flavor asset id \"{}\" not found", variant_id),
            });
        }
        Ok(())
    }
}

/// Answers prompts from a fixed script; reports closed input when exhausted.
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    questions: Arc<Mutex<Vec<String>>>,
}

impl ScriptedPrompter {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().map(|a| a.to_string()).collect(),
            questions: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn questions(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.questions)
    }
}

#[async_trait]
impl Prompter for ScriptedPrompter {
    async fn ask(&mut self, question: &str) -> Result<Option<String>, Error> {
        self.questions.lock().unwrap().push(question.to_string());
        Ok(self.answers.pop_front())
    }
}

pub fn original(id: &str) -> FlavorAsset {
    FlavorAsset::new(id, true)
}

pub fn derived(id: &str) -> FlavorAsset {
    FlavorAsset::new(id, false)
}

pub fn options(page_size: u32, dry_run: bool) -> SweepOptions {
    SweepOptions {
        dry_run,
        page_size,
        delete_wait: Duration::ZERO,
    }
}

pub fn deletes(calls: &Arc<Mutex<Vec<Call>>>) -> Vec<String> {
    calls
        .lock()
        .unwrap()
        .iter()
        .filter_map(|c| match c {
            Call::Delete(id) => Some(id.clone()),
            _ => None,
        })
        .collect()
}

pub fn pages_fetched(calls: &Arc<Mutex<Vec<Call>>>) -> Vec<u32> {
    calls
        .lock()
        .unwrap()
        .iter()
        .filter_map(|c| match c {
            Call::ListEntities(index) => Some(*index),
            _ => None,
        })
        .collect()
}
