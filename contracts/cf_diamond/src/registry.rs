//! # Selector Registry
//!
//! Bidirectional mapping between selectors and the facets that implement
//! them, plus the order in which facets were first registered.
//!
//! The whole registry is one instance-storage value. Callers load it, mutate
//! the loaded copy, and only [`SelectorRegistry::save`] it once every change
//! has been validated, so a rejected batch never touches stored state.

use soroban_sdk::{contracttype, BytesN, Env, Map, Vec};

use crate::storage;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SelectorRegistry {
    /// selector → facet address
    pub selector_facet: Map<BytesN<4>, BytesN<32>>,
    /// facet address → selectors, in registration order
    pub facet_selectors: Map<BytesN<32>, Vec<BytesN<4>>>,
    /// Facets owning at least one selector, in first-registration order.
    pub facet_order: Vec<BytesN<32>>,
}

impl SelectorRegistry {
    pub fn new(env: &Env) -> Self {
        Self {
            selector_facet: Map::new(env),
            facet_selectors: Map::new(env),
            facet_order: Vec::new(env),
        }
    }

    /// Stored registry, or an empty one before the first cut.
    pub fn load(env: &Env) -> Self {
        storage::load_registry(env).unwrap_or_else(|| Self::new(env))
    }

    pub fn save(&self, env: &Env) {
        storage::save_registry(env, self);
    }

    pub fn facet_of(&self, selector: &BytesN<4>) -> Option<BytesN<32>> {
        self.selector_facet.get(selector.clone())
    }

    pub fn selectors_of(&self, facet: &BytesN<32>) -> Vec<BytesN<4>> {
        self.facet_selectors
            .get(facet.clone())
            .unwrap_or_else(|| Vec::new(self.facet_order.env()))
    }

    pub fn facets(&self) -> Vec<BytesN<32>> {
        self.facet_order.clone()
    }

    /// Map `selector` to `facet`. The selector must currently be unmapped.
    pub fn insert(&mut self, selector: &BytesN<4>, facet: &BytesN<32>) {
        let mut selectors = match self.facet_selectors.get(facet.clone()) {
            Some(existing) => existing,
            None => {
                self.facet_order.push_back(facet.clone());
                Vec::new(self.facet_order.env())
            }
        };
        selectors.push_back(selector.clone());
        self.facet_selectors.set(facet.clone(), selectors);
        self.selector_facet.set(selector.clone(), facet.clone());
    }

    /// Unmap `selector`, returning the facet it pointed to. A facet left
    /// without selectors drops out of the facet order.
    pub fn remove(&mut self, selector: &BytesN<4>) -> Option<BytesN<32>> {
        let facet = self.selector_facet.get(selector.clone())?;
        self.selector_facet.remove(selector.clone());

        let mut selectors = self.selectors_of(&facet);
        if let Some(index) = selectors.first_index_of(selector) {
            selectors.remove(index);
        }
        if selectors.is_empty() {
            self.facet_selectors.remove(facet.clone());
            if let Some(index) = self.facet_order.first_index_of(&facet) {
                self.facet_order.remove(index);
            }
        } else {
            self.facet_selectors.set(facet.clone(), selectors);
        }
        Some(facet)
    }

    /// True when both maps and the facet order describe the same relation.
    pub fn is_consistent(&self) -> bool {
        for (selector, facet) in self.selector_facet.iter() {
            match self.facet_selectors.get(facet) {
                Some(selectors) if selectors.contains(&selector) => {}
                _ => return false,
            }
        }
        let mut counted: u32 = 0;
        for (facet, selectors) in self.facet_selectors.iter() {
            if selectors.is_empty() || !self.facet_order.contains(&facet) {
                return false;
            }
            for selector in selectors.iter() {
                if self.selector_facet.get(selector) != Some(facet.clone()) {
                    return false;
                }
                counted += 1;
            }
        }
        counted == self.selector_facet.len() && self.facet_order.len() == self.facet_selectors.len()
    }
}
