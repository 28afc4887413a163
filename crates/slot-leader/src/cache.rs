use crate::{
    context::EpochContext,
    resolver::{ResolutionError, Resolver},
    store::EpochStore,
};

use lru::LruCache;
use std::sync::Arc;

/// Default number of epochs kept by [`ContextCache::default`]
pub const DEFAULT_CACHE_CAPACITY: usize = 8;

/// Keeps the most recently used epoch contexts around, so that proving and verifying many slots
/// of the same epoch does not hit the store every time. Contexts are immutable, which makes
/// sharing them through an `Arc` safe.
pub struct ContextCache {
    contexts: LruCache<u64, Arc<EpochContext>>,
}

impl Default for ContextCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl ContextCache {
    /// Initializes an empty cache holding up to `capacity` epochs (at least one)
    pub fn new(capacity: usize) -> Self {
        Self {
            contexts: LruCache::new(capacity.max(1)),
        }
    }

    pub fn get(&mut self, epoch_id: u64) -> Option<Arc<EpochContext>> {
        self.contexts.get(&epoch_id).cloned()
    }

    pub fn insert(&mut self, context: Arc<EpochContext>) {
        self.contexts.put(context.epoch_id, context);
    }

    /// Returns the cached context of `epoch_id`, or resolves it, saves it to the cache for later
    /// use and returns it
    pub fn get_or_resolve<S: EpochStore>(
        &mut self,
        resolver: &Resolver<S>,
        epoch_id: u64,
    ) -> Result<Arc<EpochContext>, ResolutionError> {
        match self.get(epoch_id) {
            // cache hit
            Some(context) => Ok(context),
            // cache miss
            None => {
                let context = Arc::new(resolver.resolve(epoch_id)?);
                self.insert(context.clone());
                Ok(context)
            }
        }
    }

    pub fn len(&self) -> usize {
        self.contexts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }

    pub fn clear(&mut self) {
        self.contexts.clear();
    }
}
