use std::sync::{Arc, RwLock};

use super::PluginConfiguration;

/// Holds the current plugin configuration as an immutable snapshot.
///
/// Readers get an `Arc` to a complete configuration; a change event swaps the
/// whole snapshot, so no reader ever sees a half-applied update.
#[derive(Debug, Default)]
pub struct ConfigStore {
    current: RwLock<Arc<PluginConfiguration>>,
}

impl ConfigStore {
    pub fn new(initial: PluginConfiguration) -> Self {
        Self {
            current: RwLock::new(Arc::new(initial)),
        }
    }

    pub fn snapshot(&self) -> Arc<PluginConfiguration> {
        let guard = self
            .current
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Arc::clone(&*guard)
    }

    pub fn replace(&self, next: PluginConfiguration) {
        let next = Arc::new(next);
        let mut guard = self
            .current
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = next;
    }
}
