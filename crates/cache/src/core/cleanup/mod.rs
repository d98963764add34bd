//! Background maintenance for the cache engine

mod background;

use super::types::Cache;

impl<V> Cache<V>
where
    V: Clone + Send + Sync + 'static,
{
    pub(super) fn start_background_tasks(&self) {
        background::start(self);
    }
}
