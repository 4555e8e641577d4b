//! Helpers shared by the unit tests.

use std::sync::{Arc, Mutex};

/// Returns a shared log of discarded keys and a listener that appends to it.
pub(crate) fn discard_log<K, V>() -> (Arc<Mutex<Vec<K>>>, impl FnMut(&K, &V) + Send + 'static)
where
    K: Clone + Send + 'static,
    V: 'static,
{
    let log = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&log);
    let listener = move |key: &K, _value: &V| {
        sink.lock().unwrap().push(key.clone());
    };
    (log, listener)
}

/// Copies the current contents of a discard log.
pub(crate) fn discarded<K: Clone>(log: &Arc<Mutex<Vec<K>>>) -> Vec<K> {
    log.lock().unwrap().clone()
}
