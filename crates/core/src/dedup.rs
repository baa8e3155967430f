use crate::traits::MemoryStore;
use std::collections::BTreeSet;
use tracing::error;

/// Collects the distinct `source` names already stored for `user_id`.
///
/// Store failures are logged and yield an empty set, which disables
/// deduplication for the run instead of aborting it.
pub async fn existing_sources<S>(store: &S, user_id: &str) -> BTreeSet<String>
where
    S: MemoryStore + ?Sized,
{
    match store.get_all(user_id).await {
        Ok(records) => records
            .iter()
            .filter_map(|record| record.source())
            .map(str::to_string)
            .collect(),
        Err(error) => {
            error!(user_id, %error, "error retrieving existing memories");
            BTreeSet::new()
        }
    }
}
