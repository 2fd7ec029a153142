use super::messages::ThreadMessage;
use std::collections::HashMap;

/// Maps pinned message IDs to thread labels, position for position.
///
/// IDs with no message in the thread (external, deleted, never archived)
/// become an empty string, so the output always has the input's length.
pub fn resolve_pinned(pinned_ids: &[String], thread: &[ThreadMessage]) -> Vec<String> {
    let mut labels: HashMap<&str, &str> = HashMap::with_capacity(thread.len());
    for message in thread {
        labels.entry(message.id.as_str()).or_insert(message.label.as_str());
    }

    pinned_ids
        .iter()
        .map(|id| labels.get(id.as_str()).copied().unwrap_or_default().to_owned())
        .collect()
}

/// Display form of the pinned labels. Empty entries are kept.
pub fn join_labels(labels: &[String]) -> String {
    labels.join(", ")
}
