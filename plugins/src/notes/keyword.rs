use std::collections::BTreeMap;

use async_trait::async_trait;
use dayplan_core::api::{NoteHit, NoteLookup};

/// Built-in study knowledge base.
pub const DEFAULT_KNOWLEDGE_BASE: [(&str, &str); 4] = [
    (
        "machine learning",
        "Machine learning is the study of algorithms that improve from experience.",
    ),
    (
        "compiler design",
        "A compiler translates source code into executable machine code.",
    ),
    (
        "networking",
        "Computer networks enable devices to communicate and share resources.",
    ),
    (
        "data structures",
        "Common data structures include arrays, linked lists, stacks, and queues.",
    ),
];

/// Keyword table lookup: an entry hits when the lower-cased query contains
/// its keyword. Hits come back in table order.
#[derive(Debug, Clone)]
pub struct KeywordNotes {
    entries: Vec<(String, String)>,
}

impl KeywordNotes {
    pub fn new<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (Into::<String>::into(k).to_lowercase(), v.into()))
                .collect(),
        }
    }

    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        Self::new(map.iter().map(|(k, v)| (k.clone(), v.clone())))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for KeywordNotes {
    fn default() -> Self {
        Self::new(DEFAULT_KNOWLEDGE_BASE)
    }
}

#[async_trait]
impl NoteLookup for KeywordNotes {
    fn name(&self) -> &str {
        "keyword"
    }

    async fn search(&self, query: &str, limit: usize) -> anyhow::Result<Vec<NoteHit>> {
        let query = query.to_lowercase();
        Ok(self
            .entries
            .iter()
            .filter(|(keyword, _)| query.contains(keyword.as_str()))
            .take(limit)
            .map(|(keyword, note)| NoteHit::new(keyword.clone(), note.clone()))
            .collect())
    }
}
