use serde::{Deserialize, Serialize};

/// A record held by the suggester
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item<M = serde_json::Value> {
    pub id: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<M>,
}

impl<M> Item<M> {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            meta: None,
        }
    }

    pub fn with_meta(mut self, meta: M) -> Self {
        self.meta = Some(meta);
        self
    }

    /// Logically deleted slot: same id, no text, no meta.
    pub(crate) fn tombstone(id: String) -> Self {
        Self {
            id,
            text: String::new(),
            meta: None,
        }
    }

    pub fn is_tombstone(&self) -> bool {
        self.text.is_empty() && self.meta.is_none()
    }
}

/// What `add` accepts: bare text, or a full item.
#[derive(Debug, Clone)]
pub enum ItemInput<M = serde_json::Value> {
    /// Text only; the id is the store length at insertion time.
    Text(String),
    Item(Item<M>),
}

impl<M> ItemInput<M> {
    pub(crate) fn into_item(self, position: usize) -> Item<M> {
        match self {
            ItemInput::Text(text) => Item::new(position.to_string(), text),
            ItemInput::Item(item) => item,
        }
    }
}

impl<M> From<&str> for ItemInput<M> {
    fn from(text: &str) -> Self {
        ItemInput::Text(text.to_string())
    }
}

impl<M> From<String> for ItemInput<M> {
    fn from(text: String) -> Self {
        ItemInput::Text(text)
    }
}

impl<M> From<Item<M>> for ItemInput<M> {
    fn from(item: Item<M>) -> Self {
        ItemInput::Item(item)
    }
}
