//! Content slice: magazines, articles and digests in one list.

use crate::models::ContentItem;

#[derive(Debug, Clone, PartialEq)]
pub enum ContentAction {
    FetchPending,
    FetchFulfilled(Vec<ContentItem>),
    FetchRejected(String),
    /// A detail fetch: upsert into `items` and select it.
    DetailFulfilled(ContentItem),
    Clear,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentSlice {
    pub items: Vec<ContentItem>,
    pub selected: Option<ContentItem>,
    pub loading: bool,
    pub error: Option<String>,
    pub revision: u64,
}

impl ContentSlice {
    pub fn reduce(&mut self, action: ContentAction) {
        match action {
            ContentAction::FetchPending => {
                self.loading = true;
                self.error = None;
            }
            ContentAction::FetchFulfilled(items) => {
                self.loading = false;
                self.items = items;
                self.revision += 1;
            }
            ContentAction::FetchRejected(message) => {
                self.loading = false;
                self.error = Some(message);
            }
            ContentAction::DetailFulfilled(item) => {
                self.loading = false;
                match self.items.iter_mut().find(|i| i.id == item.id) {
                    Some(existing) => *existing = item.clone(),
                    None => self.items.push(item.clone()),
                }
                self.selected = Some(item);
                self.revision += 1;
            }
            ContentAction::Clear => {
                *self = ContentSlice {
                    revision: self.revision + 1,
                    ..ContentSlice::default()
                };
            }
        }
    }
}
