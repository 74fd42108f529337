//! Derived views over the store.
//!
//! The free functions are pure. [`Selectors`] wraps them with a cache keyed
//! on the revision of the slice they read, so a screen can ask for the same
//! view on every frame without recomputing it.

use crate::models::{ContentItem, ContentKind, Plan};
use crate::store::Store;

/// Content split by kind. Every input item lands in exactly one group.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategorizedContent {
    pub magazines: Vec<ContentItem>,
    pub articles: Vec<ContentItem>,
    pub digests: Vec<ContentItem>,
}

impl CategorizedContent {
    pub fn len(&self) -> usize {
        self.magazines.len() + self.articles.len() + self.digests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn of_kind(&self, kind: ContentKind) -> &[ContentItem] {
        match kind {
            ContentKind::Magazine => &self.magazines,
            ContentKind::Article => &self.articles,
            ContentKind::Digest => &self.digests,
        }
    }
}

pub fn categorize(items: &[ContentItem]) -> CategorizedContent {
    let mut out = CategorizedContent::default();
    for item in items {
        match item.kind {
            ContentKind::Magazine => out.magazines.push(item.clone()),
            ContentKind::Article => out.articles.push(item.clone()),
            ContentKind::Digest => out.digests.push(item.clone()),
        }
    }
    out
}

pub fn active_plans(plans: &[Plan]) -> Vec<Plan> {
    plans.iter().filter(|p| p.is_active).cloned().collect()
}

/// The first active plan that costs nothing.
pub fn free_plan(plans: &[Plan]) -> Option<Plan> {
    plans.iter().find(|p| p.is_active && p.is_free()).cloned()
}

/// Active plans other than the one returned by [`free_plan`].
pub fn paid_plans(plans: &[Plan]) -> Vec<Plan> {
    let free_id = free_plan(plans).map(|p| p.id);
    plans
        .iter()
        .filter(|p| p.is_active && Some(&p.id) != free_id.as_ref())
        .cloned()
        .collect()
}

/// Case-insensitive match on name, category or description.
pub fn search_content(items: &[ContentItem], query: &str) -> Vec<ContentItem> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return items.to_vec();
    }
    let matches = |field: Option<&str>| field.is_some_and(|f| f.to_lowercase().contains(&needle));
    items
        .iter()
        .filter(|item| {
            matches(Some(&item.name))
                || matches(item.category.as_deref())
                || matches(item.description.as_deref())
        })
        .cloned()
        .collect()
}

/// Highest rated first, ties broken by download count.
pub fn top_rated(items: &[ContentItem], n: usize) -> Vec<ContentItem> {
    let mut sorted = items.to_vec();
    sorted.sort_by(|a, b| {
        b.rating
            .total_cmp(&a.rating)
            .then_with(|| b.downloads.cmp(&a.downloads))
    });
    sorted.truncate(n);
    sorted
}

pub fn content_by_id<'a>(items: &'a [ContentItem], id: &str) -> Option<&'a ContentItem> {
    items.iter().find(|item| item.id == id)
}

/// One cached derivation.
#[derive(Debug, Clone, Default)]
struct Memo<K, V> {
    key: Option<K>,
    value: V,
}

impl<K: PartialEq, V> Memo<K, V> {
    fn get_or_compute(&mut self, key: K, compute: impl FnOnce() -> V, misses: &mut u64) -> &V {
        if self.key.as_ref() != Some(&key) {
            *misses += 1;
            self.value = compute();
            self.key = Some(key);
        }
        &self.value
    }
}

/// Memoized selectors over a [`Store`].
#[derive(Debug, Clone, Default)]
pub struct Selectors {
    categorized: Memo<u64, CategorizedContent>,
    searched: Memo<(u64, String), Vec<ContentItem>>,
    top_rated: Memo<(u64, usize), Vec<ContentItem>>,
    active_plans: Memo<u64, Vec<Plan>>,
    free_plan: Memo<u64, Option<Plan>>,
    paid_plans: Memo<u64, Vec<Plan>>,
    recomputations: u64,
}

impl Selectors {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times any selector had to recompute.
    pub fn recomputations(&self) -> u64 {
        self.recomputations
    }

    pub fn categorized(&mut self, store: &Store) -> &CategorizedContent {
        let items = &store.content.items;
        self.categorized.get_or_compute(
            store.content.revision,
            || categorize(items),
            &mut self.recomputations,
        )
    }

    pub fn search(&mut self, store: &Store, query: &str) -> &[ContentItem] {
        let items = &store.content.items;
        self.searched.get_or_compute(
            (store.content.revision, query.trim().to_lowercase()),
            || search_content(items, query),
            &mut self.recomputations,
        )
    }

    pub fn top_rated(&mut self, store: &Store, n: usize) -> &[ContentItem] {
        let items = &store.content.items;
        self.top_rated.get_or_compute(
            (store.content.revision, n),
            || top_rated(items, n),
            &mut self.recomputations,
        )
    }

    pub fn active_plans(&mut self, store: &Store) -> &[Plan] {
        let plans = &store.plans.plans;
        self.active_plans.get_or_compute(
            store.plans.revision,
            || active_plans(plans),
            &mut self.recomputations,
        )
    }

    pub fn free_plan(&mut self, store: &Store) -> Option<&Plan> {
        let plans = &store.plans.plans;
        self.free_plan
            .get_or_compute(
                store.plans.revision,
                || free_plan(plans),
                &mut self.recomputations,
            )
            .as_ref()
    }

    pub fn paid_plans(&mut self, store: &Store) -> &[Plan] {
        let plans = &store.plans.plans;
        self.paid_plans.get_or_compute(
            store.plans.revision,
            || paid_plans(plans),
            &mut self.recomputations,
        )
    }
}
