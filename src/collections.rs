//! Observable row storage and the selection model the table view exposes.
//!
//! Listeners run synchronously inside the mutating call, so a view that
//! subscribes sees every change before control returns to the caller.

use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListChange<T> {
    /// Items now occupy `from..to`.
    Added { from: usize, to: usize },
    Removed { index: usize, item: T },
    Cleared { removed: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener<T> = Box<dyn FnMut(&ListChange<T>)>;

pub struct ObservableList<T> {
    items: Vec<T>,
    listeners: Vec<(SubscriptionId, Listener<T>)>,
    next_subscription: u64,
}

impl<T> ObservableList<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&ListChange<T>) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false when the subscription was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    pub fn push(&mut self, item: T) {
        let from = self.items.len();
        self.items.push(item);
        self.notify(ListChange::Added { from, to: from + 1 });
    }

    /// Appends every item and fires a single change. Nothing fires for an
    /// empty batch.
    pub fn extend(&mut self, items: impl IntoIterator<Item = T>) {
        let from = self.items.len();
        self.items.extend(items);
        let to = self.items.len();
        if to > from {
            self.notify(ListChange::Added { from, to });
        }
    }

    pub fn remove(&mut self, index: usize) -> Option<T>
    where
        T: Clone,
    {
        if index >= self.items.len() {
            return None;
        }
        let item = self.items.remove(index);
        self.notify(ListChange::Removed {
            index,
            item: item.clone(),
        });
        Some(item)
    }

    pub fn clear(&mut self) {
        let removed = self.items.len();
        self.items.clear();
        self.notify(ListChange::Cleared { removed });
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    fn notify(&mut self, change: ListChange<T>) {
        for (_, listener) in &mut self.listeners {
            listener(&change);
        }
    }
}

impl<T> Default for ObservableList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for ObservableList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
            ..Self::new()
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for ObservableList<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObservableList")
            .field("items", &self.items)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl<'a, T> IntoIterator for &'a ObservableList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SelectionMode {
    #[default]
    Single,
    Multiple,
}

#[derive(Debug, Clone, Default)]
pub struct SelectionModel {
    mode: SelectionMode,
    selected: BTreeSet<usize>,
}

impl SelectionModel {
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            selected: BTreeSet::new(),
        }
    }

    pub fn select(&mut self, index: usize) {
        if self.mode == SelectionMode::Single {
            self.selected.clear();
        }
        self.selected.insert(index);
    }

    pub fn clear_selection(&mut self, index: usize) {
        self.selected.remove(&index);
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected.contains(&index)
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Ascending order.
    pub fn selected_indices(&self) -> Vec<usize> {
        self.selected.iter().copied().collect()
    }
}
