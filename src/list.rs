//! Immutable list helpers shared by every editor surface.
//!
//! None of these functions mutate their input. Each returns a [`Cow`]: it is
//! `Cow::Borrowed` (the caller's own slice) exactly when the operation changed
//! nothing, and `Cow::Owned` with a fresh vector otherwise, so callers can skip
//! redundant work by matching on `Cow::Borrowed`.

use std::borrow::Cow;

/// Items carrying a stable string id.
pub trait Identified {
    fn id(&self) -> &str;
}

/// Items carrying a dense, zero-based `order` field.
pub trait Ordered {
    fn order(&self) -> usize;
    fn set_order(&mut self, order: usize);
}

/// Implements [`Identified`] and [`Ordered`] for structs with `id: String`
/// and `order: usize` fields.
macro_rules! impl_identified_ordered {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $crate::list::Identified for $ty {
                fn id(&self) -> &str {
                    &self.id
                }
            }
            impl $crate::list::Ordered for $ty {
                fn order(&self) -> usize {
                    self.order
                }
                fn set_order(&mut self, order: usize) {
                    self.order = order;
                }
            }
        )*
    };
}

pub(crate) use impl_identified_ordered;

/// Swaps the item at `index` with its predecessor.
pub fn move_up<T: Clone>(items: &[T], index: usize) -> Cow<'_, [T]> {
    if index == 0 || index >= items.len() {
        return Cow::Borrowed(items);
    }
    let mut next = items.to_vec();
    next.swap(index - 1, index);
    Cow::Owned(next)
}

/// Swaps the item at `index` with its successor.
pub fn move_down<T: Clone>(items: &[T], index: usize) -> Cow<'_, [T]> {
    if index >= items.len().saturating_sub(1) {
        return Cow::Borrowed(items);
    }
    let mut next = items.to_vec();
    next.swap(index, index + 1);
    Cow::Owned(next)
}

pub fn remove_at<T: Clone>(items: &[T], index: usize) -> Cow<'_, [T]> {
    if index >= items.len() {
        return Cow::Borrowed(items);
    }
    let mut next = items.to_vec();
    next.remove(index);
    Cow::Owned(next)
}

/// Removes every item matching `predicate`.
pub fn remove_where<T: Clone>(items: &[T], predicate: impl Fn(&T) -> bool) -> Cow<'_, [T]> {
    if !items.iter().any(&predicate) {
        return Cow::Borrowed(items);
    }
    Cow::Owned(items.iter().filter(|item| !predicate(*item)).cloned().collect())
}

pub fn append<T: Clone>(items: &[T], item: T) -> Vec<T> {
    let mut next = items.to_vec();
    next.push(item);
    next
}

pub fn prepend<T: Clone>(items: &[T], item: T) -> Vec<T> {
    insert_at(items, 0, item)
}

/// Inserts `item` at `index`, clamped into `[0, len]`.
pub fn insert_at<T: Clone>(items: &[T], index: usize, item: T) -> Vec<T> {
    let index = index.min(items.len());
    let mut next = Vec::with_capacity(items.len() + 1);
    next.extend_from_slice(&items[..index]);
    next.push(item);
    next.extend_from_slice(&items[index..]);
    next
}

pub fn update_at<T: Clone>(items: &[T], index: usize, updater: impl FnOnce(&T) -> T) -> Cow<'_, [T]> {
    if index >= items.len() {
        return Cow::Borrowed(items);
    }
    let mut next = items.to_vec();
    next[index] = updater(&items[index]);
    Cow::Owned(next)
}

/// Replaces every item matching `predicate` with `updater(item)`.
pub fn update_where<T: Clone>(
    items: &[T],
    predicate: impl Fn(&T) -> bool,
    mut updater: impl FnMut(&T) -> T,
) -> Cow<'_, [T]> {
    if !items.iter().any(&predicate) {
        return Cow::Borrowed(items);
    }
    Cow::Owned(
        items
            .iter()
            .map(|item| {
                if predicate(item) {
                    updater(item)
                } else {
                    item.clone()
                }
            })
            .collect(),
    )
}

/// Drag-drop style move: takes the item out of `from` and reinserts it at `to`.
///
/// A no-op when `from == to` or either index is out of range.
pub fn reorder<T: Clone>(items: &[T], from: usize, to: usize) -> Cow<'_, [T]> {
    if from == to || from >= items.len() || to >= items.len() {
        return Cow::Borrowed(items);
    }
    let mut next = items.to_vec();
    let moved = next.remove(from);
    next.insert(to, moved);
    Cow::Owned(next)
}

/// Rewrites each item's `order` to its position.
pub fn update_order_field<T: Ordered + Clone>(items: &[T]) -> Cow<'_, [T]> {
    if items.iter().enumerate().all(|(i, item)| item.order() == i) {
        return Cow::Borrowed(items);
    }
    Cow::Owned(
        items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let mut item = item.clone();
                item.set_order(i);
                item
            })
            .collect(),
    )
}

/// Same as [`update_order_field`], for a vector the caller already owns.
pub fn renumber<T: Ordered>(items: &mut [T]) {
    for (i, item) in items.iter_mut().enumerate() {
        item.set_order(i);
    }
}

pub fn find_by_id<'a, T: Identified>(items: &'a [T], id: &str) -> Option<&'a T> {
    items.iter().find(|item| item.id() == id)
}

pub fn find_index_by_id<T: Identified>(items: &[T], id: &str) -> Option<usize> {
    items.iter().position(|item| item.id() == id)
}

pub fn remove_by_id<'a, T: Identified + Clone>(items: &'a [T], id: &str) -> Cow<'a, [T]> {
    remove_where(items, |item| item.id() == id)
}

pub fn update_by_id<'a, T: Identified + Clone>(
    items: &'a [T],
    id: &str,
    updater: impl FnMut(&T) -> T,
) -> Cow<'a, [T]> {
    update_where(items, |item| item.id() == id, updater)
}

/// Binds the list operations to an owned vector.
///
/// Each method reports whether the list actually changed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListManager<T> {
    items: Vec<T>,
}

impl<T: Clone> ListManager<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn move_up(&mut self, index: usize) -> bool {
        let next = owned(move_up(&self.items, index));
        self.replace(next)
    }

    pub fn move_down(&mut self, index: usize) -> bool {
        let next = owned(move_down(&self.items, index));
        self.replace(next)
    }

    pub fn remove(&mut self, index: usize) -> bool {
        let next = owned(remove_at(&self.items, index));
        self.replace(next)
    }

    pub fn add(&mut self, item: T) {
        self.items.push(item);
    }

    pub fn insert(&mut self, index: usize, item: T) {
        let index = index.min(self.items.len());
        self.items.insert(index, item);
    }

    pub fn update(&mut self, index: usize, updater: impl FnOnce(&T) -> T) -> bool {
        let next = owned(update_at(&self.items, index, updater));
        self.replace(next)
    }

    pub fn reorder(&mut self, from: usize, to: usize) -> bool {
        let next = owned(reorder(&self.items, from, to));
        self.replace(next)
    }

    fn replace(&mut self, next: Option<Vec<T>>) -> bool {
        match next {
            Some(items) => {
                self.items = items;
                true
            }
            None => false,
        }
    }
}

fn owned<T: Clone>(result: Cow<'_, [T]>) -> Option<Vec<T>> {
    match result {
        Cow::Owned(items) => Some(items),
        Cow::Borrowed(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owned_helper_distinguishes_changes() {
        let items = vec![1, 2, 3];
        assert!(owned(move_up(&items, 0)).is_none());
        assert_eq!(owned(move_up(&items, 1)), Some(vec![2, 1, 3]));
    }

    #[test]
    fn list_manager_reports_changes() {
        let mut manager = ListManager::new(vec!['a', 'b', 'c']);
        assert!(!manager.move_down(2));
        assert!(manager.reorder(0, 2));
        assert_eq!(manager.items(), &['b', 'c', 'a']);
        manager.insert(99, 'z');
        assert_eq!(manager.items().last(), Some(&'z'));
    }
}
