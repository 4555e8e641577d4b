//! Doubly linked list backed by [`SlotArena`].
//!
//! Nodes are linked by [`SlotId`] instead of pointers, which gives the
//! recency policies stable handles and O(1) move-to-front without `unsafe`.
//!
//! ## Architecture
//!
//! ```text
//!   arena (SlotArena<Node<T>>)
//!   ┌────────┬─────────────────────────────────────────────┐
//!   │ SlotId │ Node { value, prev, next }                  │
//!   ├────────┼─────────────────────────────────────────────┤
//!   │ id_1   │ { value: A, prev: None, next: Some(id_2) }  │
//!   │ id_2   │ { value: B, prev: Some(id_1), next: id_3 }  │
//!   │ id_3   │ { value: C, prev: Some(id_2), next: None }  │
//!   └────────┴─────────────────────────────────────────────┘
//!
//!   head ─► [id_1] ◄──► [id_2] ◄──► [id_3] ◄── tail
//! ```
//!
//! ## Performance
//! - `push_front` / `pop_front` / `pop_back`: O(1)
//! - `move_to_front` / `remove`: O(1)
//! - `iter`: O(n)

use crate::ds::slot_arena::{SlotArena, SlotId};

#[derive(Debug)]
struct Node<T> {
    value: T,
    prev: Option<SlotId>,
    next: Option<SlotId>,
}

/// List whose nodes live in a [`SlotArena`] and are linked via [`SlotId`].
#[derive(Debug)]
pub struct IntrusiveList<T> {
    arena: SlotArena<Node<T>>,
    head: Option<SlotId>,
    tail: Option<SlotId>,
}

impl<T> IntrusiveList<T> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self {
            arena: SlotArena::new(),
            head: None,
            tail: None,
        }
    }

    /// Creates an empty list with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: SlotArena::with_capacity(capacity),
            head: None,
            tail: None,
        }
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn contains(&self, id: SlotId) -> bool {
        self.arena.contains(id)
    }

    /// Value at the head.
    pub fn front(&self) -> Option<&T> {
        self.head.and_then(|id| self.get(id))
    }

    /// Value at the tail.
    pub fn back(&self) -> Option<&T> {
        self.tail.and_then(|id| self.get(id))
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.arena.get(id).map(|node| &node.value)
    }

    /// Iterates values from head to tail.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            current: self.head,
        }
    }

    /// Inserts `value` at the head and returns its handle.
    pub fn push_front(&mut self, value: T) -> SlotId {
        let id = self.arena.insert(Node {
            value,
            prev: None,
            next: self.head,
        });
        match self.head {
            Some(old_head) => {
                if let Some(node) = self.arena.get_mut(old_head) {
                    node.prev = Some(id);
                }
            },
            None => self.tail = Some(id),
        }
        self.head = Some(id);
        id
    }

    /// Removes and returns the head value.
    pub fn pop_front(&mut self) -> Option<T> {
        let id = self.head?;
        self.remove(id)
    }

    /// Removes and returns the tail value.
    pub fn pop_back(&mut self) -> Option<T> {
        let id = self.tail?;
        self.remove(id)
    }

    /// Unlinks node `id` and returns its value.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        self.detach(id)?;
        self.arena.remove(id).map(|node| node.value)
    }

    /// Moves an existing node to the head; returns `false` if `id` is unknown.
    pub fn move_to_front(&mut self, id: SlotId) -> bool {
        if !self.arena.contains(id) {
            return false;
        }
        if self.head == Some(id) {
            return true;
        }
        self.detach(id);
        self.attach_front(id);
        true
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.head = None;
        self.tail = None;
    }

    fn detach(&mut self, id: SlotId) -> Option<()> {
        let (prev, next) = {
            let node = self.arena.get(id)?;
            (node.prev, node.next)
        };

        match prev {
            Some(prev_id) => {
                if let Some(prev_node) = self.arena.get_mut(prev_id) {
                    prev_node.next = next;
                }
            },
            None => self.head = next,
        }

        match next {
            Some(next_id) => {
                if let Some(next_node) = self.arena.get_mut(next_id) {
                    next_node.prev = prev;
                }
            },
            None => self.tail = prev,
        }

        let node = self.arena.get_mut(id)?;
        node.prev = None;
        node.next = None;
        Some(())
    }

    fn attach_front(&mut self, id: SlotId) {
        let old_head = self.head;
        let Some(node) = self.arena.get_mut(id) else {
            return;
        };
        node.prev = None;
        node.next = old_head;

        match old_head {
            Some(old_head) => {
                if let Some(head_node) = self.arena.get_mut(old_head) {
                    head_node.prev = Some(id);
                }
            },
            None => self.tail = Some(id),
        }
        self.head = Some(id);
    }

    /// Walks the list and reports the first broken link, if any.
    pub(crate) fn check_links(&self) -> Result<(), &'static str> {
        if self.head.is_none() || self.tail.is_none() {
            if self.head.is_some() || self.tail.is_some() || !self.is_empty() {
                return Err("head/tail disagree with emptiness");
            }
            return Ok(());
        }

        let mut count = 0usize;
        let mut current = self.head;
        let mut prev = None;
        while let Some(id) = current {
            let node = self.arena.get(id).ok_or("dangling link")?;
            if node.prev != prev {
                return Err("prev link mismatch");
            }
            if node.next.is_none() && self.tail != Some(id) {
                return Err("tail does not point at last node");
            }
            count += 1;
            if count > self.len() {
                return Err("cycle in list");
            }
            prev = Some(id);
            current = node.next;
        }

        if count != self.len() {
            return Err("walk length differs from node count");
        }
        Ok(())
    }
}

impl<T> Default for IntrusiveList<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over values from head to tail.
pub struct Iter<'a, T> {
    list: &'a IntrusiveList<T>,
    current: Option<SlotId>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        let node = self.list.arena.get(id)?;
        self.current = node.next;
        Some(&node.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect<T: Copy>(list: &IntrusiveList<T>) -> Vec<T> {
        list.iter().copied().collect()
    }

    #[test]
    fn push_front_orders_newest_first() {
        let mut list = IntrusiveList::new();
        list.push_front(1);
        list.push_front(2);
        list.push_front(3);

        assert_eq!(collect(&list), vec![3, 2, 1]);
        assert_eq!(list.front(), Some(&3));
        assert_eq!(list.back(), Some(&1));
        assert!(list.check_links().is_ok());
    }

    #[test]
    fn pop_both_ends() {
        let mut list = IntrusiveList::with_capacity(3);
        list.push_front("a");
        list.push_front("b");
        list.push_front("c");

        assert_eq!(list.pop_back(), Some("a"));
        assert_eq!(list.pop_front(), Some("c"));
        assert_eq!(collect(&list), vec!["b"]);
        assert_eq!(list.pop_back(), Some("b"));
        assert_eq!(list.pop_front(), None);
        assert!(list.is_empty());
        assert!(list.check_links().is_ok());
    }

    #[test]
    fn move_to_front_relinks_middle_and_tail() {
        let mut list = IntrusiveList::new();
        let a = list.push_front('a');
        let b = list.push_front('b');
        list.push_front('c');

        assert!(list.move_to_front(b));
        assert_eq!(collect(&list), vec!['b', 'c', 'a']);

        assert!(list.move_to_front(a));
        assert_eq!(collect(&list), vec!['a', 'b', 'c']);
        assert_eq!(list.back(), Some(&'c'));
        assert!(list.check_links().is_ok());
    }

    #[test]
    fn move_to_front_of_head_is_noop() {
        let mut list = IntrusiveList::new();
        list.push_front(1);
        let head = list.push_front(2);

        assert!(list.move_to_front(head));
        assert_eq!(collect(&list), vec![2, 1]);
    }

    #[test]
    fn stale_handle_is_rejected() {
        let mut list = IntrusiveList::new();
        let a = list.push_front(1);
        assert_eq!(list.remove(a), Some(1));

        assert!(!list.contains(a));
        assert!(!list.move_to_front(a));
        assert_eq!(list.remove(a), None);
    }

    #[test]
    fn remove_middle_keeps_links() {
        let mut list = IntrusiveList::new();
        list.push_front(1);
        let mid = list.push_front(2);
        list.push_front(3);

        assert_eq!(list.remove(mid), Some(2));
        assert_eq!(collect(&list), vec![3, 1]);
        assert!(list.check_links().is_ok());
    }

    #[test]
    fn clear_resets_everything() {
        let mut list = IntrusiveList::new();
        list.push_front(1);
        list.push_front(2);
        list.clear();

        assert!(list.is_empty());
        assert_eq!(list.front(), None);
        assert_eq!(list.back(), None);
        assert!(list.check_links().is_ok());
    }
}
