//! Local mirror of the page currently shown.
//!
//! # Design
//! `TodoStore` holds two sequences: the items as loaded and the display
//! order used for rendering. Fields are private; every mutation goes through
//! one of the named operations below, each of which keeps `display_order` a
//! permutation of the item ids. Nothing here performs I/O or logs; the
//! coordinator decides when each operation runs.

use crate::order;
use crate::stats::TodoStats;
use crate::types::{Todo, TodoId};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoStore {
    items: Vec<Todo>,
    display_order: Vec<TodoId>,
}

/// An item taken out of the store, with enough position information to put
/// it back exactly where it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovedTodo {
    pub todo: Todo,
    pub item_index: usize,
    pub order_index: usize,
}

impl TodoStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[Todo] {
        &self.items
    }

    pub fn display_order(&self) -> &[TodoId] {
        &self.display_order
    }

    pub fn get(&self, id: TodoId) -> Option<&Todo> {
        self.items.iter().find(|todo| todo.id == id)
    }

    pub fn contains(&self, id: TodoId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items in rendering order.
    pub fn ordered(&self) -> Vec<&Todo> {
        order::resolve(&self.display_order, &self.items)
    }

    pub fn stats(&self) -> TodoStats {
        TodoStats::from_items(&self.items)
    }

    /// Replace the whole page. Display order resets to load order; duplicate
    /// ids in `todos` keep their first occurrence.
    pub fn replace_all(&mut self, todos: Vec<Todo>) {
        self.items.clear();
        self.display_order.clear();
        for todo in todos {
            if !self.contains(todo.id) {
                self.display_order.push(todo.id);
                self.items.push(todo);
            }
        }
    }

    /// Insert `todo` at the head of both sequences.
    pub fn prepend(&mut self, todo: Todo) {
        self.detach(todo.id);
        self.display_order.insert(0, todo.id);
        self.items.insert(0, todo);
    }

    /// Swap the item with `id` for `todo` in place, updating its id in the
    /// display order too. Returns `false` when `id` is not loaded.
    pub fn replace_by_id(&mut self, id: TodoId, todo: Todo) -> bool {
        if !self.contains(id) {
            return false;
        }
        if todo.id != id {
            self.detach(todo.id);
        }
        if let Some(slot) = self.items.iter_mut().find(|item| item.id == id) {
            if let Some(order_slot) = self.display_order.iter_mut().find(|oid| **oid == id) {
                *order_slot = todo.id;
            }
            *slot = todo;
        }
        true
    }

    /// Take the item with `id` out of both sequences.
    pub fn remove_by_id(&mut self, id: TodoId) -> Option<RemovedTodo> {
        let item_index = self.items.iter().position(|todo| todo.id == id)?;
        let todo = self.items.remove(item_index);
        let order_index = match self.display_order.iter().position(|oid| *oid == id) {
            Some(index) => {
                self.display_order.remove(index);
                index
            }
            None => item_index,
        };
        Some(RemovedTodo {
            todo,
            item_index,
            order_index,
        })
    }

    /// Put a previously removed item back at its recorded positions (clamped
    /// to the current lengths). Returns `false` if its id has reappeared in
    /// the meantime, in which case nothing changes.
    pub fn restore(&mut self, removed: RemovedTodo) -> bool {
        if self.contains(removed.todo.id) {
            return false;
        }
        let order_index = removed.order_index.min(self.display_order.len());
        self.display_order.insert(order_index, removed.todo.id);
        let item_index = removed.item_index.min(self.items.len());
        self.items.insert(item_index, removed.todo);
        true
    }

    /// Flip the completion flag. Returns the new value.
    pub fn toggle_completion(&mut self, id: TodoId) -> Option<bool> {
        let todo = self.items.iter_mut().find(|todo| todo.id == id)?;
        todo.completed = !todo.completed;
        Some(todo.completed)
    }

    /// Force the completion flag to `completed`. Returns `false` when `id` is
    /// not loaded.
    pub fn set_completion(&mut self, id: TodoId, completed: bool) -> bool {
        match self.items.iter_mut().find(|todo| todo.id == id) {
            Some(todo) => {
                todo.completed = completed;
                true
            }
            None => false,
        }
    }

    /// Install a new rendering order. Rejected (returns `false`) unless it
    /// is a permutation of the loaded ids.
    pub fn set_display_order(&mut self, order: Vec<TodoId>) -> bool {
        if order.len() != self.items.len() {
            return false;
        }
        let mut expected: Vec<TodoId> = self.items.iter().map(|todo| todo.id).collect();
        let mut given = order.clone();
        expected.sort_unstable();
        given.sort_unstable();
        if expected != given {
            return false;
        }
        self.display_order = order;
        true
    }

    fn detach(&mut self, id: TodoId) {
        self.items.retain(|todo| todo.id != id);
        self.display_order.retain(|oid| *oid != id);
    }
}
