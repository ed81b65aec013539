//! Display order: the rendering sequence of todo ids, kept apart from the
//! order items arrived in.
//!
//! A drag gesture is reduced by the host to an `(old_index, new_index)` pair
//! (or an "active over target" id pair, see [`positions_of`]); nothing in
//! here knows about pointers or keyboards.

use crate::types::{Todo, TodoId};

/// Relocate the id at `old_index` to `new_index`, keeping the relative
/// order of every other id. Out-of-range indices return the order unchanged.
pub fn move_id(order: &[TodoId], old_index: usize, new_index: usize) -> Vec<TodoId> {
    let mut moved = order.to_vec();
    if old_index >= moved.len() || new_index >= moved.len() || old_index == new_index {
        return moved;
    }
    let id = moved.remove(old_index);
    moved.insert(new_index, id);
    moved
}

/// Translate "`active` was dropped over `over`" into display-order indices.
///
/// `None` when either id is absent or the two are the same, in which case
/// the drop is a no-op.
pub fn positions_of(order: &[TodoId], active: TodoId, over: TodoId) -> Option<(usize, usize)> {
    if active == over {
        return None;
    }
    let old = order.iter().position(|&id| id == active)?;
    let new = order.iter().position(|&id| id == over)?;
    Some((old, new))
}

/// Map `order` onto `items`, skipping ids with no matching item.
pub fn resolve<'a>(order: &[TodoId], items: &'a [Todo]) -> Vec<&'a Todo> {
    order
        .iter()
        .filter_map(|id| items.iter().find(|todo| todo.id == *id))
        .collect()
}
