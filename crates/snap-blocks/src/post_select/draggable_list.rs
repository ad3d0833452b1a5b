//! Drag-and-drop reordering for the post selector.
//!
//! Items are laid out with flexbox `order`: item `i` sits at order `2i`, and
//! the drop zones between items sit at the odd orders in between. While an
//! item is dragged it takes the order of the zone it hovers over, so the
//! list can be rearranged visually without touching the underlying data.
//! Dropping rebuilds the list from those orders.

use super::selection::ListUpdate;

/// An entry the list can reorder.
pub trait ListItem {
    /// Unique key of the entry.
    fn id(&self) -> &str;
    /// Label shown in the list.
    fn title(&self) -> &str;
}

/// The order of the drop zone just above item `index`.
pub fn order_above(index: usize) -> i32 {
    resting_order(index).saturating_sub(1)
}

/// The order of the drop zone just below item `index`.
pub fn order_below(index: usize) -> i32 {
    resting_order(index).saturating_add(1)
}

/// The resting order of item `index`. Saturates at `i32::MAX`.
pub fn resting_order(index: usize) -> i32 {
    i32::try_from(index).map_or(i32::MAX, |index| index.saturating_mul(2))
}

/// Input to [`DraggableList::dispatch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragAction<T> {
    /// The user picked up an item.
    StartDrag {
        /// Id of the dragged item.
        item_id: String,
        /// Its index in the list.
        index: usize,
    },
    /// The dragged item is over the drop zone with this order.
    Hover {
        /// Order of the zone.
        order: i32,
    },
    /// The user let go.
    EndDrag,
    /// The user removed an item.
    Remove {
        /// Id of the item to remove.
        item_id: String,
    },
    /// The owner's list changed.
    SyncFromProps(Vec<T>),
}

/// One rendered entry of the list.
#[derive(Debug)]
pub struct ListEntry<'a, T> {
    /// The item.
    pub item: &'a T,
    /// Its index in the list.
    pub index: usize,
    /// The flexbox order to render it at.
    pub order: i32,
    /// Whether it is the item being dragged.
    pub being_dragged: bool,
}

/// Drag state of a reorderable list.
///
/// The list never edits itself: a finished drag or a removal is reported as
/// a [`ListUpdate`] for the owner to apply, and the new list comes back
/// through [`DragAction::SyncFromProps`].
#[derive(Debug, Clone)]
pub struct DraggableList<T> {
    list: Vec<T>,
    dragged: Option<String>,
    original_position: Option<usize>,
    false_order: Option<i32>,
}

impl<T: ListItem + Clone> DraggableList<T> {
    /// Wrap a list, with nothing being dragged.
    pub fn new(list: Vec<T>) -> Self {
        Self {
            list,
            dragged: None,
            original_position: None,
            false_order: None,
        }
    }

    /// The list as last synced.
    pub fn list(&self) -> &[T] {
        &self.list
    }

    /// Id of the item being dragged.
    pub fn dragged_item(&self) -> Option<&str> {
        self.dragged.as_deref()
    }

    /// Index the dragged item was picked up from.
    pub fn original_position(&self) -> Option<usize> {
        self.original_position
    }

    /// Order the dragged item is currently shown at.
    pub fn false_order(&self) -> Option<i32> {
        self.false_order
    }

    /// Whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.dragged.is_some()
    }

    /// The class list of the container element.
    pub fn container_class(&self) -> &'static str {
        if self.is_dragging() {
            "draggable-list is-dragging"
        } else {
            "draggable-list"
        }
    }

    /// Entries with the orders they should be rendered at.
    pub fn entries(&self) -> impl Iterator<Item = ListEntry<'_, T>> {
        self.list.iter().enumerate().map(|(index, item)| {
            let being_dragged = self.dragged.as_deref() == Some(item.id());
            let order = match self.false_order {
                Some(order) if being_dragged => order,
                _ => resting_order(index),
            };
            ListEntry {
                item,
                index,
                order,
                being_dragged,
            }
        })
    }

    /// Apply an action, returning the change the owner should make.
    pub fn dispatch(&mut self, action: DragAction<T>) -> Option<ListUpdate<T>> {
        match action {
            DragAction::StartDrag { item_id, index } => {
                tracing::trace!(target: "snap_blocks::post_select", item = %item_id, index, "drag started");
                self.dragged = Some(item_id);
                self.original_position = Some(index);
                self.false_order = Some(resting_order(index));
                None
            }
            DragAction::Hover { order } => {
                if self.is_dragging() {
                    self.false_order = Some(order);
                }
                None
            }
            DragAction::EndDrag => {
                let false_order = self.false_order?;
                let reordered = self.reorder(false_order);
                self.dragged = None;
                self.original_position = None;
                self.false_order = None;
                reordered.map(ListUpdate::Replace)
            }
            DragAction::Remove { item_id } => self
                .list
                .iter()
                .find(|item| item.id() == item_id)
                .cloned()
                .map(ListUpdate::Remove),
            DragAction::SyncFromProps(list) => {
                self.list = list;
                None
            }
        }
    }

    /// Rebuild the list with the dragged item moved to `false_order`.
    ///
    /// Items occupy the odd slots of a doubled array; the dragged item moves
    /// to slot `false_order + 1` and the gaps are squeezed out.
    fn reorder(&self, false_order: i32) -> Option<Vec<T>> {
        let dragged = self.dragged.as_deref()?;
        let Some(moved) = self.list.iter().position(|item| item.id() == dragged) else {
            tracing::warn!(target: "snap_blocks::post_select", item = dragged, "dragged item is no longer in the list");
            return None;
        };

        let mut slots: Vec<Option<&T>> = vec![None; 2 * self.list.len() + 1];
        for (index, item) in self.list.iter().enumerate() {
            slots[2 * index + 1] = Some(item);
        }

        let from = 2 * moved + 1;
        let Some(to) = false_order
            .checked_add(1)
            .and_then(|slot| usize::try_from(slot).ok())
            .filter(|&slot| slot < slots.len())
        else {
            tracing::warn!(target: "snap_blocks::post_select", false_order, "drop position is outside the list");
            return None;
        };
        if to != from && slots[to].is_some() {
            tracing::warn!(target: "snap_blocks::post_select", false_order, "drop position is taken by another item");
            return None;
        }

        slots[to] = slots[from];
        if to != from {
            slots[from] = None;
        }
        Some(slots.into_iter().flatten().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Item(&'static str);

    impl ListItem for Item {
        fn id(&self) -> &str {
            self.0
        }

        fn title(&self) -> &str {
            self.0
        }
    }

    fn list() -> DraggableList<Item> {
        DraggableList::new(vec![Item("a"), Item("b"), Item("c"), Item("d")])
    }

    fn ids(update: Option<ListUpdate<Item>>) -> Vec<&'static str> {
        match update {
            Some(ListUpdate::Replace(items)) => items.into_iter().map(|item| item.0).collect(),
            other => panic!("expected a replacement, got {other:?}"),
        }
    }

    fn drag(list: &mut DraggableList<Item>, id: &str, index: usize) {
        list.dispatch(DragAction::StartDrag {
            item_id: id.to_string(),
            index,
        });
    }

    #[test]
    fn drop_above_first_item() {
        let mut list = list();
        drag(&mut list, "d", 3);
        list.dispatch(DragAction::Hover { order: order_above(0) });

        assert_eq!(ids(list.dispatch(DragAction::EndDrag)), vec!["d", "a", "b", "c"]);
        assert!(!list.is_dragging());
    }

    #[test]
    fn drop_below_last_item() {
        let mut list = list();
        drag(&mut list, "a", 0);
        list.dispatch(DragAction::Hover { order: order_below(3) });

        assert_eq!(ids(list.dispatch(DragAction::EndDrag)), vec!["b", "c", "d", "a"]);
    }

    #[test]
    fn drop_between_items() {
        let mut list = list();
        drag(&mut list, "a", 0);
        list.dispatch(DragAction::Hover { order: order_above(2) });

        assert_eq!(ids(list.dispatch(DragAction::EndDrag)), vec!["b", "a", "c", "d"]);
    }

    #[test]
    fn drop_without_moving_keeps_order() {
        for (index, id) in ["a", "b", "c", "d"].into_iter().enumerate() {
            let mut list = list();
            drag(&mut list, id, index);
            assert_eq!(ids(list.dispatch(DragAction::EndDrag)), vec!["a", "b", "c", "d"]);
        }
    }

    #[test]
    fn drop_onto_another_item_is_cancelled() {
        let mut list = list();
        drag(&mut list, "a", 0);
        list.dispatch(DragAction::Hover { order: resting_order(2) });

        assert_eq!(list.dispatch(DragAction::EndDrag), None);
        assert!(!list.is_dragging());

        drag(&mut list, "a", 0);
        list.dispatch(DragAction::Hover { order: 40 });
        assert_eq!(list.dispatch(DragAction::EndDrag), None);
    }

    #[test]
    fn extreme_orders_cancel_the_drop() {
        for order in [i32::MAX, i32::MAX - 1, i32::MIN, -2, order_below(4)] {
            let mut list = list();
            drag(&mut list, "b", 1);
            list.dispatch(DragAction::Hover { order });

            assert_eq!(list.dispatch(DragAction::EndDrag), None, "order {order}");
            assert!(!list.is_dragging());
        }
    }

    #[test]
    fn order_helpers_saturate() {
        assert_eq!(resting_order(3), 6);
        assert_eq!(order_above(0), -1);
        assert_eq!(resting_order(usize::MAX), i32::MAX);
        assert_eq!(order_below(usize::MAX), i32::MAX);
        assert_eq!(resting_order(i32::MAX as usize), i32::MAX);
    }

    #[test]
    fn hover_and_end_without_drag_do_nothing() {
        let mut list = list();
        assert_eq!(list.dispatch(DragAction::Hover { order: 3 }), None);
        assert_eq!(list.false_order(), None);
        assert_eq!(list.dispatch(DragAction::EndDrag), None);
    }

    #[test]
    fn entries_show_dragged_item_at_false_order() {
        let mut list = list();
        drag(&mut list, "c", 2);
        list.dispatch(DragAction::Hover { order: order_above(0) });

        let orders: Vec<(i32, bool)> = list.entries().map(|e| (e.order, e.being_dragged)).collect();
        assert_eq!(orders, vec![(0, false), (2, false), (-1, true), (6, false)]);
        assert_eq!(list.container_class(), "draggable-list is-dragging");
        assert_eq!(list.original_position(), Some(2));
    }

    #[test]
    fn remove_reports_the_item() {
        let mut list = list();
        assert_eq!(
            list.dispatch(DragAction::Remove { item_id: "b".to_string() }),
            Some(ListUpdate::Remove(Item("b")))
        );
        assert_eq!(list.list().len(), 4);
        assert_eq!(list.dispatch(DragAction::Remove { item_id: "z".to_string() }), None);
    }

    #[test]
    fn sync_replaces_the_list() {
        let mut list = list();
        list.dispatch(DragAction::SyncFromProps(vec![Item("x")]));
        assert_eq!(list.list(), &[Item("x")]);
    }
}
