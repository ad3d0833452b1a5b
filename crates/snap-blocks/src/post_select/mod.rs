//! Editor-side state of the manual post select block.

mod draggable_list;
mod selection;

pub use draggable_list::{
    DragAction, DraggableList, ListEntry, ListItem, order_above, order_below, resting_order,
};
pub use selection::{ListUpdate, SelectedPost, SelectedPosts};
