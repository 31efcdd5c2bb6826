//! Filesystem primitives used by the flattener.

mod cleanup;
mod dir_move;
mod entry;
mod helpers;
mod util;

pub use cleanup::remove_dir_if_empty;
pub use dir_move::relocate;
pub use entry::list_children;
pub use helpers::{io_hint, move_error};
pub(crate) use util::{entry_exists, is_real_dir};
