//! The page's single mounted widget.
//!
//! WASM runs on one thread, so a `thread_local` is the global slot.

use std::cell::RefCell;

use crate::ui::setup::MountedWidget;

thread_local! {
    pub static MOUNTED: RefCell<Option<MountedWidget>> = RefCell::new(None);
}

/// Store `widget`, dropping (and thereby unmounting) any previous one.
pub fn replace_mounted(widget: Option<MountedWidget>) {
    let previous = MOUNTED.with(|slot| slot.replace(widget));
    // Drop outside the borrow: teardown must not re-enter the slot.
    drop(previous);
}

pub fn with_mounted<R>(f: impl FnOnce(&MountedWidget) -> R) -> Option<R> {
    MOUNTED.with(|slot| slot.borrow().as_ref().map(f))
}
