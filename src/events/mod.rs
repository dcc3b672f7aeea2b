pub mod keyboard;
pub mod pointer;

pub use keyboard::wire_keyboard;
pub use pointer::{wire_pointer, PointerInput};

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// Single-threaded FIFO shared between DOM callbacks and the frame loop.
pub struct Queue<T>(Rc<RefCell<VecDeque<T>>>);

impl<T> Clone for Queue<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self(Rc::new(RefCell::new(VecDeque::new())))
    }
}

impl<T> Queue<T> {
    pub fn send(&self, item: T) {
        self.0.borrow_mut().push_back(item);
    }

    /// Take everything queued so far. Items sent while the caller handles
    /// the batch wait for the next drain.
    pub fn drain(&self) -> Vec<T> {
        self.0.borrow_mut().drain(..).collect()
    }
}
