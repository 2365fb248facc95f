use std::cell::Cell;
use std::rc::Rc;

/// Reference-counted ownership of `document.body.style.overflow`.
///
/// The mobile menu and the project modal both need to freeze page scroll,
/// and either can open while the other is already holding the lock. The
/// body style is only touched on the 0 -> 1 and 1 -> 0 transitions, so
/// overlapping holders never clobber each other.
#[derive(Clone)]
pub struct ScrollLock {
    holders: Rc<LockCount>,
}

impl PartialEq for ScrollLock {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.holders, &other.holders)
    }
}

impl ScrollLock {
    pub fn new() -> Self {
        Self {
            holders: Rc::new(LockCount::new()),
        }
    }

    pub fn acquire(&self) {
        if self.holders.acquire() {
            set_body_overflow(Some("hidden"));
        }
    }

    pub fn release(&self) {
        if self.holders.release() {
            set_body_overflow(None);
        }
    }
}

impl Default for ScrollLock {
    fn default() -> Self {
        Self::new()
    }
}

struct LockCount {
    count: Cell<usize>,
}

impl LockCount {
    fn new() -> Self {
        Self { count: Cell::new(0) }
    }

    /// Returns true on the 0 -> 1 transition.
    fn acquire(&self) -> bool {
        let previous = self.count.get();
        self.count.set(previous + 1);
        previous == 0
    }

    /// Returns true on the 1 -> 0 transition. Releasing an unheld lock
    /// is a no-op.
    fn release(&self) -> bool {
        let previous = self.count.get();
        if previous == 0 {
            return false;
        }
        self.count.set(previous - 1);
        previous == 1
    }
}

fn set_body_overflow(value: Option<&str>) {
    let body = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.body());
    if let Some(body) = body {
        let style = body.style();
        let result = match value {
            Some(v) => style.set_property("overflow", v),
            None => style.remove_property("overflow").map(|_| ()),
        };
        if result.is_err() {
            log::warn!("failed to update body overflow");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_acquire_locks() {
        let count = LockCount::new();
        assert!(count.acquire());
        assert!(!count.acquire());
    }

    #[test]
    fn last_release_unlocks() {
        let count = LockCount::new();
        count.acquire();
        count.acquire();
        assert!(!count.release());
        assert!(count.release());
    }

    #[test]
    fn interleaved_holders_do_not_clobber() {
        // menu opens, modal opens, menu closes: the page must stay locked
        let count = LockCount::new();
        assert!(count.acquire());
        assert!(!count.acquire());
        assert!(!count.release());
        assert!(count.release());
    }

    #[test]
    fn release_without_holder_is_noop() {
        let count = LockCount::new();
        assert!(!count.release());
        assert!(count.acquire());
    }
}
