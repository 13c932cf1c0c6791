use tracing::debug;

use crate::ports::ScrollStylePort;

/// Overflow value applied while locked
pub const LOCKED_OVERFLOW: &str = "hidden";

/// Suppresses page scrolling while a lightbox is open.
///
/// The value seen on the first `engage` is restored by `disengage`; engaging
/// again while locked does not re-capture. Dropping an engaged lock releases it.
pub struct ScrollLock {
    port: Box<dyn ScrollStylePort>,
    saved: Option<String>,
}

impl ScrollLock {
    pub fn new(port: Box<dyn ScrollStylePort>) -> Self {
        Self { port, saved: None }
    }

    pub fn engage(&mut self) {
        if self.saved.is_some() {
            return;
        }
        let previous = self.port.overflow();
        debug!("Locking page scroll (was {previous:?})");
        self.saved = Some(previous);
        self.port.set_overflow(LOCKED_OVERFLOW);
    }

    pub fn disengage(&mut self) {
        if let Some(previous) = self.saved.take() {
            debug!("Restoring page scroll to {previous:?}");
            self.port.set_overflow(&previous);
        }
    }

    pub fn is_engaged(&self) -> bool {
        self.saved.is_some()
    }
}

impl Drop for ScrollLock {
    fn drop(&mut self) {
        self.disengage();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct FakeBody {
        overflow: Rc<RefCell<String>>,
        writes: Rc<RefCell<Vec<String>>>,
    }

    impl ScrollStylePort for FakeBody {
        fn overflow(&self) -> String {
            self.overflow.borrow().clone()
        }

        fn set_overflow(&mut self, value: &str) {
            *self.overflow.borrow_mut() = value.to_string();
            self.writes.borrow_mut().push(value.to_string());
        }
    }

    fn body_with(value: &str) -> FakeBody {
        let body = FakeBody::default();
        *body.overflow.borrow_mut() = value.to_string();
        body
    }

    #[test]
    fn test_engage_then_disengage_restores_previous_value() {
        let body = body_with("scroll");
        let mut lock = ScrollLock::new(Box::new(body.clone()));
        lock.engage();
        assert_eq!(*body.overflow.borrow(), "hidden");
        lock.disengage();
        assert_eq!(*body.overflow.borrow(), "scroll");
    }

    #[test]
    fn test_double_engage_restores_original() {
        let body = body_with("auto");
        let mut lock = ScrollLock::new(Box::new(body.clone()));
        lock.engage();
        lock.engage();
        lock.disengage();
        assert_eq!(*body.overflow.borrow(), "auto");
        assert_eq!(*body.writes.borrow(), vec!["hidden", "auto"]);
    }

    #[test]
    fn test_disengage_without_engage_is_noop() {
        let body = body_with("");
        let mut lock = ScrollLock::new(Box::new(body.clone()));
        lock.disengage();
        assert!(body.writes.borrow().is_empty());
    }

    #[test]
    fn test_drop_releases_lock() {
        let body = body_with("");
        {
            let mut lock = ScrollLock::new(Box::new(body.clone()));
            lock.engage();
            assert!(lock.is_engaged());
        }
        assert_eq!(*body.overflow.borrow(), "");
        assert_eq!(body.writes.borrow().len(), 2);
    }
}
