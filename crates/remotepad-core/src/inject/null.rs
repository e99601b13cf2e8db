//! Tracing-only input injector.
//!
//! Used when the relay runs headless (no OS input backend wired in): every
//! event is logged at `debug` level and a virtual pointer is tracked so
//! relative moves still resolve.  Real deployments replace this with a
//! platform implementation of [`InputInjector`].

use std::sync::{Mutex, PoisonError};

use tracing::debug;

use super::{InjectError, InputInjector};

/// An injector that logs events instead of injecting them.
#[derive(Default)]
pub struct NullInjector {
    pointer: Mutex<(i32, i32)>,
}

impl NullInjector {
    pub fn new() -> Self {
        Self::default()
    }
}

impl InputInjector for NullInjector {
    fn key_press(&self, code: i32) -> Result<(), InjectError> {
        debug!("keyPress({code})");
        Ok(())
    }

    fn key_release(&self, code: i32) -> Result<(), InjectError> {
        debug!("keyRelease({code})");
        Ok(())
    }

    fn mouse_move(&self, x: i32, y: i32) -> Result<(), InjectError> {
        debug!("mouseMove({x},{y})");
        *self.pointer.lock().unwrap_or_else(PoisonError::into_inner) = (x, y);
        Ok(())
    }

    fn mouse_press(&self, button: i32) -> Result<(), InjectError> {
        debug!("mousePress({button})");
        Ok(())
    }

    fn mouse_release(&self, button: i32) -> Result<(), InjectError> {
        debug!("mouseRelease({button})");
        Ok(())
    }

    fn mouse_wheel(&self, notches: i32) -> Result<(), InjectError> {
        debug!("mouseWheel({notches})");
        Ok(())
    }

    fn pointer_position(&self) -> Result<(i32, i32), InjectError> {
        Ok(*self.pointer.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_operations_succeed() {
        let injector = NullInjector::new();
        assert!(injector.key_press(65).is_ok());
        assert!(injector.key_release(65).is_ok());
        assert!(injector.mouse_press(1).is_ok());
        assert!(injector.mouse_release(1).is_ok());
        assert!(injector.mouse_wheel(-3).is_ok());
    }

    #[test]
    fn test_virtual_pointer_follows_moves() {
        let injector = NullInjector::new();
        assert_eq!(injector.pointer_position().unwrap(), (0, 0));
        injector.mouse_move(30, 40).unwrap();
        assert_eq!(injector.pointer_position().unwrap(), (30, 40));
    }
}
