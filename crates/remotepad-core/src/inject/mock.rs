//! Recording input injector for unit and integration testing.
//!
//! The real injectors make OS API calls that require a desktop session and
//! actually move the cursor on the test machine.  `RecordingInjector`
//! replaces them with in-memory recording: every injected event is pushed
//! onto a single ordered log so tests can assert exactly what was injected
//! and in what order, across event kinds.
//!
//! The injector also tracks a virtual pointer position.  `mouse_move`
//! updates it, which makes sequences involving `mouseMoveRelative`
//! observable without a real screen.
//!
//! Set `should_fail` to make every subsequent call return
//! [`InjectError::Platform`]; this exercises the error-handling paths of
//! callers without a broken OS.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Mutex, PoisonError,
};

use super::{InjectError, InputInjector};

/// One recorded injection, in the order the executor applied it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InjectedEvent {
    KeyPress(i32),
    KeyRelease(i32),
    MouseMove { x: i32, y: i32 },
    MousePress(i32),
    MouseRelease(i32),
    MouseWheel(i32),
}

/// An injector that records all calls without performing OS API calls.
///
/// Safe to share across threads behind an `Arc`; the event log and pointer
/// are mutex-guarded and the failure switch is atomic.
#[derive(Default)]
pub struct RecordingInjector {
    events: Mutex<Vec<InjectedEvent>>,
    pointer: Mutex<(i32, i32)>,
    should_fail: AtomicBool,
}

impl RecordingInjector {
    /// Creates an injector with an empty log and the pointer at `(0, 0)`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an injector with the pointer at a known position.
    pub fn with_pointer(x: i32, y: i32) -> Self {
        let injector = Self::default();
        *injector.pointer.lock().unwrap_or_else(PoisonError::into_inner) = (x, y);
        injector
    }

    /// Makes every subsequent injection (and pointer query) fail.
    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::SeqCst);
    }

    /// Moves the virtual pointer without recording an event.
    pub fn set_pointer(&self, x: i32, y: i32) {
        *self.pointer.lock().unwrap_or_else(PoisonError::into_inner) = (x, y);
    }

    /// Returns a snapshot of everything injected so far, in order.
    pub fn events(&self) -> Vec<InjectedEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the injected events and clears the log.
    pub fn take_events(&self) -> Vec<InjectedEvent> {
        std::mem::take(&mut *self.events.lock().unwrap_or_else(PoisonError::into_inner))
    }

    fn record(&self, event: InjectedEvent) -> Result<(), InjectError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(InjectError::Platform("mock failure".into()));
        }
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
        Ok(())
    }
}

impl InputInjector for RecordingInjector {
    fn key_press(&self, code: i32) -> Result<(), InjectError> {
        self.record(InjectedEvent::KeyPress(code))
    }

    fn key_release(&self, code: i32) -> Result<(), InjectError> {
        self.record(InjectedEvent::KeyRelease(code))
    }

    fn mouse_move(&self, x: i32, y: i32) -> Result<(), InjectError> {
        self.record(InjectedEvent::MouseMove { x, y })?;
        *self.pointer.lock().unwrap_or_else(PoisonError::into_inner) = (x, y);
        Ok(())
    }

    fn mouse_press(&self, button: i32) -> Result<(), InjectError> {
        self.record(InjectedEvent::MousePress(button))
    }

    fn mouse_release(&self, button: i32) -> Result<(), InjectError> {
        self.record(InjectedEvent::MouseRelease(button))
    }

    fn mouse_wheel(&self, notches: i32) -> Result<(), InjectError> {
        self.record(InjectedEvent::MouseWheel(notches))
    }

    fn pointer_position(&self) -> Result<(i32, i32), InjectError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(InjectError::Platform("mock failure".into()));
        }
        Ok(*self.pointer.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
