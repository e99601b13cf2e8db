//! The host input-injection collaborator.
//!
//! The relay never touches the OS input APIs itself.  An embedder supplies
//! an [`InputInjector`] implementation (XTest, `SendInput`, CoreGraphics,
//! a virtual HID device, ...) and the executor drives it.  This crate ships
//! two implementations of its own: a [`mock::RecordingInjector`] for tests
//! and a [`null::NullInjector`] that only logs, used when the relay runs
//! headless.

pub mod mock;
pub mod null;

use thiserror::Error;

/// Error type for input injection operations.
#[derive(Debug, Error)]
pub enum InjectError {
    /// The OS-level event injection failed.
    #[error("platform error: {0}")]
    Platform(String),
}

/// Platform-agnostic input injection trait.
///
/// All methods take `&self`; implementations are expected to be internally
/// synchronized if the OS API requires it.  The executor additionally
/// guarantees that no two commands are ever in flight at once, so
/// implementations never see concurrent calls from the relay.
///
/// Key and button codes are passed through exactly as received from the
/// wire; no range checking is performed at this layer.
pub trait InputInjector: Send + Sync {
    /// Presses (and holds) the key with the given code.
    fn key_press(&self, code: i32) -> Result<(), InjectError>;

    /// Releases the key with the given code.
    fn key_release(&self, code: i32) -> Result<(), InjectError>;

    /// Moves the pointer to an absolute position.
    fn mouse_move(&self, x: i32, y: i32) -> Result<(), InjectError>;

    /// Presses (and holds) the given mouse button.
    fn mouse_press(&self, button: i32) -> Result<(), InjectError>;

    /// Releases the given mouse button.
    fn mouse_release(&self, button: i32) -> Result<(), InjectError>;

    /// Spins the mouse wheel by the given number of notches.
    fn mouse_wheel(&self, notches: i32) -> Result<(), InjectError>;

    /// Returns the current pointer position, used to resolve relative moves.
    fn pointer_position(&self) -> Result<(i32, i32), InjectError>;
}
