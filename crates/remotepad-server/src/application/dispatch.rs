//! Dispatches one batch of commands to the executor.
//!
//! A batch is the `;`-joined payload of one TCP line or one UDP datagram.
//! Failures are isolated per command: a malformed or failing command is
//! logged and the remaining commands in the batch still run.  No error
//! escapes this function — the wire protocol has no error response
//! channel, so failures are host-side-log-only.

use remotepad_core::{split_batch, CommandExecutor};
use tracing::warn;

/// Executes every non-empty `;`-separated command in `batch`, in order.
pub fn dispatch_batch(executor: &CommandExecutor, batch: &str) {
    for piece in split_batch(batch) {
        if let Err(e) = executor.execute(piece) {
            warn!("failed to execute command {piece:?}: {e}");
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use remotepad_core::inject::mock::{InjectedEvent, RecordingInjector};
    use remotepad_core::InputInjector;
    use std::sync::Arc;

    fn make_executor() -> (CommandExecutor, Arc<RecordingInjector>) {
        let injector = Arc::new(RecordingInjector::new());
        let executor = CommandExecutor::new(Arc::clone(&injector) as Arc<dyn InputInjector>);
        (executor, injector)
    }

    #[test]
    fn test_batch_executes_commands_left_to_right() {
        let (executor, injector) = make_executor();

        dispatch_batch(&executor, "keyPress(65);keyRelease(65)");

        assert_eq!(
            injector.events(),
            vec![InjectedEvent::KeyPress(65), InjectedEvent::KeyRelease(65)]
        );
    }

    #[test]
    fn test_failing_command_does_not_stop_the_batch() {
        let (executor, injector) = make_executor();

        dispatch_batch(&executor, "keyPress(65);nonsense;keyRelease(65)");

        assert_eq!(
            injector.events(),
            vec![InjectedEvent::KeyPress(65), InjectedEvent::KeyRelease(65)]
        );
    }

    #[test]
    fn test_trailing_separator_and_empty_segments_are_ignored() {
        let (executor, injector) = make_executor();

        dispatch_batch(&executor, ";mouseMove(10,20);;");

        assert_eq!(injector.events(), vec![InjectedEvent::MouseMove { x: 10, y: 20 }]);
    }

    #[test]
    fn test_empty_batch_performs_no_injection() {
        let (executor, injector) = make_executor();

        dispatch_batch(&executor, "");

        assert!(injector.events().is_empty());
    }

    #[test]
    fn test_batch_of_only_bad_commands_performs_no_injection() {
        let (executor, injector) = make_executor();

        dispatch_batch(&executor, "garbage;moreGarbage()");

        assert!(injector.events().is_empty());
    }
}
