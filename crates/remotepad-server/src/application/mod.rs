//! Application layer: transport-independent dispatch of command batches.

pub mod dispatch;

pub use dispatch::dispatch_batch;
