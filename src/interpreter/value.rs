/// Signatures of caller-supplied operators and functions.
///
/// Callables are reference counted and `Send + Sync`, which is what allows a
/// compiled grammar to be shared between threads.
pub mod callable;

pub mod core;
