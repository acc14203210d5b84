//! Single-threaded primitives for WebAssembly targets.
//!
//! Browser code runs on one thread, so these types use `Rc<RefCell<_>>`
//! and are neither `Send` nor `Sync`.

pub mod cancellation_token;
