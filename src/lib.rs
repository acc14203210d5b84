//! Fetch message bridge.
//!
//! Re-exports the workspace crates so host applications can depend on one
//! package and pick a host platform by feature:
//!
//! - `native` (default): in-memory host objects from `bridge-native`
//! - `wasm`: browser fetch objects from `bridge-wasm`

pub use bridge_traits as traits;
pub use core_fetch::*;
pub use core_runtime::{config, logging, AdapterConfig, LoggingConfig};

#[cfg(all(feature = "native", not(target_arch = "wasm32")))]
pub use bridge_native as native;

#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
pub use bridge_wasm as wasm;
