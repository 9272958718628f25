//! Session-scoped shared state and the process single-instance lock.

pub mod instance_lock;
pub mod state;

pub use instance_lock::{InstanceLock, LockError};
pub use state::SessionState;
