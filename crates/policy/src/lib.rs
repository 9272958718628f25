//! Command screening policy. The deny-list is policy data, not logic.

pub mod danger;

pub use danger::DangerPolicy;
