#![no_std]

pub mod access;
pub mod hashing;

pub use access::AccessController;
pub use hashing::{compute_commit_hash, compute_receipt_hash};
