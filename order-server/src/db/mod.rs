//! Database layer
//!
//! Persistent document models. The storage engine itself (redb) lives in
//! `crate::orders::storage`, which owns all order mutations.

pub mod models;
