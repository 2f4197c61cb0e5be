//! The local side of the mirror
//!
//! - `contracts`: the narrow seams the synchronizer drives the datastore
//!   through (repository source, commit store, user resolver, pruner,
//!   reconciler)
//! - `memory`: the serializable in-memory datastore behind those seams

pub mod contracts;
pub mod memory;
