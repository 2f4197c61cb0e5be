//! mirrit keeps a local datastore in step with the commit history of remote
//! repositories. Each run pages through every repository's remote listing,
//! ingests commits it has never seen, prunes the ones history rewrites left
//! behind, and reconciles the authoritative sort order.

#![allow(async_fn_in_trait)]

pub mod domain;
pub mod remote;
pub mod store;
pub mod sync;
