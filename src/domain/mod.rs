//! Entities of the local mirror
//!
//! This module contains the rows the datastore keeps for each mirrored
//! repository:
//!
//! - `repository`: a mirrored repository and its identifier
//! - `commit`: commit rows, the file rows they own, and the staged aggregate
//! - `user`: local user identifiers and the remote identity they resolve from

pub mod commit;
pub mod repository;
pub mod user;
