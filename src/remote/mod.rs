//! The remote side of the mirror
//!
//! - `feed`: the paginated commit listing contract and the page cursor
//! - `payload`: decoded commit summaries and full commit detail payloads
//! - `fixture`: a feed backed by a snapshot file, used by the binary and the
//!   test suite

pub mod feed;
pub mod fixture;
pub mod payload;
