//! `trail-core` -- record versioning model and lifecycle controller.
//!
//! Every logical entity (an *identity*) may have many physical revisions
//! (*versions*). This crate defines the metadata each revision carries, the
//! [`versioned::Versioned`] capability that concrete entities implement, the
//! [`store::VersionStore`] collaborator through which revisions are
//! persisted, and the [`lifecycle::Lifecycle`] controller that mints drafts,
//! clones rows and guards state transitions.

pub mod error;
pub mod ids;
pub mod lifecycle;
pub mod memory;
pub mod metadata;
pub mod policy;
pub mod state;
pub mod store;
pub mod types;
pub mod versioned;

#[cfg(test)]
mod test_support;
