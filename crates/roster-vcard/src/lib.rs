//! vCard 3.0 composer for Roster people.
//!
//! Renders a [`roster_core::person::Person`] (and its primary group) into an
//! RFC 2426 serialization for contact-card downloads. Pure synchronous; the
//! only I/O is the attempted photo read, whose failure degrades to a URL
//! reference or omission and never surfaces to the caller.

mod compose;

pub use compose::{ComposeOptions, compose, download_filename};

/// Media type for vCard downloads.
pub const MEDIA_TYPE: &str = "text/vcard";
