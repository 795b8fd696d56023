//! Adapter utilities for the `gridcache` crate.
//!
//! The `gridcache` crate is transport- and UI-agnostic: it talks to traits. This crate provides
//! small, framework-neutral implementations of those traits that most hosts end up writing:
//!
//! - a typed wire vocabulary ([`Inbound`] pushes, [`Outbound`] requests)
//! - [`Mailbox`], a remote source that queues outbound messages for the host's transport
//! - [`HeadlessViewport`], a viewport that keeps rendered rows in memory
//! - [`Connector`], which wires the three to a `GridCache`
//! - JSON frame decoding behind the `json` feature
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

mod connector;
#[cfg(feature = "json")]
mod json;
mod key;
mod mailbox;
mod viewport;
mod wire;

#[cfg(test)]
mod tests;

pub use connector::Connector;
#[cfg(feature = "json")]
pub use json::{decode_inbound, encode_outbound};
pub use mailbox::Mailbox;
pub use viewport::HeadlessViewport;
pub use wire::{Inbound, Outbound};
