//! Synchronous client for the TrafficPortal masked-record API.
//!
//! # Overview
//! A masked record maps a short key under a domain to a destination URL.
//! This crate issues the one API call that creates such records: it
//! serializes a [`CreateMapRequest`], sends a single authenticated POST, and
//! translates the outcome into a [`CreateMapResponse`] or a classified
//! [`ApiError`].
//!
//! # Design
//! - `TrafficPortalClient` holds only immutable configuration (endpoint,
//!   credential, timeout) and is safe for concurrent use.
//! - The operation is split into `build_*` (produces an `HttpRequest`) and
//!   `parse_*` (consumes an `HttpResponse`) around one blocking exchange
//!   through the [`Transport`] seam, so every decision is testable without
//!   a network.
//! - Response decoding is defensive: missing or ill-typed fields degrade to
//!   defaults and absent data is an explicit `Option`, never a panic.

pub mod client;
pub mod error;
pub mod http;
pub mod types;

pub use client::TrafficPortalClient;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport, TransportError, UreqTransport};
pub use types::{CreateMapRequest, CreateMapResponse};
