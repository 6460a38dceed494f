//! # Spotify Integration Module
//!
//! This module is the HTTP layer between the harvest pipeline and the Spotify
//! Web API. It knows the endpoints and their wire formats; it knows nothing
//! about years, batches or delivery.
//!
//! ## Architecture
//!
//! ```text
//! Harvest Orchestrator
//!          ↓
//! Spotify Integration Layer
//!     ├── Authentication (OAuth 2.0 client credentials)
//!     ├── Playlists (year search, paginated items)
//!     └── Artists (genre lookup, ≤ 50 ids per call)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Core Modules
//!
//! - [`auth`] - Client-credentials grant against the token endpoint. The
//!   credential itself is cached by [`crate::management::TokenManager`].
//! - [`playlists`] - Collection Resolver and Item Page Fetcher.
//! - [`artists`] - Batch entity lookup used by the enricher.
//! - [`client`] - [`SpotifyClient`], the authenticated request helper shared by
//!   every call above, including the transient retry policy.
//!
//! ## API Coverage
//!
//! - `POST /api/token` - `grant_type=client_credentials`, basic auth
//! - `GET /search?q=year:<Y>&type=playlist&limit=1` - year to collection
//! - `GET /playlists/{id}/tracks?limit=100` - collection items, `next` cursor
//! - `GET /artists?ids=<id,...>` - genres for up to 50 artists
//!
//! ## Error Types
//!
//! Token failures surface as [`crate::error::HarvestError::Auth`], an empty
//! search as [`crate::error::HarvestError::Resolution`] and every other HTTP
//! failure as [`crate::error::HarvestError::Fetch`].

pub mod artists;
pub mod auth;
pub mod client;
pub mod playlists;

pub use client::SpotifyClient;
