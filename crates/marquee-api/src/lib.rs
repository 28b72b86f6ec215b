//! Catalog API client library for marquee.
//!
//! Provides a client for the TMDB v3 API: curated movie lists, the
//! genre index, and multi-type search.

/// TMDB catalog API client.
pub mod catalog;
