//! postdeck: a terminal client for a paginated posts API.
//!
//! Posts are browsed either as an infinite list that fetches the next page
//! when the selection reaches the end, or one numbered page at a time. Both
//! screens persist their position through a [`cache::KeyValueStore`] and post
//! images go through a memory and disk [`cache::ImageCache`].

pub mod api;
pub mod app;
pub mod cache;
pub mod config;
pub mod error;
pub mod state;
pub mod ui;
