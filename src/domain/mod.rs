//! Domain types shared by the URL state manager, the API client and the views.

pub mod ad;
pub mod filter;
pub mod stats;
pub mod types;
