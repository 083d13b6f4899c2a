//! Bookstall core: catalog, cart and session state for the terminal
//! storefront, plus the HTTP client that talks to the remote store API.
//!
//! The UI crate owns rendering and the event loop; everything in here is
//! plain state that can be driven and tested without a terminal attached.

pub mod api;
pub mod cart;
pub mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod session;

pub use cart::{Cart, CartLine};
pub use catalog::{Author, Book, Publisher};
pub use client::StoreClient;
pub use error::ApiError;
pub use session::{Session, User};
