//! # shareon
//!
//! Share buttons for web pages: build per-network sharing URLs from page
//! metadata and wire them into marked-up elements.
//!
//! ## Features
//!
//! - Share URL builders for 13 networks (Facebook, Twitter, Telegram, ...)
//! - Per-button metadata from `data-*` attributes with container and page
//!   fallbacks
//! - Works on parsed HTML (static pre-rendering) or, with the `wasm` feature,
//!   on the live browser DOM
//!
//! ## Quick Start
//!
//! ```
//! use shareon::{bind_document, BindTarget, Network};
//! use shareon::dom::HtmlDocument;
//!
//! let html = r#"
//!     <title>My Post</title>
//!     <div class="shareon" data-via="author">
//!         <a class="twitter">Tweet</a>
//!         <button class="telegram" data-text="Worth a read">Send</button>
//!     </div>
//! "#;
//!
//! let mut doc = HtmlDocument::parse(html, "https://example.com/post");
//! let report = bind_document(&mut doc);
//!
//! assert_eq!(report.bindings.len(), 2);
//! assert_eq!(report.bindings[0].network, Network::Twitter);
//! assert_eq!(
//!     report.bindings[0].url,
//!     "https://twitter.com/intent/tweet?url=https%3A%2F%2Fexample.com%2Fpost&text=My%20Post&via=author"
//! );
//! assert_eq!(report.bindings[1].target, BindTarget::Click);
//! ```
//!
//! ## Markup
//!
//! A container carries the `shareon` class; each direct child whose class
//! list names a network becomes a button. `data-url`, `data-title`,
//! `data-media`, `data-text`, `data-via` and `data-fb-app-id` may be set on
//! the container or on a single button.

pub mod binder;
pub mod document;
pub mod dom;
pub mod error;
pub mod metadata;
pub mod network;
pub(crate) mod util;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use binder::{
    BindOptions, BindReport, BindTarget, Binding, DEFAULT_MARKER, bind, bind_document,
    match_network,
};
pub use document::ShareDocument;
pub use error::{Error, Result};
pub use metadata::{MetaField, PageDefaults, ShareMetadata, encode_component};
pub use network::Network;
