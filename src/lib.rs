//! Samizdat - the core of a minimal article self-publishing service.
//!
//! The HTTP layer hands this crate a title, a signature, a body and the
//! caller's identity token; the crate allocates a unique URL slug,
//! persists the article as a JSON document and decides on later visits
//! whether the caller may edit it. Rendering, routing and cookie
//! transport stay outside.
//!
//! # Module map
//!
//! | Module     | Purpose                                             |
//! |------------|-----------------------------------------------------|
//! | `config`   | TOML-loadable configuration for store and identity  |
//! | `slug`     | title → unique, filesystem-safe slug                |
//! | `store`    | one JSON document per article, atomic writes        |
//! | `identity` | opaque caller tokens, keyed-hash cookie signing     |
//! | `access`   | ownership check gating edits                        |
//! | `article`  | the article record and submission validation        |
//! | `publish`  | submit / view / save-edit orchestration             |

pub mod access;
pub mod article;
pub mod config;
pub mod identity;
pub mod logger;
pub mod publish;
pub mod slug;
pub mod store;

pub use access::is_editable;
pub use article::{Article, Submission, ValidationError};
pub use config::{Config, IdentityConfig, StoreConfig};
pub use identity::{IdentityToken, TokenMint};
pub use publish::{ArticleView, PublishError, PublishLimits, Publisher};
pub use slug::{SlugError, allocate, slugify};
pub use store::{ArticleStore, StoreError};
