//! Submit / view / edit orchestration.
//!
//! This is the surface the HTTP layer calls. It wires the slug
//! allocator, the article store and the ownership gate together and
//! maps every outcome onto one error taxonomy, so the caller can
//! render a form echo, a 404, a 403 or a 500 without inspecting
//! internals.

use thiserror::Error;

use crate::access::is_editable;
use crate::article::{Article, Submission, ValidationError};
use crate::config::StoreConfig;
use crate::debug;
use crate::identity::IdentityToken;
use crate::log;
use crate::slug::{SlugError, allocate, slugify};
use crate::store::{ArticleStore, StoreError};

/// Everything that can go wrong between a form post and a response.
#[derive(Debug, Error)]
pub enum PublishError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("no article found for `{0}`")]
    NotFound(String),

    #[error("caller does not own article `{0}`")]
    Forbidden(String),

    #[error(transparent)]
    Slug(#[from] SlugError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Slug allocation bounds, taken from the store configuration.
#[derive(Debug, Clone, Copy)]
pub struct PublishLimits {
    pub max_slug_length: usize,
    pub max_slug_attempts: u32,
}

impl Default for PublishLimits {
    fn default() -> Self {
        Self {
            max_slug_length: crate::slug::MAX_SLUG_LENGTH,
            max_slug_attempts: crate::slug::MAX_SLUG_ATTEMPTS,
        }
    }
}

impl From<&StoreConfig> for PublishLimits {
    fn from(config: &StoreConfig) -> Self {
        Self {
            max_slug_length: config.max_slug_length,
            max_slug_attempts: config.max_slug_attempts,
        }
    }
}

/// An article plus the caller-specific edit decision.
#[derive(Debug, Clone)]
pub struct ArticleView {
    pub article: Article,
    pub editable: bool,
}

/// Publishing front door: submit, view, save-edit.
///
/// Shareable across request handlers behind an `Arc`; all methods take
/// `&self`.
#[derive(Debug)]
pub struct Publisher {
    store: ArticleStore,
    limits: PublishLimits,
}

impl Publisher {
    pub fn new(store: ArticleStore, limits: PublishLimits) -> Self {
        Self { store, limits }
    }

    pub fn store(&self) -> &ArticleStore {
        &self.store
    }

    /// Create a new article from a form submission.
    ///
    /// Validates the submission, derives the slug base from the header
    /// and, under the base lock, allocates the first free slug and
    /// writes the article with the caller stamped as owner. Holding
    /// the lock across both steps means two concurrent submissions
    /// with the same header base cannot pick the same candidate.
    ///
    /// The returned article carries the allocated slug, which is the
    /// redirect target after creation.
    pub fn submit(
        &self,
        submission: Submission,
        caller: &IdentityToken,
    ) -> Result<Article, PublishError> {
        submission.validate()?;

        let base = slugify(&submission.header, self.limits.max_slug_length);
        let lock = self.store.base_lock(&base);
        let _guard = lock.lock();

        let slug = allocate(
            &base,
            |candidate| self.store.exists(candidate),
            self.limits.max_slug_attempts,
        )?;
        debug!("publish"; "allocated slug `{slug}` for base `{base}`");

        let article = Article {
            slug: slug.clone(),
            header: submission.header,
            signature: submission.signature,
            body: submission.body,
            owner_id: caller.as_str().to_string(),
        };
        self.store.write(&slug, &article)?;
        log!("publish"; "created article `{slug}`");
        Ok(article)
    }

    /// Fetch an article for rendering, with the edit decision for this
    /// caller.
    pub fn view(
        &self,
        slug: &str,
        caller: Option<&IdentityToken>,
    ) -> Result<ArticleView, PublishError> {
        let article = self.read(slug)?;
        let editable = is_editable(&article, caller);
        Ok(ArticleView { article, editable })
    }

    /// Overwrite an article's content in place.
    ///
    /// The ownership gate must grant the caller first; the slug and
    /// the original owner are preserved verbatim, so an edit never
    /// re-stamps ownership.
    pub fn save_edit(
        &self,
        slug: &str,
        submission: Submission,
        caller: &IdentityToken,
    ) -> Result<Article, PublishError> {
        let mut article = self.read(slug)?;
        if !is_editable(&article, Some(caller)) {
            return Err(PublishError::Forbidden(slug.to_string()));
        }
        submission.validate()?;

        article.header = submission.header;
        article.signature = submission.signature;
        article.body = submission.body;
        self.store.write(slug, &article)?;
        log!("publish"; "updated article `{slug}`");
        Ok(article)
    }

    fn read(&self, slug: &str) -> Result<Article, PublishError> {
        self.store.read(slug).map_err(|err| match err {
            StoreError::NotFound(slug) => PublishError::NotFound(slug),
            other => PublishError::Store(other),
        })
    }
}
