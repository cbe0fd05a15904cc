//! Ownership gate for article edits.

use crate::article::Article;
use crate::identity::IdentityToken;

/// Decide whether the calling browser may edit an article.
///
/// True iff a caller token is present and exactly equal to the
/// article's recorded owner. A caller that was never issued a token
/// can edit nothing. This gate is advisory, not cryptographic: anyone
/// holding the owner's bearer token gets edit rights, which is the
/// intended trust model for a low-stakes publishing tool.
pub fn is_editable(article: &Article, caller: Option<&IdentityToken>) -> bool {
    caller.is_some_and(|token| token.as_str() == article.owner_id)
}
