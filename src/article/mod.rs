//! The article record and submission validation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A persisted article.
///
/// `slug` doubles as the storage key and the URL path segment; it is
/// assigned once at creation and never changes. `owner_id` is stamped
/// from the creating caller's identity token and preserved verbatim
/// across edits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub slug: String,
    pub header: String,
    #[serde(default)]
    pub signature: String,
    #[serde(default)]
    pub body: String,
    pub owner_id: String,
}

/// Form fields of a create or edit request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Submission {
    pub header: String,
    pub signature: String,
    pub body: String,
}

impl Submission {
    pub fn new(
        header: impl Into<String>,
        signature: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            header: header.into(),
            signature: signature.into(),
            body: body.into(),
        }
    }

    /// Check that the header is filled in.
    ///
    /// Signature and body may be empty. On rejection the submitted
    /// values travel with the error so the form can be re-rendered
    /// with the fields echoed back.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.header.trim().is_empty() {
            return Err(ValidationError {
                rejected: self.clone(),
            });
        }
        Ok(())
    }
}

/// A submission rejected for a missing header.
#[derive(Debug, Clone, Error)]
#[error("you must fill in the header field")]
pub struct ValidationError {
    /// The rejected form values, for echoing back to the caller.
    pub rejected: Submission,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_required() {
        let err = Submission::new("", "me", "text").validate().unwrap_err();
        assert_eq!(err.rejected.signature, "me");
        assert_eq!(err.rejected.body, "text");

        assert!(Submission::new("   ", "", "").validate().is_err());
    }

    #[test]
    fn test_signature_and_body_optional() {
        assert!(Submission::new("A header", "", "").validate().is_ok());
    }

    #[test]
    fn test_article_json_round_trip() {
        let article = Article {
            slug: "privet-mir_1".to_string(),
            header: "Привет мир".to_string(),
            signature: "Автор".to_string(),
            body: "Текст статьи.".to_string(),
            owner_id: "abc".to_string(),
        };
        let json = serde_json::to_string(&article).unwrap();
        let back: Article = serde_json::from_str(&json).unwrap();
        assert_eq!(article, back);
        // Non-ASCII text is stored as UTF-8, not escaped
        assert!(json.contains("Привет мир"));
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let json = r#"{"slug":"a_1","header":"A","owner_id":"abc"}"#;
        let article: Article = serde_json::from_str(json).unwrap();
        assert_eq!(article.signature, "");
        assert_eq!(article.body, "");
    }
}
