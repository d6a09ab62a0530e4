//! # Domain Models
//!
//! These structs represent the core entities of the blog board.
//! Published posts are numbered by insertion; drafts waiting on email
//! verification have no number until they are promoted.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Sentinel accepted by the query engine meaning "no category filter".
pub const ALL_CATEGORIES: &str = "all";

/// Permanent identifier of a published post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(pub u64);

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The closed set of topics a post can be filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    DataScience,
    CyberSecurity,
    CloudComputing,
    Regression,
    ArtificialIntelligence,
    MachineLearning,
    DataAnalytics,
}

impl Category {
    /// Every category, in the order the site presents them.
    pub const ALL: [Category; 7] = [
        Category::DataScience,
        Category::CyberSecurity,
        Category::CloudComputing,
        Category::Regression,
        Category::ArtificialIntelligence,
        Category::MachineLearning,
        Category::DataAnalytics,
    ];

    /// The slug used on the wire and in query strings.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::DataScience => "data-science",
            Category::CyberSecurity => "cyber-security",
            Category::CloudComputing => "cloud-computing",
            Category::Regression => "regression",
            Category::ArtificialIntelligence => "artificial-intelligence",
            Category::MachineLearning => "machine-learning",
            Category::DataAnalytics => "data-analytics",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = DomainError;

    /// Exact, case-sensitive slug match.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| DomainError::Validation(format!("unknown category '{s}'")))
    }
}

/// A reader comment. Append-only; owned by its post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub name: String,
    /// The comment body. Named `comment` on the wire.
    pub comment: String,
    pub date: DateTime<Utc>,
}

/// A published post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub date: DateTime<Utc>,
    pub category: Category,
    pub description: String,
    pub content: String,
    /// Reference path returned by the media store, if an image was uploaded.
    pub image: Option<String>,
    /// Readers only ever see posts with this set.
    pub verified: bool,
    pub comments: Vec<Comment>,
}

impl Post {
    /// Case-insensitive title comparison used for the uniqueness rule.
    pub fn has_title(&self, title: &str) -> bool {
        self.title.to_lowercase() == title.to_lowercase()
    }
}

/// A post that has not been given an identifier yet.
///
/// `PostRepository::append` turns this into a [`Post`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewPost {
    pub title: String,
    pub date: DateTime<Utc>,
    pub category: Category,
    pub description: String,
    pub content: String,
    pub image: Option<String>,
    pub verified: bool,
}

impl NewPost {
    pub fn into_post(self, id: PostId) -> Post {
        Post {
            id,
            title: self.title,
            date: self.date,
            category: self.category,
            description: self.description,
            content: self.content,
            image: self.image,
            verified: self.verified,
            comments: Vec::new(),
        }
    }
}

/// Who sent a submission. Only used to address the verification email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submitter {
    pub name: String,
    pub email: String,
}

/// A submitted post waiting for its author to click the verification link.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingDraft {
    pub submitter: Submitter,
    pub post: NewPost,
}

impl PendingDraft {
    /// Consumes the draft and returns the post ready to be published.
    pub fn into_verified(self) -> NewPost {
        NewPost {
            verified: true,
            ..self.post
        }
    }
}

/// Raw fields of a submission as they arrive from the form.
///
/// Everything is optional here; the submission workflow decides what is
/// missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DraftFields {
    pub name: Option<String>,
    pub email: Option<String>,
    pub title: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
}

/// Opaque single-use capability that promotes one pending draft.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VerificationToken(String);

impl VerificationToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VerificationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A message handed to the mail collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Result of a successful submission: the draft is staged and the link is
/// on its way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationPending {
    pub recipient: String,
}
