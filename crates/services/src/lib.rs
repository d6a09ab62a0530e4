//! # services
//!
//! Blog workflows over the domain ports: listing and search, submission,
//! email verification and comments. Nothing here touches HTTP, disk or SMTP.

pub mod comments;
pub mod email;
pub mod query;
pub mod seed;
pub mod submission;
pub mod token;
pub mod verification;

pub use comments::CommentService;
pub use query::{filter_posts, PostQuery, PostQueryService};
pub use seed::{sample_post, seed_sample_posts};
pub use submission::{SubmissionService, SubmissionSettings};
pub use token::RandomTokenGenerator;
pub use verification::VerificationService;
