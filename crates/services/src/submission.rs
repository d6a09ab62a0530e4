//! # Submission Workflow
//!
//! Validates a reader-submitted post, stages it under a fresh verification
//! token and mails the token to the submitter.
//!
//! Ordering matters: every validation runs before anything is staged or
//! mailed, and the draft is staged before the mail goes out so a slow mail
//! server never leaves a link pointing at nothing.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use domains::{
    Category, DomainError, DomainResult, DraftFields, Mailer, NewPost, OutgoingMail,
    PendingDraft, PendingRegistry, PostRepository, Submitter, TokenGenerator,
    VerificationPending,
};
use tracing::{info, warn};

use crate::email::{verification_link, verification_mail};

/// Knobs the binary passes in from configuration.
#[derive(Debug, Clone)]
pub struct SubmissionSettings {
    /// Origin the verification link points at, e.g. `http://localhost:3000`.
    pub public_base_url: String,
    /// Upper bound on a single mail dispatch.
    pub mail_timeout: Duration,
}

impl Default for SubmissionSettings {
    fn default() -> Self {
        Self {
            public_base_url: "http://localhost:3000".to_owned(),
            mail_timeout: Duration::from_secs(10),
        }
    }
}

pub struct SubmissionService {
    posts: Arc<dyn PostRepository>,
    pending: Arc<dyn PendingRegistry>,
    mailer: Arc<dyn Mailer>,
    tokens: Arc<dyn TokenGenerator>,
    settings: SubmissionSettings,
}

/// A submission that passed field validation.
struct ValidDraft {
    submitter: Submitter,
    title: String,
    category: Category,
    description: String,
    content: String,
}

impl SubmissionService {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        pending: Arc<dyn PendingRegistry>,
        mailer: Arc<dyn Mailer>,
        tokens: Arc<dyn TokenGenerator>,
        settings: SubmissionSettings,
    ) -> Self {
        Self {
            posts,
            pending,
            mailer,
            tokens,
            settings,
        }
    }

    /// Stages a draft and sends its verification link.
    ///
    /// `image` is the reference path the media store already returned for
    /// the upload, if any.
    ///
    /// On `DomainError::Mail` the draft stays staged and its token remains
    /// redeemable.
    pub async fn submit(
        &self,
        fields: DraftFields,
        image: Option<String>,
    ) -> DomainResult<VerificationPending> {
        let draft = validate(fields)?;

        // Only published posts are checked; duplicate pending drafts coexist.
        if self.posts.title_exists(&draft.title).await? {
            return Err(DomainError::DuplicateTitle(draft.title));
        }

        let token = self.tokens.generate()?;
        let link = verification_link(&self.settings.public_base_url, token.as_str());
        let mail = verification_mail(
            &draft.submitter.email,
            &draft.submitter.name,
            &draft.title,
            &link,
        )?;

        let category = draft.category;
        let pending = PendingDraft {
            submitter: draft.submitter,
            post: NewPost {
                title: draft.title,
                date: Utc::now(),
                category,
                description: draft.description,
                content: draft.content,
                image,
                verified: false,
            },
        };
        let recipient = pending.submitter.email.clone();

        self.pending.stage(token, pending).await?;
        info!(%category, recipient = %recipient, "draft staged, sending verification link");

        self.dispatch(mail).await?;

        Ok(VerificationPending { recipient })
    }

    /// Sends through the mail collaborator, bounded by the configured timeout.
    async fn dispatch(&self, mail: OutgoingMail) -> DomainResult<()> {
        let recipient = mail.to.clone();
        let timeout = self.settings.mail_timeout;

        match tokio::time::timeout(timeout, self.mailer.send(mail)).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(err)) => {
                warn!(recipient = %recipient, error = %err, "verification mail failed; draft left pending");
                Err(match err {
                    DomainError::Mail(_) => err,
                    other => DomainError::Mail(other.to_string()),
                })
            }
            Err(_) => {
                warn!(recipient = %recipient, ?timeout, "verification mail timed out; draft left pending");
                Err(DomainError::Mail(format!("no response within {timeout:?}")))
            }
        }
    }
}

/// Collects every missing field at once, then checks the category.
fn validate(fields: DraftFields) -> DomainResult<ValidDraft> {
    let mut missing = Vec::new();
    let mut require = |value: Option<String>, name: &'static str| -> String {
        match value {
            Some(v) if !v.trim().is_empty() => v,
            _ => {
                missing.push(name);
                String::new()
            }
        }
    };

    let name = require(fields.name, "name");
    let email = require(fields.email, "email");
    let title = require(fields.title, "title");
    let category = require(fields.category, "category");
    let description = require(fields.description, "description");
    let content = require(fields.content, "content");

    if !missing.is_empty() {
        return Err(DomainError::MissingFields(missing));
    }

    Ok(ValidDraft {
        submitter: Submitter {
            name: name.trim().to_owned(),
            email: email.trim().to_owned(),
        },
        title: title.trim().to_owned(),
        category: category.trim().parse()?,
        description,
        content,
    })
}
