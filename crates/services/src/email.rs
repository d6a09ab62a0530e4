//! Verification email rendering.

use askama::Template;
use domains::{DomainError, DomainResult, OutgoingMail};

pub const VERIFICATION_SUBJECT: &str = "Verify Your Blog Submission";

#[derive(Template)]
#[template(
    ext = "txt",
    source = "Hi {{ name }},

Thanks for submitting \"{{ title }}\".

Click here to verify: {{ link }}

Your post will appear on the blog once the link has been opened.
"
)]
struct VerificationEmail<'a> {
    name: &'a str,
    title: &'a str,
    link: &'a str,
}

/// Builds the message carrying a verification link.
pub fn verification_mail(to: &str, name: &str, title: &str, link: &str) -> DomainResult<OutgoingMail> {
    let body = VerificationEmail { name, title, link }
        .render()
        .map_err(|e| DomainError::Internal(format!("verification email template: {e}")))?;

    Ok(OutgoingMail {
        to: to.to_owned(),
        subject: VERIFICATION_SUBJECT.to_owned(),
        body,
    })
}

/// `<base>/api/verify?token=<token>`, tolerating a trailing slash on the base.
pub fn verification_link(public_base_url: &str, token: &str) -> String {
    format!("{}/api/verify?token={token}", public_base_url.trim_end_matches('/'))
}
