//! Prometheus counters for the blog workflows.

use domains::DomainError;
use prometheus_client::encoding::text::encode;
use prometheus_client::encoding::EncodeLabelSet;
use prometheus_client::metrics::counter::Counter;
use prometheus_client::metrics::family::Family;
use prometheus_client::registry::Registry;

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct OutcomeLabels {
    pub outcome: String,
}

pub struct Metrics {
    registry: Registry,
    submissions: Family<OutcomeLabels, Counter>,
    verifications: Family<OutcomeLabels, Counter>,
    comments: Family<OutcomeLabels, Counter>,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    pub fn new() -> Self {
        let mut registry = Registry::with_prefix("blog");
        let submissions = Family::<OutcomeLabels, Counter>::default();
        let verifications = Family::<OutcomeLabels, Counter>::default();
        let comments = Family::<OutcomeLabels, Counter>::default();

        registry.register(
            "submissions",
            "Post submissions by outcome",
            submissions.clone(),
        );
        registry.register(
            "verifications",
            "Verification link redemptions by outcome",
            verifications.clone(),
        );
        registry.register("comments", "Comment attempts by outcome", comments.clone());

        Self {
            registry,
            submissions,
            verifications,
            comments,
        }
    }

    pub fn record_submission<T>(&self, result: &Result<T, DomainError>) {
        Self::bump(&self.submissions, result);
    }

    pub fn record_verification<T>(&self, result: &Result<T, DomainError>) {
        Self::bump(&self.verifications, result);
    }

    pub fn record_comment<T>(&self, result: &Result<T, DomainError>) {
        Self::bump(&self.comments, result);
    }

    /// Text exposition format.
    pub fn encode(&self) -> Result<String, std::fmt::Error> {
        let mut out = String::new();
        encode(&mut out, &self.registry)?;
        Ok(out)
    }

    fn bump<T>(family: &Family<OutcomeLabels, Counter>, result: &Result<T, DomainError>) {
        let outcome = match result {
            Ok(_) => "ok",
            Err(e) => outcome_label(e),
        };
        family
            .get_or_create(&OutcomeLabels {
                outcome: outcome.to_owned(),
            })
            .inc();
    }
}

fn outcome_label(err: &DomainError) -> &'static str {
    match err {
        e if e.is_validation() => "invalid",
        DomainError::NotFound { .. } => "not_found",
        DomainError::InvalidToken => "invalid_token",
        DomainError::Mail(_) => "mail_failed",
        _ => "error",
    }
}
