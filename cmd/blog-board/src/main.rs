//! # blog-board
//!
//! Assembles the blog from configuration and compile-time features, then
//! serves it until SIGINT or SIGTERM.

#[cfg(not(all(feature = "web-axum", feature = "media-local")))]
compile_error!("blog-board needs the web-axum and media-local features");

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use api_adapters::web::{router, AppState, WebConfig};
use configs::{LogFormat, LogSettings, MailSettings, MailTransport, Settings};
use domains::Mailer;
use mail_adapters::LogMailer;
use services::{seed_sample_posts, RandomTokenGenerator, SubmissionSettings};
use storage_adapters::{InMemoryPendingRegistry, InMemoryPostStore, LocalMediaStorage};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().context("loading configuration")?;
    init_tracing(&settings.log);

    let posts = Arc::new(InMemoryPostStore::new());
    let pending = Arc::new(InMemoryPendingRegistry::new());

    let seeded = seed_sample_posts(posts.as_ref(), settings.site.sample_posts).await?;
    tracing::info!(seeded, "post store ready");

    let mailer = build_mailer(&settings.mail)?;

    tokio::fs::create_dir_all(&settings.site.upload_dir)
        .await
        .with_context(|| format!("creating {}", settings.site.upload_dir.display()))?;
    let media = Arc::new(LocalMediaStorage::new(
        settings.site.upload_dir.clone(),
        settings.site.upload_url_prefix.clone(),
    ));

    let state = AppState::new(
        posts,
        pending,
        mailer,
        media,
        Arc::new(RandomTokenGenerator),
        SubmissionSettings {
            public_base_url: settings.site.public_base_url.clone(),
            mail_timeout: settings.mail.timeout(),
        },
    );

    let app = router(
        state,
        &WebConfig {
            views_dir: settings.site.views_dir.clone(),
            static_dir: settings.site.static_dir.clone(),
            upload_dir: settings.site.upload_dir.clone(),
            upload_url_prefix: settings.site.upload_url_prefix.clone(),
            request_timeout: Duration::from_secs(settings.server.request_timeout_secs),
            max_upload_bytes: settings.site.max_upload_bytes,
        },
    );

    let listener = tokio::net::TcpListener::bind((settings.server.host.as_str(), settings.server.port))
        .await
        .with_context(|| format!("binding {}:{}", settings.server.host, settings.server.port))?;
    tracing::info!(
        addr = %listener.local_addr()?,
        public_base_url = %settings.site.public_base_url,
        "blog-board listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("shutdown complete");
    Ok(())
}

fn init_tracing(log: &LogSettings) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.filter));
    let registry = tracing_subscriber::registry().with(filter);
    match log.format {
        LogFormat::Json => registry.with(fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(fmt::layer()).init(),
    }
}

fn build_mailer(mail: &MailSettings) -> anyhow::Result<Arc<dyn Mailer>> {
    match mail.transport {
        MailTransport::Log => {
            tracing::warn!("mail transport is 'log'; verification links only appear in the log");
            Ok(Arc::new(LogMailer::new(&mail.from)))
        }
        #[cfg(feature = "mail-smtp")]
        MailTransport::Smtp => {
            use mail_adapters::{SmtpConfig, SmtpMailer};

            let smtp = mail
                .smtp
                .as_ref()
                .context("mail.transport = \"smtp\" needs a [mail.smtp] section")?;
            let mailer = SmtpMailer::new(&SmtpConfig {
                host: smtp.host.clone(),
                port: smtp.port,
                from: mail.from.clone(),
                username: smtp.username.clone(),
                password: smtp.password.clone(),
            })?;
            tracing::info!(host = %smtp.host, port = smtp.port, "SMTP mailer ready");
            Ok(Arc::new(mailer))
        }
        #[cfg(not(feature = "mail-smtp"))]
        MailTransport::Smtp => anyhow::bail!("mail.transport = \"smtp\" needs the mail-smtp feature"),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received SIGINT, shutting down"),
        () = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
