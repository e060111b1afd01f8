use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::config::Config;

const QUEUE_CAPACITY: usize = 100;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: &EmailMessage) -> anyhow::Result<()>;
}

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(config: &Config, username: &str, password: &str) -> anyhow::Result<Self> {
        let builder = if config.mail_use_tls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.mail_server)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.mail_server)
        };

        let transport = builder
            .port(config.mail_port)
            .credentials(Credentials::new(username.to_string(), password.to_string()))
            .build();

        let from = config.mail_from.as_deref().unwrap_or(username).parse()?;

        Ok(Self { transport, from })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, message: &EmailMessage) -> anyhow::Result<()> {
        let email = Message::builder()
            .from(self.from.clone())
            .to(message.to.parse()?)
            .subject(&message.subject)
            .header(ContentType::TEXT_PLAIN)
            .body(message.body.clone())?;

        self.transport.send(email).await?;
        Ok(())
    }
}

/// Used when SMTP credentials are missing: messages are logged and dropped.
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, message: &EmailMessage) -> anyhow::Result<()> {
        tracing::warn!(
            to = %message.to,
            subject = %message.subject,
            "Email credentials not configured, message not sent"
        );
        Ok(())
    }
}

/// Picks the SMTP mailer when credentials are configured.
pub fn mailer_from_config(config: &Config) -> anyhow::Result<Arc<dyn Mailer>> {
    match config.mail_credentials() {
        Some((username, password)) => Ok(Arc::new(SmtpMailer::new(config, username, password)?)),
        None => {
            tracing::warn!("MAIL_USERNAME/MAIL_PASSWORD not set, outgoing email is disabled");
            Ok(Arc::new(LogMailer))
        }
    }
}

/// Hands outgoing email to a background task so requests never wait on SMTP.
///
/// The dispatcher stops once every `MailService` handle is dropped and the
/// queue is drained.
#[derive(Clone)]
pub struct MailService {
    sender: mpsc::Sender<EmailMessage>,
}

impl MailService {
    pub fn start(mailer: Arc<dyn Mailer>) -> (Self, JoinHandle<()>) {
        let (tx, mut rx) = mpsc::channel::<EmailMessage>(QUEUE_CAPACITY);

        let handle = tokio::spawn(async move {
            while let Some(message) = rx.recv().await {
                match mailer.send(&message).await {
                    Ok(()) => tracing::info!(to = %message.to, "Email sent"),
                    Err(e) => tracing::error!(to = %message.to, error = %e, "Failed to send email"),
                }
            }
            tracing::debug!("Mail dispatcher stopped");
        });

        (Self { sender: tx }, handle)
    }

    /// Delivery failures are logged, never returned.
    pub fn queue(&self, message: EmailMessage) {
        if let Err(e) = self.sender.try_send(message) {
            tracing::warn!(error = %e, "Mail queue rejected message");
        }
    }
}
