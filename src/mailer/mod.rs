//! Outbound email: MailerSend client plus the background outbox.
//!
//! Email is strictly best-effort. The contact endpoint enqueues a job and
//! returns; delivery failures are logged, never surfaced to the caller.

mod templates;

use reqwest::StatusCode;
use serde::Serialize;
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use std::time::Duration;
use thiserror::Error as ThisError;
use tokio::sync::{Mutex, mpsc};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::db::ContactMessage;

const MAILERSEND_ENDPOINT: &str = "https://api.mailersend.com/v1/email";

/// Hard bound on a single provider call; a send past this is abandoned.
const SEND_TIMEOUT: Duration = Duration::from_secs(10);

/// Bounded outbox depth. A full queue drops the job with a warning.
const QUEUE_CAPACITY: usize = 64;

/// Fixed number of background senders draining the outbox.
const WORKER_COUNT: usize = 2;

#[derive(Debug, ThisError)]
pub enum MailError {
    #[error("email configuration incomplete: from={from}, to={to}")]
    Incomplete { from: String, to: String },

    #[error("request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("provider rejected send ({status}): {body}")]
    Rejected { status: StatusCode, body: String },

    #[error("send timed out after {0:?}")]
    TimedOut(Duration),
}

impl MailError {
    /// MailerSend signals the unique-recipient quota with error code
    /// MS42225 on a 422 response.
    pub fn is_recipient_quota(&self) -> bool {
        match self {
            MailError::Rejected { body, .. } => {
                body.contains("MS42225") || body.to_ascii_lowercase().contains("unique recipients")
            }
            _ => false,
        }
    }
}

#[derive(Serialize)]
struct Party<'a> {
    email: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    name: &'a str,
}

#[derive(Serialize)]
struct EmailPayload<'a> {
    from: Party<'a>,
    to: Vec<Party<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<Party<'a>>,
    subject: &'a str,
    text: &'a str,
    html: &'a str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tags: Vec<&'a str>,
}

/// MailerSend HTTP client. One instance per process, shared by the outbox
/// workers and the synchronous test-email endpoint.
#[derive(Debug)]
pub struct Mailer {
    client: reqwest::Client,
    api_key: String,
    from_name: String,
    from_email: String,
    to_email: String,
}

impl Mailer {
    pub fn from_config(cfg: &Config) -> Self {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(SEND_TIMEOUT)
            .build()
            .expect("failed to build reqwest client");

        Self {
            client,
            api_key: cfg.mailersend_api_key.clone(),
            from_name: cfg.mailersend_from_name.clone(),
            from_email: cfg.mailersend_from_email.clone(),
            to_email: cfg.mailersend_to_email.clone(),
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty() && !self.from_email.is_empty() && !self.to_email.is_empty()
    }

    fn check_configured(&self) -> Result<(), MailError> {
        if self.from_email.is_empty() || self.to_email.is_empty() || self.api_key.is_empty() {
            return Err(MailError::Incomplete {
                from: self.from_email.clone(),
                to: self.to_email.clone(),
            });
        }
        Ok(())
    }

    async fn send(&self, payload: &EmailPayload<'_>) -> Result<(), MailError> {
        let send = async {
            let resp = self
                .client
                .post(MAILERSEND_ENDPOINT)
                .bearer_auth(&self.api_key)
                .json(payload)
                .send()
                .await?;

            let status = resp.status();
            if status.is_success() {
                return Ok(());
            }
            let body = resp.text().await.unwrap_or_default();
            Err(MailError::Rejected { status, body })
        };

        match tokio::time::timeout(SEND_TIMEOUT, send).await {
            Ok(result) => result,
            Err(_) => Err(MailError::TimedOut(SEND_TIMEOUT)),
        }
    }

    /// Admin notification for a stored contact message; the submitter is
    /// set as reply-to so the admin can answer directly.
    pub async fn send_contact_notification(&self, msg: &ContactMessage) -> Result<(), MailError> {
        self.check_configured()?;

        let subject = templates::admin_subject(msg);
        let html = templates::admin_html(msg);
        let text = templates::admin_text(msg);

        self.send(&EmailPayload {
            from: Party {
                email: &self.from_email,
                name: &self.from_name,
            },
            to: vec![Party {
                email: &self.to_email,
                name: "Portfolio Admin",
            }],
            reply_to: Some(Party {
                email: &msg.email,
                name: &msg.name,
            }),
            subject: &subject,
            text: &text,
            html: &html,
            tags: vec!["portfolio", "contact-form"],
        })
        .await
    }

    pub async fn send_thank_you(&self, msg: &ContactMessage) -> Result<(), MailError> {
        self.check_configured()?;

        let html = templates::thank_you_html(&msg.name);
        let text = templates::thank_you_text(&msg.name);

        self.send(&EmailPayload {
            from: Party {
                email: &self.from_email,
                name: &self.from_name,
            },
            to: vec![Party {
                email: &msg.email,
                name: &msg.name,
            }],
            reply_to: None,
            subject: templates::THANK_YOU_SUBJECT,
            text: &text,
            html: &html,
            tags: vec!["portfolio", "thank-you"],
        })
        .await
    }

    /// Synchronous configuration check used by the test-email endpoint.
    pub async fn send_test(&self) -> Result<(), MailError> {
        self.check_configured()?;

        self.send(&EmailPayload {
            from: Party {
                email: &self.from_email,
                name: &self.from_name,
            },
            to: vec![Party {
                email: &self.to_email,
                name: "Test Recipient",
            }],
            reply_to: None,
            subject: templates::TEST_SUBJECT,
            text: templates::TEST_TEXT,
            html: templates::TEST_HTML,
            tags: Vec::new(),
        })
        .await
    }
}

/// Work handed to the outbox.
#[derive(Debug)]
pub enum OutboxJob {
    ContactNotification(ContactMessage),
}

struct OutboxInner {
    mailer: Arc<Mailer>,
    send_thank_you: bool,
    /// One-way switch: flips when the provider reports its recipient
    /// quota and never resets for the process lifetime.
    thank_you_disabled: AtomicBool,
}

/// Bounded queue feeding a fixed pool of background email workers.
#[derive(Clone)]
pub struct Outbox {
    tx: mpsc::Sender<OutboxJob>,
}

impl Outbox {
    pub fn spawn(mailer: Arc<Mailer>, send_thank_you: bool) -> Self {
        let (tx, rx) = mpsc::channel(QUEUE_CAPACITY);
        let rx = Arc::new(Mutex::new(rx));
        let inner = Arc::new(OutboxInner {
            mailer,
            send_thank_you,
            thank_you_disabled: AtomicBool::new(false),
        });

        for worker in 0..WORKER_COUNT {
            let rx = Arc::clone(&rx);
            let inner = Arc::clone(&inner);
            tokio::spawn(async move {
                loop {
                    let job = rx.lock().await.recv().await;
                    let Some(job) = job else {
                        debug!(worker, "outbox channel closed; worker exiting");
                        break;
                    };
                    inner.handle(job).await;
                }
            });
        }

        Self { tx }
    }

    /// Best-effort hand-off: a full (or closed) queue drops the job.
    pub fn enqueue(&self, job: OutboxJob) {
        if let Err(err) = self.tx.try_send(job) {
            warn!(error = %err, "outbox queue rejected job; notification dropped");
        }
    }
}

impl OutboxInner {
    async fn handle(&self, job: OutboxJob) {
        match job {
            OutboxJob::ContactNotification(msg) => self.notify_contact(&msg).await,
        }
    }

    async fn notify_contact(&self, msg: &ContactMessage) {
        match self.mailer.send_contact_notification(msg).await {
            Ok(()) => info!(message_id = msg.id, "contact notification sent"),
            Err(err) => {
                warn!(message_id = msg.id, error = %err, "failed to send contact notification");
                return;
            }
        }

        if !self.send_thank_you {
            return;
        }
        if self.thank_you_disabled.load(Ordering::Relaxed) {
            debug!(
                message_id = msg.id,
                "skipping thank-you email (disabled after provider limit)"
            );
            return;
        }

        match self.mailer.send_thank_you(msg).await {
            Ok(()) => info!(message_id = msg.id, "thank-you email sent"),
            Err(err) if err.is_recipient_quota() => {
                self.thank_you_disabled.store(true, Ordering::Relaxed);
                warn!(
                    message_id = msg.id,
                    error = %err,
                    "disabling thank-you emails for this process after provider limit"
                );
            }
            Err(err) => {
                warn!(message_id = msg.id, error = %err, "failed to send thank-you email");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::MailError;
    use reqwest::StatusCode;

    #[test]
    fn quota_detection_matches_code_and_phrase() {
        let quota = MailError::Rejected {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            body: r#"{"message":"reached Unique Recipients limit","code":"MS42225"}"#.to_string(),
        };
        assert!(quota.is_recipient_quota());

        let phrase_only = MailError::Rejected {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            body: "too many unique recipients this month".to_string(),
        };
        assert!(phrase_only.is_recipient_quota());

        let unrelated = MailError::Rejected {
            status: StatusCode::UNAUTHORIZED,
            body: "bad token".to_string(),
        };
        assert!(!unrelated.is_recipient_quota());
    }
}
