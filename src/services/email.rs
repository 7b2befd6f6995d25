//! Email notifications for new bookings

use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox, Message, MultiPart, SinglePart},
    transport::smtp::authentication::Credentials,
    SmtpTransport, Transport,
};
use std::{str::FromStr, sync::Arc};

use crate::{
    config::EmailConfig,
    error::{AppError, AppResult},
};

/// A message for the studio staff
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Best-effort message delivery
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, notification: Notification) -> AppResult<()>;
}

/// Pick the notifier matching the email configuration
pub fn notifier_from_config(config: &EmailConfig) -> Arc<dyn Notifier> {
    if config.enabled {
        Arc::new(EmailService::new(config.clone()))
    } else {
        Arc::new(LogNotifier)
    }
}

/// Writes notifications to the log instead of sending them
#[derive(Clone, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, notification: Notification) -> AppResult<()> {
        tracing::info!(
            to = %notification.to,
            subject = %notification.subject,
            body = %notification.body,
            "Email notification (SMTP disabled, not sent)"
        );
        Ok(())
    }
}

#[derive(Clone)]
pub struct EmailService {
    config: EmailConfig,
}

impl EmailService {
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    fn build_message(&self, notification: &Notification) -> AppResult<Message> {
        let from_name = self
            .config
            .smtp_from_name
            .as_deref()
            .unwrap_or("Ink Studio");
        let from_mailbox = Mailbox::from_str(&format!("{} <{}>", from_name, self.config.smtp_from))
            .map_err(|e| AppError::Internal(format!("Invalid from address: {}", e)))?;

        let to_mailbox = Mailbox::from_str(&notification.to)
            .map_err(|e| AppError::Internal(format!("Invalid to address: {}", e)))?;

        Message::builder()
            .from(from_mailbox)
            .to(to_mailbox)
            .subject(notification.subject.as_str())
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(notification.body.clone()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(html_body(&notification.body)),
                    ),
            )
            .map_err(|e| AppError::Internal(format!("Failed to build email: {}", e)))
    }

    fn build_transport(&self) -> AppResult<SmtpTransport> {
        let mailer_builder = if self.config.smtp_use_tls {
            SmtpTransport::starttls_relay(&self.config.smtp_host)
                .map_err(|e| AppError::Internal(format!("Failed to create SMTP transport: {}", e)))?
        } else {
            SmtpTransport::builder_dangerous(&self.config.smtp_host)
        }
        .port(self.config.smtp_port);

        let mailer_builder = if let (Some(username), Some(password)) = (
            &self.config.smtp_username,
            &self.config.smtp_password,
        ) {
            mailer_builder.credentials(Credentials::new(username.clone(), password.clone()))
        } else {
            mailer_builder
        };

        Ok(mailer_builder.build())
    }
}

/// Plain text wrapped for the HTML alternative part, markup escaped
fn html_body(body: &str) -> String {
    format!(
        r#"<html><body><pre>{}</pre></body></html>"#,
        escape_html(body).replace('\n', "<br>")
    )
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[async_trait]
impl Notifier for EmailService {
    async fn notify(&self, notification: Notification) -> AppResult<()> {
        let email = self.build_message(&notification)?;
        let mailer = self.build_transport()?;

        // SmtpTransport is blocking
        tokio::task::spawn_blocking(move || mailer.send(&email))
            .await
            .map_err(|e| AppError::Internal(format!("Email task failed: {}", e)))?
            .map_err(|e| AppError::Internal(format!("Failed to send email: {}", e)))?;

        tracing::debug!(to = %notification.to, "Notification email sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notification(to: &str) -> Notification {
        Notification {
            to: to.to_string(),
            subject: "New booking".to_string(),
            body: "Line one\nLine two".to_string(),
        }
    }

    #[test]
    fn test_build_message() {
        let service = EmailService::new(EmailConfig::default());
        assert!(service.build_message(&notification("artist@inkstudio.example")).is_ok());
    }

    #[test]
    fn test_build_message_rejects_bad_recipient() {
        let service = EmailService::new(EmailConfig::default());
        assert!(matches!(
            service.build_message(&notification("not an address")),
            Err(AppError::Internal(_))
        ));
    }

    #[test]
    fn test_html_body_escapes_client_markup() {
        let html = html_body("New booking from <a href=\"http://evil.example\">Noa</a> & co\nPhone: 'x'");

        assert!(!html.contains("<a href"));
        assert!(!html.contains("</a>"));
        assert!(html.contains("&lt;a href=&quot;http://evil.example&quot;&gt;Noa&lt;/a&gt; &amp; co"));
        assert!(html.contains("<br>Phone: &#39;x&#39;"));
        assert!(html.starts_with("<html><body><pre>"));
    }

    #[test]
    fn test_build_message_with_markup_in_body() {
        let service = EmailService::new(EmailConfig::default());
        let mut message = notification("artist@inkstudio.example");
        message.body = "<a href=\"http://evil\">Pay</a>".to_string();

        let formatted = String::from_utf8_lossy(&service.build_message(&message).unwrap().formatted()).to_string();
        let (_, html_part) = formatted.split_once("Content-Type: text/html").unwrap();
        assert!(!html_part.contains("<a href"));
        assert!(html_part.contains("&lt;a href=&quot;http://evil&quot;&gt;Pay&lt;/a&gt;"));
    }

    #[tokio::test]
    async fn test_log_notifier_never_fails() {
        assert!(LogNotifier.notify(notification("anyone")).await.is_ok());
    }
}
