//! Outgoing email delivery for password resets.
//!
//! The `Mailer` trait is the seam the auth service depends on; `EmailService`
//! is the production SMTP implementation built on lettre. Tests substitute a
//! mock that captures the reset secret or injects a send failure.

use crate::config::EmailConfig;
use crate::errors::{ServiceError, ServiceResult};
use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart, SinglePart, header::ContentType};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::str::FromStr;

/// Delivery seam for password-reset emails.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Sends the reset secret to the account's email address.
    async fn send_password_reset(
        &self,
        recipient_email: &str,
        reset_secret: &str,
        valid_minutes: i64,
    ) -> ServiceResult<()>;
}

pub struct EmailService {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    config: EmailConfig,
}

impl EmailService {
    /// Creates a new EmailService instance
    pub fn new(config: EmailConfig) -> ServiceResult<Self> {
        let creds = Credentials::new(config.smtp_username.clone(), config.smtp_password.clone());

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
            .map_err(|e| ServiceError::validation(format!("Invalid SMTP host: {e}")))?
            .port(config.smtp_port)
            .credentials(creds)
            .build();

        Ok(Self { mailer, config })
    }

    /// Sends a generic multipart email.
    async fn send_email(
        &self,
        to_email: &str,
        subject: &str,
        html_content: &str,
        text_content: &str,
    ) -> ServiceResult<()> {
        let from_mailbox = Mailbox::from_str(&format!(
            "{} <{}>",
            self.config.from_name, self.config.from_email
        ))
        .map_err(|e| ServiceError::validation(format!("Invalid from email: {e}")))?;

        let to_mailbox = Mailbox::from_str(to_email)
            .map_err(|e| ServiceError::validation(format!("Invalid recipient email: {e}")))?;

        let email = Message::builder()
            .from(from_mailbox)
            .to(to_mailbox)
            .subject(subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(text_content.to_string()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(html_content.to_string()),
                    ),
            )
            .map_err(|e| ServiceError::validation(format!("Failed to build email: {e}")))?;

        self.mailer
            .send(email)
            .await
            .map_err(|e| ServiceError::external_service(format!("Failed to send email: {e}")))?;

        Ok(())
    }

    fn build_reset_html(&self, reset_url: &str, valid_minutes: i64) -> String {
        format!(
            r#"
            <html>
            <body style="font-family: Arial, sans-serif; line-height: 1.6; color: #333;">
                <div style="max-width: 600px; margin: 0 auto; padding: 20px;">
                    <h2 style="color: #2c3e50;">Reset your password</h2>

                    <p>We received a request to reset the password for your account.</p>

                    <p>Click the button below to choose a new password:</p>

                    <div style="text-align: center; margin: 30px 0;">
                        <a href="{reset_url}"
                           style="background-color: #3498db; color: white; padding: 12px 30px;
                                  text-decoration: none; border-radius: 5px; display: inline-block;">
                            Reset Password
                        </a>
                    </div>

                    <p>Or copy and paste this link into your browser:</p>
                    <p style="word-break: break-all; color: #7f8c8d;">{reset_url}</p>

                    <hr style="border: none; border-top: 1px solid #ecf0f1; margin: 30px 0;">

                    <p style="font-size: 12px; color: #7f8c8d;">
                        This link will expire in {valid_minutes} minutes. If you didn't request a
                        password reset, you can safely ignore this email.
                    </p>
                </div>
            </body>
            </html>
            "#
        )
    }

    fn build_reset_text(&self, reset_url: &str, valid_minutes: i64) -> String {
        format!(
            r#"Reset your password

We received a request to reset the password for your account.

Open the link below to choose a new password:
{reset_url}

This link will expire in {valid_minutes} minutes. If you didn't request a password reset, you can safely ignore this email.
            "#
        )
    }
}

#[async_trait]
impl Mailer for EmailService {
    async fn send_password_reset(
        &self,
        recipient_email: &str,
        reset_secret: &str,
        valid_minutes: i64,
    ) -> ServiceResult<()> {
        let reset_url = format!(
            "{}/api/v1/resetPassword/{}",
            self.config.base_url, reset_secret
        );

        let html_content = self.build_reset_html(&reset_url, valid_minutes);
        let text_content = self.build_reset_text(&reset_url, valid_minutes);

        self.send_email(
            recipient_email,
            "Reset Password",
            &html_content,
            &text_content,
        )
        .await
    }
}
