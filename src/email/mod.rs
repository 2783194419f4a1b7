//! Scorecard delivery over SMTP.
//!
//! One message per team: a short plain/HTML body plus the scorecard PDF as
//! an attachment, relayed via STARTTLS with the credentials from the SMTP
//! settings.

use askama::Template;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::SmtpConfig;
use crate::error::AppError;

/// HTML body for a scorecard message.
#[derive(Template)]
#[template(path = "scorecard_email.html")]
struct ScorecardEmail<'a> {
    team_name: &'a str,
    course_name: &'a str,
}

/// SMTP client bound to one From mailbox.
#[derive(Debug)]
pub struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl Mailer {
    /// Builds the STARTTLS relay transport from the SMTP settings.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Config`] when the relay host or the From
    /// address is unusable.
    pub fn from_config(config: &SmtpConfig) -> Result<Self, AppError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| AppError::config(format!("SMTP relay setup failed: {e}")))?
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .port(config.port)
            .build();

        let from = config
            .from
            .parse::<Mailbox>()
            .map_err(|e| AppError::config(format!("invalid SMTP_FROM address: {e}")))?;

        Ok(Self { transport, from })
    }

    /// Sends one scorecard to every recipient in a single message.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Email`] when a recipient does not parse, the
    /// message cannot be assembled, or the relay rejects it.
    pub async fn send_scorecard(
        &self,
        recipients: &[String],
        team_name: &str,
        course_name: &str,
        file_name: &str,
        pdf: Vec<u8>,
    ) -> Result<(), AppError> {
        let joined = recipients.join(", ");

        let html = ScorecardEmail {
            team_name,
            course_name,
        }
        .render()
        .map_err(|e| AppError::email(joined.clone(), format!("template rendering failed: {e}")))?;
        let plain = format!(
            "The scorecard for team {team_name} on {course_name} is attached.\n\
             Print it or bring it along on your phone.\n"
        );

        let mut builder = Message::builder()
            .from(self.from.clone())
            .subject(format!("Scorecard - {team_name} - {course_name}"));
        for recipient in recipients {
            let mailbox = recipient
                .parse::<Mailbox>()
                .map_err(|e| AppError::email(recipient.clone(), format!("invalid recipient: {e}")))?;
            builder = builder.to(mailbox);
        }

        let pdf_type = ContentType::parse("application/pdf")
            .map_err(|e| AppError::email(joined.clone(), format!("attachment type: {e}")))?;
        let attachment = Attachment::new(file_name.to_string()).body(pdf, pdf_type);

        let email = builder
            .multipart(
                MultiPart::mixed()
                    .multipart(MultiPart::alternative_plain_html(plain, html))
                    .singlepart(attachment),
            )
            .map_err(|e| AppError::email(joined.clone(), format!("message assembly failed: {e}")))?;

        self.transport
            .send(email)
            .await
            .map_err(|e| AppError::email(joined, e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html_body_names_team_and_course() {
        let html = ScorecardEmail {
            team_name: "The Sharks",
            course_name: "Black Course",
        }
        .render()
        .unwrap();

        assert!(html.contains("The Sharks"));
        assert!(html.contains("Black Course"));
    }

    #[tokio::test]
    async fn rejects_unusable_from_address() {
        let config = SmtpConfig {
            host: "smtp.example.com".to_string(),
            port: 587,
            username: "cards@example.com".to_string(),
            password: "app-password".to_string(),
            from: "not an address".to_string(),
        };
        let err = Mailer::from_config(&config).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }
}
