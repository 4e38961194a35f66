//! Email service for booking notifications
//!
//! Delivery is plain SMTP via lettre; templates are inline text in the
//! guest's correspondence language (en/ro).

use lettre::{
    message::{header::ContentType, Mailbox, Message, MultiPart, SinglePart},
    transport::smtp::authentication::Credentials,
    SmtpTransport, Transport,
};
use std::str::FromStr;

use crate::{
    config::EmailConfig,
    error::{AppError, AppResult},
    models::{booking::Booking, enums::Language},
};

#[derive(Clone)]
pub struct EmailService {
    config: EmailConfig,
}

impl EmailService {
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    /// Booking received, awaiting payment/confirmation
    pub async fn send_booking_created(&self, booking: &Booking) -> AppResult<()> {
        let (subject, body) = match booking.language {
            Language::En => (
                format!("Booking {} received", booking.booking_reference),
                format!(
                    r#"
Hello {name},

We received your booking for {cabin}.

Reference: {reference}
Check-in:  {check_in}
Check-out: {check_out}
Guests:    {guests}
Total:     {total} RON

We will confirm your stay as soon as the payment is processed.
"#,
                    name = booking.guest_name,
                    cabin = booking.cabin_name,
                    reference = booking.booking_reference,
                    check_in = booking.check_in,
                    check_out = booking.check_out,
                    guests = booking.guests,
                    total = booking.total,
                ),
            ),
            Language::Ro => (
                format!("Rezervarea {} a fost primită", booking.booking_reference),
                format!(
                    r#"
Bună {name},

Am primit rezervarea ta pentru {cabin}.

Referință: {reference}
Check-in:  {check_in}
Check-out: {check_out}
Oaspeți:   {guests}
Total:     {total} RON

Îți vom confirma sejurul imediat ce plata este procesată.
"#,
                    name = booking.guest_name,
                    cabin = booking.cabin_name,
                    reference = booking.booking_reference,
                    check_in = booking.check_in,
                    check_out = booking.check_out,
                    guests = booking.guests,
                    total = booking.total,
                ),
            ),
        };

        self.send_email(&booking.guest_email, &subject, &body).await
    }

    /// Booking confirmed (payment received or admin confirmation)
    pub async fn send_booking_confirmed(&self, booking: &Booking) -> AppResult<()> {
        let (subject, body) = match booking.language {
            Language::En => (
                format!("Booking {} confirmed", booking.booking_reference),
                format!(
                    "Hello {},\n\nYour stay at {} from {} to {} is confirmed. See you soon!\n",
                    booking.guest_name, booking.cabin_name, booking.check_in, booking.check_out,
                ),
            ),
            Language::Ro => (
                format!("Rezervarea {} a fost confirmată", booking.booking_reference),
                format!(
                    "Bună {},\n\nSejurul tău la {} din {} până în {} este confirmat. Pe curând!\n",
                    booking.guest_name, booking.cabin_name, booking.check_in, booking.check_out,
                ),
            ),
        };

        self.send_email(&booking.guest_email, &subject, &body).await
    }

    /// Booking cancelled
    pub async fn send_booking_cancelled(&self, booking: &Booking) -> AppResult<()> {
        let (subject, body) = match booking.language {
            Language::En => (
                format!("Booking {} cancelled", booking.booking_reference),
                format!(
                    "Hello {},\n\nYour booking {} for {} has been cancelled.\n",
                    booking.guest_name, booking.booking_reference, booking.cabin_name,
                ),
            ),
            Language::Ro => (
                format!("Rezervarea {} a fost anulată", booking.booking_reference),
                format!(
                    "Bună {},\n\nRezervarea ta {} pentru {} a fost anulată.\n",
                    booking.guest_name, booking.booking_reference, booking.cabin_name,
                ),
            ),
        };

        self.send_email(&booking.guest_email, &subject, &body).await
    }

    /// Date-change request decided by the admin
    pub async fn send_date_change_decision(
        &self,
        booking: &Booking,
        approved: bool,
    ) -> AppResult<()> {
        let (subject, body) = match (booking.language, approved) {
            (Language::En, true) => (
                format!("Date change for {} approved", booking.booking_reference),
                format!(
                    "Hello {},\n\nYour stay at {} now runs from {} to {}.\n",
                    booking.guest_name, booking.cabin_name, booking.check_in, booking.check_out,
                ),
            ),
            (Language::En, false) => (
                format!("Date change for {} declined", booking.booking_reference),
                format!(
                    "Hello {},\n\nWe could not move your booking {}; the original dates {} to {} still stand.\n",
                    booking.guest_name, booking.booking_reference, booking.check_in, booking.check_out,
                ),
            ),
            (Language::Ro, true) => (
                format!("Schimbarea datelor pentru {} a fost aprobată", booking.booking_reference),
                format!(
                    "Bună {},\n\nSejurul tău la {} este acum din {} până în {}.\n",
                    booking.guest_name, booking.cabin_name, booking.check_in, booking.check_out,
                ),
            ),
            (Language::Ro, false) => (
                format!("Schimbarea datelor pentru {} a fost refuzată", booking.booking_reference),
                format!(
                    "Bună {},\n\nNu am putut muta rezervarea {}; datele inițiale {} - {} rămân valabile.\n",
                    booking.guest_name, booking.booking_reference, booking.check_in, booking.check_out,
                ),
            ),
        };

        self.send_email(&booking.guest_email, &subject, &body).await
    }

    /// Notify the admin inbox about a new date-change request, if configured
    pub async fn send_admin_date_change_alert(&self, booking_reference: &str) -> AppResult<()> {
        if let Some(admin) = self.config.admin_email.clone() {
            let subject = format!("New date-change request for {}", booking_reference);
            let body = format!(
                "A guest asked to move booking {}. Review it in the back-office.\n",
                booking_reference
            );
            self.send_email(&admin, &subject, &body).await?;
        }
        Ok(())
    }

    /// Generic email sending function
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> AppResult<()> {
        let from_name = self
            .config
            .smtp_from_name
            .as_deref()
            .unwrap_or("Cabana Afina");
        let from_mailbox = Mailbox::from_str(&format!("{} <{}>", from_name, self.config.smtp_from))
            .map_err(|e| AppError::Internal(format!("Invalid from address: {}", e)))?;

        let to_mailbox = Mailbox::from_str(to)
            .map_err(|e| AppError::Internal(format!("Invalid to address: {}", e)))?;

        let email = Message::builder()
            .from(from_mailbox)
            .to(to_mailbox)
            .subject(subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(body.to_string()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(format!(
                                r#"<html><body><pre>{}</pre></body></html>"#,
                                body.replace('\n', "<br>")
                            )),
                    ),
            )
            .map_err(|e| AppError::Internal(format!("Failed to build email: {}", e)))?;

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
            mailer_builder.credentials(Credentials::new(
                username.clone(),
                password.clone(),
            ))
        } else {
            mailer_builder
        };

        let mailer = mailer_builder.build();

        mailer
            .send(&email)
            .map_err(|e| AppError::Internal(format!("Failed to send email: {}", e)))?;

        Ok(())
    }
}
