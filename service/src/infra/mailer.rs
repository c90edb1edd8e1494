//! [`Mailer`] delivering [`Notification`]s by email.

use std::{fs, path::PathBuf, sync::Arc};

use common::operations::Notify;
use derive_more::{Display, Error as StdError, From};
use lettre::{
    address::AddressError,
    message::{header::ContentType, Mailbox},
    transport::{file, smtp, smtp::authentication::Credentials},
    AsyncFileTransport, AsyncSmtpTransport, AsyncTransport as _, Message,
    Tokio1Executor,
};
#[cfg(test)]
use lettre::transport::stub::{self, AsyncStubTransport};
use tracerr::Traced;
use tracing as log;

use crate::domain::Notification;

/// Handler delivering notifications.
pub use common::Handler as Notifier;

/// [`Mailer`] configuration.
#[derive(Clone, Debug, Default)]
pub struct Config {
    /// Sender of the emails, like `Hotel Booking <booking@example.com>`.
    pub from: String,

    /// [`Delivery`] of the emails.
    pub delivery: Delivery,
}

/// The way a [`Mailer`] delivers emails.
#[derive(Clone, Debug, Default)]
pub enum Delivery {
    /// Emails are only logged.
    #[default]
    Log,

    /// Emails are written as `.eml` files into the `dir`ectory.
    File {
        /// Directory to write the emails into.
        dir: PathBuf,
    },

    /// Emails are sent to an SMTP relay.
    Smtp {
        /// Host of the SMTP relay.
        host: String,

        /// Port of the SMTP relay.
        port: u16,

        /// Username to authenticate with.
        username: String,

        /// Password to authenticate with.
        password: String,

        /// Whether to upgrade the connection with `STARTTLS`.
        starttls: bool,
    },
}

/// Email sender of [`Notification`]s.
#[derive(Clone, Debug, Default)]
pub struct Mailer {
    /// [`Transport`] of this [`Mailer`].
    transport: Arc<Transport>,
}

/// Built [`Delivery`] of a [`Mailer`].
#[derive(Debug, Default)]
enum Transport {
    /// See [`Delivery::Log`].
    #[default]
    Log,

    /// Email [`Sender`] along with the sender [`Mailbox`].
    Mail { from: Mailbox, sender: Sender },
}

/// Transport actually delivering emails.
#[derive(Debug)]
enum Sender {
    File(AsyncFileTransport<Tokio1Executor>),
    Smtp(AsyncSmtpTransport<Tokio1Executor>),
    #[cfg(test)]
    Stub(AsyncStubTransport),
}

impl Sender {
    /// Delivers the provided [`Message`].
    async fn send(&self, message: Message) -> Result<(), Error> {
        match self {
            Self::File(t) => t.send(message).await.map(drop)?,
            Self::Smtp(t) => t.send(message).await.map(drop)?,
            #[cfg(test)]
            Self::Stub(t) => t.send(message).await?,
        }
        Ok(())
    }
}

impl Mailer {
    /// Creates a new [`Mailer`] out of the provided [`Config`].
    ///
    /// # Errors
    ///
    /// If the sender address is malformed, the emails directory cannot be
    /// created, or the SMTP relay cannot be resolved.
    pub fn new(config: &Config) -> Result<Self, Traced<Error>> {
        let Config { from, delivery } = config;

        let sender = match delivery {
            Delivery::Log => return Ok(Self::default()),
            Delivery::File { dir } => {
                fs::create_dir_all(dir)
                    .map_err(tracerr::from_and_wrap!(=> Error))?;
                Sender::File(AsyncFileTransport::new(dir))
            }
            Delivery::Smtp {
                host,
                port,
                username,
                password,
                starttls,
            } => {
                if !starttls {
                    log::warn!("SMTP relay `{host}` is used without TLS");
                }
                let builder = if *starttls {
                    AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
                        .map_err(tracerr::from_and_wrap!(=> Error))?
                } else {
                    AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(
                        host,
                    )
                };
                Sender::Smtp(
                    builder
                        .port(*port)
                        .credentials(Credentials::new(
                            username.clone(),
                            password.clone(),
                        ))
                        .build(),
                )
            }
        };
        let from = from
            .parse::<Mailbox>()
            .map_err(tracerr::from_and_wrap!(=> Error))?;

        Ok(Self {
            transport: Arc::new(Transport::Mail { from, sender }),
        })
    }
}

impl Notifier<Notify<Notification>> for Mailer {
    type Ok = ();
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Notify(notification): Notify<Notification>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = notification.booking.id;
        let Some(to) = notification.recipient() else {
            log::debug!("`Booking(id: {id})` has no contact email");
            return Ok(());
        };
        let subject = notification.subject();

        let (from, sender) = match &*self.transport {
            Transport::Log => {
                log::info!(
                    booking.id = %id,
                    "email `{subject}` to `{to}`:\n{}",
                    notification.body(),
                );
                return Ok(());
            }
            Transport::Mail { from, sender } => (from, sender),
        };

        let to_mailbox = to
            .to_string()
            .parse::<Mailbox>()
            .map_err(tracerr::from_and_wrap!(=> Error))?;
        let message = Message::builder()
            .from(from.clone())
            .to(to_mailbox)
            .subject(subject.as_str())
            .header(ContentType::TEXT_PLAIN)
            .body(notification.body())
            .map_err(tracerr::from_and_wrap!(=> Error))?;
        sender.send(message).await.map_err(tracerr::wrap!())?;

        log::info!(booking.id = %id, "sent email `{subject}` to `{to}`");
        Ok(())
    }
}

/// Error of delivering a [`Notification`].
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// Email address is malformed.
    #[display("Invalid email address: {_0}")]
    Address(AddressError),

    /// Emails directory cannot be created.
    #[display("Failed to create emails directory: {_0}")]
    Dir(std::io::Error),

    /// Email cannot be written to a file.
    #[display("Failed to write email: {_0}")]
    File(file::Error),

    /// Email cannot be built.
    #[display("Failed to build email: {_0}")]
    Message(lettre::error::Error),

    /// Email cannot be sent via SMTP.
    #[display("Failed to send email: {_0}")]
    Smtp(smtp::Error),

    /// Stubbed delivery failed.
    #[cfg(test)]
    #[display("Failed to deliver email: {_0}")]
    Stub(stub::Error),
}

#[cfg(test)]
pub(crate) mod spec {
    use std::sync::Arc;

    use common::{operations::Notify, Handler as _};
    use lettre::transport::stub::AsyncStubTransport;

    use crate::domain::{
        booking::{spec::booking, Status},
        hotel, notification, room_type, Email, Notification,
    };

    use super::{Config, Delivery, Mailer, Sender, Transport};

    /// Creates a new [`Mailer`] recording the sent emails into the returned
    /// [`AsyncStubTransport`].
    pub(crate) fn mailer(ok: bool) -> (Mailer, AsyncStubTransport) {
        let stub = if ok {
            AsyncStubTransport::new_ok()
        } else {
            AsyncStubTransport::new_error()
        };
        let mailer = Mailer {
            transport: Arc::new(Transport::Mail {
                from: "Reservations <booking@hotel.fr>".parse().unwrap(),
                sender: Sender::Stub(stub.clone()),
            }),
        };
        (mailer, stub)
    }

    fn notification(email: Option<&str>) -> Notification {
        let mut booking = booking(
            room_type::Id::new(),
            "2024-06-01",
            "2024-06-04",
            1,
            Status::Pending,
        );
        booking.contact_email = email.and_then(Email::new);
        Notification {
            booking,
            hotel: hotel::Name::new("Hôtel Plage Nice").unwrap(),
            room_type: room_type::Name::new("Chambre Double").unwrap(),
            event: notification::Event::Created,
        }
    }

    #[tokio::test]
    async fn sends_email_to_contact() {
        let (mailer, stub) = mailer(true);

        mailer
            .execute(Notify(notification(Some("client1@test.com"))))
            .await
            .unwrap();

        let sent = stub.messages().await;
        assert_eq!(sent.len(), 1);
        let (envelope, raw) = &sent[0];
        let to = envelope.to().iter().map(ToString::to_string);
        assert_eq!(to.collect::<Vec<_>>(), ["client1@test.com"]);
        assert_eq!(
            envelope.from().map(ToString::to_string).as_deref(),
            Some("booking@hotel.fr"),
        );
        assert!(raw.contains("Content-Type: text/plain; charset=utf-8"));
    }

    #[tokio::test]
    async fn skips_bookings_without_contact() {
        let (mailer, stub) = mailer(true);

        mailer.execute(Notify(notification(None))).await.unwrap();

        assert!(stub.messages().await.is_empty());
    }

    #[tokio::test]
    async fn reports_delivery_failure() {
        let (mailer, _) = mailer(false);

        let res = mailer
            .execute(Notify(notification(Some("client1@test.com"))))
            .await;

        assert!(res.is_err());
    }

    #[tokio::test]
    async fn only_logs_by_default() {
        let mailer = Mailer::new(&Config::default()).unwrap();

        mailer
            .execute(Notify(notification(Some("client1@test.com"))))
            .await
            .unwrap();
    }

    #[test]
    fn rejects_malformed_sender() {
        let config = Config {
            from: "not an address".into(),
            delivery: Delivery::File {
                dir: std::env::temp_dir().join("hotel-booking-emails"),
            },
        };

        assert!(Mailer::new(&config).is_err());
    }
}
