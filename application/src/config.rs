//! [`Config`]-related definitions.

use std::{path::PathBuf, time};

use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use serde::Deserialize;
use smart_default::SmartDefault;

/// Application configuration.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: Server,

    /// Service configuration.
    pub service: Service,

    /// Log configuration.
    pub log: Log,

    /// Mail configuration.
    pub mail: Mail,
}

impl Config {
    /// Creates a new [`Config`] by:
    /// - loading it from the provided `path` (if any);
    /// - merging it with the environment variables (if any);
    /// - using default values for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(path: impl AsRef<str>) -> Result<Self, ConfigError> {
        ConfigBuilder::<DefaultState>::default()
            .add_source(config::File::with_name(path.as_ref()).required(false))
            .add_source(config::Environment::with_prefix("CONF").separator("."))
            .build()?
            .try_deserialize()
    }
}

/// Server configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Server {
    /// Host to bind the server to.
    #[default("0.0.0.0".to_owned())]
    pub host: String,

    /// Port to bind the server to.
    #[default(8080)]
    pub port: u16,

    /// [CORS] configuration.
    ///
    /// [CORS]: https://developer.mozilla.org/en-US/docs/Web/HTTP/CORS
    pub cors: Cors,
}

/// [CORS] configuration.
///
/// [CORS]: https://developer.mozilla.org/en-US/docs/Web/HTTP/CORS
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Cors {
    /// List of allowed origins.
    #[default(vec!["*".to_owned()])]
    pub origins: Vec<String>,
}

/// Service configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Service {
    /// Service tasks configuration.
    pub tasks: Tasks,
}

impl From<Service> for service::Config {
    fn from(value: Service) -> Self {
        let Service {
            tasks: Tasks {
                complete_finished_bookings,
            },
        } = value;
        Self {
            complete_finished_bookings:
                service::task::complete_finished_bookings::Config {
                    interval: complete_finished_bookings.interval,
                },
        }
    }
}

/// Service tasks configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Tasks {
    /// `CompleteFinishedBookings` task configuration.
    pub complete_finished_bookings: Task,
}

/// Service task configuration.
#[derive(Clone, Copy, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Task {
    /// Task execution interval.
    #[default(time::Duration::from_secs(60 * 60))]
    #[serde(with = "humantime_serde")]
    pub interval: time::Duration,
}

/// Mail configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Mail {
    /// Sender of the notification emails.
    #[default("Hotel Booking <booking@hotel-booking.local>".to_owned())]
    pub from: String,

    /// The way the notification emails are delivered.
    pub delivery: MailDelivery,
}

/// The way notification emails are delivered.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MailDelivery {
    /// Emails are written to the log only.
    #[default]
    Log,

    /// Emails are stored as files.
    File {
        /// Directory to store the emails in.
        dir: PathBuf,
    },

    /// Emails are sent via an SMTP relay.
    Smtp {
        /// Host of the SMTP relay.
        host: String,

        /// Port of the SMTP relay.
        #[serde(default = "smtp_port")]
        port: u16,

        /// Username to authenticate with.
        username: String,

        /// Password to authenticate with.
        password: String,

        /// Whether to use `STARTTLS`.
        #[serde(default = "enabled")]
        starttls: bool,
    },
}

/// Default SMTP submission port.
const fn smtp_port() -> u16 {
    587
}

/// Default value of a toggle.
const fn enabled() -> bool {
    true
}

impl From<Mail> for service::infra::mailer::Config {
    fn from(value: Mail) -> Self {
        use service::infra::mailer::Delivery;

        let Mail { from, delivery } = value;
        let delivery = match delivery {
            MailDelivery::Log => Delivery::Log,
            MailDelivery::File { dir } => Delivery::File { dir },
            MailDelivery::Smtp {
                host,
                port,
                username,
                password,
                starttls,
            } => Delivery::Smtp {
                host,
                port,
                username,
                password,
                starttls,
            },
        };
        Self { from, delivery }
    }
}

/// Log configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Log {
    /// Log level.
    pub level: LogLevel,
}

/// Log level.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogLevel {
    /// Designates very low priority, often extremely verbose, information.
    Trace,

    /// Designates lower priority information.
    Debug,

    /// Designates useful information.
    #[default]
    Info,

    /// Designates hazardous situations.
    Warn,

    /// Designates very serious errors.
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}

#[cfg(test)]
mod spec {
    use std::time;

    use service::infra::mailer;

    use super::{Config, LogLevel, MailDelivery};

    #[test]
    fn defaults_without_file() {
        let config = Config::new("missing-config-file").unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.cors.origins, vec!["*".to_owned()]);
        assert_eq!(
            config.service.tasks.complete_finished_bookings.interval,
            time::Duration::from_secs(60 * 60),
        );
        assert!(matches!(config.log.level, LogLevel::Info));
        assert!(matches!(config.mail.delivery, MailDelivery::Log));
    }

    #[test]
    fn reads_smtp_delivery() {
        let config = config::Config::builder()
            .add_source(config::File::from_str(
                r#"
                [mail]
                from = "Réservations <booking@plaza-paris.fr>"

                [mail.delivery]
                kind = "smtp"
                host = "smtp.plaza-paris.fr"
                username = "booking"
                password = "secret"
                "#,
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize::<Config>()
            .unwrap();

        let mail = mailer::Config::from(config.mail);

        assert_eq!(mail.from, "Réservations <booking@plaza-paris.fr>");
        assert!(matches!(
            mail.delivery,
            mailer::Delivery::Smtp { port: 587, starttls: true, .. },
        ));
    }

    #[test]
    fn converts_into_service_config() {
        let mut config = Config::default();
        config.service.tasks.complete_finished_bookings.interval =
            time::Duration::from_secs(5 * 60);

        let service = service::Config::from(config.service);

        assert_eq!(
            service.complete_finished_bookings.interval,
            time::Duration::from_secs(5 * 60),
        );
    }
}
