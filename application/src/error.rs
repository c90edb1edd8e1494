//! [`Error`]-related definitions.

use std::fmt;

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use derive_more::Error as StdError;
use itertools::Itertools as _;
use serde::Serialize;
use service::{
    command::{cancel_booking, create_booking, process_payment},
    domain::engine,
    infra::database,
    query::search_rooms,
};
use tracerr::{Trace, Traced};
use tracing as log;

/// Defines a new error type.
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_error {
    (
        enum $name:ident {
            $(
                #[code = $code:literal]
                #[status = $status_code:ident]
                #[message = $message:literal]
                $variant:ident
            ),* $(,)?
        }
    ) => {
        /// Error type.
        #[derive(
            Clone,
            Copy,
            Debug,
            ::derive_more::Display,
            ::derive_more::Error
        )]
        #[repr(u16)]
        pub enum $name {
            $(
                #[display($message)]
                #[doc = $message]
                $variant,
            )*
        }

        impl From<$name> for $crate::Error {
            fn from(err: $name) -> Self {
                match err {
                    $(
                        $name::$variant => Self {
                            code: $code,
                            status_code: ::http::StatusCode::$status_code,
                            message: $message.to_string(),
                            backtrace: None,
                        },
                    )*
                }
            }
        }

        impl ::axum::response::IntoResponse for $name {
            fn into_response(self) -> ::axum::response::Response {
                $crate::Error::from(self).into_response()
            }
        }
    };
}

/// REST API [`Error`].
#[derive(Clone, Debug, StdError)]
pub struct Error {
    /// [`Error`] code.
    pub code: Code,

    /// [`http::StatusCode`] of this [`Error`].
    pub status_code: http::StatusCode,

    /// Backtrace of this [`Error`].
    #[error(not(backtrace))]
    pub backtrace: Option<Trace>,

    /// [`Error`] message.
    pub message: String,
}

impl Error {
    /// Creates a new [`Error`] with the provided parameters.
    #[must_use]
    pub fn new(
        code: Code,
        status_code: http::StatusCode,
        message: &impl ToString,
    ) -> Self {
        Self {
            code,
            status_code,
            message: message.to_string(),
            backtrace: None,
        }
    }

    /// Create a new [`Error`] representing an internal server error.
    #[must_use]
    pub fn internal(msg: &impl ToString) -> Self {
        Self::new(
            "INTERNAL_SERVER_ERROR",
            http::StatusCode::INTERNAL_SERVER_ERROR,
            msg,
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            code,
            status_code: _,
            backtrace,
            message,
        } = self;

        write!(
            f,
            "[{code}]: {message}{}",
            backtrace
                .iter()
                .format_with("\n", |trace, f| f(&format_args!("{trace}"))),
        )
    }
}

/// JSON body of an [`Error`] response.
#[derive(Debug, Serialize)]
struct Body<'e> {
    /// [`Error::code`].
    code: Code,

    /// [`Error::message`].
    message: &'e str,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        if self.status_code.is_server_error() {
            log::error!("{self}");
        }
        let body = Body {
            code: self.code,
            message: &self.message,
        };
        (self.status_code, Json(body)).into_response()
    }
}

/// [`Error`] code.
pub type Code = &'static str;

/// Helper trait for converting types into [`Error`]s.
pub trait AsError {
    /// Tries to convert the type into an [`Error`].
    ///
    /// [`None`] is returned if the type cannot be converted into an [`Error`].
    fn try_as_error(&self) -> Option<Error>;

    /// Converts the type into an [`Error`].
    fn as_error(&self) -> Error
    where
        Self: fmt::Display,
    {
        self.try_as_error()
            .unwrap_or_else(|| Error::internal(&self))
    }

    /// Converts the type into an [`Error`] by consuming it.
    fn into_error(self) -> Error
    where
        Self: fmt::Display + Sized,
    {
        self.as_error()
    }
}

impl<E: AsError + fmt::Display> AsError for Traced<E> {
    fn try_as_error(&self) -> Option<Error> {
        let mut error = self.as_ref().try_as_error()?;
        error.backtrace = Some(self.trace().clone());
        Some(error)
    }

    fn as_error(&self) -> Error
    where
        Self: fmt::Display,
    {
        self.try_as_error().unwrap_or_else(|| {
            let mut error = Error::internal(&self.as_ref());
            error.backtrace = Some(self.trace().clone());
            error
        })
    }
}

impl AsError for database::Error {
    fn try_as_error(&self) -> Option<Error> {
        None
    }
}

impl AsError for engine::Error {
    fn try_as_error(&self) -> Option<Error> {
        use http::StatusCode as S;

        let (code, status) = match self.kind() {
            engine::ErrorKind::InvalidRange => {
                ("INVALID_RANGE", S::BAD_REQUEST)
            }
            engine::ErrorKind::Unavailable => ("UNAVAILABLE", S::CONFLICT),
            engine::ErrorKind::NotCancellable => {
                ("NOT_CANCELLABLE", S::CONFLICT)
            }
            engine::ErrorKind::NoPolicyDefined => {
                ("NO_POLICY_DEFINED", S::UNPROCESSABLE_ENTITY)
            }
        };
        Some(Error::new(code, status, self))
    }
}

impl AsError for create_booking::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::CheckInInPast(_) => Some(Error::new(
                "CHECK_IN_IN_PAST",
                http::StatusCode::BAD_REQUEST,
                self,
            )),
            Self::Db(e) => e.try_as_error(),
            Self::Engine(e) => e.try_as_error(),
            Self::HotelNotExists(_) => None,
            Self::RoomTypeNotExists(_) => Some(Error::new(
                "ROOM_TYPE_NOT_EXISTS",
                http::StatusCode::NOT_FOUND,
                self,
            )),
        }
    }
}

impl AsError for process_payment::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::BookingNotExists(_) => Some(Error::new(
                "BOOKING_NOT_EXISTS",
                http::StatusCode::NOT_FOUND,
                self,
            )),
            Self::BookingTransition(_) | Self::PaymentTransition(_) => {
                Some(Error::new(
                    "INVALID_TRANSITION",
                    http::StatusCode::CONFLICT,
                    self,
                ))
            }
            Self::Db(e) => e.try_as_error(),
            Self::PaymentNotExists(_) => None,
        }
    }
}

impl AsError for cancel_booking::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::BookingNotExists(_) => Some(Error::new(
                "BOOKING_NOT_EXISTS",
                http::StatusCode::NOT_FOUND,
                self,
            )),
            Self::BookingTransition(_) | Self::PaymentTransition(_) => {
                Some(Error::new(
                    "INVALID_TRANSITION",
                    http::StatusCode::CONFLICT,
                    self,
                ))
            }
            Self::Db(e) => e.try_as_error(),
            Self::Engine(e) => e.try_as_error(),
            Self::HotelNotExists(_)
            | Self::PaymentNotExists(_)
            | Self::RoomTypeNotExists(_) => None,
        }
    }
}

impl AsError for search_rooms::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::Engine(e) => e.try_as_error(),
        }
    }
}
