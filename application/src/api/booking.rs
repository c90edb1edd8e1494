//! [`Booking`]-related REST API handlers.

use axum::{extract::Path, Extension, Json};
use common::{Date, Handler as _, Money, Percent};
use serde::{Deserialize, Serialize};
use service::{
    command::{CancelBooking, CreateBooking, ProcessPayment},
    domain::{
        booking::{self, CancellationReason, Guests, Rooms, SpecialRequests},
        payment, room_type, Booking, Email, Payment,
    },
    query,
};
use uuid::Uuid;

use crate::{
    api::{self, ApiError},
    AsError, Error, Service, Session,
};

/// Body of a [`Booking`] creation request.
#[derive(Clone, Debug, Deserialize)]
pub struct CreateRequest {
    /// ID of the [`RoomType`] to book.
    ///
    /// [`RoomType`]: service::domain::RoomType
    pub room_type_id: Uuid,

    /// Arrival date.
    pub check_in: Date,

    /// Departure date.
    pub check_out: Date,

    /// Number of rooms to book.
    #[serde(default = "api::one")]
    pub rooms: Rooms,

    /// Number of guests.
    #[serde(default = "api::one")]
    pub guests: Guests,

    /// Wishes of the guests.
    #[serde(default)]
    pub special_requests: Option<String>,

    /// Email to send the booking confirmation and cancellation to.
    #[serde(default)]
    pub contact_email: Option<String>,

    /// [`payment::Method`] to pay with.
    #[serde(default)]
    pub payment_method: payment::Method,
}

/// Response to a [`Booking`] creation.
#[derive(Clone, Debug, Serialize)]
pub struct Created {
    /// ID of the created [`Booking`].
    pub id: booking::Id,

    /// [`booking::Status`] of the created [`Booking`].
    pub status: booking::Status,

    /// Total price of the created [`Booking`].
    pub total_price: Money,

    /// Number of booked nights.
    pub number_of_nights: u32,

    /// Rooms of the same type left for the booked nights.
    pub rooms_left: u32,

    /// Pending [`Payment`] of the created [`Booking`].
    pub payment: Payment,
}

/// [`Booking`] as seen by its owner.
#[derive(Clone, Debug, Serialize)]
pub struct View {
    /// Viewed [`Booking`].
    #[serde(flatten)]
    pub booking: Booking,

    /// Number of booked nights.
    pub number_of_nights: u32,

    /// Whether the [`Booking`] may be cancelled today.
    pub can_cancel: bool,

    /// [`Payment`] of the [`Booking`], if requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment: Option<Payment>,
}

impl View {
    /// Creates a new [`View`] of the provided [`Booking`] as of today.
    fn new(booking: Booking, payment: Option<Payment>) -> Self {
        Self {
            number_of_nights: u32::try_from(booking.nights())
                .unwrap_or_default(),
            can_cancel: booking.can_cancel(Date::today()),
            booking,
            payment,
        }
    }
}

/// Response to a [`Booking`] payment.
#[derive(Clone, Debug, Serialize)]
pub struct Paid {
    /// ID of the paid [`Booking`].
    pub id: booking::Id,

    /// New [`booking::Status`] of the paid [`Booking`].
    pub status: booking::Status,

    /// Completed [`Payment`].
    pub payment: Payment,
}

/// Body of a [`Booking`] cancellation request.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct CancelRequest {
    /// Reason of the cancellation.
    #[serde(default)]
    pub reason: Option<String>,
}

/// Response to a [`Booking`] cancellation.
#[derive(Clone, Debug, Serialize)]
pub struct Cancelled {
    /// ID of the cancelled [`Booking`].
    pub id: booking::Id,

    /// New [`booking::Status`] of the cancelled [`Booking`].
    pub status: booking::Status,

    /// Days left until the check-in.
    pub lead_time: i64,

    /// Part of the price retained as the penalty.
    pub penalty_percentage: Percent,

    /// Amount returned to the guest.
    pub refund_amount: Money,

    /// Amount kept by the hotel.
    pub retained_amount: Money,

    /// [`payment::Status`] of the closed [`Payment`].
    pub payment_status: payment::Status,
}

/// Books rooms for the current [`Session`] user.
///
/// # Errors
///
/// If the requested rooms are not available or the request is invalid.
#[tracing::instrument(skip_all, fields(
    user.id = %session.user_id,
    room_type.id = %req.room_type_id,
))]
pub async fn create(
    Extension(service): Extension<Service>,
    session: Session,
    Json(req): Json<CreateRequest>,
) -> Result<(http::StatusCode, Json<Created>), Error> {
    let CreateRequest {
        room_type_id,
        check_in,
        check_out,
        rooms,
        guests,
        special_requests,
        contact_email,
        payment_method,
    } = req;
    let special_requests = special_requests
        .map(|s| {
            SpecialRequests::new(s).ok_or(ApiError::InvalidSpecialRequests)
        })
        .transpose()?;
    let contact_email = contact_email
        .map(|e| Email::new(e.trim()).ok_or(ApiError::InvalidContactEmail))
        .transpose()?;

    let out = service
        .execute(CreateBooking {
            user_id: session.user_id,
            room_type_id: room_type::Id::from(room_type_id),
            stay: booking::Stay::new(check_in, check_out),
            rooms,
            guests,
            special_requests,
            contact_email,
            payment_method,
        })
        .await
        .map_err(AsError::into_error)?;

    Ok((
        http::StatusCode::CREATED,
        Json(Created {
            id: out.booking.id,
            status: out.booking.status,
            total_price: out.booking.total_price,
            number_of_nights: out.nights,
            rooms_left: out.rooms_left,
            payment: out.payment,
        }),
    ))
}

/// Lists [`Booking`]s of the current [`Session`] user, the newest first.
///
/// # Errors
///
/// If the [`Service`] fails.
#[tracing::instrument(skip_all, fields(user.id = %session.user_id))]
pub async fn list(
    Extension(service): Extension<Service>,
    session: Session,
) -> Result<Json<Vec<View>>, Error> {
    let bookings = service
        .execute(query::booking::ByUser::by(session.user_id))
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(
        bookings.into_iter().map(|b| View::new(b, None)).collect(),
    ))
}

/// Returns the [`Booking`] of the current [`Session`] user along with its
/// [`Payment`].
///
/// # Errors
///
/// If the [`Booking`] doesn't exist or belongs to another user.
#[tracing::instrument(skip_all, fields(
    user.id = %session.user_id,
    booking.id = %id,
))]
pub async fn get(
    Extension(service): Extension<Service>,
    session: Session,
    Path(id): Path<Uuid>,
) -> Result<Json<View>, Error> {
    let id = booking::Id::from(id);
    let booking = service
        .execute(query::booking::ById::by(id))
        .await
        .map_err(AsError::into_error)?
        .filter(|b| b.user_id == session.user_id)
        .ok_or(ApiError::BookingNotExists)?;
    let payment = service
        .execute(query::booking::PaymentOf::by(id))
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(View::new(booking, payment)))
}

/// Pays the pending [`Booking`] of the current [`Session`] user.
///
/// # Errors
///
/// If the [`Booking`] doesn't exist or is not pending.
#[tracing::instrument(skip_all, fields(
    user.id = %session.user_id,
    booking.id = %id,
))]
pub async fn pay(
    Extension(service): Extension<Service>,
    session: Session,
    Path(id): Path<Uuid>,
) -> Result<Json<Paid>, Error> {
    let out = service
        .execute(ProcessPayment {
            booking_id: id.into(),
            user_id: session.user_id,
        })
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(Paid {
        id: out.booking.id,
        status: out.booking.status,
        payment: out.payment,
    }))
}

/// Cancels the [`Booking`] of the current [`Session`] user under the
/// cancellation policy of its hotel.
///
/// # Errors
///
/// If the [`Booking`] doesn't exist or cannot be cancelled anymore.
#[tracing::instrument(skip_all, fields(
    user.id = %session.user_id,
    booking.id = %id,
))]
pub async fn cancel(
    Extension(service): Extension<Service>,
    session: Session,
    Path(id): Path<Uuid>,
    req: Option<Json<CancelRequest>>,
) -> Result<Json<Cancelled>, Error> {
    let CancelRequest { reason } =
        req.map(|Json(r)| r).unwrap_or_default();
    let reason = reason
        .map(|r| {
            CancellationReason::new(r)
                .ok_or(ApiError::InvalidCancellationReason)
        })
        .transpose()?;

    let out = service
        .execute(CancelBooking {
            booking_id: id.into(),
            user_id: session.user_id,
            reason,
            as_of: Date::today(),
        })
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(Cancelled {
        id: out.booking.id,
        status: out.booking.status,
        lead_time: out.refund.lead_time,
        penalty_percentage: out.refund.tier.penalty,
        refund_amount: out.refund.amount,
        retained_amount: out.refund.retained,
        payment_status: out.payment.status,
    }))
}

#[cfg(test)]
mod spec {
    use axum::{extract::Path, Extension, Json};
    use common::{Date, Handler as _};
    use service::{
        domain::{booking, payment, user, RoomType},
        infra::{Mailer, Memory},
        query,
    };
    use uuid::Uuid;

    use super::{CancelRequest, CreateRequest};
    use crate::{seed, Service, Session};

    async fn service() -> (Service, RoomType) {
        let (service, _) = Service::new(
            service::Config::default(),
            Memory::new(),
            Mailer::default(),
        );
        let hotels = seed::run(&service).await.unwrap();
        let room_type = service
            .execute(query::hotel::RoomTypes::by(hotels[2].id))
            .await
            .unwrap()
            .into_iter()
            .next()
            .unwrap();
        (service, room_type)
    }

    fn session() -> Session {
        Session {
            user_id: user::Id::new(),
        }
    }

    fn request(room_type: &RoomType, from: i64, to: i64) -> CreateRequest {
        let today = Date::today();
        serde_json::from_value(serde_json::json!({
            "room_type_id": Uuid::from(room_type.id),
            "check_in": today.checked_add_days(from).unwrap(),
            "check_out": today.checked_add_days(to).unwrap(),
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn books_pays_and_cancels() {
        let (service, room_type) = service().await;
        let session = session();

        let (status, Json(created)) = super::create(
            Extension(service.clone()),
            session,
            Json(request(&room_type, 40, 43)),
        )
        .await
        .unwrap();
        assert_eq!(status, http::StatusCode::CREATED);
        assert_eq!(created.status, booking::Status::Pending);
        assert_eq!(created.number_of_nights, 3);
        assert_eq!(created.rooms_left, 9);
        assert_eq!(created.total_price.to_string(), "240.00");
        assert_eq!(created.payment.status, payment::Status::Pending);

        let id = Uuid::from(created.id);
        let Json(paid) =
            super::pay(Extension(service.clone()), session, Path(id))
                .await
                .unwrap();
        assert_eq!(paid.status, booking::Status::Confirmed);
        assert_eq!(paid.payment.status, payment::Status::Completed);

        let Json(view) =
            super::get(Extension(service.clone()), session, Path(id))
                .await
                .unwrap();
        assert!(view.can_cancel);
        assert!(view.payment.is_some());
        assert_eq!(view.number_of_nights, created.number_of_nights);
        assert_eq!(
            serde_json::to_value(&view).unwrap()["number_of_nights"],
            serde_json::json!(3),
        );

        let Json(cancelled) = super::cancel(
            Extension(service.clone()),
            session,
            Path(id),
            Some(Json(CancelRequest {
                reason: Some("Change of plans".into()),
            })),
        )
        .await
        .unwrap();
        assert_eq!(cancelled.status, booking::Status::Cancelled);
        assert_eq!(cancelled.refund_amount.to_string(), "240.00");
        assert_eq!(cancelled.retained_amount.to_string(), "0.00");
        assert_eq!(cancelled.payment_status, payment::Status::Refunded);

        let Json(list) = super::list(Extension(service), session)
            .await
            .unwrap();
        assert_eq!(list.len(), 1);
        assert!(!list[0].can_cancel);
    }

    #[tokio::test]
    async fn hides_bookings_of_others() {
        let (service, room_type) = service().await;

        let (_, Json(created)) = super::create(
            Extension(service.clone()),
            session(),
            Json(request(&room_type, 10, 12)),
        )
        .await
        .unwrap();

        let err = super::get(
            Extension(service),
            session(),
            Path(Uuid::from(created.id)),
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, "BOOKING_NOT_EXISTS");
        assert_eq!(err.status_code, http::StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn rejects_overbooking() {
        let (service, room_type) = service().await;
        let mut req = request(&room_type, 5, 7);
        req.rooms = req.rooms.saturating_add(room_type.quantity);

        let err = super::create(Extension(service), session(), Json(req))
            .await
            .unwrap_err();

        assert_eq!(err.code, "UNAVAILABLE");
        assert_eq!(err.status_code, http::StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn refuses_late_cancellation() {
        let (service, room_type) = service().await;
        let session = session();

        let (_, Json(created)) = super::create(
            Extension(service.clone()),
            session,
            Json(request(&room_type, 1, 3)),
        )
        .await
        .unwrap();

        let err = super::cancel(
            Extension(service),
            session,
            Path(Uuid::from(created.id)),
            None,
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, "NOT_CANCELLABLE");
    }

    #[tokio::test]
    async fn rejects_blank_special_requests() {
        let (service, room_type) = service().await;
        let mut req = request(&room_type, 5, 7);
        req.special_requests = Some("   ".into());

        let err = super::create(Extension(service), session(), Json(req))
            .await
            .unwrap_err();

        assert_eq!(err.code, "INVALID_SPECIAL_REQUESTS");
    }

    #[tokio::test]
    async fn keeps_contact_email() {
        let (service, room_type) = service().await;
        let session = session();

        let mut req = request(&room_type, 5, 7);
        req.contact_email = Some("client1@test".into());
        let err = super::create(Extension(service.clone()), session, Json(req))
            .await
            .unwrap_err();
        assert_eq!(err.code, "INVALID_CONTACT_EMAIL");

        let mut req = request(&room_type, 5, 7);
        req.contact_email = Some(" client1@test.com ".into());
        let (_, Json(created)) =
            super::create(Extension(service.clone()), session, Json(req))
                .await
                .unwrap();
        let Json(view) = super::get(
            Extension(service),
            session,
            Path(Uuid::from(created.id)),
        )
        .await
        .unwrap();
        assert_eq!(
            serde_json::to_value(&view).unwrap()["contact_email"],
            serde_json::json!("client1@test.com"),
        );
    }
}
