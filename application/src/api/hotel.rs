//! [`Hotel`]-related REST API handlers.

use axum::{
    extract::{Path, Query},
    Extension, Json,
};
use common::Handler as _;
use serde::Deserialize;
use service::{
    domain::{hotel, Hotel, Policy, RoomType},
    query,
    read::hotel::{Filter, Ordering},
};
use uuid::Uuid;

use crate::{api::ApiError, AsError, Error, Service};

/// Query parameters of a [`Hotel`]s listing.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ListRequest {
    /// Exact city of the hotel.
    #[serde(default)]
    pub city: Option<String>,

    /// Exact country of the hotel.
    #[serde(default)]
    pub country: Option<String>,

    /// Exact star rating of the hotel.
    #[serde(default)]
    pub stars: Option<hotel::Stars>,

    /// Required Wi-Fi availability.
    #[serde(default)]
    pub has_wifi: Option<bool>,

    /// Required parking availability.
    #[serde(default)]
    pub has_parking: Option<bool>,

    /// Text to find in the name, city, country or description.
    #[serde(default)]
    pub search: Option<String>,

    /// `stars`, `name`, or either prefixed with `-` for the descending
    /// direction.
    #[serde(default)]
    pub ordering: Ordering,
}

impl TryFrom<ListRequest> for Filter {
    type Error = ApiError;

    fn try_from(req: ListRequest) -> Result<Self, Self::Error> {
        let ListRequest {
            city,
            country,
            stars,
            has_wifi,
            has_parking,
            search,
            ordering,
        } = req;
        Ok(Self {
            city: non_blank(city)
                .map(|c| hotel::City::new(c.trim()))
                .map(|c| c.ok_or(ApiError::InvalidHotelFilter))
                .transpose()?,
            country: non_blank(country)
                .map(|c| hotel::Country::new(c.trim()))
                .map(|c| c.ok_or(ApiError::InvalidHotelFilter))
                .transpose()?,
            stars,
            has_wifi,
            has_parking,
            search: non_blank(search),
            ordering,
        })
    }
}

/// Drops the provided `text` if it's blank.
fn non_blank(text: Option<String>) -> Option<String> {
    text.filter(|t| !t.trim().is_empty())
}

/// Lists [`Hotel`]s matching the requested criteria.
///
/// # Errors
///
/// If the requested city or country is malformed.
#[tracing::instrument(skip_all, fields(hotels.ordering = ?req.ordering))]
pub async fn list(
    Extension(service): Extension<Service>,
    Query(req): Query<ListRequest>,
) -> Result<Json<Vec<Hotel>>, Error> {
    let filter = Filter::try_from(req)?;
    service
        .execute(query::hotel::List::by(filter))
        .await
        .map(Json)
        .map_err(AsError::into_error)
}

/// Returns the [`Hotel`] with the provided ID.
///
/// # Errors
///
/// If the [`Hotel`] doesn't exist.
#[tracing::instrument(skip_all, fields(hotel.id = %id))]
pub async fn get(
    Extension(service): Extension<Service>,
    Path(id): Path<Uuid>,
) -> Result<Json<Hotel>, Error> {
    find(&service, id).await.map(Json)
}

/// Returns [`RoomType`]s of the [`Hotel`] with the provided ID, the cheapest
/// first.
///
/// # Errors
///
/// If the [`Hotel`] doesn't exist.
#[tracing::instrument(skip_all, fields(hotel.id = %id))]
pub async fn room_types(
    Extension(service): Extension<Service>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<RoomType>>, Error> {
    let hotel = find(&service, id).await?;
    service
        .execute(query::hotel::RoomTypes::by(hotel.id))
        .await
        .map(Json)
        .map_err(AsError::into_error)
}

/// Returns the cancellation [`Policy`] of the [`Hotel`] with the provided ID.
///
/// # Errors
///
/// If the [`Hotel`] or its [`Policy`] doesn't exist.
#[tracing::instrument(skip_all, fields(hotel.id = %id))]
pub async fn cancellation_policy(
    Extension(service): Extension<Service>,
    Path(id): Path<Uuid>,
) -> Result<Json<Policy>, Error> {
    let hotel = find(&service, id).await?;
    service
        .execute(query::hotel::CancellationPolicy::by(hotel.id))
        .await
        .map_err(AsError::into_error)?
        .map(Json)
        .ok_or_else(|| ApiError::PolicyNotExists.into())
}

/// Looks up the [`Hotel`] with the provided ID.
async fn find(service: &Service, id: Uuid) -> Result<Hotel, Error> {
    service
        .execute(query::hotel::ById::by(id.into()))
        .await
        .map_err(AsError::into_error)?
        .ok_or_else(|| ApiError::HotelNotExists.into())
}
