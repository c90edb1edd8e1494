//! Room search REST API handler.

use axum::{Extension, Json};
use common::{Date, Handler as _, Money};
use serde::Deserialize;
use service::{
    domain::{
        booking::{Guests, Rooms, Stay},
        hotel,
    },
    query::SearchRooms,
    read::search::{Filter, Match},
};

use crate::{api, AsError, Error, Service};

/// Body of a room search request.
#[derive(Clone, Debug, Deserialize)]
pub struct SearchRequest {
    /// Arrival date.
    pub check_in: Date,

    /// Departure date.
    pub check_out: Date,

    /// Number of rooms to book.
    #[serde(default = "api::one")]
    pub rooms: Rooms,

    /// Number of guests to host.
    #[serde(default = "api::one")]
    pub guests: Guests,

    /// Part of the city name to look in.
    #[serde(default)]
    pub city: Option<String>,

    /// Minimal nightly price.
    #[serde(default)]
    pub min_price: Option<Money>,

    /// Maximal nightly price.
    #[serde(default)]
    pub max_price: Option<Money>,

    /// Exact star rating of the hotel.
    #[serde(default)]
    pub stars: Option<hotel::Stars>,
}

impl From<SearchRequest> for Filter {
    fn from(req: SearchRequest) -> Self {
        let SearchRequest {
            check_in,
            check_out,
            rooms,
            guests,
            city,
            min_price,
            max_price,
            stars,
        } = req;
        Self {
            stay: Stay::new(check_in, check_out),
            rooms,
            guests,
            city: city.filter(|c| !c.trim().is_empty()),
            min_price,
            max_price,
            stars,
        }
    }
}

/// Searches room types available for the requested stay, the cheapest
/// first.
///
/// # Errors
///
/// If the requested stay is empty or reversed.
#[tracing::instrument(skip_all, fields(
    search.check_in = %req.check_in,
    search.check_out = %req.check_out,
))]
pub async fn search(
    Extension(service): Extension<Service>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<Vec<Match>>, Error> {
    service
        .execute(SearchRooms(req.into()))
        .await
        .map(Json)
        .map_err(AsError::into_error)
}
