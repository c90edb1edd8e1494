//! [`Query`] searching available rooms.

use common::operations::{By, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{engine, Booking},
    infra::{database, Database},
    read::{
        booking::Overlapping,
        search::{Candidates, Filter, Match},
    },
    Service,
};

use super::Query;

/// [`Query`] searching [`RoomType`]s able to host a [`Filter`]ed stay.
///
/// Results are sorted by their total price, cheapest first.
///
/// [`RoomType`]: crate::domain::RoomType
#[derive(Clone, Debug)]
pub struct SearchRooms(pub Filter);

impl<Db> Query<SearchRooms> for Service<Db>
where
    Db: Database<
            Select<By<Candidates, Filter>>,
            Ok = Candidates,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<Booking>, Overlapping>>,
            Ok = Vec<Booking>,
            Err = Traced<database::Error>,
        >,
{
    type Ok = Vec<Match>;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        SearchRooms(filter): SearchRooms,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let Filter {
            stay,
            rooms,
            guests,
            ..
        } = filter;
        let nights = u32::try_from(stay.nights())
            .ok()
            .filter(|n| *n > 0)
            .ok_or(E::Engine(engine::Error::InvalidRange(stay)))
            .map_err(tracerr::wrap!())?;

        let Candidates(candidates) = self
            .database()
            .execute(Select(By::new(filter)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let mut matches = Vec::with_capacity(candidates.len());
        for (hotel, room_type) in candidates {
            let existing = self
                .database()
                .execute(Select(By::new(Overlapping {
                    room_type_id: room_type.id,
                    stay,
                })))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?;

            let availability = match engine::check_availability(
                &room_type, stay, rooms, guests, &existing,
            ) {
                Ok(a) => a,
                Err(engine::Error::Unavailable(_)) => continue,
                Err(e) => return Err(tracerr::new!(E::Engine(e))),
            };
            let total_price = engine::compute_price(&room_type, stay, rooms)
                .map_err(tracerr::from_and_wrap!(=> E))?;

            matches.push(Match {
                hotel,
                room_type,
                nights,
                total_price,
                rooms_left: availability.remaining,
            });
        }
        matches.sort_by(|a, b| {
            a.total_price
                .cmp(&b.total_price)
                .then_with(|| {
                    AsRef::<str>::as_ref(&a.hotel.name)
                        .cmp(AsRef::<str>::as_ref(&b.hotel.name))
                })
        });

        Ok(matches)
    }
}

/// Error of [`SearchRooms`] [`Query`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// Search [`Filter`] is invalid.
    #[display("{_0}")]
    Engine(engine::Error),
}
