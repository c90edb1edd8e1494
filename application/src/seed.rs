//! Demo data of the hotel booking system.

use common::{operations::Insert, DateTime, Handler as _, Money, Percent};
use derive_more::{Display, Error as StdError, From};
use rust_decimal::Decimal;
use service::{
    domain::{hotel, policy, room_type, Hotel, Policy, RoomType},
    infra::database,
};
use tracerr::Traced;
use tracing as log;

use crate::Service;

/// Demo [`Hotel`] attributes.
struct DemoHotel {
    name: &'static str,
    city: &'static str,
    address: &'static str,
    stars: u8,
    description: &'static str,
    email: &'static str,
    phone: &'static str,
    amenities: hotel::Amenities,
}

/// Demo [`RoomType`] attributes, priced as for a three-star [`Hotel`].
struct DemoRoomType {
    name: &'static str,
    kind: room_type::Kind,
    description: &'static str,
    capacity: u16,
    price: u32,
    size: u16,
    quantity: u16,
    amenities: room_type::Amenities,
}

/// [`hotel::Amenities`] of the full-service demo [`Hotel`]s.
const ALL_AMENITIES: hotel::Amenities = hotel::Amenities {
    has_wifi: true,
    has_parking: true,
    has_pool: true,
    has_spa: true,
    has_restaurant: true,
    has_gym: true,
};

const HOTELS: &[DemoHotel] = &[
    DemoHotel {
        name: "Hôtel Plaza Paris",
        city: "Paris",
        address: "25 Avenue Montaigne, 75008 Paris",
        stars: 5,
        description: "Un hôtel de luxe au cœur de Paris avec vue sur la \
                      Tour Eiffel.",
        email: "contact@plaza-paris.fr",
        phone: "+33 1 53 67 66 65",
        amenities: ALL_AMENITIES,
    },
    DemoHotel {
        name: "Hôtel Central Lyon",
        city: "Lyon",
        address: "12 Rue de la République, 69002 Lyon",
        stars: 4,
        description: "Hôtel moderne au centre-ville de Lyon, proche du \
                      Vieux Lyon.",
        email: "contact@central-lyon.fr",
        phone: "+33 4 72 00 00 12",
        amenities: hotel::Amenities {
            has_wifi: true,
            has_parking: false,
            has_pool: true,
            has_spa: false,
            has_restaurant: true,
            has_gym: true,
        },
    },
    DemoHotel {
        name: "Hôtel Méditerranée Marseille",
        city: "Marseille",
        address: "45 Corniche Kennedy, 13007 Marseille",
        stars: 3,
        description: "Hôtel avec vue sur la mer Méditerranée, proche du \
                      Vieux-Port.",
        email: "contact@mediterranee-marseille.fr",
        phone: "+33 4 91 00 00 45",
        amenities: hotel::Amenities {
            has_wifi: true,
            has_parking: true,
            has_pool: false,
            has_spa: false,
            has_restaurant: true,
            has_gym: false,
        },
    },
    DemoHotel {
        name: "Hôtel Montagne Chamonix",
        city: "Chamonix",
        address: "Route des Aiguilles du Midi, 74400 Chamonix",
        stars: 4,
        description: "Hôtel de montagne avec accès direct aux pistes de ski.",
        email: "contact@montagne-chamonix.fr",
        phone: "+33 4 50 00 00 74",
        amenities: ALL_AMENITIES,
    },
    DemoHotel {
        name: "Hôtel Plage Nice",
        city: "Nice",
        address: "Promenade des Anglais, 06000 Nice",
        stars: 3,
        description: "Hôtel face à la mer sur la célèbre Promenade des \
                      Anglais.",
        email: "contact@plage-nice.fr",
        phone: "+33 4 93 00 00 06",
        amenities: hotel::Amenities {
            has_wifi: true,
            has_parking: false,
            has_pool: false,
            has_spa: false,
            has_restaurant: true,
            has_gym: false,
        },
    },
];

/// [`room_type::Amenities`] of the upper demo [`RoomType`]s.
const EQUIPPED: room_type::Amenities = room_type::Amenities {
    has_tv: true,
    has_ac: true,
    has_minibar: true,
    has_safe: true,
    has_balcony: true,
    is_smoking: false,
};

const ROOM_TYPES: &[DemoRoomType] = &[
    DemoRoomType {
        name: "Chambre Simple Standard",
        kind: room_type::Kind::Single,
        description: "Chambre simple avec lit simple, salle de bain privée.",
        capacity: 1,
        price: 80,
        size: 18,
        quantity: 10,
        amenities: room_type::Amenities {
            has_tv: true,
            has_ac: true,
            has_minibar: false,
            has_safe: true,
            has_balcony: false,
            is_smoking: false,
        },
    },
    DemoRoomType {
        name: "Chambre Double Supérieure",
        kind: room_type::Kind::Double,
        description: "Chambre double spacieuse avec lit queen size.",
        capacity: 2,
        price: 120,
        size: 25,
        quantity: 15,
        amenities: EQUIPPED,
    },
    DemoRoomType {
        name: "Suite Familiale",
        kind: room_type::Kind::Family,
        description: "Suite avec chambre séparée et salon, idéale pour \
                      familles.",
        capacity: 4,
        price: 200,
        size: 45,
        quantity: 5,
        amenities: EQUIPPED,
    },
    DemoRoomType {
        name: "Suite Présidentielle",
        kind: room_type::Kind::Presidential,
        description: "Suite de luxe avec vue panoramique et tous les \
                      services.",
        capacity: 2,
        price: 500,
        size: 80,
        quantity: 2,
        amenities: EQUIPPED,
    },
];

/// Standard cancellation tiers: threshold, penalty and description.
const TIERS: &[(u32, u8, &str)] = &[
    (30, 0, "Annulation gratuite jusqu'à 30 jours avant"),
    (14, 20, "20% de pénalité entre 14 et 30 jours"),
    (7, 50, "50% de pénalité entre 7 et 14 jours"),
    (0, 100, "100% de pénalité moins de 7 jours avant"),
];

/// Stores the demo [`Hotel`]s along with their [`RoomType`]s and the
/// standard cancellation [`Policy`].
///
/// Nightly prices grow by 20% per star above three.
///
/// # Errors
///
/// Errors if the [`Service`] fails to store the data.
pub async fn run(service: &Service) -> Result<Vec<Hotel>, Traced<Error>> {
    let db = service.database();
    let mut hotels = Vec::with_capacity(HOTELS.len());

    for demo in HOTELS {
        let hotel = Hotel {
            id: hotel::Id::new(),
            name: valid(hotel::Name::new(demo.name), demo.name)
                .map_err(tracerr::wrap!())?,
            city: valid(hotel::City::new(demo.city), demo.city)
                .map_err(tracerr::wrap!())?,
            country: valid(hotel::Country::new("France"), "France")
                .map_err(tracerr::wrap!())?,
            address: valid(hotel::Address::new(demo.address), demo.address)
                .map_err(tracerr::wrap!())?,
            stars: valid(hotel::Stars::new(demo.stars), "stars")
                .map_err(tracerr::wrap!())?,
            description: valid(
                hotel::Description::new(demo.description),
                demo.description,
            )
            .map_err(tracerr::wrap!())?,
            email: valid(hotel::Email::new(demo.email), demo.email)
                .map_err(tracerr::wrap!())?,
            phone: valid(hotel::Phone::new(demo.phone), demo.phone)
                .map_err(tracerr::wrap!())?,
            amenities: demo.amenities,
            created_at: DateTime::now().coerce(),
        };
        db.execute(Insert(hotel.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> Error))?;

        for room_type in room_types(&hotel)? {
            log::debug!(
                "seeding `{}` of `{}` at {} per night",
                room_type.name,
                hotel.name,
                room_type.price_per_night,
            );
            db.execute(Insert(room_type))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> Error))?;
        }

        db.execute(Insert(Policy::new(hotel.id, tiers()?)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> Error))?;

        hotels.push(hotel);
    }

    log::info!("seeded {} demo hotels", hotels.len());
    Ok(hotels)
}

/// Builds the demo [`RoomType`]s of the provided [`Hotel`].
fn room_types(hotel: &Hotel) -> Result<Vec<RoomType>, Traced<Error>> {
    let stars = i64::from(u8::from(hotel.stars));
    let multiplier =
        Decimal::ONE + Decimal::new(2, 1) * Decimal::from(stars - 3);

    ROOM_TYPES
        .iter()
        .map(|demo| {
            let price_per_night =
                Money::new(Decimal::from(demo.price) * multiplier)
                    .ok_or(Error::Invalid(demo.name))?
                    .round();
            Ok(RoomType {
                id: room_type::Id::new(),
                hotel_id: hotel.id,
                name: valid(room_type::Name::new(demo.name), demo.name)?,
                kind: demo.kind,
                capacity: demo.capacity,
                price_per_night,
                quantity: demo.quantity,
                description: valid(
                    room_type::Description::new(demo.description),
                    demo.description,
                )?,
                size: demo.size,
                amenities: demo.amenities,
            })
        })
        .collect::<Result<_, Error>>()
        .map_err(tracerr::wrap!())
}

/// Builds the standard cancellation [`policy::Tier`]s.
fn tiers() -> Result<Vec<policy::Tier>, Traced<Error>> {
    TIERS
        .iter()
        .map(|&(threshold, penalty, description)| {
            Ok(policy::Tier {
                threshold,
                penalty: Percent::from(penalty),
                description: policy::Description::new(description)
                    .ok_or(Error::Invalid(description))?,
            })
        })
        .collect::<Result<_, Error>>()
        .map_err(tracerr::wrap!())
}

/// Unwraps the domain value built from the `demo` one.
fn valid<T>(value: Option<T>, demo: &'static str) -> Result<T, Error> {
    value.ok_or(Error::Invalid(demo))
}

/// Error of seeding the demo data.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// [`Database`] error.
    ///
    /// [`Database`]: service::infra::Database
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// Demo value is rejected by the domain.
    #[display("Invalid demo value: `{_0}`")]
    #[from(ignore)]
    Invalid(#[error(not(source))] &'static str),
}
