//! [`Notification`] definitions.

use common::{Money, Percent};

use crate::domain::{hotel, room_type, Booking, Email};

/// Message informing the guest about a change of their [`Booking`].
#[derive(Clone, Debug)]
pub struct Notification {
    /// [`Booking`] the [`Notification`] is about.
    pub booking: Booking,

    /// [`hotel::Name`] of the booked [`Hotel`].
    ///
    /// [`Hotel`]: crate::domain::Hotel
    pub hotel: hotel::Name,

    /// [`room_type::Name`] of the booked [`RoomType`].
    ///
    /// [`RoomType`]: crate::domain::RoomType
    pub room_type: room_type::Name,

    /// [`Event`] that happened to the [`Booking`].
    pub event: Event,
}

/// Change of a [`Booking`] its guest is notified about.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Event {
    /// [`Booking`] has been created.
    Created,

    /// [`Booking`] has been cancelled.
    Cancelled {
        /// Part of the price retained as the penalty.
        penalty: Percent,

        /// Amount returned to the guest.
        refund: Money,
    },
}

impl Notification {
    /// Returns the [`Email`] this [`Notification`] should be sent to, if the
    /// guest left one.
    #[must_use]
    pub fn recipient(&self) -> Option<&Email> {
        self.booking.contact_email.as_ref()
    }

    /// Returns the subject line of this [`Notification`].
    #[must_use]
    pub fn subject(&self) -> String {
        let id = self.booking.id;
        match self.event {
            Event::Created => format!("Confirmation de réservation #{id}"),
            Event::Cancelled { .. } => {
                format!("Annulation de réservation #{id}")
            }
        }
    }

    /// Renders the plain text body of this [`Notification`].
    #[must_use]
    pub fn body(&self) -> String {
        let Self {
            booking,
            hotel,
            room_type,
            event,
        } = self;
        let stay = booking.stay;
        match event {
            Event::Created => format!(
                "Bonjour,\n\
                 \n\
                 Votre réservation a été enregistrée avec succès.\n\
                 \n\
                 Détails de la réservation:\n\
                 - Hôtel: {hotel}\n\
                 - Type de chambre: {room_type}\n\
                 - Date d'arrivée: {}\n\
                 - Date de départ: {}\n\
                 - Nombre de nuits: {}\n\
                 - Nombre de chambres: {}\n\
                 - Prix total: {}€\n\
                 \n\
                 Votre numéro de réservation: {}\n\
                 \n\
                 Cordialement,\n\
                 L'équipe de réservation\n",
                stay.check_in,
                stay.check_out,
                booking.nights(),
                booking.rooms,
                booking.total_price,
                booking.id,
            ),
            Event::Cancelled { penalty, refund } => format!(
                "Bonjour,\n\
                 \n\
                 Votre réservation #{} a été annulée.\n\
                 \n\
                 Détails de l'annulation:\n\
                 - Hôtel: {hotel}\n\
                 - Type de chambre: {room_type}\n\
                 - Date d'arrivée: {}\n\
                 - Pénalité appliquée: {penalty}%\n\
                 - Montant remboursé: {refund}€\n\
                 \n\
                 Cordialement,\n\
                 L'équipe de réservation\n",
                booking.id, stay.check_in,
            ),
        }
    }
}
