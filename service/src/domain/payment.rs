//! [`Payment`] definitions.

use common::{define_kind, unit, DateTimeOf, Money};
use derive_more::{AsRef, Display, Error};
use serde::Serialize;

use crate::domain::{booking, Booking};

/// Simulated payment of a [`Booking`].
///
/// Every [`Booking`] has exactly one [`Payment`], identified by the
/// [`Booking`]'s ID.
#[derive(Clone, Debug, Serialize)]
pub struct Payment {
    /// ID of the paid [`Booking`].
    pub booking_id: booking::Id,

    /// Paid amount.
    pub amount: Money,

    /// [`Method`] of this [`Payment`].
    pub method: Method,

    /// [`Status`] of this [`Payment`].
    pub status: Status,

    /// [`TransactionId`] of this [`Payment`].
    pub transaction_id: TransactionId,

    /// [`DateTime`] when this [`Payment`] was settled, if it was.
    ///
    /// [`DateTime`]: common::DateTime
    pub paid_at: Option<SettlementDateTime>,

    /// [`DateTime`] when this [`Payment`] was created.
    ///
    /// [`DateTime`]: common::DateTime
    pub created_at: CreationDateTime,
}

impl Payment {
    /// Creates a new [`Status::Pending`] [`Payment`] of the whole price of the
    /// provided [`Booking`].
    #[must_use]
    pub fn pending(booking: &Booking, method: Method) -> Self {
        Self {
            booking_id: booking.id,
            amount: booking.total_price,
            method,
            status: Status::Pending,
            transaction_id: TransactionId::for_booking(booking.id),
            paid_at: None,
            created_at: CreationDateTime::now(),
        }
    }

    /// Settles this [`Payment`].
    ///
    /// # Errors
    ///
    /// If this [`Payment`] is not [`Status::Pending`].
    pub fn complete(&mut self) -> Result<(), TransitionError> {
        self.transition(Status::Completed)?;
        self.paid_at = Some(SettlementDateTime::now());
        Ok(())
    }

    /// Closes this [`Payment`] on its [`Booking`] cancellation.
    ///
    /// A settled [`Payment`] becomes [`Status::Refunded`], while a pending
    /// one becomes [`Status::Failed`].
    ///
    /// # Errors
    ///
    /// If this [`Payment`] is already closed.
    pub fn close(&mut self) -> Result<Status, TransitionError> {
        let to = if self.status == Status::Completed {
            Status::Refunded
        } else {
            Status::Failed
        };
        self.transition(to)?;
        Ok(to)
    }

    /// Moves this [`Payment`] into the provided [`Status`].
    fn transition(&mut self, to: Status) -> Result<(), TransitionError> {
        let allowed = matches!(
            (self.status, to),
            (Status::Pending, Status::Completed | Status::Failed)
                | (Status::Completed, Status::Refunded),
        );
        if !allowed {
            return Err(TransitionError {
                from: self.status,
                to,
            });
        }
        self.status = to;
        Ok(())
    }
}

/// Error of an illegal [`Payment`] [`Status`] transition.
#[derive(Clone, Copy, Debug, Display, Error)]
#[display("`Payment` cannot move from `{from}` to `{to}` status")]
pub struct TransitionError {
    /// [`Status`] the [`Payment`] is in.
    pub from: Status,

    /// Requested [`Status`].
    pub to: Status,
}

/// Identifier of a [`Payment`] transaction.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq, Serialize)]
#[as_ref(forward)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    /// Derives the [`TransactionId`] of the provided [`Booking`]'s
    /// [`Payment`].
    #[must_use]
    pub fn for_booking(id: booking::Id) -> Self {
        let hex = id.uuid().simple().to_string().to_uppercase();
        Self(format!("TXN{}", &hex[..12]))
    }
}

define_kind! {
    #[doc = "Method of a [`Payment`]."]
    enum Method {
        #[doc = "Credit card."]
        CreditCard = 1,

        #[doc = "PayPal account."]
        Paypal = 2,

        #[doc = "Bank transfer."]
        BankTransfer = 3,
    }
}

impl Default for Method {
    fn default() -> Self {
        Self::CreditCard
    }
}

define_kind! {
    #[doc = "Status of a [`Payment`]."]
    enum Status {
        #[doc = "Waiting to be settled."]
        Pending = 1,

        #[doc = "Settled."]
        Completed = 2,

        #[doc = "Abandoned before being settled."]
        Failed = 3,

        #[doc = "Settled and returned back."]
        Refunded = 4,
    }
}

/// [`DateTime`] when a [`Payment`] was created.
///
/// [`DateTime`]: common::DateTime
pub type CreationDateTime = DateTimeOf<(Payment, unit::Creation)>;

/// [`DateTime`] when a [`Payment`] was settled.
///
/// [`DateTime`]: common::DateTime
pub type SettlementDateTime = DateTimeOf<(Payment, unit::Settlement)>;

#[cfg(test)]
mod spec {
    use crate::domain::{
        booking::{self, spec::booking},
        room_type,
    };

    use super::{Method, Payment, Status, TransactionId};

    fn payment() -> Payment {
        let booking = booking(
            room_type::Id::new(),
            "2024-06-01",
            "2024-06-04",
            2,
            booking::Status::Pending,
        );
        Payment::pending(&booking, Method::Paypal)
    }

    #[test]
    fn starts_pending_with_full_price() {
        let p = payment();

        assert_eq!(p.status, Status::Pending);
        assert_eq!(p.amount.to_string(), "600.00");
        assert!(p.paid_at.is_none());
    }

    #[test]
    fn completes_once() {
        let mut p = payment();

        p.complete().unwrap();
        assert_eq!(p.status, Status::Completed);
        assert!(p.paid_at.is_some());

        assert!(p.complete().is_err());
    }

    #[test]
    fn closes_depending_on_settlement() {
        let mut pending = payment();
        assert_eq!(pending.close().unwrap(), Status::Failed);
        assert!(pending.close().is_err());

        let mut settled = payment();
        settled.complete().unwrap();
        assert_eq!(settled.close().unwrap(), Status::Refunded);
        assert!(settled.close().is_err());
    }

    #[test]
    fn derives_transaction_id_from_booking() {
        let id = booking::Id::new();
        let txn = TransactionId::for_booking(id).to_string();

        assert_eq!(txn.len(), 15);
        assert!(txn.starts_with("TXN"));
        assert_eq!(txn, TransactionId::for_booking(id).to_string());
    }
}
