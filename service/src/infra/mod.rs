//! Infrastructure layer.

pub mod database;
pub mod mailer;

pub use self::{
    database::{memory, Database, Memory},
    mailer::{Mailer, Notifier},
};
