//! Car domain entities.

pub mod model;

pub use model::{Car, CarDetails, NewCar};
