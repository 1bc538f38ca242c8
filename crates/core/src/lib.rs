//! Campus Concierge core - slot validation, lookup tables and the restaurant catalog
//!
//! Everything in this crate is a pure, stateless transform over data handed in by
//! the dialogue host. The host owns natural-language understanding, dialogue policy
//! and tracker persistence; this crate only decides which slot values to keep and
//! which response key the host should render.
//!
//! # Modules
//!
//! - `domain` - tracker snapshot, slot events, response directives
//! - `validation` - restaurant form validators (cuisine, party size, seating)
//! - `lookup` - static location and department response tables
//! - `restaurants` - the static restaurant catalog and its filter
//! - `config` / `errors` - ambient configuration and error taxonomy

pub mod config;
pub mod domain;
pub mod errors;
pub mod lookup;
pub mod restaurants;
pub mod validation;

pub use domain::cuisine::Cuisine;
pub use domain::event::Event;
pub use domain::response::{Dispatcher, MessageDirective, ResponseKey};
pub use domain::slot::Slot;
pub use domain::tracker::{Entity, LatestMessage, Tracker};
pub use errors::{ApplicationError, InterfaceError};
pub use lookup::{LookupMiss, LookupTable, Resolution};
pub use restaurants::{RestaurantQuery, RestaurantRecord};
pub use validation::{Rejection, SlotValidation, ValidatedSlot};
