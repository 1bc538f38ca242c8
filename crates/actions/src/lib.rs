//! Concierge actions - the handlers the dialogue host calls by name
//!
//! Each action reads a [`Tracker`](concierge_core::Tracker) snapshot, queues
//! messages on a [`Dispatcher`](concierge_core::Dispatcher) and returns the
//! slot events the host should apply. Actions hold no state between calls.
//!
//! # Registered actions
//!
//! | name                      | module          |
//! |---------------------------|-----------------|
//! | `validate_restaurant_form`| `form`          |
//! | `return_form_details`     | `form_details`  |
//! | `find_restaurant`         | `restaurant`    |
//! | `set_context_location`    | `context`       |
//! | `direct_time_query`       | `location`      |
//! | `indirect_time_query`     | `location`      |
//! | `direct_location_query`   | `location`      |
//! | `indirect_location_query` | `location`      |
//! | `department_query`        | `location`      |
//!
//! `protocol` holds the webhook request/response shapes and `registry` the
//! name-to-action table that executes a call end to end.

pub mod context;
pub mod form;
pub mod form_details;
pub mod location;
pub mod protocol;
pub mod registry;
pub mod restaurant;

pub use protocol::{ActionCall, ActionInfo, ActionResponse, BotMessage};
pub use registry::{default_registry, Action, ActionRegistry};
