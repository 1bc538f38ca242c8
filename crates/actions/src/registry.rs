use std::collections::HashMap;

use async_trait::async_trait;
use concierge_core::{ApplicationError, Dispatcher, Event, Tracker};
use tracing::{debug, warn};

use crate::context::SetContextLocation;
use crate::form::ValidateRestaurantForm;
use crate::form_details::ReturnFormDetails;
use crate::location::{ContextLookup, EntityLookup};
use crate::protocol::{ActionCall, ActionInfo, ActionResponse, BotMessage};
use crate::restaurant::FindRestaurant;

/// A handler the dialogue host can invoke by name.
///
/// Implementations queue messages on `dispatcher` and return the slot events
/// to apply. They never fail: bad input is answered with a response key.
#[async_trait]
pub trait Action: Send + Sync {
    fn name(&self) -> &'static str;
    async fn run(&self, tracker: &Tracker, dispatcher: &mut Dispatcher) -> Vec<Event>;
}

#[derive(Default)]
pub struct ActionRegistry {
    actions: HashMap<String, Box<dyn Action>>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<A>(&mut self, action: A)
    where
        A: Action + 'static,
    {
        self.actions.insert(action.name().to_string(), Box::new(action));
    }

    pub fn get(&self, name: &str) -> Option<&dyn Action> {
        self.actions.get(name).map(|action| action.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.actions.contains_key(name)
    }

    /// Registered names in lexical order.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names = self.actions.values().map(|action| action.name()).collect::<Vec<_>>();
        names.sort_unstable();
        names
    }

    pub fn describe(&self) -> Vec<ActionInfo> {
        self.names().into_iter().map(|name| ActionInfo { name: name.to_string() }).collect()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn ensure_ready(&self) -> Result<(), ApplicationError> {
        if self.is_empty() {
            return Err(ApplicationError::Configuration("no actions are registered".to_string()));
        }
        Ok(())
    }

    /// Runs the action named by `call.next_action` and packages its output.
    pub async fn execute(&self, call: &ActionCall) -> Result<ActionResponse, ApplicationError> {
        let Some(action) = self.get(&call.next_action) else {
            warn!(
                event_name = "actions.execute.unknown",
                action_name = %call.next_action,
                sender_id = %call.conversation_id(),
                "no action registered under requested name"
            );
            return Err(ApplicationError::ActionNotFound { action_name: call.next_action.clone() });
        };

        let mut dispatcher = Dispatcher::new();
        let events = action.run(&call.tracker, &mut dispatcher).await;
        let responses =
            dispatcher.into_messages().into_iter().map(BotMessage::from).collect::<Vec<_>>();

        debug!(
            event_name = "actions.execute.completed",
            action_name = action.name(),
            sender_id = %call.conversation_id(),
            event_count = events.len(),
            response_count = responses.len(),
            "action completed"
        );

        Ok(ActionResponse { events, responses })
    }
}

pub fn default_registry() -> ActionRegistry {
    let mut registry = ActionRegistry::new();
    registry.register(ValidateRestaurantForm);
    registry.register(ReturnFormDetails);
    registry.register(FindRestaurant::default());
    registry.register(SetContextLocation);
    registry.register(EntityLookup::direct_time_query());
    registry.register(EntityLookup::direct_location_query());
    registry.register(EntityLookup::department_query());
    registry.register(ContextLookup::indirect_time_query());
    registry.register(ContextLookup::indirect_location_query());
    registry
}
