use concierge_actions::default_registry;

use crate::commands::CommandResult;

pub fn run() -> CommandResult {
    CommandResult::document("actions", &default_registry().names())
}
