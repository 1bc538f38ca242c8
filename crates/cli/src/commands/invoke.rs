use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};
use concierge_actions::{default_registry, ActionCall};
use concierge_core::config::{AppConfig, LoadOptions};
use concierge_core::ApplicationError;
use serde_json::Value;

use crate::commands::{
    CommandResult, EXIT_CONFIG_FAILURE, EXIT_INVALID_REQUEST, EXIT_UNKNOWN_ACTION,
};

const COMMAND: &str = "invoke";

/// Runs one recorded webhook request through the same executor the server uses.
///
/// `-` reads the request from stdin.
pub fn run(source: &Path) -> CommandResult {
    if let Err(error) = AppConfig::load(LoadOptions::default()) {
        return CommandResult::failure(
            COMMAND,
            "config_validation",
            error.to_string(),
            EXIT_CONFIG_FAILURE,
        );
    }

    let call = match read_request(source).and_then(parse_request) {
        Ok(call) => call,
        Err(error) => {
            return CommandResult::failure(
                COMMAND,
                "invalid_request",
                format!("{error:#}"),
                EXIT_INVALID_REQUEST,
            );
        }
    };

    execute(&call)
}

fn read_request(source: &Path) -> Result<String> {
    if source.as_os_str() == "-" {
        let mut raw = String::new();
        io::stdin().read_to_string(&mut raw).context("failed to read request from stdin")?;
        return Ok(raw);
    }

    fs::read_to_string(source)
        .with_context(|| format!("failed to read request file `{}`", source.display()))
}

fn parse_request(raw: String) -> Result<ActionCall> {
    let value = serde_json::from_str::<Value>(&raw).context("request is not valid JSON")?;
    Ok(ActionCall::from_json(value)?)
}

fn execute(call: &ActionCall) -> CommandResult {
    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => {
            return CommandResult::failure(
                COMMAND,
                "runtime",
                format!("failed to initialize async runtime: {error}"),
                1,
            );
        }
    };

    let registry = default_registry();
    match runtime.block_on(registry.execute(call)) {
        Ok(response) => CommandResult::document(COMMAND, &response),
        Err(error @ ApplicationError::ActionNotFound { .. }) => {
            CommandResult::failure(COMMAND, "unknown_action", error.to_string(), EXIT_UNKNOWN_ACTION)
        }
        Err(error @ ApplicationError::InvalidRequest(_)) => {
            CommandResult::failure(COMMAND, "invalid_request", error.to_string(), EXIT_INVALID_REQUEST)
        }
        Err(error @ ApplicationError::Configuration(_)) => CommandResult::failure(
            COMMAND,
            "config_validation",
            error.to_string(),
            EXIT_CONFIG_FAILURE,
        ),
    }
}
