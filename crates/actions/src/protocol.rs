use concierge_core::{ApplicationError, Event, MessageDirective, Tracker};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body of a `POST /webhook` call from the dialogue host.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActionCall {
    pub next_action: String,
    #[serde(default)]
    pub sender_id: Option<String>,
    #[serde(default)]
    pub tracker: Tracker,
    #[serde(default)]
    pub domain: Value,
    #[serde(default)]
    pub version: Option<String>,
}

impl ActionCall {
    pub fn new(next_action: impl Into<String>, tracker: Tracker) -> Self {
        Self {
            next_action: next_action.into(),
            sender_id: None,
            tracker,
            domain: Value::Null,
            version: None,
        }
    }

    pub fn from_json(raw: Value) -> Result<Self, ApplicationError> {
        serde_json::from_value(raw).map_err(|error| ApplicationError::InvalidRequest(error.to_string()))
    }

    /// Conversation id, preferring the top-level field over the tracker's copy.
    pub fn conversation_id(&self) -> &str {
        self.sender_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .unwrap_or(self.tracker.sender_id.as_str())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionResponse {
    pub events: Vec<Event>,
    pub responses: Vec<BotMessage>,
}

/// One message for the host to send, in the host's response shape.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BotMessage {
    pub text: Option<String>,
    pub template: Option<String>,
    pub response: Option<String>,
    pub buttons: Vec<Value>,
    pub elements: Vec<Value>,
    pub custom: Map<String, Value>,
    pub image: Option<String>,
    pub attachment: Option<String>,
}

impl From<MessageDirective> for BotMessage {
    fn from(directive: MessageDirective) -> Self {
        match directive {
            // Older hosts read `template`, newer ones `response`.
            MessageDirective::Response(key) => Self {
                template: Some(key.as_str().to_string()),
                response: Some(key.as_str().to_string()),
                ..Self::default()
            },
            MessageDirective::Text(text) => Self { text: Some(text), ..Self::default() },
        }
    }
}

/// Entry of the `GET /actions` listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionInfo {
    pub name: String,
}

#[cfg(test)]
mod tests {
    use concierge_core::{ApplicationError, MessageDirective, ResponseKey};
    use serde_json::json;

    use super::{ActionCall, BotMessage};

    #[test]
    fn host_payload_deserializes_with_unknown_fields_ignored() {
        let call = ActionCall::from_json(json!({
            "next_action": "direct_time_query",
            "sender_id": "student-7",
            "version": "3.6.0",
            "domain": {"responses": {}},
            "tracker": {
                "sender_id": "student-7",
                "slots": {"cuisine": null},
                "latest_message": {
                    "text": "when does amul open",
                    "intent": {"name": "ask_time", "confidence": 0.91},
                    "entities": [{"entity": "Location", "value": "amul"}]
                },
                "events": [],
                "paused": false,
                "followup_action": null,
                "active_loop": {},
                "latest_action_name": "action_listen"
            }
        }))
        .expect("payload should parse");

        assert_eq!(call.next_action, "direct_time_query");
        assert_eq!(call.conversation_id(), "student-7");
        assert_eq!(call.tracker.latest_entity_values("Location").count(), 1);
    }

    #[test]
    fn missing_next_action_is_an_invalid_request() {
        let error = ActionCall::from_json(json!({"tracker": {}})).expect_err("should fail");
        assert!(matches!(error, ApplicationError::InvalidRequest(ref message) if message.contains("next_action")));
    }

    #[test]
    fn conversation_id_falls_back_to_tracker() {
        let call = ActionCall::from_json(json!({
            "next_action": "find_restaurant",
            "tracker": {"sender_id": "from-tracker"}
        }))
        .expect("payload should parse");

        assert_eq!(call.conversation_id(), "from-tracker");
    }

    #[test]
    fn response_directive_fills_both_template_fields() {
        let message = BotMessage::from(MessageDirective::Response(ResponseKey("utter_default")));
        let encoded = serde_json::to_value(&message).expect("serialize");

        assert_eq!(
            encoded,
            json!({
                "text": null,
                "template": "utter_default",
                "response": "utter_default",
                "buttons": [],
                "elements": [],
                "custom": {},
                "image": null,
                "attachment": null
            })
        );
    }

    #[test]
    fn text_directive_only_sets_text() {
        let message = BotMessage::from(MessageDirective::Text("Red Rock Residency".to_string()));
        assert_eq!(message.text.as_deref(), Some("Red Rock Residency"));
        assert_eq!(message.template, None);
        assert_eq!(message.response, None);
    }
}
