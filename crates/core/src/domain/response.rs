use serde::Serialize;

/// Identifier of a response template the host knows how to render.
///
/// Keys are always drawn from static tables, so a `ResponseKey` is never empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct ResponseKey(pub &'static str);

impl ResponseKey {
    pub const DEFAULT: ResponseKey = ResponseKey("utter_default");

    pub const fn as_str(self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for ResponseKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MessageDirective {
    /// Render the named response template.
    Response(ResponseKey),
    /// Send literal text as-is.
    Text(String),
}

/// Collects the messages an action wants the host to send, in order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Dispatcher {
    messages: Vec<MessageDirective>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn utter_response(&mut self, key: ResponseKey) {
        self.messages.push(MessageDirective::Response(key));
    }

    pub fn utter_text(&mut self, text: impl Into<String>) {
        self.messages.push(MessageDirective::Text(text.into()));
    }

    pub fn messages(&self) -> &[MessageDirective] {
        &self.messages
    }

    pub fn into_messages(self) -> Vec<MessageDirective> {
        self.messages
    }
}

#[cfg(test)]
mod tests {
    use super::{Dispatcher, MessageDirective, ResponseKey};

    #[test]
    fn dispatcher_keeps_utterance_order() {
        let mut dispatcher = Dispatcher::new();
        dispatcher.utter_response(ResponseKey("utter_found_restaurants"));
        dispatcher.utter_text("Kalash Veg Restaurant");

        assert_eq!(
            dispatcher.into_messages(),
            vec![
                MessageDirective::Response(ResponseKey("utter_found_restaurants")),
                MessageDirective::Text("Kalash Veg Restaurant".to_string()),
            ]
        );
    }
}
