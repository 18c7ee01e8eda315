//! Validation and normalization of outbound message sequences.

use std::sync::Arc;

use tracing::debug;

use crate::error::AgentError;
use crate::event::{EventKind, Publisher};
use crate::outcome::Outcome;

use super::Message;

/// Fixed approximation ratio for token estimation.
const CHARS_PER_TOKEN: usize = 4;

/// A conversation prepared for dispatch to the provider.
///
/// Derived per request and discarded after dispatch; never stored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProcessedMessages {
    /// The validated message sequence, in original order.
    pub messages: Vec<Message>,
    /// True when the sequence carries more than the system message.
    pub has_context: bool,
    /// The leading system message, by convention the first element.
    pub system_message: Message,
}

/// Validates, normalizes, and publishes conversation messages.
pub struct MessageProcessor {
    publisher: Arc<dyn Publisher<Message>>,
}

impl MessageProcessor {
    /// Creates a processor that announces saved messages through `publisher`.
    pub fn new(publisher: Arc<dyn Publisher<Message>>) -> Self {
        Self { publisher }
    }

    /// Validates a message sequence before dispatch.
    ///
    /// Fails when the sequence is empty or when the first message is not a
    /// system message. Both failures are validation-kind and never retried.
    /// Role membership is enforced by the closed [`super::Role`] enum at the
    /// ingestion boundary, so no per-element role check is needed here.
    pub fn validate_messages(&self, messages: &[Message]) -> Outcome<(), AgentError> {
        if messages.is_empty() {
            return Outcome::Err(AgentError::invalid_messages("message list cannot be empty"));
        }

        if !messages[0].role.is_system() {
            return Outcome::Err(AgentError::invalid_messages(
                "first message must be a system message",
            ));
        }

        Outcome::Ok(())
    }

    /// Validates and prepares a message sequence for agent execution.
    pub fn prepare_messages(&self, messages: Vec<Message>) -> Outcome<ProcessedMessages, AgentError> {
        if messages.is_empty() {
            return Outcome::Err(AgentError::invalid_messages("no messages to process"));
        }

        if let Outcome::Err(err) = self.validate_messages(&messages) {
            return Outcome::Err(err);
        }

        let system_message = messages[0].clone();
        let has_context = messages.len() > 1;
        Outcome::Ok(ProcessedMessages {
            messages,
            has_context,
            system_message,
        })
    }

    /// Estimates the token count of a message sequence.
    ///
    /// Rough approximation: 4 characters per token, clamped to a minimum of
    /// one token whenever there is any content at all.
    pub fn token_count(&self, messages: &[Message]) -> usize {
        let total_chars: usize = messages
            .iter()
            .map(|msg| msg.content.text.chars().count())
            .sum();

        let estimated = total_chars / CHARS_PER_TOKEN;
        if estimated == 0 && total_chars > 0 {
            return 1;
        }
        estimated
    }

    /// Renders the sequence as `"<role>: <text>"` lines in original order.
    ///
    /// Debugging and fallback rendering only; the wire payload to the
    /// provider is built elsewhere.
    pub fn format_messages(&self, messages: &[Message]) -> String {
        let mut prompt = String::new();
        for msg in messages {
            prompt.push_str(&format!("{}: {}\n", msg.role, msg.content.text));
        }
        prompt
    }

    /// Publishes a created event for the message.
    ///
    /// Fire-and-forget by contract: the publish is not retried and publish
    /// failures are the collaborator's concern, not the caller's.
    pub fn save_message(&self, message: Message) {
        debug!(role = message.role.as_str(), "publishing created message");
        self.publisher.publish(EventKind::Created, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{NoopPublisher, RecordingPublisher};
    use crate::message::Role;

    fn processor() -> MessageProcessor {
        MessageProcessor::new(Arc::new(NoopPublisher))
    }

    fn conversation() -> Vec<Message> {
        vec![
            Message::system("you are a helpful assistant"),
            Message::user("hello"),
            Message::assistant("hi, how can I help?"),
        ]
    }

    // ==================== Validation Tests ====================

    #[test]
    fn test_validate_accepts_system_led_sequence() {
        assert!(processor().validate_messages(&conversation()).is_success());
    }

    #[test]
    fn test_validate_rejects_empty_sequence() {
        let err = processor().validate_messages(&[]).error();
        assert_eq!(err.kind, crate::error::AgentErrorKind::InvalidMessages);
        assert_eq!(err.message, "message list cannot be empty");
    }

    #[test]
    fn test_validate_rejects_non_system_first_message() {
        let msgs = vec![Message::user("hello"), Message::assistant("hi")];
        let err = processor().validate_messages(&msgs).error();
        assert_eq!(err.kind, crate::error::AgentErrorKind::InvalidMessages);
        assert_eq!(err.message, "first message must be a system message");
    }

    #[test]
    fn test_validate_accepts_lone_system_message() {
        let msgs = vec![Message::system("just instructions")];
        assert!(processor().validate_messages(&msgs).is_success());
    }

    // ==================== Preparation Tests ====================

    #[test]
    fn test_prepare_rejects_empty_sequence() {
        let err = processor().prepare_messages(vec![]).error();
        assert_eq!(err.kind, crate::error::AgentErrorKind::InvalidMessages);
    }

    #[test]
    fn test_prepare_derives_context_and_system_message() {
        let prepared = processor().prepare_messages(conversation()).value();
        assert!(prepared.has_context);
        assert_eq!(prepared.system_message.role, Role::System);
        assert_eq!(prepared.messages.len(), 3);
        assert_eq!(prepared.messages[0], prepared.system_message);
    }

    #[test]
    fn test_prepare_single_message_has_no_context() {
        let prepared = processor()
            .prepare_messages(vec![Message::system("instructions")])
            .value();
        assert!(!prepared.has_context);
    }

    #[test]
    fn test_prepare_propagates_validation_failure() {
        let msgs = vec![Message::tool("result"), Message::user("hello")];
        assert!(processor().prepare_messages(msgs).is_error());
    }

    // ==================== Token Estimation Tests ====================

    #[test]
    fn test_token_count_empty_content_is_zero() {
        assert_eq!(processor().token_count(&[]), 0);
        assert_eq!(processor().token_count(&[Message::system("")]), 0);
    }

    #[test]
    fn test_token_count_clamps_to_one_for_short_content() {
        let msgs = vec![Message::user("ab")];
        assert_eq!(processor().token_count(&msgs), 1);
    }

    #[test]
    fn test_token_count_divides_by_four() {
        let msgs = vec![Message::user("a".repeat(40))];
        assert_eq!(processor().token_count(&msgs), 10);
    }

    #[test]
    fn test_token_count_sums_across_messages() {
        let msgs = vec![Message::system("a".repeat(8)), Message::user("b".repeat(8))];
        assert_eq!(processor().token_count(&msgs), 4);
    }

    #[test]
    fn test_token_count_is_monotonic_in_content_length() {
        let p = processor();
        let mut previous = 0;
        for len in [0usize, 1, 3, 4, 17, 100, 1000] {
            let msgs = vec![Message::user("x".repeat(len))];
            let count = p.token_count(&msgs);
            assert!(count >= previous, "token count regressed at length {len}");
            previous = count;
        }
    }

    // ==================== Rendering Tests ====================

    #[test]
    fn test_format_messages_renders_role_prefixed_lines() {
        let rendered = processor().format_messages(&conversation());
        let expected = "system: you are a helpful assistant\nuser: hello\nassistant: hi, how can I help?\n";
        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_format_messages_line_count_matches_input() {
        let rendered = processor().format_messages(&conversation());
        assert_eq!(rendered.lines().count(), 3);
        assert!(rendered.ends_with('\n'));
    }

    #[test]
    fn test_format_messages_empty_input_is_empty() {
        assert_eq!(processor().format_messages(&[]), "");
    }

    // ==================== Publish Tests ====================

    #[test]
    fn test_save_message_publishes_created_event() {
        let recorder = Arc::new(RecordingPublisher::new());
        let processor = MessageProcessor::new(recorder.clone());

        processor.save_message(Message::user("hello"));

        let events = recorder.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, EventKind::Created);
        assert_eq!(events[0].payload, Message::user("hello"));
    }
}
