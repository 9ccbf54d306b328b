//! Event chat rooms and direct messages

use crate::backend::Backend;
use crate::ids::next_id;
use eventide_core::error::{Error, Result};
use eventide_core::records::{
    ChatMessage, Conversation, DirectMessage, LastMessage, MessageKind, Participant,
};
use eventide_core::time::now_rfc3339;
use eventide_core::types::{Channel, Collection};
use serde_json::json;
use std::collections::HashMap;

impl Backend {
    // ========================================================================
    // Event chat
    // ========================================================================

    /// Messages in an event's chat room, oldest first
    pub fn chat_messages(&self, event_id: &str) -> Result<Vec<ChatMessage>> {
        let chats: HashMap<String, Vec<ChatMessage>> =
            self.store.get(Collection::EventChats, HashMap::new())?;
        Ok(chats.get(event_id).cloned().unwrap_or_default())
    }

    /// Post a message to an event's chat room
    ///
    /// The sender is the signed-in user; without a session the message is
    /// posted anonymously, since event rooms are open to attendees who
    /// have not signed up. Publishes `CHAT_UPDATE` carrying the event id
    /// and the message.
    pub fn send_chat_message(&self, event_id: &str, text: &str) -> Result<ChatMessage> {
        let (user_id, user_name, user_avatar) = match self.session()? {
            Some(user) => (user.id, user.name, user.avatar),
            None => (
                "anonymous".to_string(),
                "Anonymous".to_string(),
                "https://i.pravatar.cc/150?u=anonymous".to_string(),
            ),
        };
        let message = ChatMessage {
            id: next_id("chat"),
            event_id: event_id.to_string(),
            user_id,
            user_name,
            user_avatar,
            text: text.to_string(),
            timestamp: now_rfc3339(),
        };
        let mut chats: HashMap<String, Vec<ChatMessage>> =
            self.store.get(Collection::EventChats, HashMap::new())?;
        chats
            .entry(event_id.to_string())
            .or_default()
            .push(message.clone());
        self.store.set(Collection::EventChats, &chats)?;
        self.publish(
            Channel::Chat,
            &json!({ "eventId": event_id, "message": message }),
        );
        Ok(message)
    }

    // ========================================================================
    // Direct messages
    // ========================================================================

    /// Conversations `user_id` participates in
    pub fn conversations(&self, user_id: &str) -> Result<Vec<Conversation>> {
        let conversations: Vec<Conversation> =
            self.store.get(Collection::Conversations, Vec::new())?;
        Ok(conversations
            .into_iter()
            .filter(|c| c.participants.iter().any(|p| p.id == user_id))
            .collect())
    }

    /// Find or create the conversation between two participants
    pub fn open_conversation(&self, a: Participant, b: Participant) -> Result<Conversation> {
        let mut conversations: Vec<Conversation> =
            self.store.get(Collection::Conversations, Vec::new())?;
        if let Some(existing) = conversations.iter().find(|c| {
            c.participants.iter().any(|p| p.id == a.id) && c.participants.iter().any(|p| p.id == b.id)
        }) {
            return Ok(existing.clone());
        }
        let conversation = Conversation {
            id: next_id("conv"),
            participants: vec![a, b],
            last_message: None,
            unread_count: 0,
        };
        conversations.push(conversation.clone());
        self.store.set(Collection::Conversations, &conversations)?;
        Ok(conversation)
    }

    /// Messages in a conversation, oldest first
    pub fn direct_messages(&self, conversation_id: &str) -> Result<Vec<DirectMessage>> {
        let messages: Vec<DirectMessage> =
            self.store.get(Collection::DirectMessages, Vec::new())?;
        let mut mine: Vec<DirectMessage> = messages
            .into_iter()
            .filter(|m| m.conversation_id == conversation_id)
            .collect();
        mine.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
        Ok(mine)
    }

    /// Send a direct message
    ///
    /// Appends the message, refreshes the conversation's last-message
    /// preview (video-call markers summarize as "Video Call"), and
    /// publishes `DM_UPDATE`.
    pub fn send_direct_message(
        &self,
        conversation_id: &str,
        sender_id: &str,
        text: &str,
        kind: MessageKind,
    ) -> Result<DirectMessage> {
        let mut conversations: Vec<Conversation> =
            self.store.get(Collection::Conversations, Vec::new())?;
        let conversation = conversations
            .iter_mut()
            .find(|c| c.id == conversation_id)
            .ok_or_else(|| Error::not_found("conversation", conversation_id))?;

        let message = DirectMessage {
            id: next_id("dm"),
            conversation_id: conversation_id.to_string(),
            sender_id: sender_id.to_string(),
            text: text.to_string(),
            timestamp: now_rfc3339(),
            kind,
        };
        let mut messages: Vec<DirectMessage> =
            self.store.get(Collection::DirectMessages, Vec::new())?;
        messages.push(message.clone());
        self.store.set(Collection::DirectMessages, &messages)?;

        conversation.last_message = Some(LastMessage {
            text: kind.preview(text).to_string(),
            timestamp: message.timestamp.clone(),
            sender_id: sender_id.to_string(),
        });
        self.store.set(Collection::Conversations, &conversations)?;

        self.publish(
            Channel::DirectMessage,
            &json!({ "conversationId": conversation_id, "message": message }),
        );
        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::tests::test_backend;
    use eventide_core::types::UserRole;
    use parking_lot::Mutex;
    use std::sync::Arc;

    const CLIENT: &str = "user-demo-client";
    const VENDOR: &str = "user-demo-vendor";
    const SEED_CONV: &str = "conv-seed-1";

    fn participant(id: &str) -> Participant {
        Participant {
            id: id.to_string(),
            name: id.to_string(),
            avatar: String::new(),
        }
    }

    #[test]
    fn chat_message_carries_session_identity() {
        let backend = test_backend();
        backend
            .login("client@demo.eventide.app", "password", UserRole::Client)
            .unwrap();
        let message = backend
            .send_chat_message("event-seed-1", "Anyone near the main gate?")
            .unwrap();
        assert_eq!(message.user_id, CLIENT);
        assert_eq!(message.user_name, "Demo Client");
    }

    #[test]
    fn chat_without_session_is_anonymous() {
        let backend = test_backend();
        let message = backend.send_chat_message("event-seed-1", "hello").unwrap();
        assert_eq!(message.user_id, "anonymous");
    }

    #[test]
    fn chat_rooms_are_isolated_per_event() {
        let backend = test_backend();
        backend.send_chat_message("event-seed-1", "one").unwrap();
        backend.send_chat_message("event-seed-2", "two").unwrap();

        assert_eq!(backend.chat_messages("event-seed-1").unwrap().len(), 1);
        assert_eq!(backend.chat_messages("event-seed-2").unwrap().len(), 1);
        assert!(backend.chat_messages("event-seed-3").unwrap().is_empty());
    }

    #[test]
    fn chat_publishes_event_id_and_message() {
        let backend = test_backend();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        backend
            .relay()
            .subscribe(Channel::Chat, move |v| sink.lock().push(v.clone()));

        let message = backend.send_chat_message("event-seed-1", "ping").unwrap();
        assert_eq!(seen.lock().len(), 1);
        assert_eq!(seen.lock()[0]["eventId"], "event-seed-1");
        assert_eq!(seen.lock()[0]["message"]["id"], message.id.as_str());
    }

    #[test]
    fn conversations_filter_by_participant() {
        let backend = test_backend();
        assert_eq!(backend.conversations(CLIENT).unwrap().len(), 1);
        assert_eq!(backend.conversations(VENDOR).unwrap().len(), 1);
        assert!(backend.conversations("user-nobody").unwrap().is_empty());
    }

    #[test]
    fn open_conversation_reuses_existing_thread() {
        let backend = test_backend();
        let conv = backend
            .open_conversation(participant(CLIENT), participant(VENDOR))
            .unwrap();
        assert_eq!(conv.id, SEED_CONV);

        let fresh = backend
            .open_conversation(participant(CLIENT), participant("user-new"))
            .unwrap();
        assert_ne!(fresh.id, SEED_CONV);
        assert_eq!(backend.conversations(CLIENT).unwrap().len(), 2);
    }

    #[test]
    fn direct_messages_are_oldest_first() {
        let backend = test_backend();
        backend
            .send_direct_message(SEED_CONV, CLIENT, "newest", MessageKind::Text)
            .unwrap();
        let messages = backend.direct_messages(SEED_CONV).unwrap();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages.last().unwrap().text, "newest");
        assert!(messages.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
    }

    #[test]
    fn send_updates_last_message_preview() {
        let backend = test_backend();
        backend
            .send_direct_message(SEED_CONV, CLIENT, "are we still on?", MessageKind::Text)
            .unwrap();
        let conv = backend.conversations(CLIENT).unwrap().remove(0);
        let last = conv.last_message.unwrap();
        assert_eq!(last.text, "are we still on?");
        assert_eq!(last.sender_id, CLIENT);
    }

    #[test]
    fn video_call_marker_summarizes_preview() {
        let backend = test_backend();
        let message = backend
            .send_direct_message(SEED_CONV, VENDOR, "", MessageKind::VideoCallStart)
            .unwrap();
        assert_eq!(message.kind, MessageKind::VideoCallStart);
        let conv = backend.conversations(CLIENT).unwrap().remove(0);
        assert_eq!(conv.last_message.unwrap().text, "Video Call");
    }

    #[test]
    fn send_to_unknown_conversation_fails_without_writes() {
        let backend = test_backend();
        let before: Vec<DirectMessage> = backend
            .store()
            .get(Collection::DirectMessages, vec![])
            .unwrap();
        let err = backend
            .send_direct_message("conv-nope", CLIENT, "hi", MessageKind::Text)
            .unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
        let after: Vec<DirectMessage> = backend
            .store()
            .get(Collection::DirectMessages, vec![])
            .unwrap();
        assert_eq!(before.len(), after.len());
    }

    #[test]
    fn dm_publishes_on_dm_channel() {
        let backend = test_backend();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        backend
            .relay()
            .subscribe(Channel::DirectMessage, move |v| sink.lock().push(v.clone()));

        backend
            .send_direct_message(SEED_CONV, CLIENT, "ping", MessageKind::Text)
            .unwrap();
        assert_eq!(seen.lock().len(), 1);
        assert_eq!(seen.lock()[0]["conversationId"], SEED_CONV);
    }
}
