mod common;

use std::sync::Arc;

use common::{MockPlatform, LOG_CHANNEL};
use serenity::model::id::ChannelId;
use warden_core::models::audit::LogEvent;
use warden_discord_bot::{
    audit::AuditLogger,
    handlers::{deleted_message_event, DeletedMessage, DELETED_CONTENT_LIMIT},
};

#[test_log::test(tokio::test)]
async fn test_delivery_failure_is_swallowed() {
    let mut platform = MockPlatform::new();
    platform
        .expect_send_log()
        .times(1)
        .returning(|_, _| Err(eyre::eyre!("Missing Access")));

    let audit = AuditLogger::new(Arc::new(platform), LOG_CHANNEL);

    audit.log(LogEvent::new("🔨 BAN"));
    audit.flush().await.unwrap();
}

#[tokio::test]
async fn test_delivery_targets_log_channel() {
    let mut platform = MockPlatform::new();
    platform
        .expect_send_log()
        .withf(|channel, event| *channel == LOG_CHANNEL && event.title == "👢 KICK")
        .times(1)
        .returning(|_, _| Ok(()));

    let audit = AuditLogger::new(Arc::new(platform), LOG_CHANNEL);
    audit.log(LogEvent::new("👢 KICK"));
    audit.flush().await.unwrap();
}

#[tokio::test]
async fn test_events_are_delivered_in_order() {
    let mut seq = mockall::Sequence::new();
    let mut platform = MockPlatform::new();
    for title in ["🔨 BAN", "🧹 CLEAR", "🐢 SLOWMODE"] {
        platform
            .expect_send_log()
            .withf(move |_, event| event.title == title)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
    }

    let audit = AuditLogger::new(Arc::new(platform), LOG_CHANNEL);
    audit.log(LogEvent::new("🔨 BAN"));
    audit.log(LogEvent::new("🧹 CLEAR"));
    audit.log(LogEvent::new("🐢 SLOWMODE"));
    audit.flush().await.unwrap();
}

#[test]
fn test_deleted_bot_message_is_not_logged() {
    let message = DeletedMessage {
        author: Some(900),
        author_is_bot: true,
        content: Some("beep".to_string()),
    };

    assert!(deleted_message_event(ChannelId(1), &message).is_none());
}

#[test]
fn test_uncached_deleted_message_uses_placeholders() {
    let event = deleted_message_event(ChannelId(1), &DeletedMessage::default()).unwrap();

    assert_eq!(event.title, "🗑️ Message Deleted");
    assert_eq!(event.fields[0].value, "Unknown");
    assert_eq!(event.fields[2].value, "*Not cached*");
}

#[test]
fn test_deleted_message_content_is_truncated() {
    let message = DeletedMessage {
        author: Some(12),
        author_is_bot: false,
        content: Some("x".repeat(2000)),
    };

    let event = deleted_message_event(ChannelId(1), &message).unwrap();
    assert_eq!(event.fields[0].value, "<@12> (`12`)");
    assert!(event.fields[2].value.chars().count() <= DELETED_CONTENT_LIMIT);
}
