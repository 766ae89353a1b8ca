mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use common::{expect_reply, invocation, MockPlatform, MockReply, BOT, COMMAND_CHANNEL, GUILD, LOG_CHANNEL};
use pretty_assertions::assert_eq;
use serenity::model::{
    channel::PermissionOverwriteType,
    id::{ChannelId, RoleId, UserId},
    Permissions,
};
use warden_core::{
    errors::WardenError,
    models::{
        ownership,
        validation::{DEFAULT_REASON, REASON_LIMIT},
    },
};
use warden_discord_bot::{
    audit::AuditLogger,
    platform::{ChannelInfo, GuildPlatform},
    tickets::{ticket_overwrites, TicketController, TicketSettings},
};

const SUPPORT_ROLE: RoleId = RoleId(555);
const OWNER: u64 = 42;

fn settings() -> TicketSettings {
    TicketSettings {
        category: ChannelId(777),
        support_role: SUPPORT_ROLE,
        close_delay: Duration::from_secs(3),
    }
}

fn controller(platform: MockPlatform) -> (TicketController, AuditLogger) {
    let platform: Arc<dyn GuildPlatform> = Arc::new(platform);
    let audit = AuditLogger::new(platform.clone(), LOG_CHANNEL);
    (TicketController::new(platform, audit.clone(), settings()), audit)
}

fn ticket_channel(owner: u64) -> ChannelInfo {
    ChannelInfo {
        id: COMMAND_CHANNEL,
        name: "ticket-alice".to_string(),
        topic: Some(ownership::encode("alice#0001", owner, "Billing")),
    }
}

/// Platform whose command channel is an open ticket owned by [`OWNER`].
/// Counts deletions instead of failing on them.
fn ticket_platform(deletions: Arc<AtomicUsize>) -> MockPlatform {
    let mut platform = MockPlatform::new();
    platform
        .expect_fetch_channel()
        .returning(|_| Ok(ticket_channel(OWNER)));
    platform
        .expect_send_log()
        .withf(|_, event| event.title == "🎫 TICKET CLOSE")
        .returning(|_, _| Ok(()));
    platform
        .expect_delete_channel()
        .withf(|channel, _reason| *channel == COMMAND_CHANNEL)
        .returning(move |_, _| {
            deletions.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });
    platform
}

#[tokio::test]
async fn test_close_outside_ticket_channel_is_rejected() {
    let mut platform = MockPlatform::new();
    platform.expect_fetch_channel().returning(|_| {
        Ok(ChannelInfo {
            id: COMMAND_CHANNEL,
            name: "general".to_string(),
            topic: None,
        })
    });
    platform.expect_send_log().never();
    platform.expect_delete_channel().never();

    let (tickets, audit) = controller(platform);
    let reply = MockReply::new();
    let result = tickets
        .close(&invocation(OWNER, "alice", Permissions::empty()), &reply)
        .await;

    assert!(matches!(result, Err(WardenError::WrongChannel)));
    assert!(!tickets.scheduler().is_pending(COMMAND_CHANNEL).await);
    audit.flush().await.unwrap();
}

#[tokio::test]
async fn test_close_by_stranger_is_rejected_without_log() {
    let mut platform = MockPlatform::new();
    platform
        .expect_fetch_channel()
        .returning(|_| Ok(ticket_channel(OWNER)));
    platform.expect_send_log().never();
    platform.expect_delete_channel().never();

    let (tickets, audit) = controller(platform);
    let reply = MockReply::new();
    let result = tickets
        .close(&invocation(7, "mallory", Permissions::SEND_MESSAGES), &reply)
        .await;

    assert!(matches!(result, Err(WardenError::Authorization)));
    assert!(!tickets.scheduler().is_pending(COMMAND_CHANNEL).await);
    audit.flush().await.unwrap();
}

#[tokio::test]
async fn test_close_by_support_role_is_accepted() {
    let (tickets, audit) = controller(ticket_platform(Arc::new(AtomicUsize::new(0))));
    let reply = expect_reply("✅ This ticket will be deleted in 3 seconds.");

    let mut staff = invocation(8, "staff", Permissions::empty());
    staff.actor.roles.push(SUPPORT_ROLE);

    tickets.close(&staff, &reply).await.unwrap();
    assert!(tickets.scheduler().is_pending(COMMAND_CHANNEL).await);
    audit.flush().await.unwrap();
}

#[tokio::test]
async fn test_close_with_manage_channels_is_accepted() {
    let (tickets, audit) = controller(ticket_platform(Arc::new(AtomicUsize::new(0))));
    let reply = expect_reply("✅ This ticket will be deleted in 3 seconds.");

    tickets
        .close(&invocation(9, "mod", Permissions::MANAGE_CHANNELS), &reply)
        .await
        .unwrap();
    assert!(tickets.scheduler().is_pending(COMMAND_CHANNEL).await);
    audit.flush().await.unwrap();
}

#[tokio::test]
async fn test_reason_cannot_impersonate_owner() {
    let mut platform = MockPlatform::new();
    platform.expect_fetch_channel().returning(|_| {
        Ok(ChannelInfo {
            id: COMMAND_CHANNEL,
            name: "ticket-alice".to_string(),
            topic: Some(ownership::encode("alice#0001", OWNER, "help (7)")),
        })
    });
    platform.expect_send_log().never();

    let (tickets, audit) = controller(platform);
    let reply = MockReply::new();
    let result = tickets
        .close(&invocation(7, "mallory", Permissions::empty()), &reply)
        .await;

    assert!(matches!(result, Err(WardenError::Authorization)));
    audit.flush().await.unwrap();
}

#[tokio::test]
async fn test_owner_tag_with_separator_can_still_close() {
    let mut platform = MockPlatform::new();
    platform.expect_fetch_channel().returning(|_| {
        Ok(ChannelInfo {
            id: COMMAND_CHANNEL,
            name: "ticket-ab".to_string(),
            topic: Some(ownership::encode("a|b (5)#0001", OWNER, "help")),
        })
    });
    platform.expect_send_log().returning(|_, _| Ok(()));
    platform.expect_delete_channel().returning(|_, _| Ok(()));

    let (tickets, audit) = controller(platform);
    let reply = expect_reply("✅ This ticket will be deleted in 3 seconds.");

    tickets
        .close(&invocation(OWNER, "a|b (5)", Permissions::empty()), &reply)
        .await
        .unwrap();
    assert!(tickets.scheduler().is_pending(COMMAND_CHANNEL).await);

    let impostor = tickets
        .close(&invocation(5, "x", Permissions::empty()), &MockReply::new())
        .await;
    assert!(matches!(impostor, Err(WardenError::Authorization)));
    audit.flush().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_owner_close_deletes_channel_after_delay() {
    let deletions = Arc::new(AtomicUsize::new(0));
    let (tickets, audit) = controller(ticket_platform(deletions.clone()));
    let reply = expect_reply("✅ This ticket will be deleted in 3 seconds.");

    tickets
        .close(&invocation(OWNER, "alice", Permissions::empty()), &reply)
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(deletions.load(Ordering::SeqCst), 0);

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(deletions.load(Ordering::SeqCst), 1);
    assert!(!tickets.scheduler().is_pending(COMMAND_CHANNEL).await);
    audit.flush().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_deletion_is_scheduled_when_acknowledgment_fails() {
    let deletions = Arc::new(AtomicUsize::new(0));
    let (tickets, audit) = controller(ticket_platform(deletions.clone()));

    let mut reply = MockReply::new();
    reply
        .expect_respond()
        .times(1)
        .returning(|_| Err(eyre::eyre!("Unknown interaction")));

    let result = tickets
        .close(&invocation(OWNER, "alice", Permissions::empty()), &reply)
        .await;
    assert!(matches!(result, Err(WardenError::Platform(_))));
    assert!(tickets.scheduler().is_pending(COMMAND_CHANNEL).await);

    tokio::time::sleep(Duration::from_secs(4)).await;
    assert_eq!(deletions.load(Ordering::SeqCst), 1);
    audit.flush().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_closing_twice_deletes_once() {
    let deletions = Arc::new(AtomicUsize::new(0));
    let (tickets, audit) = controller(ticket_platform(deletions.clone()));

    let mut reply = MockReply::new();
    reply.expect_respond().times(2).returning(|_| Ok(()));

    let owner = invocation(OWNER, "alice", Permissions::empty());
    tickets.close(&owner, &reply).await.unwrap();
    tokio::time::sleep(Duration::from_secs(1)).await;
    tickets.close(&owner, &reply).await.unwrap();

    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(deletions.load(Ordering::SeqCst), 1);
    audit.flush().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_cancelled_deletion_never_fires() {
    let deletions = Arc::new(AtomicUsize::new(0));
    let (tickets, audit) = controller(ticket_platform(deletions.clone()));
    let reply = expect_reply("✅ This ticket will be deleted in 3 seconds.");

    tickets
        .close(&invocation(OWNER, "alice", Permissions::empty()), &reply)
        .await
        .unwrap();

    assert!(tickets.scheduler().cancel(COMMAND_CHANNEL).await);
    assert!(!tickets.scheduler().cancel(COMMAND_CHANNEL).await);

    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(deletions.load(Ordering::SeqCst), 0);
    audit.flush().await.unwrap();
}

#[tokio::test]
async fn test_create_opens_private_channel_with_owner_topic() {
    let mut platform = MockPlatform::new();
    platform.expect_bot_id().return_const(BOT);
    platform
        .expect_create_ticket_channel()
        .withf(|guild, request| {
            *guild == GUILD
                && request.name == "ticket-bob"
                && request.category == ChannelId(777)
                && ownership::decode(&request.topic) == Some(51)
                && request.topic.contains(DEFAULT_REASON)
        })
        .times(1)
        .returning(|_, _| Ok(ChannelId(1234)));
    platform
        .expect_send_message()
        .withf(|channel, content| *channel == ChannelId(1234) && content.contains("<@51>"))
        .times(1)
        .returning(|_, _| Ok(()));
    platform
        .expect_send_log()
        .withf(|channel, event| *channel == LOG_CHANNEL && event.title == "🎫 TICKET CREATE")
        .times(1)
        .returning(|_, _| Ok(()));

    let (tickets, audit) = controller(platform);
    let reply = expect_reply("✅ Ticket opened: <#1234>");

    tickets
        .create(&invocation(51, "Bob!!", Permissions::empty()), None, &reply)
        .await
        .unwrap();
    audit.flush().await.unwrap();
}

#[tokio::test]
async fn test_create_with_long_reason_fits_one_message() {
    let mut platform = MockPlatform::new();
    platform.expect_bot_id().return_const(BOT);
    platform
        .expect_create_ticket_channel()
        .withf(|_, request| ownership::decode(&request.topic) == Some(51))
        .times(1)
        .returning(|_, _| Ok(ChannelId(1234)));
    platform
        .expect_send_message()
        .withf(|_, content| content.chars().count() <= 2000)
        .times(1)
        .returning(|_, _| Ok(()));
    platform
        .expect_send_log()
        .withf(|_, event| {
            event
                .fields
                .iter()
                .any(|f| f.name == "Reason" && f.value.chars().count() == REASON_LIMIT)
        })
        .times(1)
        .returning(|_, _| Ok(()));

    let (tickets, audit) = controller(platform);
    let reply = expect_reply("✅ Ticket opened: <#1234>");
    let reason = "r".repeat(6000);

    tickets
        .create(&invocation(51, "bob", Permissions::empty()), Some(&reason), &reply)
        .await
        .unwrap();
    audit.flush().await.unwrap();
}

#[tokio::test]
async fn test_create_failure_is_reported_without_log() {
    let mut platform = MockPlatform::new();
    platform.expect_bot_id().return_const(BOT);
    platform
        .expect_create_ticket_channel()
        .returning(|_, _| Err(eyre::eyre!("Missing Permissions")));
    platform.expect_send_log().never();

    let (tickets, audit) = controller(platform);
    let mut reply = MockReply::new();
    reply.expect_defer().returning(|| Ok(()));

    let result = tickets
        .create(&invocation(51, "bob", Permissions::empty()), Some("help"), &reply)
        .await;

    assert!(matches!(result, Err(WardenError::Platform(_))));
    audit.flush().await.unwrap();
}

#[test]
fn test_ticket_overwrites_hide_channel_from_everyone() {
    let overwrites = ticket_overwrites(GUILD, UserId(51), SUPPORT_ROLE, BOT);
    assert_eq!(overwrites.len(), 4);

    let everyone = overwrites
        .iter()
        .find(|o| o.kind == PermissionOverwriteType::Role(RoleId(GUILD.0)))
        .unwrap();
    assert!(everyone.deny.contains(Permissions::VIEW_CHANNEL));

    let opener = overwrites
        .iter()
        .find(|o| o.kind == PermissionOverwriteType::Member(UserId(51)))
        .unwrap();
    assert!(opener.allow.contains(Permissions::VIEW_CHANNEL | Permissions::SEND_MESSAGES));

    let bot = overwrites
        .iter()
        .find(|o| o.kind == PermissionOverwriteType::Member(BOT))
        .unwrap();
    assert!(bot.allow.contains(Permissions::MANAGE_CHANNELS));
}
