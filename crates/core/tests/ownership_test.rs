use pretty_assertions::assert_eq;
use rstest::rstest;
use warden_core::models::ownership::{decode, encode, TOPIC_LIMIT};

#[test]
fn test_encode_shape() {
    assert_eq!(
        encode("alice#0", 111, "help"),
        "Ticket Owner: alice#0 (111) | Reason: help"
    );
}

#[rstest]
#[case("alice#0", 111, "help")]
#[case("bob", 1462333582168297533, "No reason given")]
#[case("", 7, "")]
#[case("zoë#1234", u64::MAX, "my (42) order | still broken")]
#[case("a|b#0001", 111, "help")]
#[case("x (5)#0001", 111, "help")]
#[case("x (5) | y#0001", 111, "help (9) | Reason: again")]
fn test_decode_recovers_owner(#[case] tag: &str, #[case] id: u64, #[case] reason: &str) {
    assert_eq!(decode(&encode(tag, id, reason)), Some(id));
}

#[rstest]
#[case("")]
#[case("General discussion")]
#[case("Owner: alice (111)")]
#[case("Ticket Owner: bob (abc) | Reason: help")]
#[case("Ticket Owner: bob () | Reason: help")]
#[case("Ticket Owner: bob (99999999999999999999999) | Reason: help")]
fn test_decode_rejects_foreign_topics(#[case] topic: &str) {
    assert_eq!(decode(topic), None);
}

#[test]
fn test_reason_cannot_impersonate_owner() {
    let topic = "Ticket Owner: mallory (222) | Reason: ask (111) for help";

    assert_eq!(decode(topic), Some(222));
}

#[test]
fn test_long_reason_is_cut_to_topic_limit() {
    let reason = "x".repeat(3000);
    let topic = encode("carol", 333, &reason);

    assert_eq!(topic.chars().count(), TOPIC_LIMIT);
    assert_eq!(decode(&topic), Some(333));
}
