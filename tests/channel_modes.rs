//! Integration tests for MODE on channels: flags, ranks, limit and key.

mod common;

use common::TestNetwork;
use ircd_chanmode::handlers::{Direction, Visibility};
use ircd_chanmode::state::ChannelModes;
use pretty_assertions::assert_eq;

#[test]
fn test_query_reports_modes_and_creation_time() {
    let mut net = TestNetwork::new();
    net.mode("op", &["+ntk", "hunter2"]);
    net.take();

    net.mode("user", &[]);
    assert_eq!(
        net.replies(),
        [
            ":irc.test 324 user #rust +ntk hunter2",
            ":irc.test 329 user #rust 1650000000",
        ]
    );

    net.take();
    net.mode("outsider", &[]);
    assert_eq!(net.replies()[0], ":irc.test 324 outsider #rust +ntk");
}

#[test]
fn test_mixed_mode_string() {
    let mut net = TestNetwork::new();
    let changes = net.mode("op", &["+imv-t+l", "user", "25"]);
    let letters: Vec<(char, Direction)> = changes.iter().map(|c| (c.letter, c.dir)).collect();
    // -t is a no-op: the channel never had it.
    assert_eq!(
        letters,
        [
            ('i', Direction::Add),
            ('m', Direction::Add),
            ('v', Direction::Add),
            ('l', Direction::Add),
        ]
    );
    assert_eq!(
        net.channel_lines(Visibility::All),
        [":op!op@op.example MODE #rust +imvl user 25"]
    );
    assert_eq!(
        net.server_lines(),
        [":001AAAAAA TMODE 1650000000 #rust +imvl 001AAAAAC 25"]
    );
}

#[test]
fn test_rejections_are_reported_once_and_processing_continues() {
    let mut net = TestNetwork::new();
    let changes = net.mode("half", &["+oqmzs", "user"]);
    let letters: Vec<char> = changes.iter().map(|c| c.letter).collect();
    assert_eq!(letters, ['m', 's']);
    assert_eq!(
        net.replies(),
        [
            ":irc.test 482 half #rust :You're not channel operator",
            ":irc.test 472 half q :is unknown mode char to me",
        ]
    );
}

#[test]
fn test_non_member_cannot_change_anything() {
    let mut net = TestNetwork::new();
    assert!(net.mode("outsider", &["+mnt-i+o", "user"]).is_empty());
    assert_eq!(
        net.replies(),
        [":irc.test 442 outsider #rust :You're not on that channel"]
    );
    assert!(net.channel.mode.flags.is_empty());
}

#[test]
fn test_parameter_limit_for_local_users() {
    let mut net = TestNetwork::new();
    let changes = net.mode(
        "op",
        &["+bbbbbbbb", "a", "b", "c", "d", "e", "f", "g", "h"],
    );
    assert_eq!(changes.len(), 6);
    assert_eq!(net.channel.bans.len(), 6);
}

#[test]
fn test_limit_and_key_last_one_wins() {
    let mut net = TestNetwork::new();
    let changes = net.mode("op", &["+lkkl", "5", "one", "two", "10"]);
    let summary: Vec<(char, Option<&str>)> = changes.iter().map(|c| (c.letter, c.arg.as_deref())).collect();
    assert_eq!(summary, [('k', Some("two")), ('l', Some("10"))]);
    assert_eq!(net.channel.mode.limit.map(|l| l.get()), Some(10));
    assert_eq!(net.channel.mode.key.as_deref(), Some("two"));
}

#[test]
fn test_oper_and_server_only_modes() {
    let mut net = TestNetwork::new();
    assert!(net.mode("op", &["+Or"]).is_empty());
    assert_eq!(
        net.replies(),
        [
            ":irc.test 481 op :Permission Denied - You're not an IRC operator",
            ":irc.test 468 op #rust :Only servers can change that mode",
        ]
    );

    let oper = net.client("op").opered();
    assert_eq!(net.mode_as(&oper, &["+O"]).len(), 1);
    let hub = net.hub();
    assert_eq!(net.mode_as(&hub, &["+r"]).len(), 1);
    assert!(net.channel.has_mode(ChannelModes::OPER_ONLY | ChannelModes::REGISTERED));
}

#[test]
fn test_tmode_from_peer() {
    let mut net = TestNetwork::new();
    let hub = net.hub();
    let changes = net
        .tmode(&hub, &["1650000000", "#rust", "+ov", "001AAAAAC", "002AAAAAA"])
        .unwrap();
    assert_eq!(changes.len(), 2);
    assert_eq!(
        net.channel_lines(Visibility::All),
        [":hub.test MODE #rust +ov user far"]
    );
    assert_eq!(
        net.server_lines(),
        [":002 TMODE 1650000000 #rust +ov 001AAAAAC 002AAAAAA"]
    );

    net.take();
    let changes = net.tmode(&hub, &["1750000000", "#rust", "-o", "001AAAAAC"]).unwrap();
    assert!(changes.is_empty());
    assert!(net.out.is_empty());
}
