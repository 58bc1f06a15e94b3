//! End-to-end tests running the `roomctl` binary against a stub room service.

use assert_cmd::Command;
use httpmock::prelude::*;
use predicates::prelude::*;
use serde_json::json;

const API_KEY: &str = "APIdevkey1234";
const API_SECRET: &str = "devsecret-0123456789";
const UNEXPECTED_CALL: &str = "stub-received-unexpected-call";

fn roomctl(server: &MockServer) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_roomctl"));
    cmd.env_remove("LIVEKIT_URL")
        .env_remove("LIVEKIT_API_KEY")
        .env_remove("LIVEKIT_API_SECRET")
        .env_remove("ROOMCTL_HTTP_TIMEOUT_SECS")
        .env_remove("RUST_LOG")
        .env("ROOMCTL_LOG_FORMAT", "pretty")
        .args(["--url", server.base_url().as_str()])
        .args(["--api-key", API_KEY, "--api-secret", API_SECRET]);
    cmd
}

fn catch_all(server: &MockServer) {
    server.mock(|when, then| {
        when.method(POST);
        then.status(500).body(UNEXPECTED_CALL);
    });
}

#[test]
fn create_room_prints_room_document() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/twirp/livekit.RoomService/CreateRoom")
            .header_exists("authorization")
            .header_exists("x-request-id")
            .json_body(json!({"name": "demo"}));
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({"sid": "RM_1", "name": "demo"}));
    });

    roomctl(&server)
        .args(["create-room", "--name", "demo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"sid\": \"RM_1\""))
        .stdout(predicate::str::contains("\"name\": \"demo\""));
    mock.assert();
}

#[test]
fn delete_room_not_found_exits_non_zero() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST)
            .path("/twirp/livekit.RoomService/DeleteRoom")
            .json_body(json!({"room": "RM_1"}));
        then.status(404)
            .header("content-type", "application/json")
            .json_body(json!({"code": "not_found", "msg": "requested room does not exist"}));
    });

    roomctl(&server)
        .args(["delete-room", "--room", "RM_1"])
        .assert()
        .code(3)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(
            "error: requested room does not exist (not_found, status 404)",
        ));
}

#[test]
fn missing_required_flag_fails_before_any_call() {
    let server = MockServer::start();
    catch_all(&server);

    roomctl(&server)
        .args(["delete-room"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--room"))
        .stderr(predicate::str::contains(UNEXPECTED_CALL).not());
}

#[test]
fn mute_track_without_state_is_an_argument_error() {
    let server = MockServer::start();
    catch_all(&server);

    roomctl(&server)
        .args([
            "mute-track",
            "--room",
            "demo",
            "--identity",
            "alice",
            "--track",
            "TR_1",
        ])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--muted"))
        .stderr(predicate::str::contains(UNEXPECTED_CALL).not());
}

#[test]
fn missing_credentials_fail_before_any_call() {
    let server = MockServer::start();
    catch_all(&server);

    Command::new(env!("CARGO_BIN_EXE_roomctl"))
        .env_remove("LIVEKIT_API_KEY")
        .env_remove("LIVEKIT_API_SECRET")
        .args(["--url", server.base_url().as_str(), "list-rooms"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("API key is required"))
        .stderr(predicate::str::contains(UNEXPECTED_CALL).not());
}

#[test]
fn empty_room_listing_is_explicit() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/twirp/livekit.RoomService/ListRooms");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({"rooms": []}));
    });

    roomctl(&server)
        .args(["list-rooms"])
        .assert()
        .success()
        .stdout("there are no active rooms\n");
}

#[test]
fn list_participants_prints_one_line_each() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST)
            .path("/twirp/livekit.RoomService/ListParticipants")
            .json_body(json!({"room": "demo"}));
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({"participants": [
                {"identity": "alice", "state": "ACTIVE", "tracks": [{"sid": "TR_1"}]},
                {"identity": "bob", "state": "JOINING"}
            ]}));
    });

    roomctl(&server)
        .args(["list-participants", "--room", "demo"])
        .assert()
        .success()
        .stdout("alice (ACTIVE)\ttracks: 1\nbob (JOINING)\ttracks: 0\n");
}

#[test]
fn mute_track_reports_new_state() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST)
            .path("/twirp/livekit.RoomService/MutePublishedTrack")
            .json_body(json!({
                "room": "demo",
                "identity": "alice",
                "track_sid": "TR_1",
                "muted": false
            }));
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({"track": {"sid": "TR_1", "muted": false}}));
    });

    roomctl(&server)
        .args([
            "mute-track",
            "--room",
            "demo",
            "--identity",
            "alice",
            "--track",
            "TR_1",
            "--muted",
            "false",
        ])
        .assert()
        .success()
        .stdout("unmuted track: TR_1\n");
}

#[test]
fn update_subscriptions_lists_tracks_in_supplied_order() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST)
            .path("/twirp/livekit.RoomService/UpdateSubscriptions");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({}));
    });

    roomctl(&server)
        .args([
            "update-subscriptions",
            "--room",
            "demo",
            "--identity",
            "alice",
            "--track",
            "TR_b",
            "--track",
            "TR_a",
            "--subscribe",
            "true",
        ])
        .assert()
        .success()
        .stdout("subscribed to tracks: [TR_b, TR_a]\n");
}

#[test]
fn verbose_output_masks_credentials() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/twirp/livekit.RoomService/ListRooms");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({"rooms": [{"sid": "RM_1", "name": "demo"}]}));
    });

    roomctl(&server)
        .args(["list-rooms", "--verbose"])
        .assert()
        .success()
        .stdout("RM_1\tdemo\n")
        .stderr(predicate::str::contains("creating client to"))
        .stderr(predicate::str::contains("api-key: API****34"))
        .stderr(predicate::str::contains(API_KEY).not())
        .stderr(predicate::str::contains(API_SECRET).not());
}

#[test]
fn get_participant_dumps_every_field_the_service_sent() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST)
            .path("/twirp/livekit.RoomService/GetParticipant")
            .json_body(json!({"room": "demo", "identity": "alice"}));
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({
                "sid": "PA_1",
                "identity": "alice",
                "state": "MIGRATING",
                "permission": {"can_publish": true},
                "region": "us-east",
                "version": 7,
                "tracks": [{"sid": "TR_1", "source": "MICROPHONE", "mime_type": "audio/opus"}]
            }));
    });

    let output = roomctl(&server)
        .args(["get-participant", "--room", "demo", "--identity", "alice"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let dumped: serde_json::Value = serde_json::from_slice(&output).expect("JSON dump");
    assert_eq!(
        dumped,
        json!({
            "sid": "PA_1",
            "identity": "alice",
            "state": "MIGRATING",
            "permission": {"can_publish": true},
            "region": "us-east",
            "version": 7,
            "tracks": [{"sid": "TR_1", "source": "MICROPHONE", "mime_type": "audio/opus"}]
        })
    );
}

#[test]
fn unknown_log_format_is_rejected() {
    let server = MockServer::start();
    catch_all(&server);

    roomctl(&server)
        .env("ROOMCTL_LOG_FORMAT", "xml")
        .args(["list-rooms"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains(
            "unknown log format 'xml' (expected pretty or json)",
        ))
        .stderr(predicate::str::contains(UNEXPECTED_CALL).not());
}

#[test]
fn url_with_userinfo_is_rejected_without_echoing_it() {
    let server = MockServer::start();
    catch_all(&server);
    let url = server.base_url().replacen("http://", "http://ops:hunter2pass@", 1);

    Command::new(env!("CARGO_BIN_EXE_roomctl"))
        .env_remove("LIVEKIT_URL")
        .args(["--url", url.as_str(), "--api-key", API_KEY, "--api-secret", API_SECRET])
        .args(["list-rooms", "--verbose"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("must not embed credentials"))
        .stderr(predicate::str::contains("hunter2pass").not())
        .stderr(predicate::str::contains(UNEXPECTED_CALL).not());
}
