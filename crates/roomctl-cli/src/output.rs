//! Output renderers for command results.
//!
//! Renderers build the full text and leave printing to the handlers.

use anyhow::anyhow;
use roomctl_api_models::{ListParticipantsResponse, ListRoomsResponse};
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::client::{CliError, CliResult};

/// Pretty JSON dump used for single-entity results.
pub(crate) fn render_json<T: Serialize>(value: &T) -> CliResult<String> {
    serde_json::to_string_pretty(value)
        .map_err(|err| CliError::failure(anyhow!("failed to format JSON: {err}")))
}

pub(crate) fn render_room_list(list: &ListRoomsResponse, format: OutputFormat) -> CliResult<String> {
    match format {
        OutputFormat::Json => render_json(list),
        OutputFormat::Table => {
            if list.rooms.is_empty() {
                return Ok("there are no active rooms".to_string());
            }
            Ok(list
                .rooms
                .iter()
                .map(|room| format!("{}\t{}", room.sid, room.name))
                .collect::<Vec<_>>()
                .join("\n"))
        }
    }
}

pub(crate) fn render_participant_list(
    room: &str,
    list: &ListParticipantsResponse,
    format: OutputFormat,
) -> CliResult<String> {
    match format {
        OutputFormat::Json => render_json(list),
        OutputFormat::Table => {
            if list.participants.is_empty() {
                return Ok(format!("there are no participants in room {room}"));
            }
            Ok(list
                .participants
                .iter()
                .map(|participant| {
                    format!(
                        "{} ({})\ttracks: {}",
                        participant.identity,
                        participant.state,
                        participant.tracks.len()
                    )
                })
                .collect::<Vec<_>>()
                .join("\n"))
        }
    }
}

pub(crate) fn deleted_room_message(room: &str) -> String {
    format!("deleted room {room}")
}

pub(crate) fn removed_participant_message(identity: &str) -> String {
    format!("successfully removed participant {identity}")
}

pub(crate) fn mute_message(muted: bool, track_sid: &str) -> String {
    if muted {
        format!("muted track: {track_sid}")
    } else {
        format!("unmuted track: {track_sid}")
    }
}

pub(crate) fn subscription_message(subscribe: bool, tracks: &[String]) -> String {
    let list = format_track_list(tracks);
    if subscribe {
        format!("subscribed to tracks: {list}")
    } else {
        format!("unsubscribed from tracks: {list}")
    }
}

pub(crate) fn format_track_list(tracks: &[String]) -> String {
    format!("[{}]", tracks.join(", "))
}
