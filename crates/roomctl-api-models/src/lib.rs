#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
//! Wire DTOs for the room service administration API.
//!
//! The room service speaks Twirp over HTTP with JSON bodies. Field names follow
//! the protobuf definitions (snake case) and every field is optional on the
//! wire, so response types default missing values and leave zero values out
//! again when serialized. Entity types keep unmodelled fields and unknown enum
//! labels. 64-bit integers may arrive either as JSON numbers or as decimal
//! strings (the protobuf JSON mapping).
use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Fully-qualified Twirp service name used to build request paths.
pub const ROOM_SERVICE: &str = "livekit.RoomService";

/// A room managed by the service.
///
/// Fields this client does not model are kept in `extra` so a dump of the
/// room shows everything the service sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Room {
    /// Server-assigned room identifier.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub sid: String,
    /// Operator-chosen room name.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Seconds an empty room is kept open.
    #[serde(skip_serializing_if = "is_default")]
    pub empty_timeout: u32,
    /// Participant cap (0 = unlimited).
    #[serde(skip_serializing_if = "is_default")]
    pub max_participants: u32,
    /// Creation timestamp in unix seconds.
    #[serde(deserialize_with = "lenient_i64", skip_serializing_if = "is_default")]
    pub creation_time: i64,
    /// Free-form room metadata.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub metadata: String,
    /// Participants currently connected.
    #[serde(skip_serializing_if = "is_default")]
    pub num_participants: u32,
    /// Codecs enabled for the room.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub enabled_codecs: Vec<Codec>,
    /// Fields returned by the service that are not modelled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Codec advertised by a room.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Codec {
    /// MIME type, e.g. `audio/opus`.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub mime: String,
    /// SDP fmtp line, when present.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub fmtp_line: String,
    /// Unmodelled codec fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Connection state of a participant.
///
/// Labels this client does not know are kept verbatim in `Other`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ParticipantState {
    /// Websocket connected, not yet offered.
    #[default]
    Joining,
    /// Server received the client offer.
    Joined,
    /// ICE connectivity established.
    Active,
    /// Websocket disconnected.
    Disconnected,
    /// Any other label sent by the service.
    Other(String),
}

impl ParticipantState {
    /// Wire label for the state.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Joining => "JOINING",
            Self::Joined => "JOINED",
            Self::Active => "ACTIVE",
            Self::Disconnected => "DISCONNECTED",
            Self::Other(label) => label,
        }
    }
}

impl From<String> for ParticipantState {
    fn from(label: String) -> Self {
        match label.as_str() {
            "JOINING" => Self::Joining,
            "JOINED" => Self::Joined,
            "ACTIVE" => Self::Active,
            "DISCONNECTED" => Self::Disconnected,
            _ => Self::Other(label),
        }
    }
}

impl From<ParticipantState> for String {
    fn from(state: ParticipantState) -> Self {
        match state {
            ParticipantState::Other(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

impl Display for ParticipantState {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of a published track.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TrackType {
    /// Audio track.
    #[default]
    Audio,
    /// Video track.
    Video,
    /// Data track.
    Data,
    /// Any other kind sent by the service.
    Other(String),
}

impl TrackType {
    /// Wire label for the kind.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Audio => "AUDIO",
            Self::Video => "VIDEO",
            Self::Data => "DATA",
            Self::Other(label) => label,
        }
    }
}

impl From<String> for TrackType {
    fn from(label: String) -> Self {
        match label.as_str() {
            "AUDIO" => Self::Audio,
            "VIDEO" => Self::Video,
            "DATA" => Self::Data,
            _ => Self::Other(label),
        }
    }
}

impl From<TrackType> for String {
    fn from(kind: TrackType) -> Self {
        match kind {
            TrackType::Other(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

/// A track published by a participant.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TrackInfo {
    /// Server-assigned track identifier.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub sid: String,
    /// Track kind.
    #[serde(rename = "type", skip_serializing_if = "is_default")]
    pub kind: TrackType,
    /// Name given by the publisher.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Whether the publisher muted the track.
    #[serde(skip_serializing_if = "is_default")]
    pub muted: bool,
    /// Video width in pixels (video only).
    #[serde(skip_serializing_if = "is_default")]
    pub width: u32,
    /// Video height in pixels (video only).
    #[serde(skip_serializing_if = "is_default")]
    pub height: u32,
    /// Whether the track is simulcast.
    #[serde(skip_serializing_if = "is_default")]
    pub simulcast: bool,
    /// Unmodelled track fields such as `source` or `layers`.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A participant connected to a room.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ParticipantInfo {
    /// Server-assigned participant identifier.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub sid: String,
    /// Identity chosen by the token issuer.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub identity: String,
    /// Display name.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Current connection state.
    #[serde(skip_serializing_if = "is_default")]
    pub state: ParticipantState,
    /// Published tracks.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tracks: Vec<TrackInfo>,
    /// Free-form participant metadata.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub metadata: String,
    /// Join timestamp in unix seconds.
    #[serde(deserialize_with = "lenient_i64", skip_serializing_if = "is_default")]
    pub joined_at: i64,
    /// Whether the participant publishes media.
    #[serde(skip_serializing_if = "is_default")]
    pub is_publisher: bool,
    /// Unmodelled participant fields such as `permission` or `region`.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `CreateRoom` request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateRoomRequest {
    /// Room name.
    pub name: String,
    /// Seconds to keep the room open once empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_timeout: Option<u32>,
    /// Participant cap.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_participants: Option<u32>,
    /// Initial room metadata.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<String>,
    /// Recording configuration forwarded as-is; the service owns its schema.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recording: Option<Value>,
}

/// `ListRooms` request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListRoomsRequest {
    /// Restrict the listing to these room names (empty = all rooms).
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub names: Vec<String>,
}

/// `ListRooms` response.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ListRoomsResponse {
    /// Active rooms.
    pub rooms: Vec<Room>,
}

/// `DeleteRoom` request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeleteRoomRequest {
    /// Room to delete.
    pub room: String,
}

/// `DeleteRoom` acknowledgment.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeleteRoomResponse {}

/// `ListParticipants` request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListParticipantsRequest {
    /// Room to inspect.
    pub room: String,
}

/// `ListParticipants` response.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ListParticipantsResponse {
    /// Participants in the room.
    pub participants: Vec<ParticipantInfo>,
}

/// Addresses a single participant; used by `GetParticipant` and `RemoveParticipant`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoomParticipantIdentity {
    /// Room the participant is in.
    pub room: String,
    /// Participant identity.
    pub identity: String,
}

/// `RemoveParticipant` acknowledgment.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RemoveParticipantResponse {}

/// `MutePublishedTrack` request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MuteRoomTrackRequest {
    /// Room the participant is in.
    pub room: String,
    /// Participant owning the track.
    pub identity: String,
    /// Track to (un)mute.
    pub track_sid: String,
    /// Target mute state.
    pub muted: bool,
}

/// `MutePublishedTrack` response.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct MuteRoomTrackResponse {
    /// Track state after the change.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track: Option<TrackInfo>,
}

/// `UpdateSubscriptions` request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateSubscriptionsRequest {
    /// Room the participant is in.
    pub room: String,
    /// Subscribing participant.
    pub identity: String,
    /// Tracks to (un)subscribe, in the order supplied.
    pub track_sids: Vec<String>,
    /// Subscribe when `true`, unsubscribe otherwise.
    pub subscribe: bool,
}

/// `UpdateSubscriptions` acknowledgment.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateSubscriptionsResponse {}

/// Twirp error document returned with non-2xx responses.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TwirpError {
    /// Twirp error code, e.g. `not_found`.
    pub code: String,
    /// Human-readable message from the service.
    pub msg: String,
    /// Optional string metadata attached by the service.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub meta: BTreeMap<String, String>,
}

/// Twirp RPC methods of the room service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoomServiceMethod {
    /// Create a room.
    CreateRoom,
    /// List rooms.
    ListRooms,
    /// Delete a room.
    DeleteRoom,
    /// List participants in a room.
    ListParticipants,
    /// Fetch one participant.
    GetParticipant,
    /// Disconnect a participant.
    RemoveParticipant,
    /// Mute or unmute a published track.
    MutePublishedTrack,
    /// Change a participant's track subscriptions.
    UpdateSubscriptions,
}

impl RoomServiceMethod {
    /// Method name as it appears in the Twirp path.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreateRoom => "CreateRoom",
            Self::ListRooms => "ListRooms",
            Self::DeleteRoom => "DeleteRoom",
            Self::ListParticipants => "ListParticipants",
            Self::GetParticipant => "GetParticipant",
            Self::RemoveParticipant => "RemoveParticipant",
            Self::MutePublishedTrack => "MutePublishedTrack",
            Self::UpdateSubscriptions => "UpdateSubscriptions",
        }
    }

    /// Path of the method relative to the service base URL.
    #[must_use]
    pub fn path(self) -> String {
        format!("twirp/{ROOM_SERVICE}/{}", self.as_str())
    }
}

impl Display for RoomServiceMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn is_default<T: Default + PartialEq>(value: &T) -> bool {
    *value == T::default()
}

fn lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(i64),
        Text(String),
    }

    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(value) => Ok(value),
        NumberOrString::Text(text) if text.trim().is_empty() => Ok(0),
        NumberOrString::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}
