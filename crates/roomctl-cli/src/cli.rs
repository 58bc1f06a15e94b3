//! Argument parsing and command dispatch for `roomctl`.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use reqwest::Url;
use roomctl_telemetry::{LogFormat, LoggingConfig, init_logging};
use uuid::Uuid;

use crate::client::{
    CliResult, ClientConfig, ClientHandle, DEFAULT_TIMEOUT_SECS, DEFAULT_URL, parse_url,
};
use crate::commands::participants::{
    handle_get_participant, handle_list_participants, handle_remove_participant,
};
use crate::commands::rooms::{handle_create_room, handle_delete_room, handle_list_rooms};
use crate::commands::tracks::{handle_mute_track, handle_update_subscriptions};

/// Parses CLI arguments, executes the requested command, and reports errors.
/// Returns the process exit code.
pub async fn run() -> i32 {
    let cli = Cli::parse();
    install_logging(&cli);

    let trace_id = Uuid::new_v4().to_string();
    tracing::debug!(
        command = command_label(&cli.command),
        trace_id = %trace_id,
        "starting command"
    );

    match dispatch(cli, &trace_id).await {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("error: {}", err.display_message());
            err.exit_code()
        }
    }
}

fn install_logging(cli: &Cli) {
    let format = cli.log_format.unwrap_or_else(LogFormat::infer);
    if let Err(err) = init_logging(&LoggingConfig::for_cli(cli.verbose, format)) {
        eprintln!("warning: {err}");
    }
}

async fn dispatch(cli: Cli, trace_id: &str) -> CliResult<()> {
    let config = ClientConfig::from_cli(&cli)?;
    if cli.verbose {
        eprintln!("{}", config.describe());
    }
    let handle = ClientHandle::connect(config, trace_id)?;
    let output = cli.output;

    match cli.command {
        Command::CreateRoom(args) => handle_create_room(&handle, args).await,
        Command::ListRooms(args) => handle_list_rooms(&handle, args, output).await,
        Command::DeleteRoom(args) => handle_delete_room(&handle, args).await,
        Command::ListParticipants(args) => handle_list_participants(&handle, args, output).await,
        Command::GetParticipant(args) => handle_get_participant(&handle, args).await,
        Command::RemoveParticipant(args) => handle_remove_participant(&handle, args).await,
        Command::MuteTrack(args) => handle_mute_track(&handle, args).await,
        Command::UpdateSubscriptions(args) => handle_update_subscriptions(&handle, args).await,
    }
}

#[derive(Parser)]
#[command(
    name = "roomctl",
    version,
    about = "Administrative CLI for a real-time media room service"
)]
pub(crate) struct Cli {
    #[arg(
        long,
        global = true,
        env = "LIVEKIT_URL",
        value_parser = parse_url,
        default_value = DEFAULT_URL,
        help = "Room service endpoint (http, https, ws or wss)"
    )]
    pub(crate) url: Url,
    #[arg(long, global = true, env = "LIVEKIT_API_KEY", hide_env_values = true)]
    pub(crate) api_key: Option<String>,
    #[arg(long, global = true, env = "LIVEKIT_API_SECRET", hide_env_values = true)]
    pub(crate) api_secret: Option<String>,
    #[arg(
        long,
        global = true,
        env = "ROOMCTL_HTTP_TIMEOUT_SECS",
        default_value_t = DEFAULT_TIMEOUT_SECS
    )]
    pub(crate) timeout: u64,
    #[arg(
        long = "output",
        alias = "format",
        global = true,
        value_enum,
        default_value_t = OutputFormat::Table,
        help = "Select output format for list commands"
    )]
    pub(crate) output: OutputFormat,
    #[arg(
        short,
        long,
        global = true,
        help = "Print client diagnostics and enable debug logging"
    )]
    pub(crate) verbose: bool,
    #[arg(
        long,
        global = true,
        env = "ROOMCTL_LOG_FORMAT",
        value_parser = str::parse::<LogFormat>,
        help = "Log format on stderr: pretty or json"
    )]
    pub(crate) log_format: Option<LogFormat>,
    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    /// Create a room.
    CreateRoom(CreateRoomArgs),
    /// List active rooms.
    ListRooms(ListRoomsArgs),
    /// Delete a room and disconnect its participants.
    DeleteRoom(RoomArgs),
    /// List the participants of a room.
    ListParticipants(RoomArgs),
    /// Show a single participant.
    GetParticipant(ParticipantArgs),
    /// Remove a participant from a room.
    RemoveParticipant(ParticipantArgs),
    /// Mute or unmute a published track.
    MuteTrack(MuteTrackArgs),
    /// Subscribe a participant to tracks, or unsubscribe it.
    UpdateSubscriptions(UpdateSubscriptionsArgs),
}

#[derive(Args, Debug)]
pub(crate) struct CreateRoomArgs {
    #[arg(long, help = "Name of the room")]
    pub(crate) name: String,
    #[arg(long, help = "Seconds to keep the room open after it empties")]
    pub(crate) empty_timeout: Option<u32>,
    #[arg(long, help = "Maximum number of participants")]
    pub(crate) max_participants: Option<u32>,
    #[arg(long, help = "Opaque metadata attached to the room")]
    pub(crate) metadata: Option<String>,
    #[arg(
        long,
        help = "Path to a JSON recording configuration; checked locally and sent as \
                `recording`, which is ignored by servers without room recording support"
    )]
    pub(crate) recording_config: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct ListRoomsArgs {
    #[arg(long = "name", help = "Only list rooms with these names")]
    pub(crate) names: Vec<String>,
}

#[derive(Args, Debug)]
pub(crate) struct RoomArgs {
    #[arg(long, help = "Name of the room")]
    pub(crate) room: String,
}

#[derive(Args, Debug)]
pub(crate) struct ParticipantArgs {
    #[arg(long, help = "Name of the room")]
    pub(crate) room: String,
    #[arg(long, help = "Identity of the participant")]
    pub(crate) identity: String,
}

#[derive(Args, Debug)]
pub(crate) struct MuteTrackArgs {
    #[arg(long, help = "Name of the room")]
    pub(crate) room: String,
    #[arg(long, help = "Identity of the publishing participant")]
    pub(crate) identity: String,
    #[arg(long, help = "Sid of the track")]
    pub(crate) track: String,
    #[arg(
        long,
        required = true,
        action = ArgAction::Set,
        help = "true to mute the track, false to unmute it"
    )]
    pub(crate) muted: bool,
}

#[derive(Args, Debug)]
pub(crate) struct UpdateSubscriptionsArgs {
    #[arg(long, help = "Name of the room")]
    pub(crate) room: String,
    #[arg(long, help = "Identity of the subscribing participant")]
    pub(crate) identity: String,
    #[arg(
        long = "track",
        required = true,
        value_delimiter = ',',
        help = "Track sids, repeated or comma separated"
    )]
    pub(crate) tracks: Vec<String>,
    #[arg(
        long,
        required = true,
        action = ArgAction::Set,
        help = "true to subscribe, false to unsubscribe"
    )]
    pub(crate) subscribe: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum, PartialEq, Eq)]
pub(crate) enum OutputFormat {
    Table,
    Json,
}

pub(crate) const fn command_label(command: &Command) -> &'static str {
    match command {
        Command::CreateRoom(_) => "create-room",
        Command::ListRooms(_) => "list-rooms",
        Command::DeleteRoom(_) => "delete-room",
        Command::ListParticipants(_) => "list-participants",
        Command::GetParticipant(_) => "get-participant",
        Command::RemoveParticipant(_) => "remove-participant",
        Command::MuteTrack(_) => "mute-track",
        Command::UpdateSubscriptions(_) => "update-subscriptions",
    }
}
