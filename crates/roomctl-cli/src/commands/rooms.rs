use std::path::Path;

use roomctl_api_models::{
    CreateRoomRequest, DeleteRoomRequest, DeleteRoomResponse, ListRoomsRequest, ListRoomsResponse,
    Room, RoomServiceMethod,
};
use serde_json::Value;

use crate::auth::VideoGrant;
use crate::cli::{CreateRoomArgs, ListRoomsArgs, OutputFormat, RoomArgs};
use crate::client::{CliError, CliResult, ClientHandle};
use crate::commands::require_non_blank;
use crate::output::{deleted_room_message, render_json, render_room_list};

pub(crate) async fn handle_create_room(handle: &ClientHandle, args: CreateRoomArgs) -> CliResult<()> {
    let request = build_create_request(args)?;
    let room: Room = handle
        .call(
            RoomServiceMethod::CreateRoom,
            &VideoGrant::room_create(),
            &request,
        )
        .await?;
    println!("{}", render_json(&room)?);
    Ok(())
}

pub(crate) async fn handle_list_rooms(
    handle: &ClientHandle,
    args: ListRoomsArgs,
    format: OutputFormat,
) -> CliResult<()> {
    let names = args
        .names
        .into_iter()
        .map(|name| require_non_blank(name, "name"))
        .collect::<CliResult<Vec<_>>>()?;
    let list: ListRoomsResponse = handle
        .call(
            RoomServiceMethod::ListRooms,
            &VideoGrant::room_list(),
            &ListRoomsRequest { names },
        )
        .await?;
    println!("{}", render_room_list(&list, format)?);
    Ok(())
}

pub(crate) async fn handle_delete_room(handle: &ClientHandle, args: RoomArgs) -> CliResult<()> {
    let room = require_non_blank(args.room, "room")?;
    let _: DeleteRoomResponse = handle
        .call(
            RoomServiceMethod::DeleteRoom,
            &VideoGrant::room_create(),
            &DeleteRoomRequest { room: room.clone() },
        )
        .await?;
    println!("{}", deleted_room_message(&room));
    Ok(())
}

fn build_create_request(args: CreateRoomArgs) -> CliResult<CreateRoomRequest> {
    let name = require_non_blank(args.name, "name")?;
    let recording = args
        .recording_config
        .as_deref()
        .map(read_recording_config)
        .transpose()?;
    Ok(CreateRoomRequest {
        name,
        empty_timeout: args.empty_timeout,
        max_participants: args.max_participants,
        metadata: args.metadata,
        recording,
    })
}

fn read_recording_config(path: &Path) -> CliResult<Value> {
    let text = std::fs::read_to_string(path).map_err(|err| {
        CliError::config(format!(
            "failed to read recording config '{}': {err}",
            path.display()
        ))
    })?;
    serde_json::from_str(&text).map_err(|err| {
        CliError::config(format!(
            "recording config '{}' is not valid JSON: {err}",
            path.display()
        ))
    })
}
