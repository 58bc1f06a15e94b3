use roomctl_api_models::{
    ListParticipantsRequest, ListParticipantsResponse, ParticipantInfo, RemoveParticipantResponse,
    RoomParticipantIdentity, RoomServiceMethod,
};

use crate::auth::VideoGrant;
use crate::cli::{OutputFormat, ParticipantArgs, RoomArgs};
use crate::client::{CliResult, ClientHandle};
use crate::commands::require_non_blank;
use crate::output::{removed_participant_message, render_json, render_participant_list};

pub(crate) async fn handle_list_participants(
    handle: &ClientHandle,
    args: RoomArgs,
    format: OutputFormat,
) -> CliResult<()> {
    let room = require_non_blank(args.room, "room")?;
    let list: ListParticipantsResponse = handle
        .call(
            RoomServiceMethod::ListParticipants,
            &VideoGrant::room_admin(&room),
            &ListParticipantsRequest { room: room.clone() },
        )
        .await?;
    println!("{}", render_participant_list(&room, &list, format)?);
    Ok(())
}

pub(crate) async fn handle_get_participant(
    handle: &ClientHandle,
    args: ParticipantArgs,
) -> CliResult<()> {
    let target = participant_identity(args)?;
    let participant: ParticipantInfo = handle
        .call(
            RoomServiceMethod::GetParticipant,
            &VideoGrant::room_admin(&target.room),
            &target,
        )
        .await?;
    println!("{}", render_json(&participant)?);
    Ok(())
}

pub(crate) async fn handle_remove_participant(
    handle: &ClientHandle,
    args: ParticipantArgs,
) -> CliResult<()> {
    let target = participant_identity(args)?;
    let _: RemoveParticipantResponse = handle
        .call(
            RoomServiceMethod::RemoveParticipant,
            &VideoGrant::room_admin(&target.room),
            &target,
        )
        .await?;
    println!("{}", removed_participant_message(&target.identity));
    Ok(())
}

fn participant_identity(args: ParticipantArgs) -> CliResult<RoomParticipantIdentity> {
    Ok(RoomParticipantIdentity {
        room: require_non_blank(args.room, "room")?,
        identity: require_non_blank(args.identity, "identity")?,
    })
}
