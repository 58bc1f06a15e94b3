use roomctl_api_models::{
    MuteRoomTrackRequest, MuteRoomTrackResponse, RoomServiceMethod, UpdateSubscriptionsRequest,
    UpdateSubscriptionsResponse,
};

use crate::auth::VideoGrant;
use crate::cli::{MuteTrackArgs, UpdateSubscriptionsArgs};
use crate::client::{CliResult, ClientHandle};
use crate::commands::require_non_blank;
use crate::output::{mute_message, subscription_message};

pub(crate) async fn handle_mute_track(handle: &ClientHandle, args: MuteTrackArgs) -> CliResult<()> {
    let request = MuteRoomTrackRequest {
        room: require_non_blank(args.room, "room")?,
        identity: require_non_blank(args.identity, "identity")?,
        track_sid: require_non_blank(args.track, "track")?,
        muted: args.muted,
    };
    let response: MuteRoomTrackResponse = handle
        .call(
            RoomServiceMethod::MutePublishedTrack,
            &VideoGrant::room_admin(&request.room),
            &request,
        )
        .await?;

    let sid = response
        .track
        .map(|track| track.sid)
        .filter(|sid| !sid.is_empty())
        .unwrap_or(request.track_sid);
    println!("{}", mute_message(request.muted, &sid));
    Ok(())
}

pub(crate) async fn handle_update_subscriptions(
    handle: &ClientHandle,
    args: UpdateSubscriptionsArgs,
) -> CliResult<()> {
    let track_sids = args
        .tracks
        .into_iter()
        .map(|track| require_non_blank(track, "track"))
        .collect::<CliResult<Vec<_>>>()?;
    let request = UpdateSubscriptionsRequest {
        room: require_non_blank(args.room, "room")?,
        identity: require_non_blank(args.identity, "identity")?,
        track_sids,
        subscribe: args.subscribe,
    };
    let _: UpdateSubscriptionsResponse = handle
        .call(
            RoomServiceMethod::UpdateSubscriptions,
            &VideoGrant::room_admin(&request.room),
            &request,
        )
        .await?;
    println!(
        "{}",
        subscription_message(request.subscribe, &request.track_sids)
    );
    Ok(())
}
