//! `roomctl` binary entrypoint.

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let exit_code = roomctl_cli::run().await;
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}
