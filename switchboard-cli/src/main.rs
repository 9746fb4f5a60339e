use std::process;

#[tokio::main]
async fn main() {
    process::exit(switchboard_cli::run().await);
}
