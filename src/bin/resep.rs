use anyhow::Result;
use resep::cli::{
    actions::{self, Action},
    start, telemetry,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Start the program
    let action = start()?;

    // Handle the action
    match action {
        Action::Server(args) => actions::server::execute(args).await?,
    }

    telemetry::shutdown_tracer();

    Ok(())
}
