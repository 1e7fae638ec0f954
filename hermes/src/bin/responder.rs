use clap::Parser;
use hermes::Responder;
use hermes::pingpong::flags::ResponderFlags;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let flags = ResponderFlags::parse();
    hermes::logging::init(&flags.log_level);

    // Bind and accept failures are fatal: both are logged where they happen and end the process here.
    let responder = Responder::start(&flags.config()).await?;
    println!("✅ Responder listening on {}", responder.local_addr());
    responder.wait().await?;

    Ok(())
}
