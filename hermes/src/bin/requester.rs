use clap::Parser;
use hermes::exchange_once;
use hermes::pingpong::flags::RequesterFlags;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let flags = RequesterFlags::parse();
    hermes::logging::init(&flags.log_level);
    let config = flags.config();

    println!("🔗 Pinging responder at {} with \"{}\"", config.address, config.ping);

    // Under the default policy failures are already logged and the reply is zero-valued.
    let exchange = exchange_once(&config).await?;
    let reply = &exchange.reply;

    println!("📨 Response:");
    println!("    Ping: \"{}\"", reply.ping);
    println!("    Pong: \"{}\"", reply.pong);
    println!("    Timestamp: {}", reply.timestamp);
    println!("    Round-trip time: {}µs", exchange.latency.num_microseconds().unwrap_or(i64::MAX));

    Ok(())
}
