use clap::{Parser, Subcommand};
use sqs_smoke::QueueClient;

#[tokio::main]
pub async fn main() {
    env_logger::init();

    if let Err(e) = Cli::parse().run().await {
        eprintln!("{e:#}");
        std::process::exit(1);
    }
}

#[derive(Debug, Parser)]
#[command(name = "sqs-smoke")]
#[command(about = "SQS smoke tester: send a message, poll it back, log it, delete it", long_about = None)]
pub struct Cli {
    /// Override the SQS endpoint (e.g. http://localhost:4566 for LocalStack)
    #[arg(long, global = true)]
    endpoint_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Send a test message, receive it back, log and delete it
    Smoke {
        #[arg(default_value = "TestQueue")]
        queue: String,
        #[arg(default_value = "Hello, SQS!")]
        message: String,
    },
    /// Send one message to a queue
    Send { queue: String, body: String },
    /// Long-poll a queue once and print each message as JSON
    Poll {
        queue: String,
        /// Maximum messages to receive in one call
        #[arg(long, default_value_t = sqs_smoke::DEFAULT_MAX_MESSAGES)]
        max: i32,
        /// Long-poll wait in seconds
        #[arg(long, default_value_t = sqs_smoke::DEFAULT_WAIT_SECONDS)]
        wait: i32,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = load_config(self.endpoint_url.as_deref()).await;
        let client = QueueClient::from_config(&config);

        match self.command {
            Commands::Smoke { queue, message } => {
                let drained = client.round_trip(&queue, &message).await?;
                println!("round trip on '{}': {} message(s) drained", queue, drained.len());
            }
            Commands::Send { queue, body } => {
                client.send(&queue, &body).await?;
                log::info!("sent 1 message to '{queue}'");
            }
            Commands::Poll { queue, max, wait } => {
                for message in client.receive_with(&queue, max, wait).await? {
                    println!("{}", serde_json::to_string(&message)?);
                }
            }
        }

        Ok(())
    }
}

async fn load_config(endpoint_url: Option<&str>) -> aws_config::SdkConfig {
    let loader = aws_config::from_env().region(
        // supports loading region from known env variables
        aws_config::meta::region::RegionProviderChain::default_provider()
            .or_else(aws_config::Region::from_static("us-east-1")),
    );

    match endpoint_url {
        Some(url) => loader.endpoint_url(url).load().await,
        None => loader.load().await,
    }
}
