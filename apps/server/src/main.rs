use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::info;

use alumnet_config::load as load_config;
use alumnet_database::UserRole;
use alumnet_gateway::{create_router, GatewayState};
use alumnet_messaging::MessagingService;
use alumnet_relations::RelationshipService;
use alumnet_runtime::{shutdown_signal, telemetry, BackendServices};

#[derive(Parser)]
#[command(name = "alumnet-backend")]
#[command(about = "Alumnet backend server")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server (default)
    Serve,
    /// Seed the database with a demo cohort
    SeedData,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => run_server().await,
        Commands::SeedData => seed_data().await,
    }
}

async fn run_server() -> anyhow::Result<()> {
    telemetry::init_tracing().context("failed to initialise tracing")?;

    info!("starting Alumnet backend");

    let config = load_config().context("failed to load configuration")?;

    let services = BackendServices::initialise(&config)
        .await
        .context("failed to initialise backend services")?;

    let state = GatewayState::new(services.db_pool.clone(), config.auth.clone());
    let app = create_router(state);

    let address = format!("{}:{}", config.http.address, config.http.port);
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind http listener on {address}"))?;

    info!(%address, "http server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("http server error")?;

    info!("backend shut down");
    Ok(())
}

async fn seed_data() -> anyhow::Result<()> {
    telemetry::init_tracing().context("failed to initialise tracing")?;

    info!("seeding database with demo data");

    let config = load_config().context("failed to load configuration")?;

    let services = BackendServices::initialise(&config)
        .await
        .context("failed to initialise backend services")?;

    let relations = RelationshipService::new(services.db_pool.clone());
    let messaging = MessagingService::new(services.db_pool.clone());

    let cohort = [
        ("maya@example.com", "Maya Iyer", UserRole::Alumni),
        ("jonas@example.com", "Jonas Weber", UserRole::Alumni),
        ("priya@example.com", "Priya Nair", UserRole::Student),
        ("tom@example.com", "Tom Okafor", UserRole::Student),
    ];

    let mut ids = Vec::new();
    for (email, name, role) in cohort {
        let user = services
            .authenticator
            .register_with_password(email, "password123", name, role)
            .await
            .with_context(|| format!("failed to seed user {email}"))?;
        println!("created {:<24} {}", email, user.public_id);
        ids.push(user.id);
    }

    // Maya and Jonas are friends with an open conversation.
    let request = relations.send_request(ids[0], ids[1]).await?;
    relations.accept_request(&request.public_id, ids[1]).await?;

    let conversation = messaging.open_conversation(ids[0], ids[1]).await?;
    messaging
        .send_message(
            &conversation.public_id,
            ids[0],
            ids[1],
            "Welcome to the network!",
        )
        .await?;

    // Priya has two requests waiting on her.
    relations.send_request(ids[3], ids[2]).await?;
    relations.send_request(ids[1], ids[2]).await?;

    println!("seeded 4 members, 1 friendship, 1 conversation, 2 pending requests");
    println!("all accounts use the password 'password123'");

    Ok(())
}
