use anyhow::Result;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use sumactl::config::Config;
use sumactl::fleet::{self, FleetSnapshot};
use sumactl::http::{build_client, SumaClient};
use sumactl::scheduler;
use sumactl::session::Session;

#[derive(Parser)]
#[command(
    name = "sumactl",
    about = "Queries and schedules package updates across a SUSE Manager fleet"
)]
struct Cli {
    /// Path to the TOML config file with server and login data
    #[arg(short, long)]
    config: String,

    /// Hours from now to start the install job; overrides the config value.
    /// Without an offset the run only reports upgradable packages.
    #[arg(short, long)]
    schedule: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let env_filter = EnvFilter::from_default_env()
        .add_directive("sumactl=info".parse()?)
        .add_directive("hyper=warn".parse()?)
        .add_directive("reqwest=warn".parse()?);

    fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    let config = Config::load(&cli.config).await?;
    let offset = cli
        .schedule
        .or_else(|| config.schedule_offset_hours.clone())
        .unwrap_or_default();

    let client = SumaClient::new(build_client()?);

    // Login failure is fatal; nothing runs without a valid session.
    let session = client
        .login(config.server_identity(), &config.credentials())
        .await?;

    // Logout is attempted exactly once, after all other work, and its own
    // failure does not unwind results already obtained.
    let outcome = run_pipeline(&client, &session, &offset).await;

    if let Err(e) = client.logout(session).await {
        error!("{}", e);
    }

    let snapshot = outcome?;

    for host in &snapshot.hosts {
        let jobs: Vec<i64> = host.jobs.iter().map(|j| j.id).collect();
        info!(
            "{} (id {}): last boot {}, {} upgradable packages, jobs {:?}",
            host.name,
            host.id,
            host.last_boot,
            host.upgrades.len(),
            jobs
        );
    }

    Ok(())
}

async fn run_pipeline(
    client: &SumaClient,
    session: &Session,
    offset: &str,
) -> Result<FleetSnapshot> {
    let mut snapshot = fleet::list_hosts(client, session).await?;
    fleet::fetch_packages(client, session, &mut snapshot).await;

    let jobs_created = scheduler::schedule_installs(client, session, &mut snapshot, offset).await?;
    info!("{} install jobs created", jobs_created);

    Ok(snapshot)
}
