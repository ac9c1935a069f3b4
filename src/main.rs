use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use timer_backup::audit::AuditLogger;
use timer_backup::cli::{build_channel, handle_audit_command, handle_save, handle_serve, SaveArgs};
use timer_backup::config::{paths::BridgePaths, settings::Settings};

#[derive(Parser)]
#[command(
    name = "timer-backup",
    version,
    about = "Persist timer app backups into a cloud-synced container",
    long_about = "timer-backup receives a serialized backup from the app and writes it \
                  into the cloud container's Documents directory as a timestamped \
                  archival copy plus timer_backup_latest.json."
)]
struct Cli {
    /// Container to write into (overrides the configured container id)
    #[arg(short, long, global = true, env = "TIMER_BACKUP_CONTAINER")]
    container: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Save a backup payload
    Save(SaveArgs),

    /// Answer line-delimited JSON method calls on stdin/stdout
    Serve,

    /// Show recent audit entries
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Write default settings
    Init,

    /// Show current configuration and paths
    Config,
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("TIMER_BACKUP_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let paths = BridgePaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    paths.ensure_directories()?;

    match cli.command {
        Some(Commands::Save(args)) => {
            let channel = build_channel(&paths, &settings, cli.container);
            let response = handle_save(&channel, &args)?;
            if !response.is_success() {
                bail!(
                    "backup failed: {}",
                    response.error_code().unwrap_or("not_implemented")
                );
            }
        }
        Some(Commands::Serve) => {
            let channel = build_channel(&paths, &settings, cli.container);
            tracing::info!(channel = %channel.name(), "serving on stdio");
            let handled = handle_serve(&channel)?;
            tracing::info!("stdin closed after {} call(s)", handled);
        }
        Some(Commands::Audit { limit }) => {
            handle_audit_command(&AuditLogger::new(paths.audit_log()), limit)?;
        }
        Some(Commands::Init) => {
            settings.save(&paths)?;
            println!("Settings written to: {}", paths.settings_file().display());
            println!(
                "Place or map synced containers under: {}",
                paths.containers_dir().display()
            );
        }
        Some(Commands::Config) => {
            let container_id = cli.container.unwrap_or_else(|| settings.container_id.clone());
            println!("timer-backup Configuration");
            println!("==========================");
            println!("Base directory:       {}", paths.base_dir().display());
            println!("Settings file:        {}", paths.settings_file().display());
            println!("Audit log:            {}", paths.audit_log().display());
            println!("Containers directory: {}", paths.containers_dir().display());
            println!();
            println!("Settings:");
            println!("  Channel:       {}", settings.channel_name);
            println!("  Container id:  {}", container_id);
            println!("  Audit enabled: {}", settings.audit_enabled);
            for (id, dir) in &settings.containers {
                println!("  Mapped:        {} -> {}", id, dir.display());
            }
        }
        None => {
            println!("timer-backup - cloud backup bridge for the timer app");
            println!();
            println!("Run 'timer-backup --help' for usage information.");
        }
    }

    Ok(())
}
