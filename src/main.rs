//! Fitpanel CLI
//!
//! Command-line front end for the admin API:
//! - Log in / out as administrator
//! - List users and activities
//! - Show aggregate stats
//! - Delete activities

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use fitpanel::config::{generate_default_config, LoggingConfig};
use fitpanel::format::{
    format_date, format_date_time, format_distance, format_duration, format_pace, format_speed,
    user_full_name,
};
use fitpanel::models::ActivityKind;
use fitpanel::{AppContext, Config, DashboardStore, FileStorage, Severity};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "fitpanel")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Admin client for the activity tracker API")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API base URL (overrides config)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Config file (default: standard locations)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Which store to read through
    #[arg(long, value_enum, default_value = "admin", global = true)]
    pub view: View,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum View {
    Data,
    Admin,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in as administrator
    Login {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },

    /// End the admin session
    Logout,

    /// Show session state
    Status,

    /// List users
    Users {
        /// Filter by name, surname or email
        #[arg(short, long)]
        search: Option<String>,
    },

    /// List activities
    Activities {
        /// Only this kind (run, ride, walk, swim, other)
        #[arg(short, long)]
        kind: Option<ActivityKind>,
        /// Only activities of this user id
        #[arg(short, long)]
        user: Option<u64>,
    },

    /// Show aggregate stats
    Stats,

    /// Delete an activity by id
    DeleteActivity {
        id: String,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default()?,
    };
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }

    init_logging(&config.logging);
    tracing::debug!(base_url = %config.api.base_url, "Configuration loaded");

    if let Commands::Config { output } = &cli.command {
        let content = generate_default_config();
        match output {
            Some(path) => {
                std::fs::write(path, content)
                    .with_context(|| format!("Failed to write {:?}", path))?;
                println!("Config written to {:?}", path);
            }
            None => print!("{}", content),
        }
        return Ok(());
    }

    let storage = FileStorage::open(&config.session.path)
        .with_context(|| format!("Failed to open session file {}", config.session.path))?;
    let ctx = AppContext::new(&config, Arc::new(storage));
    let store = match cli.view {
        View::Data => Arc::clone(&ctx.data),
        View::Admin => Arc::clone(&ctx.admin),
    };

    let ok = match cli.command {
        Commands::Login { email, password } => ctx.auth.admin_login(&email, &password).await,

        Commands::Logout => {
            ctx.auth.admin_logout();
            println!("Logged out");
            true
        }

        Commands::Status => {
            println!("API:   {}", ctx.client.config().base_url);
            println!("User:  {}", session_label(ctx.auth.check_auth_status()));
            println!("Admin: {}", session_label(ctx.auth.check_admin_auth_status()));
            true
        }

        Commands::Users { search } => {
            let ok = store.load_users().await;
            if ok {
                print_users(&store, search.as_deref().unwrap_or(""));
            }
            ok
        }

        Commands::Activities { kind, user } => {
            let ok = store.load_activities().await;
            if ok {
                print_activities(&store, kind, user);
            }
            ok
        }

        Commands::Stats => {
            let ok = store.load_stats().await;
            if ok {
                println!("Users:      {}", store.total_users());
                println!("Activities: {}", store.total_activities());
                println!("Distance:   {}", format_distance(store.total_distance()));
            }
            ok
        }

        Commands::DeleteActivity { id } => store.delete_activity(&id).await,

        // Handled before the session is opened
        Commands::Config { .. } => true,
    };

    for note in ctx.notifications.notifications() {
        match note.severity {
            Severity::Error | Severity::Warning => eprintln!("[{}] {}", note.severity, note.message),
            Severity::Success | Severity::Info => println!("[{}] {}", note.severity, note.message),
        }
    }

    if !ok {
        std::process::exit(1);
    }
    Ok(())
}

fn init_logging(config: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(format!("fitpanel={}", config.level)));
    let registry = tracing_subscriber::registry().with(filter);

    if config.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn session_label(logged_in: bool) -> &'static str {
    if logged_in {
        "logged in"
    } else {
        "logged out"
    }
}

fn print_users(store: &DashboardStore, search: &str) {
    let users = store.search_users(search);

    println!(
        "{:<6} {:<28} {:<32} {:<10} {:>10} {:<12}",
        "ID", "NAME", "EMAIL", "VERIFIED", "ACTIVITIES", "CREATED"
    );
    for user in &users {
        println!(
            "{:<6} {:<28} {:<32} {:<10} {:>10} {:<12}",
            user.id,
            user_full_name(user),
            user.email,
            if user.is_verified() { "yes" } else { "no" },
            user.activities_count
                .map(|c| c.to_string())
                .unwrap_or_else(|| "-".to_string()),
            format_date(&user.created_at),
        );
    }
    println!("{} user(s)", users.len());
}

fn print_activities(store: &DashboardStore, kind: Option<ActivityKind>, user: Option<u64>) {
    let activities = store.activities_matching(kind, user);

    println!(
        "{:<6} {:<24} {:<6} {:>10} {:>12} {:>10} {:>11} {:<22} {:<20}",
        "ID", "TITLE", "KIND", "DISTANCE", "TIME", "PACE", "SPEED", "USER", "CREATED"
    );
    for a in &activities {
        println!(
            "{:<6} {:<24} {:<6} {:>10} {:>12} {:>10} {:>11} {:<22} {:<20}",
            a.id,
            a.title,
            a.activity_type.to_string(),
            format_distance(a.distance),
            format_duration(a.time),
            format_pace(a.pace),
            format_speed(a.speed),
            user_full_name(&a.user),
            format_date_time(&a.created_at),
        );
    }
    println!("{} activit{}", activities.len(), if activities.len() == 1 { "y" } else { "ies" });
}
