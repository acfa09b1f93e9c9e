use anyhow::Result;
use clap::{Parser, Subcommand};

mod cli;

/// recipebox - Recipe management API
#[derive(Parser)]
#[command(name = "recipebox")]
#[command(about = "Recipe, tag and ingredient API server", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run database migrations
    Migrate,
    /// Drop database if exists and recreate with migrations
    Reset,
    /// Create a staff account with every permission
    CreateSuperuser {
        #[arg(long)]
        email: String,

        #[arg(long)]
        name: String,

        #[arg(long)]
        password: String,
    },
    /// Activate or deactivate an account
    SetStatus {
        #[arg(long)]
        email: String,

        #[arg(value_enum)]
        status: cli::user::Status,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = recipebox::config::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    recipebox::observability::init_observability(&config.observability)?;

    match cli.command {
        Commands::Serve { host, port } => cli::server::serve(config, host, port).await,
        Commands::Migrate => cli::migrate::migrate(config).await,
        Commands::Reset => cli::migrate::reset(config).await,
        Commands::CreateSuperuser {
            email,
            name,
            password,
        } => cli::user::create_superuser(config, email, name, password).await,
        Commands::SetStatus { email, status } => {
            cli::user::set_status(config, email, status).await
        }
    }
}
