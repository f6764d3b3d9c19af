use anyhow::Result;
use clap::{Parser, Subcommand};
use ideaboard::commands::{self, register::RegisterArgs, submit::SubmitArgs, AppContext, Reported};
use ideaboard::config::{
  ClientConfig, RefreshPolicy, DEFAULT_BASE_URL, DEFAULT_ENRICH_CONCURRENCY, DEFAULT_TIMEOUT_SECS,
};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(name = "ideaboard")]
#[command(about = "Submit, review and track service improvement ideas")]
#[command(version)]
struct Cli {
  /// API root of the review server
  #[arg(long, env = "IDEABOARD_API_URL", default_value = DEFAULT_BASE_URL)]
  api_url: String,

  /// Request timeout in seconds
  #[arg(long, env = "IDEABOARD_TIMEOUT", default_value_t = DEFAULT_TIMEOUT_SECS)]
  timeout: u64,

  /// Maximum detail fetches in flight while filling in descriptions
  #[arg(long, env = "IDEABOARD_CONCURRENCY", default_value_t = DEFAULT_ENRICH_CONCURRENCY)]
  concurrency: usize,

  /// What to re-fetch after approving or rejecting
  #[arg(long, value_enum, default_value_t = RefreshPolicy::FullReload)]
  refresh: RefreshPolicy,

  /// Enable verbose logging
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Sign in and remember the session
  Login {
    username: String,
    /// Password (or use IDEABOARD_PASSWORD env var)
    #[arg(long, env = "IDEABOARD_PASSWORD", hide_env_values = true)]
    password: String,
  },
  /// Create an account and sign in
  Register {
    username: String,
    #[arg(long)]
    display_name: String,
    #[arg(long)]
    email: String,
    #[arg(long, env = "IDEABOARD_PASSWORD", hide_env_values = true)]
    password: String,
    /// Register as an SDM reviewer instead of a service engineer
    #[arg(long)]
    sdm: bool,
  },
  /// Forget the saved session
  Logout,
  /// Show the signed-in user
  Whoami,
  /// Show your dashboard (ideas for engineers, worklist for SDMs)
  Dashboard {
    /// Print the dashboard as JSON
    #[arg(long)]
    json: bool,
  },
  /// Show top contributors and recent approvals
  Leaderboard,
  /// List SDMs ideas can be assigned to
  Sdms,
  /// Submit a new idea for review
  Submit {
    title: String,
    #[arg(long, value_parser = ["Security", "Automation", "Innovation"])]
    category: String,
    #[arg(long)]
    service_area: String,
    /// 1-5 or a label such as "Very High"
    #[arg(long, default_value = "3")]
    benefit: String,
    /// Id of the reviewing SDM (see 'ideaboard sdms')
    #[arg(long)]
    sdm: String,
    /// The idea is already in place
    #[arg(long)]
    implemented: bool,
    #[arg(long)]
    security_gap: Option<String>,
    #[arg(long)]
    possible_solution: Option<String>,
    #[arg(long)]
    automation_opportunity: Option<String>,
    #[arg(long)]
    automation_solution: Option<String>,
    #[arg(long)]
    innovative_idea: Option<String>,
  },
  /// Approve a pending idea
  Approve { id: String },
  /// Reject a pending idea with a reason
  Reject { id: String, reason: String },
  /// Find previously submitted ideas resembling this one
  Similar { id: String },
  /// Show the full record of one idea
  Show { id: String },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
  let cli = Cli::parse();

  // Terminal lines already come from bentley; keep its mirrored events out
  let env_filter = std::env::var("IDEABOARD_LOG").ok().filter(|value| !value.trim().is_empty());
  if cli.verbose || env_filter.is_some() {
    let directives = env_filter.unwrap_or_else(|| "ideaboard=debug,warn".to_string());
    let filter = EnvFilter::try_new(format!("{directives},bentley=off"))
      .unwrap_or_else(|_| EnvFilter::new("warn,bentley=off"));
    tracing_subscriber::registry().with(fmt::layer().with_writer(std::io::stderr)).with(filter).init();
  }
  bentley::set_verbose(cli.verbose);

  let config = ClientConfig {
    base_url: cli.api_url,
    timeout_secs: cli.timeout,
    enrich_concurrency: cli.concurrency,
    refresh_policy: cli.refresh,
  };
  let ctx = AppContext::new(config)?;
  bentley::verbose!(&format!("API: {}", ctx.config.base_url));

  let result = match cli.command {
    Commands::Login { username, password } => commands::login::handle(&ctx, username, password).await,
    Commands::Register { username, display_name, email, password, sdm } => {
      let args = RegisterArgs { username, display_name, email, password, sdm };
      commands::register::handle(&ctx, args).await
    }
    Commands::Logout => commands::logout::handle(&ctx).await,
    Commands::Whoami => commands::whoami::handle(&ctx).await,
    Commands::Dashboard { json } => commands::dashboard::handle(&ctx, json).await,
    Commands::Leaderboard => commands::leaderboard::handle(&ctx).await,
    Commands::Sdms => commands::sdms::handle(&ctx).await,
    Commands::Submit {
      title,
      category,
      service_area,
      benefit,
      sdm,
      implemented,
      security_gap,
      possible_solution,
      automation_opportunity,
      automation_solution,
      innovative_idea,
    } => {
      let args = SubmitArgs {
        title,
        category,
        service_area,
        benefit,
        sdm,
        implemented,
        security_gap,
        possible_solution,
        automation_opportunity,
        automation_solution,
        innovative_idea,
      };
      commands::submit::handle(&ctx, args).await
    }
    Commands::Approve { id } => commands::approve::handle(&ctx, id).await,
    Commands::Reject { id, reason } => commands::reject::handle(&ctx, id, reason).await,
    Commands::Similar { id } => commands::similar::handle(&ctx, id).await,
    Commands::Show { id } => commands::show::handle(&ctx, id).await,
  };

  // The notifier already printed these
  if let Err(err) = &result {
    if err.is::<Reported>() {
      tracing::debug!(error = %err, "command failed");
      std::process::exit(1);
    }
  }
  result
}
