use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use comfy_table::{modifiers, presets, ContentArrangement, Table};
use terminal_size::{terminal_size, Width};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};
use yansi::Paint;

use lucidia::catalog::{all_plans, plans_for_interval};
use lucidia::config::{self, DEFAULT_API_PORT, DEFAULT_SITE_PORT};
use lucidia::models::{BillingInterval, Plan};
use lucidia::routes::{build_api, build_site};
use lucidia::server::{self, ServerError};
use lucidia::utils::hostname_from_url;

#[derive(Parser)]
#[command(
    name = "lucidia",
    author,
    version,
    about = "Lucidia marketing site and billing backend",
    long_about = r#"Lucidia serves the marketing site (landing and pricing pages) and the billing API it hands checkout off to.

Examples:
  1) Run the billing API and the site side by side:
      lucidia api --port 8000
      lucidia serve --port 3000
  2) Export the site as static files:
      lucidia export --out dist
  3) Show the yearly plans:
      lucidia plans --interval year
"#,
    after_help = "Use `lucidia <subcommand> --help` to get subcommand specific options."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
    /// Disable colorized output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the site server (landing, pricing, /api proxy)
    Serve {
        /// Host to bind to (defaults to $HOST or 127.0.0.1)
        #[arg(long)]
        host: Option<String>,
        /// Port to bind to (defaults to $PORT or 3000)
        #[arg(long)]
        port: Option<u16>,
        /// Path to .env file
        #[arg(long)]
        env_file: Option<String>,
        /// Path to a custom stylesheet to serve instead of the default
        #[arg(long)]
        stylesheet: Option<String>,
    },
    /// Start the billing API that /api is proxied to
    Api {
        /// Host to bind to (defaults to $HOST or 127.0.0.1)
        #[arg(long)]
        host: Option<String>,
        /// Port to bind to (defaults to $PORT or 8000)
        #[arg(long)]
        port: Option<u16>,
        /// Path to .env file
        #[arg(long)]
        env_file: Option<String>,
    },
    /// Render the site into static files
    Export {
        /// Output directory
        #[arg(long, default_value = "dist")]
        out: PathBuf,
        /// Path prefix the site will be hosted under (e.g. /lucidia)
        #[arg(long, default_value = "")]
        base_path: String,
    },
    /// List pricing plans
    Plans {
        /// Only show plans for this billing interval (month or year)
        #[arg(long)]
        interval: Option<BillingInterval>,
    },
    /// Validate configuration and probe the backend health endpoint
    #[command(
        about = "Validate configuration and ensure the backend is reachable.",
        long_about = "Print the effective configuration, then request ${API_URL}/health to confirm the site can reach the backend it proxies to."
    )]
    CheckConfig { env_file: Option<String> },
}

fn fail(context: &str, e: impl std::fmt::Display) -> ! {
    tracing::error!(%e, "{}", context);
    eprintln!("{}: {}", context.red(), e);
    process::exit(1);
}

fn report_server_error(e: ServerError) -> ! {
    if let ServerError::Bind { .. } = e {
        eprintln!(
            "{}",
            "Please stop any process using this port, or start the server with a different --port value.".yellow()
        );
    }
    fail("Server stopped", e)
}

fn print_plans(plans: &[&Plan]) {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    if let Some((Width(w), _)) = terminal_size() {
        table.set_width(w.saturating_sub(4));
    }
    table.set_header(vec!["ID", "Name", "Price", "Features", "Notes"]);
    for plan in plans {
        let mut notes = Vec::new();
        if plan.popular {
            notes.push("popular");
        }
        if let Some(s) = plan.savings {
            notes.push(s);
        }
        table.add_row(vec![
            plan.id.to_string(),
            plan.name.to_string(),
            format!("{}{}", plan.price_label(), plan.interval_label()),
            plan.features.join(", "),
            notes.join(", "),
        ]);
    }
    println!("\n{table}\n");
}

async fn check_config(env_file: Option<&str>) {
    config::load_env_file(env_file);
    let api_url = config::get_api_url();
    let public_base_url = config::get_public_base_url();
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.set_header(vec!["Setting", "Value"]);
    table.add_row(vec!["API_URL", api_url.as_str()]);
    table.add_row(vec!["PUBLIC_BASE_URL", public_base_url.as_str()]);
    let key_state = if config::get_stripe_secret_key().is_empty() { "missing" } else { "set" };
    let hook_state = if config::get_stripe_webhook_secret().is_empty() { "missing" } else { "set" };
    table.add_row(vec!["STRIPE_SECRET_KEY", key_state]);
    table.add_row(vec!["STRIPE_WEBHOOK_SECRET", hook_state]);
    println!("\n{table}\n");

    let client = match lucidia::api::build_http_client(10) {
        Ok(c) => c,
        Err(e) => fail("Failed to create HTTP client", e),
    };
    let health_url = format!("{}/health", api_url);
    match client.get(&health_url).send().await {
        Ok(resp) if resp.status().is_success() => {
            println!(
                "{} {}",
                "Backend reachable at".green(),
                hostname_from_url(&api_url).cyan()
            );
        }
        Ok(resp) => {
            eprintln!("{} {}", "Backend answered with".red(), resp.status());
            process::exit(1);
        }
        Err(e) => fail("Backend unreachable", e),
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    if cli.no_color {
        yansi::whenever(yansi::Condition::NEVER);
    }

    // With no subcommand, serve the site
    let command = cli.command.unwrap_or(Commands::Serve {
        host: None,
        port: None,
        env_file: None,
        stylesheet: None,
    });

    match command {
        Commands::Serve {
            host,
            port,
            env_file,
            stylesheet,
        } => {
            config::load_env_file(env_file.as_deref());
            let custom_css = stylesheet.map(|path| match std::fs::read_to_string(&path) {
                Ok(css) => {
                    tracing::info!("Loaded custom stylesheet from {}", path);
                    css
                }
                Err(e) => fail(&format!("Failed to read custom stylesheet at {}", path), e),
            });
            let state = match server::site_state_from_env(custom_css) {
                Ok(s) => s,
                Err(e) => fail("Failed to build site state", e),
            };
            let host = host.unwrap_or_else(config::get_host);
            let port = port.unwrap_or_else(|| config::get_port(DEFAULT_SITE_PORT));
            println!(
                "{} {} {} {}",
                "Site running on".green(),
                format!("http://{}:{}", host, port).cyan(),
                "proxying /api to".green(),
                state.api_url.as_str().cyan()
            );
            if let Err(e) = server::serve(build_site(state), &host, port).await {
                report_server_error(e);
            }
        }
        Commands::Api {
            host,
            port,
            env_file,
        } => {
            config::load_env_file(env_file.as_deref());
            let state = match server::api_state_from_env() {
                Ok(s) => s,
                Err(e) => fail("Failed to build API state", e),
            };
            let host = host.unwrap_or_else(config::get_host);
            let port = port.unwrap_or_else(|| config::get_port(DEFAULT_API_PORT));
            println!(
                "{} {}",
                "Billing API running on".green(),
                format!("http://{}:{}", host, port).cyan()
            );
            if let Err(e) = server::serve(build_api(state), &host, port).await {
                report_server_error(e);
            }
        }
        Commands::Export { out, base_path } => {
            match lucidia::export::export_site(&out, &base_path).await {
                Ok(files) => {
                    for f in &files {
                        println!("  {}", f.display());
                    }
                    println!("{} {}", "Exported".green(), out.display().to_string().cyan());
                }
                Err(e) => fail("Export failed", e),
            }
        }
        Commands::Plans { interval } => match interval {
            Some(i) => print_plans(&plans_for_interval(i)),
            None => print_plans(&all_plans().iter().collect::<Vec<_>>()),
        },
        Commands::CheckConfig { env_file } => check_config(env_file.as_deref()).await,
    }
}
