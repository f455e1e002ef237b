//! Terminal client for the link backend.
//!
//! Offers the console's views without a browser: sign in, browse grouped
//! links, generate batches, inspect a link's last seven days, delete links.
//!
//! # Usage
//!
//! ```bash
//! # Sign in and print tokens
//! cargo run --bin admin -- login
//!
//! # Links grouped by destination, filtered
//! cargo run --bin admin -- links --query promo
//!
//! # Generate 20 links for one destination
//! cargo run --bin admin -- generate --url https://example.com/sale --count 20
//!
//! # Clicks over the last 7 days
//! cargo run --bin admin -- stats abc123
//!
//! # Delete a link
//! cargo run --bin admin -- delete abc123
//! ```
//!
//! # Environment Variables
//!
//! - `BACKEND_URL` (optional): backend base URL, default `http://localhost:8000`
//! - `LINK_CONSOLE_TOKEN` (optional): backend access token; prompts for
//!   username and password when unset

use link_console::application::services::{LinkService, StatsService};
use link_console::domain::entities::{BulkRequest, DEFAULT_CODE_LENGTH, DEFAULT_COUNT};
use link_console::domain::gateways::LinkGateway;
use link_console::domain::view_model::{LinkQuery, TargetSelector};
use link_console::infrastructure::http::HttpLinkGateway;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input, Password};
use std::sync::Arc;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const BAR_WIDTH: u64 = 40;

/// CLI client for the link backend.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Backend base URL
    #[arg(long, env = "BACKEND_URL", default_value = "http://localhost:8000")]
    backend: String,

    /// Backend access token (skips the sign-in prompt)
    #[arg(long, env = "LINK_CONSOLE_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and print the access and refresh tokens
    Login,

    /// List links grouped by destination
    Links {
        /// Case-insensitive text matched against URLs and codes
        #[arg(short, long, default_value = "")]
        query: String,

        /// Only show links for this exact destination
        #[arg(short, long)]
        target: Option<String>,
    },

    /// Generate a batch of links for one destination
    Generate {
        /// Destination URL
        #[arg(short, long)]
        url: String,

        /// Number of links to create (1-200)
        #[arg(short, long, default_value_t = DEFAULT_COUNT)]
        count: u32,

        /// Length of each generated code (4-32)
        #[arg(short = 'l', long, default_value_t = DEFAULT_CODE_LENGTH)]
        code_length: u32,

        /// Expiry as RFC 3339, e.g. 2030-01-01T00:00:00Z
        #[arg(short, long)]
        expires_at: Option<DateTime<Utc>>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Show totals and the last 7 days of clicks for a link
    Stats {
        /// Short code
        code: String,
    },

    /// Delete a link
    Delete {
        /// Short code
        code: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let gateway = Arc::new(
        HttpLinkGateway::new(&cli.backend, REQUEST_TIMEOUT)
            .with_context(|| format!("Cannot use backend URL {}", cli.backend))?,
    );

    match cli.command {
        Commands::Login => login(&gateway).await?,
        Commands::Links { query, target } => {
            let token = access_token(cli.token, &gateway).await?;
            list_links(gateway, &token, query, target).await?
        }
        Commands::Generate {
            url,
            count,
            code_length,
            expires_at,
            yes,
        } => {
            let token = access_token(cli.token, &gateway).await?;
            let mut request = BulkRequest::new(url, count, code_length);
            request.expires_at = expires_at;
            generate(gateway, &token, request, yes).await?
        }
        Commands::Stats { code } => {
            let token = access_token(cli.token, &gateway).await?;
            show_stats(gateway, &token, &code).await?
        }
        Commands::Delete { code, yes } => {
            let token = access_token(cli.token, &gateway).await?;
            delete(gateway, &token, &code, yes).await?
        }
    }

    Ok(())
}

/// Uses `--token` when given, otherwise signs in interactively.
async fn access_token(token: Option<String>, gateway: &HttpLinkGateway) -> Result<String> {
    match token {
        Some(token) => Ok(token),
        None => Ok(sign_in(gateway).await?.0),
    }
}

/// Prompts for credentials and returns `(access, refresh)`.
async fn sign_in(gateway: &HttpLinkGateway) -> Result<(String, String)> {
    println!(
        "{} {}",
        "🔐 Sign in to".bright_blue().bold(),
        gateway.base_url().as_str().cyan()
    );

    let username: String = Input::new().with_prompt("Username").interact_text()?;
    let password = Password::new().with_prompt("Password").interact()?;

    let credentials = gateway
        .authenticate(username.trim(), &password)
        .await
        .context("Sign-in failed")?;

    println!("{}", "✅ Signed in".green());
    println!();

    Ok((credentials.access, credentials.refresh))
}

/// Signs in and prints both tokens.
async fn login(gateway: &HttpLinkGateway) -> Result<()> {
    let (access, refresh) = sign_in(gateway).await?;

    println!("{}", "Tokens:".bright_white().bold());
    println!("  Access:  {}", access.bright_yellow());
    println!("  Refresh: {}", refresh.bright_black());
    println!();
    println!("{}", "Reuse the access token with:".bright_white());
    println!("  export {}={}", "LINK_CONSOLE_TOKEN".bright_cyan(), access);
    println!();

    Ok(())
}

/// Prints links grouped by destination, most recently created group first.
///
/// # Output Format
///
/// ```text
/// 🔗 Links (2 destinations, 3 links)
///
///   https://example.com/sale            2 links   14 clicks
///     https://s.test/abc123             9 clicks  Active
///     https://s.test/xyz789             5 clicks  Expired
/// ```
async fn list_links(
    gateway: Arc<HttpLinkGateway>,
    token: &str,
    query: String,
    target: Option<String>,
) -> Result<()> {
    let service = LinkService::new(gateway);
    let query = LinkQuery::new(query, TargetSelector::parse(target.as_deref()));

    let view = service.links_view(token, &query).await?;
    let now = Utc::now();

    println!(
        "{} ({} destinations, {} links)",
        "🔗 Links".bright_blue().bold(),
        view.total_groups,
        view.total_links
    );
    println!();

    if view.is_empty() {
        println!("{}", "  No links yet".yellow());
        println!();
        println!(
            "  Create some with: {} admin -- generate --url <URL>",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    if view.groups.is_empty() {
        println!("{}", "  No links match the filters".yellow());
        return Ok(());
    }

    for group in &view.groups {
        println!(
            "  {:<40} {:>4} links {:>6} clicks",
            group.target_url.bright_white().bold(),
            group.link_count(),
            group.total_clicks
        );

        for link in &group.links {
            let status = match link.status_label(now) {
                "Active" => "Active".green(),
                other => other.red(),
            };
            println!(
                "    {:<38} {:>6} clicks  {}",
                link.short_url.cyan(),
                link.click_count,
                status
            );
        }
        println!();
    }

    println!(
        "  Showing: {} of {} links",
        view.visible_links().to_string().bright_white().bold(),
        view.total_links
    );
    println!();

    Ok(())
}

/// Generates a batch after confirmation and prints the new short URLs.
async fn generate(
    gateway: Arc<HttpLinkGateway>,
    token: &str,
    request: BulkRequest,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "✨ Generate links".bright_blue().bold());
    println!();
    println!("  Destination: {}", request.target_url.cyan());
    println!("  Count:       {}", request.count);
    println!("  Code length: {}", request.code_length);
    if let Some(expires_at) = request.expires_at {
        println!("  Expires:     {}", expires_at.format("%Y-%m-%d %H:%M UTC"));
    }
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create these links?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let service = LinkService::new(gateway);
    let outcome = service.generate(token, request, Utc::now()).await?;

    println!();
    if outcome.partial {
        println!("{}", format!("⚠️  {}", outcome.summary()).yellow().bold());
    } else {
        println!("{}", format!("✅ {}", outcome.summary()).green().bold());
    }
    println!();

    for link in &outcome.links {
        println!("  {}", link.short_url.bright_yellow());
    }
    println!();

    Ok(())
}

/// Prints totals and a horizontal bar chart of the last 7 days.
///
/// # Output Format
///
/// ```text
/// 📊 https://s.test/abc123
///
///   Target:       https://example.com/sale
///   Status:       Active
///   Total clicks: 42
///
///   12-29  ████████                  4
///   12-30                            0
///   ...
/// ```
async fn show_stats(gateway: Arc<HttpLinkGateway>, token: &str, code: &str) -> Result<()> {
    let service = StatsService::new(gateway);
    let view = service.stats_view(token, code, Utc::now()).await?;

    println!("{} {}", "📊".bright_blue(), view.link.short_url.bright_blue().bold());
    println!();
    println!("  Target:       {}", view.link.target_url.cyan());
    println!("  Status:       {}", view.status);
    println!(
        "  Total clicks: {}",
        view.total_clicks.to_string().bright_green().bold()
    );
    println!("  Last 7 days:  {}", view.week_total());
    println!();

    let max = view.series.iter().map(|b| b.count).max().unwrap_or(0);

    for bucket in &view.series {
        let width = if max == 0 {
            0
        } else {
            (bucket.count * BAR_WIDTH).div_ceil(max)
        };
        println!(
            "  {}  {} {}",
            bucket.label().bright_black(),
            format!("{:<pad$}", "█".repeat(width as usize), pad = BAR_WIDTH as usize).green(),
            bucket.count
        );
    }
    println!();

    Ok(())
}

/// Deletes a link after confirmation (default: No).
async fn delete(gateway: Arc<HttpLinkGateway>, token: &str, code: &str, skip_confirm: bool) -> Result<()> {
    println!("{}", "🗑️  Delete link".bright_blue().bold());
    println!();
    println!("  Code: {}", code.cyan());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this link?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    LinkService::new(gateway).delete(token, code).await?;

    println!();
    println!("{}", "✅ Link deleted".green().bold());
    println!();

    Ok(())
}
