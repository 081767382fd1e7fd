use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::{Color, Colorize};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use browse::{BrowseConfig, BrowseInput, BrowseOrchestrator, BrowseView, Theme, run_browse_loop};
use catalog::{MovieRecord, SortMode, TmdbClient};
use curation::Curator;
use identity::{AuthFeedback, Session, SignInForm, SignUpForm};

/// ReelBrowse - Movie Browser
#[derive(Parser)]
#[command(name = "reel-browse")]
#[command(about = "Browse, sort and search movies from a TMDB-compatible catalog", long_about = None)]
struct Cli {
    /// Colour theme (overrides REEL_THEME)
    #[arg(long, global = true)]
    theme: Option<Theme>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the popular listing with its carousel
    Popular {
        /// Sort order: vote, recent or popular
        #[arg(long)]
        sort: Option<SortMode>,

        /// Grid page to show
        #[arg(long, default_value = "1", allow_negative_numbers = true)]
        page: i64,
    },

    /// Search movies by title
    Search {
        /// Free-text query
        query: String,

        /// Sort order: vote, recent or popular
        #[arg(long)]
        sort: Option<SortMode>,

        /// Grid page to show
        #[arg(long, default_value = "1", allow_negative_numbers = true)]
        page: i64,
    },

    /// Type to search; `:sort <mode>` and `:page <n>` change the view
    Interactive,

    /// Create an account
    SignUp {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Password confirmation
        #[arg(long)]
        confirm: String,
    },

    /// Sign in with email and password
    SignIn {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = BrowseConfig::from_env().context("Failed to load configuration")?;
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Popular { sort, page } => handle_popular(&config, sort, page).await?,
        Commands::Search { query, sort, page } => {
            handle_search(&config, query, sort, page).await?
        }
        Commands::Interactive => handle_interactive(&config).await?,
        Commands::SignUp {
            name,
            email,
            password,
            confirm,
        } => {
            let form = SignUpForm {
                name,
                email,
                password,
                confirm_password: confirm,
            };
            handle_sign_up(&config, form).await?
        }
        Commands::SignIn { email, password } => {
            handle_sign_in(&config, SignInForm { email, password }).await?
        }
    }

    Ok(())
}

fn build_orchestrator(config: &BrowseConfig) -> Result<BrowseOrchestrator> {
    let client = TmdbClient::new(config.tmdb.clone()).context("Failed to create catalog client")?;
    let curator = Curator::new().with_page_size(config.page_size);
    Ok(BrowseOrchestrator::new(Arc::new(client), curator))
}

/// Handle the 'popular' command
async fn handle_popular(config: &BrowseConfig, sort: Option<SortMode>, page: i64) -> Result<()> {
    let mut orchestrator = build_orchestrator(config)?;

    let start = Instant::now();
    orchestrator.refresh().await;
    tracing::debug!("Popular listing ready in {:.2?}", start.elapsed());

    if let Some(mode) = sort {
        orchestrator.set_sort_mode(mode);
    }
    orchestrator.set_page(page);

    print_view(&orchestrator.view(), config);
    Ok(())
}

/// Handle the 'search' command
async fn handle_search(
    config: &BrowseConfig,
    query: String,
    sort: Option<SortMode>,
    page: i64,
) -> Result<()> {
    let mut orchestrator = build_orchestrator(config)?;

    // An empty query falls back to the popular listing
    if !orchestrator.search(query).await {
        orchestrator.refresh().await;
    }
    if let Some(mode) = sort {
        orchestrator.set_sort_mode(mode);
    }
    orchestrator.set_page(page);

    print_view(&orchestrator.view(), config);
    Ok(())
}

/// Parse one line of interactive input
fn parse_input(line: &str) -> Option<BrowseInput> {
    if let Some(command) = line.strip_prefix(':') {
        let mut parts = command.split_whitespace();
        return match (parts.next(), parts.next()) {
            (Some("sort"), Some(mode)) => Some(BrowseInput::Sort(SortMode::parse_lenient(mode))),
            (Some("page"), Some(n)) => n.parse().ok().map(BrowseInput::Page),
            _ => None,
        };
    }
    Some(BrowseInput::Text(line.to_string()))
}

/// Handle the 'interactive' command
async fn handle_interactive(config: &BrowseConfig) -> Result<()> {
    let orchestrator = build_orchestrator(config)?;
    let (tx, rx) = mpsc::unbounded_channel();

    println!(
        "{}",
        "Type to search (empty line to browse), :sort vote|recent|popular, :page N. Ctrl-D quits."
            .color(palette(config.theme).muted)
    );

    let reader = tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            match parse_input(line.trim_end()) {
                Some(input) => {
                    if tx.send(input).is_err() {
                        break;
                    }
                }
                None => eprintln!("Unrecognized command: {}", line),
            }
        }
    });

    run_browse_loop(orchestrator, rx, config.debounce, |view| print_view(view, config)).await;
    reader.await.context("Input reader panicked")?;
    Ok(())
}

/// Handle the 'sign-up' command
async fn handle_sign_up(config: &BrowseConfig, form: SignUpForm) -> Result<()> {
    let client = config.identity_client()?;
    let feedback = identity::sign_up(&client, &form).await;
    print_feedback(&feedback, config.theme);
    Ok(())
}

/// Handle the 'sign-in' command
async fn handle_sign_in(config: &BrowseConfig, form: SignInForm) -> Result<()> {
    let client = config.identity_client()?;
    let (feedback, session) = identity::sign_in(&client, &form).await;
    print_feedback(&feedback, config.theme);
    if let Some(session) = session {
        print_session(&session, config.theme);
    }
    Ok(())
}

// =============================================================================
// Rendering
// =============================================================================

struct Palette {
    heading: Color,
    accent: Color,
    muted: Color,
    text: Color,
}

fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Dark => Palette {
            heading: Color::BrightWhite,
            accent: Color::BrightYellow,
            muted: Color::BrightBlack,
            text: Color::White,
        },
        Theme::Light => Palette {
            heading: Color::Blue,
            accent: Color::Magenta,
            muted: Color::BrightBlack,
            text: Color::Black,
        },
    }
}

fn sort_label(mode: SortMode) -> &'static str {
    match mode {
        SortMode::Rating => "별점순",
        SortMode::Recency => "최신순",
        SortMode::Popularity => "인기순",
        SortMode::Unsorted => "기본순",
    }
}

fn format_record(record: &MovieRecord, config: &BrowseConfig) -> String {
    let p = palette(config.theme);
    let year = record
        .year()
        .map(|y| y.to_string())
        .unwrap_or_else(|| "????".to_string());
    let poster = record
        .poster_url(&config.image_base)
        .unwrap_or_else(|| "-".to_string());
    format!(
        "{} ({}) {} {}",
        record.title.color(p.text),
        year,
        format!("★{:.1}", record.rating).color(p.accent),
        poster.color(p.muted)
    )
}

/// Print the carousel, grid and pager for one view
fn print_view(view: &BrowseView, config: &BrowseConfig) {
    let p = palette(config.theme);

    let modes = SortMode::ALL
        .iter()
        .map(|mode| {
            if *mode == view.sort_mode {
                format!("[{}]", sort_label(*mode)).color(p.accent).bold().to_string()
            } else {
                sort_label(*mode).color(p.muted).to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("  ");
    println!("{}", modes);

    if !view.search_text.is_empty() {
        println!("{}", format!("Results for '{}':", view.search_text).color(p.heading).bold());
    }

    if let Some(carousel) = &view.carousel {
        if !carousel.is_empty() {
            println!("{}", "Top picks".color(p.heading).bold());
            for record in carousel {
                println!("  {} {}", "◆".color(p.accent), format_record(record, config));
            }
            println!();
        }
    }

    if view.is_empty() {
        println!("{}", "로딩 중...".color(p.muted));
    } else if view.grid.is_empty() {
        println!("{}", format!("No movies on page {}", view.page).color(p.muted));
    } else {
        let offset = usize::try_from(view.page - 1).unwrap_or(0) * config.page_size;
        for (i, record) in view.grid.iter().enumerate() {
            println!(
                "{:>4}. {}",
                (offset + i + 1).to_string().color(p.heading),
                format_record(record, config)
            );
        }
    }

    let pager = view
        .pager
        .iter()
        .map(|button| {
            if button.active {
                format!("[{}]", button.number).color(p.accent).bold().to_string()
            } else {
                button.number.to_string().color(p.muted).to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ");
    println!("{}  ({} movies)", pager, view.total);
}

fn print_feedback(feedback: &AuthFeedback, theme: Theme) {
    let p = palette(theme);
    match feedback {
        AuthFeedback::Message(text) => println!("{} {}", "✓".green(), text.color(p.text)),
        AuthFeedback::Error(text) => println!("{} {}", "✗".red(), text.red()),
    }
}

fn print_session(session: &Session, theme: Theme) {
    let p = palette(theme);
    let who = session
        .user
        .name()
        .or(session.user.email.as_deref())
        .unwrap_or(&session.user.id);
    println!("{}", format!("Signed in as {}", who).color(p.heading).bold());
    if let Some(expires_in) = session.expires_in {
        println!("{}", format!("Session expires in {}s", expires_in).color(p.muted));
    }
}
