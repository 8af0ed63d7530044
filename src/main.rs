use clap::Parser;
use dotenv::dotenv;
use github_repo_explorer_lib::{
    render_state, Args, Command, GitHubClient, Notification, RepoService, SearchController,
    SearchHandle, HELP,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::error::Error;
use std::io::Write;
use tokio::fs::OpenOptions;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio::time::Duration;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    dotenv().ok();
    let args = Args::parse();
    init_logging(&args.log_level);

    let client = GitHubClient::new(args.api_url.clone())?;
    info!("Using GitHub API at {}", client.base_url());

    let (notifications, mut notification_rx) = mpsc::unbounded_channel();
    let controller = SearchController::new(client, notifications);

    // No username yet, so these only position the pagination
    controller.change_page_size(args.per_page);
    controller.go_to_page(args.page);

    match args.username.as_deref().map(str::trim) {
        Some(username) if !username.is_empty() => {
            if let Some(handle) = controller.search(username) {
                show(&controller, handle, &mut notification_rx).await?;
            }
        }
        _ if args.interactive => println!("{}", render_state(&controller.state())),
        _ => {
            error!("No username given");
            return Err("pass --username, or --interactive to enter one".into());
        }
    }

    if args.interactive {
        interactive(&controller, &mut notification_rx).await?;
    }

    if let Some(path) = &args.output {
        save_state(&controller, path).await?;
    }

    Ok(())
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    // Logs go to stderr so the rendered results stay clean on stdout
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

/// Wait for a search to settle behind a spinner, then print the result.
async fn show<S: RepoService>(
    controller: &SearchController<S>,
    handle: SearchHandle,
    notification_rx: &mut UnboundedReceiver<Notification>,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let state = controller.state();
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")?
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb.set_message(format!(
        "Searching '{}' - page {}",
        state.username,
        state.current_page()
    ));
    pb.enable_steady_tick(Duration::from_millis(80));

    handle.settled().await;
    pb.finish_and_clear();

    while let Ok(notification) = notification_rx.try_recv() {
        eprintln!("{}", notification.message);
    }
    print!("{}", render_state(&controller.state()));
    Ok(())
}

async fn interactive<S: RepoService>(
    controller: &SearchController<S>,
    notification_rx: &mut UnboundedReceiver<Notification>,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    println!("{}", HELP);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };
        debug!("Command: {:?}", command);

        let state = controller.state();
        let handle = match command {
            Command::Search(username) => controller.search(&username),
            Command::Page(page) => controller.go_to_page(page),
            Command::Next if !state.has_more_repos() => {
                println!("Already on the last page.");
                continue;
            }
            Command::Next => controller.go_to_page(state.current_page().saturating_add(1)),
            Command::Prev => controller.go_to_page(state.current_page().saturating_sub(1)),
            Command::Size(size) => controller.change_page_size(size),
            Command::Help => {
                println!("{}", HELP);
                continue;
            }
            Command::Quit => break,
        };

        match handle {
            Some(handle) => show(controller, handle, notification_rx).await?,
            None if controller.state().username.is_empty() => {
                println!("Search for a username first.")
            }
            None => println!("Pages and page sizes start at 1."),
        }
    }

    Ok(())
}

async fn save_state<S: RepoService>(
    controller: &SearchController<S>,
    path: &str,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let json = serde_json::to_string_pretty(&controller.state())?;

    let mut file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)
        .await?;
    file.write_all(json.as_bytes()).await?;
    file.write_all(b"\n").await?;
    file.flush().await?;

    info!("Saved search state to '{}'", path);
    Ok(())
}
