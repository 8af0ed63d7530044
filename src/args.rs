use clap::Parser;

use crate::github_client::DEFAULT_API_URL;

/// Browse a GitHub user's repositories page by page, with the languages each
/// repository is written in.
#[derive(Debug, Parser)]
#[clap(
    author,
    version,
    about,
    long_about = "Search a GitHub user's public repositories, page through the results and see the language breakdown of every repository on the page."
)]
pub struct Args {
    /// GitHub username whose repositories to list.
    #[clap(short, long)]
    pub username: Option<String>,

    /// Page to start on.
    #[clap(short, long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
    pub page: u32,

    /// Number of repositories per page.
    #[clap(short = 's', long, default_value = "10", value_parser = clap::value_parser!(u32).range(1..))]
    pub per_page: u32,

    /// Root URL of the GitHub REST API.
    #[clap(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Keep prompting for commands after the first search.
    #[clap(short, long)]
    pub interactive: bool,

    /// Write the final search state as JSON to this file.
    #[clap(short, long, value_name = "FILE")]
    pub output: Option<String>,

    /// Log filter used when RUST_LOG is not set.
    #[clap(long, default_value = "warn")]
    pub log_level: String,
}
