use crate::controller::SearchState;

/// Plain-text rendering of the current search for the terminal.
pub fn render_state(state: &SearchState) -> String {
    if state.username.is_empty() {
        return "Enter a username to search.\n".to_string();
    }
    if state.is_searching {
        return format!("Searching repositories for '{}'...\n", state.username);
    }
    if state.no_repos {
        return format!(
            "'{}' has no public repositories on this page.\n",
            state.username
        );
    }
    if state.repos.is_empty() {
        return format!("No results for '{}'.\n", state.username);
    }

    let mut out = format!(
        "Repositories for '{}' ({} total)\n",
        state.username,
        state.total_count()
    );
    for repo in &state.repos {
        out.push_str(&format!("  {}", repo.name));
        if let Some(description) = repo.description.as_deref().filter(|d| !d.is_empty()) {
            out.push_str(&format!(" - {}", description));
        }
        out.push('\n');

        match state.languages_for(&repo.name) {
            Some(entry) if !entry.languages.is_empty() => {
                out.push_str(&format!("      languages: {}\n", entry.languages.join(", ")));
            }
            Some(_) => out.push_str("      languages: none detected\n"),
            None => {}
        }
    }

    out.push_str(&format!(
        "Page {} of {}",
        state.current_page(),
        state.pagination.total_pages()
    ));
    if state.has_more_repos() {
        out.push_str(" (more available: type 'next')");
    }
    out.push('\n');

    out
}
