use grocer_core::{ListSession, MemoryLocation};

use crate::commands::common::{
    format_item_lines, format_total_line, open_session, print_session_url, use_color, ListView,
};
use crate::config::CliConfig;
use crate::error::CliError;

pub fn run_remove(id: &str, url: Option<&str>, config: &CliConfig) -> Result<(), CliError> {
    let id = normalize_item_id(id)?;
    let mut session = open_session(url, config)?;
    if !session.remove(&id) {
        eprintln!("No item with id {id} on the list");
    }
    print_session_url(&session);
    Ok(())
}

pub fn run_toggle(id: &str, url: Option<&str>, config: &CliConfig) -> Result<(), CliError> {
    let id = normalize_item_id(id)?;
    let mut session = open_session(url, config)?;
    if !session.toggle_taken(&id) {
        eprintln!("No item with id {id} on the list");
    }
    print_session_url(&session);
    Ok(())
}

pub fn run_show(as_json: bool, url: Option<&str>, config: &CliConfig) -> Result<(), CliError> {
    let session = open_session(url, config)?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&list_view(&session))?);
    } else {
        for line in render_list(&session, use_color()) {
            println!("{line}");
        }
    }

    Ok(())
}

pub fn list_view(session: &ListSession<MemoryLocation>) -> ListView<'_> {
    let store = session.store();
    ListView {
        items: store.items(),
        total: store.total(),
        savings: store.savings(),
        taken: store.taken_count(),
        share_link: session.share_link(),
    }
}

pub fn render_list(session: &ListSession<MemoryLocation>, color: bool) -> Vec<String> {
    let store = session.store();
    if store.is_empty() {
        return vec![
            "Your list is empty.".to_string(),
            "Add products from the search results!".to_string(),
        ];
    }

    let mut lines = vec![format!(
        "My Buy List ({} items, {} taken)",
        store.len(),
        store.taken_count()
    )];
    lines.extend(format_item_lines(store.items(), color));
    lines.push(format_total_line(store.total()));
    lines
}

pub fn normalize_item_id(id: &str) -> Result<String, CliError> {
    let id = id.trim();
    if id.is_empty() {
        Err(CliError::EmptyField("Item ID"))
    } else {
        Ok(id.to_string())
    }
}
