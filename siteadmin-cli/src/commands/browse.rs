//! Interactive table browsing.

use std::io::Write;

use anyhow::Result;
use clap::Parser;
use siteadmin_lib::Record;
use siteadmin_lib::Resource;
use siteadmin_lib::table::{PageSize, TableView};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use super::parse_page_size;
use super::records::fetch;
use crate::columns::{columns_for, empty_message};
use crate::render;
use crate::session::Session;

const HELP: &str = "\
/TEXT   search (a bare / clears)
s KEY   sort by column, again to reverse (a bare s clears)
n, p    next / previous page
g N     go to page N
z N     rows per page (5, 10, 25, 50)
h       this help
q       quit";

#[derive(Parser, Debug)]
pub struct BrowseArgs {
    pub resource: Resource,

    /// Parent record for nested resources (gallery-images)
    #[arg(long)]
    pub parent: Option<String>,
}

/// One line of input at the browse prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Control {
    Search(String),
    Sort(Option<String>),
    Next,
    Prev,
    Goto(usize),
    PageSize(PageSize),
    Help,
    Quit,
}

fn parse_control(line: &str) -> Result<Control, String> {
    let line = line.trim();
    if let Some(term) = line.strip_prefix('/') {
        return Ok(Control::Search(term.to_string()));
    }

    let (command, arg) = match line.split_once(char::is_whitespace) {
        Some((command, arg)) => (command, arg.trim()),
        None => (line, ""),
    };
    match (command, arg) {
        ("s", "") => Ok(Control::Sort(None)),
        ("s", key) => Ok(Control::Sort(Some(key.to_string()))),
        ("n", "") => Ok(Control::Next),
        ("p", "") => Ok(Control::Prev),
        ("g", page) => match page.parse::<usize>() {
            Ok(page) if page >= 1 => Ok(Control::Goto(page)),
            _ => Err(format!("'{}' is not a page number", page)),
        },
        ("z", size) => parse_page_size(size).map(Control::PageSize),
        ("h" | "?", "") => Ok(Control::Help),
        ("q", "") => Ok(Control::Quit),
        _ => Err(format!("unknown command '{}' (h for help)", line)),
    }
}

fn apply(view: &mut TableView<'_>, control: Control) {
    match control {
        Control::Search(term) => view.set_search_term(term),
        Control::Sort(Some(key)) => view.set_sort(&key),
        Control::Sort(None) => view.clear_sort(),
        Control::Next => view.next_page(),
        Control::Prev => view.prev_page(),
        Control::Goto(page) => view.set_page(page - 1),
        Control::PageSize(size) => view.set_page_size(size),
        Control::Help | Control::Quit => {}
    }
}

fn status_line(view: &TableView<'_>) -> String {
    let state = view.state();
    let mut parts = Vec::new();
    if !state.search_term().is_empty() {
        parts.push(format!("search \"{}\"", state.search_term()));
    }
    if let Some(key) = state.sort_key() {
        parts.push(format!("sort {} {}", key, state.sort_direction()));
    }
    parts.push(format!("{} per page", state.page_size()));
    parts.join(" · ")
}

/// Runs the prompt loop until `q` or end of input.
async fn browse_loop<I, O>(view: &mut TableView<'_>, input: I, output: &mut O) -> Result<()>
where
    I: AsyncBufRead + Unpin,
    O: Write,
{
    let mut lines = input.lines();
    writeln!(output, "{}", render::table(&view.render()))?;

    loop {
        write!(output, "[{}] > ", status_line(view))?;
        output.flush()?;

        let Some(line) = lines.next_line().await? else {
            writeln!(output)?;
            return Ok(());
        };
        if line.trim().is_empty() {
            continue;
        }

        match parse_control(&line) {
            Ok(Control::Quit) => return Ok(()),
            Ok(Control::Help) => writeln!(output, "{}", HELP)?,
            Ok(control) => {
                apply(view, control);
                writeln!(output, "{}", render::table(&view.render()))?;
            }
            Err(message) => writeln!(output, "{}", message)?,
        }
    }
}

pub async fn run_browse(session: &Session, args: BrowseArgs) -> Result<()> {
    let client = session.client().await?;
    let records: Vec<Record> = fetch(&client, args.resource, args.parent.as_deref()).await?;
    let page_size = session.settings().page_size().await?;

    let mut view = TableView::new(&records, columns_for(args.resource))
        .with_page_size(page_size)
        .with_empty_message(empty_message(args.resource));

    println!("{} (h for help)", args.resource.label());
    let stdin = BufReader::new(tokio::io::stdin());
    browse_loop(&mut view, stdin, &mut std::io::stdout()).await
}
