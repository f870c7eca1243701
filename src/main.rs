use clap::Parser;
use std::io::{self, BufRead, Write};
use std::time::{Duration, Instant};

use story_search::app::sort::{SortKey, SortState};
use story_search::net::api::{Story, API_BASE};
use story_search::storage::TermStore;
use story_search::SearchSession;

#[derive(Parser, Debug)]
#[command(name = "story-search")]
#[command(about = "Interactive Hacker News search client")]
struct Args {
    /// Term to search on startup instead of the persisted one
    term: Option<String>,

    /// Base URL of the search API
    #[arg(long = "api-base", default_value = API_BASE)]
    api_base: String,

    /// Run the startup search, print the results, and exit
    #[arg(long = "once", default_value_t = false)]
    once: bool,
}

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

enum Command {
    Search(String),
    More,
    Revisit(usize),
    Remove(String),
    Sort(String),
    History,
    Help,
    Quit,
    Unknown(String),
}

fn main() {
    env_logger::init();

    let args = Args::parse();

    let mut session = SearchSession::new(args.api_base, TermStore::open());
    if let Some(term) = args.term.as_deref() {
        if !term.trim().is_empty() && term != session.active_term() {
            session.submit_search(term);
        }
    }

    let mut sort = SortState::default();

    wait_for_fetch(&mut session);
    render(&session, &sort);

    if args.once {
        return;
    }

    println!("Type a term to search, /help for commands.");

    let stdin = io::stdin();
    loop {
        print!("search> ");
        let _ = io::stdout().flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                eprintln!("Failed to read input: {}", e);
                break;
            }
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match parse_command(input) {
            Command::Quit => break,
            Command::Help => print_help(),
            Command::Search(term) => {
                session.submit_search(&term);
                wait_for_fetch(&mut session);
                render(&session, &sort);
            }
            Command::More => {
                session.load_more();
                wait_for_fetch(&mut session);
                render(&session, &sort);
            }
            Command::Revisit(number) => {
                let recent = session.last_searches();
                match number.checked_sub(1).and_then(|i| recent.get(i)) {
                    Some(term) => {
                        let term = term.clone();
                        session.revisit_history_term(&term);
                        wait_for_fetch(&mut session);
                        render(&session, &sort);
                    }
                    None => println!("No recent search numbered {}", number),
                }
            }
            Command::Remove(id) => match find_story(&session, &id) {
                Some(story) => {
                    session.remove_story(story);
                    render(&session, &sort);
                }
                None => println!("No story with id {}", id),
            },
            Command::Sort(column) => match SortKey::parse(&column) {
                Some(key) => {
                    sort.select(key);
                    render(&session, &sort);
                }
                None => println!(
                    "Unknown column '{}'. Valid: none, title, author, comments, points",
                    column
                ),
            },
            Command::History => print_history(&session),
            Command::Unknown(cmd) => {
                println!("Unknown command '{}'. Try /help.", cmd);
            }
        }
    }
}

fn parse_command(input: &str) -> Command {
    let Some(rest) = input.strip_prefix('/') else {
        return Command::Search(input.to_string());
    };

    let mut words = rest.split_whitespace();
    let name = words.next().unwrap_or("");
    let arg = words.next();

    match (name, arg) {
        ("more", _) => Command::More,
        ("history", _) => Command::History,
        ("help", _) => Command::Help,
        ("quit", _) | ("q", _) => Command::Quit,
        ("last", Some(n)) => match n.parse() {
            Ok(number) => Command::Revisit(number),
            Err(_) => Command::Unknown(input.to_string()),
        },
        ("rm", Some(id)) => Command::Remove(id.to_string()),
        ("sort", Some(column)) => Command::Sort(column.to_string()),
        _ => Command::Unknown(input.to_string()),
    }
}

/// Poll for the in-flight fetch until it settles (with timeout).
fn wait_for_fetch(session: &mut SearchSession) {
    println!("Loading...");

    let start = Instant::now();
    while session.is_loading() && start.elapsed() < FETCH_TIMEOUT {
        session.poll_outcomes();
        std::thread::sleep(Duration::from_millis(10));
    }

    if session.is_loading() {
        eprintln!("Warning: fetch timed out after 30 seconds");
    }
}

fn find_story(session: &SearchSession, id: &str) -> Option<Story> {
    session
        .stories()
        .data
        .iter()
        .find(|story| story.object_id == id)
        .cloned()
}

fn render(session: &SearchSession, sort: &SortState) {
    let stories = session.stories();

    println!();
    println!("Hacker Stories with {} comments", stories.total_comments());

    let recent = session.last_searches();
    if !recent.is_empty() {
        let numbered: Vec<String> = recent
            .iter()
            .enumerate()
            .map(|(i, term)| format!("[{}] {}", i + 1, term))
            .collect();
        println!("Recent: {}  (/last <n> to re-run)", numbered.join("  "));
    }

    if session.is_error() {
        println!("Something went wrong...");
    }

    println!(
        "{} results for '{}', pages 0-{}:",
        stories.data.len(),
        session.active_term(),
        stories.page
    );
    println!(
        "  {:<44} {:<20} {:>8} {:>6}  {}",
        "TITLE", "AUTHOR", "COMMENTS", "POINTS", "ID"
    );

    for story in sort.apply(&stories.data) {
        println!(
            "  {:<44} {:<20} {:>8} {:>6}  {}",
            truncate(&story.title, 44),
            truncate(&story.author, 20),
            story.num_comments,
            story.points,
            story.object_id
        );
    }
    println!("/more loads the next page.");
}

fn print_history(session: &SearchSession) {
    let recent = session.last_searches();
    if recent.is_empty() {
        println!("No past searches yet.");
        return;
    }
    for (i, term) in recent.iter().enumerate() {
        println!("[{}] {}", i + 1, term);
    }
}

fn print_help() {
    println!("<term>          search for <term>");
    println!("/more           load the next result page");
    println!("/last <n>       re-run the n-th recent search");
    println!("/rm <id>        dismiss the story with that id");
    println!("/sort <column>  order by none, title, author, comments, or points");
    println!("/history        list recent searches");
    println!("/quit           exit");
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
