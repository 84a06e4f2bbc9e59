use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use movie_watchlist::api::{SearchCompletion, ViewUpdate, WatchlistController};

const HELP: &str = "\
Commands:
  search <text>   search the catalog
  cancel          leave search results
  select <n>      add search result n to the watchlist
  toggle <n>      flip watched on watchlist row n
  list            show the current list
  help            show this help
  quit            exit";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Search(String),
    Cancel,
    Select(usize),
    Toggle(usize),
    List,
    Help,
    Quit,
}

/// Parses one input line; rows are numbered from 1 on screen
fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();

    match verb.to_lowercase().as_str() {
        "search" | "s" => Ok(Command::Search(rest.to_string())),
        "cancel" | "c" => Ok(Command::Cancel),
        "select" => parse_row(rest).map(Command::Select),
        "toggle" | "t" => parse_row(rest).map(Command::Toggle),
        "list" | "ls" | "" => Ok(Command::List),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        other => Err(format!("Unknown command '{}', type 'help'", other)),
    }
}

fn parse_row(raw: &str) -> Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(format!("Expected a row number, got '{}'", raw)),
    }
}

pub fn print_notice(message: &str) {
    println!("! {}", message);
}

fn render(view: &ViewUpdate) {
    if view.searching {
        println!("-- Search results ({}) --", view.items.len());
    } else {
        println!("-- Watchlist ({}) --", view.items.len());
    }

    for (row, movie) in view.items.iter().enumerate() {
        if view.searching {
            println!("{:>3}. {}", row + 1, movie.display_label());
        } else {
            let mark = if movie.is_watched() { "x" } else { " " };
            println!("{:>3}. [{}] {}", row + 1, mark, movie.display_label());
        }
    }

    if let Some(notice) = view.notice() {
        print_notice(&notice);
    }
}

/// Reads commands from stdin until `quit` or end of input
///
/// Searches run on spawned tasks; completions come back over a channel and
/// are applied here, so only this loop ever touches the controller.
pub async fn run(mut controller: WatchlistController) -> anyhow::Result<()> {
    let (done_tx, mut done_rx) = mpsc::unbounded_channel::<SearchCompletion>();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    render(&controller.view());

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };

                match parse_command(&line) {
                    Ok(Command::Quit) => break,
                    Ok(Command::Search(query)) => match controller.start_search(&query) {
                        Some(pending) => {
                            println!("Searching for \"{}\"...", pending.ticket().query);
                            let done_tx = done_tx.clone();
                            tokio::spawn(async move {
                                let _ = done_tx.send(pending.run().await);
                            });
                        }
                        None => print_notice("Type something to search for"),
                    },
                    Ok(Command::Cancel) => render(&controller.on_search_cancel()),
                    Ok(Command::Select(index)) => render(&controller.on_result_selected(index)),
                    Ok(Command::Toggle(index)) => render(&controller.on_watchlist_row_tapped(index)),
                    Ok(Command::List) => render(&controller.view()),
                    Ok(Command::Help) => println!("{}", HELP),
                    Err(message) => print_notice(&message),
                }
            }
            Some(completion) = done_rx.recv() => {
                render(&controller.finish_search(completion));
            }
        }
    }

    tracing::info!(movies = controller.watchlist().len(), "Exiting");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search_keeps_full_query() {
        assert_eq!(
            parse_command("search  The Good, the Bad ").unwrap(),
            Command::Search("The Good, the Bad".to_string())
        );
        assert_eq!(parse_command("s").unwrap(), Command::Search(String::new()));
    }

    #[test]
    fn test_parse_rows_are_one_based() {
        assert_eq!(parse_command("select 1").unwrap(), Command::Select(0));
        assert_eq!(parse_command("toggle 3").unwrap(), Command::Toggle(2));
        assert!(parse_command("select 0").is_err());
        assert!(parse_command("toggle x").is_err());
    }

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(parse_command("cancel").unwrap(), Command::Cancel);
        assert_eq!(parse_command("").unwrap(), Command::List);
        assert_eq!(parse_command("QUIT").unwrap(), Command::Quit);
        assert!(parse_command("frobnicate").is_err());
    }
}
