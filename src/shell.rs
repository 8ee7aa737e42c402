//! Interactive search shell.
//!
//! Reads queries line by line, fires them through the search session, and
//! renders each state snapshot. `/add` walks through the add-document form.

use anyhow::Result;
use std::io::{self, BufRead, Write};

use crate::api::ApiClient;
use crate::ingest::Ingestor;
use crate::input::{QueryInput, EXAMPLE_QUERIES};
use crate::models::DocSource;
use crate::session::SearchSession;
use crate::view;

pub async fn run_shell(client: ApiClient) -> Result<()> {
    let session = SearchSession::new(client.clone());
    let ingestor = Ingestor::new(client);
    let mut input = QueryInput::new();

    println!("docseek interactive shell");
    println!("  /examples  - list example queries");
    println!("  /e <n>     - run example query <n>");
    println!("  /add       - add a document to the index");
    println!("  /quit      - exit");
    println!("  <query>    - search");
    println!();
    print!("{}", view::render(&session.snapshot()));

    let stdin = io::stdin();
    loop {
        let Some(line) = prompt_line(&stdin, "search> ")? else {
            break;
        };

        match line.as_str() {
            "" => continue,
            "/quit" | "/q" => break,
            "/examples" => {
                for (index, query) in EXAMPLE_QUERIES.iter().enumerate() {
                    println!("  {}. {}", index + 1, query);
                }
            }
            "/add" => add_document(&ingestor, &stdin).await?,
            command if command.starts_with("/e") => {
                match command.trim_start_matches("/e").trim().parse::<usize>() {
                    Ok(number) if number >= 1 => match input.pick_example(number - 1) {
                        Some(query) => {
                            println!("search> {query}");
                            search_and_render(&session, query).await;
                        }
                        None => println!("No such example. /examples lists them."),
                    },
                    _ => println!("Usage: /e <n>"),
                }
            }
            query => {
                input.set_value(query);
                if let Some(query) = input.submit() {
                    search_and_render(&session, &query).await;
                }
            }
        }
    }

    Ok(())
}

async fn search_and_render(session: &SearchSession, query: &str) {
    if let Some(handle) = session.submit(query) {
        let _ = handle.await;
    }
    print!("{}", view::render(&session.snapshot()));
}

/// Walk through the add-document form and submit it.
async fn add_document(ingestor: &Ingestor, stdin: &io::Stdin) -> Result<()> {
    let Some(title) = prompt_line(stdin, "title> ")? else {
        return Ok(());
    };

    println!("content (finish with a single '.' line):");
    let mut text = String::new();
    loop {
        let Some(line) = prompt_line(stdin, "")? else {
            break;
        };
        if line == "." {
            break;
        }
        text.push_str(&line);
        text.push('\n');
    }

    let Some(source_raw) = prompt_line(stdin, "source [manual/email/slack]> ")? else {
        return Ok(());
    };
    let source = match source_raw.as_str() {
        "" | "manual" => DocSource::Manual,
        "email" => DocSource::Email,
        "slack" => DocSource::Slack,
        other => {
            println!("Unknown source '{other}', using manual.");
            DocSource::Manual
        }
    };

    let url = prompt_line(stdin, "url (optional)> ")?.unwrap_or_default();

    ingestor.set_form(|form| {
        form.title = title;
        form.text = text.trim_end().to_string();
        form.source = source;
        form.url = url;
    });

    match ingestor.submit() {
        Some(handle) => {
            let _ = handle.await;
            println!("{}", view::upload_status_line(ingestor.snapshot().status));
        }
        None => println!("Title and content are both required."),
    }

    Ok(())
}

/// Print a prompt and read one trimmed line. `None` on EOF.
fn prompt_line(stdin: &io::Stdin, prompt: &str) -> Result<Option<String>> {
    if !prompt.is_empty() {
        print!("{prompt}");
        io::stdout().flush()?;
    }
    let mut line = String::new();
    if stdin.lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
