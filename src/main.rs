use planit::config::SessionConfig;
use planit::filters::AmenityId;
use planit::pipeline::event::{Event, InputEvent};
use planit::pipeline::session::{run_session, Session};
use planit::render::LogRenderer;
use planit::services::extract::ExtractService;
use planit::services::search::SearchService;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

enum Command {
    Input(InputEvent),
    Quit,
}

/// Tiny stdin surface standing in for the UI pages. One line = one input
/// event into the session.
fn parse_command(line: &str) -> Option<Command> {
    let mut parts = line.split_whitespace();
    match parts.next()? {
        "quit" | "exit" => Some(Command::Quit),
        "query" => {
            let text = line.trim_start()["query".len()..].trim().to_string();
            Some(Command::Input(InputEvent::QueryEdited(text)))
        }
        "submit" => Some(Command::Input(InputEvent::QuerySubmitted)),
        "radius" => {
            let amenity = AmenityId::parse(parts.next()?)?;
            let value: f32 = parts.next()?.parse().ok()?;
            Some(Command::Input(InputEvent::RadiusChanged { amenity, value }))
        }
        "toggle" => {
            let amenity = AmenityId::parse(parts.next()?)?;
            Some(Command::Input(InputEvent::Toggled { amenity }))
        }
        "view" => {
            let radius: f32 = parts.next()?.parse().ok()?;
            let opacity: f32 = parts.next()?.parse().ok()?;
            Some(Command::Input(InputEvent::ViewChanged { radius, opacity }))
        }
        _ => None,
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let search_url = std::env::var("PLANIT_SEARCH_URL")
        .unwrap_or_else(|_| "http://localhost:8000/api/search".to_string());
    let extract_url = std::env::var("PLANIT_EXTRACT_URL")
        .unwrap_or_else(|_| "http://localhost:8000/api/extract".to_string());

    let config = SessionConfig::default();
    let (tx, rx) = mpsc::channel(100);

    let search = SearchService::new(&search_url, config.request_timeout, tx.clone())?;
    let extract = ExtractService::new(&extract_url, config.request_timeout, tx.clone())?;
    let session = Session::new(config);

    tracing::info!(%search_url, %extract_url, "planit session booting");

    let driver = tokio::spawn(run_session(
        session,
        rx,
        search,
        extract,
        Box::new(LogRenderer),
    ));

    println!("commands:");
    println!("  query <free text>        set the query text");
    println!("  submit                   submit the query (extraction + search)");
    println!("  radius <amenity> <mi>    drag an amenity radius slider (0-25)");
    println!("  toggle <amenity>         flip an amenity on/off");
    println!("  view <radius> <opacity>  adjust the heatmap overlay");
    println!("  quit");
    println!("amenities: bus school store restaurant park nightlife");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        match parse_command(&line) {
            Some(Command::Quit) => break,
            Some(Command::Input(input)) => {
                if tx.send(Event::Input(input)).await.is_err() {
                    break;
                }
            }
            None => eprintln!("unrecognized command: {line}"),
        }
    }

    drop(tx);
    driver.await?;
    Ok(())
}
