use crossterm::style::Stylize;
use glosa_core::loader::load_repository;
use glosa_core::{LexiconRepository, PipelineConfig, SignPipeline, WordMapEntry};
use std::io::{stdin, stdout, Write};
use std::path::Path;
use tracing::Level;

fn main() {
    let level = if std::env::var_os("GLOSA_DEBUG").is_some() {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();

    let lexicon = match std::env::args().nth(1) {
        Some(path) => match load_repository(Path::new(&path)) {
            Ok((lexicon, _)) => lexicon,
            Err(e) => {
                eprintln!("[ERROR] Could not load bundle '{}': {}", path, e);
                std::process::exit(1);
            }
        },
        None => LexiconRepository::new(),
    };

    let mut pipeline = match SignPipeline::new(lexicon, PipelineConfig::default()) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            eprintln!("[ERROR] {}", e);
            std::process::exit(1);
        }
    };

    println!("Swedish → STS gloss engine. Type 'exit' to quit.");
    println!("---------------------------------------------------------------");
    println!("Commands: :vote KEY ID, :primary KEY ID, :clear, :stats\n");

    loop {
        print!("> ");
        if stdout().flush().is_err() {
            break;
        }

        let mut input = String::new();
        match stdin().read_line(&mut input) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let line = input.trim();

        match line {
            "" => continue,
            "exit" => break,
            ":clear" => {
                pipeline.clear_feedback();
                println!("{}", "Feedback cleared.".dark_grey());
            }
            ":stats" => {
                let stats = pipeline.cache_stats();
                println!(
                    "cache: {} hits, {} misses ({:.0}% hit rate)",
                    stats.hits(),
                    stats.misses(),
                    stats.hit_rate() * 100.0
                );
            }
            s if s.starts_with(":vote ") || s.starts_with(":primary ") => {
                let parts: Vec<&str> = s.split_whitespace().collect();
                let [command, key, id] = parts.as_slice() else {
                    println!("{}", "Usage: :vote KEY ID | :primary KEY ID".red());
                    continue;
                };
                let weight = if *command == ":vote" {
                    pipeline.vote(key, id)
                } else {
                    pipeline.set_primary(key, id)
                };
                println!("{} {} → {} (weight {})", "Saved:".green(), key, id, weight);
            }
            text => print_result(&pipeline, text),
        }
    }
}

fn print_result(pipeline: &SignPipeline, text: &str) {
    for entry in pipeline.search(text).iter().filter(|e| e.is_word) {
        print_entry(entry);
    }

    let translation = pipeline.translate(text);
    println!(
        "\n{} {}  {}",
        "Gloss:".bold(),
        translation.gloss.clone().bold().cyan(),
        format!("(confidence {:.2})", translation.confidence).dark_grey()
    );
    println!();
}

fn print_entry(entry: &WordMapEntry) {
    let rationale = entry.rationale.as_deref().unwrap_or("");
    match &entry.signs {
        Some(signs) if !signs.is_empty() => {
            let ids: Vec<&str> = signs.iter().map(|s| s.id.as_str()).collect();
            let label = if entry.is_genuine {
                entry.original.clone().magenta()
            } else {
                entry.original.clone().green()
            };
            println!(
                "  {} → {} [{}]  {}",
                label,
                entry.base,
                ids.join(", "),
                rationale.dark_grey()
            );
        }
        _ => println!(
            "  {} → {}  {}",
            entry.original.clone().yellow(),
            entry.base,
            rationale.dark_grey()
        ),
    }
}
