use clap::Parser;
use std::fs;
use std::io::Read;
use std::path::PathBuf;

use wiktionary_german::{
    extract_lemma_candidate, has_inflected_form_markers, highlight_example_text, parse_entry,
    Entry, PartOfSpeech,
};

#[derive(Parser)]
#[command(name = "wiktionary-german")]
#[command(about = "Extract a structured German dictionary record from Wiktionary wikitext")]
struct Args {
    /// Input wikitext file ("-" for stdin)
    input: PathBuf,

    /// Page title the wikitext belongs to (default: input file stem)
    #[arg(short, long)]
    title: Option<String>,

    /// Word the lookup was made for (default: the title)
    #[arg(short, long)]
    word: Option<String>,

    /// Second wikitext file (e.g. the resolved base lemma's page) whose
    /// data fills fields the primary page left unknown
    #[arg(long)]
    fallback: Option<PathBuf>,

    /// Page title of the fallback wikitext (default: fallback file stem)
    #[arg(long)]
    fallback_title: Option<String>,

    /// Example sentence to highlight against the parsed entry
    #[arg(long)]
    highlight: Option<String>,

    /// Pretty-print the JSON output
    #[arg(short, long)]
    pretty: bool,

    /// Quiet mode - suppress hints on stderr
    #[arg(short, long)]
    quiet: bool,
}

fn read_input(path: &PathBuf) -> std::io::Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        fs::read_to_string(path)
    }
}

fn title_for(path: &PathBuf, explicit: Option<&String>) -> Option<String> {
    explicit.cloned().or_else(|| {
        path.file_stem()
            .filter(|_| path.as_os_str() != "-")
            .map(|stem| stem.to_string_lossy().into_owned())
    })
}

fn main() -> std::io::Result<()> {
    let args = Args::parse();

    let wikitext = read_input(&args.input)?;
    let Some(title) = title_for(&args.input, args.title.as_ref()) else {
        eprintln!("Error: --title is required when reading from stdin");
        std::process::exit(1);
    };
    let word = args.word.clone().unwrap_or_else(|| title.clone());

    let fallback_entry: Option<Entry> = match &args.fallback {
        Some(path) => {
            let fallback_text = read_input(path)?;
            let Some(fallback_title) = title_for(path, args.fallback_title.as_ref()) else {
                eprintln!("Error: --fallback-title is required when --fallback reads stdin");
                std::process::exit(1);
            };
            Some(parse_entry(
                &fallback_title,
                &fallback_title,
                &fallback_text,
                None,
            ))
        }
        None => None,
    };

    let entry = parse_entry(&word, &title, &wikitext, fallback_entry.as_ref());

    if !args.quiet && entry.part_of_speech == PartOfSpeech::Unknown {
        if has_inflected_form_markers(&wikitext) {
            match extract_lemma_candidate(&wikitext, &title) {
                Some(lemma) => eprintln!(
                    "Hint: \"{}\" looks like an inflected form of \"{}\"; \
                     pass that page via --fallback for a fuller record",
                    title, lemma
                ),
                None => eprintln!(
                    "Hint: \"{}\" looks like an inflected form, but no base lemma was found",
                    title
                ),
            }
        }
    }

    let json = if args.pretty {
        serde_json::to_string_pretty(&entry)?
    } else {
        serde_json::to_string(&entry)?
    };
    println!("{}", json);

    if let Some(sentence) = &args.highlight {
        println!("{}", highlight_example_text(sentence, &entry));
    }

    Ok(())
}
