use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::{error, info};

use wordcheck::config::Config;
use wordcheck::lexer::Lexer;
use wordcheck::pipeline::Pipeline;
use wordcheck::Dictionary;

#[derive(Parser)]
#[command(version, about = "Check words against a newline-delimited word list")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Spell check a text file and print the unknown words
    Check {
        #[arg(short, long)]
        dictionary: Option<PathBuf>,
        #[arg(short, long)]
        config: Option<PathBuf>,
        text: PathBuf,
    },
    /// Look individual words up in the dictionary
    Lookup {
        #[arg(short, long)]
        dictionary: Option<PathBuf>,
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(required = true)]
        words: Vec<String>,
    },
    /// Run the language server on stdio
    Serve {
        #[arg(short, long)]
        dictionary: Option<PathBuf>,
    },
}

fn load_config(config: Option<PathBuf>, dictionary: Option<PathBuf>) -> Option<Config> {
    let config = match config {
        Some(path) => match Config::from_file(&path) {
            Ok(config) => config,
            Err(err) => {
                error!("{}: {err}", path.display());
                return None;
            }
        },
        None => Config::default(),
    };
    Some(config.with_dictionary(dictionary))
}

fn load_dictionary(config: &Config) -> Option<Dictionary> {
    let mut dictionary = Dictionary::new();
    match dictionary.load(&config.dictionary) {
        Ok(()) => Some(dictionary),
        Err(err) => {
            error!("could not load {}: {err}", config.dictionary.display());
            None
        }
    }
}

fn check(config: &Config, text: PathBuf) -> ExitCode {
    let source = match std::fs::read_to_string(&text) {
        Ok(source) => source,
        Err(err) => {
            error!("could not read {}: {err}", text.display());
            return ExitCode::FAILURE;
        }
    };
    let Some(mut dictionary) = load_dictionary(config) else {
        return ExitCode::FAILURE;
    };

    let report = Pipeline::new(config).run(Lexer::new(source), |w| dictionary.check(w));

    println!("\nMISSPELLED WORDS\n");
    for token in &report.misspelled {
        println!("{}", token.lexeme);
    }
    println!();
    println!("WORDS MISSPELLED:     {}", report.misspelled.len());
    println!("WORDS IN DICTIONARY:  {}", dictionary.size());
    println!("WORDS IN TEXT:        {}", report.words_checked);

    if let Err(err) = dictionary.unload() {
        error!("{err}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn lookup(config: &Config, words: &[String]) -> ExitCode {
    let Some(dictionary) = load_dictionary(config) else {
        return ExitCode::FAILURE;
    };
    for word in words {
        let verdict = if dictionary.check(word) { "found" } else { "missing" };
        println!("{word}: {verdict}");
    }
    ExitCode::SUCCESS
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    match Cli::parse().command {
        Command::Check {
            dictionary,
            config,
            text,
        } => match load_config(config, dictionary) {
            Some(config) => check(&config, text),
            None => ExitCode::FAILURE,
        },
        Command::Lookup {
            dictionary,
            config,
            words,
        } => match load_config(config, dictionary) {
            Some(config) => lookup(&config, &words),
            None => ExitCode::FAILURE,
        },
        Command::Serve { dictionary } => {
            info!("starting language server");
            wordcheck::server::serve(dictionary).await;
            ExitCode::SUCCESS
        }
    }
}
