use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use log::info;
use multibag::{render, Bag, BagError};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Parser, Debug)]
#[command(name = "bagcount", about = "Count the words of some text into a bag")]
struct Args {
    /// Files to read. Reads stdin when none are given.
    paths: Vec<PathBuf>,
    /// How many of the most frequent words to list
    #[arg(long, default_value_t = 10)]
    top: usize,
    /// Also list running totals
    #[arg(long)]
    cumulative: bool,
    /// Draw this many words, weighted by frequency
    #[arg(long, allow_hyphen_values = true)]
    sample: Option<i64>,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    lowercase: bool,
    /// Print the whole bag, wrapped at this width
    #[arg(long)]
    pretty: Option<usize>,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("cannot read {path}: {source}")]
    Read { path: String, source: io::Error },
    #[error(transparent)]
    Bag(#[from] BagError),
}

fn words(text: &str, lowercase: bool) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !(c.is_alphanumeric() || c == '\'' || c == '-'))
        .filter(|w| w.chars().any(char::is_alphanumeric))
        .map(move |w| if lowercase { w.to_lowercase() } else { w.to_owned() })
}

fn read_bag(args: &Args) -> Result<Bag<String>, CliError> {
    let mut bag = Bag::new();
    if args.paths.is_empty() {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .map_err(|source| CliError::Read { path: "<stdin>".to_owned(), source })?;
        for word in words(&text, args.lowercase) {
            bag.push(word)?;
        }
    }
    for path in &args.paths {
        let text = fs::read_to_string(path)
            .map_err(|source| CliError::Read { path: path.display().to_string(), source })?;
        let before = bag.size();
        for word in words(&text, args.lowercase) {
            bag.push(word)?;
        }
        info!("{}: {} words", path.display(), bag.size() - before);
    }
    Ok(bag)
}

fn run(args: Args) -> Result<(), CliError> {
    let bag = read_bag(&args)?;

    if let Some(width) = args.pretty {
        println!("{}", render::pretty(&bag, width));
    }

    println!("{} words, {} distinct", bag.size(), bag.uniq_size());
    for (word, count) in bag.sorted_by_count().into_iter().take(args.top) {
        println!("{count:>8} {word}");
    }

    if args.cumulative {
        println!();
        for (word, total) in bag.cumulative_counts().into_iter().take(args.top) {
            println!("{total:>8} {word}");
        }
    }

    if let Some(n) = args.sample {
        let mut rng = match args.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let draws = bag.sample_n(n, &mut rng)?;
        println!();
        println!("{}", draws.iter().map(|w| w.as_str()).collect::<Vec<_>>().join(" "));
    }

    Ok(())
}

fn main() {
    env_logger::init();

    let args = Args::parse();
    info!("{args:?}");

    if let Err(e) = run(args) {
        eprintln!("bagcount: {e}");
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_punctuation() {
        let found: Vec<_> = words("Hope is the thing -- with feathers, that perches!", false).collect();
        assert_eq!(found, vec!["Hope", "is", "the", "thing", "with", "feathers", "that", "perches"]);
    }

    #[test]
    fn bare_punctuation_is_not_a_word() {
        let found: Vec<_> = words("a -- b ' - self-taught don't", false).collect();
        assert_eq!(found, vec!["a", "b", "self-taught", "don't"]);
    }

    #[test]
    fn lowercases_on_request() {
        let bag = Bag::from_elements(words("Soul soul SOUL storm", true)).unwrap();
        assert_eq!(bag.count("soul"), 3);
        assert_eq!(bag.count("storm"), 1);
    }

    #[test]
    fn parses_arguments() {
        let args = Args::parse_from(["bagcount", "--top", "3", "--sample", "5", "--seed", "9", "a.txt"]);
        assert_eq!(args.top, 3);
        assert_eq!(args.sample, Some(5));
        assert_eq!(args.seed, Some(9));
        assert_eq!(args.paths, vec![PathBuf::from("a.txt")]);
        assert!(!args.cumulative);
    }

    #[test]
    fn negative_sample_is_reported() {
        let args = Args::parse_from(["bagcount", "--sample", "-2", "Cargo.toml"]);
        match run(args) {
            Err(CliError::Bag(BagError::InvalidArgument { .. })) => {}
            other => panic!("expected an invalid argument, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_reported() {
        let args = Args::parse_from(["bagcount", "no/such/file.txt"]);
        assert!(matches!(run(args), Err(CliError::Read { .. })));
    }
}
