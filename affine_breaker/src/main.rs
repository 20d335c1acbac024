use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use affine_cryptanalysis::{
    index_of_coincidence, profile, AffineKey, AnalysisResult, Analyzer, BatchSummary,
    EngineConfig, Outcome, Record, ScoringConfig, Strategy,
};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use serde::Serialize;

/// Recovers affine cipher keys from ciphertexts and decrypts them.
#[derive(Parser, Debug)]
#[command(name = "affine_breaker", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Recover the key of a single ciphertext file
    Analyze {
        #[arg(short, long, help = "Path to the input file containing encrypted text")]
        file: PathBuf,

        #[arg(short, long, help = "Mood/tag of the message, enables the key formula")]
        mood: Option<i64>,

        #[command(flatten)]
        engine: EngineArgs,

        #[arg(short, long, help = "Path to the output file for decrypted text")]
        output: Option<PathBuf>,
    },

    /// Analyse a JSON array of records ({"ciphertext", "mood", "fields"})
    Batch {
        #[arg(short, long, help = "Path to the JSON records file")]
        file: PathBuf,

        #[command(flatten)]
        engine: EngineArgs,

        #[arg(short, long, help = "Path to the JSON results file")]
        output: Option<PathBuf>,
    },

    /// Print the letter frequency profile of a text next to English
    Profile {
        #[arg(short, long, help = "Path to the input file")]
        file: PathBuf,

        #[arg(short, long, help = "Write the comparison table as JSON to this file")]
        output: Option<PathBuf>,
    },

    /// Encrypt or decrypt with a known key
    Transform {
        #[arg(short, long, help = "Path to the input file")]
        file: PathBuf,

        #[arg(short, help = "Multiplier a (1..=25, coprime with 26)")]
        a: i64,

        #[arg(short, help = "Shift b (0..=25)")]
        b: i64,

        #[arg(short, long, help = "Mode of operation (encrypt/decrypt)")]
        mode: OperationMode,

        #[arg(short, long, help = "Path to the output file")]
        output: Option<PathBuf>,
    },
}

#[derive(clap::Args, Debug)]
struct EngineArgs {
    #[arg(
        short,
        long,
        value_enum,
        default_value_t = StrategyArg::Auto,
        help = "How keys are obtained"
    )]
    strategy: StrategyArg,

    #[arg(long, value_enum, default_value_t = ScorerArg::English, help = "Plaintext scorer")]
    scorer: ScorerArg,

    #[arg(short, long, default_value_t = 5, help = "Number of ranked candidates to keep")]
    top: usize,
}

impl EngineArgs {
    fn config(&self) -> EngineConfig {
        EngineConfig {
            strategy: self.strategy.into(),
            scoring: match self.scorer {
                ScorerArg::English => ScoringConfig::default(),
                ScorerArg::Words => ScoringConfig::word_count(),
            },
            top_n: self.top,
            ..EngineConfig::default()
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StrategyArg {
    /// Formula when the mood allows it, frequency search otherwise
    Auto,
    /// Formula only
    Formula,
    /// Frequency search only
    Search,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Auto => Strategy::Auto,
            StrategyArg::Formula => Strategy::Formula,
            StrategyArg::Search => Strategy::Search,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ScorerArg {
    /// Words, bigrams, trigrams and IoC
    English,
    /// Common word hits only
    Words,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OperationMode {
    Encrypt,
    Decrypt,
}

#[derive(Serialize)]
struct BatchReport<'a> {
    summary: BatchSummary,
    results: &'a [AnalysisResult],
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Analyze {
            file,
            mood,
            engine,
            output,
        } => analyze(&file, mood, &engine, output.as_deref()),
        Command::Batch {
            file,
            engine,
            output,
        } => batch(&file, &engine, output.as_deref()),
        Command::Profile { file, output } => print_profile(&file, output.as_deref()),
        Command::Transform {
            file,
            a,
            b,
            mode,
            output,
        } => transform(&file, AffineKey::try_from((a, b))?, mode, output.as_deref()),
    }
}

fn read_input(path: &Path) -> Result<String, Box<dyn Error>> {
    fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e).into())
}

fn write_output(path: &Path, content: &str) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)
        .map_err(|e| format!("Failed to write {}: {}", path.display(), e).into())
}

fn analyze(
    file: &Path,
    mood: Option<i64>,
    engine: &EngineArgs,
    output: Option<&Path>,
) -> Result<(), Box<dyn Error>> {
    let ciphertext = read_input(file)?;
    let analyzer = Analyzer::new(engine.config());
    let result = analyzer.analyze(0, &Record::new(ciphertext, mood));

    print_result(&result);

    if !result.candidates.is_empty() {
        println!("\nTop {} key candidates:", result.candidates.len());
        for (i, candidate) in result.candidates.iter().enumerate() {
            println!(
                "{}. {} (Score: {})\n   Mapping: {}\n   Preview: {}...",
                i + 1,
                candidate.key,
                candidate.score.total,
                candidate.provenance,
                candidate.preview(100)
            );
        }
    }

    if let (Some(path), Some(plaintext)) = (output, result.plaintext.as_deref()) {
        write_output(path, plaintext)?;
        println!("\nDecrypted text saved to: {}", path.display());
    }
    Ok(())
}

fn batch(file: &Path, engine: &EngineArgs, output: Option<&Path>) -> Result<(), Box<dyn Error>> {
    let content = read_input(file)?;
    let records: Vec<Record> = serde_json::from_str(&content)
        .map_err(|e| format!("Invalid records in {}: {}", file.display(), e))?;
    let analyzer = Analyzer::new(engine.config());
    info!(
        "Found {} ciphertexts to analyze ({:?} strategy)",
        records.len(),
        analyzer.config().strategy
    );
    let results = analyzer.analyze_batch(&records);
    let summary = BatchSummary::from_results(&results);

    for result in &results {
        println!("{}", "=".repeat(70));
        print_result(result);
    }

    println!("{}", "=".repeat(70));
    println!(
        "Recovered: {}/{}  (formula: {}, search: {})  No key: {}  Skipped: {}",
        summary.recovered,
        summary.total,
        summary.via_formula,
        summary.via_search,
        summary.no_key,
        summary.skipped
    );
    if summary.formula_confirmed + summary.formula_contradicted > 0 {
        println!(
            "Formula a = 2*mood + 1, b = 2*mood: {} confirmed, {} contradicted{}",
            summary.formula_confirmed,
            summary.formula_contradicted,
            if summary.formula_verified() { " (verified)" } else { "" }
        );
    }

    if let Some(path) = output {
        let report = BatchReport {
            summary,
            results: &results,
        };
        write_output(path, &serde_json::to_string_pretty(&report)?)?;
        println!("Results saved to: {}", path.display());
    }
    Ok(())
}

fn print_result(result: &AnalysisResult) {
    let mood = result
        .mood
        .map_or_else(|| "-".to_string(), |m| m.to_string());
    println!("Ciphertext {} - Mood: {}", result.index + 1, mood);

    match (&result.outcome, result.key) {
        (Outcome::Recovered, Some(key)) => {
            let method = result
                .method
                .map_or_else(|| "-".to_string(), |m| m.to_string());
            println!(
                "Key: {} via {} (Score: {}, IoC: {:.4})",
                key, method, result.score, result.ioc
            );
            if let Some(plaintext) = &result.plaintext {
                let preview: String = plaintext.chars().take(150).collect();
                println!("Decrypted preview:\n{}", preview);
            }
            for (name, value) in &result.fields {
                println!("{}: {}", name, value);
            }
        }
        (Outcome::Skipped(reason), _) => println!("Skipped: {}", reason),
        _ => println!("No key found"),
    }
}

fn print_profile(file: &Path, output: Option<&Path>) -> Result<(), Box<dyn Error>> {
    let content = read_input(file)?;
    let freq = profile(&content);
    let rows = freq.comparison();

    println!("Total letters analyzed: {}", freq.total);
    println!(
        "{:<6} {:>6} {:>10} {:>10} {:>11}",
        "Letter", "Count", "Freq (%)", "English", "Difference"
    );
    for row in &rows {
        println!(
            "{:<6} {:>6} {:>10.2} {:>10.2} {:>+11.2}",
            row.letter, row.count, row.frequency, row.english, row.difference
        );
    }
    println!("IoC: {:.4}", index_of_coincidence(&content));

    if let Some(path) = output {
        write_output(path, &serde_json::to_string_pretty(&rows)?)?;
        println!("Frequency table saved to: {}", path.display());
    }
    Ok(())
}

fn transform(
    file: &Path,
    key: AffineKey,
    mode: OperationMode,
    output: Option<&Path>,
) -> Result<(), Box<dyn Error>> {
    let content = read_input(file)?;
    let result = match mode {
        OperationMode::Encrypt => key.encrypt(&content)?,
        OperationMode::Decrypt => key.decrypt(&content)?,
    };

    match output {
        Some(path) => {
            write_output(path, &result)?;
            println!("Operation completed successfully! Output saved to: {}", path.display());
        }
        None => println!("{}", result),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_engine_args_mapping() {
        let cli = Cli::parse_from([
            "affine_breaker", "analyze", "-f", "in.txt", "-m", "5", "-s", "search", "--scorer",
            "words", "-t", "3",
        ]);
        match cli.command {
            Command::Analyze { mood, engine, .. } => {
                assert_eq!(mood, Some(5));
                let config = engine.config();
                assert_eq!(config.strategy, Strategy::Search);
                assert_eq!(config.scoring, ScoringConfig::word_count());
                assert_eq!(config.top_n, 3);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_transform_args() {
        let cli = Cli::parse_from([
            "affine_breaker", "transform", "-f", "in.txt", "-a", "7", "-b", "6", "-m", "encrypt",
        ]);
        assert!(matches!(
            cli.command,
            Command::Transform { a: 7, b: 6, mode: OperationMode::Encrypt, output: None, .. }
        ));
    }

    #[test]
    fn test_transform_rejects_out_of_range_key() {
        let dir = std::env::temp_dir().join(format!("affine_breaker_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let input = dir.join("in.txt");
        fs::write(&input, "abc").unwrap();

        assert!(AffineKey::try_from((7, i64::MAX)).is_err());

        let output = dir.join("out.txt");
        transform(&input, AffineKey::new(7, i64::MAX), OperationMode::Encrypt, Some(&output))
            .unwrap_err();
        assert!(!output.exists());

        let key = AffineKey::try_from((7, 6)).unwrap();
        transform(&input, key, OperationMode::Encrypt, Some(&output)).unwrap();
        assert_eq!(fs::read_to_string(&output).unwrap(), "gnu");
        fs::remove_dir_all(&dir).unwrap();
    }
}
