use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use triage_core::config::data_dir_from_env_value;
use triage_core::constants::HISTORY_KEY;
use triage_core::{
    AnalysisResult, CoreConfig, FileStore, HistoryEntry, HistoryRecorder, KnowledgeBase,
    SymptomSelection, TriageService, Vitals,
};

#[derive(Parser)]
#[command(name = "triage")]
#[command(about = "Symptom triage demo (not medical advice)")]
struct Cli {
    /// Directory holding the history log (overrides TRIAGE_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyse a set of symptoms and vitals
    Analyze {
        /// Symptom to include (repeatable)
        #[arg(short, long = "symptom")]
        symptoms: Vec<String>,
        /// Age in years
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        age: String,
        /// Symptom duration in days
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        duration: String,
        /// Temperature in °C
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        temp: String,
        /// Heart rate in bpm
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        hr: String,
        /// Do not record this check in the history log
        #[arg(long)]
        no_save: bool,
    },
    /// Suggest dictionary symptoms matching a query
    Suggest {
        /// Text to match (empty lists the start of the dictionary)
        #[arg(default_value = "")]
        query: String,
        /// Already-selected symptom to leave out (repeatable)
        #[arg(long = "exclude")]
        exclude: Vec<String>,
    },
    /// List every symptom in the dictionary
    Symptoms,
    /// Show previous checks, most recent first
    History,
    /// Delete all previous checks
    ClearHistory,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env().add_directive("triage=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let data_dir = cli
        .data_dir
        .unwrap_or_else(|| data_dir_from_env_value(std::env::var("TRIAGE_DATA_DIR").ok()));
    let cfg = Arc::new(CoreConfig::new(data_dir, HISTORY_KEY)?);
    tracing::debug!("using data directory {}", cfg.data_dir().display());
    let kb = Arc::new(KnowledgeBase::standard()?);
    let service = TriageService::new(cfg.clone(), kb);
    let history = HistoryRecorder::new(cfg.clone(), FileStore::new(cfg.data_dir()));

    match cli.command {
        Some(Commands::Analyze {
            symptoms,
            age,
            duration,
            temp,
            hr,
            no_save,
        }) => {
            let selection: SymptomSelection = symptoms.iter().collect();
            let vitals = Vitals::from_raw(&age, &duration, &temp, &hr);
            let result = service.analyze(&selection, vitals);
            print_result(&result);

            if !no_save {
                history.record(result.to_history_entry(chrono::Utc::now()))?;
            }
        }
        Some(Commands::Suggest { query, exclude }) => {
            let selection: SymptomSelection = exclude.iter().collect();
            for symptom in service.suggest(&query, &selection) {
                println!("{}", symptom);
            }
        }
        Some(Commands::Symptoms) => {
            for symptom in service.knowledge_base().dictionary() {
                println!("{}", symptom);
            }
        }
        Some(Commands::History) => {
            let entries = history.list();
            if entries.is_empty() {
                println!("No previous checks.");
            } else {
                for entry in &entries {
                    print_history_entry(entry);
                }
            }
        }
        Some(Commands::ClearHistory) => {
            history.clear()?;
            println!("History cleared.");
        }
        None => {
            println!("Use 'triage --help' for commands");
        }
    }

    Ok(())
}

fn print_result(result: &AnalysisResult) {
    if result.is_urgent() {
        println!("Urgent attention recommended");
        for reason in &result.reasons {
            println!("  - {}", reason);
        }
    } else {
        println!("No immediate red flags detected (based on inputs)");
    }
    println!();

    if !result.ranked.is_empty() {
        println!("Likely conditions:");
        for (rank, scored) in result.ranked.iter().enumerate() {
            println!(
                "  {}. {} - approx. match: {}%",
                rank + 1,
                scored.condition,
                scored.confidence
            );
        }
        println!();
        println!("General self-care tips:");
    }
    for tip in result.guidance() {
        println!("  - {}", tip);
    }
}

fn print_history_entry(entry: &HistoryEntry) {
    println!(
        "{} - {}",
        entry.time.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M:%S"),
        entry.triage
    );

    let symptoms: Vec<&str> = entry.symptoms.iter().map(|s| s.as_str()).collect();
    if symptoms.is_empty() {
        println!("  Symptoms: -");
    } else {
        println!("  Symptoms: {}", symptoms.join(", "));
    }

    if !entry.top.is_empty() {
        let top: Vec<String> = entry
            .top
            .iter()
            .map(|t| format!("{} ({}%)", t.condition, t.confidence))
            .collect();
        println!("  Top: {}", top.join(", "));
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_analyze(args: &[&str]) -> (Vec<String>, Vitals, bool) {
        let cli = Cli::try_parse_from(args).expect("arguments should parse");
        match cli.command {
            Some(Commands::Analyze {
                symptoms,
                age,
                duration,
                temp,
                hr,
                no_save,
            }) => (symptoms, Vitals::from_raw(&age, &duration, &temp, &hr), no_save),
            _ => panic!("expected analyze command"),
        }
    }

    #[test]
    fn test_analyze_accepts_negative_vitals() {
        let (symptoms, vitals, no_save) = parse_analyze(&[
            "triage", "analyze", "-s", "fever", "--temp", "-1", "--age", "-3", "--no-save",
        ]);
        assert_eq!(symptoms, vec!["fever"]);
        assert_eq!(vitals.temp, Some(-1.0));
        assert_eq!(vitals.age, Some(-3.0));
        assert!(no_save);
    }

    #[test]
    fn test_analyze_treats_hyphenated_garbage_as_absent() {
        let (_, vitals, _) = parse_analyze(&["triage", "analyze", "--hr", "-abc", "--duration", " "]);
        assert_eq!(vitals.hr, None);
        assert_eq!(vitals.duration, None);
    }

    #[test]
    fn test_analyze_defaults_vitals_to_absent() {
        let (symptoms, vitals, no_save) = parse_analyze(&["triage", "analyze"]);
        assert!(symptoms.is_empty());
        assert_eq!(vitals, Vitals::default());
        assert!(!no_save);
    }
}
