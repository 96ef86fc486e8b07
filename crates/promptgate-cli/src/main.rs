//! PromptGate CLI - operator tooling for the prompt firewall

use clap::Parser;
use promptgate_firewall::{sanitize, validate_output, InjectionDetector};

#[derive(Parser)]
#[command(name = "promptgate")]
#[command(about = "PromptGate - request-time safety gate for LLM-backed features")]
struct Cli {
    /// Emit results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Scan text for injection patterns
    Scan {
        /// Text to scan
        text: String,
    },
    /// Sanitize text with default options
    Sanitize {
        /// Text to sanitize
        text: String,
    },
    /// Validate model output for leaks
    CheckOutput {
        /// Output text to validate
        text: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt::init();

    match cli.command {
        Some(Commands::Scan { text }) => {
            let result = InjectionDetector::new().detect(&text);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("clean:          {}", result.is_clean);
                println!("severity:       {:?}", result.severity);
                println!("recommendation: {:?}", result.recommendation);
                for pattern in &result.detected_patterns {
                    println!("  matched: {pattern}");
                }
            }
        }
        Some(Commands::Sanitize { text }) => {
            println!("{}", sanitize(&text));
        }
        Some(Commands::CheckOutput { text }) => {
            let result = validate_output(&text);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("valid: {}", result.is_valid);
                for issue in &result.issues {
                    println!("  issue: {issue}");
                }
                println!("{}", result.sanitized);
            }
        }
        None => {
            println!("PromptGate v0.1.0 - Use --help for commands");
        }
    }

    Ok(())
}
