//! FormSage — classify DOCX placeholders and group templates into document types.

use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

mod commands;

/// Log filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "info";

fn usage() {
    println!("FormSage — form field classification and template clustering");
    println!();
    println!("Usage: formsage <command> [args]");
    println!();
    println!("Commands:");
    println!("  classify [--rules FILE] TOKEN...   Classify placeholders, print field map JSON");
    println!("  suggest [--config FILE] NAME...    Suggest document-type groups for template names");
    println!("  validate-rules FILE                Compile every rule in a rule file");
    println!("  help                               Show this help message");
}

/// Split `--flag VALUE` out of the argument list.
fn take_option(args: &mut Vec<String>, flag: &str) -> anyhow::Result<Option<PathBuf>> {
    let Some(pos) = args.iter().position(|a| a == flag) else {
        return Ok(None);
    };
    if pos + 1 >= args.len() {
        anyhow::bail!("{} requires a value", flag);
    }
    let value = args.remove(pos + 1);
    args.remove(pos);
    Ok(Some(PathBuf::from(value)))
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays valid JSON.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        usage();
        std::process::exit(1);
    }
    let command = args.remove(0);

    match command.as_str() {
        "classify" => {
            let rules = take_option(&mut args, "--rules")?;
            let map = commands::classify(rules.as_deref(), &args)?;
            println!("{}", serde_json::to_string_pretty(&map)?);
        }
        "suggest" => {
            let config = match take_option(&mut args, "--config")? {
                Some(path) => formsage_core::FormSageConfig::load(&path)?,
                None => formsage_core::FormSageConfig::from_env(),
            };
            if args.is_empty() {
                eprintln!("Usage: formsage suggest [--config FILE] NAME...");
                std::process::exit(1);
            }
            let groups = commands::suggest(&args, &config);
            println!("{}", serde_json::to_string_pretty(&groups)?);
        }
        "validate-rules" => {
            let Some(path) = args.first() else {
                eprintln!("Usage: formsage validate-rules FILE");
                std::process::exit(1);
            };
            let (total, issues) = commands::validate_rules(&PathBuf::from(path))?;
            commands::print_issues(total, &issues);
            std::process::exit(if issues.is_empty() { 0 } else { 1 });
        }
        "--help" | "-h" | "help" => usage(),
        other => {
            eprintln!("Unknown command: {}. Use 'formsage help' for usage.", other);
            std::process::exit(1);
        }
    }

    Ok(())
}
