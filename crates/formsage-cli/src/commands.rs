//! Subcommand implementations. Each returns data; `main` prints it.

use std::path::Path;

use anyhow::Context;
use tracing::info;

use formsage_classify::{classify_placeholders, FieldClassifier};
use formsage_cluster::{suggest_groups, SuggestedGroup, TemplateInfo};
use formsage_core::FormSageConfig;
use formsage_rules::{FieldMap, RuleIssue, RuleSnapshot};

/// Classify placeholder tokens, with rules from a file or none at all.
pub fn classify(rules: Option<&Path>, tokens: &[String]) -> anyhow::Result<FieldMap> {
    let snapshot = match rules {
        Some(path) => RuleSnapshot::load(path)
            .with_context(|| format!("Failed to load rules from {}", path.display()))?,
        None => RuleSnapshot::default(),
    };
    info!(
        "Classifying {} placeholders via {:?}",
        tokens.len(),
        FieldClassifier::new(&snapshot).detection_path()
    );
    Ok(classify_placeholders(&snapshot, tokens))
}

/// Suggest document-type groups for a list of template filenames.
///
/// Templates are numbered from 1 in argument order.
pub fn suggest(filenames: &[String], config: &FormSageConfig) -> Vec<SuggestedGroup> {
    let templates: Vec<TemplateInfo> = filenames
        .iter()
        .enumerate()
        .map(|(i, name)| TemplateInfo::new(&(i + 1).to_string(), "", name))
        .collect();
    suggest_groups(&templates, &[], &config.cluster)
}

/// Compile every rule in a rule file and collect the failures.
pub fn validate_rules(path: &Path) -> anyhow::Result<(usize, Vec<RuleIssue>)> {
    let snapshot = RuleSnapshot::load(path)
        .with_context(|| format!("Failed to load rules from {}", path.display()))?;
    let total =
        snapshot.data_type_rules.len() + snapshot.field_rules.len() + snapshot.entity_rules.len();
    Ok((total, snapshot.validate()))
}

pub fn print_issues(total: usize, issues: &[RuleIssue]) {
    println!("=== FormSage Rule Validation ===");
    println!();
    println!("Rules checked:      {}", total);
    println!("Failures:           {}", issues.len());

    if !issues.is_empty() {
        println!();
        println!("Errors:");
        for issue in issues {
            println!("  - [{}] {}: {}", issue.kind, issue.code, issue.message);
        }
    }

    println!();
    if issues.is_empty() {
        println!("Status: OK");
    } else {
        println!("Status: INVALID");
    }
}
