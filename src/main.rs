use anyhow::Result;
use chain_patcher::{patch_file, PatchOutcome, RuleOutcome, TARGET_FILE};
use colored::Colorize;
use similar::{ChangeTag, TextDiff};
use std::fs;
use std::path::Path;

fn main() -> Result<()> {
    let target = Path::new(TARGET_FILE);

    // Snapshot for the diff output; tolerated to fail, patch_file reports
    // the authoritative error.
    let before = fs::read_to_string(target).ok();

    let outcome = patch_file(target)?;

    match &outcome {
        PatchOutcome::Patched {
            file,
            rule_outcomes,
        } => {
            for (id, outcome) in rule_outcomes {
                match outcome {
                    RuleOutcome::Rewritten { sites } => {
                        println!("{} {}: collapsed {} chain(s)", "✓".green(), id, sites);
                    }
                    RuleOutcome::NoMatch => {
                        println!("{} {}: no match", "⊙".yellow(), id);
                    }
                }
            }

            if let Some(before) = &before {
                if let Ok(after) = fs::read_to_string(file) {
                    display_diff(file, before, &after);
                }
            }

            let applied = rule_outcomes
                .iter()
                .filter(|(_, o)| o.is_rewritten())
                .count();
            println!();
            println!(
                "{} {} of {} rules applied",
                "Summary:".bold(),
                format!("{applied}").green(),
                rule_outcomes.len()
            );
        }
        PatchOutcome::Unchanged { file } => {
            println!(
                "{} {}: nothing to collapse (chains already on single lines)",
                "⊙".yellow(),
                file.display()
            );
        }
    }

    println!("{}", "Fixed SecurityConfig.java".green());
    Ok(())
}

/// Show a unified diff between the original and patched content
fn display_diff(file: &Path, original: &str, modified: &str) {
    println!(
        "\n{}",
        format!("--- {} (original)", file.display()).dimmed()
    );
    println!("{}", format!("+++ {} (patched)", file.display()).dimmed());

    let diff = TextDiff::from_lines(original, modified);

    for change in diff.iter_all_changes() {
        let sign = match change.tag() {
            ChangeTag::Delete => format!("-{}", change).red(),
            ChangeTag::Insert => format!("+{}", change).green(),
            ChangeTag::Equal => format!(" {}", change).normal(),
        };
        print!("{}", sign);
    }
}
