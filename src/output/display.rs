//! Display functions for command results

use super::formatters::{plural, ratio_bar};
use crate::commands::{LatestPuzzle, RenderResult, ScrapeReport, ScrapeSummary};
use crate::jumble::JumbleSummary;
use crate::publish::PublishSummary;
use colored::Colorize;

fn header(title: &str) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", title.bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());
}

/// Print the tally for one source
pub fn print_scrape_summary(source: &str, summary: &ScrapeSummary) {
    println!("\n🐝 {}", source.bright_yellow().bold());
    println!(
        "   Accepted:       {} [{}]",
        summary.accepted.to_string().green().bold(),
        ratio_bar(summary.accepted, summary.merged(), 20).green()
    );
    println!("   Duplicate date: {}", summary.duplicate_date);
    println!("   Same letters:   {}", summary.same_letters);
    if summary.skipped_known > 0 {
        println!(
            "   Already known:  {}",
            summary.skipped_known.to_string().bright_black()
        );
    }
    if summary.failed > 0 {
        println!("   Failed:         {}", summary.failed.to_string().red());
    }
}

/// Print the result of a full scrape
pub fn print_scrape_report(report: &ScrapeReport) {
    header("SCRAPE RESULTS");
    for (source, summary) in &report.sources {
        print_scrape_summary(source, summary);
    }
    if report.patched_ids > 0 {
        println!(
            "\nAssigned ids to {}",
            plural(report.patched_ids, "older puzzle")
        );
    }
    println!(
        "\n{}",
        format!("✅ Archive holds {}", plural(report.total, "puzzle"))
            .green()
            .bold()
    );
}

/// Print the result of a jumble pass
pub fn print_jumble_summary(summary: &JumbleSummary) {
    header("JUMBLE RESULTS");
    println!("   Copied:           {}", summary.added);
    println!(
        "   Jumbled:          {}",
        summary.jumbled.to_string().bright_yellow().bold()
    );
    if summary.patched_originals > 0 {
        println!("   Originals filled: {}", summary.patched_originals);
    }
    println!(
        "\n{}",
        format!("✅ Jumbled archive holds {}", plural(summary.total, "puzzle"))
            .green()
            .bold()
    );
}

/// Print where a rendered page went
pub fn print_render_result(result: &RenderResult) {
    println!(
        "📄 {} {}",
        "Rendered".green().bold(),
        result.page.display().to_string().bright_yellow()
    );
    if result.index_updated {
        println!("   Linked from index");
    }
}

/// Print what a publish run stored and what it could not
pub fn print_publish_summary(summary: &PublishSummary) {
    header("PUBLISH RESULTS");
    for name in &summary.uploaded {
        println!("   {} {name}", "✓".green());
    }
    for (name, reason) in &summary.failed {
        println!("   {} {name}: {}", "✗".red(), reason.red());
    }

    println!();
    if summary.is_complete() {
        println!(
            "{}",
            format!("✅ Uploaded {}", plural(summary.uploaded.len(), "file"))
                .green()
                .bold()
        );
    } else {
        println!(
            "{}",
            format!("❌ {} not uploaded", plural(summary.failed.len(), "file"))
                .red()
                .bold()
        );
    }
}

/// Print the newest playable puzzle
pub fn print_latest(latest: Option<&LatestPuzzle>) {
    match latest {
        Some(puzzle) => {
            println!(
                "🐝 Latest puzzle: {} ({})",
                puzzle.id.as_str().bright_yellow().bold(),
                puzzle.date
            );
            println!("   {}", puzzle.link.underline());
        }
        None => println!("{}", "No puzzle with an id found".yellow()),
    }
}
