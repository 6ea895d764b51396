//! Plain-text rendering for the CLI.

use crate::data::{Product, Testimonial, TimeWindow};
use crate::pipeline::PipelineReport;
use crate::sentiment::{ClassifiedReview, SentimentAggregate};

const BAR_WIDTH: usize = 40;
const TEXT_WIDTH: usize = 60;

/// Product listing table
pub fn render_products(products: &[Product]) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:<50} {:>12}\n", "Name", "Price"));
    out.push_str(&format!("{:-<63}\n", ""));
    for product in products {
        out.push_str(&format!("{:<50} {:>12}\n", truncate(&product.name, 50), product.price.to_string()));
    }
    out
}

/// Testimonials, one block per customer
pub fn render_testimonials(testimonials: &[Testimonial]) -> String {
    let mut out = String::new();
    for t in testimonials {
        out.push_str(&format!("[{}]\n", t.user));
        out.push_str(&format!("  {}\n", t.content));
        out.push('\n');
    }
    out
}

/// Classified review rows
pub fn render_classified(rows: &[ClassifiedReview]) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:<12} {:<10} {:>10}  Text\n", "Date", "Sentiment", "Confidence"));
    out.push_str(&format!("{:-<96}\n", ""));
    for row in rows {
        out.push_str(&format!(
            "{:<12} {:<10} {:>10.4}  {}\n",
            row.date,
            row.sentiment_label.as_str(),
            row.confidence,
            truncate(&row.text, TEXT_WIDTH)
        ));
    }
    out
}

/// Horizontal bar per label, sorted by label
pub fn render_aggregates(window: TimeWindow, aggregates: &[SentimentAggregate]) -> String {
    let mut sorted: Vec<&SentimentAggregate> = aggregates.iter().collect();
    sorted.sort_by(|a, b| a.label.cmp(&b.label));

    let max = sorted.iter().map(|a| a.count).max().unwrap_or(0).max(1);

    let mut out = String::new();
    out.push_str(&format!("Sentiment Distribution: {window}\n"));
    for agg in sorted {
        let filled = agg.count * BAR_WIDTH / max;
        out.push_str(&format!(
            "{:<10} {:<width$} {:>4}  avg confidence {:.4}\n",
            agg.label.as_str(),
            "#".repeat(filled),
            agg.count,
            agg.mean_confidence,
            width = BAR_WIDTH
        ));
    }
    out
}

/// Full text report for a completed run
pub fn render_report(report: &PipelineReport) -> String {
    let mut out = render_aggregates(report.window, &report.aggregates);
    out.push('\n');
    out.push_str(&render_classified(&report.classified));
    if report.malformed > 0 {
        out.push_str(&format!("\n{} review(s) skipped for unreadable dates.\n", report.malformed));
    }
    out
}

/// Informational line for a month without reviews
pub fn render_empty(window: TimeWindow) -> String {
    format!("No reviews found for {window}.")
}

fn truncate(text: &str, max_chars: usize) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= max_chars {
        flat
    } else {
        let cut: String = flat.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{cut}...")
    }
}
