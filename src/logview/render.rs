use std::fmt::Write as _;

use console::style;

use super::group::Transaction;

/// Render one transaction as labeled, color-coded sections followed by a
/// summary. Header sections appear only in verbose mode.
pub fn render_transaction(transaction: &Transaction, verbose: bool) -> String {
    let mut out = String::new();
    let rule = "=".repeat(80);

    let _ = writeln!(out, "\n{}", style(&rule).bold());
    let _ = writeln!(
        out,
        "{}",
        style(format!(
            "REQUEST: {} at {}",
            transaction.kind, transaction.timestamp
        ))
        .bold()
    );
    let _ = writeln!(out, "{}", style(&rule).bold());

    let mut has_request_body = false;
    let mut has_outgoing_request = false;
    let mut has_response = false;

    for detail in &transaction.details {
        let message = &detail.message;
        if let Some(rest) = message.strip_prefix("Request Headers: ") {
            if verbose {
                section(&mut out, &style("REQUEST HEADERS:").blue().to_string(), rest);
            }
        } else if let Some(rest) = message.strip_prefix("Request Body: ") {
            has_request_body = true;
            section(
                &mut out,
                &style("REQUEST BODY:").blue().to_string(),
                &format_json(rest),
            );
        } else if message.starts_with("OUTGOING REQUEST") {
            has_outgoing_request = true;
            section(
                &mut out,
                &style("OUTGOING REQUEST:").magenta().to_string(),
                message.split(" - ").nth(1).unwrap_or(""),
            );
        } else if let Some(rest) = message.strip_prefix("Outgoing Headers: ") {
            if verbose {
                section(&mut out, &style("OUTGOING HEADERS:").magenta().to_string(), rest);
            }
        } else if let Some(rest) = message.strip_prefix("Outgoing Body: ") {
            section(
                &mut out,
                &style("OUTGOING BODY:").magenta().to_string(),
                &format_json(rest),
            );
        } else if message.starts_with("RESPONSE") {
            has_response = true;
            section(
                &mut out,
                &style("RESPONSE:").green().to_string(),
                message.split(" - ").nth(1).unwrap_or(""),
            );
        } else if let Some(rest) = message.strip_prefix("Response Body: ") {
            section(
                &mut out,
                &style("RESPONSE BODY:").green().to_string(),
                &format_json(rest),
            );
        } else if let Some(rest) = message.strip_prefix("Error Response Body: ") {
            section(
                &mut out,
                &style("ERROR RESPONSE BODY:").red().to_string(),
                &format_json(rest),
            );
        } else if detail.level == "ERROR" || message.starts_with("ERROR") {
            section(&mut out, &style("ERROR:").red().to_string(), message);
        }
    }

    let _ = writeln!(out, "\n{}", style("SUMMARY:").yellow());
    let _ = writeln!(out, "  Request Type: {}", style(&transaction.kind).bold());
    let _ = writeln!(out, "  Timestamp: {}", transaction.timestamp);
    if has_request_body {
        let _ = writeln!(out, "  Request Body: {}", style("Yes").green());
    }
    if has_outgoing_request {
        let _ = writeln!(out, "  Forwarded to backend: {}", style("Yes").green());
    }
    if has_response {
        let _ = writeln!(out, "  Received Response: {}", style("Yes").green());
    }
    if transaction.has_error() {
        let _ = writeln!(out, "  Errors: {}", style("Yes").red());
    } else {
        let _ = writeln!(out, "  Errors: {}", style("No").green());
    }

    out
}

fn section(out: &mut String, label: &str, body: &str) {
    let _ = writeln!(out, "\n{label}");
    // Indent every line of the body so multi-line JSON stays inside the section.
    for line in body.lines() {
        let _ = writeln!(out, "  {line}");
    }
    if body.is_empty() {
        let _ = writeln!(out, "  ");
    }
}

/// Pretty-print payloads that parse as JSON; leave everything else as-is.
fn format_json(raw: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(value) => serde_json::to_string_pretty(&value).unwrap_or_else(|_| raw.to_string()),
        Err(_) => raw.to_string(),
    }
}
