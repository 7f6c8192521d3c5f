//! `applicant-status` and `levels` commands

use super::{client_from_env, header, row};
use crate::OutputFormat;
use anyhow::Result;
use owo_colors::OwoColorize;

/// Show one applicant with its review state
pub async fn status(applicant_id: &str, format: OutputFormat) -> Result<()> {
    let client = client_from_env()?;
    let applicant = client.applicants().status(applicant_id).await?;

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&applicant)?);
        return Ok(());
    }

    header("🪪 Applicant");
    row("Id", &applicant.id);
    row("External id", applicant.external_user_id.as_deref().unwrap_or("-"));
    row("Level", applicant.level_name.as_deref().unwrap_or("-"));
    row("Created", applicant.created_at.as_deref().unwrap_or("-"));

    let review = applicant.review.as_ref();
    row(
        "Status",
        review
            .and_then(|r| r.review_status.as_deref())
            .unwrap_or("unknown"),
    );

    if let Some(result) = review.and_then(|r| r.review_result.as_ref()) {
        let answer = result.review_answer.as_deref().unwrap_or("-");
        match answer {
            "GREEN" => row("Answer", answer.green().bold()),
            "RED" => row("Answer", answer.red().bold()),
            _ => row("Answer", answer),
        }
        if !result.reject_labels.is_empty() {
            row("Reject labels", result.reject_labels.join(", ").yellow());
        }
    }
    println!();

    Ok(())
}

/// List the verification levels of the application
pub async fn levels(format: OutputFormat) -> Result<()> {
    let client = client_from_env()?;
    let levels = client.applicants().levels().await?;

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&levels)?);
        return Ok(());
    }

    header("📋 Verification Levels");
    if levels.items.is_empty() {
        println!("  {}", "No levels configured".dimmed());
    }
    for item in &levels.items {
        let name = item.get("name").and_then(|v| v.as_str()).unwrap_or("<unnamed>");
        println!("  {} {}", "•".cyan(), name);
    }
    println!();
    println!("  {} {}", "Total:".dimmed(), levels.items.len());
    println!();

    Ok(())
}
