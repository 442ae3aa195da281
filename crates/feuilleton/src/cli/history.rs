//! Chapter and attempt log command handlers.

use super::commands::OutputFormat;
use super::print_json;
use feuilleton::{FeuilletonResult, ProjectId, StoryService};

/// Print the accepted chapters of a project.
pub async fn list_chapters(
    service: &StoryService,
    project_id: ProjectId,
    full: bool,
    format: OutputFormat,
) -> FeuilletonResult<()> {
    let chapters = service.chapters(project_id).await?;

    match format {
        OutputFormat::Json => print_json(&chapters)?,
        OutputFormat::Human => {
            for chapter in &chapters {
                println!(
                    "Chapter {} (score {}, {} chars, {})",
                    chapter.chapter_number(),
                    chapter.score(),
                    chapter.content().chars().count(),
                    chapter.created_at()
                );
                if full {
                    println!("{:-<80}", "");
                    println!("{}", chapter.content());
                    println!("{:-<80}", "");
                }
            }
            println!("Total: {} chapters", chapters.len());
        }
    }
    Ok(())
}

/// Print the attempt log of a project, most recent first.
pub async fn list_history(
    service: &StoryService,
    project_id: ProjectId,
    limit: usize,
    format: OutputFormat,
) -> FeuilletonResult<()> {
    let mut entries = service.history(project_id).await?;
    entries.truncate(limit);

    match format {
        OutputFormat::Json => print_json(&entries)?,
        OutputFormat::Human => {
            for entry in &entries {
                let verdict = if *entry.accepted() { "accepted" } else { "rejected" };
                println!(
                    "Chapter {} attempt {}: score {} ({}) at {}",
                    entry.chapter_number(),
                    entry.attempt_number(),
                    entry.score(),
                    verdict,
                    entry.created_at()
                );
                println!("  {}", entry.feedback());
            }
            println!("Showing {} entries", entries.len());
        }
    }
    Ok(())
}
