//! Feuilleton CLI binary.
//!
//! This binary provides command-line access to Feuilleton:
//! - Create, inspect and search novel projects
//! - Edit prompt templates
//! - Generate the next chapter of a serial
//! - Review accepted chapters and the attempt log

use clap::Parser;
use feuilleton::{
    FeuilletonConfig, FeuilletonResult, GeminiClient, PostgresStoryStore, ProjectFilter,
    RunCoordinator, StoryService, StoryStore, establish_connection, init_logging, run_migrations,
};
use std::sync::Arc;

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{
        Cli, Commands, GenerateOverrides, create_project, handle_prompt_command, list_chapters,
        list_history, run_generation, search_projects, show_project,
    };

    // Load .env for GEMINI_API_KEY and DATABASE_URL
    let _ = dotenvy::dotenv();

    // Parse command-line arguments
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => FeuilletonConfig::from_file(path)?,
        None => FeuilletonConfig::load()?,
    };
    init_logging(config.logging(), cli.verbose)?;

    let store = open_store()?;
    let service = StoryService::new(Arc::clone(&store));

    // Execute the requested command
    match cli.command {
        Commands::Create {
            title,
            genre,
            world,
            rules,
            summary,
        } => {
            create_project(&service, title, genre, world, rules, summary).await?;
        }

        Commands::Show { id, format } => {
            show_project(&service, id, format).await?;
        }

        Commands::Search {
            title,
            genre,
            keyword,
            limit,
            offset,
            format,
        } => {
            let mut filter = ProjectFilter::new().with_limit(limit).with_offset(offset);
            if let Some(title) = title {
                filter = filter.with_title(title);
            }
            if let Some(genre) = genre {
                filter = filter.with_genre(genre);
            }
            if let Some(keyword) = keyword {
                filter = filter.with_keyword(keyword);
            }
            search_projects(&service, filter, format).await?;
        }

        Commands::Prompts(prompt_cmd) => {
            handle_prompt_command(&service, prompt_cmd).await?;
        }

        Commands::Generate {
            id,
            max_attempts,
            min_score,
            context_window,
        } => {
            let overrides = GenerateOverrides {
                max_attempts,
                min_score,
                context_window,
            };
            let client = GeminiClient::from_env(config.model().clone(), config.retry().clone())?;
            let coordinator = RunCoordinator::new(client, store);
            run_generation(&coordinator, id, overrides.apply(*config.generation())).await?;
        }

        Commands::Chapters { id, full, format } => {
            list_chapters(&service, id, full, format).await?;
        }

        Commands::History { id, limit, format } => {
            list_history(&service, id, limit, format).await?;
        }
    }

    Ok(())
}

/// Connect to PostgreSQL and bring the schema up to date.
fn open_store() -> FeuilletonResult<Arc<dyn StoryStore>> {
    let mut conn = establish_connection()?;
    run_migrations(&mut conn)?;
    Ok(Arc::new(PostgresStoryStore::new(conn)))
}
