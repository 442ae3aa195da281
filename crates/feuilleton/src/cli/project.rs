//! Project and prompt template command handlers.

use super::commands::{OutputFormat, PromptCommands};
use super::print_json;
use feuilleton::{
    ConfigError, FeuilletonResult, JsonError, NewProject, Project, ProjectFilter, PromptKind,
    PromptTemplatesUpdate, StoryMap, StoryService, value_to_prompt_text,
};
use std::path::PathBuf;
use strum::IntoEnumIterator;

/// Parse a JSON object passed on the command line.
fn parse_object(flag: &str, raw: Option<String>) -> FeuilletonResult<StoryMap> {
    let Some(raw) = raw else {
        return Ok(StoryMap::new());
    };
    match serde_json::from_str::<serde_json::Value>(&raw) {
        Ok(serde_json::Value::Object(map)) => Ok(map),
        Ok(_) => Err(JsonError::new(format!("--{}", flag), "must be a JSON object"))?,
        Err(e) => Err(JsonError::new(format!("--{}", flag), format!("not valid JSON: {}", e)))?,
    }
}

/// Create a project with the default templates.
pub async fn create_project(
    service: &StoryService,
    title: String,
    genre: Option<String>,
    world: Option<String>,
    rules: Option<String>,
    summary: Option<String>,
) -> FeuilletonResult<()> {
    let new_project = NewProject::builder()
        .title(title)
        .genre(genre)
        .world_setting(parse_object("world", world)?)
        .rules(parse_object("rules", rules)?)
        .summary(summary)
        .build()
        .map_err(|e| ConfigError::new(format!("Invalid project: {}", e)))?;

    let project = service.create_project(new_project).await?;
    println!("Created project {} ({})", project.id(), project.title());
    Ok(())
}

/// Print one project.
pub async fn show_project(
    service: &StoryService,
    id: i32,
    format: OutputFormat,
) -> FeuilletonResult<()> {
    let project = service.get_project(id).await?;

    match format {
        OutputFormat::Json => print_json(&project)?,
        OutputFormat::Human => {
            print_header(&project);
            println!(
                "  Summary: {}",
                project.summary().as_deref().unwrap_or("(none yet)")
            );
            print_map("World", project.world_setting());
            print_map("Rules", project.rules());
        }
    }
    Ok(())
}

/// Search projects and print the matches.
pub async fn search_projects(
    service: &StoryService,
    filter: ProjectFilter,
    format: OutputFormat,
) -> FeuilletonResult<()> {
    let projects = service.search_projects(&filter).await?;

    match format {
        OutputFormat::Json => print_json(&projects)?,
        OutputFormat::Human => {
            println!("{:-<80}", "");
            for project in &projects {
                print_header(project);
                println!("{:-<80}", "");
            }
            println!("Total: {} projects", projects.len());
        }
    }
    Ok(())
}

/// Handle prompt template commands.
pub async fn handle_prompt_command(
    service: &StoryService,
    cmd: PromptCommands,
) -> FeuilletonResult<()> {
    match cmd {
        PromptCommands::Show { id, kind } => {
            let project = service.get_project(id).await?;
            let kinds: Vec<PromptKind> = match kind {
                Some(kind) => vec![kind],
                None => PromptKind::iter().collect(),
            };
            for kind in kinds {
                println!("[{}]", kind);
                println!("{}", project.prompts().get(kind));
                println!();
            }
            Ok(())
        }
        PromptCommands::Update {
            id,
            kind,
            text,
            file,
        } => {
            let template = read_template(text, file)?;
            let update = PromptTemplatesUpdate::default().with_kind(kind, template);
            service.update_prompts(id, update).await?;
            println!("Updated {} template of project {}", kind, id);
            Ok(())
        }
    }
}

fn read_template(text: Option<String>, file: Option<PathBuf>) -> FeuilletonResult<String> {
    match (text, file) {
        (Some(text), _) => Ok(text),
        (None, Some(path)) => {
            std::fs::read_to_string(&path).map_err(|e| ConfigError::unreadable(&path, e).into())
        }
        (None, None) => Err(ConfigError::new("Pass --text or --file"))?,
    }
}

fn print_header(project: &Project) {
    println!("Project {}: {}", project.id(), project.title());
    if let Some(genre) = project.genre() {
        println!("  Genre: {}", genre);
    }
    println!("  Created: {}", project.created_at());
}

fn print_map(label: &str, map: &StoryMap) {
    if map.is_empty() {
        println!("  {}: (empty)", label);
        return;
    }
    println!("  {}:", label);
    for (key, value) in map {
        println!("    {}: {}", key, value_to_prompt_text(value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feuilleton::FeuilletonErrorKind;

    fn json_error(raw: &str) -> JsonError {
        match parse_object("world", Some(raw.to_string())).unwrap_err().kind() {
            FeuilletonErrorKind::Json(e) => e.clone(),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_object_accepts_objects_and_absence() {
        let map = parse_object("world", Some(r#"{"city": "Vell"}"#.to_string())).unwrap();
        assert_eq!(map["city"], "Vell");
        assert!(parse_object("rules", None).unwrap().is_empty());
    }

    #[test]
    fn test_parse_object_names_the_flag() {
        let err = json_error("[1, 2]");
        assert_eq!(err.input, "--world");
        assert_eq!(err.message, "must be a JSON object");

        let err = json_error("{city");
        assert_eq!(err.input, "--world");
        assert!(err.message.starts_with("not valid JSON"));
    }

    #[test]
    fn test_missing_template_file_is_reported() {
        let err = read_template(None, Some(PathBuf::from("/nonexistent/write.txt"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read /nonexistent/write.txt"));
    }
}
