//! PostgreSQL implementation of the story store traits.

use crate::conversions::{chapter_from_row, entry_from_row, project_from_rows, templates_from_row};
use crate::models::{
    AttemptLogRow, ChapterRow, NewAttemptLogRow, NewChapterRow, NewProjectRow,
    NewPromptTemplatesRow, ProjectRow, PromptTemplatesChangeset, PromptTemplatesRow,
};
use crate::schema::{attempt_logs, chapters, projects, prompt_templates};

use feuilleton_core::{
    AttemptLogEntry, Chapter, NewAttemptLogEntry, NewChapter, NewProject, Project, ProjectId,
    PromptTemplates, PromptTemplatesUpdate, StoryMap,
};
use feuilleton_error::{
    DatabaseError, FeuilletonError, FeuilletonResult, StorageError, StorageErrorKind,
};
use feuilleton_interface::{
    AttemptLogRepository, ChapterRepository, ProjectFilter, ProjectRepository,
};

use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind as DieselKind, Error as DieselError};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, instrument};

diesel::define_sql_function! {
    /// Render a JSONB value as text for substring search.
    fn jsonb_pretty(value: diesel::sql_types::Jsonb) -> diesel::sql_types::Text;
}

fn db_error(err: DieselError) -> FeuilletonError {
    DatabaseError::from(err).into()
}

fn not_found(project_id: ProjectId) -> FeuilletonError {
    StorageError::new(StorageErrorKind::ProjectNotFound(project_id)).into()
}

/// PostgreSQL story store using Diesel ORM.
///
/// Projects live in `projects` with their template set in `prompt_templates`;
/// accepted chapters in `chapters` and the audit trail in `attempt_logs`.
///
/// # Example
/// ```no_run
/// use feuilleton_database::{PostgresStoryStore, establish_connection, run_migrations};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut conn = establish_connection()?;
/// run_migrations(&mut conn)?;
/// let store = PostgresStoryStore::new(conn);
/// # Ok(())
/// # }
/// ```
pub struct PostgresStoryStore {
    /// Database connection wrapped in Arc<Mutex> for async safety.
    conn: Arc<Mutex<PgConnection>>,
}

impl PostgresStoryStore {
    /// Create a store owning a connection.
    pub fn new(conn: PgConnection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Create a store from a shared connection.
    pub fn from_arc(conn: Arc<Mutex<PgConnection>>) -> Self {
        Self { conn }
    }

    fn load_prompts(
        conn: &mut PgConnection,
        row: &ProjectRow,
    ) -> FeuilletonResult<PromptTemplatesRow> {
        PromptTemplatesRow::belonging_to(row)
            .select(PromptTemplatesRow::as_select())
            .first(conn)
            .optional()
            .map_err(db_error)?
            .ok_or_else(|| {
                StorageError::new(StorageErrorKind::Corrupt(format!(
                    "project {} has no prompt templates",
                    row.id
                )))
                .into()
            })
    }
}

#[async_trait]
impl ProjectRepository for PostgresStoryStore {
    #[instrument(skip(self, project, prompts), fields(title = %project.title()))]
    async fn create_project(
        &self,
        project: NewProject,
        prompts: PromptTemplates,
    ) -> FeuilletonResult<Project> {
        let mut conn = self.conn.lock().await;
        let new_row = NewProjectRow::from(&project);

        let (row, prompt_row) = conn
            .transaction::<_, DieselError, _>(|conn| {
                let row: ProjectRow = diesel::insert_into(projects::table)
                    .values(&new_row)
                    .returning(ProjectRow::as_returning())
                    .get_result(conn)?;
                let prompt_row: PromptTemplatesRow = diesel::insert_into(prompt_templates::table)
                    .values(&NewPromptTemplatesRow::for_project(row.id, &prompts))
                    .returning(PromptTemplatesRow::as_returning())
                    .get_result(conn)?;
                Ok((row, prompt_row))
            })
            .map_err(db_error)?;

        debug!(project_id = row.id, "Created project");
        Ok(project_from_rows(row, prompt_row)?)
    }

    async fn get_project(&self, id: ProjectId) -> FeuilletonResult<Option<Project>> {
        let mut conn = self.conn.lock().await;

        let Some(row) = projects::table
            .find(id)
            .select(ProjectRow::as_select())
            .first(&mut *conn)
            .optional()
            .map_err(db_error)?
        else {
            return Ok(None);
        };

        let prompt_row = Self::load_prompts(&mut conn, &row)?;
        Ok(Some(project_from_rows(row, prompt_row)?))
    }

    #[instrument(skip(self))]
    async fn search_projects(&self, filter: &ProjectFilter) -> FeuilletonResult<Vec<Project>> {
        let mut conn = self.conn.lock().await;

        let mut query = projects::table
            .select(ProjectRow::as_select())
            .into_boxed();

        if let Some(title) = &filter.title {
            query = query.filter(projects::title.ilike(format!("%{}%", title)));
        }
        if let Some(genre) = &filter.genre {
            query = query.filter(projects::genre.ilike(format!("%{}%", genre)));
        }
        if let Some(keyword) = &filter.keyword {
            let pattern = format!("%{}%", keyword);
            query = query.filter(
                projects::title
                    .ilike(pattern.clone())
                    .nullable()
                    .or(projects::summary.ilike(pattern.clone()))
                    .or(jsonb_pretty(projects::world_setting)
                        .ilike(pattern)
                        .nullable()),
            );
        }

        query = query.order((projects::created_at.desc(), projects::id.desc()));
        if let Some(offset) = filter.offset {
            query = query.offset(offset as i64);
        }
        if let Some(limit) = filter.limit {
            query = query.limit(limit as i64);
        }

        let rows: Vec<ProjectRow> = query.load(&mut *conn).map_err(db_error)?;
        let prompt_rows: Vec<PromptTemplatesRow> = PromptTemplatesRow::belonging_to(&rows)
            .select(PromptTemplatesRow::as_select())
            .load(&mut *conn)
            .map_err(db_error)?;

        let grouped = prompt_rows.grouped_by(&rows);
        let mut projects = Vec::with_capacity(rows.len());
        for (row, mut prompts) in rows.into_iter().zip(grouped) {
            let prompt_row = prompts.pop().ok_or_else(|| {
                StorageError::new(StorageErrorKind::Corrupt(format!(
                    "project {} has no prompt templates",
                    row.id
                )))
            })?;
            projects.push(project_from_rows(row, prompt_row)?);
        }

        debug!(count = projects.len(), "Project search complete");
        Ok(projects)
    }

    #[instrument(skip(self, world_setting, summary))]
    async fn update_story_state(
        &self,
        id: ProjectId,
        world_setting: StoryMap,
        summary: String,
    ) -> FeuilletonResult<Project> {
        let mut conn = self.conn.lock().await;

        let row = diesel::update(projects::table.find(id))
            .set((
                projects::world_setting.eq(JsonValue::Object(world_setting)),
                projects::summary.eq(Some(summary)),
            ))
            .returning(ProjectRow::as_returning())
            .get_result(&mut *conn)
            .optional()
            .map_err(db_error)?
            .ok_or_else(|| not_found(id))?;

        let prompt_row = Self::load_prompts(&mut conn, &row)?;
        Ok(project_from_rows(row, prompt_row)?)
    }

    #[instrument(skip(self, update))]
    async fn update_prompts(
        &self,
        id: ProjectId,
        update: &PromptTemplatesUpdate,
    ) -> FeuilletonResult<PromptTemplates> {
        let mut conn = self.conn.lock().await;
        let changeset = PromptTemplatesChangeset::from(update);

        // updated_at keeps the changeset non-empty when no field is set.
        let row = diesel::update(prompt_templates::table.filter(prompt_templates::project_id.eq(id)))
            .set((
                &changeset,
                prompt_templates::updated_at.eq(diesel::dsl::now),
            ))
            .returning(PromptTemplatesRow::as_returning())
            .get_result(&mut *conn)
            .optional()
            .map_err(db_error)?
            .ok_or_else(|| not_found(id))?;

        Ok(templates_from_row(row))
    }
}

#[async_trait]
impl ChapterRepository for PostgresStoryStore {
    #[instrument(
        skip(self, chapter),
        fields(project_id = *chapter.project_id(), chapter_number = *chapter.chapter_number())
    )]
    async fn create_chapter(&self, chapter: NewChapter) -> FeuilletonResult<Chapter> {
        let mut conn = self.conn.lock().await;
        let project_id = *chapter.project_id();
        let chapter_number = *chapter.chapter_number();

        let result = diesel::insert_into(chapters::table)
            .values(&NewChapterRow::from(chapter))
            .returning(ChapterRow::as_returning())
            .get_result(&mut *conn);

        match result {
            Ok(row) => Ok(chapter_from_row(row)),
            Err(DieselError::DatabaseError(DieselKind::UniqueViolation, _)) => {
                Err(StorageError::new(StorageErrorKind::DuplicateChapter {
                    project_id,
                    chapter_number,
                })
                .into())
            }
            Err(DieselError::DatabaseError(DieselKind::ForeignKeyViolation, _)) => {
                Err(not_found(project_id))
            }
            Err(e) => Err(db_error(e)),
        }
    }

    async fn latest_chapter(&self, project_id: ProjectId) -> FeuilletonResult<Option<Chapter>> {
        let mut conn = self.conn.lock().await;

        let row = chapters::table
            .filter(chapters::project_id.eq(project_id))
            .order(chapters::chapter_number.desc())
            .select(ChapterRow::as_select())
            .first(&mut *conn)
            .optional()
            .map_err(db_error)?;

        Ok(row.map(chapter_from_row))
    }

    async fn recent_chapters(
        &self,
        project_id: ProjectId,
        count: usize,
    ) -> FeuilletonResult<Vec<Chapter>> {
        if count == 0 {
            return Ok(Vec::new());
        }
        let mut conn = self.conn.lock().await;

        let mut rows: Vec<ChapterRow> = chapters::table
            .filter(chapters::project_id.eq(project_id))
            .order(chapters::chapter_number.desc())
            .limit(count as i64)
            .select(ChapterRow::as_select())
            .load(&mut *conn)
            .map_err(db_error)?;
        rows.reverse();

        Ok(rows.into_iter().map(chapter_from_row).collect())
    }

    async fn list_chapters(&self, project_id: ProjectId) -> FeuilletonResult<Vec<Chapter>> {
        let mut conn = self.conn.lock().await;

        let rows: Vec<ChapterRow> = chapters::table
            .filter(chapters::project_id.eq(project_id))
            .order(chapters::chapter_number.asc())
            .select(ChapterRow::as_select())
            .load(&mut *conn)
            .map_err(db_error)?;

        Ok(rows.into_iter().map(chapter_from_row).collect())
    }
}

#[async_trait]
impl AttemptLogRepository for PostgresStoryStore {
    async fn append_attempt(&self, entry: NewAttemptLogEntry) -> FeuilletonResult<AttemptLogEntry> {
        let mut conn = self.conn.lock().await;
        let project_id = *entry.project_id();

        let result = diesel::insert_into(attempt_logs::table)
            .values(&NewAttemptLogRow::from(entry))
            .returning(AttemptLogRow::as_returning())
            .get_result(&mut *conn);

        match result {
            Ok(row) => Ok(entry_from_row(row)?),
            Err(DieselError::DatabaseError(DieselKind::ForeignKeyViolation, _)) => {
                Err(not_found(project_id))
            }
            Err(e) => Err(db_error(e)),
        }
    }

    async fn list_attempts(&self, project_id: ProjectId) -> FeuilletonResult<Vec<AttemptLogEntry>> {
        let mut conn = self.conn.lock().await;

        let rows: Vec<AttemptLogRow> = attempt_logs::table
            .filter(attempt_logs::project_id.eq(project_id))
            .order((attempt_logs::created_at.desc(), attempt_logs::id.desc()))
            .select(AttemptLogRow::as_select())
            .load(&mut *conn)
            .map_err(db_error)?;

        rows.into_iter()
            .map(|row| entry_from_row(row).map_err(FeuilletonError::from))
            .collect()
    }
}
