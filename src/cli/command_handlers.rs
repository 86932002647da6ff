use crate::api::client::DocmostClient;
use crate::api::pagination::{DEFAULT_PAGE_SIZE, Paginator};
use crate::api::request::ApiRequest;
use crate::cli::main_types::{InvitesCommands, PageArgs, UsersCommands, WorkspaceCommands};
use crate::core::auth;
use crate::display::{self, OutputFormat};
use crate::error::{AppError, CliError};
use crate::storage::config::EffectiveConfig;
use crate::utils::data::extract_items;
use serde_json::{Map, Value, json};

/// Server-side default page size for search, recent and history listings.
pub const SHORT_PAGE_SIZE: usize = 20;

pub fn print_payload(payload: &Value, format: OutputFormat) {
    println!("{}", display::render(payload, format));
}

/// Run a list request: one page by default, every page with `--all`
/// (`--limit` then caps the total instead of sizing the page).
pub async fn list_items(
    client: &DocmostClient,
    template: ApiRequest,
    items_key: &str,
    paging: &PageArgs,
    default_limit: usize,
) -> Result<Value, AppError> {
    if paging.all {
        let items = Paginator::new(client, template, default_limit)
            .with_items_key(items_key)
            .with_max_items(paging.limit)
            .collect_remaining()
            .await?;
        return Ok(Value::Array(items));
    }

    let request = template.with_paging(paging.page, paging.limit.unwrap_or(default_limit));
    let payload = client.execute(&request).await?;
    match extract_items(&payload, items_key) {
        Some(items) => Ok(Value::Array(items.clone())),
        None => Ok(payload),
    }
}

/// Split a comma-separated flag value, trimming whitespace and dropping
/// empty segments.
pub fn split_csv(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(String::from)
        .collect()
}

pub fn insert_opt(body: &mut Map<String, Value>, key: &str, value: Option<String>) {
    if let Some(value) = value {
        body.insert(key.to_string(), Value::String(value));
    }
}

/// Ask before a destructive call unless `--force` was given. Returns false
/// when the user declines.
pub fn confirm_delete(description: &str, force: bool) -> Result<bool, AppError> {
    if force {
        return Ok(true);
    }
    let confirmed = auth::confirm(&format!("Are you sure you want to delete {}?", description))?;
    if !confirmed {
        println!("Cancelled");
    }
    Ok(confirmed)
}

#[derive(Default)]
pub struct UsersHandler;

impl UsersHandler {
    pub fn new() -> Self {
        Self
    }

    pub async fn handle(
        &self,
        command: UsersCommands,
        client: &DocmostClient,
        config: &EffectiveConfig,
    ) -> Result<(), AppError> {
        match command {
            UsersCommands::Me => {
                let payload = client.execute(&ApiRequest::fetch("/users/me")).await?;
                print_payload(&payload, config.default_format);
                Ok(())
            }
            UsersCommands::Update {
                user_id,
                name,
                email,
                role,
            } => {
                let mut body = Map::new();
                body.insert("userId".to_string(), Value::String(user_id.clone()));
                insert_opt(&mut body, "name", name);
                insert_opt(&mut body, "email", email);
                insert_opt(&mut body, "role", role);

                let request = ApiRequest::mutate("/users/update").with_body(Value::Object(body));
                let payload = client.execute(&request).await?;
                print_payload(&payload, config.default_format);
                println!("✅ Updated user {}", user_id);
                Ok(())
            }
        }
    }
}

#[derive(Default)]
pub struct WorkspaceHandler;

impl WorkspaceHandler {
    pub fn new() -> Self {
        Self
    }

    pub async fn handle(
        &self,
        command: WorkspaceCommands,
        client: &DocmostClient,
        config: &EffectiveConfig,
    ) -> Result<(), AppError> {
        match command {
            WorkspaceCommands::Info => {
                let payload = client.execute(&ApiRequest::fetch("/workspace/info")).await?;
                print_payload(&payload, config.default_format);
                Ok(())
            }
            WorkspaceCommands::Update {
                name,
                description,
                logo,
            } => {
                let mut body = Map::new();
                insert_opt(&mut body, "name", name);
                insert_opt(&mut body, "description", description);
                insert_opt(&mut body, "logo", logo);

                let request =
                    ApiRequest::mutate("/workspace/update").with_body(Value::Object(body));
                let payload = client.execute(&request).await?;
                print_payload(&payload, config.default_format);
                println!("✅ Updated workspace");
                Ok(())
            }
            WorkspaceCommands::Members { query, paging } => {
                let mut template = ApiRequest::fetch("/workspace/members");
                if let Some(query) = query {
                    template = template.with_body(json!({"query": query}));
                }
                let payload =
                    list_items(client, template, "members", &paging, DEFAULT_PAGE_SIZE).await?;
                print_payload(&payload, config.default_format);
                Ok(())
            }
            WorkspaceCommands::Invites { command } => {
                self.handle_invites(command, client, config).await
            }
        }
    }

    async fn handle_invites(
        &self,
        command: InvitesCommands,
        client: &DocmostClient,
        config: &EffectiveConfig,
    ) -> Result<(), AppError> {
        match command {
            InvitesCommands::List { paging } => {
                let template = ApiRequest::fetch("/workspace/invitations/list");
                let payload =
                    list_items(client, template, "invitations", &paging, DEFAULT_PAGE_SIZE).await?;
                print_payload(&payload, config.default_format);
                Ok(())
            }
            InvitesCommands::Create { emails, role } => {
                let emails = split_csv(&emails);
                if emails.is_empty() {
                    return Err(CliError::InvalidArguments(
                        "--emails requires at least one address".to_string(),
                    )
                    .into());
                }
                let count = emails.len();

                let request = ApiRequest::mutate("/workspace/invitations/create")
                    .with_body(json!({"emails": emails, "role": role}));
                let payload = client.execute(&request).await?;
                print_payload(&payload, config.default_format);
                println!("✅ Invited {} user(s)", count);
                Ok(())
            }
            InvitesCommands::Revoke { invitation_id } => {
                let request = ApiRequest::mutate("/workspace/invitations/revoke")
                    .with_body(json!({"invitationId": invitation_id}));
                client.execute(&request).await?;
                println!("✅ Revoked invitation {}", invitation_id);
                Ok(())
            }
        }
    }
}

#[derive(Default)]
pub struct SearchHandler;

impl SearchHandler {
    pub fn new() -> Self {
        Self
    }

    /// Full-text search. Falls back to the configured default space when no
    /// `--space-id` is given.
    pub async fn search(
        &self,
        client: &DocmostClient,
        config: &EffectiveConfig,
        query: String,
        space_id: Option<String>,
        paging: PageArgs,
    ) -> Result<(), AppError> {
        let mut body = Map::new();
        body.insert("query".to_string(), Value::String(query));
        let space_id = space_id.or_else(|| config.default_space.clone());
        insert_opt(&mut body, "spaceId", space_id);

        let template = ApiRequest::fetch("/search").with_body(Value::Object(body));
        let payload = list_items(client, template, "results", &paging, SHORT_PAGE_SIZE).await?;
        print_payload(&payload, config.default_format);
        Ok(())
    }

    pub async fn suggest(
        &self,
        client: &DocmostClient,
        config: &EffectiveConfig,
        query: String,
        include_users: bool,
        include_groups: bool,
    ) -> Result<(), AppError> {
        let mut body = Map::new();
        body.insert("query".to_string(), Value::String(query));
        if include_users {
            body.insert("includeUsers".to_string(), Value::Bool(true));
        }
        if include_groups {
            body.insert("includeGroups".to_string(), Value::Bool(true));
        }

        let request = ApiRequest::fetch("/search/suggest").with_body(Value::Object(body));
        let payload = client.execute(&request).await?;
        match extract_items(&payload, "suggestions") {
            Some(items) => print_payload(&Value::Array(items.clone()), config.default_format),
            None => print_payload(&payload, config.default_format),
        }
        Ok(())
    }
}
