use crate::api::client::DocmostClient;
use crate::api::request::ApiRequest;
use crate::cli::command_handlers::{
    SHORT_PAGE_SIZE, confirm_delete, insert_opt, list_items, print_payload,
};
use crate::cli::main_types::PagesCommands;
use crate::error::{AppError, StorageError};
use crate::storage::config::EffectiveConfig;
use crate::utils::data::extract_items;
use serde_json::{Map, Value, json};
use std::fs;

#[derive(Default)]
pub struct PagesHandler;

impl PagesHandler {
    pub fn new() -> Self {
        Self
    }

    pub async fn handle(
        &self,
        command: PagesCommands,
        client: &DocmostClient,
        config: &EffectiveConfig,
    ) -> Result<(), AppError> {
        match command {
            PagesCommands::Create {
                space_id,
                title,
                content,
                parent_id,
            } => {
                let mut body = Map::new();
                body.insert("spaceId".to_string(), Value::String(space_id));
                body.insert("title".to_string(), Value::String(title.clone()));
                insert_opt(&mut body, "content", content);
                insert_opt(&mut body, "parentPageId", parent_id);

                let request = ApiRequest::mutate("/pages/create").with_body(Value::Object(body));
                let payload = client.execute(&request).await?;
                print_payload(&payload, config.default_format);
                println!("✅ Created page '{}'", title);
                Ok(())
            }
            PagesCommands::Info { page_id } => {
                let request =
                    ApiRequest::fetch("/pages/info").with_body(json!({"pageId": page_id}));
                let payload = client.execute(&request).await?;
                print_payload(&payload, config.default_format);
                Ok(())
            }
            PagesCommands::Update {
                page_id,
                title,
                content,
                icon,
                cover_photo,
            } => {
                let mut body = Map::new();
                body.insert("pageId".to_string(), Value::String(page_id.clone()));
                insert_opt(&mut body, "title", title);
                insert_opt(&mut body, "content", content);
                insert_opt(&mut body, "icon", icon);
                insert_opt(&mut body, "coverPhoto", cover_photo);

                let request = ApiRequest::mutate("/pages/update").with_body(Value::Object(body));
                let payload = client.execute(&request).await?;
                print_payload(&payload, config.default_format);
                println!("✅ Updated page {}", page_id);
                Ok(())
            }
            PagesCommands::Delete { page_id, force } => {
                if !confirm_delete(&format!("page {}", page_id), force)? {
                    return Ok(());
                }
                let request =
                    ApiRequest::mutate("/pages/delete").with_body(json!({"pageId": page_id}));
                client.execute(&request).await?;
                println!("✅ Deleted page {}", page_id);
                Ok(())
            }
            PagesCommands::Move {
                page_id,
                parent_id,
                after,
                before,
            } => {
                let mut body = Map::new();
                body.insert("pageId".to_string(), Value::String(page_id.clone()));
                // An empty --parent-id moves the page to the space root,
                // which the API expects as an explicit null.
                if let Some(parent) = parent_id {
                    let value = if parent.is_empty() {
                        Value::Null
                    } else {
                        Value::String(parent)
                    };
                    body.insert("parentPageId".to_string(), value);
                }
                insert_opt(&mut body, "afterPageId", after);
                insert_opt(&mut body, "beforePageId", before);

                let request = ApiRequest::mutate("/pages/move").with_body(Value::Object(body));
                client.execute(&request).await?;
                println!("✅ Moved page {}", page_id);
                Ok(())
            }
            PagesCommands::Tree { space_id } => {
                let request = ApiRequest::fetch("/pages/sidebar-pages")
                    .with_body(json!({"spaceId": space_id}));
                let payload = client.execute(&request).await?;
                match extract_items(&payload, "pages") {
                    Some(items) => {
                        print_payload(&Value::Array(items.clone()), config.default_format)
                    }
                    None => print_payload(&payload, config.default_format),
                }
                Ok(())
            }
            PagesCommands::Recent { space_id, paging } => {
                let mut template = ApiRequest::fetch("/pages/recent");
                if let Some(space_id) = space_id {
                    template = template.with_body(json!({"spaceId": space_id}));
                }
                let payload =
                    list_items(client, template, "pages", &paging, SHORT_PAGE_SIZE).await?;
                print_payload(&payload, config.default_format);
                Ok(())
            }
            PagesCommands::History { page_id, paging } => {
                let template =
                    ApiRequest::fetch("/pages/history").with_body(json!({"pageId": page_id}));
                let payload =
                    list_items(client, template, "history", &paging, SHORT_PAGE_SIZE).await?;
                print_payload(&payload, config.default_format);
                Ok(())
            }
            PagesCommands::HistoryInfo { history_id } => {
                let request = ApiRequest::fetch("/pages/history/info")
                    .with_body(json!({"historyId": history_id}));
                let payload = client.execute(&request).await?;
                print_payload(&payload, config.default_format);
                Ok(())
            }
            PagesCommands::Breadcrumbs { page_id } => {
                let request =
                    ApiRequest::fetch("/pages/breadcrumbs").with_body(json!({"pageId": page_id}));
                let payload = client.execute(&request).await?;
                match extract_items(&payload, "items") {
                    Some(items) => {
                        print_payload(&Value::Array(items.clone()), config.default_format)
                    }
                    None => print_payload(&payload, config.default_format),
                }
                Ok(())
            }
            PagesCommands::Export {
                page_id,
                export_format,
                output,
            } => {
                let request = ApiRequest::fetch("/pages/export")
                    .with_body(json!({"pageId": page_id, "format": export_format}));
                let payload = client.execute(&request).await?;
                let content = export_content(&payload);

                match output {
                    Some(path) => {
                        fs::write(&path, &content).map_err(|source| StorageError::FileIo {
                            path: path.clone(),
                            source,
                        })?;
                        println!("✅ Exported page {} to {}", page_id, path);
                    }
                    None => println!("{}", content),
                }
                Ok(())
            }
        }
    }
}

/// The export payload carries the document under `content`, some server
/// versions use `data`, and older ones return a bare string.
fn export_content(payload: &Value) -> String {
    let field = payload.get("content").or_else(|| payload.get("data"));
    match field {
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
        None => match payload {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        },
    }
}
