use crate::api::client::DocmostClient;
use crate::api::pagination::DEFAULT_PAGE_SIZE;
use crate::api::request::ApiRequest;
use crate::cli::command_handlers::{confirm_delete, insert_opt, list_items, print_payload};
use crate::cli::main_types::CommentsCommands;
use crate::error::AppError;
use crate::storage::config::EffectiveConfig;
use serde_json::{Map, Value, json};

#[derive(Default)]
pub struct CommentsHandler;

impl CommentsHandler {
    pub fn new() -> Self {
        Self
    }

    pub async fn handle(
        &self,
        command: CommentsCommands,
        client: &DocmostClient,
        config: &EffectiveConfig,
    ) -> Result<(), AppError> {
        match command {
            CommentsCommands::List { page_id, paging } => {
                let template =
                    ApiRequest::fetch("/comments/list").with_body(json!({"pageId": page_id}));
                let payload =
                    list_items(client, template, "items", &paging, DEFAULT_PAGE_SIZE).await?;
                print_payload(&payload, config.default_format);
                Ok(())
            }
            CommentsCommands::Create {
                page_id,
                content,
                selection,
                parent_id,
            } => {
                let mut body = Map::new();
                body.insert("pageId".to_string(), Value::String(page_id.clone()));
                body.insert("content".to_string(), Value::String(content));
                insert_opt(&mut body, "selection", selection);
                insert_opt(&mut body, "parentCommentId", parent_id);

                let request = ApiRequest::mutate("/comments/create").with_body(Value::Object(body));
                let payload = client.execute(&request).await?;
                print_payload(&payload, config.default_format);
                println!("✅ Commented on page {}", page_id);
                Ok(())
            }
            CommentsCommands::Update {
                comment_id,
                content,
            } => {
                let request = ApiRequest::mutate("/comments/update")
                    .with_body(json!({"commentId": comment_id, "content": content}));
                let payload = client.execute(&request).await?;
                print_payload(&payload, config.default_format);
                println!("✅ Updated comment {}", comment_id);
                Ok(())
            }
            CommentsCommands::Resolve {
                comment_id,
                unresolved,
            } => {
                // The API reads `resolved` as a string, not a boolean.
                let resolved = if unresolved { "false" } else { "true" };
                let request = ApiRequest::mutate("/comments/resolve")
                    .with_body(json!({"commentId": comment_id, "resolved": resolved}));
                client.execute(&request).await?;
                if unresolved {
                    println!("✅ Reopened comment {}", comment_id);
                } else {
                    println!("✅ Resolved comment {}", comment_id);
                }
                Ok(())
            }
            CommentsCommands::Delete { comment_id, force } => {
                if !confirm_delete(&format!("comment {}", comment_id), force)? {
                    return Ok(());
                }
                let request = ApiRequest::mutate("/comments/delete")
                    .with_body(json!({"commentId": comment_id}));
                client.execute(&request).await?;
                println!("✅ Deleted comment {}", comment_id);
                Ok(())
            }
        }
    }
}
