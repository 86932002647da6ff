use crate::api::client::DocmostClient;
use crate::api::pagination::DEFAULT_PAGE_SIZE;
use crate::api::request::ApiRequest;
use crate::cli::command_handlers::{
    confirm_delete, insert_opt, list_items, print_payload, split_csv,
};
use crate::cli::main_types::GroupsCommands;
use crate::error::{AppError, CliError};
use crate::storage::config::EffectiveConfig;
use serde_json::{Map, Value, json};

#[derive(Default)]
pub struct GroupsHandler;

impl GroupsHandler {
    pub fn new() -> Self {
        Self
    }

    pub async fn handle(
        &self,
        command: GroupsCommands,
        client: &DocmostClient,
        config: &EffectiveConfig,
    ) -> Result<(), AppError> {
        match command {
            GroupsCommands::List { query, paging } => {
                let mut template = ApiRequest::fetch("/groups/list");
                if let Some(query) = query {
                    template = template.with_body(json!({"query": query}));
                }
                let payload =
                    list_items(client, template, "groups", &paging, DEFAULT_PAGE_SIZE).await?;
                print_payload(&payload, config.default_format);
                Ok(())
            }
            GroupsCommands::Info { group_id } => {
                let request =
                    ApiRequest::fetch("/groups/info").with_body(json!({"groupId": group_id}));
                let payload = client.execute(&request).await?;
                print_payload(&payload, config.default_format);
                Ok(())
            }
            GroupsCommands::Create { name, description } => {
                let mut body = Map::new();
                body.insert("name".to_string(), Value::String(name.clone()));
                insert_opt(&mut body, "description", description);

                let request = ApiRequest::mutate("/groups/create").with_body(Value::Object(body));
                let payload = client.execute(&request).await?;
                print_payload(&payload, config.default_format);
                println!("✅ Created group '{}'", name);
                Ok(())
            }
            GroupsCommands::Update {
                group_id,
                name,
                description,
            } => {
                let mut body = Map::new();
                body.insert("groupId".to_string(), Value::String(group_id.clone()));
                insert_opt(&mut body, "name", name);
                insert_opt(&mut body, "description", description);

                let request = ApiRequest::mutate("/groups/update").with_body(Value::Object(body));
                let payload = client.execute(&request).await?;
                print_payload(&payload, config.default_format);
                println!("✅ Updated group {}", group_id);
                Ok(())
            }
            GroupsCommands::Delete { group_id, force } => {
                if !confirm_delete(&format!("group {}", group_id), force)? {
                    return Ok(());
                }
                let request =
                    ApiRequest::mutate("/groups/delete").with_body(json!({"groupId": group_id}));
                client.execute(&request).await?;
                println!("✅ Deleted group {}", group_id);
                Ok(())
            }
            GroupsCommands::Members { group_id, paging } => {
                let template =
                    ApiRequest::fetch("/groups/members").with_body(json!({"groupId": group_id}));
                let payload =
                    list_items(client, template, "members", &paging, DEFAULT_PAGE_SIZE).await?;
                print_payload(&payload, config.default_format);
                Ok(())
            }
            GroupsCommands::MembersAdd { group_id, user_ids } => {
                let user_ids = split_csv(&user_ids);
                if user_ids.is_empty() {
                    return Err(CliError::InvalidArguments(
                        "--user-ids requires at least one ID".to_string(),
                    )
                    .into());
                }
                let count = user_ids.len();

                let request = ApiRequest::mutate("/groups/members/add")
                    .with_body(json!({"groupId": group_id, "userIds": user_ids}));
                client.execute(&request).await?;
                println!("✅ Added {} member(s) to group {}", count, group_id);
                Ok(())
            }
            GroupsCommands::MembersRemove { group_id, user_id } => {
                let request = ApiRequest::mutate("/groups/members/remove")
                    .with_body(json!({"groupId": group_id, "userId": user_id}));
                client.execute(&request).await?;
                println!("✅ Removed {} from group {}", user_id, group_id);
                Ok(())
            }
        }
    }
}
