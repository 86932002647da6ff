use crate::api::client::DocmostClient;
use crate::api::pagination::DEFAULT_PAGE_SIZE;
use crate::api::request::ApiRequest;
use crate::cli::command_handlers::{
    confirm_delete, insert_opt, list_items, print_payload, split_csv,
};
use crate::cli::main_types::SpacesCommands;
use crate::error::{AppError, CliError};
use crate::storage::config::EffectiveConfig;
use serde_json::{Map, Value, json};

#[derive(Default)]
pub struct SpacesHandler;

impl SpacesHandler {
    pub fn new() -> Self {
        Self
    }

    pub async fn handle(
        &self,
        command: SpacesCommands,
        client: &DocmostClient,
        config: &EffectiveConfig,
    ) -> Result<(), AppError> {
        match command {
            SpacesCommands::List { paging } => {
                let template = ApiRequest::fetch("/spaces");
                let payload =
                    list_items(client, template, "spaces", &paging, DEFAULT_PAGE_SIZE).await?;
                print_payload(&payload, config.default_format);
                Ok(())
            }
            SpacesCommands::Info { space_id } => {
                let request =
                    ApiRequest::fetch("/spaces/info").with_body(json!({"spaceId": space_id}));
                let payload = client.execute(&request).await?;
                print_payload(&payload, config.default_format);
                Ok(())
            }
            SpacesCommands::Create {
                name,
                slug,
                description,
            } => {
                let mut body = Map::new();
                body.insert("name".to_string(), Value::String(name.clone()));
                body.insert("slug".to_string(), Value::String(slug));
                insert_opt(&mut body, "description", description);

                let request = ApiRequest::mutate("/spaces/create").with_body(Value::Object(body));
                let payload = client.execute(&request).await?;
                print_payload(&payload, config.default_format);
                println!("✅ Created space '{}'", name);
                Ok(())
            }
            SpacesCommands::Update {
                space_id,
                name,
                description,
                icon,
            } => {
                let mut body = Map::new();
                body.insert("spaceId".to_string(), Value::String(space_id.clone()));
                insert_opt(&mut body, "name", name);
                insert_opt(&mut body, "description", description);
                insert_opt(&mut body, "icon", icon);

                let request = ApiRequest::mutate("/spaces/update").with_body(Value::Object(body));
                let payload = client.execute(&request).await?;
                print_payload(&payload, config.default_format);
                println!("✅ Updated space {}", space_id);
                Ok(())
            }
            SpacesCommands::Delete { space_id, force } => {
                if !confirm_delete(&format!("space {}", space_id), force)? {
                    return Ok(());
                }
                let request =
                    ApiRequest::mutate("/spaces/delete").with_body(json!({"spaceId": space_id}));
                client.execute(&request).await?;
                println!("✅ Deleted space {}", space_id);
                Ok(())
            }
            SpacesCommands::Members { space_id, paging } => {
                let template =
                    ApiRequest::fetch("/spaces/members").with_body(json!({"spaceId": space_id}));
                let payload =
                    list_items(client, template, "members", &paging, DEFAULT_PAGE_SIZE).await?;
                print_payload(&payload, config.default_format);
                Ok(())
            }
            SpacesCommands::MembersAdd {
                space_id,
                user_ids,
                role,
            } => {
                let user_ids = split_csv(&user_ids);
                if user_ids.is_empty() {
                    return Err(CliError::InvalidArguments(
                        "--user-ids requires at least one ID".to_string(),
                    )
                    .into());
                }
                let count = user_ids.len();

                let request = ApiRequest::mutate("/spaces/members/add").with_body(
                    json!({"spaceId": space_id, "userIds": user_ids, "role": role}),
                );
                client.execute(&request).await?;
                println!("✅ Added {} member(s) to space {}", count, space_id);
                Ok(())
            }
            SpacesCommands::MembersRemove { space_id, user_id } => {
                let request = ApiRequest::mutate("/spaces/members/remove")
                    .with_body(json!({"spaceId": space_id, "userId": user_id}));
                client.execute(&request).await?;
                println!("✅ Removed {} from space {}", user_id, space_id);
                Ok(())
            }
            SpacesCommands::MembersChangeRole {
                space_id,
                user_id,
                group_id,
                role,
            } => {
                if user_id.is_some() == group_id.is_some() {
                    return Err(CliError::InvalidArguments(
                        "exactly one of --user-id or --group-id is required".to_string(),
                    )
                    .into());
                }
                let mut body = Map::new();
                body.insert("spaceId".to_string(), Value::String(space_id.clone()));
                body.insert("role".to_string(), Value::String(role));
                insert_opt(&mut body, "userId", user_id);
                insert_opt(&mut body, "groupId", group_id);

                let request =
                    ApiRequest::mutate("/spaces/members/change-role").with_body(Value::Object(body));
                client.execute(&request).await?;
                println!("✅ Changed member role in space {}", space_id);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::OutputFormat;
    use crate::error::CliError;
    use crate::utils::retry::RetryPolicy;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_setup(server: &MockServer) -> (EffectiveConfig, DocmostClient) {
        let config = EffectiveConfig {
            api_url: server.uri(),
            token: Some("tok".to_string()),
            default_format: OutputFormat::Json,
            default_space: None,
        };
        let client = DocmostClient::with_retry(&config, RetryPolicy::disabled()).expect("client");
        (config, client)
    }

    #[tokio::test]
    async fn test_delete_with_force_skips_confirmation() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/spaces/delete"))
            .and(body_json(json!({"spaceId": "s1"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {}, "success": true, "status": 200
            })))
            .expect(1)
            .mount(&server)
            .await;

        let (config, client) = test_setup(&server);
        let command = SpacesCommands::Delete {
            space_id: "s1".to_string(),
            force: true,
        };
        SpacesHandler::new()
            .handle(command, &client, &config)
            .await
            .expect("delete");
    }

    #[tokio::test]
    async fn test_members_add_rejects_empty_ids() {
        let server = MockServer::start().await;
        let (config, client) = test_setup(&server);

        let command = SpacesCommands::MembersAdd {
            space_id: "s1".to_string(),
            user_ids: " , ".to_string(),
            role: "member".to_string(),
        };
        let error = SpacesHandler::new()
            .handle(command, &client, &config)
            .await
            .expect_err("empty IDs");
        assert!(matches!(
            error,
            AppError::Cli(CliError::InvalidArguments(_))
        ));
    }

    #[tokio::test]
    async fn test_change_role_requires_exactly_one_target() {
        let server = MockServer::start().await;
        let (config, client) = test_setup(&server);
        let handler = SpacesHandler::new();

        let neither = SpacesCommands::MembersChangeRole {
            space_id: "s1".to_string(),
            user_id: None,
            group_id: None,
            role: "admin".to_string(),
        };
        assert!(handler.handle(neither, &client, &config).await.is_err());

        let both = SpacesCommands::MembersChangeRole {
            space_id: "s1".to_string(),
            user_id: Some("u1".to_string()),
            group_id: Some("g1".to_string()),
            role: "admin".to_string(),
        };
        assert!(handler.handle(both, &client, &config).await.is_err());
    }
}
