use crate::api::client::DocmostClient;
use crate::cli::command_handlers::{SearchHandler, UsersHandler, WorkspaceHandler};
use crate::cli::comments_handler::CommentsHandler;
use crate::cli::groups_handler::GroupsHandler;
use crate::cli::main_types::{Cli, Commands};
use crate::cli::pages_handler::PagesHandler;
use crate::cli::spaces_handler::SpacesHandler;
use crate::core::auth::LoginInput;
use crate::error::AppError;
use crate::storage::config::{self, ConfigOverrides, EffectiveConfig, EnvVars, FileConfig};
use crate::storage::credentials::CredentialStore;
use std::path::PathBuf;

pub struct Dispatcher {
    overrides: ConfigOverrides,
    config_path: PathBuf,
    store: CredentialStore,
}

impl Dispatcher {
    /// Capture the command-line overrides. Nothing is read from disk until
    /// a command needs it.
    pub fn new(cli: &Cli) -> Result<Self, AppError> {
        let config_path = match &cli.config {
            Some(path) => PathBuf::from(path),
            None => FileConfig::default_path()?,
        };

        Ok(Self {
            overrides: ConfigOverrides {
                url: cli.url.clone(),
                format: cli.format,
                token: cli.token.clone(),
            },
            config_path,
            store: CredentialStore::new()?,
        })
    }

    pub async fn dispatch(&self, command: Commands) -> Result<(), AppError> {
        match command {
            Commands::Login { email, password } => self.handle_login(email, password).await,
            Commands::Logout => self.handle_logout(),
            Commands::Spaces { command } => {
                let (config, client) = self.connect()?;
                SpacesHandler::new().handle(command, &client, &config).await
            }
            Commands::Pages { command } => {
                let (config, client) = self.connect()?;
                PagesHandler::new().handle(command, &client, &config).await
            }
            Commands::Users { command } => {
                let (config, client) = self.connect()?;
                UsersHandler::new().handle(command, &client, &config).await
            }
            Commands::Workspace { command } => {
                let (config, client) = self.connect()?;
                WorkspaceHandler::new().handle(command, &client, &config).await
            }
            Commands::Groups { command } => {
                let (config, client) = self.connect()?;
                GroupsHandler::new().handle(command, &client, &config).await
            }
            Commands::Comments { command } => {
                let (config, client) = self.connect()?;
                CommentsHandler::new().handle(command, &client, &config).await
            }
            Commands::Search {
                query,
                space_id,
                paging,
            } => {
                let (config, client) = self.connect()?;
                SearchHandler::new()
                    .search(&client, &config, query, space_id, paging)
                    .await
            }
            Commands::Suggest {
                query,
                include_users,
                include_groups,
            } => {
                let (config, client) = self.connect()?;
                SearchHandler::new()
                    .suggest(&client, &config, query, include_users, include_groups)
                    .await
            }
        }
    }

    /// Merge configuration sources and build a client from the result.
    fn connect(&self) -> Result<(EffectiveConfig, DocmostClient), AppError> {
        let env = EnvVars::capture();
        let file = FileConfig::load(&self.config_path)?;
        let stored_token = self.store.load()?;
        let config = config::resolve(&self.overrides, &env, &file, stored_token)?;
        let client = DocmostClient::new(&config)?;
        Ok((config, client))
    }

    /// Login may run before any URL is configured, so the URL falls back
    /// through flag, environment, and config file before prompting.
    async fn handle_login(
        &self,
        email: Option<String>,
        password: Option<String>,
    ) -> Result<(), AppError> {
        let env = EnvVars::capture();
        let file = FileConfig::load(&self.config_path)?;
        let known_url = self
            .overrides
            .url
            .clone()
            .or(env.url)
            .or_else(|| file.url.clone());

        let input = LoginInput::collect(known_url, email, password)?;
        input.validate()?;
        let api_url = input.api_url();

        match DocmostClient::login(&api_url, &input.email, &input.password).await {
            Ok(token) => {
                self.store.save(&token)?;

                // Remember the instance for subsequent commands.
                let mut file = file;
                file.url = Some(api_url.clone());
                file.save(&self.config_path)?;

                println!("✅ Logged in as {}", input.email);
                println!("Connected to: {}", api_url);
                Ok(())
            }
            Err(e) => {
                println!("❌ Login failed: {}", e);
                Err(e)
            }
        }
    }

    fn handle_logout(&self) -> Result<(), AppError> {
        if self.store.load()?.is_some() {
            self.store.clear()?;
            println!("✅ Logged out successfully");
        } else {
            println!("Not currently logged in");
        }
        Ok(())
    }
}
