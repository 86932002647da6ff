// CLI module - argument parsing and command routing

pub mod command_handlers; // Shared list/print plumbing, users/workspace/search
pub mod comments_handler;
pub mod dispatcher; // Routes parsed commands to handlers
pub mod groups_handler;
pub mod main_types; // clap definitions
pub mod pages_handler;
pub mod spaces_handler;
