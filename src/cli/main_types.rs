use crate::display::OutputFormat;
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "docmost")]
#[command(about = "Command line interface for interacting with a Docmost workspace")]
#[command(version)]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Docmost API URL
    #[arg(short, long, global = true)]
    pub url: Option<String>,

    /// Output format
    #[arg(short, long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Config file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Access token, overriding stored credentials
    #[arg(long, global = true)]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Single-page selection by default; `--all` walks every page and `--limit`
/// then caps the total.
#[derive(Args, Debug, Clone, Default)]
pub struct PageArgs {
    /// Page number
    #[arg(short, long, default_value_t = 1)]
    pub page: u64,

    /// Items per page; with --all, caps the total
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Fetch every page instead of one
    #[arg(long, conflicts_with = "page")]
    pub all: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Login and store the access token
    ///
    /// The instance URL comes from --url, DOCMOST_URL, or the config file,
    /// and is prompted for when none is set.
    Login {
        /// Email address
        #[arg(short, long)]
        email: Option<String>,
        /// Password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,
    },
    /// Remove the stored access token
    Logout,
    /// Manage spaces
    Spaces {
        #[command(subcommand)]
        command: SpacesCommands,
    },
    /// Manage pages
    Pages {
        #[command(subcommand)]
        command: PagesCommands,
    },
    /// Manage users
    Users {
        #[command(subcommand)]
        command: UsersCommands,
    },
    /// Manage the workspace
    Workspace {
        #[command(subcommand)]
        command: WorkspaceCommands,
    },
    /// Manage groups
    Groups {
        #[command(subcommand)]
        command: GroupsCommands,
    },
    /// Manage page comments
    Comments {
        #[command(subcommand)]
        command: CommentsCommands,
    },
    /// Search pages and content
    Search {
        query: String,
        /// Filter by space ID
        #[arg(short, long)]
        space_id: Option<String>,
        #[command(flatten)]
        paging: PageArgs,
    },
    /// Get search suggestions (autocomplete)
    Suggest {
        query: String,
        /// Include users in results
        #[arg(long)]
        include_users: bool,
        /// Include groups in results
        #[arg(long)]
        include_groups: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum SpacesCommands {
    /// List all spaces
    List {
        #[command(flatten)]
        paging: PageArgs,
    },
    /// Get space information
    Info { space_id: String },
    /// Create a new space
    Create {
        /// Space name
        #[arg(short, long)]
        name: String,
        /// Space slug (URL identifier)
        #[arg(short, long)]
        slug: String,
        /// Space description
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Update a space
    Update {
        space_id: String,
        /// New space name
        #[arg(short, long)]
        name: Option<String>,
        /// New space description
        #[arg(short, long)]
        description: Option<String>,
        /// Space icon
        #[arg(long)]
        icon: Option<String>,
    },
    /// Delete a space
    Delete {
        space_id: String,
        /// Skip confirmation
        #[arg(long)]
        force: bool,
    },
    /// List space members
    Members {
        space_id: String,
        #[command(flatten)]
        paging: PageArgs,
    },
    /// Add members to a space
    MembersAdd {
        space_id: String,
        /// Comma-separated user IDs
        #[arg(long)]
        user_ids: String,
        /// Role for the new members
        #[arg(short, long, default_value = "member")]
        role: String,
    },
    /// Remove a member from a space
    MembersRemove {
        space_id: String,
        /// User ID to remove
        #[arg(long)]
        user_id: String,
    },
    /// Change a member's role in a space
    MembersChangeRole {
        space_id: String,
        /// User ID to change
        #[arg(long)]
        user_id: Option<String>,
        /// Group ID to change
        #[arg(long)]
        group_id: Option<String>,
        /// New role
        #[arg(short, long)]
        role: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum PagesCommands {
    /// Create a new page
    Create {
        /// Space ID
        #[arg(short, long)]
        space_id: String,
        /// Page title
        #[arg(short, long)]
        title: String,
        /// Page content (JSON or markdown)
        #[arg(long)]
        content: Option<String>,
        /// Parent page ID
        #[arg(short, long)]
        parent_id: Option<String>,
    },
    /// Get page information
    Info { page_id: String },
    /// Update a page
    Update {
        page_id: String,
        /// New page title
        #[arg(short, long)]
        title: Option<String>,
        /// New page content
        #[arg(long)]
        content: Option<String>,
        /// Page icon
        #[arg(long)]
        icon: Option<String>,
        /// Cover photo URL
        #[arg(long)]
        cover_photo: Option<String>,
    },
    /// Delete a page
    Delete {
        page_id: String,
        /// Skip confirmation
        #[arg(long)]
        force: bool,
    },
    /// Move a page to a new location
    Move {
        page_id: String,
        /// New parent page ID (empty string for root)
        #[arg(short, long)]
        parent_id: Option<String>,
        /// Place after this page ID
        #[arg(long)]
        after: Option<String>,
        /// Place before this page ID
        #[arg(long)]
        before: Option<String>,
    },
    /// Get the page tree (sidebar pages) for a space
    Tree { space_id: String },
    /// Get recently updated pages
    Recent {
        /// Filter by space ID
        #[arg(short, long)]
        space_id: Option<String>,
        #[command(flatten)]
        paging: PageArgs,
    },
    /// Get page revision history
    History {
        page_id: String,
        #[command(flatten)]
        paging: PageArgs,
    },
    /// Get details of a single revision
    HistoryInfo { history_id: String },
    /// Get the breadcrumb trail for a page
    Breadcrumbs { page_id: String },
    /// Export a page to HTML or Markdown
    Export {
        page_id: String,
        /// Export format
        #[arg(long, value_parser = ["markdown", "html"], default_value = "markdown")]
        export_format: String,
        /// Output file path (stdout when omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum UsersCommands {
    /// Show the current user
    Me,
    /// Update a user
    Update {
        user_id: String,
        /// New user name
        #[arg(short, long)]
        name: Option<String>,
        /// New email address
        #[arg(short, long)]
        email: Option<String>,
        /// New role
        #[arg(short, long)]
        role: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum WorkspaceCommands {
    /// Show workspace information
    Info,
    /// Update the workspace
    Update {
        /// New workspace name
        #[arg(short, long)]
        name: Option<String>,
        /// New workspace description
        #[arg(short, long)]
        description: Option<String>,
        /// Logo URL
        #[arg(long)]
        logo: Option<String>,
    },
    /// List workspace members
    Members {
        /// Search query
        #[arg(short, long)]
        query: Option<String>,
        #[command(flatten)]
        paging: PageArgs,
    },
    /// Manage workspace invitations
    Invites {
        #[command(subcommand)]
        command: InvitesCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum InvitesCommands {
    /// List pending invitations
    List {
        #[command(flatten)]
        paging: PageArgs,
    },
    /// Invite users to the workspace
    Create {
        /// Comma-separated email addresses
        #[arg(short, long)]
        emails: String,
        /// Role for invitees
        #[arg(short, long)]
        role: String,
    },
    /// Revoke an invitation
    Revoke { invitation_id: String },
}

#[derive(Subcommand, Debug)]
pub enum GroupsCommands {
    /// List groups
    List {
        /// Search query
        #[arg(short, long)]
        query: Option<String>,
        #[command(flatten)]
        paging: PageArgs,
    },
    /// Get group information
    Info { group_id: String },
    /// Create a new group
    Create {
        /// Group name
        #[arg(short, long)]
        name: String,
        /// Group description
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Update a group
    Update {
        group_id: String,
        /// New group name
        #[arg(short, long)]
        name: Option<String>,
        /// New group description
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Delete a group
    Delete {
        group_id: String,
        /// Skip confirmation
        #[arg(long)]
        force: bool,
    },
    /// List group members
    Members {
        group_id: String,
        #[command(flatten)]
        paging: PageArgs,
    },
    /// Add members to a group
    MembersAdd {
        group_id: String,
        /// Comma-separated user IDs
        #[arg(long)]
        user_ids: String,
    },
    /// Remove a member from a group
    MembersRemove {
        group_id: String,
        /// User ID to remove
        #[arg(long)]
        user_id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum CommentsCommands {
    /// List comments on a page
    List {
        page_id: String,
        #[command(flatten)]
        paging: PageArgs,
    },
    /// Comment on a page
    Create {
        page_id: String,
        /// Comment content
        #[arg(long)]
        content: String,
        /// Text selection (JSON)
        #[arg(short, long)]
        selection: Option<String>,
        /// Parent comment ID for replies
        #[arg(short, long)]
        parent_id: Option<String>,
    },
    /// Edit a comment
    Update {
        comment_id: String,
        /// New comment content
        #[arg(long)]
        content: String,
    },
    /// Resolve (or unresolve) a comment
    Resolve {
        comment_id: String,
        /// Mark as unresolved instead
        #[arg(long)]
        unresolved: bool,
    },
    /// Delete a comment
    Delete {
        comment_id: String,
        /// Skip confirmation
        #[arg(long)]
        force: bool,
    },
}
