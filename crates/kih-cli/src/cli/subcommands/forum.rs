use clap::{Args, Subcommand};

/// Angkringan forum commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ForumCommands {
    /// List posts, newest first.
    List(ForumListArgs),
    /// Show a post with its replies.
    Get { id: String },
    /// Publish a post.
    Post(ForumContentArgs),
    /// Change the text of your post.
    Edit {
        id: String,
        #[command(flatten)]
        content: ForumContentArgs,
    },
    /// Delete your post.
    Delete {
        id: String,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
    /// Like or unlike a post (or a reply with `--reply`).
    Like {
        id: String,
        #[arg(long)]
        reply: bool,
    },
    /// Reply to a post.
    Reply {
        post_id: String,
        #[command(flatten)]
        content: ForumContentArgs,
    },
    /// List replies to a post, oldest first.
    Replies { post_id: String },
    /// Delete your reply.
    #[command(name = "delete-reply")]
    DeleteReply {
        id: String,
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Clone, Debug, Default, Args)]
pub struct ForumListArgs {
    /// Only posts by the signed-in user.
    #[arg(long)]
    pub mine: bool,
}

#[derive(Clone, Debug, Default, Args)]
pub struct ForumContentArgs {
    /// Text; words are joined with spaces.
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,
}

impl ForumContentArgs {
    #[must_use]
    pub fn joined(&self) -> String {
        self.text.join(" ")
    }
}
