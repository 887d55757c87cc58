use clap::{Parser, Subcommand};

use blog_shared::dto::{BlogListQuery, BlogRequest};

use crate::client::{BlogClient, Credentials, Reply};
use crate::smoke;

#[derive(Parser)]
#[command(name = "blog-cli")]
#[command(about = "Blog CLI - Command-line client for the Blog API")]
#[command(version)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        env = "BLOG_API_URL",
        default_value = "http://localhost:8080/api",
        help = "Base URL of the API, including the /api prefix"
    )]
    pub base_url: String,

    #[arg(long, global = true, env = "BLOG_USERNAME", help = "Username for authenticated calls")]
    pub username: Option<String>,

    #[arg(
        long,
        global = true,
        env = "BLOG_PASSWORD",
        hide_env_values = true,
        help = "Password for authenticated calls"
    )]
    pub password: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Obtain and print a bearer token")]
    Token,

    #[command(about = "List blogs, optionally filtered")]
    List {
        #[arg(long, help = "Author user id")]
        author: Option<i64>,
        #[arg(long, help = "Case-insensitive title substring")]
        title: Option<String>,
        #[arg(long, help = "Creation day (YYYY-MM-DD)")]
        created_at: Option<String>,
    },

    #[command(about = "Show a single blog")]
    Get { id: i64 },

    #[command(about = "Create a blog as the authenticated user")]
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
    },

    #[command(about = "Replace the title and content of an owned blog")]
    Update {
        id: i64,
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
    },

    #[command(about = "Delete an owned blog")]
    Delete { id: i64 },

    #[command(about = "Blogs created on a day")]
    ByDate { date: String },

    #[command(about = "Blogs created within an inclusive range of days")]
    ByDateRange { start: String, end: String },

    #[command(about = "Blogs created after a day")]
    After { date: String },

    #[command(about = "Blogs created before a day")]
    Before { date: String },

    #[command(about = "Run the end-to-end request script against the server")]
    Smoke,
}

impl Cli {
    fn credentials(&self) -> Option<Credentials> {
        match (&self.username, &self.password) {
            (Some(username), Some(password)) => Some(Credentials {
                username: username.clone(),
                password: password.clone(),
            }),
            _ => None,
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let client = BlogClient::new(&cli.base_url, cli.credentials())?;

    let reply = match cli.command {
        Commands::Token => {
            println!("{}", client.token().await?);
            return Ok(());
        }
        Commands::Smoke => return smoke::run(&client).await,
        Commands::List {
            author,
            title,
            created_at,
        } => {
            let query = BlogListQuery {
                author: author.map(|id| id.to_string()),
                title,
                created_at,
            };
            client.list(&query).await?
        }
        Commands::Get { id } => client.get(id).await?,
        Commands::Create { title, content } => client.create(&blog_body(title, content)).await?,
        Commands::Update { id, title, content } => {
            client.update(id, &blog_body(title, content)).await?
        }
        Commands::Delete { id } => client.delete(id).await?,
        Commands::ByDate { date } => client.by_date(&date).await?,
        Commands::ByDateRange { start, end } => client.by_date_range(&start, &end).await?,
        Commands::After { date } => client.created_after(&date).await?,
        Commands::Before { date } => client.created_before(&date).await?,
    };

    print_reply(&reply.success()?)
}

fn blog_body(title: String, content: String) -> BlogRequest {
    BlogRequest {
        title: Some(title),
        content: Some(content),
    }
}

fn print_reply(reply: &Reply) -> anyhow::Result<()> {
    if reply.body.is_null() {
        println!("{}", reply.status);
    } else {
        println!("{}", serde_json::to_string_pretty(&reply.body)?);
    }
    Ok(())
}
