mod token;

use anyhow::{Context, Result};
use bloglist_client::models::{Blog, NewBlog, User};
use bloglist_client::{ClientError, HttpClient};
use clap::{Parser, Subcommand};
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;
use token::TokenManager;
use uuid::Uuid;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, env = "BLOGLIST_SERVER", default_value = "http://localhost:3003")]
    server: String,

    #[arg(long)]
    token_file: Option<PathBuf>,

    /// Print raw JSON instead of formatted text
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Register {
        #[arg(short, long)]
        username: String,

        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        password: String,
    },

    Login {
        #[arg(short, long)]
        username: String,

        #[arg(short, long)]
        password: String,
    },

    /// Show whether a token is stored
    Status,

    /// Forget the stored token
    Logout,

    Users,

    List,

    Get {
        id: Uuid,
    },

    Create {
        #[arg(short, long)]
        title: String,

        #[arg(short, long)]
        url: String,

        #[arg(short, long)]
        author: Option<String>,

        #[arg(short, long)]
        likes: Option<i64>,
    },

    /// Replace every editable field of a blog
    Replace {
        id: Uuid,

        #[arg(short, long)]
        title: String,

        #[arg(short, long)]
        url: String,

        #[arg(short, long)]
        author: Option<String>,

        #[arg(short, long)]
        likes: Option<i64>,
    },

    Like {
        id: Uuid,
    },

    Delete {
        id: Uuid,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("{} {:#}", "error:".red().bold(), e);
        if let Some(client_err) = e.downcast_ref::<ClientError>() {
            if client_err.is_unauthorized() {
                eprintln!("   Login first: bloglist login --username <username> --password <password>");
            } else if client_err.is_not_found() {
                eprintln!("   Tip: use 'bloglist list' to see available blogs");
            }
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let token_manager = TokenManager::new(cli.token_file)?;
    let mut client = HttpClient::new(cli.server)?;
    if let Some(token) = token_manager.load_token()? {
        client.set_token(token);
    }
    let json = cli.json;

    match cli.command {
        Commands::Register {
            username,
            name,
            password,
        } => {
            let user = client.register(username, name, password).await?;
            if json {
                return print_json(&user);
            }
            success("Registration successful");
            print_user(&user);
        }

        Commands::Login { username, password } => {
            let login = client.login(username, password).await?;
            token_manager.save_token(&login.token)?;
            if json {
                return print_json(&login);
            }
            success(&format!("Logged in as {} ({})", login.username, login.name));
            println!("   Token saved to {:?}", token_manager.path());
        }

        Commands::Status => match token_manager.load_token()? {
            Some(token) => {
                let preview: String = token.chars().take(20).collect();
                println!("Token file: {:?}", token_manager.path());
                println!("   Token: {}...", preview);
                println!("   Length: {} characters", token.len());
            }
            None => {
                println!("{}", "No token found".yellow());
                println!("   Please login first: bloglist login --username <username> --password <password>");
            }
        },

        Commands::Logout => {
            if token_manager.clear_token()? {
                success("Token removed");
            } else {
                println!("{}", "No token stored".yellow());
            }
        }

        Commands::Users => {
            let users = client.list_users().await?;
            if json {
                return print_json(&users);
            }
            println!("{} users", users.len());
            for user in &users {
                print_user(user);
            }
        }

        Commands::List => {
            let blogs = client.list_blogs().await?;
            if json {
                return print_json(&blogs);
            }
            if blogs.is_empty() {
                println!("   No blogs found");
            }
            for (i, blog) in blogs.iter().enumerate() {
                println!(
                    "   {}. [{}] {} ({} likes)",
                    i + 1,
                    blog.id,
                    blog.title.bold(),
                    blog.likes
                );
            }
        }

        Commands::Get { id } => {
            let blog = client.get_blog(id).await?;
            if json {
                return print_json(&blog);
            }
            print_blog(&blog);
        }

        Commands::Create {
            title,
            url,
            author,
            likes,
        } => {
            ensure_token(&client)?;
            let blog = client
                .create_blog(&NewBlog {
                    title,
                    author,
                    url,
                    likes,
                })
                .await?;
            if json {
                return print_json(&blog);
            }
            success("Blog created");
            print_blog(&blog);
        }

        Commands::Replace {
            id,
            title,
            url,
            author,
            likes,
        } => {
            let blog = client
                .replace_blog(
                    id,
                    &NewBlog {
                        title,
                        author,
                        url,
                        likes,
                    },
                )
                .await?;
            if json {
                return print_json(&blog);
            }
            success("Blog replaced");
            print_blog(&blog);
        }

        Commands::Like { id } => {
            let blog = client.like_blog(id).await?;
            if json {
                return print_json(&blog);
            }
            success(&format!("{} now has {} likes", blog.title, blog.likes));
        }

        Commands::Delete { id } => {
            client.delete_blog(id).await?;
            success(&format!("Blog {} deleted", id));
        }
    }

    Ok(())
}

fn ensure_token(client: &HttpClient) -> Result<()> {
    client
        .token()
        .map(|_| ())
        .context("not logged in: run 'bloglist login' first")
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

fn print_user(user: &User) {
    println!("   {} ({}) [{}]", user.username.bold(), user.name, user.id);
    for blog in &user.blogs {
        println!("      - {} ({} likes)", blog.title, blog.likes);
    }
}

fn print_blog(blog: &Blog) {
    println!("   ID: {}", blog.id);
    println!("   Title: {}", blog.title.bold());
    if let Some(author) = &blog.author {
        println!("   Author: {}", author);
    }
    println!("   URL: {}", blog.url);
    println!("   Likes: {}", blog.likes);
    println!("   Added by: {} ({})", blog.user.username, blog.user.name);
}
