use clap::{Parser, Subcommand};
use reqwest::header::CONTENT_TYPE;
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "posts-cli")]
#[command(about = "Command-line client for the blog posts server", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:5000", env = "POSTS_URL")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every post
    List,
    /// Show one post
    Get {
        /// Post id, e.g. `my_first_post`
        id: String,
    },
    /// Create a post
    Create {
        #[arg(short, long)]
        title: String,
        #[arg(short, long)]
        content: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let res = match cli.command {
        Commands::List => client.get(format!("{}/posts", base)).send().await?,
        Commands::Get { id } => client.get(format!("{}/posts/{}", base, id)).send().await?,
        Commands::Create { title, content } => {
            client
                .post(format!("{}/posts", base))
                .header(CONTENT_TYPE, "application/json")
                .body(json!({ "title": title, "content": content }).to_string())
                .send()
                .await?
        }
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;

    if !status.is_success() {
        eprintln!("Error: server returned status {}", status);
        eprintln!("Response: {}", text);
        return Ok(());
    }

    match serde_json::from_str::<Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{}", text),
    }
    Ok(())
}
