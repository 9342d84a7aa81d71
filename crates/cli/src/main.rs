mod client;
mod endpoints;

use anyhow::bail;
use clap::{Args, Parser, Subcommand};

use folio_app::modules::authors::models::{AuthorCreateDto, AuthorUpdateDto};
use folio_app::modules::books::models::{BookCreateDto, BookUpdateDto};
use folio_app::modules::users::UserDto;

use client::ApiClient;
use endpoints::Endpoints;

#[derive(Parser)]
#[command(name = "folio-cli", about = "Command-line client for the Folio catalog API")]
struct Cli {
    /// Base URL of the catalog API.
    #[arg(long, env = "FOLIO_API_URL", default_value = Endpoints::DEFAULT_BASE_URL)]
    base_url: String,

    /// Role claims to present, comma-separated (e.g. "Customer,Administrator").
    #[arg(long, env = "FOLIO_API_ROLES")]
    roles: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Work with author records.
    Authors {
        #[command(subcommand)]
        action: AuthorAction,
    },
    /// Work with book records.
    Books {
        #[command(subcommand)]
        action: BookAction,
    },
    /// Register an account with the identity service.
    Register(Credentials),
    /// Log in against the identity service.
    Login(Credentials),
}

#[derive(Subcommand)]
enum AuthorAction {
    /// List all authors.
    List,
    /// Fetch one author by id.
    Get { id: i64 },
    /// Create an author.
    Create {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
    },
    /// Replace an author record.
    Update {
        id: i64,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
    },
    /// Delete an author record.
    Delete { id: i64 },
}

#[derive(Subcommand)]
enum BookAction {
    /// List all books.
    List,
    /// Fetch one book by id.
    Get { id: i64 },
    /// Create a book.
    Create(BookFields),
    /// Replace a book record.
    Update {
        id: i64,
        #[command(flatten)]
        fields: BookFields,
    },
    /// Delete a book record.
    Delete { id: i64 },
}

#[derive(Args)]
struct BookFields {
    #[arg(long)]
    title: String,
    #[arg(long)]
    year: Option<i32>,
    #[arg(long)]
    isbn: String,
    #[arg(long)]
    summary: Option<String>,
    #[arg(long)]
    image: Option<String>,
    #[arg(long)]
    author_id: i64,
}

#[derive(Args)]
struct Credentials {
    #[arg(long)]
    email: String,
    #[arg(long)]
    password: String,
}

impl Credentials {
    /// Check the payload locally before posting it to the identity service.
    fn into_validated_dto(self) -> anyhow::Result<UserDto> {
        let dto = UserDto {
            email: self.email,
            password: self.password,
        };
        let errors = dto.validate();
        if !errors.is_empty() {
            let summary: Vec<String> = errors
                .iter()
                .map(|e| format!("{}: {}", e.field, e.error))
                .collect();
            bail!("invalid credentials: {}", summary.join("; "));
        }
        Ok(dto)
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::try_init().ok();

    let cli = Cli::parse();
    tracing::debug!(base_url = %cli.base_url, "folio-cli starting");

    let client = ApiClient::new(&cli.base_url, cli.roles.clone());

    match cli.command {
        Command::Authors { action } => run_author_action(&client, action).await?,
        Command::Books { action } => run_book_action(&client, action).await?,
        Command::Register(credentials) => {
            let dto = credentials.into_validated_dto()?;
            client.register(&dto).await?;
            println!("registered {}", dto.email);
        }
        Command::Login(credentials) => {
            let dto = credentials.into_validated_dto()?;
            client.login(&dto).await?;
            println!("logged in as {}", dto.email);
        }
    }

    Ok(())
}

async fn run_author_action(client: &ApiClient, action: AuthorAction) -> anyhow::Result<()> {
    match action {
        AuthorAction::List => print_json(&client.list_authors().await?),
        AuthorAction::Get { id } => print_json(&client.get_author(id).await?),
        AuthorAction::Create {
            first_name,
            last_name,
        } => {
            let created = client
                .create_author(AuthorCreateDto {
                    first_name,
                    last_name,
                })
                .await?;
            print_json(&created)
        }
        AuthorAction::Update {
            id,
            first_name,
            last_name,
        } => {
            client
                .update_author(AuthorUpdateDto {
                    id,
                    first_name,
                    last_name,
                })
                .await?;
            println!("author {id} updated");
            Ok(())
        }
        AuthorAction::Delete { id } => {
            client.delete_author(id).await?;
            println!("author {id} deleted");
            Ok(())
        }
    }
}

async fn run_book_action(client: &ApiClient, action: BookAction) -> anyhow::Result<()> {
    match action {
        BookAction::List => print_json(&client.list_books().await?),
        BookAction::Get { id } => print_json(&client.get_book(id).await?),
        BookAction::Create(fields) => {
            let created = client
                .create_book(BookCreateDto {
                    title: fields.title,
                    year: fields.year,
                    isbn: fields.isbn,
                    summary: fields.summary,
                    image: fields.image,
                    author_id: fields.author_id,
                })
                .await?;
            print_json(&created)
        }
        BookAction::Update { id, fields } => {
            client
                .update_book(BookUpdateDto {
                    id,
                    title: fields.title,
                    year: fields.year,
                    isbn: fields.isbn,
                    summary: fields.summary,
                    image: fields.image,
                    author_id: fields.author_id,
                })
                .await?;
            println!("book {id} updated");
            Ok(())
        }
        BookAction::Delete { id } => {
            client.delete_book(id).await?;
            println!("book {id} deleted");
            Ok(())
        }
    }
}
