//! `docdesk`: command-line client for the document service and the local
//! upload API.
//!
//! | Command | Description |
//! |---------|-------------|
//! | `docdesk serve` | Run the heartbeat and upload API |
//! | `docdesk list` | List documents, optionally filtered |
//! | `docdesk show <id>` | Print one document |
//! | `docdesk create` | Create a document |
//! | `docdesk delete <id>` | Delete a document |
//! | `docdesk upload <file>...` | Upload files to the document service |
//! | `docdesk chat <message>...` | Ask the assistant |

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use docdesk::api::{ApiServer, ApiState};
use docdesk::config::AppConfig;
use docdesk::http::UploadFile;
use docdesk::logging::init_tracing;
use docdesk::model::{
    ChatMessage, ChatRequest, ChatSession, Document, DocumentCreateRequest, DocumentStatus,
    Metadata,
};
use docdesk::service::{DocumentService, MockChatService};
use docdesk::shutdown::Shutdown;
use docdesk::store::chat::{selectors as chat_selectors, ChatAction};
use docdesk::store::document_detail::{selectors as detail_selectors, DocumentDetailAction};
use docdesk::store::documents_list::{selectors as list_selectors, DocumentsListAction};
use docdesk::store::Store;

#[derive(Parser)]
#[command(name = "docdesk", version, about = "Document and chat client")]
struct Cli {
    /// Path to the TOML config file. Defaults to the per-user config dir.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the heartbeat and upload API until Ctrl-C.
    Serve,

    /// List documents.
    List {
        /// Case-insensitive text matched against title, content and tags.
        #[arg(long)]
        filter: Option<String>,

        /// Only documents with this status (draft, published, archived).
        #[arg(long)]
        status: Option<DocumentStatus>,
    },

    /// Print a document.
    Show { id: String },

    /// Create a document.
    Create {
        /// At least 3 characters.
        #[arg(long)]
        title: String,

        /// At least 10 characters.
        #[arg(long)]
        content: String,

        /// Repeatable.
        #[arg(long = "tag")]
        tags: Vec<String>,

        #[arg(long)]
        category: Option<String>,
    },

    /// Delete a document.
    Delete {
        id: String,

        /// Skip the confirmation prompt.
        #[arg(long, short)]
        yes: bool,
    },

    /// Upload one or more files.
    Upload {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Send a message to the assistant.
    Chat {
        #[arg(required = true)]
        message: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    }
    .context("loading configuration")?;
    init_tracing(&config.logging.level);

    let documents = Arc::new(
        DocumentService::new(&config).context("building the document service client")?,
    );

    match cli.command {
        Commands::Serve => serve(&config).await,
        Commands::Upload { files } => upload(&documents, files).await,
        command => {
            let store = Store::new(
                documents,
                Arc::new(MockChatService::from_config(&config.chat)),
            );
            run_store_command(&store, command).await
        }
    }
}

async fn serve(config: &AppConfig) -> Result<()> {
    let shutdown = Shutdown::new();
    shutdown.listen_for_ctrl_c();

    let server = ApiServer::new(config, ApiState::from_config(config), shutdown)
        .context("configuring the API server")?;
    server.run().await.context("running the API server")
}

async fn upload(documents: &DocumentService, files: Vec<PathBuf>) -> Result<()> {
    let mut uploads = Vec::with_capacity(files.len());
    for path in &files {
        let file = UploadFile::from_path(path)
            .await
            .with_context(|| format!("reading {}", path.display()))?;
        uploads.push(file);
    }

    let uploaded = if uploads.len() == 1 {
        let file = uploads.remove(0);
        vec![documents.upload_document_file(file, &Metadata::new()).await?]
    } else {
        documents
            .upload_multiple_files(uploads, &Metadata::new())
            .await?
    };
    for document in &uploaded {
        print_summary(document);
    }
    Ok(())
}

async fn run_store_command(store: &Store, command: Commands) -> Result<()> {
    match command {
        Commands::List { filter, status } => {
            let state = store
                .dispatch_and_wait(DocumentsListAction::Load, |s| !s.documents_list.loading)
                .await?;
            if let Some(error) = list_selectors::select_documents_error(&state) {
                bail!("loading documents failed: {error}");
            }

            let state = match filter {
                Some(filter) => {
                    store
                        .dispatch_and_wait(DocumentsListAction::SetFilter { filter }, |_| true)
                        .await?
                }
                None => state,
            };
            let documents = list_selectors::select_filtered_documents(&state);
            let mut shown = 0;
            for document in documents
                .into_iter()
                .filter(|doc| status.map_or(true, |status| doc.status == status))
            {
                print_summary(document);
                shown += 1;
            }
            tracing::debug!(
                shown,
                total = list_selectors::select_documents_count(&state),
                "Listed documents"
            );
        }

        Commands::Show { id } => {
            let state = store
                .dispatch_and_wait(DocumentDetailAction::Load { id }, |s| {
                    !s.document_detail.loading
                })
                .await?;
            if let Some(error) = detail_selectors::select_document_error(&state) {
                bail!("loading document failed: {error}");
            }
            if let Some(document) = detail_selectors::select_current_document(&state) {
                print_document(document);
            }
        }

        Commands::Create {
            title,
            content,
            tags,
            category,
        } => {
            let request = DocumentCreateRequest {
                title,
                content,
                tags,
                category: category.unwrap_or_default(),
                ..Default::default()
            };
            request.validate().context("invalid document")?;
            let state = store
                .dispatch_and_wait(DocumentsListAction::Create { document: request }, |s| {
                    !s.documents_list.loading
                })
                .await?;
            if let Some(error) = list_selectors::select_documents_error(&state) {
                bail!("creating document failed: {error}");
            }
            if let Some(document) = list_selectors::select_all_documents(&state).last() {
                print_summary(document);
            }
        }

        Commands::Delete { id, yes } => {
            if !yes && !confirm(&format!("Delete document {id}?"))? {
                println!("Aborted.");
                return Ok(());
            }
            let state = store
                .dispatch_and_wait(DocumentsListAction::Delete { id: id.clone() }, |s| {
                    !s.documents_list.loading
                })
                .await?;
            if let Some(error) = list_selectors::select_documents_error(&state) {
                bail!("deleting document failed: {error}");
            }
            println!("Deleted {id}");
        }

        Commands::Chat { message } => {
            let text = message.join(" ");
            store.dispatch(ChatAction::CreateSession {
                session: ChatSession::new(None),
            });
            store.dispatch(ChatAction::AddMessage {
                message: ChatMessage::user(text.clone()),
            });
            let state = store
                .dispatch_and_wait(
                    ChatAction::SendMessage {
                        request: ChatRequest::new(text),
                    },
                    |s| !s.chat.is_typing(),
                )
                .await?;
            if let Some(error) = chat_selectors::select_chat_error(&state) {
                bail!("chat failed: {error}");
            }
            if let Some(reply) = chat_selectors::select_current_messages(&state).last() {
                println!("{}", reply.content);
            }
            for suggestion in chat_selectors::select_chat_suggestions(&state) {
                println!("  - {suggestion}");
            }
        }

        Commands::Serve | Commands::Upload { .. } => {}
    }
    Ok(())
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt} [y/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

fn print_summary(document: &Document) {
    println!("{}\t{}\t{}", document.id, document.status, document.title);
}

fn print_document(document: &Document) {
    println!("id:       {}", document.id);
    println!("title:    {}", document.title);
    println!("status:   {}", document.status);
    if !document.category.is_empty() {
        println!("category: {}", document.category);
    }
    if !document.tags.is_empty() {
        println!("tags:     {}", document.tags.join(", "));
    }
    println!("updated:  {}", document.updated_at.to_rfc3339());
    println!();
    println!("{}", document.content);
}
