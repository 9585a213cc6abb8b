use log::{debug, error, info};
use parking_lot::RwLock;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer, LspService, Server};

use crate::config::Config;
use crate::lexer::Lexer;
use crate::pipeline::Pipeline;
use crate::shared::SharedDictionary;

pub struct Backend {
    client: Client,
    dictionary: SharedDictionary,
    config: RwLock<Config>,
    dictionary_override: Option<std::path::PathBuf>,
}

impl Backend {
    fn diagnostics(&self, text: &str) -> Vec<Diagnostic> {
        let config = self.config.read().clone();
        let severity = config.diagnostic_severity.to_lsp_diagnostic();
        let report = self
            .dictionary
            .with(|d| Pipeline::new(&config).run(Lexer::new(text), |w| d.check(w)));

        report
            .misspelled
            .into_iter()
            .map(|t| {
                Diagnostic::new(
                    Range {
                        start: Position::new(t.start.line(), t.start.column()),
                        end: Position::new(t.end.line(), t.end.column()),
                    },
                    Some(severity),
                    Some(NumberOrString::String(t.lexeme.to_string())),
                    Some("wordcheck".to_string()),
                    format!("Unknown word {}", t.lexeme),
                    None,
                    None,
                )
            })
            .collect()
    }

    async fn publish(&self, uri: Url, text: &str, version: Option<i32>) {
        if !self.dictionary.is_loaded() {
            debug!("no dictionary loaded, skipping {uri}");
            return;
        }
        let diagnostics = self.diagnostics(text);
        self.client
            .publish_diagnostics(uri, diagnostics, version)
            .await;
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        let config = Config::from_init_options(params.initialization_options)
            .with_dictionary(self.dictionary_override.clone());
        *self.config.write() = config;

        Ok(InitializeResult {
            server_info: Some(ServerInfo {
                name: "wordcheck".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
            offset_encoding: None,
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Options(
                    TextDocumentSyncOptions {
                        open_close: Some(true),
                        change: Some(TextDocumentSyncKind::FULL),
                        save: Some(TextDocumentSyncSaveOptions::SaveOptions(SaveOptions {
                            include_text: Some(true),
                        })),
                        ..Default::default()
                    },
                )),
                ..ServerCapabilities::default()
            },
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        let path = self.config.read().dictionary.clone();
        let dictionary = self.dictionary.clone();
        let loaded = tokio::task::spawn_blocking(move || dictionary.load(&path)).await;

        match loaded {
            Ok(Ok(())) => {
                let message = format!("loaded {} words", self.dictionary.size());
                info!("{message}");
                self.client.log_message(MessageType::INFO, message).await;
            }
            Ok(Err(err)) => {
                error!("could not load dictionary: {err}");
                self.client
                    .show_message(MessageType::ERROR, format!("wordcheck: {err}"))
                    .await;
            }
            Err(err) => error!("dictionary loader panicked: {err}"),
        }
    }

    async fn shutdown(&self) -> Result<()> {
        debug!("shutdown!");
        if let Err(err) = self.dictionary.unload() {
            debug!("{err}");
        }
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        debug!("file opened {}", params.text_document.uri);
        self.publish(
            params.text_document.uri,
            &params.text_document.text,
            Some(params.text_document.version),
        )
        .await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        debug!("file changed {}", params.text_document.uri);
        // Full sync: the last change carries the whole document.
        let Some(change) = params.content_changes.last() else {
            return;
        };
        self.publish(
            params.text_document.uri,
            &change.text,
            Some(params.text_document.version),
        )
        .await;
    }

    async fn did_save(&self, params: DidSaveTextDocumentParams) {
        debug!("file saved {}", params.text_document.uri);
        if let Some(text) = params.text {
            self.publish(params.text_document.uri, &text, None).await;
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        self.client
            .publish_diagnostics(params.text_document.uri, Vec::new(), None)
            .await;
    }
}

/// Serves the language server over stdio until the client disconnects.
pub async fn serve(dictionary_override: Option<std::path::PathBuf>) {
    let (stdin, stdout) = (tokio::io::stdin(), tokio::io::stdout());

    let (service, socket) = LspService::new(|client| Backend {
        client,
        dictionary: SharedDictionary::new(),
        config: RwLock::new(Config::default()),
        dictionary_override,
    });

    info!("Started language server");
    Server::new(stdin, stdout, socket).serve(service).await;
}
