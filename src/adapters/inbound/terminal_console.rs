//! Terminal Console
//!
//! Line-oriented front-end for the console. Reads commands, hands them to
//! `ConsoleService` and renders the state it publishes.

use super::command::{Command, HELP};
use super::view::render;
use crate::application::ConsoleService;
use crate::domain::entities::Route;
use crate::domain::services::RouteFilter;
use crate::infrastructure::ShutdownController;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

/// What to print after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Re-render the console from the latest state.
    Render,
    /// Print a one-off message.
    Message(String),
    Quit,
}

/// Interactive console bound to stdin/stdout.
pub struct TerminalConsole {
    service: Arc<ConsoleService>,
    shutdown: ShutdownController,
}

impl TerminalConsole {
    pub fn new(service: Arc<ConsoleService>, shutdown: ShutdownController) -> Self {
        Self { service, shutdown }
    }

    /// Run against the process stdin/stdout until `quit`, EOF or shutdown.
    pub async fn run(&self) -> anyhow::Result<()> {
        let reader = BufReader::new(tokio::io::stdin());
        let writer = tokio::io::stdout();
        self.run_with(reader, writer).await
    }

    /// Run against arbitrary streams.
    pub async fn run_with<R, W>(&self, reader: R, mut writer: W) -> anyhow::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();
        let mut shutdown_rx = self.shutdown.subscribe();
        let mut view = self.service.subscribe();

        self.service.load().await;
        let frame = render(&view.borrow_and_update());
        writer.write_all(frame.as_bytes()).await?;

        loop {
            if self.shutdown.is_shutdown() {
                break;
            }

            writer.write_all(b"> ").await?;
            writer.flush().await?;

            let line = tokio::select! {
                _ = shutdown_rx.recv() => break,
                line = lines.next_line() => line?,
            };
            let Some(line) = line else {
                tracing::debug!("input closed");
                break;
            };

            let output = match self.handle(&line).await {
                Step::Quit => break,
                Step::Render => render(&view.borrow_and_update()),
                Step::Message(message) => format!("{}\n", message),
            };
            writer.write_all(output.as_bytes()).await?;
        }

        writer.flush().await?;
        Ok(())
    }

    /// Execute one command line.
    pub async fn handle(&self, line: &str) -> Step {
        let command = match Command::parse(line) {
            Ok(command) => command,
            Err(e) => return Step::Message(e.to_string()),
        };
        tracing::debug!("command {:?}", command);

        match command {
            Command::Refresh => {
                self.service.load().await;
                Step::Render
            }
            Command::FilterGroup(group) => {
                let filters = RouteFilter {
                    group,
                    ..self.service.state().filters
                };
                self.service.set_filters(filters).await;
                Step::Render
            }
            Command::FilterKeyword(keyword) => {
                let filters = RouteFilter {
                    keyword,
                    ..self.service.state().filters
                };
                self.service.set_filters(filters).await;
                Step::Render
            }
            Command::FilterClear => {
                self.service.set_filters(RouteFilter::default()).await;
                Step::Render
            }
            Command::Set { field, value } => match self.service.set_form_field(field, &value) {
                Ok(()) => Step::Message(format!(
                    "{} = {:?}",
                    field,
                    self.service.state().form.get(field)
                )),
                Err(e) => Step::Message(e.to_string()),
            },
            Command::Create => {
                self.service.create_route().await;
                Step::Render
            }
            Command::ToggleMethod(id) => match self.lookup(&id) {
                Some(route) => {
                    self.service.toggle_method(&route).await;
                    Step::Render
                }
                None => Self::unknown_route(&id),
            },
            Command::ToggleEnabled(id) => match self.lookup(&id) {
                Some(route) => {
                    self.service.toggle_enabled(&route).await;
                    Step::Render
                }
                None => Self::unknown_route(&id),
            },
            Command::Delete(id) => match self.lookup(&id) {
                Some(route) => {
                    self.service.delete_route(&route).await;
                    Step::Render
                }
                None => Self::unknown_route(&id),
            },
            Command::Test(id) => match self.lookup(&id) {
                Some(route) => {
                    self.service.prefill_test(&route);
                    Step::Render
                }
                None => Self::unknown_route(&id),
            },
            Command::TestPath(path) => {
                self.service.edit_test_path(&path);
                Step::Render
            }
            Command::TestKey(key) => {
                self.service.edit_test_key(&key);
                Step::Render
            }
            Command::Send => {
                self.service.send_test_request().await;
                Step::Render
            }
            Command::Show => Step::Render,
            Command::Help => Step::Message(HELP.to_string()),
            Command::Quit => Step::Quit,
        }
    }

    /// Rows act on what was last rendered, i.e. the applied snapshot.
    fn lookup(&self, id: &str) -> Option<Route> {
        self.service.state().find_route(id).cloned()
    }

    fn unknown_route(id: &str) -> Step {
        Step::Message(format!("no route with id {}", id))
    }
}
