use std::borrow::Cow::{self, Borrowed, Owned};
use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};

use suimentor_core::session::{ChatService, ChatSession, MessageRole, SubmitOutcome};
use suimentor_interaction::prompt::{EXAMPLE_PROMPTS, SYSTEM_PROMPT};
use suimentor_interaction::GeminiClient;

/// CLI helper for rustyline that provides completion, highlighting, and hints.
#[derive(Clone)]
struct CliHelper {
    commands: Vec<String>,
}

impl CliHelper {
    fn new() -> Self {
        Self {
            commands: vec![
                "/deep".to_string(),
                "/search".to_string(),
                "/prompts".to_string(),
            ],
        }
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if line.starts_with('/') {
            let candidates: Vec<Pair> = self
                .commands
                .iter()
                .filter(|cmd| cmd.starts_with(line))
                .map(|cmd| Pair {
                    display: cmd.clone(),
                    replacement: cmd.clone(),
                })
                .collect();
            Ok((0, candidates))
        } else {
            Ok((0, vec![]))
        }
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            self.commands
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for CliHelper {}

fn print_welcome() {
    println!("{}", "=== SuiMentor ===".bright_magenta().bold());
    println!(
        "{}",
        "Toggle '/deep' for deep thinking, '/search' for web grounding, '/prompts' for ideas, or 'quit' to exit."
            .bright_black()
    );
    println!();
}

fn print_example_prompts() {
    println!("{}", "Try one of these:".bright_yellow());
    for prompt in EXAMPLE_PROMPTS {
        println!("  {}", format!("- {}", prompt).yellow());
    }
    println!();
}

/// Prints the newest assistant message with its citations, if any.
fn print_last_reply(session: &ChatSession) {
    let Some(message) = session
        .messages()
        .iter()
        .rev()
        .find(|message| message.role == MessageRole::Assistant)
    else {
        return;
    };

    for line in message.text.lines() {
        println!("{}", line.bright_blue());
    }

    if !message.sources.is_empty() {
        println!();
        println!("{}", "Sources:".bright_black());
        for source in &message.sources {
            println!(
                "  {}",
                format!("{} <{}>", source.title, source.uri).bright_black()
            );
        }
    }
    println!();
}

fn toggle_label(enabled: bool) -> &'static str {
    if enabled { "on" } else { "off" }
}

/// The main entry point for the SuiMentor chat REPL.
///
/// Sets up a rustyline editor with slash-command completion, wires the
/// Gemini backend into the conversation core, and drives one submission per
/// line of input. The submit call is the only await point, so the session's
/// busy flag is naturally scoped to it.
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let backend = GeminiClient::try_from_env()?.with_system_instruction(SYSTEM_PROMPT);
    let service = ChatService::new(Arc::new(backend));
    let mut session = ChatSession::new();

    // ===== REPL Setup =====
    let helper = CliHelper::new();
    let mut rl = Editor::new()?;
    rl.set_helper(Some(helper));

    print_welcome();
    print_example_prompts();

    // ===== Main REPL Loop =====
    loop {
        if session.input_mode.is_awaiting_identifier() {
            println!("{}", session.placeholder().bright_yellow());
        }

        let readline = rl.readline(">> ");

        match readline {
            Ok(line) => {
                let trimmed = line.trim();

                // Handle quit command
                if trimmed == "quit" || trimmed == "exit" {
                    println!("{}", "Goodbye!".bright_green());
                    break;
                }

                match trimmed {
                    "/deep" => {
                        session.deep_think = !session.deep_think;
                        println!(
                            "{}",
                            format!("Deep thinking is {}", toggle_label(session.deep_think))
                                .bright_cyan()
                        );
                        continue;
                    }
                    "/search" => {
                        session.web_search = !session.web_search;
                        println!(
                            "{}",
                            format!("Web search is {}", toggle_label(session.web_search))
                                .bright_cyan()
                        );
                        continue;
                    }
                    "/prompts" => {
                        print_example_prompts();
                        continue;
                    }
                    _ => {}
                }

                let _ = rl.add_history_entry(trimmed);

                match service.submit(&mut session, trimmed).await {
                    SubmitOutcome::RejectedEmpty => continue,
                    SubmitOutcome::RejectedBusy => {
                        println!("{}", "Still working on the previous message...".bright_black());
                        continue;
                    }
                    SubmitOutcome::Completed
                    | SubmitOutcome::Degraded
                    | SubmitOutcome::Failed => {
                        print_last_reply(&session);
                    }
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted)
            | Err(rustyline::error::ReadlineError::Eof) => {
                println!("{}", "Goodbye!".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Readline error: {:?}", err).red());
                break;
            }
        }
    }

    Ok(())
}
