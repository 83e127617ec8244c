//! Operator confirmation for each deletion candidate.
//!
//! The state is a plain value owned by the sweep loop. `ApprovedOnce` only
//! covers the candidate that was just asked about; `ApprovedAll` lasts for the
//! rest of the run.

use async_trait::async_trait;
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin};
use tracing::info;

use crate::catalog::{FlavorAsset, MediaEntity};
use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfirmState {
    #[default]
    Prompting,
    ApprovedOnce,
    ApprovedAll,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Yes,
    All,
    Skip,
}

impl Answer {
    /// Case-sensitive. Anything other than `yes` or `all` skips.
    pub fn parse(input: &str) -> Answer {
        match input.trim_end_matches(['\r', '\n']) {
            "all" => Answer::All,
            "yes" => Answer::Yes,
            _ => Answer::Skip,
        }
    }
}

impl ConfirmState {
    /// State carried into the next candidate.
    pub fn settle(self) -> ConfirmState {
        match self {
            ConfirmState::ApprovedOnce => ConfirmState::Prompting,
            other => other,
        }
    }

    pub fn requires_prompt(self) -> bool {
        self != ConfirmState::ApprovedAll
    }

    pub fn answer(self, answer: Answer) -> ConfirmState {
        match (self, answer) {
            (ConfirmState::ApprovedAll, _) => ConfirmState::ApprovedAll,
            (_, Answer::All) => ConfirmState::ApprovedAll,
            (_, Answer::Yes) => ConfirmState::ApprovedOnce,
            (_, Answer::Skip) => ConfirmState::Prompting,
        }
    }

    pub fn approves(self) -> bool {
        matches!(self, ConfirmState::ApprovedOnce | ConfirmState::ApprovedAll)
    }
}

/// Source of operator answers.
#[async_trait]
pub trait Prompter: Send {
    /// Show `question` and wait for one line. `None` once input is closed.
    async fn ask(&mut self, question: &str) -> Result<Option<String>, Error>;
}

/// Prompts on stdout and reads answers from stdin.
pub struct ConsolePrompter {
    lines: Lines<BufReader<Stdin>>,
}

impl ConsolePrompter {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(io::stdin()).lines(),
        }
    }
}

impl Default for ConsolePrompter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Prompter for ConsolePrompter {
    async fn ask(&mut self, question: &str) -> Result<Option<String>, Error> {
        let mut stdout = io::stdout();
        stdout.write_all(question.as_bytes()).await?;
        stdout.write_all(b" ").await?;
        stdout.flush().await?;

        Ok(self.lines.next_line().await?)
    }
}

/// Run the confirmation gate for one candidate and return the new state.
pub async fn confirm<P: Prompter + ?Sized>(
    state: ConfirmState,
    prompter: &mut P,
    entity: &MediaEntity,
    flavor: &FlavorAsset,
) -> Result<ConfirmState, Error> {
    let state = state.settle();
    if !state.requires_prompt() {
        return Ok(state);
    }

    info!("Deleting source asset for media entity:\n{}", entity);
    let question = format!(
        "Are you sure you want to delete media entity {} flavor asset {}? (yes/no/all)",
        entity.id, flavor.id
    );
    let line = prompter.ask(&question).await?.ok_or(Error::InputClosed)?;

    Ok(state.answer(Answer::parse(&line)))
}
