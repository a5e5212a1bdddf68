use reqwest::{
    multipart::{Form, Part},
    Client,
};
use serde::Deserialize;
use shared::protocol::ReviewResult;
use tracing::{debug, warn};

pub mod render;

const UNKNOWN_SERVER_ERROR: &str = "Unknown server error";

/// A file the host's chooser handed over: display name plus raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// One of the two selection slots gating submission.
///
/// Invariant: the label is non-empty exactly when a file is held. Hosts wire
/// their file chooser (a clicked upload card, a dialog, a path argument) to
/// [`FileSlot::select`] and display the label next to the card.
#[derive(Debug, Clone, Default)]
pub struct FileSlot {
    file: Option<SelectedFile>,
    label: String,
}

impl FileSlot {
    /// Records the chooser's outcome. `None` means the chooser was cancelled
    /// and clears the slot; there is no sticky prior selection.
    pub fn select(&mut self, file: Option<SelectedFile>) {
        match file {
            Some(file) => {
                self.label = format!("Selected: {}", file.name);
                self.file = Some(file);
            }
            None => {
                self.file = None;
                self.label.clear();
            }
        }
    }

    pub fn is_occupied(&self) -> bool {
        self.file.is_some()
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn file(&self) -> Option<&SelectedFile> {
        self.file.as_ref()
    }
}

/// Submission is permitted only while both slots hold a file.
pub fn can_submit(code: &FileSlot, standards: &FileSlot) -> bool {
    code.is_occupied() && standards.is_occupied()
}

/// Result of one submission attempt. Exactly one is produced per attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestOutcome {
    Success(ReviewResult),
    Failure(String),
}

/// Content of the output surface. `Rendered` replaces the previous value
/// wholesale; nothing appends across submissions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputState {
    Empty,
    InProgress,
    Rendered(String),
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<String>,
}

/// Thin transport over the review endpoint. One POST per submission, no
/// retries, no cancellation once the request is on the wire.
#[derive(Debug, Clone)]
pub struct ReviewClient {
    http: Client,
    server_url: String,
}

impl ReviewClient {
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            server_url: server_url.into(),
        }
    }

    /// Submits both files as a two-part multipart body and folds transport,
    /// server, and decode failures into a [`RequestOutcome`].
    pub async fn submit(&self, code: &SelectedFile, standards: &SelectedFile) -> RequestOutcome {
        let form = Form::new()
            .part(
                "code_file",
                Part::bytes(code.bytes.clone()).file_name(code.name.clone()),
            )
            .part(
                "standards_file",
                Part::bytes(standards.bytes.clone()).file_name(standards.name.clone()),
            );

        let response = match self
            .http
            .post(format!("{}/review", self.server_url))
            .multipart(form)
            .send()
            .await
        {
            Ok(response) => response,
            Err(error) => {
                warn!(%error, "review request failed in transport");
                return RequestOutcome::Failure(error.to_string());
            }
        };

        if !response.status().is_success() {
            let status = response.status();
            let detail = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.detail)
                .filter(|detail| !detail.is_empty())
                .unwrap_or_else(|| UNKNOWN_SERVER_ERROR.to_string());
            warn!(%status, %detail, "review request rejected by server");
            return RequestOutcome::Failure(detail);
        }

        match response.json::<ReviewResult>().await {
            Ok(result) => RequestOutcome::Success(result),
            // A success status with an undecodable body is folded into the
            // same failure surface instead of escaping as a panic.
            Err(error) => RequestOutcome::Failure(error.to_string()),
        }
    }
}

/// Interaction controller for the two-file review flow: two selection slots,
/// the derived submit gate, and the output surface the renderer writes into.
///
/// Hosts own the actual widgets. They feed chooser results into the
/// `select_*` methods and poll [`ReviewPanel::can_submit`] and
/// [`ReviewPanel::output`] after each event; no callback wiring is assumed.
#[derive(Debug)]
pub struct ReviewPanel {
    client: ReviewClient,
    code_slot: FileSlot,
    standards_slot: FileSlot,
    output: OutputState,
}

struct PreparedSubmission {
    code: SelectedFile,
    standards: SelectedFile,
}

impl ReviewPanel {
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            client: ReviewClient::new(server_url),
            code_slot: FileSlot::default(),
            standards_slot: FileSlot::default(),
            output: OutputState::Empty,
        }
    }

    pub fn select_code(&mut self, file: Option<SelectedFile>) {
        self.code_slot.select(file);
    }

    pub fn select_standards(&mut self, file: Option<SelectedFile>) {
        self.standards_slot.select(file);
    }

    pub fn code_label(&self) -> &str {
        self.code_slot.label()
    }

    pub fn standards_label(&self) -> &str {
        self.standards_slot.label()
    }

    /// Derived afresh on every call; a slot cleared by a cancelled re-pick
    /// disables submission immediately.
    pub fn can_submit(&self) -> bool {
        can_submit(&self.code_slot, &self.standards_slot)
    }

    pub fn output(&self) -> &OutputState {
        &self.output
    }

    /// Runs one submit/response/render cycle. A call while the gate is not
    /// ready is ignored without touching the output surface, which also
    /// covers stale double-activations that bypass the disabled control.
    /// The exclusive borrow serializes submissions per panel instance.
    pub async fn submit(&mut self) {
        let Some(prepared) = self.begin_submission() else {
            debug!("submit ignored: both files are not selected");
            return;
        };
        let outcome = self
            .client
            .submit(&prepared.code, &prepared.standards)
            .await;
        self.output = OutputState::Rendered(render::render(&outcome));
    }

    // Step one of the cycle: the in-progress indicator replaces whatever the
    // surface held and stays until the network call settles.
    fn begin_submission(&mut self) -> Option<PreparedSubmission> {
        let (Some(code), Some(standards)) = (self.code_slot.file(), self.standards_slot.file())
        else {
            return None;
        };
        let prepared = PreparedSubmission {
            code: code.clone(),
            standards: standards.clone(),
        };
        self.output = OutputState::InProgress;
        Some(prepared)
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
