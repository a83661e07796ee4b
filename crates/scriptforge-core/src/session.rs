//! The step-by-step generation session.
//!
//! A session walks the user through prepare → describe → result, calls
//! the provider for generation and repair, and records successes in the
//! history. Provider failures are turned into a comment-style script so
//! the display path treats them like any other text.

use scriptforge_highlight::{Vocabulary, highlight, strip_fence};
use scriptforge_provider::{ModelTier, ProviderError, ScriptProvider};

use crate::checklist::Checklist;
use crate::config::Config;
use crate::history::History;
use crate::template::builtin_templates;
use crate::{CoreResult, SessionError};

/// Minimum length of an acceptable description.
pub const MIN_DESCRIPTION_LEN: usize = 10;

/// The wizard step the session is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Step {
    /// Readiness checklist
    #[default]
    Prepare,
    /// Describe the request
    Describe,
    /// Review the generated script
    Result,
}

/// State of one user session, generic over the provider so tests can
/// script the exchange.
pub struct Session<P> {
    provider: P,
    config: Config,
    vocabulary: Vocabulary,
    step: Step,
    checklist: Checklist,
    description: String,
    script: Option<String>,
    error_report: String,
    tier: ModelTier,
    history: History,
}

impl<P: ScriptProvider> Session<P> {
    /// Creates a session with a fresh history.
    pub fn new(provider: P, config: Config) -> Self {
        let history = History::new(config.history.capacity);
        Self::with_history(provider, config, history)
    }

    /// Creates a session around a previously loaded history.
    pub fn with_history(provider: P, config: Config, history: History) -> Self {
        let vocabulary = config.vocabulary();
        let tier = config.provider.default_tier;
        Self {
            provider,
            config,
            vocabulary,
            step: Step::default(),
            checklist: Checklist::new(),
            description: String::new(),
            script: None,
            error_report: String::new(),
            tier,
            history,
        }
    }

    /// Current wizard step.
    pub fn step(&self) -> Step {
        self.step
    }

    /// Moves to `step`, clearing transient per-step state.
    pub fn set_step(&mut self, step: Step) {
        self.step = step;
        self.error_report.clear();
    }

    /// The readiness checklist.
    pub fn checklist(&self) -> &Checklist {
        &self.checklist
    }

    /// Mutable access for toggling checklist items.
    pub fn checklist_mut(&mut self) -> &mut Checklist {
        &mut self.checklist
    }

    /// Returns true once every readiness item is confirmed.
    pub fn ready(&self) -> bool {
        self.checklist.all_checked()
    }

    /// The current request description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Replaces the request description.
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Prefills the description from a built-in template.
    pub fn apply_template(&mut self, index: usize) -> bool {
        match builtin_templates().get(index) {
            Some(template) => {
                self.description = template.prompt.to_string();
                true
            }
            None => false,
        }
    }

    /// Selected model tier.
    pub fn tier(&self) -> ModelTier {
        self.tier
    }

    /// Overrides the model tier for subsequent requests.
    pub fn set_tier(&mut self, tier: ModelTier) {
        self.tier = tier;
    }

    /// The error text to feed into the repair flow.
    pub fn set_error_report(&mut self, report: impl Into<String>) {
        self.error_report = report.into();
    }

    /// The raw script as last produced, if any.
    pub fn script(&self) -> Option<&str> {
        self.script.as_deref()
    }

    /// Replaces the working script, e.g. when repairing a script loaded
    /// from a file rather than from this session.
    pub fn set_script(&mut self, script: impl Into<String>) {
        self.script = Some(script.into());
    }

    /// The script with any markdown fence removed, which is what the
    /// export actions (clipboard, file save) should receive.
    pub fn plain_script(&self) -> Option<&str> {
        self.script.as_deref().map(strip_fence)
    }

    /// The script rendered as markup for display.
    pub fn highlighted_script(&self) -> Option<String> {
        self.script
            .as_deref()
            .map(|script| highlight(script, &self.vocabulary, &self.config.theme))
    }

    /// Recorded generations, newest first.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Checks the description is long enough to be worth a request.
    pub fn validate_description(&self) -> CoreResult<()> {
        if self.description.trim().len() < MIN_DESCRIPTION_LEN {
            return Err(SessionError::DescriptionTooShort {
                min: MIN_DESCRIPTION_LEN,
            });
        }
        Ok(())
    }

    /// Generates a script from the current description.
    ///
    /// On success the script is stored and recorded in history. On
    /// provider failure the stored script becomes a comment-style error
    /// notice (so the display path still has something to show) and the
    /// error propagates; nothing is recorded.
    pub async fn generate(&mut self) -> CoreResult<()> {
        self.validate_description()?;
        tracing::info!(tier = %self.tier, "generating script");

        match self.provider.generate(&self.description, self.tier).await {
            Ok(code) => {
                self.history.push(self.description.clone(), code.clone());
                self.persist_history();
                self.script = Some(code);
                self.step = Step::Result;
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "generation failed");
                self.script = Some(error_script(
                    "Failed to generate the script. Check your API key and try again",
                    &err,
                ));
                self.step = Step::Result;
                Err(err.into())
            }
        }
    }

    /// Repairs the current script using the recorded error report.
    ///
    /// Requires a script and a non-empty error report. On success the
    /// corrected version replaces the script, the report is cleared, and
    /// a "(fix)"-marked history entry is recorded so the corrected
    /// version is not lost. On failure the previous script stays.
    pub async fn fix(&mut self) -> CoreResult<()> {
        let original = self.script.clone().ok_or(SessionError::NoScript)?;
        if self.error_report.trim().is_empty() {
            return Err(SessionError::EmptyErrorReport);
        }
        tracing::info!(tier = %self.tier, "repairing script");

        match self
            .provider
            .fix(&original, &self.error_report, self.tier)
            .await
        {
            Ok(code) => {
                let prompt = if self.description.trim().is_empty() {
                    "(fix) corrected script".to_string()
                } else {
                    format!("(fix) {}", self.description)
                };
                self.history.push(prompt, code.clone());
                self.persist_history();
                self.script = Some(code);
                self.error_report.clear();
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "repair failed");
                Err(err.into())
            }
        }
    }

    /// Answers a free-form question; no session state changes.
    pub async fn advise(&self, question: &str) -> CoreResult<String> {
        Ok(self.provider.advise(question).await?)
    }

    /// Restores a past generation: its prompt becomes the description
    /// and its code the working script.
    pub fn restore(&mut self, index: usize) -> CoreResult<()> {
        let entry = self
            .history
            .get(index)
            .ok_or(SessionError::HistoryIndex(index))?;
        self.description = entry.prompt.clone();
        self.script = Some(entry.code.clone());
        self.step = Step::Result;
        Ok(())
    }

    /// Best-effort history persistence; failures only log.
    fn persist_history(&self) {
        if !self.config.history.persist {
            return;
        }
        let result = History::default_path().and_then(|path| self.history.save_to(&path));
        if let Err(err) = result {
            tracing::warn!(error = %err, "could not persist history");
        }
    }
}

/// Formats a provider failure as a comment-only script.
fn error_script(context: &str, err: &ProviderError) -> String {
    format!("# Error: {context}.\n# Details: {err}")
}
