//! View state for the category analysis screen.
//!
//! All lifecycle transitions live here, independent of egui. The frame code
//! only reads [`ViewState::regions`] and the rendered content, so every state
//! transition can be tested without a window.
//!
//! Each submission gets a sequence number. Completions carrying anything other
//! than the latest number are dropped, so overlapping requests can never paint
//! stale results. Cloud layouts use their own generation counter for the same
//! reason (a resize can re-layout the same results).

use crate::cards::{build_cards, WordCard};
use crate::cloud::{CloudConfig, CloudWord, PlacedWord};
use crate::constants::GENERIC_ERROR_MESSAGE;
use crate::error::AnalysisError;
use crate::types::{AnalysisRequest, AnalysisResponse, ResponseStatus, WordFrequency};
use tracing::{debug, error, info, warn};

/// Lifecycle of the latest submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    /// Server answered with at least one word
    Results,
    /// Server answered, but with nothing to show
    Empty,
    /// Transport, HTTP status or decode failure
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
    Info,
}

impl From<ResponseStatus> for MessageKind {
    fn from(status: ResponseStatus) -> Self {
        match status {
            ResponseStatus::Success => Self::Success,
            ResponseStatus::Error => Self::Error,
            ResponseStatus::Unknown => Self::Info,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusMessage {
    pub kind: MessageKind,
    pub text: String,
}

/// Visibility of the four screen regions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Regions {
    pub loading: bool,
    pub results: bool,
    pub message: bool,
    pub empty_state: bool,
}

/// Handle for an issued request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub seq: u64,
    pub request: AnalysisRequest,
}

/// Everything a background layout needs, tagged for staleness checks
#[derive(Debug, Clone)]
pub struct CloudJob {
    pub generation: u64,
    pub config: CloudConfig,
    pub words: Vec<CloudWord>,
}

#[derive(Debug, Default)]
pub struct ViewState {
    phase: Phase,
    loading_visible: bool,
    results_visible: bool,
    message_visible: bool,
    empty_visible: bool,
    scroll_to_message: bool,
    message: Option<StatusMessage>,
    category: Option<String>,
    words: Vec<WordFrequency>,
    cards: Vec<WordCard>,
    cloud: Vec<PlacedWord>,
    cloud_width: Option<f32>,
    cloud_pending: bool,
    latest_seq: u64,
    cloud_generation: u64,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request. Blank input changes nothing and returns `None`.
    pub fn submit(&mut self, raw: &str) -> Option<Submission> {
        let request = AnalysisRequest::parse(raw)?;

        self.latest_seq += 1;
        // Invalidate any layout still running for the previous results
        self.cloud_generation += 1;

        self.phase = Phase::Loading;
        self.loading_visible = true;
        self.message_visible = false;
        self.empty_visible = false;
        self.scroll_to_message = false;
        self.message = None;
        self.words.clear();
        self.cards.clear();
        self.cloud.clear();
        self.cloud_width = None;
        self.cloud_pending = false;
        self.results_visible = false;
        self.category = Some(request.category().to_string());

        info!(seq = self.latest_seq, category = request.category(), "Submitting category");
        Some(Submission {
            seq: self.latest_seq,
            request,
        })
    }

    pub fn is_latest(&self, seq: u64) -> bool {
        seq == self.latest_seq
    }

    /// Apply the outcome of submission `seq`. Returns `false` if it was stale.
    pub fn complete(&mut self, seq: u64, outcome: Result<AnalysisResponse, AnalysisError>) -> bool {
        if !self.is_latest(seq) {
            debug!(seq, latest = self.latest_seq, "Discarding stale analysis result");
            return false;
        }

        match outcome {
            Ok(response) => {
                self.loading_visible = false;
                self.show_message(response.status.into(), &response.message);

                if response.words.is_empty() {
                    self.phase = Phase::Empty;
                    self.results_visible = false;
                    self.empty_visible = true;
                } else {
                    self.phase = Phase::Results;
                    self.results_visible = true;
                    self.cards = build_cards(&response.words);
                    self.words = response.words;
                }
            }
            Err(e) => {
                error!(seq, status = ?e.status(), error = %e, "Analysis failed");
                self.loading_visible = false;
                self.phase = Phase::Failed;
                self.show_message(MessageKind::Error, GENERIC_ERROR_MESSAGE);
                self.empty_visible = true;
            }
        }
        true
    }

    /// Error messages reveal the message region and ask for it to be scrolled
    /// into view; anything else hides it.
    pub fn show_message(&mut self, kind: MessageKind, text: &str) {
        match kind {
            MessageKind::Error => {
                self.message_visible = true;
                self.scroll_to_message = true;
                warn!("error: {}", text);
            }
            MessageKind::Success => {
                self.message_visible = false;
                info!("success: {}", text);
            }
            MessageKind::Info => {
                self.message_visible = false;
                info!("info: {}", text);
            }
        }
        self.message = Some(StatusMessage {
            kind,
            text: text.to_string(),
        });
    }

    pub fn regions(&self) -> Regions {
        Regions {
            loading: self.loading_visible,
            results: self.results_visible,
            message: self.message_visible,
            empty_state: self.empty_visible,
        }
    }

    /// One-shot: true once after an error message was shown
    pub fn take_scroll_request(&mut self) -> bool {
        std::mem::take(&mut self.scroll_to_message)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn message(&self) -> Option<&StatusMessage> {
        self.message.as_ref()
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Full word list of the current results
    pub fn words(&self) -> &[WordFrequency] {
        &self.words
    }

    pub fn cards(&self) -> &[WordCard] {
        &self.cards
    }

    pub fn cloud(&self) -> &[PlacedWord] {
        &self.cloud
    }

    /// Width the current cloud was (or is being) laid out for
    pub fn cloud_width(&self) -> Option<f32> {
        self.cloud_width
    }

    /// A layout has been started and has not come back yet
    pub fn cloud_pending(&self) -> bool {
        self.cloud_pending
    }

    /// Whether the cloud should be (re)computed for a container of `width`.
    pub fn needs_cloud(&self, width: f32, threshold: f32) -> bool {
        if self.phase != Phase::Results || width <= 0.0 {
            return false;
        }
        match self.cloud_width {
            None => true,
            Some(w) => (w - width).abs() > threshold,
        }
    }

    /// Clear the current cloud and describe a fresh layout over all words.
    pub fn begin_cloud(&mut self, width: f32, seed: u64) -> Option<CloudJob> {
        if self.phase != Phase::Results {
            return None;
        }
        self.cloud_generation += 1;
        self.cloud.clear();
        self.cloud_width = Some(width);
        self.cloud_pending = true;

        debug!(
            generation = self.cloud_generation,
            width,
            words = self.words.len(),
            "Starting cloud layout"
        );
        Some(CloudJob {
            generation: self.cloud_generation,
            config: CloudConfig::new(width, seed),
            words: crate::cloud::cloud_words(&self.words),
        })
    }

    /// Accept a finished layout unless a newer layout or submission superseded it.
    pub fn finish_cloud(&mut self, generation: u64, placed: Vec<PlacedWord>) -> bool {
        if generation != self.cloud_generation || self.phase != Phase::Results {
            debug!(generation, latest = self.cloud_generation, "Discarding stale cloud layout");
            return false;
        }
        debug!(generation, placed = placed.len(), "Cloud layout finished");
        self.cloud = placed;
        self.cloud_pending = false;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{CLOUD_HEIGHT, MAX_CARDS};
    use pretty_assertions::assert_eq;

    fn response(
        status: ResponseStatus,
        message: &str,
        words: Vec<WordFrequency>,
    ) -> AnalysisResponse {
        AnalysisResponse {
            status,
            message: message.to_string(),
            words,
        }
    }

    fn dog_and_cat() -> Vec<WordFrequency> {
        vec![WordFrequency::new("dog", 5.0), WordFrequency::new("cat", 3.0)]
    }

    #[test]
    fn blank_submit_is_a_no_op() {
        let mut view = ViewState::new();
        let before = format!("{:?}", view);
        assert!(view.submit("  ").is_none());
        assert!(view.submit("").is_none());
        assert_eq!(format!("{:?}", view), before);
        assert_eq!(view.phase(), Phase::Idle);
        assert_eq!(view.regions(), Regions::default());
    }

    #[test]
    fn blank_submit_after_results_keeps_them() {
        let mut view = ViewState::new();
        let sub = view.submit("animals").unwrap();
        view.complete(sub.seq, Ok(response(ResponseStatus::Success, "ok", dog_and_cat())));
        let regions = view.regions();

        assert!(view.submit("\t ").is_none());
        assert_eq!(view.regions(), regions);
        assert_eq!(view.cards().len(), 2);
    }

    #[test]
    fn submit_enters_loading_and_clears_previous_output() {
        let mut view = ViewState::new();
        let first = view.submit("animals").unwrap();
        view.complete(first.seq, Ok(response(ResponseStatus::Success, "ok", dog_and_cat())));
        view.begin_cloud(800.0, 1).unwrap();

        let second = view.submit("plants").unwrap();
        assert_eq!(second.seq, first.seq + 1);
        assert_eq!(second.request.category(), "plants");
        assert_eq!(view.phase(), Phase::Loading);
        assert_eq!(
            view.regions(),
            Regions {
                loading: true,
                results: false,
                message: false,
                empty_state: false,
            }
        );
        assert!(view.cards().is_empty());
        assert!(view.cloud().is_empty());
        assert!(view.words().is_empty());
        assert_eq!(view.cloud_width(), None);
    }

    #[test]
    fn scenario_success_with_words() {
        let mut view = ViewState::new();
        let sub = view.submit("animals").unwrap();
        assert!(view.complete(sub.seq, Ok(response(ResponseStatus::Success, "ok", dog_and_cat()))));

        assert_eq!(view.phase(), Phase::Results);
        assert_eq!(
            view.regions(),
            Regions {
                loading: false,
                results: true,
                message: false,
                empty_state: false,
            }
        );
        assert_eq!(view.cards().len(), 2);
        let job = view.begin_cloud(640.0, 7).unwrap();
        assert_eq!(job.words.len(), 2);
        assert_eq!(view.message().unwrap().kind, MessageKind::Success);
        assert!(!view.take_scroll_request());
    }

    #[test]
    fn scenario_error_status_without_words() {
        let mut view = ViewState::new();
        let sub = view.submit("xyzzy").unwrap();
        view.complete(sub.seq, Ok(response(ResponseStatus::Error, "no data", vec![])));

        assert_eq!(view.phase(), Phase::Empty);
        assert_eq!(
            view.regions(),
            Regions {
                loading: false,
                results: false,
                message: true,
                empty_state: true,
            }
        );
        assert_eq!(view.message().unwrap().text, "no data");
        assert!(view.take_scroll_request());
        assert!(!view.take_scroll_request());
    }

    #[test]
    fn success_status_without_words_shows_empty_state_only() {
        let mut view = ViewState::new();
        let sub = view.submit("quiet").unwrap();
        view.complete(sub.seq, Ok(response(ResponseStatus::Success, "nothing", vec![])));

        let regions = view.regions();
        assert!(regions.empty_state);
        assert!(!regions.results);
        assert!(!regions.message);
        assert!(view.begin_cloud(500.0, 1).is_none());
    }

    #[test]
    fn scenario_http_failure() {
        let mut view = ViewState::new();
        let sub = view.submit("animals").unwrap();
        view.complete(sub.seq, Err(AnalysisError::HttpStatus { status: 500 }));

        assert_eq!(view.phase(), Phase::Failed);
        let regions = view.regions();
        assert!(!regions.loading);
        assert!(regions.empty_state);
        assert!(regions.message);
        assert!(!regions.results);
        let message = view.message().unwrap();
        assert_eq!(message.kind, MessageKind::Error);
        assert_eq!(message.text, GENERIC_ERROR_MESSAGE);
    }

    #[test]
    fn cards_are_truncated_but_cloud_gets_everything() {
        let words: Vec<WordFrequency> = (0..25)
            .map(|i| WordFrequency::new(format!("w{}", i), (25 - i) as f64))
            .collect();
        let mut view = ViewState::new();
        let sub = view.submit("big").unwrap();
        view.complete(sub.seq, Ok(response(ResponseStatus::Success, "ok", words)));

        assert_eq!(view.cards().len(), MAX_CARDS);
        assert_eq!(view.cards()[0].word, "w0");
        assert_eq!(view.cards()[19].word, "w19");
        let job = view.begin_cloud(900.0, 3).unwrap();
        assert_eq!(job.words.len(), 25);
    }

    #[test]
    fn stale_completion_is_discarded() {
        let mut view = ViewState::new();
        let old = view.submit("animals").unwrap();
        let new = view.submit("plants").unwrap();

        let late = response(ResponseStatus::Success, "old", dog_and_cat());
        assert!(!view.complete(old.seq, Ok(late)));
        assert_eq!(view.phase(), Phase::Loading);
        assert!(view.cards().is_empty());

        assert!(view.complete(new.seq, Err(AnalysisError::HttpStatus { status: 502 })));
        assert_eq!(view.phase(), Phase::Failed);

        // A late answer to the first request still cannot overwrite the failure
        let late = response(ResponseStatus::Success, "old", dog_and_cat());
        assert!(!view.complete(old.seq, Ok(late)));
        assert_eq!(view.phase(), Phase::Failed);
    }

    #[test]
    fn stale_cloud_layouts_are_discarded() {
        let mut view = ViewState::new();
        let sub = view.submit("animals").unwrap();
        view.complete(sub.seq, Ok(response(ResponseStatus::Success, "ok", dog_and_cat())));

        let first = view.begin_cloud(600.0, 1).unwrap();
        let second = view.begin_cloud(900.0, 1).unwrap();
        let placed = crate::cloud::layout(
            &crate::cloud::measure_words(&second.words, &crate::cloud::EstimatedMeasure),
            &second.config,
        );

        assert!(!view.finish_cloud(first.generation, Vec::new()));
        assert!(view.cloud_pending());
        assert!(view.finish_cloud(second.generation, placed.clone()));
        assert!(!view.cloud_pending());
        assert_eq!(view.cloud(), placed.as_slice());

        // New submission invalidates the in-flight generation
        let job = view.begin_cloud(900.0, 2).unwrap();
        view.submit("plants").unwrap();
        assert!(!view.cloud_pending());
        assert!(!view.finish_cloud(job.generation, placed));
        assert!(view.cloud().is_empty());
    }

    #[test]
    fn cloud_relayout_follows_width_changes() {
        let mut view = ViewState::new();
        assert!(!view.needs_cloud(800.0, 24.0));

        let sub = view.submit("animals").unwrap();
        assert!(!view.needs_cloud(800.0, 24.0));
        view.complete(sub.seq, Ok(response(ResponseStatus::Success, "ok", dog_and_cat())));
        assert!(view.needs_cloud(800.0, 24.0));

        view.begin_cloud(800.0, 1);
        assert!(!view.needs_cloud(810.0, 24.0));
        assert!(view.needs_cloud(900.0, 24.0));
    }

    #[test]
    fn laid_out_cloud_fits_the_recorded_canvas_width() {
        let words: Vec<WordFrequency> = (0..100)
            .map(|i| WordFrequency::new(format!("word{}", i), (100 - i) as f64))
            .collect();
        let mut view = ViewState::new();
        let sub = view.submit("animals").unwrap();
        view.complete(sub.seq, Ok(response(ResponseStatus::Success, "ok", words)));

        // Inner width of the cloud frame for an 800 wide column
        let inner = 800.0 - 2.0 * crate::theme::SPACING_XL;
        for seed in 0..10 {
            let job = view.begin_cloud(inner, seed).unwrap();
            let sized = crate::cloud::measure_words(&job.words, &crate::cloud::EstimatedMeasure);
            let placed = crate::cloud::layout(&sized, &job.config);
            assert!(view.finish_cloud(job.generation, placed));

            let canvas = view.cloud_width().unwrap();
            assert_eq!(canvas, inner);
            for word in view.cloud() {
                let (hw, hh) = word.half_extents();
                assert!(word.x.abs() + hw <= canvas / 2.0, "{} overflows width", word.text);
                assert!(word.y.abs() + hh <= CLOUD_HEIGHT / 2.0, "{} overflows height", word.text);
            }
        }
    }
}
