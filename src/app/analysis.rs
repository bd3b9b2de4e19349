//! Submitting categories and collecting background results

use super::App;
use crate::cloud::{self, measure_words, PlacedWord};
use crate::constants::CLOUD_RELAYOUT_THRESHOLD;
use crate::error::AnalysisError;
use crate::ui::components::EguiMeasure;
use crate::utils::time_seed;
use eframe::egui;
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

impl App {
    /// Submit whatever is in the category input. Blank input does nothing.
    pub fn submit(&mut self, ctx: &egui::Context) {
        let Some(submission) = self.view.submit(&self.category_input) else {
            return;
        };
        let seq = submission.seq;
        let request = submission.request;

        let client = match &self.client {
            Ok(client) => client.clone(),
            Err(reason) => {
                let err = AnalysisError::InvalidUrl {
                    url: self.server_url.clone(),
                    reason: reason.clone(),
                };
                self.view.complete(seq, Err(err));
                return;
            }
        };

        let inbox = self.inbox.clone();
        let ctx = ctx.clone();
        self.runtime.spawn(async move {
            let outcome = client.analyze(&request).await;
            match inbox.lock() {
                Ok(mut inbox) => inbox.analyses.push((seq, outcome)),
                Err(_) => warn!(seq, "Result inbox poisoned, dropping analysis result"),
            }
            ctx.request_repaint();
        });
    }

    /// Apply everything background tasks delivered since the last frame
    pub fn poll_inbox(&mut self) {
        let (analyses, layouts) = match self.inbox.lock() {
            Ok(mut inbox) => (
                std::mem::take(&mut inbox.analyses),
                std::mem::take(&mut inbox.layouts),
            ),
            Err(_) => return,
        };

        for (seq, outcome) in analyses {
            self.view.complete(seq, outcome);
        }
        for (generation, placed) in layouts {
            self.view.finish_cloud(generation, placed);
        }
    }

    /// Start a cloud layout for the current results if there is none for
    /// this container width yet.
    pub fn ensure_cloud(&mut self, ctx: &egui::Context, width: f32) {
        if !self.view.needs_cloud(width, CLOUD_RELAYOUT_THRESHOLD) {
            return;
        }
        let Some(job) = self.view.begin_cloud(width, time_seed()) else {
            return;
        };

        // Measuring needs the font atlas, so it happens here on the UI thread
        let sized = measure_words(&job.words, &EguiMeasure::new(ctx));
        debug!(
            generation = job.generation,
            words = sized.len(),
            font = %job.config.font,
            "Measured cloud words"
        );

        let inbox = self.inbox.clone();
        let ctx = ctx.clone();
        let generation = job.generation;
        let config = job.config;
        let handle = self.runtime.spawn_blocking(move || cloud::layout(&sized, &config));
        self.runtime.spawn(async move {
            let placed = collect_layout(generation, handle).await;
            match inbox.lock() {
                Ok(mut inbox) => inbox.layouts.push((generation, placed)),
                Err(_) => warn!(generation, "Result inbox poisoned, dropping cloud layout"),
            }
            ctx.request_repaint();
        });
    }
}

/// A layout that panicked yields an empty cloud so the pending state ends.
async fn collect_layout(
    generation: u64,
    handle: JoinHandle<Vec<PlacedWord>>,
) -> Vec<PlacedWord> {
    match handle.await {
        Ok(placed) => placed,
        Err(e) => {
            error!(generation, error = %e, "Cloud layout failed");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ViewState;
    use crate::types::{AnalysisResponse, ResponseStatus, WordFrequency};

    #[tokio::test]
    async fn panicked_layout_still_ends_pending_cloud() {
        let mut view = ViewState::new();
        let seq = view.submit("animals").unwrap().seq;
        view.complete(
            seq,
            Ok(AnalysisResponse {
                status: ResponseStatus::Success,
                message: "ok".into(),
                words: vec![WordFrequency::new("dog", 5.0)],
            }),
        );
        let job = view.begin_cloud(600.0, 1).unwrap();
        assert!(view.cloud_pending());

        let handle = tokio::task::spawn_blocking(|| -> Vec<PlacedWord> {
            panic!("layout blew up");
        });
        let placed = collect_layout(job.generation, handle).await;

        assert!(placed.is_empty());
        assert!(view.finish_cloud(job.generation, placed));
        assert!(!view.cloud_pending());
    }
}
