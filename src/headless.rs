//! `wiki-cloud analyze <category>`: same request as the window, printed to stdout

use crate::client::AnalysisClient;
use crate::types::{AnalysisRequest, AnalysisResponse};
use crate::utils::format_frequency;
use anyhow::{bail, Context, Result};
use std::fmt::Write as _;
use std::process::ExitCode;
use std::time::Duration;

pub fn run(server_url: &str, timeout: Duration, category: &str, top: usize) -> Result<ExitCode> {
    let Some(request) = AnalysisRequest::parse(category) else {
        bail!("category must not be empty");
    };
    let client = AnalysisClient::new(server_url, timeout)?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    let response = runtime
        .block_on(client.analyze(&request))
        .with_context(|| format!("analyzing category '{}'", request.category()))?;

    print!("{}", render_report(&response, top));

    if response.status.is_error() || response.words.is_empty() {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

/// Server message followed by the first `top` words as `word: frequency`
pub fn render_report(response: &AnalysisResponse, top: usize) -> String {
    let mut out = String::new();
    if !response.message.is_empty() {
        let _ = writeln!(out, "{}", response.message);
    }
    if response.words.is_empty() {
        return out;
    }
    let _ = writeln!(out, "\nMost common words and their frequencies:");
    for word in response.words.iter().take(top) {
        let _ = writeln!(out, "{}: {}", word.word, format_frequency(word.frequency));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ResponseStatus, WordFrequency};
    use pretty_assertions::assert_eq;

    #[test]
    fn report_lists_top_words() {
        let response = AnalysisResponse {
            status: ResponseStatus::Success,
            message: "Found 3 words in category 'Animals'".into(),
            words: vec![
                WordFrequency::new("dog", 5.0),
                WordFrequency::new("cat", 3.0),
                WordFrequency::new("emu", 1.0),
            ],
        };
        assert_eq!(
            render_report(&response, 2),
            "Found 3 words in category 'Animals'\n\nMost common words and their frequencies:\ndog: 5\ncat: 3\n"
        );
    }

    #[test]
    fn report_without_words_is_just_the_message() {
        let response = AnalysisResponse {
            status: ResponseStatus::Error,
            message: "No pages found in category 'Xyzzy'.".into(),
            words: vec![],
        };
        assert_eq!(render_report(&response, 20), "No pages found in category 'Xyzzy'.\n");
    }

    #[test]
    fn blank_category_is_rejected_before_any_request() {
        let err = run("http://127.0.0.1:1", Duration::from_secs(1), "   ", 20).unwrap_err();
        assert!(err.to_string().contains("must not be empty"));
    }
}
