//! Console event sink.

use colored::Colorize;
use std::io::Write;
use stepwise_application::ports::event_sink::EventSink;
use stepwise_domain::{DeliveryEvent, ResultMetadata};

/// Sink that renders delivery events on the terminal.
///
/// Answer fragments print inline as they arrive; think fragments print
/// dimmed (or not at all when hidden). The terminal event becomes a
/// summary block below the answer.
pub struct ConsoleSink {
    show_think: bool,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self { show_think: true }
    }

    /// Suppress think content entirely.
    pub fn hide_think(mut self) -> Self {
        self.show_think = false;
        self
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for ConsoleSink {
    fn deliver(&self, event: &DeliveryEvent) {
        match event {
            DeliveryEvent::Content {
                content, is_think, ..
            } => {
                if *is_think {
                    if self.show_think {
                        print!("{}", content.dimmed());
                    }
                } else {
                    print!("{content}");
                }
                let _ = std::io::stdout().flush();
            }
            DeliveryEvent::Final { metadata, .. } => {
                println!("\n{}", summary_block(metadata));
            }
        }
    }
}

/// Render the terminal event's metadata as a summary block.
pub fn summary_block(metadata: &ResultMetadata) -> String {
    let mut output = String::new();
    output.push_str(&format!("{}\n", "-".repeat(40).cyan()));

    output.push_str(&format!(
        "{} {}  {} {}  {} {:.0}%\n",
        "Engine:".cyan().bold(),
        metadata.engine,
        "Steps:".cyan().bold(),
        metadata.steps_count,
        "Confidence:".cyan().bold(),
        metadata.confidence * 100.0
    ));

    output.push_str(&format!(
        "{} {:.0}% valid ({} finding{})\n",
        "Validation:".cyan().bold(),
        metadata.validation.validity_rate * 100.0,
        metadata.validation.total,
        if metadata.validation.total == 1 { "" } else { "s" }
    ));

    if metadata.stopped {
        output.push_str(&format!("{}\n", "Stopped by user".yellow().bold()));
    }

    output.push_str(&format!("{}", "-".repeat(40).cyan()));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use stepwise_domain::{ReasoningType, ValidationSummary};

    fn metadata(stopped: bool) -> ResultMetadata {
        ResultMetadata {
            content: "x = 2".to_string(),
            engine: "mathematical".to_string(),
            reasoning_type: ReasoningType::Mathematical,
            steps_count: 2,
            confidence: 0.85,
            validation: ValidationSummary::default(),
            stopped,
        }
    }

    #[test]
    fn test_summary_block_shows_engine_and_steps() {
        colored::control::set_override(false);
        let block = summary_block(&metadata(false));
        assert!(block.contains("mathematical"));
        assert!(block.contains("Steps: 2"));
        assert!(block.contains("Confidence: 85%"));
        assert!(!block.contains("Stopped"));
    }

    #[test]
    fn test_summary_block_marks_stopped_requests() {
        colored::control::set_override(false);
        let block = summary_block(&metadata(true));
        assert!(block.contains("Stopped by user"));
    }

    #[test]
    fn test_summary_block_reports_validity() {
        colored::control::set_override(false);
        let block = summary_block(&metadata(false));
        assert!(block.contains("100% valid (0 findings)"));
    }
}
