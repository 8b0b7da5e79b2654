//! Think/answer stream splitting.
//!
//! The generation engine may embed a private-reasoning segment in its
//! output, delimited by `<think>` and `</think>`. [`ThinkSplitter`] is the
//! per-request state machine that detects the delimiters incrementally —
//! correct even when a marker is split across fragment boundaries — and
//! tags every emitted chunk as think or answer content.
//!
//! One splitter instance exists per in-flight request and is discarded at
//! completion; nothing here is shared across requests.

/// Opening delimiter of a private reasoning segment.
pub const THINK_OPEN: &str = "<think>";
/// Closing delimiter of a private reasoning segment.
pub const THINK_CLOSE: &str = "</think>";

/// Phase of the per-request stream state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitPhase {
    /// No fragment has arrived yet.
    AwaitingFirstFragment,
    /// Forwarding answer content.
    Answer,
    /// Inside a think segment, forwarding private content.
    Think,
    /// Stream ended normally.
    Finalized,
    /// Stream was stopped by the cancellation signal.
    Cancelled,
}

/// One tagged chunk ready for the sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitChunk {
    pub text: String,
    pub is_think: bool,
}

/// Incremental think/answer splitter.
///
/// The first `<think>` occurrence wins: after its matching `</think>` the
/// splitter never re-enters think mode, and any later opening marker passes
/// through as literal answer text.
#[derive(Debug)]
pub struct ThinkSplitter {
    phase: SplitPhase,
    /// Received but not yet emitted; may end in a partial marker.
    pending: String,
    /// Latched once a think segment has opened.
    think_opened: bool,
    /// Latched once the think segment has closed.
    think_closed: bool,
    answer_text: String,
    think_text: String,
}

impl ThinkSplitter {
    pub fn new() -> Self {
        Self {
            phase: SplitPhase::AwaitingFirstFragment,
            pending: String::new(),
            think_opened: false,
            think_closed: false,
            answer_text: String::new(),
            think_text: String::new(),
        }
    }

    pub fn phase(&self) -> SplitPhase {
        self.phase
    }

    /// Answer content emitted so far.
    pub fn answer_text(&self) -> &str {
        &self.answer_text
    }

    /// Think content emitted so far.
    pub fn think_text(&self) -> &str {
        &self.think_text
    }

    /// True if a think segment opened but the stream never closed it.
    pub fn think_unterminated(&self) -> bool {
        self.think_opened && !self.think_closed
    }

    /// The content this request resolves to. An unterminated think segment
    /// is surfaced as answer text rather than silently dropped.
    pub fn aggregated_text(&self) -> String {
        if self.think_unterminated() {
            format!("{}{}", self.answer_text, self.think_text)
        } else {
            self.answer_text.clone()
        }
    }

    /// Feed one fragment, returning the chunks it releases.
    ///
    /// A suffix that could be the start of a delimiter is held back until
    /// the next fragment decides it — never emitted early, never lost.
    pub fn push(&mut self, fragment: &str) -> Vec<SplitChunk> {
        if matches!(self.phase, SplitPhase::Finalized | SplitPhase::Cancelled) {
            return Vec::new();
        }
        if self.phase == SplitPhase::AwaitingFirstFragment {
            self.phase = SplitPhase::Answer;
        }
        self.pending.push_str(fragment);

        let mut chunks = Vec::new();
        loop {
            match self.phase {
                SplitPhase::Answer if !self.think_opened => {
                    if let Some(index) = self.pending.find(THINK_OPEN) {
                        let before: String = self.pending[..index].to_string();
                        self.pending.drain(..index + THINK_OPEN.len());
                        self.emit(&mut chunks, before, false);
                        self.think_opened = true;
                        self.phase = SplitPhase::Think;
                    } else {
                        let safe = self.releasable_len(THINK_OPEN);
                        let text: String = self.pending.drain(..safe).collect();
                        self.emit(&mut chunks, text, false);
                        break;
                    }
                }
                SplitPhase::Think => {
                    if let Some(index) = self.pending.find(THINK_CLOSE) {
                        let inner: String = self.pending[..index].to_string();
                        self.pending.drain(..index + THINK_CLOSE.len());
                        self.emit(&mut chunks, inner, true);
                        self.think_closed = true;
                        self.phase = SplitPhase::Answer;
                    } else {
                        let safe = self.releasable_len(THINK_CLOSE);
                        let text: String = self.pending.drain(..safe).collect();
                        self.emit(&mut chunks, text, true);
                        break;
                    }
                }
                // First occurrence won already: no further marker detection.
                _ => {
                    let text = std::mem::take(&mut self.pending);
                    self.emit(&mut chunks, text, false);
                    break;
                }
            }
        }
        chunks
    }

    /// Signal end-of-stream, flushing any held-back text.
    pub fn finish(&mut self) -> Vec<SplitChunk> {
        let chunks = self.flush();
        self.phase = SplitPhase::Finalized;
        chunks
    }

    /// Transition to the cancelled terminal state. Held-back text is folded
    /// into the aggregates (a fragment already received is preserved) but
    /// nothing further is emitted toward the sink.
    pub fn cancel(&mut self) {
        let _ = self.flush();
        self.phase = SplitPhase::Cancelled;
    }

    fn flush(&mut self) -> Vec<SplitChunk> {
        let mut chunks = Vec::new();
        let leftover = std::mem::take(&mut self.pending);
        let is_think = self.phase == SplitPhase::Think;
        self.emit(&mut chunks, leftover, is_think);
        chunks
    }

    fn emit(&mut self, chunks: &mut Vec<SplitChunk>, text: String, is_think: bool) {
        if text.is_empty() {
            return;
        }
        if is_think {
            self.think_text.push_str(&text);
        } else {
            self.answer_text.push_str(&text);
        }
        chunks.push(SplitChunk { text, is_think });
    }

    /// Length of the pending prefix that cannot be part of `marker`: holds
    /// back only the longest pending suffix that is a prefix of the marker.
    fn releasable_len(&self, marker: &str) -> usize {
        let pending = self.pending.as_bytes();
        let marker = marker.as_bytes();
        let max_hold = marker.len().saturating_sub(1).min(pending.len());
        for hold in (1..=max_hold).rev() {
            if pending[pending.len() - hold..] == marker[..hold] {
                return self.pending.len() - hold;
            }
        }
        self.pending.len()
    }
}

impl Default for ThinkSplitter {
    fn default() -> Self {
        Self::new()
    }
}
