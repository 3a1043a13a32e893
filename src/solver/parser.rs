use log::{ debug, warn };

use crate::errors::{ ClassifiedError, MathSnapResult };

pub const STEP_MARKER: &str = "STEP";
pub const FINAL_MARKER: &str = "FINAL";
/// Lines starting with this are illustrations from the prompt, not solution text
pub const EXCLUDED_PREFIX: &str = "Example";
pub const PREAMBLE_LABEL: &str = "Initial Analysis: ";

/// Steps and final answer extracted from a tutoring reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolutionBody {
    pub steps: Vec<String>,
    pub final_answer: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// Before any marker; text is preamble
    Initial,
    InStep,
    InFinal,
}

/// Line-oriented accumulator over the reply text
struct SolutionParser {
    state: ParseState,
    steps: Vec<String>,
    buffer: String,
    final_answer: String,
    /// Answer from an earlier final section, kept if a later one is empty
    earlier_answer: String,
}

impl SolutionParser {
    fn new() -> Self {
        Self {
            state: ParseState::Initial,
            steps: Vec::new(),
            buffer: String::new(),
            final_answer: String::new(),
            earlier_answer: String::new(),
        }
    }

    fn feed(&mut self, line: &str) {
        if line.starts_with(STEP_MARKER) {
            self.flush_buffer();
            self.buffer = marker_body(line).to_string();
            self.state = ParseState::InStep;
        } else if line.starts_with(FINAL_MARKER) {
            self.flush_buffer();
            if !self.final_answer.trim().is_empty() {
                self.earlier_answer = std::mem::take(&mut self.final_answer);
            }
            self.final_answer = marker_body(line).to_string();
            self.state = ParseState::InFinal;
        } else if line.starts_with(EXCLUDED_PREFIX) {
            debug!("Skipping example line");
        } else {
            match self.state {
                ParseState::Initial if self.buffer.is_empty() => {
                    self.buffer = format!("{}{}", PREAMBLE_LABEL, line);
                }
                ParseState::Initial | ParseState::InStep => append_line(&mut self.buffer, line),
                ParseState::InFinal => append_line(&mut self.final_answer, line),
            }
        }
    }

    /// Emit the pending preamble or step buffer as a completed step.
    /// A step opened by a marker is emitted even when it has no text.
    fn flush_buffer(&mut self) {
        let pending = std::mem::take(&mut self.buffer);
        let pending = pending.trim();
        match self.state {
            ParseState::InStep => self.steps.push(pending.to_string()),
            ParseState::Initial if !pending.is_empty() => self.steps.push(pending.to_string()),
            ParseState::Initial | ParseState::InFinal => {}
        }
    }

    fn finish(mut self) -> MathSnapResult<SolutionBody> {
        let pending = std::mem::take(&mut self.buffer);
        let pending = pending.trim();
        let mut final_answer = self.final_answer.trim().to_string();
        if final_answer.is_empty() {
            final_answer = self.earlier_answer.trim().to_string();
        }

        if final_answer.is_empty() && !pending.is_empty() {
            debug!("No final answer section, promoting last pending text");
            final_answer = pending.to_string();
        } else if self.state == ParseState::InStep && !pending.is_empty() {
            self.steps.push(pending.to_string());
        }

        if final_answer.is_empty() {
            warn!("Solution text produced no final answer ({} steps)", self.steps.len());
            return Err(ClassifiedError::invalid_solution("The solution did not contain an answer."));
        }

        Ok(SolutionBody {
            steps: self.steps,
            final_answer,
        })
    }
}

/// Text after the first `": "` of a marker line.
///
/// Falls back to the text after a bare `:`; without any colon the body is
/// empty and continuation lines fill it.
fn marker_body(line: &str) -> &str {
    match line.split_once(": ") {
        Some((_, rest)) => rest.trim(),
        None =>
            match line.split_once(':') {
                Some((_, rest)) => rest.trim(),
                None => "",
            }
    }
}

fn append_line(buffer: &mut String, line: &str) {
    if !buffer.is_empty() {
        buffer.push(' ');
    }
    buffer.push_str(line);
}

/// Parse a `STEP n: ... FINAL ANSWER: ...` reply into steps and an answer.
///
/// Fails with `INVALID_SOLUTION` when no non-empty final answer can be
/// recovered, including by promoting trailing text.
pub fn parse_solution(text: &str) -> MathSnapResult<SolutionBody> {
    let mut parser = SolutionParser::new();
    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        parser.feed(line);
    }
    parser.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;

    #[test]
    fn clean_two_section_reply() {
        let body = parse_solution(
            "STEP 1: Add 3 to both sides $x = 5$\nFINAL ANSWER: x equals five $x=5$"
        ).unwrap();
        assert_eq!(body.steps, vec!["Add 3 to both sides $x = 5$"]);
        assert_eq!(body.final_answer, "x equals five $x=5$");
    }

    #[test]
    fn missing_final_promotes_last_step() {
        let body = parse_solution("STEP 1: Simplify $2x=4$\nSTEP 2: Divide $x=2$").unwrap();
        assert_eq!(body.steps, vec!["Simplify $2x=4$"]);
        assert_eq!(body.final_answer, "Divide $x=2$");
    }

    #[test]
    fn single_step_without_final_leaves_no_steps() {
        let body = parse_solution("  STEP 1:   Factor $x(x-1)=0$  \n").unwrap();
        assert!(body.steps.is_empty());
        assert_eq!(body.final_answer, "Factor $x(x-1)=0$");
    }

    #[test]
    fn preamble_becomes_labelled_step() {
        let text = "This is a linear equation.\nWe isolate x.\n\nSTEP 1: Subtract 2 $x = 3$\nFINAL ANSWER: Done $x = 3$";
        let body = parse_solution(text).unwrap();
        assert_eq!(
            body.steps,
            vec![
                "Initial Analysis: This is a linear equation. We isolate x.",
                "Subtract 2 $x = 3$"
            ]
        );
        assert_eq!(body.final_answer, "Done $x = 3$");
    }

    #[test]
    fn continuation_lines_are_space_joined() {
        let text = "STEP 1: Expand\n$x^2 + 2x + 1$\nSTEP 2: Factor\n$(x+1)^2$\nFINAL ANSWER: The root is\n$x = -1$";
        let body = parse_solution(text).unwrap();
        assert_eq!(body.steps, vec!["Expand $x^2 + 2x + 1$", "Factor $(x+1)^2$"]);
        assert_eq!(body.final_answer, "The root is $x = -1$");
    }

    #[test]
    fn example_lines_are_ignored() {
        let text = "STEP 1: Apply the formula\nExample: $x = 1$\nFINAL ANSWER: $x = 2$";
        let body = parse_solution(text).unwrap();
        assert_eq!(body.steps, vec!["Apply the formula"]);
        assert_eq!(body.final_answer, "$x = 2$");
    }

    #[test]
    fn separator_split_keeps_later_colons() {
        let body = parse_solution("STEP 1: Note: ratio is 1:2\nFINAL ANSWER: ratio: $1:2$").unwrap();
        assert_eq!(body.steps, vec!["Note: ratio is 1:2"]);
        assert_eq!(body.final_answer, "ratio: $1:2$");
    }

    #[test]
    fn marker_without_space_after_colon() {
        let body = parse_solution("STEP 1:Divide\nFINAL ANSWER:$x=2$").unwrap();
        assert_eq!(body.steps, vec!["Divide"]);
        assert_eq!(body.final_answer, "$x=2$");
    }

    #[test]
    fn step_after_final_is_kept_as_step() {
        let text = "STEP 1: Solve\nFINAL ANSWER: $x=1$\nSTEP 2: Check $1=1$";
        let body = parse_solution(text).unwrap();
        assert_eq!(body.steps, vec!["Solve", "Check $1=1$"]);
        assert_eq!(body.final_answer, "$x=1$");
    }

    #[test]
    fn preamble_is_emitted_before_final_section() {
        let body = parse_solution("intro line\nFINAL ANSWER: $x=1$").unwrap();
        assert_eq!(body.steps, vec!["Initial Analysis: intro line"]);
        assert_eq!(body.final_answer, "$x=1$");
    }

    #[test]
    fn empty_step_marker_still_counts_as_step() {
        let body = parse_solution("STEP 1:\nFINAL ANSWER: x").unwrap();
        assert_eq!(body.steps, vec![""]);
        assert_eq!(body.final_answer, "x");
    }

    #[test]
    fn empty_later_final_keeps_earlier_answer() {
        let body = parse_solution("FINAL ANSWER: x=1\nSTEP 2: verify\nFINAL ANSWER:").unwrap();
        assert_eq!(body.steps, vec!["verify"]);
        assert_eq!(body.final_answer, "x=1");
    }

    #[test]
    fn later_final_with_text_replaces_earlier_answer() {
        let body = parse_solution("FINAL ANSWER: x=1\nSTEP 2: recheck\nFINAL ANSWER: x=2").unwrap();
        assert_eq!(body.steps, vec!["recheck"]);
        assert_eq!(body.final_answer, "x=2");
    }

    #[test]
    fn preamble_only_is_promoted() {
        let body = parse_solution("The answer is $x=4$").unwrap();
        assert!(body.steps.is_empty());
        assert_eq!(body.final_answer, "Initial Analysis: The answer is $x=4$");
    }

    #[test]
    fn empty_reply_is_invalid_solution() {
        for text in ["", "\n\n   \n", "Example: nothing here", "STEP 1: Go\nFINAL ANSWER:"] {
            let err = parse_solution(text).unwrap_err();
            assert_eq!(err.code, ErrorCode::InvalidSolution, "input {:?}", text);
        }
    }

    #[test]
    fn both_markers_always_yield_steps_and_answer() {
        let replies = [
            "STEP 1: a\nFINAL ANSWER: b",
            "intro\nSTEP 1: a\nmore\nSTEP 2: c\nFINAL ANSWER: b\ntrailing",
            "STEP 1 without colon\ncontent\nFINAL: z",
            "STEP 1:\nFINAL ANSWER: x",
        ];
        for text in replies {
            let body = parse_solution(text).unwrap();
            assert!(!body.steps.is_empty(), "input {:?}", text);
            assert!(!body.final_answer.is_empty(), "input {:?}", text);
        }
    }
}
