//! Terminal answer collector: prints a question, reads a line, re-prompts
//! until the line parses for the question's kind.

use crate::domain::models::{Answer, AnswerKind, Question, QuestionGroup};
use crate::services::output::{Palette, Style};
use crate::services::resolver::{AnswerCollector, CollectError};
use std::io::{BufRead, Write};

const RULE: &str = "────────────────────────────────────────────────────────────";

pub struct TerminalCollector<R, W> {
    input: R,
    output: W,
    palette: Palette,
}

impl<R: BufRead, W: Write> TerminalCollector<R, W> {
    pub fn new(input: R, output: W, palette: Palette) -> Self {
        Self {
            input,
            output,
            palette,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn paint(&self, text: &str, style: Style) -> String {
        self.palette.paint(text, style)
    }

    /// Reads one trimmed line. Bytes that are not UTF-8 are rejected here and
    /// the prompt is repeated; only end of input leaves the loop with an error.
    fn read_line(&mut self, prompt: &str) -> Result<String, CollectError> {
        loop {
            write!(self.output, "{}", prompt)?;
            self.output.flush()?;
            let mut buf = Vec::new();
            if self.input.read_until(b'\n', &mut buf)? == 0 {
                return Err(CollectError::Aborted);
            }
            match String::from_utf8(buf) {
                Ok(line) => return Ok(line.trim().to_string()),
                Err(_) => self.complain("Input could not be read as text. Please try again.")?,
            }
        }
    }

    fn complain(&mut self, message: &str) -> Result<(), CollectError> {
        let line = self.paint(&format!("  {}", message), Style::Bad);
        writeln!(self.output, "{}", line)?;
        Ok(())
    }

    /// Free-form metadata prompt; `required` re-asks until non-empty.
    pub fn ask_field(&mut self, label: &str, required: bool) -> Result<String, CollectError> {
        loop {
            let val = self.read_line(&format!("  {}: ", label))?;
            if !val.is_empty() || !required {
                return Ok(val);
            }
            self.complain("This field is required.")?;
        }
    }

    pub fn say(&mut self, text: &str) -> Result<(), CollectError> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    fn print_question(&mut self, q: &Question, number: usize) -> Result<(), CollectError> {
        let critical = if q.is_critical() {
            self.paint(" [CRITICAL]", Style::Bad)
        } else {
            String::new()
        };
        let heading = self.paint(&format!("  Q{}:", number), Style::Heading);
        writeln!(self.output, "{}{}", heading, critical)?;
        for line in q.text.lines() {
            writeln!(self.output, "  {}", line.trim())?;
        }
        if let Some(help) = q.help {
            writeln!(self.output)?;
            for line in help.lines() {
                let l = self.paint(&format!("    ℹ  {}", line.trim()), Style::Dim);
                writeln!(self.output, "{}", l)?;
            }
        }
        if !q.controls.is_empty() {
            let l = self.paint(
                &format!("    NIST Controls: {}", q.controls.join(", ")),
                Style::Dim,
            );
            writeln!(self.output, "{}", l)?;
        }
        writeln!(self.output)?;
        Ok(())
    }

    fn print_choices(&mut self, choices: &[&str]) -> Result<(), CollectError> {
        for (i, choice) in choices.iter().enumerate() {
            let n = self.paint(&(i + 1).to_string(), Style::Heading);
            writeln!(self.output, "  {}) {}", n, choice)?;
        }
        writeln!(self.output)?;
        Ok(())
    }

    fn confirm(&mut self, text: &str) -> Result<(), CollectError> {
        let l = self.paint(&format!("  ✓ {}", text), Style::Good);
        writeln!(self.output, "{}", l)?;
        Ok(())
    }

    fn ask(&mut self, q: &Question) -> Result<Answer, CollectError> {
        match q.kind {
            AnswerKind::YesNo => loop {
                let prompt = self.paint("  Answer [Y/N]: ", Style::Bold);
                let raw = self.read_line(&prompt)?;
                match parse_yes_no(&raw) {
                    Some(b) => return Ok(Answer::Flag(b)),
                    None => self.complain("Please enter Y or N.")?,
                }
            },
            AnswerKind::Choice => {
                self.print_choices(q.choices)?;
                loop {
                    let prompt = self.paint("  Enter number: ", Style::Bold);
                    let raw = self.read_line(&prompt)?;
                    match parse_choice(&raw, q.choices) {
                        Some(selected) => {
                            self.confirm(&format!("Selected: {}", selected))?;
                            return Ok(Answer::Text(selected.to_string()));
                        }
                        None => self.complain(&format!(
                            "Please enter a number between 1 and {}.",
                            q.choices.len()
                        ))?,
                    }
                }
            }
            AnswerKind::MultiChoice => {
                self.print_choices(q.choices)?;
                let hint = self.paint(
                    "  Enter numbers separated by commas (e.g., 1,3,5) or 'all':",
                    Style::Dim,
                );
                writeln!(self.output, "{}", hint)?;
                loop {
                    let prompt = self.paint("  Your selection: ", Style::Bold);
                    let raw = self.read_line(&prompt)?;
                    match parse_multi_choice(&raw, q.choices) {
                        Some(selected) => {
                            self.confirm(&format!("Selected: {}", selected.join(", ")))?;
                            return Ok(Answer::Selection(selected));
                        }
                        None => self.complain(&format!(
                            "Please enter valid numbers between 1 and {}.",
                            q.choices.len()
                        ))?,
                    }
                }
            }
            AnswerKind::Text => Ok(Answer::Text(self.read_line("  Your answer: ")?)),
            AnswerKind::Number => loop {
                let raw = self.read_line("  Enter a number: ")?;
                match raw.parse::<i64>() {
                    Ok(n) => return Ok(Answer::Number(n)),
                    Err(_) => self.complain("Please enter a valid number.")?,
                }
            },
        }
    }
}

impl<R: BufRead, W: Write> AnswerCollector for TerminalCollector<R, W> {
    fn begin_group(&mut self, group: &QuestionGroup) -> Result<(), CollectError> {
        let rule = self.paint(RULE, Style::Accent);
        let title = self.paint(&format!("  {}", group.title), Style::Heading);
        writeln!(self.output, "\n{}\n{}\n{}\n", rule, title, rule)?;
        for line in group.intro.lines() {
            writeln!(self.output, "  {}", line.trim())?;
        }
        writeln!(self.output)?;
        Ok(())
    }

    fn group_completed(&mut self, group: &QuestionGroup) -> Result<(), CollectError> {
        let line = self.paint(
            &format!("  Skipping {} (already completed)", group.title),
            Style::Dim,
        );
        writeln!(self.output, "{}", line)?;
        Ok(())
    }

    fn collect(&mut self, question: &Question, number: usize) -> Result<Answer, CollectError> {
        self.print_question(question, number)?;
        let answer = self.ask(question)?;
        writeln!(self.output)?;
        Ok(answer)
    }
}

pub fn parse_yes_no(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

pub fn parse_choice<'a>(raw: &str, choices: &[&'a str]) -> Option<&'a str> {
    let idx: usize = raw.trim().parse().ok()?;
    if idx == 0 {
        return None;
    }
    choices.get(idx - 1).copied()
}

/// `all`, or comma-separated 1-based indices. Out-of-range indices are
/// dropped and repeats collapse; a non-integer token rejects the line.
pub fn parse_multi_choice(raw: &str, choices: &[&str]) -> Option<Vec<String>> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("all") {
        return Some(choices.iter().map(|c| c.to_string()).collect());
    }
    let mut selected: Vec<String> = Vec::new();
    for token in raw.split(',') {
        let idx: usize = token.trim().parse().ok()?;
        if idx == 0 || idx > choices.len() {
            continue;
        }
        let choice = choices[idx - 1].to_string();
        if !selected.contains(&choice) {
            selected.push(choice);
        }
    }
    if selected.is_empty() {
        None
    } else {
        Some(selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const CHOICES: &[&str] = &["alpha", "beta", "gamma"];

    fn collector(input: &str) -> TerminalCollector<Cursor<Vec<u8>>, Vec<u8>> {
        TerminalCollector::new(
            Cursor::new(input.as_bytes().to_vec()),
            Vec::new(),
            Palette::plain(),
        )
    }

    #[test]
    fn yes_no_accepts_common_spellings() {
        assert_eq!(parse_yes_no("Y"), Some(true));
        assert_eq!(parse_yes_no(" yes "), Some(true));
        assert_eq!(parse_yes_no("NO"), Some(false));
        assert_eq!(parse_yes_no("true"), None);
        assert_eq!(parse_yes_no(""), None);
    }

    #[test]
    fn choice_is_one_based() {
        assert_eq!(parse_choice("1", CHOICES), Some("alpha"));
        assert_eq!(parse_choice("3", CHOICES), Some("gamma"));
        assert_eq!(parse_choice("0", CHOICES), None);
        assert_eq!(parse_choice("4", CHOICES), None);
        assert_eq!(parse_choice("two", CHOICES), None);
    }

    #[test]
    fn multi_choice_parsing() {
        assert_eq!(
            parse_multi_choice("all", CHOICES),
            Some(vec!["alpha".into(), "beta".into(), "gamma".into()])
        );
        assert_eq!(
            parse_multi_choice("3, 1, 3, 9", CHOICES),
            Some(vec!["gamma".into(), "alpha".into()])
        );
        assert_eq!(parse_multi_choice("9", CHOICES), None);
        assert_eq!(parse_multi_choice("1,x", CHOICES), None);
        assert_eq!(parse_multi_choice("", CHOICES), None);
    }

    #[test]
    fn reprompts_until_valid_yes_no() {
        let mut c = collector("maybe\n\ny\n");
        let q = Question::yes_no("q", "Question?");
        assert_eq!(c.collect(&q, 1).expect("answer"), Answer::Flag(true));
        let out = String::from_utf8(c.into_output()).expect("utf8");
        assert_eq!(out.matches("Please enter Y or N.").count(), 2);
        assert!(out.contains("Q1:"));
    }

    #[test]
    fn choice_question_returns_label() {
        let mut c = collector("7\n2\n");
        let q = Question::choice("q", "Pick", CHOICES);
        assert_eq!(
            c.collect(&q, 4).expect("answer"),
            Answer::Text("beta".into())
        );
        let out = String::from_utf8(c.into_output()).expect("utf8");
        assert!(out.contains("Please enter a number between 1 and 3."));
        assert!(out.contains("Selected: beta"));
    }

    #[test]
    fn number_and_text() {
        let mut c = collector("ten\n-12\n  free words  \n");
        assert_eq!(
            c.collect(&Question::number("n", "How many?"), 1).expect("n"),
            Answer::Number(-12)
        );
        assert_eq!(
            c.collect(&Question::text("t", "Say"), 2).expect("t"),
            Answer::Text("free words".into())
        );
    }

    #[test]
    fn end_of_input_aborts() {
        let mut c = collector("maybe\n");
        let q = Question::yes_no("q", "Question?");
        assert!(matches!(c.collect(&q, 1), Err(CollectError::Aborted)));
    }

    #[test]
    fn critical_questions_are_marked() {
        let mut c = collector("n\n");
        let q = Question::yes_no("q", "Question?").tags(&[crate::domain::models::Tag::Critical]);
        c.collect(&q, 1).expect("answer");
        let out = String::from_utf8(c.into_output()).expect("utf8");
        assert!(out.contains("Q1: [CRITICAL]"));
    }

    #[test]
    fn undecodable_line_reprompts() {
        let mut c = TerminalCollector::new(
            Cursor::new(b"\xff\xfe\ny\n".to_vec()),
            Vec::new(),
            Palette::plain(),
        );
        let q = Question::yes_no("q", "Question?");
        assert_eq!(c.collect(&q, 1).expect("answer"), Answer::Flag(true));
        let out = String::from_utf8(c.into_output()).expect("utf8");
        assert!(out.contains("Input could not be read as text."));
        assert_eq!(out.matches("Answer [Y/N]:").count(), 2);
    }

    #[test]
    fn undecodable_metadata_reprompts() {
        let mut c = TerminalCollector::new(
            Cursor::new(b"Caf\xe9 Corp\nCafe Corp\n".to_vec()),
            Vec::new(),
            Palette::plain(),
        );
        assert_eq!(c.ask_field("Organization", true).expect("org"), "Cafe Corp");
    }

    #[test]
    fn completed_group_notice() {
        let mut c = collector("");
        let group = QuestionGroup {
            key: "g",
            title: "Module 9: Example",
            intro: "",
            questions: Vec::new(),
        };
        c.group_completed(&group).expect("notice");
        let out = String::from_utf8(c.into_output()).expect("utf8");
        assert_eq!(out, "  Skipping Module 9: Example (already completed)\n");
    }

    #[test]
    fn required_field_reprompts() {
        let mut c = collector("\n  Acme  \n\n");
        assert_eq!(c.ask_field("Organization", true).expect("org"), "Acme");
        assert_eq!(c.ask_field("CAGE", false).expect("cage"), "");
    }
}
