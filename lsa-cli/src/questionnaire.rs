//! Interactive questionnaire
//!
//! Asks every catalog question in order and only returns once each one has a
//! valid answer, so the scored result always covers the whole catalog.

use std::io::{BufRead, Write};

use anyhow::{bail, Result};
use lsa_common::catalog::Catalog;
use lsa_common::scoring::{Answers, MAX_ANSWER, MIN_ANSWER};

pub const SCALE_LABELS: [&str; 5] = [
    "Strongly disagree",
    "Disagree",
    "Neutral",
    "Agree",
    "Strongly agree",
];

/// Parse one typed answer; `None` for anything outside the scale
pub fn parse_answer(line: &str) -> Option<i64> {
    line.trim()
        .parse::<i64>()
        .ok()
        .filter(|v| (MIN_ANSWER..=MAX_ANSWER).contains(v))
}

/// Ask every question, re-prompting until the answer is valid
pub fn run_questionnaire<R: BufRead, W: Write>(
    catalog: &Catalog,
    input: &mut R,
    output: &mut W,
) -> Result<Answers> {
    let mut answers = Answers::new();
    let total = catalog.questions().len();

    for dimension in catalog.dimensions() {
        writeln!(output)?;
        writeln!(output, "== {} ==", dimension.name)?;
        writeln!(output, "{}", dimension.short_description)?;

        for question in catalog.questions_for(&dimension.id) {
            writeln!(output)?;
            writeln!(output, "[{}/{}] {}", answers.len() + 1, total, question.text)?;
            for (value, label) in (MIN_ANSWER..=MAX_ANSWER).zip(SCALE_LABELS) {
                writeln!(output, "  {}) {}", value, label)?;
            }

            loop {
                write!(output, "Your answer ({}-{}): ", MIN_ANSWER, MAX_ANSWER)?;
                output.flush()?;

                let mut line = String::new();
                if input.read_line(&mut line)? == 0 {
                    bail!(
                        "Input ended with {} of {} questions answered",
                        answers.len(),
                        total
                    );
                }
                match parse_answer(&line) {
                    Some(value) => {
                        answers.insert(question.id.clone(), value);
                        break;
                    }
                    None => writeln!(
                        output,
                        "Please enter a whole number from {} to {}.",
                        MIN_ANSWER, MAX_ANSWER
                    )?,
                }
            }
        }
    }

    Ok(answers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_answer() {
        assert_eq!(parse_answer("3\n"), Some(3));
        assert_eq!(parse_answer(" 5 "), Some(5));
        assert_eq!(parse_answer("0"), None);
        assert_eq!(parse_answer("6"), None);
        assert_eq!(parse_answer("three"), None);
        assert_eq!(parse_answer("2.5"), None);
    }

    #[test]
    fn test_answers_every_question_and_reprompts() {
        let catalog = Catalog::standard();
        let mut script = String::from("9\nabc\n");
        for _ in 0..catalog.questions().len() {
            script.push_str("4\n");
        }
        let mut input = Cursor::new(script);
        let mut output = Vec::new();

        let answers = run_questionnaire(catalog, &mut input, &mut output).unwrap();
        assert_eq!(answers.len(), 20);
        assert!(answers.values().all(|&v| v == 4));

        let transcript = String::from_utf8(output).unwrap();
        assert_eq!(transcript.matches("Please enter a whole number").count(), 2);
        assert!(transcript.contains("[20/20]"));
    }

    #[test]
    fn test_early_end_of_input_fails() {
        let mut input = Cursor::new("1\n2\n");
        let mut output = Vec::new();

        let err = run_questionnaire(Catalog::standard(), &mut input, &mut output).unwrap_err();
        assert!(err.to_string().contains("2 of 20"));
    }
}
