//! Offline questionnaire parsing

use crate::console::CliConsole;
use colored::*;
use expertosy_core::error::{ExpertosyResult, ResultExt};
use expertosy_core::questionnaire::{ParseMode, ParserKind, Question, option_label};
use std::fmt::Write as _;
use tokio::io::AsyncReadExt;
use tracing::debug;

/// Parse questionnaire text from `file` ('-' for stdin) and print the questions
pub async fn execute(
    file: &str,
    strict: bool,
    parser: ParserKind,
    json: bool,
) -> ExpertosyResult<()> {
    let text = read_input(file).await?;
    let mode = if strict {
        ParseMode::Strict
    } else {
        ParseMode::Loose
    };

    let questions = parser.build().parse(&text, mode)?;
    debug!(file, %parser, %mode, questions = questions.len(), "Parsed questionnaire");

    if json {
        println!("{}", serde_json::to_string_pretty(&questions)?);
        return Ok(());
    }

    let console = CliConsole::new(true);
    console.print_header(&format!("{} question(s)", questions.len()));
    print!("{}", render_questions(&questions));
    Ok(())
}

async fn read_input(file: &str) -> ExpertosyResult<String> {
    if file == "-" {
        let mut text = String::new();
        tokio::io::stdin()
            .read_to_string(&mut text)
            .await
            .context("Failed to read questionnaire from stdin")?;
        return Ok(text);
    }

    tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("Failed to read questionnaire from {}", file))
}

/// Plain-text listing of parsed questions
fn render_questions(questions: &[Question]) -> String {
    let mut out = String::new();
    for (i, question) in questions.iter().enumerate() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}. {}", i + 1, question.prompt.bold());
        if let Some(category) = &question.category {
            let _ = writeln!(out, "   {}", format!("[{}]", category).cyan());
        }
        if let Some(help) = &question.help_text {
            let _ = writeln!(out, "   {}", help.dimmed());
        }
        for (j, option) in question.options.iter().enumerate() {
            match &option.description {
                Some(description) => {
                    let _ = writeln!(
                        out,
                        "   {}) {} {}",
                        option_label(j),
                        option.text,
                        format!("- {}", description).dimmed()
                    );
                }
                None => {
                    let _ = writeln!(out, "   {}) {}", option_label(j), option.text);
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use expertosy_core::questionnaire::QuestionOption;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_render_questions() {
        colored::control::set_override(false);
        let questions = vec![
            Question::new(
                "What is your budget?",
                vec![
                    QuestionOption::new("Under $500"),
                    QuestionOption::new("Over $500").with_description("premium models"),
                ],
            ),
        ];

        let text = render_questions(&questions);
        assert!(text.contains("1. What is your budget?"));
        assert!(text.contains("   A) Under $500"));
        assert!(text.contains("   B) Over $500 - premium models"));
    }

    #[tokio::test]
    async fn test_read_input_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "1. Which size?\nA) Small\nB) Large").unwrap();

        let text = read_input(file.path().to_str().unwrap()).await.unwrap();
        assert!(text.starts_with("1. Which size?"));
    }

    #[tokio::test]
    async fn test_read_input_missing_file() {
        let err = read_input("/definitely/not/here.txt").await.unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.txt"));
    }
}
