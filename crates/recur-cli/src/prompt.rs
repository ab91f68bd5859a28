//! Re-prompting for a replacement recurrence phrase.

use std::io::{self, BufRead, Write};

use colored::Colorize;
use recur_engine::{revalidate, RecurError, Recurrence};

/// Typed at the prompt to give up on the task.
const QUIT: &str = "q";

/// What the person at the prompt settled on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// A phrase that parsed. `None` means they cleared the recurrence.
    Accepted(Option<Recurrence>),
    /// `q` or end of input.
    Aborted,
}

/// Keep asking on `input` until an answer parses.
///
/// Prompts and errors go to `err`; nothing is written anywhere else.
pub fn prompt_until_valid<R, E>(input: &mut R, err: &mut E) -> io::Result<Answer>
where
    R: BufRead,
    E: Write,
{
    loop {
        write!(err, "{} ", "Set recurrence (todoist style):".blue().bold())?;
        err.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(err)?;
            return Ok(Answer::Aborted);
        }
        let answer = line.trim_end_matches(['\n', '\r']);
        if answer.trim() == QUIT {
            return Ok(Answer::Aborted);
        }

        match revalidate(answer) {
            Ok(recurrence) => return Ok(Answer::Accepted(recurrence)),
            Err(e) => report(&e, err)?,
        }
    }
}

/// Tell the user which phrase was rejected.
pub fn report<E: Write>(e: &RecurError, err: &mut E) -> io::Result<()> {
    let message = format!(
        "Unsupported recurrence: '{}'. Please enter a valid value",
        e.phrase()
    );
    writeln!(err, "{}", message.red().bold())
}

#[cfg(test)]
mod tests {
    use super::*;
    use recur_engine::Period;

    fn rejected() -> RecurError {
        RecurError::UnsupportedRecurrence("every mon,tues".to_string())
    }

    fn run(answers: &str) -> (Answer, String) {
        let mut input = answers.as_bytes();
        let mut err = Vec::new();
        report(&rejected(), &mut err).unwrap();
        let answer = prompt_until_valid(&mut input, &mut err).unwrap();
        (answer, String::from_utf8(err).unwrap())
    }

    #[test]
    fn test_first_valid_answer_wins() {
        let (answer, err) = run("every other day\nevery week\n");
        assert_eq!(
            answer,
            Answer::Accepted(Some(Recurrence::Multi {
                count: 2,
                period: Period::Day
            }))
        );
        assert!(err.contains("Unsupported recurrence: 'every mon,tues'"), "got: {err}");
    }

    #[test]
    fn test_reprompts_after_invalid_answer() {
        let (answer, err) = run("every blue moon\nevery monday\n");
        assert_eq!(answer, Answer::Accepted(Some(Recurrence::Weekly(1))));
        assert!(err.contains("Unsupported recurrence: 'every blue moon'"), "got: {err}");
        assert_eq!(err.matches("Set recurrence").count(), 2);
    }

    #[test]
    fn test_empty_answer_clears() {
        let (answer, _) = run("\n");
        assert_eq!(answer, Answer::Accepted(None));
    }

    #[test]
    fn test_quit_and_eof_abort() {
        assert_eq!(run("q\n").0, Answer::Aborted);
        assert_eq!(run("every blue moon\n").0, Answer::Aborted);
        assert_eq!(run("").0, Answer::Aborted);
    }
}
