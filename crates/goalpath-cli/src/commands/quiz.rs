use std::io::{self, BufRead, Write};

use goalpath_core::QuizSession;

use super::CommandResult;

pub fn run() -> CommandResult {
    let stdin = io::stdin();
    let stdout = io::stdout();
    play(&mut QuizSession::default(), &mut stdin.lock(), &mut stdout.lock())?;
    Ok(())
}

/// Walk `quiz` to completion, reading one option number (1-based) per
/// question. Input ending early leaves the quiz where it stopped.
pub fn play<R: BufRead, W: Write>(
    quiz: &mut QuizSession,
    input: &mut R,
    out: &mut W,
) -> io::Result<()> {
    while let Some(question) = quiz.current().cloned() {
        writeln!(
            out,
            "\nQuestion {} of {}: {}",
            quiz.position() + 1,
            quiz.total(),
            question.prompt
        )?;
        for (i, option) in question.options.iter().enumerate() {
            writeln!(out, "  {}. {option}", i + 1)?;
        }

        let correct = loop {
            write!(out, "answer> ")?;
            out.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                return Ok(());
            }
            let choice = match line.trim().parse::<usize>() {
                Ok(n) if n > 0 => n - 1,
                _ => {
                    writeln!(out, "Enter a number from 1 to {}", question.options.len())?;
                    continue;
                }
            };
            match quiz.answer(choice) {
                Ok(correct) => break correct,
                Err(e) => writeln!(out, "{e}")?,
            }
        };

        if correct {
            writeln!(out, "Correct!")?;
        } else if let Some(answer) = question.options.get(question.correct) {
            writeln!(out, "Wrong. The answer is: {answer}")?;
        } else {
            writeln!(out, "Wrong.")?;
        }
        quiz.advance();
    }

    writeln!(
        out,
        "\nYou scored {}/{} ({}%). {}",
        quiz.score(),
        quiz.total(),
        quiz.percentage(),
        quiz.verdict()
    )?;
    Ok(())
}
