use std::io::{self, BufRead, Write};

use unsigned_keys_migrator::Confirmation;

/// Asks the operator on the terminal; an empty answer or end of input means yes
pub struct StdinConfirmation;

impl Confirmation for StdinConfirmation {
    fn confirm(&self, question: &str) -> bool {
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        ask(question, &mut stdin.lock(), &mut stdout)
    }
}

pub fn ask<R: BufRead, W: Write>(question: &str, input: &mut R, output: &mut W) -> bool {
    if write!(output, "{} [Yes/no] ", question)
        .and_then(|_| output.flush())
        .is_err()
    {
        return false;
    }

    let mut answer = String::new();
    match input.read_line(&mut answer) {
        Ok(0) => true,
        Ok(_) => is_yes(&answer),
        Err(_) => false,
    }
}

fn is_yes(answer: &str) -> bool {
    let answer = answer.trim();
    answer.is_empty() || answer.starts_with(['y', 'Y'])
}
