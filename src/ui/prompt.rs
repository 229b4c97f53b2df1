use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Prompt interface
// ---------------------------------------------------------------------------

/// The request/response surface the workflow drives. Every value prompt can
/// be cancelled, which the workflow treats as "decline this step".
pub trait Prompter {
    fn pick_file(&mut self, title: &str) -> Option<PathBuf>;
    fn ask_integer(&mut self, title: &str, message: &str) -> Option<i64>;
    fn ask_yes_no(&mut self, title: &str, message: &str) -> bool;
    fn ask_string(&mut self, title: &str, message: &str) -> Option<String>;
    fn show_info(&mut self, title: &str, message: &str);
    fn show_warning(&mut self, title: &str, message: &str);
    fn show_error(&mut self, title: &str, message: &str);
}

// ---------------------------------------------------------------------------
// Terminal prompter
// ---------------------------------------------------------------------------

/// Line-based prompts on stdin/stdout. `q` or end of input cancels.
pub struct TerminalPrompter<R> {
    input: R,
}

impl TerminalPrompter<io::StdinLock<'static>> {
    pub fn stdin() -> Self {
        Self {
            input: io::stdin().lock(),
        }
    }
}

impl<R: BufRead> TerminalPrompter<R> {
    pub fn new(input: R) -> Self {
        Self { input }
    }

    /// Print `message`, read one line. `None` on EOF, read error or `q`.
    fn read_line(&mut self, title: &str, message: &str) -> Option<String> {
        print!("[{title}] {message} ");
        let _ = io::stdout().flush();

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => {
                let line = line.trim().to_string();
                (!line.eq_ignore_ascii_case("q")).then_some(line)
            }
        }
    }
}

impl<R: BufRead> Prompter for TerminalPrompter<R> {
    fn pick_file(&mut self, title: &str) -> Option<PathBuf> {
        let typed = self.read_line(title, "Path to CSV file (empty opens a file dialog):")?;
        if !typed.is_empty() {
            return Some(PathBuf::from(typed));
        }
        rfd::FileDialog::new()
            .set_title(title)
            .add_filter("CSV files", &["csv"])
            .add_filter("All files", &["*"])
            .pick_file()
    }

    fn ask_integer(&mut self, title: &str, message: &str) -> Option<i64> {
        loop {
            let line = self.read_line(title, message)?;
            if line.is_empty() {
                return None;
            }
            match line.parse::<i64>() {
                Ok(n) => return Some(n),
                Err(_) => println!("Please enter a whole number (or q to cancel)."),
            }
        }
    }

    fn ask_yes_no(&mut self, title: &str, message: &str) -> bool {
        loop {
            let Some(line) = self.read_line(title, &format!("{message} [y/n]")) else {
                return false;
            };
            match line.to_ascii_lowercase().as_str() {
                "y" | "yes" => return true,
                "n" | "no" | "" => return false,
                _ => println!("Please answer y or n."),
            }
        }
    }

    /// An empty line is an answer (`Some("")`); only `q` or EOF cancels.
    fn ask_string(&mut self, title: &str, message: &str) -> Option<String> {
        self.read_line(title, message)
    }

    fn show_info(&mut self, title: &str, message: &str) {
        println!("[{title}] {message}");
    }

    fn show_warning(&mut self, title: &str, message: &str) {
        println!("[{title}] WARNING: {message}");
    }

    fn show_error(&mut self, title: &str, message: &str) {
        eprintln!("[{title}] ERROR: {message}");
    }
}

// ---------------------------------------------------------------------------
// Scripted prompter
// ---------------------------------------------------------------------------

/// One queued answer for a [`ScriptedPrompter`].
#[derive(Debug, Clone, PartialEq)]
pub enum Answer {
    File(Option<PathBuf>),
    Integer(Option<i64>),
    YesNo(bool),
    Text(Option<String>),
}

/// Test harness: replays a fixed script of answers and records every message
/// shown. Running out of answers behaves like the operator cancelling.
///
/// # Panics
///
/// Every prompt panics when the next scripted answer is of the wrong kind,
/// which fails the test that wrote the script. Not meant for interactive use.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<Answer>,
    /// `(title, message)` for every question asked.
    pub questions: Vec<(String, String)>,
    pub infos: Vec<String>,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    fn next(&mut self, title: &str, message: &str) -> Option<Answer> {
        self.questions.push((title.to_string(), message.to_string()));
        let answer = self.answers.pop_front();
        if answer.is_none() {
            log::warn!("Script exhausted at '{title}'");
        }
        answer
    }
}

impl Prompter for ScriptedPrompter {
    fn pick_file(&mut self, title: &str) -> Option<PathBuf> {
        match self.next(title, "") {
            Some(Answer::File(path)) => path,
            None => None,
            other => panic!("'{title}': expected a file answer, got {other:?}"),
        }
    }

    fn ask_integer(&mut self, title: &str, message: &str) -> Option<i64> {
        match self.next(title, message) {
            Some(Answer::Integer(n)) => n,
            None => None,
            other => panic!("'{title}': expected an integer answer, got {other:?}"),
        }
    }

    fn ask_yes_no(&mut self, title: &str, message: &str) -> bool {
        match self.next(title, message) {
            Some(Answer::YesNo(b)) => b,
            None => false,
            other => panic!("'{title}': expected a yes/no answer, got {other:?}"),
        }
    }

    fn ask_string(&mut self, title: &str, message: &str) -> Option<String> {
        match self.next(title, message) {
            Some(Answer::Text(s)) => s,
            None => None,
            other => panic!("'{title}': expected a text answer, got {other:?}"),
        }
    }

    fn show_info(&mut self, _title: &str, message: &str) {
        self.infos.push(message.to_string());
    }

    fn show_warning(&mut self, _title: &str, message: &str) {
        self.warnings.push(message.to_string());
    }

    fn show_error(&mut self, _title: &str, message: &str) {
        self.errors.push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_reads_integers_and_cancels_on_q() {
        let mut prompter = TerminalPrompter::new("abc\n3\nq\n".as_bytes());
        assert_eq!(prompter.ask_integer("Groups", "How many?"), Some(3));
        assert_eq!(prompter.ask_integer("Groups", "How many?"), None);
        assert_eq!(prompter.ask_integer("Groups", "How many?"), None);
    }

    #[test]
    fn terminal_yes_no() {
        let mut prompter = TerminalPrompter::new("maybe\nYes\nn\n".as_bytes());
        assert!(prompter.ask_yes_no("Plot", "Plot?"));
        assert!(!prompter.ask_yes_no("Plot", "Plot?"));
        assert!(!prompter.ask_yes_no("Plot", "Plot?"));
    }

    #[test]
    fn terminal_typed_path_skips_dialog() {
        let mut prompter = TerminalPrompter::new("data/run1.csv\n".as_bytes());
        assert_eq!(prompter.pick_file("Open"), Some(PathBuf::from("data/run1.csv")));
    }

    #[test]
    fn terminal_empty_text_is_an_answer_not_a_cancel() {
        let mut prompter = TerminalPrompter::new("\n  Zea mays \nq\n".as_bytes());
        assert_eq!(prompter.ask_string("Species", "Name?").as_deref(), Some(""));
        assert_eq!(prompter.ask_string("Species", "Name?").as_deref(), Some("Zea mays"));
        assert_eq!(prompter.ask_string("Species", "Name?"), None);
        assert_eq!(prompter.ask_string("Species", "Name?"), None);
    }

    #[test]
    #[should_panic(expected = "expected a yes/no answer")]
    fn scripted_mismatch_fails_loudly() {
        let mut prompter = ScriptedPrompter::new([Answer::Integer(Some(1))]);
        prompter.ask_yes_no("Plot", "Plot?");
    }

    #[test]
    fn scripted_answers_replay_in_order() {
        let mut prompter = ScriptedPrompter::new([
            Answer::Integer(Some(2)),
            Answer::YesNo(true),
            Answer::Text(Some("Leaf A".to_string())),
        ]);
        assert_eq!(prompter.ask_integer("a", "b"), Some(2));
        assert!(prompter.ask_yes_no("c", "d"));
        assert_eq!(prompter.ask_string("e", "f").as_deref(), Some("Leaf A"));
        assert_eq!(prompter.ask_integer("g", "h"), None);
        assert_eq!(prompter.questions.len(), 4);
    }
}
