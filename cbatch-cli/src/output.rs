// Terminal output for the cbatch subcommands.
// Progress and verdicts go to stderr; program stdout stays on stdout so it can be piped.

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const ACTION: &str = "\x1b[1;36m";
const PASS: &str = "\x1b[1;32m";
const FAIL: &str = "\x1b[1;31m";
const NOTE: &str = "\x1b[36m";
const CAUTION: &str = "\x1b[33m";
const DIAGNOSTIC: &str = "\x1b[31m";

/// Gutter printed in front of every line a job produced
const GUTTER: &str = "        |";

fn marked(colour: &str, mark: char, message: &str) {
    eprintln!("{colour}  {mark}{RESET} {message}");
}

/// Right-aligned verb followed by its subject, e.g. `   Compiling hello.c`
pub fn status(action: &str, subject: &str) {
    eprintln!("{ACTION}{action:>12}{RESET} {subject}");
}

/// Verdict line for a job or batch that passed
pub fn success(message: &str) {
    marked(PASS, '\u{2713}', message);
}

/// Verdict line for a job or batch that failed
pub fn failure(message: &str) {
    marked(FAIL, '\u{2717}', message);
}

pub fn warning(message: &str) {
    marked(CAUTION, '!', message);
}

pub fn info(message: &str) {
    marked(NOTE, 'i', message);
}

/// A line the program wrote to stdout
pub fn program_stdout(line: &str) {
    println!("{GUTTER} {line}");
}

/// A compiler diagnostic or a line the program wrote to stderr
pub fn diagnostic(line: &str) {
    eprintln!("{DIAGNOSTIC}{GUTTER} {line}{RESET}");
}

pub fn banner(message: &str) {
    eprintln!("{BOLD}==> {message}{RESET}");
}
