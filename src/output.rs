use owo_colors::OwoColorize;

/// Consistent, colored user-facing progress lines. Progress goes to stdout,
/// problems to stderr. Colors are enabled only when the stream is a TTY.
fn stdout_tty() -> bool {
    atty::is(atty::Stream::Stdout)
}

fn stderr_tty() -> bool {
    atty::is(atty::Stream::Stderr)
}

pub fn print_info(msg: &str) {
    if stdout_tty() {
        println!("{} {}", "info:".cyan().bold(), msg);
    } else {
        println!("info: {}", msg);
    }
}

pub fn print_success(msg: &str) {
    if stdout_tty() {
        println!("{} {}", "ok:".green().bold(), msg);
    } else {
        println!("ok: {}", msg);
    }
}

/// A collision or other expected no-op; informational, so stdout.
pub fn print_skip(msg: &str) {
    if stdout_tty() {
        println!("{} {}", "skip:".yellow().bold(), msg);
    } else {
        println!("skip: {}", msg);
    }
}

pub fn print_warn(msg: &str) {
    if stderr_tty() {
        eprintln!("{} {}", "warn:".yellow().bold(), msg);
    } else {
        eprintln!("warn: {}", msg);
    }
}

pub fn print_error(msg: &str) {
    if stderr_tty() {
        eprintln!("{} {}", "error:".red().bold(), msg);
    } else {
        eprintln!("error: {}", msg);
    }
}

/// Plain line with no prefix (headers, blank separators, summaries).
pub fn print_user(msg: &str) {
    println!("{}", msg);
}
