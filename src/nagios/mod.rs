use std::fmt::Write;

/// Plugin states as understood by Nagios compatible monitoring systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    Critical,
    Unknown,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Ok => "OK",
            Status::Critical => "CRITICAL",
            Status::Unknown => "UNKNOWN",
        }
    }

    pub fn exit_code(self) -> i32 {
        match self {
            Status::Ok => 0,
            Status::Critical => 2,
            Status::Unknown => 3,
        }
    }
}

/// Formats the single status line a plugin prints, e.g. `CRITICAL - got unexpected status code 308`.
pub fn render(status: Status, message: &str) -> String {
    format!("{} - {}", status.as_str(), message)
}

/// Flattens an error and its sources into one line, outermost context first.
pub fn report(mut err: &(dyn std::error::Error + 'static)) -> String {
    let mut s = format!("{}", err);
    while let Some(src) = err.source() {
        let _ = write!(s, ": {}", src);
        err = src;
    }
    s
}

/// Prints the status line on stdout and terminates the process with the matching exit code.
pub fn exit(status: Status, message: &str) -> ! {
    println!("{}", render(status, message));
    std::process::exit(status.exit_code())
}
