//! POSIX signal table used by the `signal` completion kind

use shellcomp_core::Completion;

/// Signal names without prefix, with a short description
pub const SIGNALS: &[(&str, &str)] = &[
    ("ABRT", "Process abort signal"),
    ("ALRM", "Alarm clock"),
    ("BUS", "Access to an undefined portion of a memory object"),
    ("CHLD", "Child process terminated, stopped, or continued"),
    ("CONT", "Continue executing, if stopped"),
    ("FPE", "Erroneous arithmetic operation"),
    ("HUP", "Hangup"),
    ("ILL", "Illegal instruction"),
    ("INT", "Terminal interrupt signal"),
    ("KILL", "Kill (cannot be caught or ignored)"),
    ("PIPE", "Write on a pipe with no one to read it"),
    ("QUIT", "Terminal quit signal"),
    ("SEGV", "Invalid memory reference"),
    ("STOP", "Stop executing (cannot be caught or ignored)"),
    ("TERM", "Termination signal"),
    ("TSTP", "Terminal stop signal"),
    ("TTIN", "Background process attempting read"),
    ("TTOU", "Background process attempting write"),
    ("USR1", "User-defined signal 1"),
    ("USR2", "User-defined signal 2"),
    ("POLL", "Pollable event"),
    ("PROF", "Profiling timer expired"),
    ("SYS", "Bad system call"),
    ("TRAP", "Trace/breakpoint trap"),
    ("XFSZ", "File size limit exceeded"),
    ("VTALRM", "Virtual timer expired"),
    ("XCPU", "CPU time limit exceeded"),
];

/// Described choices for every signal, names prefixed with `prefix` (e.g. `SIG`)
pub fn signal_choices(prefix: &str) -> Completion {
    Completion::described(
        SIGNALS
            .iter()
            .map(|(name, desc)| (format!("{}{}", prefix, name), *desc)),
    )
}
