use std::io::{self, Write};
#[cfg(unix)]
use std::os::unix::io::RawFd;

use crossterm::{cursor, execute};
use is_terminal::IsTerminal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalCapabilities {
    pub stdout_tty: bool,
    pub stdin_tty: bool,
    pub supports_color: bool,
    pub supports_unicode: bool,
    pub is_ci: bool,
}

pub fn detect_capabilities() -> TerminalCapabilities {
    detect_capabilities_impl(
        |key| std::env::var(key).ok(),
        io::stdout().is_terminal(),
        io::stdin().is_terminal(),
    )
}

fn detect_capabilities_impl(
    get_env: impl Fn(&str) -> Option<String>,
    stdout_tty: bool,
    stdin_tty: bool,
) -> TerminalCapabilities {
    let term = get_env("TERM").unwrap_or_default();
    let term_is_dumb = term.eq_ignore_ascii_case("dumb");
    let no_color = get_env("NO_COLOR").is_some_and(|v| !v.is_empty());

    TerminalCapabilities {
        stdout_tty,
        stdin_tty,
        supports_color: stdout_tty && !term_is_dumb && !no_color,
        supports_unicode: !term_is_dumb && unicode_locale(&get_env),
        is_ci: is_ci_env(&get_env),
    }
}

fn is_ci_env(get_env: &impl Fn(&str) -> Option<String>) -> bool {
    const KEYS: &[&str] = &[
        "CI",
        "GITHUB_ACTIONS",
        "GITLAB_CI",
        "JENKINS_HOME",
        "BUILDKITE",
        "CIRCLECI",
        "CODEBUILD_BUILD_ID",
    ];

    KEYS.iter().any(|k| get_env(k).is_some())
}

fn unicode_locale(get_env: &impl Fn(&str) -> Option<String>) -> bool {
    // First locale variable that is set wins, like libc.
    for key in ["LC_ALL", "LC_CTYPE", "LANG"] {
        if let Some(val) = get_env(key).filter(|v| !v.is_empty()) {
            let v = val.to_lowercase();
            return v.contains("utf-8") || v.contains("utf8");
        }
    }
    true
}

/// Line settings of the controlling terminal, captured before any prompt.
///
/// A secret prompt turns echo off while it reads. If the process is
/// interrupted mid-prompt, `restore` puts echo and the cursor back.
pub struct TerminalSnapshot {
    #[cfg(unix)]
    saved: Option<(RawFd, libc::termios)>,
}

impl TerminalSnapshot {
    #[cfg(unix)]
    pub fn capture() -> Self {
        Self::capture_fd(libc::STDIN_FILENO)
    }

    #[cfg(not(unix))]
    pub fn capture() -> Self {
        Self {}
    }

    #[cfg(unix)]
    fn capture_fd(fd: RawFd) -> Self {
        let mut termios = std::mem::MaybeUninit::<libc::termios>::uninit();
        // SAFETY: tcgetattr fully initializes `termios` when it returns 0.
        let saved = unsafe {
            if libc::tcgetattr(fd, termios.as_mut_ptr()) == 0 {
                Some((fd, termios.assume_init()))
            } else {
                None
            }
        };
        Self { saved }
    }

    /// Whether terminal settings were captured (false when stdin is piped).
    pub fn is_captured(&self) -> bool {
        #[cfg(unix)]
        {
            self.saved.is_some()
        }
        #[cfg(not(unix))]
        {
            false
        }
    }

    /// Reapply the captured settings and show the cursor on `out`.
    pub fn restore(&self, out: &mut impl Write) -> io::Result<()> {
        #[cfg(unix)]
        if let Some((fd, termios)) = &self.saved {
            // SAFETY: `termios` was filled by tcgetattr on this same descriptor.
            if unsafe { libc::tcsetattr(*fd, libc::TCSANOW, termios) } != 0 {
                return Err(io::Error::last_os_error());
            }
        }
        execute!(out, cursor::Show)
    }
}
