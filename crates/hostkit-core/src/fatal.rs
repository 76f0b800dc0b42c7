//! # Fatal Error Reporting
//!
//! For the few conditions where continuing would mean operating on a broken
//! platform subsystem (today: the text conversion engines failing to open).
//! Everything else is returned to the caller as a [`HostError`](crate::error::HostError).
//!
//! [`die`] prints a diagnostic and exits with [`FATAL_EXIT_STATUS`], a status
//! used by nothing else. [`clear_and_cr`] is the companion used by interactive
//! progress displays to wipe the current stderr line before rewriting it.

use std::io::{self, Write};
use std::process;

use tracing::error;

/// Exit status reserved for the catastrophic-error path.
pub const FATAL_EXIT_STATUS: i32 = 33;

/// ANSI "erase to end of line".
const ERASE_END_OF_LINE: &str = "\x1b[K";

/// Report `message` on stderr and terminate the process.
pub fn die(message: &str) -> !
{
    error!("Unexpected error: {message}");
    let stderr = io::stderr();
    let _ = write_fatal_report(&mut stderr.lock(), message);
    process::exit(FATAL_EXIT_STATUS)
}

/// Write the fatal diagnostic for `message` to `out`.
///
/// ## Errors
///
/// Returns the writer's I/O error.
pub fn write_fatal_report<W: Write>(out: &mut W, message: &str) -> io::Result<()>
{
    write!(out, "\n\nUnexpected error: {message}\n")?;
    out.flush()
}

/// Erase the current stderr line and return the cursor to its start.
pub fn clear_and_cr()
{
    let stderr = io::stderr();
    let _ = write_clear_and_cr(&mut stderr.lock());
}

/// Write the erase-line sequence followed by a carriage return to `out`.
///
/// ## Errors
///
/// Returns the writer's I/O error.
pub fn write_clear_and_cr<W: Write>(out: &mut W) -> io::Result<()>
{
    write!(out, "{ERASE_END_OF_LINE}\r")?;
    out.flush()
}
