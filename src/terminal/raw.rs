//! Raw mode and terminal size via termios.
//!
//! # Safety
//! The libc calls here are plain FFI on caller-supplied descriptors; every
//! failure is reported as `io::Error::last_os_error`.

#![allow(unsafe_code)]
#![allow(clippy::borrow_as_ptr)]

use std::io;
use std::os::unix::io::{AsRawFd, RawFd};

/// Restores the saved termios settings when dropped.
#[derive(Debug)]
pub struct RawModeGuard {
    fd: RawFd,
    original: libc::termios,
}

impl RawModeGuard {
    /// Put the descriptor into raw mode.
    ///
    /// Reads return after at most 100ms even without input, so the page's
    /// timers keep running while nobody types.
    pub fn new<F: AsRawFd>(fd: &F) -> io::Result<Self> {
        let fd = fd.as_raw_fd();
        let original = get_termios(fd)?;

        let mut raw = original;
        raw.c_iflag &= !(libc::BRKINT | libc::ICRNL | libc::INPCK | libc::ISTRIP | libc::IXON);
        raw.c_oflag &= !libc::OPOST;
        raw.c_cflag |= libc::CS8;
        // Ctrl+C arrives as a key so the page can tear down first
        raw.c_lflag &= !(libc::ECHO | libc::ICANON | libc::IEXTEN | libc::ISIG);
        raw.c_cc[libc::VMIN] = 0;
        raw.c_cc[libc::VTIME] = 1;

        set_termios(fd, &raw)?;
        Ok(Self { fd, original })
    }

    fn restore(&self) -> io::Result<()> {
        set_termios(self.fd, &self.original)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

/// Enter raw mode on stdin.
pub fn enable_raw_mode() -> io::Result<RawModeGuard> {
    RawModeGuard::new(&io::stdin())
}

#[must_use]
pub fn is_tty<F: AsRawFd>(fd: &F) -> bool {
    // SAFETY: isatty accepts any descriptor value
    unsafe { libc::isatty(fd.as_raw_fd()) == 1 }
}

/// Columns and rows of the terminal on stdout.
///
/// Zero dimensions are reported as an error rather than returned.
pub fn terminal_size() -> io::Result<(u16, u16)> {
    // SAFETY: winsize is plain old data
    let mut size: libc::winsize = unsafe { std::mem::zeroed() };

    // SAFETY: TIOCGWINSZ writes into the winsize we own
    let result = unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, &mut size) };

    if result == -1 {
        Err(io::Error::last_os_error())
    } else if size.ws_col == 0 || size.ws_row == 0 {
        Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "terminal reported zero dimensions",
        ))
    } else {
        Ok((size.ws_col, size.ws_row))
    }
}

/// Switch a descriptor to non-blocking reads.
pub fn set_nonblocking<F: AsRawFd>(fd: &F) -> io::Result<()> {
    let fd = fd.as_raw_fd();
    // SAFETY: F_GETFL/F_SETFL only touch the descriptor's status flags
    unsafe {
        let flags = libc::fcntl(fd, libc::F_GETFL);
        if flags == -1 {
            return Err(io::Error::last_os_error());
        }
        if libc::fcntl(fd, libc::F_SETFL, flags | libc::O_NONBLOCK) == -1 {
            return Err(io::Error::last_os_error());
        }
    }
    Ok(())
}

fn get_termios(fd: RawFd) -> io::Result<libc::termios> {
    // SAFETY: termios is plain old data
    let mut termios: libc::termios = unsafe { std::mem::zeroed() };

    // SAFETY: tcgetattr writes into the termios we own
    if unsafe { libc::tcgetattr(fd, &mut termios) } == -1 {
        Err(io::Error::last_os_error())
    } else {
        Ok(termios)
    }
}

fn set_termios(fd: RawFd, termios: &libc::termios) -> io::Result<()> {
    // SAFETY: tcsetattr only reads the termios
    if unsafe { libc::tcsetattr(fd, libc::TCSAFLUSH, termios) } == -1 {
        Err(io::Error::last_os_error())
    } else {
        Ok(())
    }
}
