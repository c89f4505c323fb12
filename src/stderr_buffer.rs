use std::io::{self, Write};
use std::sync::{Mutex, MutexGuard};

static BUFFER: Mutex<Option<Vec<String>>> = Mutex::new(None);

fn lock() -> MutexGuard<'static, Option<Vec<String>>> {
    BUFFER.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Activate buffering. While active, log output is stored instead of being
/// printed to stderr, so it cannot corrupt the TUI.
pub fn activate() {
    *lock() = Some(Vec::new());
}

/// Deactivate buffering and return all collected messages.
pub fn drain() -> Vec<String> {
    lock().take().unwrap_or_default()
}

/// Stderr handle that respects the buffer; used as the log writer.
#[derive(Debug, Default, Clone, Copy)]
pub struct BufferedStderr;

pub fn writer() -> BufferedStderr {
    BufferedStderr
}

impl Write for BufferedStderr {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut guard = lock();
        if let Some(messages) = guard.as_mut() {
            let text = String::from_utf8_lossy(buf);
            messages.push(text.trim_end_matches('\n').to_string());
            Ok(buf.len())
        } else {
            drop(guard);
            io::stderr().write(buf)
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffers_while_active() {
        activate();
        let mut w = writer();
        w.write_all(b"first line\n").unwrap();
        w.write_all(b"second line\n").unwrap();

        let drained = drain();
        assert_eq!(drained, vec!["first line", "second line"]);
        assert!(drain().is_empty());
    }
}
