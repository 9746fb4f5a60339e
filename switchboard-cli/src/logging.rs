/// A thread-safe writer that flushes and syncs every write, for MCP-mode
/// logging.
///
/// In serve mode stdout belongs to the protocol, so logs go to a file under
/// `~/.switchboard/`. An MCP server is typically killed by its host rather
/// than shut down, so each write is synced to disk immediately; otherwise the
/// tail of the log disappears exactly when it is needed.
///
/// # Example
///
/// ```no_run
/// use std::sync::{Arc, Mutex};
/// use std::fs::File;
/// use std::io::Write;
/// use switchboard_cli::logging::FileWriterGuard;
///
/// let file = File::create("mcp.log").unwrap();
/// let shared = Arc::new(Mutex::new(file));
/// let mut guard = FileWriterGuard::new(shared);
/// guard.write_all(b"log line\n").unwrap();
/// ```
pub struct FileWriterGuard {
    file: std::sync::Arc<std::sync::Mutex<std::fs::File>>,
}

impl FileWriterGuard {
    /// Creates a new `FileWriterGuard` wrapping the given file.
    pub fn new(file: std::sync::Arc<std::sync::Mutex<std::fs::File>>) -> Self {
        Self { file }
    }
}

impl std::io::Write for FileWriterGuard {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let mut file = self
            .file
            .lock()
            .expect("log writer mutex poisoned by a panic in another thread");
        let result = file.write(buf)?;
        file.flush()?;
        file.sync_all()?;
        Ok(result)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        let mut file = self
            .file
            .lock()
            .expect("log writer mutex poisoned by a panic in another thread");
        file.flush()?;
        file.sync_all()?;
        Ok(())
    }
}
