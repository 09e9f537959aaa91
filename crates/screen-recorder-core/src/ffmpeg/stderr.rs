use std::{
    collections::VecDeque,
    io::{BufRead, BufReader, Read},
    thread::{self, JoinHandle},
};

/// Lines of ffmpeg stderr kept for error reports.
const TAIL_LINES: usize = 20;

/// Drains a child's stderr on a background thread, keeping the last lines.
///
/// An undrained stderr pipe can fill up and stall the encoder, so the
/// pipe is always read even when nobody looks at the output.
pub(crate) struct StderrTail {
    handle: JoinHandle<Vec<String>>,
}

impl StderrTail {
    pub(crate) fn spawn<R: Read + Send + 'static>(stderr: R) -> std::io::Result<Self> {
        let handle = thread::Builder::new()
            .name("ffmpeg-stderr".to_string())
            .spawn(move || {
                let mut tail = VecDeque::with_capacity(TAIL_LINES);
                for line in BufReader::new(stderr).lines().map_while(Result::ok) {
                    if tail.len() == TAIL_LINES {
                        tail.pop_front();
                    }
                    tail.push_back(line);
                }
                Vec::from(tail)
            })?;
        Ok(Self { handle })
    }

    /// Wait for EOF and return the collected lines joined by newlines.
    pub(crate) fn collect(self) -> String {
        self.handle
            .join()
            .map(|lines| lines.join("\n"))
            .unwrap_or_default()
    }
}
