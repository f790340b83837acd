//! Incremental parser for `text/event-stream` frames.
//!
//! Only the event name matters here: payloads are notifications, and callers
//! re-fetch whatever changed. Data lines are ignored.

/// Buffers raw bytes and yields the event name of each complete frame.
#[derive(Debug, Default)]
pub(crate) struct FrameParser {
    buffer: Vec<u8>,
    /// Prefix of `buffer` already known to hold no terminator.
    scanned: usize,
}

impl FrameParser {
    /// Feed a chunk; returns event names of frames completed by it, in order.
    ///
    /// Frames with no `event:` line are dropped. When a frame carries several,
    /// the last one wins.
    pub(crate) fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buffer.extend(chunk.iter().copied().filter(|b| *b != b'\r'));

        let mut names = Vec::new();
        while let Some(end) = find_frame_end(&self.buffer, self.scanned) {
            let frame: Vec<u8> = self.buffer.drain(..end + 2).collect();
            self.scanned = 0;
            if let Some(name) = event_name(&frame[..end]) {
                names.push(name);
            }
        }
        // Back off one byte so a `\n` ending this chunk can pair with the next.
        self.scanned = self.buffer.len().saturating_sub(1);
        names
    }

    /// Bytes held back waiting for a frame terminator.
    #[cfg(test)]
    pub(crate) fn pending(&self) -> usize {
        self.buffer.len()
    }
}

fn find_frame_end(buffer: &[u8], from: usize) -> Option<usize> {
    buffer
        .get(from..)?
        .windows(2)
        .position(|pair| pair == b"\n\n")
        .map(|offset| from + offset)
}

fn event_name(frame: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(frame);
    text.lines()
        .filter_map(|line| line.strip_prefix("event:"))
        .map(str::trim)
        .last()
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}
