//! Fenced code block detection.
//!
//! Directive syntax inside a fenced code block is literal text, so the
//! processor asks [`FenceTracker`] about every line before parsing it.

/// An open fence: marker character and run length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Fence {
    marker: char,
    len: usize,
}

/// Line-by-line tracker of `CommonMark` code fences.
#[derive(Debug, Default)]
pub(crate) struct FenceTracker {
    open: Option<Fence>,
}

impl FenceTracker {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Whether a fence is open after the most recently observed line.
    pub(crate) fn in_fence(&self) -> bool {
        self.open.is_some()
    }

    /// Feed the next line. Returns `true` if the line opened or closed a fence.
    pub(crate) fn update(&mut self, line: &str) -> bool {
        let Some(body) = strip_indent(line) else {
            return false;
        };

        match self.open {
            Some(fence) => {
                let run = marker_run(body, fence.marker);
                if run >= fence.len && body[run..].trim().is_empty() {
                    self.open = None;
                    return true;
                }
                false
            }
            None => match opening_fence(body) {
                Some(fence) => {
                    self.open = Some(fence);
                    true
                }
                None => false,
            },
        }
    }
}

/// Strip up to three spaces of indentation. Four or more is an indented code
/// block, never a fence.
fn strip_indent(line: &str) -> Option<&str> {
    let spaces = line.bytes().take_while(|&b| b == b' ').count();
    (spaces < 4).then(|| &line[spaces..])
}

fn marker_run(s: &str, marker: char) -> usize {
    s.chars().take_while(|&c| c == marker).count()
}

fn opening_fence(body: &str) -> Option<Fence> {
    let marker = body.chars().next().filter(|&c| c == '`' || c == '~')?;
    let len = marker_run(body, marker);
    if len < 3 {
        return None;
    }
    // Backtick fences may not carry backticks in their info string.
    if marker == '`' && body[len..].contains('`') {
        return None;
    }
    Some(Fence { marker, len })
}
