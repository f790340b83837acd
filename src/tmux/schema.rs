//! Ordered field schemas for tmux `-F` listings.
//!
//! Each listing asks tmux for a colon-delimited record per line. The schema
//! both renders the `-F` format string and parses lines back into records
//! with named, typed accessors, so field positions live in exactly one place.

/// Ordered field layout for one listing command.
#[derive(Debug)]
pub(crate) struct RecordSchema {
    /// tmux format variable names, in output order.
    fields: &'static [&'static str],
    /// Minimum number of fields a line must carry to be accepted.
    required: usize,
    /// Free-text field that absorbs surplus `:`-separated parts.
    greedy: Option<&'static str>,
}

pub(crate) static SESSION_SCHEMA: RecordSchema = RecordSchema {
    fields: &[
        "session_id",
        "session_name",
        "session_attached",
        "session_windows",
        "session_created",
    ],
    required: 4,
    greedy: None,
};

pub(crate) static WINDOW_SCHEMA: RecordSchema = RecordSchema {
    fields: &["window_id", "window_index", "window_name", "window_active"],
    required: 4,
    greedy: Some("window_name"),
};

pub(crate) static PANE_SCHEMA: RecordSchema = RecordSchema {
    fields: &[
        "pane_id",
        "pane_index",
        "pane_active",
        "pane_current_path",
        "pane_current_command",
        "pane_width",
        "pane_height",
    ],
    required: 7,
    greedy: Some("pane_current_path"),
};

impl RecordSchema {
    /// `#{a}:#{b}:...` format string for tmux `-F`.
    pub(crate) fn format_string(&self) -> String {
        self.fields
            .iter()
            .map(|field| format!("#{{{field}}}"))
            .collect::<Vec<_>>()
            .join(":")
    }

    /// Parse every non-blank line, silently dropping malformed records.
    pub(crate) fn parse_lines<'a>(&'a self, output: &'a str) -> impl Iterator<Item = Record<'a>> {
        output
            .lines()
            .filter(|line| !line.trim().is_empty())
            .filter_map(move |line| self.parse_line(line))
    }

    /// Parse one line; `None` if it has fewer than the required fields.
    pub(crate) fn parse_line<'a>(&'a self, line: &'a str) -> Option<Record<'a>> {
        let line = line.strip_suffix('\r').unwrap_or(line);
        let parts: Vec<&str> = line.split(':').collect();
        if parts.len() < self.required {
            return None;
        }

        let surplus = parts.len().saturating_sub(self.fields.len());
        let greedy_pos = self
            .greedy
            .and_then(|name| self.position(name))
            .filter(|_| surplus > 0);

        let values = match greedy_pos {
            Some(pos) => {
                let mut values = Vec::with_capacity(self.fields.len());
                values.extend(parts[..pos].iter().copied().map(Slot::Borrowed));
                values.push(Slot::Joined(parts[pos..=pos + surplus].join(":")));
                values.extend(parts[pos + surplus + 1..].iter().copied().map(Slot::Borrowed));
                values
            }
            None => parts.into_iter().map(Slot::Borrowed).collect(),
        };

        Some(Record {
            schema: self,
            values,
        })
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| *field == name)
    }
}

#[derive(Debug)]
enum Slot<'a> {
    Borrowed(&'a str),
    Joined(String),
}

impl Slot<'_> {
    fn as_str(&self) -> &str {
        match self {
            Self::Borrowed(value) => value,
            Self::Joined(value) => value,
        }
    }
}

/// One parsed listing line, read through field names.
#[derive(Debug)]
pub(crate) struct Record<'a> {
    schema: &'a RecordSchema,
    values: Vec<Slot<'a>>,
}

impl Record<'_> {
    /// Raw text of a field; empty when the field is absent from this line.
    pub(crate) fn text(&self, field: &str) -> &str {
        self.schema
            .position(field)
            .and_then(|pos| self.values.get(pos))
            .map(Slot::as_str)
            .unwrap_or("")
    }

    /// Field as an owned string.
    pub(crate) fn string(&self, field: &str) -> String {
        self.text(field).to_string()
    }

    /// Integer field, 0 when missing or unparsable.
    pub(crate) fn int(&self, field: &str) -> u32 {
        self.text(field).trim().parse().unwrap_or(0)
    }

    /// Optional integer; `None` when the field is missing or unparsable.
    pub(crate) fn opt_u64(&self, field: &str) -> Option<u64> {
        self.text(field).trim().parse().ok()
    }

    /// Flag field: `"0"` and empty are false, anything else is true.
    pub(crate) fn flag(&self, field: &str) -> bool {
        let value = self.text(field).trim();
        !value.is_empty() && value != "0"
    }
}
