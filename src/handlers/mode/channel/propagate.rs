//! MODE/TMODE line formatting.
//!
//! Applied changes are packed into as few lines as possible. A line is
//! closed when it already carries [`MAX_MODE_PARAMS`] arguments and the
//! next change wants another, or when the next change would push it past
//! the transport's line bound.

use super::{Direction, MAX_MODE_PARAMS, ModeChange, Visibility};
use ircd_proto::line::{self, MAX_LINE_LEN};

/// Packs changes into lines that share a fixed header.
#[derive(Debug)]
pub struct ModeLineBuilder {
    header: String,
    letters: String,
    args: Vec<String>,
    dir: Option<Direction>,
    lines: Vec<String>,
}

impl ModeLineBuilder {
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            letters: String::new(),
            args: Vec::new(),
            dir: None,
            lines: Vec::new(),
        }
    }

    fn current_len(&self) -> usize {
        self.header.len() + 1 + self.letters.len() + self.args.iter().map(|a| a.len() + 1).sum::<usize>()
    }

    /// Append one change, flushing the current line first if it is full.
    pub fn push(&mut self, dir: Direction, letter: char, arg: Option<&str>) {
        if !self.letters.is_empty() {
            let sigil_len = usize::from(self.dir != Some(dir));
            let arg_len = arg.map_or(0, |a| a.len() + 1);
            let projected = self.current_len() + sigil_len + letter.len_utf8() + arg_len;
            if (arg.is_some() && self.args.len() >= MAX_MODE_PARAMS) || !line::fits(projected, MAX_LINE_LEN) {
                self.flush();
            }
        }

        if self.dir != Some(dir) {
            self.letters.push(dir.sigil());
            self.dir = Some(dir);
        }
        self.letters.push(letter);
        if let Some(arg) = arg {
            self.args.push(arg.to_string());
        }
    }

    fn flush(&mut self) {
        if self.letters.is_empty() {
            return;
        }
        let mut out = String::with_capacity(self.current_len());
        out.push_str(&self.header);
        out.push(' ');
        out.push_str(&self.letters);
        for arg in self.args.drain(..) {
            out.push(' ');
            out.push_str(&arg);
        }
        self.lines.push(out);
        self.letters.clear();
        self.dir = None;
    }

    pub fn finish(mut self) -> Vec<String> {
        self.flush();
        self.lines
    }
}

/// `MODE` lines for local members who can see `audience` changes.
pub fn client_lines(sender: &str, channel: &str, changes: &[ModeChange], audience: Visibility) -> Vec<String> {
    let mut builder = ModeLineBuilder::new(format!(":{} MODE {}", sender, channel));
    for change in changes.iter().filter(|c| c.visibility == audience) {
        builder.push(change.dir, change.letter, change.arg.as_deref());
    }
    builder.finish()
}

/// `TMODE` lines for peer servers. Every change goes out regardless of
/// visibility, with member targets as UIDs.
pub fn server_lines(source_id: &str, ts: i64, channel: &str, changes: &[ModeChange]) -> Vec<String> {
    let mut builder = ModeLineBuilder::new(format!(":{} TMODE {} {}", source_id, ts, channel));
    for change in changes {
        builder.push(change.dir, change.letter, change.server_arg());
    }
    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ban(n: usize) -> ModeChange {
        ModeChange::with_arg('b', Direction::Add, format!("m{}!*@*", n))
    }

    #[test]
    fn sigils_only_on_direction_change() {
        let changes = [
            ModeChange::new('m', Direction::Add),
            ModeChange::new('n', Direction::Add),
            ModeChange::new('t', Direction::Remove),
            ModeChange::with_arg('o', Direction::Add, "bob"),
        ];
        assert_eq!(
            client_lines("a!b@c", "#x", &changes, Visibility::All),
            [":a!b@c MODE #x +mn-t+o bob"]
        );
    }

    #[test]
    fn splits_after_six_params() {
        let changes: Vec<ModeChange> = (0..8).map(ban).collect();
        let lines = client_lines("a!b@c", "#x", &changes, Visibility::All);
        assert_eq!(
            lines,
            [
                ":a!b@c MODE #x +bbbbbb m0!*@* m1!*@* m2!*@* m3!*@* m4!*@* m5!*@*",
                ":a!b@c MODE #x +bb m6!*@* m7!*@*",
            ]
        );
    }

    #[test]
    fn parameterless_changes_ride_along_on_full_line() {
        let mut changes: Vec<ModeChange> = (0..6).map(ban).collect();
        changes.push(ModeChange::new('m', Direction::Add));
        let lines = client_lines("s", "#x", &changes, Visibility::All);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with(":s MODE #x +bbbbbbm "));
    }

    #[test]
    fn splits_on_line_length() {
        let long = "x".repeat(200);
        let changes: Vec<ModeChange> = (0..3)
            .map(|i| ModeChange::with_arg('b', Direction::Add, format!("{}{}!*@*", long, i)))
            .collect();
        let lines = server_lines("001AAAAAA", 1, "#x", &changes);
        assert_eq!(lines.len(), 2);
        for line in &lines {
            assert!(line::fits(line.len(), MAX_LINE_LEN));
        }
        let args: usize = lines.iter().map(|l| l.split(' ').count() - 5).sum();
        assert_eq!(args, 3);
    }

    #[test]
    fn visibility_filters_client_lines() {
        let changes = [
            ModeChange::with_arg('b', Direction::Add, "a!*@*").ops_only(),
            ModeChange::with_arg('I', Direction::Add, "b!*@*"),
        ];
        assert_eq!(client_lines("s", "#x", &changes, Visibility::All), [":s MODE #x +I b!*@*"]);
        assert_eq!(client_lines("s", "#x", &changes, Visibility::OpsOnly), [":s MODE #x +b a!*@*"]);
        assert_eq!(server_lines("001", 5, "#x", &changes), [":001 TMODE 5 #x +bI a!*@* b!*@*"]);
    }

    #[test]
    fn nothing_to_send() {
        assert!(client_lines("s", "#x", &[], Visibility::All).is_empty());
        let ops = [ModeChange::new('m', Direction::Add).ops_only()];
        assert!(client_lines("s", "#x", &ops, Visibility::All).is_empty());
    }

    #[test]
    fn servers_get_ids() {
        let changes = [ModeChange::with_arg('v', Direction::Remove, "bob").with_id("001AAAAAC")];
        assert_eq!(
            server_lines("002", 9, "#x", &changes),
            [":002 TMODE 9 #x -v 001AAAAAC"]
        );
    }
}
