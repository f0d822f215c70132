//! Trigger highlighter.
//!
//! Partitions a problem statement into an ordered sequence of plain and
//! highlighted segments for rendering. For each trigger in declaration
//! order, the first occurrence at or after the end of the previous match is
//! highlighted; a trigger whose text is not found from the cursor onwards
//! is skipped rather than raised — malformed content degrades gracefully,
//! it never crashes the view.
//!
//! The iterator is lazy, finite, and restartable: call [`segments`] again
//! to recompute from scratch. Concatenating all segment texts in order
//! reproduces the raw text exactly.

use crate::content::Trigger;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Plain(&'a str),
    Trigger { text: &'a str, trigger_id: &'a str },
}

impl<'a> Segment<'a> {
    pub fn text(&self) -> &'a str {
        match self {
            Segment::Plain(text) => text,
            Segment::Trigger { text, .. } => text,
        }
    }
}

pub fn segments<'a>(raw_text: &'a str, triggers: &'a [Trigger]) -> Segments<'a> {
    Segments {
        raw_text,
        triggers: triggers.iter(),
        cursor: 0,
        pending: None,
    }
}

pub struct Segments<'a> {
    raw_text: &'a str,
    triggers: std::slice::Iter<'a, Trigger>,
    /// Byte offset of the end of the last emitted segment.
    cursor: usize,
    /// A matched trigger segment queued behind the plain text before it.
    pending: Option<(usize, usize, &'a str)>,
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Segment<'a>> {
        if let Some((start, end, trigger_id)) = self.pending.take() {
            self.cursor = end;
            return Some(Segment::Trigger {
                text: &self.raw_text[start..end],
                trigger_id,
            });
        }

        for trigger in self.triggers.by_ref() {
            let Some(found) = self.raw_text[self.cursor..].find(trigger.text.as_str()) else {
                // Not found at or after the cursor: skip, no highlight.
                continue;
            };
            let start = self.cursor + found;
            let end = start + trigger.text.len();
            if start > self.cursor {
                self.pending = Some((start, end, &trigger.id));
                return Some(Segment::Plain(&self.raw_text[self.cursor..start]));
            }
            self.cursor = end;
            return Some(Segment::Trigger {
                text: &self.raw_text[start..end],
                trigger_id: &trigger.id,
            });
        }

        if self.cursor < self.raw_text.len() {
            let tail = &self.raw_text[self.cursor..];
            self.cursor = self.raw_text.len();
            return Some(Segment::Plain(tail));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentRegistry;

    fn trigger(id: &str, text: &str) -> Trigger {
        Trigger {
            id: id.to_string(),
            text: text.to_string(),
            schema_id: String::new(),
        }
    }

    #[test]
    fn partitions_in_declaration_order() {
        let triggers = vec![trigger("t1", "偶函数"), trigger("t2", "单调递增")];
        let raw = "已知偶函数在区间上单调递增。";
        let segments: Vec<Segment> = segments(raw, &triggers).collect();
        assert_eq!(
            segments,
            vec![
                Segment::Plain("已知"),
                Segment::Trigger { text: "偶函数", trigger_id: "t1" },
                Segment::Plain("在区间上"),
                Segment::Trigger { text: "单调递增", trigger_id: "t2" },
                Segment::Plain("。"),
            ]
        );
    }

    #[test]
    fn trigger_at_start_has_no_leading_plain_segment() {
        let triggers = vec![trigger("t1", "偶函数")];
        let segments: Vec<Segment> = segments("偶函数的性质", &triggers).collect();
        assert_eq!(
            segments,
            vec![
                Segment::Trigger { text: "偶函数", trigger_id: "t1" },
                Segment::Plain("的性质"),
            ]
        );
    }

    #[test]
    fn unmatched_trigger_is_skipped() {
        let triggers = vec![trigger("t1", "不存在的词"), trigger("t2", "偶函数")];
        let raw = "已知偶函数。";
        let segments: Vec<Segment> = segments(raw, &triggers).collect();
        assert_eq!(
            segments,
            vec![
                Segment::Plain("已知"),
                Segment::Trigger { text: "偶函数", trigger_id: "t2" },
                Segment::Plain("。"),
            ]
        );
    }

    #[test]
    fn trigger_before_cursor_is_skipped() {
        // t2's text only occurs before the end of t1's match.
        let triggers = vec![trigger("t1", "b c"), trigger("t2", "a")];
        let segments: Vec<Segment> = segments("a b c d", &triggers).collect();
        assert_eq!(
            segments,
            vec![
                Segment::Plain("a "),
                Segment::Trigger { text: "b c", trigger_id: "t1" },
                Segment::Plain(" d"),
            ]
        );
    }

    #[test]
    fn no_triggers_yields_single_plain_segment() {
        let segments: Vec<Segment> = segments("已知数列", &[]).collect();
        assert_eq!(segments, vec![Segment::Plain("已知数列")]);
    }

    #[test]
    fn concatenation_reproduces_raw_text_for_builtin_dataset() {
        let registry = ContentRegistry::builtin().unwrap();
        for problem in registry.problems() {
            let rebuilt: String = segments(&problem.raw_text, &problem.triggers)
                .map(|seg| seg.text())
                .collect();
            assert_eq!(rebuilt, problem.raw_text, "problem {}", problem.id);
        }
    }

    #[test]
    fn iterator_is_restartable() {
        let registry = ContentRegistry::builtin().unwrap();
        let problem = registry.problem("prob_001").unwrap();
        let first: Vec<Segment> = segments(&problem.raw_text, &problem.triggers).collect();
        let second: Vec<Segment> = segments(&problem.raw_text, &problem.triggers).collect();
        assert_eq!(first, second);
    }
}
