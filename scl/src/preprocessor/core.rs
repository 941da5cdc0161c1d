// Copyright (c) 2022, BlockProject 3D
//
// All rights reserved.
//
// Redistribution and use in source and binary forms, with or without modification,
// are permitted provided that the following conditions are met:
//
//     * Redistributions of source code must retain the above copyright notice,
//       this list of conditions and the following disclaimer.
//     * Redistributions in binary form must reproduce the above copyright notice,
//       this list of conditions and the following disclaimer in the documentation
//       and/or other materials provided with the distribution.
//     * Neither the name of BlockProject 3D nor the names of its contributors
//       may be used to endorse or promote products derived from this software
//       without specific prior written permission.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS
// "AS IS" AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT
// LIMITED TO, THE IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR
// A PARTICULAR PURPOSE ARE DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT OWNER OR
// CONTRIBUTORS BE LIABLE FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL,
// EXEMPLARY, OR CONSEQUENTIAL DAMAGES (INCLUDING, BUT NOT LIMITED TO,
// PROCUREMENT OF SUBSTITUTE GOODS OR SERVICES; LOSS OF USE, DATA, OR
// PROFITS; OR BUSINESS INTERRUPTION) HOWEVER CAUSED AND ON ANY THEORY OF
// LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY, OR TORT (INCLUDING
// NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE OF THIS
// SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.

/// One logical line, tagged with the 1-based physical line it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line
{
    pub number: u64,
    pub text: String
}

/// Reconstructs logical lines out of raw file content: normalizes line
/// endings, trims, strips `//` and `/* */` comments.
///
/// A `/* */` pair leaving live code on both sides re-joins that code into a
/// fresh logical line which is re-processed before advancing, so a single
/// physical line can yield zero, one or two logical lines.
pub struct Preprocessor
{
    lines: std::vec::IntoIter<String>,
    reuse: Option<String>,
    number: u64,
    in_comment: bool
}

impl Preprocessor
{
    pub fn new(content: &str) -> Preprocessor
    {
        let normalized = content.replace("\r\n", "\n");
        let lines: Vec<String> = normalized.split('\n').map(str::to_owned).collect();
        Preprocessor {
            lines: lines.into_iter(),
            reuse: None,
            number: 0,
            in_comment: false
        }
    }

    /// True when the input ended inside an unterminated `/* */` comment.
    pub fn in_comment(&self) -> bool
    {
        self.in_comment
    }

    pub fn next(&mut self) -> Option<Line>
    {
        loop {
            let raw = match self.reuse.take() {
                Some(v) => v,
                None => {
                    let v = self.lines.next()?;
                    self.number += 1;
                    v
                }
            };
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            if self.in_comment {
                if let Some(end) = line.find("*/") {
                    self.in_comment = false;
                    let rest = line[end + 2..].trim();
                    if !rest.is_empty() {
                        self.reuse = Some(rest.to_owned());
                    }
                }
                continue;
            }
            let slash = line.find("//");
            let block = line.find("/*");
            match (slash, block) {
                (Some(s), b) if b.map_or(true, |b| s < b) => {
                    let live = line[..s].trim();
                    if !live.is_empty() {
                        return Some(Line {
                            number: self.number,
                            text: live.to_owned()
                        });
                    }
                },
                (_, Some(begin)) => {
                    match line[begin..].find("*/") {
                        Some(off) => {
                            let end = begin + off;
                            let rejoined =
                                format!("{}{}", &line[..begin], &line[end + 2..]);
                            let rejoined = rejoined.trim().to_owned();
                            if !rejoined.is_empty() {
                                self.reuse = Some(rejoined);
                            }
                        },
                        None => {
                            self.in_comment = true;
                            let live = line[..begin].trim();
                            if !live.is_empty() {
                                return Some(Line {
                                    number: self.number,
                                    text: live.to_owned()
                                });
                            }
                        }
                    }
                },
                (None, None) => {
                    return Some(Line {
                        number: self.number,
                        text: line.to_owned()
                    })
                },
                // `(Some(_), None)` always satisfies the first arm's guard
                // (`None.map_or(true, ..)` is `true`), so this is never reached;
                // it exists only to make the match exhaustive past the guard.
                (Some(_), None) => unreachable!()
            }
        }
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    fn collect(content: &str) -> Vec<(u64, String)>
    {
        let mut pre = Preprocessor::new(content);
        let mut lines = Vec::new();
        while let Some(line) = pre.next() {
            lines.push((line.number, line.text));
        }
        lines
    }

    #[test]
    fn plain_lines()
    {
        let lines = collect("scene \"Main\"\n{\n\tambient_light red\n}\n");
        assert_eq!(
            lines,
            vec![
                (1, "scene \"Main\"".into()),
                (2, "{".into()),
                (3, "ambient_light red".into()),
                (4, "}".into())
            ]
        );
    }

    #[test]
    fn crlf_normalized()
    {
        let lines = collect("a\r\nb\r\nc");
        assert_eq!(lines, vec![(1, "a".into()), (2, "b".into()), (3, "c".into())]);
    }

    #[test]
    fn line_comments()
    {
        let lines = collect("// header\nfoo 1 // trailing\n// tail\nbar 2\n");
        assert_eq!(lines, vec![(2, "foo 1".into()), (4, "bar 2".into())]);
    }

    #[test]
    fn inline_block_comment()
    {
        let lines = collect("foo /* skipped */ 1\n");
        assert_eq!(lines, vec![(1, "foo  1".into())]);
    }

    #[test]
    fn multi_line_block_comment()
    {
        // "a /* x\ny */ b" must yield the same live tokens as "a b", each
        // pinned to its physical line.
        let lines = collect("a /* x\ny */ b\n");
        assert_eq!(lines, vec![(1, "a".into()), (2, "b".into())]);
    }

    #[test]
    fn comment_only_lines()
    {
        let lines = collect("/*\nall of this\nis dead\n*/\nlive\n");
        assert_eq!(lines, vec![(5, "live".into())]);
    }

    #[test]
    fn two_comments_one_line()
    {
        let lines = collect("a /* x */ b /* y */ c\n");
        assert_eq!(lines, vec![(1, "a  b  c".into())]);
    }

    #[test]
    fn slash_comment_hides_block_open()
    {
        let lines = collect("foo // no comment /* here\nbar\n");
        assert_eq!(lines, vec![(1, "foo".into()), (2, "bar".into())]);
    }

    #[test]
    fn unterminated_comment()
    {
        let mut pre = Preprocessor::new("foo /* lost\nforever\n");
        assert_eq!(
            pre.next(),
            Some(Line { number: 1, text: "foo".into() })
        );
        assert_eq!(pre.next(), None);
        assert!(pre.in_comment());
    }

    #[test]
    fn empty_input()
    {
        assert_eq!(collect(""), Vec::<(u64, String)>::new());
        assert_eq!(collect("\n\n   \n"), Vec::<(u64, String)>::new());
    }
}
