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

use std::collections::HashMap;
use std::fmt::Display;

use log::{error, info, warn};

use crate::param::{Descriptor, Value};
use crate::parser::{Context, DirectiveTable, Flow, Hooks};
use crate::preprocessor::Preprocessor;

// Word boundaries for define substitution.
const SEPARATORS: &str = " \t,;:?./-*+=(){}[]|";

/// Directive interpreter: feeds logical lines through the block state
/// machine, dispatches them against a [DirectiveTable] and validates typed
/// parameters before invoking the registered handler.
///
/// Unknown or malformed directives are recoverable: the smallest enclosing
/// block is discarded and the rest of the file still parses. The only
/// whole-file failure is reaching end of input with the section stack not
/// back at the root.
pub struct FileParser<'t, H: Hooks>
{
    table: &'t DirectiveTable,
    hooks: H,
    ignored: bool,
    ignore_depth: u32,
    defines: HashMap<String, String>,
    errors: u32,
    warnings: u32
}

impl<'t> FileParser<'t, super::DefaultHooks>
{
    pub fn new(table: &'t DirectiveTable) -> Self
    {
        Self::with_hooks(table, super::DefaultHooks)
    }
}

impl<'t, H: Hooks> FileParser<'t, H>
{
    pub fn with_hooks(table: &'t DirectiveTable, hooks: H) -> Self
    {
        FileParser {
            table,
            hooks,
            ignored: false,
            ignore_depth: 0,
            defines: HashMap::new(),
            errors: 0,
            warnings: 0
        }
    }

    /// Interprets a whole file. Returns structural success: recoverable
    /// directive errors are logged and counted but do not fail the file.
    pub fn parse(&mut self, ctx: &mut Context, content: &str) -> bool
    {
        self.ignored = false;
        self.ignore_depth = 0;
        self.defines.clear();
        self.errors = 0;
        self.warnings = 0;
        ctx.reset(self.table.root());
        info!("FileParser : Parsing file [{}].", ctx.file.display());
        self.process(ctx, content);
        let ok = ctx.sections().len() == 1 && ctx.section() == Some(self.table.root());
        if ok {
            self.hooks.validate(ctx);
            info!("FileParser : Finished parsing file [{}].", ctx.file.display());
        } else {
            ctx.directive.clear();
            self.parse_error(ctx, "unexpected end of file");
        }
        ok
    }

    pub fn error_count(&self) -> u32
    {
        self.errors
    }

    pub fn warning_count(&self) -> u32
    {
        self.warnings
    }

    pub fn hooks(&self) -> &H
    {
        &self.hooks
    }

    pub fn hooks_mut(&mut self) -> &mut H
    {
        &mut self.hooks
    }

    pub fn into_hooks(self) -> H
    {
        self.hooks
    }

    fn process(&mut self, ctx: &mut Context, content: &str)
    {
        let mut pre = Preprocessor::new(content);
        while let Some(line) = pre.next() {
            ctx.line = line.number;
            let text = line.text.as_str();
            if text == "{" {
                self.enter_block(ctx);
            } else if text.len() > 1 && text.ends_with('{') {
                // A directive and its block-open glued on one line.
                let head = text[..text.len() - 1].trim();
                self.script_line(ctx, head);
                self.enter_block(ctx);
            } else {
                self.script_line(ctx, text);
            }
        }
        if pre.in_comment() {
            self.parse_warning(ctx, "unterminated block comment at end of file");
        }
    }

    fn script_line(&mut self, ctx: &mut Context, line: &str)
    {
        if let Some(index) = line.find('}') {
            if index == 0 {
                // Block end first, then the rest of the line.
                self.leave_block(ctx);
                let rest = line[1..].trim();
                if !rest.is_empty() {
                    self.script_line(ctx, rest);
                }
                return;
            }
            if index == line.len() - 1 {
                // The line first, then the block end.
                let head = line[..index].trim();
                if !head.is_empty() {
                    self.script_line(ctx, head);
                }
                self.leave_block(ctx);
                return;
            }
            // A '}' in the middle of the line is ordinary directive text.
        }
        self.invoke(ctx, line);
    }

    fn enter_block(&mut self, _ctx: &mut Context)
    {
        // The section was already pushed when the opening directive ran, so
        // a '{' is structural only; it just deepens an ignored block.
        if self.ignored {
            self.ignore_depth += 1;
        }
    }

    fn leave_block(&mut self, ctx: &mut Context)
    {
        if self.ignored && self.ignore_depth > 0 {
            self.ignore_depth -= 1;
            if self.ignore_depth == 0 {
                self.ignored = false;
            }
            return;
        }
        // A pending ignore whose block never came dies at the enclosing
        // close.
        self.ignored = false;
        ctx.directive = String::from("}");
        let table = self.table;
        if let Some(section) = ctx.section() {
            if let Some(directive) = table.find(section, "}") {
                // Cleanup on block exit. The flow result is meaningless here
                // and the pop below stays the only pop site.
                if let Err(e) = (directive.function)(ctx, &[]) {
                    self.parse_error(ctx, e);
                }
            }
        }
        // Popping the root on an unbalanced '}' leaves the stack empty; the
        // end-of-file check reports it.
        ctx.pop_section();
    }

    fn invoke(&mut self, ctx: &mut Context, line: &str)
    {
        if self.in_ignored_block() {
            return;
        }
        let mut split = line.splitn(2, char::is_whitespace);
        let name = split.next().unwrap_or("");
        let tail = split.next().unwrap_or("").trim();
        if name.is_empty() {
            return;
        }
        ctx.directive = name.to_owned();
        let table = self.table;
        let section = match ctx.section() {
            Some(v) => v,
            None => {
                if !self.hooks.delegate(ctx, line) {
                    self.parse_error(ctx, format!("unexpected directive [{}]", name));
                }
                return;
            }
        };
        match table.find(section, name) {
            None => {
                if name == "define" && !tail.is_empty() {
                    self.add_define(ctx, tail);
                } else if name == "include" && !tail.is_empty() {
                    self.include(ctx, tail);
                } else if !self.hooks.discard(ctx, line) {
                    self.parse_error(
                        ctx,
                        format!(
                            "directive [{}] not found in section [{}]",
                            name,
                            table.section_name(section).unwrap_or("?")
                        )
                    );
                    self.ignore();
                }
            },
            Some(directive) => {
                let mut params = tail.to_owned();
                self.expand_defines(&mut params);
                let (values, complete) = self.check_params(ctx, &directive.params, params);
                match (directive.function)(ctx, &values) {
                    Ok(Flow::Enter(section)) => {
                        if complete {
                            // A successful scope open supersedes any pending
                            // ignore left by an earlier bad directive.
                            self.ignored = false;
                            self.ignore_depth = 0;
                            ctx.push_section(section);
                        } else {
                            // Malformed directive: whatever scope it wanted
                            // to open is discarded instead.
                            self.ignore();
                        }
                    },
                    Ok(Flow::Continue) => (),
                    Err(e) => self.parse_error(ctx, e)
                }
            }
        }
    }

    fn check_params(
        &mut self,
        ctx: &Context,
        expected: &[Descriptor],
        mut params: String
    ) -> (Vec<Value>, bool)
    {
        let mut filled = Vec::new();
        let mut missing = None;
        for descriptor in expected {
            match descriptor.parse(&mut params) {
                Some(value) => filled.push(value),
                None => {
                    missing = Some(descriptor.kind_name());
                    break;
                }
            }
        }
        let leftover = params.trim();
        if !leftover.is_empty() {
            filled.push(Value::Text(leftover.to_owned()));
        }
        match missing {
            Some(kind) => {
                self.parse_error(
                    ctx,
                    format!(
                        "directive <{}> needs a <{}> parameter that is currently missing",
                        ctx.directive, kind
                    )
                );
                (filled, false)
            },
            None => (filled, true)
        }
    }

    fn add_define(&mut self, ctx: &Context, tail: &str)
    {
        let mut split = tail.splitn(2, char::is_whitespace);
        let name = split.next().unwrap_or("");
        let value = split.next().unwrap_or("").trim();
        if name.is_empty() || value.is_empty() {
            self.parse_warning(ctx, "missing parameters");
            return;
        }
        if self.defines.contains_key(name) {
            self.parse_error(ctx, "replacing an already existing value");
            return;
        }
        self.defines.insert(name.to_owned(), value.to_owned());
    }

    fn expand_defines(&self, text: &mut String)
    {
        for (name, value) in &self.defines {
            let mut result = String::new();
            let mut rest = text.as_str();
            while let Some(index) = rest.find(name.as_str()) {
                let after = &rest[index + name.len()..];
                let before_ok = index == 0
                    || rest[..index]
                        .chars()
                        .last()
                        .map_or(false, |c| SEPARATORS.contains(c));
                let after_ok = after.chars().next().map_or(true, |c| SEPARATORS.contains(c));
                result.push_str(&rest[..index]);
                if before_ok && after_ok {
                    result.push_str(value);
                } else {
                    result.push_str(name);
                }
                rest = after;
            }
            result.push_str(rest);
            *text = result;
        }
    }

    fn include(&mut self, ctx: &mut Context, tail: &str)
    {
        let mut params = tail.to_owned();
        let path = match Descriptor::Path.parse(&mut params) {
            Some(Value::Path(path)) => path,
            _ => {
                self.parse_warning(ctx, "missing parameters");
                return;
            }
        };
        match self.hooks.source(ctx, &path) {
            Some(content) => {
                let saved_file = std::mem::replace(&mut ctx.file, path);
                let saved_line = ctx.line;
                let saved_ignored = self.ignored;
                let saved_depth = self.ignore_depth;
                self.ignored = false;
                self.ignore_depth = 0;
                self.process(ctx, &content);
                ctx.file = saved_file;
                ctx.line = saved_line;
                self.ignored = saved_ignored;
                self.ignore_depth = saved_depth;
            },
            None => {
                self.parse_error(ctx, format!("couldn't open file [{}]", path.display()));
            }
        }
    }

    fn ignore(&mut self)
    {
        self.ignored = true;
        self.ignore_depth = 0;
    }

    fn in_ignored_block(&self) -> bool
    {
        self.ignored && self.ignore_depth > 0
    }

    fn sections_stack(&self, ctx: &Context) -> String
    {
        let mut stack = String::new();
        for section in ctx.sections().iter().skip(1) {
            if !stack.is_empty() {
                stack.push_str("::");
            }
            stack.push_str(self.table.section_name(*section).unwrap_or("?"));
        }
        if !ctx.directive.is_empty() {
            if !stack.is_empty() {
                stack.push_str("::");
            }
            stack.push_str(&ctx.directive);
        }
        stack
    }

    pub fn parse_error(&mut self, ctx: &Context, text: impl Display)
    {
        self.errors += 1;
        error!(
            "Error, line #{}: <{}>: {}",
            ctx.line,
            self.sections_stack(ctx),
            text
        );
    }

    pub fn parse_warning(&mut self, ctx: &Context, text: impl Display)
    {
        self.warnings += 1;
        warn!(
            "Warning, line #{}: <{}>: {}",
            ctx.line,
            self.sections_stack(ctx),
            text
        );
    }
}

#[cfg(test)]
mod tests
{
    use std::path::Path;

    use super::*;
    use crate::parser::error::DirectiveError;
    use crate::parser::{section_id, DefaultHooks, SectionId};

    const ROOT: SectionId = section_id(*b"ROOT");
    const SCENE: SectionId = section_id(*b"SCNE");
    const PASS: SectionId = section_id(*b"PASS");

    fn record(ctx: &mut Context, event: String)
    {
        let events = ctx
            .user_context_mut("events")
            .and_then(|v| v.downcast_mut::<Vec<String>>())
            .unwrap();
        events.push(event);
    }

    fn parse_scene(ctx: &mut Context, params: &[Value]) -> Result<Flow, DirectiveError>
    {
        let name = params.first().and_then(Value::name).unwrap_or("?").to_owned();
        record(ctx, format!("scene:{}", name));
        Ok(Flow::Enter(SCENE))
    }

    fn parse_version(ctx: &mut Context, params: &[Value]) -> Result<Flow, DirectiveError>
    {
        let version = params.first().and_then(Value::uint32).unwrap_or(0);
        record(ctx, format!("version:{}", version));
        Ok(Flow::Continue)
    }

    fn parse_pass(ctx: &mut Context, _: &[Value]) -> Result<Flow, DirectiveError>
    {
        record(ctx, String::from("pass"));
        Ok(Flow::Enter(PASS))
    }

    fn parse_ambient(ctx: &mut Context, params: &[Value]) -> Result<Flow, DirectiveError>
    {
        let colour = params.first().and_then(Value::colour);
        match colour {
            Some(colour) => {
                record(ctx, format!("ambient:{}:{}", colour, params.len()));
                Ok(Flow::Continue)
            },
            None => Err("expected a colour".into())
        }
    }

    fn parse_value(ctx: &mut Context, params: &[Value]) -> Result<Flow, DirectiveError>
    {
        let value = params.first().and_then(Value::int32).unwrap_or(-1);
        record(ctx, format!("value:{}", value));
        Ok(Flow::Continue)
    }

    fn parse_note(ctx: &mut Context, params: &[Value]) -> Result<Flow, DirectiveError>
    {
        let text = params.first().and_then(Value::text).unwrap_or("").to_owned();
        record(ctx, format!("note:{}", text));
        Ok(Flow::Continue)
    }

    fn parse_pass_end(ctx: &mut Context, _: &[Value]) -> Result<Flow, DirectiveError>
    {
        record(ctx, String::from("end_pass"));
        Ok(Flow::Continue)
    }

    fn build_table() -> DirectiveTable
    {
        let mut table = DirectiveTable::new(ROOT);
        table.add_section(SCENE, "scene");
        table.add_section(PASS, "pass");
        table.add_parser(ROOT, "scene", parse_scene, vec![Descriptor::Name]);
        table.add_parser(ROOT, "version", parse_version, vec![Descriptor::UInt32]);
        table.add_parser(SCENE, "pass", parse_pass, vec![]);
        table.add_parser(SCENE, "ambient", parse_ambient, vec![Descriptor::Colour]);
        table.add_parser(PASS, "value", parse_value, vec![Descriptor::Int32]);
        table.add_parser(PASS, "note", parse_note, vec![Descriptor::Text]);
        table.add_parser(PASS, "}", parse_pass_end, vec![]);
        table
    }

    fn run_with<H: Hooks>(content: &str, hooks: H) -> (bool, Vec<String>, u32)
    {
        let table = build_table();
        let mut parser = FileParser::with_hooks(&table, hooks);
        let mut ctx = Context::new("test.scl");
        ctx.register_user_context("events", Box::new(Vec::<String>::new()));
        let ok = parser.parse(&mut ctx, content);
        let events = *ctx
            .unregister_user_context("events")
            .unwrap()
            .downcast::<Vec<String>>()
            .unwrap();
        (ok, events, parser.error_count())
    }

    fn run(content: &str) -> (bool, Vec<String>, u32)
    {
        run_with(content, DefaultHooks)
    }

    #[test]
    fn well_formed()
    {
        let source = "\
version 2
scene \"Main\"
{
    ambient red
    pass
    {
        value 3
        note hello world
    }
}
";
        let (ok, events, errors) = run(source);
        assert!(ok);
        assert_eq!(errors, 0);
        assert_eq!(
            events,
            vec![
                "version:2",
                "scene:Main",
                "ambient:1 0 0 1:1",
                "pass",
                "value:3",
                "note:hello world",
                "end_pass"
            ]
        );
    }

    #[test]
    fn glued_brace_matches_split_brace()
    {
        let glued = "scene \"A\" {\nambient blue\n}\n";
        let split = "scene \"A\"\n{\nambient blue\n}\n";
        assert_eq!(run(glued), run(split));
    }

    #[test]
    fn unknown_directive_recovers_within_block()
    {
        let source = "\
scene \"A\"
{
    pass
    {
        unknownCmd 1 2
        value 3
    }
}
";
        let (ok, events, errors) = run(source);
        assert!(ok);
        assert_eq!(errors, 1);
        assert_eq!(events, vec!["scene:A", "pass", "value:3", "end_pass"]);
    }

    #[test]
    fn unknown_directive_block_is_skipped()
    {
        // The unknown directive's block is parsed structurally but nothing
        // inside it reaches a handler, nested known blocks included.
        let source = "\
bogus
{
    scene \"Hidden\"
    {
        ambient red
    }
}
version 2
";
        let (ok, events, errors) = run(source);
        assert!(ok);
        assert_eq!(errors, 1);
        assert_eq!(events, vec!["version:2"]);
    }

    #[test]
    fn missing_parameter_discards_sub_block()
    {
        let source = "\
scene
{
    ambient red
}
version 1
";
        let (ok, events, errors) = run(source);
        assert!(ok);
        assert_eq!(errors, 1);
        // The handler still ran with what was filled, but the scope it
        // wanted to open was discarded.
        assert_eq!(events, vec!["scene:?", "version:1"]);
    }

    #[test]
    fn unbalanced_open_fails()
    {
        let (ok, events, errors) = run("scene \"A\"\n{\nambient red\n");
        assert!(!ok);
        assert_eq!(errors, 1);
        // Work before the imbalance still took effect.
        assert_eq!(events, vec!["scene:A", "ambient:1 0 0 1:1"]);
    }

    #[test]
    fn unbalanced_close_fails()
    {
        let (ok, events, errors) = run("scene \"A\"\n{\n}\n}\nversion 1\n");
        assert!(!ok);
        // The stray directive past the popped root is an error too.
        assert_eq!(errors, 2);
        assert_eq!(events, vec!["scene:A"]);
    }

    #[test]
    fn close_with_trailing_directive()
    {
        let (ok, events, _) = run("scene \"A\"\n{\n} version 1\n");
        assert!(ok);
        assert_eq!(events, vec!["scene:A", "version:1"]);
    }

    #[test]
    fn directive_then_close_on_one_line()
    {
        let (ok, events, _) = run("scene \"A\"\n{\npass\n{\nvalue 3 }\n}\n");
        assert!(ok);
        assert_eq!(events, vec!["scene:A", "pass", "value:3", "end_pass"]);
    }

    #[test]
    fn brace_in_the_middle_is_plain_text()
    {
        let (ok, events, _) = run("scene \"A\"\n{\npass\n{\nnote a}b c\n}\n}\n");
        assert!(ok);
        assert_eq!(
            events,
            vec!["scene:A", "pass", "note:a}b c", "end_pass"]
        );
    }

    #[test]
    fn trailing_text_is_wrapped()
    {
        let (ok, events, errors) = run("scene \"A\"\n{\nambient red extra words\n}\n");
        assert!(ok);
        assert_eq!(errors, 0);
        // One colour plus the leftover wrapped as free text.
        assert_eq!(events, vec!["scene:A", "ambient:1 0 0 1:2"]);
    }

    #[test]
    fn handler_error_is_recoverable()
    {
        let source = "scene \"A\"\n{\nambient\nambient green\n}\n";
        let (ok, events, errors) = run(source);
        assert!(ok);
        // One validation error and one handler error for the bare
        // directive; the next one still runs.
        assert_eq!(errors, 2);
        assert_eq!(events, vec!["scene:A", "ambient:0 1 0 1:1"]);
    }

    #[test]
    fn defines_expand_in_parameters()
    {
        let source = "\
define COL red
scene \"A\"
{
    ambient COL
}
";
        let (ok, events, errors) = run(source);
        assert!(ok);
        assert_eq!(errors, 0);
        assert_eq!(events, vec!["scene:A", "ambient:1 0 0 1:1"]);
    }

    #[test]
    fn duplicate_define_keeps_first()
    {
        let source = "\
define COL red
define COL blue
scene \"A\"
{
    ambient COL
}
";
        let (ok, events, errors) = run(source);
        assert!(ok);
        assert_eq!(errors, 1);
        assert_eq!(events, vec!["scene:A", "ambient:1 0 0 1:1"]);
    }

    struct IncludeHooks;

    impl Hooks for IncludeHooks
    {
        fn source(&mut self, _ctx: &Context, path: &Path) -> Option<String>
        {
            if path == Path::new("common.scl") {
                Some(String::from("version 7\n"))
            } else {
                None
            }
        }
    }

    #[test]
    fn include_processes_into_same_context()
    {
        let (ok, events, errors) = run_with("include common.scl\nversion 1\n", IncludeHooks);
        assert!(ok);
        assert_eq!(errors, 0);
        assert_eq!(events, vec!["version:7", "version:1"]);
    }

    #[test]
    fn unresolved_include_is_recoverable()
    {
        let (ok, events, errors) = run_with("include missing.scl\nversion 1\n", IncludeHooks);
        assert!(ok);
        assert_eq!(errors, 1);
        assert_eq!(events, vec!["version:1"]);
    }

    struct ClaimingHooks;

    impl Hooks for ClaimingHooks
    {
        fn discard(&mut self, _ctx: &Context, _line: &str) -> bool
        {
            true
        }
    }

    #[test]
    fn claimed_lines_do_not_arm_the_ignore()
    {
        let (ok, events, errors) = run_with("bogus 1 2\nversion 4\n", ClaimingHooks);
        assert!(ok);
        assert_eq!(errors, 0);
        assert_eq!(events, vec!["version:4"]);
    }

    #[derive(Default)]
    struct ValidateHooks
    {
        validated: bool
    }

    impl Hooks for ValidateHooks
    {
        fn validate(&mut self, _ctx: &mut Context)
        {
            self.validated = true;
        }
    }

    #[test]
    fn validate_runs_only_on_structural_success()
    {
        let table = build_table();
        let mut parser = FileParser::with_hooks(&table, ValidateHooks::default());
        let mut ctx = Context::new("test.scl");
        ctx.register_user_context("events", Box::new(Vec::<String>::new()));
        assert!(parser.parse(&mut ctx, "version 1\n"));
        assert!(parser.hooks().validated);

        let mut parser = FileParser::with_hooks(&table, ValidateHooks::default());
        assert!(!parser.parse(&mut ctx, "scene \"A\"\n{\n"));
        assert!(!parser.hooks().validated);
    }

    #[test]
    fn comments_do_not_disturb_structure()
    {
        let source = "\
scene \"A\" // open the scene
{
    /* a block
       of comments */
    ambient /* inline */ red
}
";
        let (ok, events, errors) = run(source);
        assert!(ok);
        assert_eq!(errors, 0);
        assert_eq!(events, vec!["scene:A", "ambient:1 0 0 1:1"]);
    }

    #[test]
    fn unterminated_comment_warns()
    {
        let table = build_table();
        let mut parser = FileParser::new(&table);
        let mut ctx = Context::new("test.scl");
        ctx.register_user_context("events", Box::new(Vec::<String>::new()));
        assert!(parser.parse(&mut ctx, "version 1\n/* never closed\n"));
        assert_eq!(parser.warning_count(), 1);
    }
}
