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

use log::error;

use crate::param::{Descriptor, Value};
use crate::parser::error::DirectiveError;
use crate::parser::Context;

/// Opaque identifier of a grammatical scope, conventionally built from four
/// readable characters.
pub type SectionId = u32;

pub const fn section_id(name: [u8; 4]) -> SectionId
{
    u32::from_be_bytes(name)
}

/// What the interpreter should do after a directive handler ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow
{
    /// No block follows this directive.
    Continue,
    /// A block is expected; the interpreter pushes the given section onto
    /// the stack before the matching `{` is read.
    Enter(SectionId)
}

pub type ParserFunction = fn(&mut Context, &[Value]) -> Result<Flow, DirectiveError>;

pub struct Directive
{
    pub function: ParserFunction,
    pub params: Vec<Descriptor>
}

/// Per-section directive tables, composed by every consumer module before
/// interpretation begins and read-only while a parse runs.
pub struct DirectiveTable
{
    root: SectionId,
    names: HashMap<SectionId, String>,
    sections: HashMap<SectionId, HashMap<String, Directive>>
}

impl DirectiveTable
{
    pub fn new(root: SectionId) -> DirectiveTable
    {
        let mut names = HashMap::new();
        names.insert(root, String::new());
        DirectiveTable {
            root,
            names,
            sections: HashMap::new()
        }
    }

    pub fn root(&self) -> SectionId
    {
        self.root
    }

    /// Declares the display name of a section for diagnostics breadcrumbs.
    pub fn add_section(&mut self, section: SectionId, name: impl Into<String>)
    {
        self.names.insert(section, name.into());
    }

    pub fn section_name(&self, section: SectionId) -> Option<&str>
    {
        self.names.get(&section).map(String::as_str)
    }

    /// Registers a directive handler. A duplicate (section, name) pair is
    /// rejected: the error is logged and the second registration ignored.
    pub fn add_parser(
        &mut self,
        section: SectionId,
        name: impl Into<String>,
        function: ParserFunction,
        params: Vec<Descriptor>
    )
    {
        let name = name.into();
        let parsers = self.sections.entry(section).or_default();
        if parsers.contains_key(&name) {
            error!(
                "Parser {} for section {} ({}) already exists.",
                name,
                self.names.get(&section).map(String::as_str).unwrap_or("?"),
                section
            );
            return;
        }
        parsers.insert(name, Directive { function, params });
    }

    pub fn find(&self, section: SectionId, name: &str) -> Option<&Directive>
    {
        self.sections.get(&section)?.get(name)
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    const ROOT: SectionId = section_id(*b"ROOT");
    const PASS: SectionId = section_id(*b"PASS");

    fn noop(_: &mut Context, _: &[Value]) -> Result<Flow, DirectiveError>
    {
        Ok(Flow::Continue)
    }

    fn other(_: &mut Context, _: &[Value]) -> Result<Flow, DirectiveError>
    {
        Ok(Flow::Enter(PASS))
    }

    #[test]
    fn section_ids_are_readable()
    {
        assert_eq!(section_id(*b"ROOT"), u32::from_be_bytes(*b"ROOT"));
        assert_ne!(section_id(*b"ROOT"), section_id(*b"PASS"));
    }

    #[test]
    fn lookup()
    {
        let mut table = DirectiveTable::new(ROOT);
        table.add_section(PASS, "pass");
        table.add_parser(ROOT, "pass", other, vec![]);
        table.add_parser(PASS, "shininess", noop, vec![Descriptor::Float]);
        assert!(table.find(ROOT, "pass").is_some());
        assert!(table.find(PASS, "shininess").is_some());
        assert!(table.find(ROOT, "shininess").is_none());
        assert!(table.find(PASS, "pass").is_none());
        assert_eq!(table.section_name(PASS), Some("pass"));
        assert_eq!(table.section_name(ROOT), Some(""));
    }

    #[test]
    fn duplicate_registration_keeps_first()
    {
        let mut table = DirectiveTable::new(ROOT);
        table.add_parser(ROOT, "pass", other, vec![]);
        table.add_parser(ROOT, "pass", noop, vec![Descriptor::Float]);
        let directive = table.find(ROOT, "pass").unwrap();
        assert_eq!(directive.params.len(), 0);
        assert_eq!(directive.function as usize, other as usize);
    }
}
