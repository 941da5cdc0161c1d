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

use std::any::Any;
use std::collections::HashMap;
use std::path::PathBuf;

use crate::parser::SectionId;

/// Mutable state threaded through one file's interpretation: current file
/// and line for diagnostics, the section stack, and a string-keyed slot
/// store for consumer-owned parse state.
///
/// A context is built by the consumer before parsing so that domain state
/// can be registered up front; the interpreter resets the positional fields
/// when a parse begins.
pub struct Context
{
    pub file: PathBuf,
    pub line: u64,
    pub directive: String,
    sections: Vec<SectionId>,
    user: HashMap<String, Box<dyn Any>>
}

impl Context
{
    pub fn new(file: impl Into<PathBuf>) -> Context
    {
        Context {
            file: file.into(),
            line: 0,
            directive: String::new(),
            sections: Vec::new(),
            user: HashMap::new()
        }
    }

    /// The innermost currently open section.
    pub fn section(&self) -> Option<SectionId>
    {
        self.sections.last().copied()
    }

    /// The whole section stack, bottom (root) first.
    pub fn sections(&self) -> &[SectionId]
    {
        &self.sections
    }

    pub(crate) fn reset(&mut self, root: SectionId)
    {
        self.line = 0;
        self.directive.clear();
        self.sections.clear();
        self.sections.push(root);
    }

    pub(crate) fn push_section(&mut self, section: SectionId)
    {
        self.sections.push(section);
    }

    pub(crate) fn pop_section(&mut self) -> Option<SectionId>
    {
        self.sections.pop()
    }

    /// Stores consumer-owned parse state under a name. Last writer wins.
    pub fn register_user_context(&mut self, name: impl Into<String>, data: Box<dyn Any>)
    {
        self.user.insert(name.into(), data);
    }

    pub fn unregister_user_context(&mut self, name: &str) -> Option<Box<dyn Any>>
    {
        self.user.remove(name)
    }

    pub fn user_context(&self, name: &str) -> Option<&dyn Any>
    {
        self.user.get(name).map(Box::as_ref)
    }

    pub fn user_context_mut(&mut self, name: &str) -> Option<&mut dyn Any>
    {
        self.user.get_mut(name).map(Box::as_mut)
    }
}
