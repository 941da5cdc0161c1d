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

use std::path::Path;

mod context;
mod core;
pub mod error;
mod registry;

pub use context::Context;
pub use registry::{section_id, Directive, DirectiveTable, Flow, ParserFunction, SectionId};
pub use self::core::FileParser;

/// Consumer callbacks invoked at the interpreter's extension points.
pub trait Hooks
{
    /// Called with the raw line of an unrecognized directive. Returning true
    /// claims the line and suppresses the default behavior of discarding the
    /// enclosing block.
    fn discard(&mut self, _ctx: &Context, _line: &str) -> bool
    {
        false
    }

    /// Defensive fallback, called instead of a table lookup when the section
    /// stack is unexpectedly empty.
    fn delegate(&mut self, _ctx: &mut Context, _line: &str) -> bool
    {
        false
    }

    /// Called once on a structurally successful parse, before the
    /// interpreter reports success.
    fn validate(&mut self, _ctx: &mut Context) {}

    /// Resolves the content of an `include`d file. The interpreter performs
    /// no file-system access of its own.
    fn source(&mut self, _ctx: &Context, _path: &Path) -> Option<String>
    {
        None
    }
}

pub struct DefaultHooks;

impl Hooks for DefaultHooks {}
