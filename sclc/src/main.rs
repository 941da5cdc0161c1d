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

mod grammar;

use std::path::{Path, PathBuf};

use bp3d_scl::{Context, DirectiveTable, FileParser, Hooks};
use clap::{App, Arg};
use log::{debug, error, info};
use thiserror::Error;

use crate::grammar::summary::Summary;

#[derive(Debug, Error)]
pub enum Error
{
    #[error("couldn't read file [{}]: {}", .path.display(), .source)]
    Read
    {
        path: PathBuf,
        source: std::io::Error
    },

    #[error("{} error(s) in [{}]", .errors, .path.display())]
    Check
    {
        path: PathBuf,
        errors: u32
    }
}

struct SceneHooks
{
    dump: bool
}

impl Hooks for SceneHooks
{
    fn source(&mut self, ctx: &Context, path: &Path) -> Option<String>
    {
        // Includes resolve relative to the including file.
        let resolved = match ctx.file.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.join(path),
            _ => path.to_owned()
        };
        debug!("including [{}]", resolved.display());
        std::fs::read_to_string(resolved).ok()
    }

    fn validate(&mut self, ctx: &mut Context)
    {
        let summary = ctx
            .user_context(grammar::CTX_SUMMARY)
            .and_then(|v| v.downcast_ref::<Summary>());
        if let Some(summary) = summary {
            info!("{}", summary);
            if self.dump {
                println!("{}", summary);
            }
        }
    }
}

fn check_file(table: &DirectiveTable, path: &Path, dump: bool) -> Result<(), Error>
{
    let content = std::fs::read_to_string(path).map_err(|e| Error::Read {
        path: path.to_owned(),
        source: e
    })?;
    let mut parser = FileParser::with_hooks(table, SceneHooks { dump });
    let mut ctx = Context::new(path);
    ctx.register_user_context(grammar::CTX_SUMMARY, Box::new(Summary::default()));
    let ok = parser.parse(&mut ctx, &content);
    if !ok || parser.error_count() > 0 {
        return Err(Error::Check {
            path: path.to_owned(),
            errors: parser.error_count().max(1)
        });
    }
    Ok(())
}

fn run() -> i32
{
    let matches = App::new("sclc")
        .author("BlockProject 3D")
        .about("BlockProject 3D SDK - Scene Compiler")
        .version("1.0.0")
        .args([
            Arg::new("verbose").short('v').long("verbose").multiple_occurrences(true)
                .help("Enable verbose output"),
            Arg::new("dump").short('d').long("dump")
                .help("Print a summary of each successfully checked scene"),
            Arg::new("scene").multiple_values(true).required(true)
                .help("List of scene files to check")
        ]).get_matches();
    cli_common::alloc_verbosity_level(matches.occurrences_of("verbose"));
    info!("Initializing BlockProject 3D Scene Compiler...");
    let dump = matches.is_present("dump");
    let table = grammar::build_table();
    let mut code = 0;
    for file in matches.values_of_os("scene").unwrap_or_default() {
        let path = Path::new(file);
        debug!("checking [{}]", path.display());
        match check_file(&table, path, dump) {
            Ok(()) => info!("[{}] is valid.", path.display()),
            Err(e @ Error::Check { .. }) => {
                error!("{}", e);
                if code == 0 {
                    code = 1;
                }
            },
            Err(e) => {
                error!("{}", e);
                code = 2;
            }
        }
    }
    code
}

fn main()
{
    cli_common::init_bp3d_logger(run);
}
