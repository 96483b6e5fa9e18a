//! Script post-processing of the output tree.
//!
//! Every `.ts` file is replaced by a `.js` sibling produced by a
//! [`ScriptTranspiler`]. Declaration files (`*.d.ts`) do not carry the `.ts`
//! extension and are left alone.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use log::debug;

use crate::constants::{DEFAULT_TRANSPILER, SOURCE_SCRIPT_EXTENSION, TARGET_SCRIPT_EXTENSION};
use crate::error::{Error, Result};
use crate::path::{change_extension, extension_of};
use crate::walker::{walk, WalkPolicy};

/// Trait for source-to-source script transformers.
pub trait ScriptTranspiler {
    /// Transforms `source` read from `path` into the target dialect.
    fn transpile(&self, path: &Path, source: &str) -> Result<String>;
}

/// Runs an external program that reads the script on stdin and writes the
/// result to stdout, e.g. `esbuild --loader=ts`.
#[derive(Debug, Clone)]
pub struct CommandTranspiler {
    program: String,
    args: Vec<String>,
}

impl CommandTranspiler {
    pub fn new<S: Into<String>>(program: S, args: Vec<String>) -> Self {
        Self { program: program.into(), args }
    }

    /// Splits a command line on whitespace into program and arguments.
    ///
    /// # Errors
    /// * `Error::ConfigError` if the command line is empty
    pub fn from_command_line(command_line: &str) -> Result<Self> {
        let mut parts = command_line.split_whitespace().map(str::to_string);
        let program = parts
            .next()
            .ok_or_else(|| Error::ConfigError("empty transpiler command".to_string()))?;
        Ok(Self::new(program, parts.collect()))
    }
}

impl Default for CommandTranspiler {
    fn default() -> Self {
        // The default command line is a non-empty constant.
        let mut parts = DEFAULT_TRANSPILER.split_whitespace().map(str::to_string);
        let program = parts.next().unwrap_or_default();
        Self::new(program, parts.collect())
    }
}

impl ScriptTranspiler for CommandTranspiler {
    fn transpile(&self, path: &Path, source: &str) -> Result<String> {
        let failure = |message: String| Error::TranspileError {
            path: path.display().to_string(),
            message,
        };

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| failure(format!("cannot run '{}': {}", self.program, e)))?;

        // stdin is fed from its own thread while stdout is drained.
        let writer = child.stdin.take().map(|mut stdin| {
            let bytes = source.as_bytes().to_vec();
            std::thread::spawn(move || stdin.write_all(&bytes))
        });

        let output = child.wait_with_output().map_err(|e| failure(e.to_string()))?;
        if let Some(handle) = writer {
            handle
                .join()
                .map_err(|_| failure("stdin writer panicked".to_string()))?
                .map_err(|e| failure(format!("cannot write stdin: {e}")))?;
        }

        if !output.status.success() {
            return Err(failure(format!(
                "'{}' exited with {}: {}",
                self.program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        String::from_utf8(output.stdout).map_err(|e| failure(e.to_string()))
    }
}

/// Replaces every `.ts` file under `root` with its transpiled `.js` sibling.
///
/// # Returns
/// * `Result<usize>` - Number of scripts transpiled
pub fn transpile_tree<P: AsRef<Path>>(
    root: P,
    transpiler: &dyn ScriptTranspiler,
    policy: WalkPolicy,
) -> Result<usize> {
    // Collect first; the tree changes while scripts are replaced.
    let mut scripts: Vec<PathBuf> = Vec::new();
    walk(root, policy, |path| {
        if path.to_str().map(extension_of) == Some(SOURCE_SCRIPT_EXTENSION) {
            scripts.push(path.to_path_buf());
        }
        Ok(())
    })?;

    for script in &scripts {
        let source =
            fs::read_to_string(script).map_err(|e| Error::file("read script", script, e))?;
        let transpiled = transpiler.transpile(script, &source)?;

        let script_name = script.to_str().ok_or_else(|| {
            Error::InvalidPath(format!("'{}' is not UTF-8", script.display()))
        })?;
        let target = PathBuf::from(change_extension(script_name, TARGET_SCRIPT_EXTENSION));
        fs::write(&target, transpiled).map_err(|e| Error::file("write", &target, e))?;
        fs::remove_file(script).map_err(|e| Error::file("remove", script, e))?;
        debug!("Transpiled '{}' to '{}'", script.display(), target.display());
    }

    Ok(scripts.len())
}
