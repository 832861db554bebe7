//! Invocation of the external C toolchain.
//!
//! `CompileCmd` runs one shared-library compile of one C source. The compiler
//! is resolved from the builder, the `CC` environment variable, or the system
//! default, and must be present on the search path before anything is
//! spawned. The child process runs under a deadline and is killed on expiry.

use std::env;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Compiler used when neither the builder nor `CC` names one.
pub const DEFAULT_COMPILER: &str = "cc";

/// Deadline applied to a compile unless the builder overrides it.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Builder for one external compile producing a shared library.
pub struct CompileCmd {
    source: PathBuf,
    out_dir: PathBuf,
    compiler: Option<String>,
    args: Vec<String>,
    timeout: Duration,
}

impl CompileCmd {
    pub fn new() -> Self {
        Self {
            source: PathBuf::new(),
            out_dir: PathBuf::from("."),
            compiler: None,
            args: Vec::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn set_source<T>(mut self, source: T) -> Self
    where
        T: Into<PathBuf>,
    {
        self.source = source.into();
        self
    }

    pub fn set_out_dir<T>(mut self, out_dir: T) -> Self
    where
        T: Into<PathBuf>,
    {
        self.out_dir = out_dir.into();
        self
    }

    pub fn set_compiler<T>(mut self, compiler: T) -> Self
    where
        T: Into<String>,
    {
        self.compiler = Some(compiler.into());
        self
    }

    pub fn add_arg<T>(mut self, arg: T) -> Self
    where
        T: Into<String>,
    {
        self.args.push(arg.into());
        self
    }

    pub fn set_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Runs the compile and returns the path of the produced library.
    pub fn build(&self) -> Result<PathBuf> {
        self.execute()
    }

    fn execute(&self) -> Result<PathBuf> {
        let compiler = self.resolve_compiler()?;

        // The output directory must exist, if not, create it.
        ensure_dir_exists(&self.out_dir)?;

        let artifact = self.out_dir.join(shared_library_name(&self.source));

        // Compiler diagnostics go to a log file next to the artifact so a
        // failed compile can be reported in full.
        let log_path = self.out_dir.join("compile-stderr.log");
        let log = std::fs::File::create(&log_path)?;

        debug!("compiling {} -> {}", self.source.display(), artifact.display());

        let mut child = Command::new(&compiler)
            .arg("-shared")
            .arg("-fPIC")
            .args(&self.args)
            .arg("-o")
            .arg(&artifact)
            .arg(&self.source)
            .stdout(Stdio::null())
            .stderr(log)
            .spawn()?;

        let status = self.wait_with_deadline(&mut child)?;

        if !status.success() {
            let stderr = std::fs::read_to_string(&log_path).unwrap_or_default();
            return Err(Error::BuildFailure { status, stderr });
        }

        Ok(artifact)
    }

    fn resolve_compiler(&self) -> Result<String> {
        let compiler = match &self.compiler {
            Some(compiler) => compiler.clone(),
            None => env::var("CC").unwrap_or_else(|_| DEFAULT_COMPILER.to_string()),
        };

        // Check the compiler exists in path before spawning anything.
        if which::which(&compiler).is_err() {
            return Err(Error::CompilerNotFound(compiler));
        }

        Ok(compiler)
    }

    /// Polls the child until it exits or the deadline passes, in which case
    /// the child is killed.
    fn wait_with_deadline(&self, child: &mut Child) -> Result<ExitStatus> {
        let deadline = Instant::now() + self.timeout;

        loop {
            if Instant::now() >= deadline {
                warn!("compile exceeded {:?}, killing the compiler", self.timeout);
                child.kill()?;
                child.wait()?;
                return Err(Error::BuildTimeout { limit: self.timeout });
            }

            if let Some(status) = child.try_wait()? {
                return Ok(status);
            }

            std::thread::sleep(POLL_INTERVAL);
        }
    }
}

impl Default for CompileCmd {
    fn default() -> Self {
        Self::new()
    }
}

fn shared_library_name(source: &Path) -> String {
    let stem = source
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("out");
    format!("{}{}{}", env::consts::DLL_PREFIX, stem, env::consts::DLL_SUFFIX)
}

fn ensure_dir_exists(path: &Path) -> std::io::Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}
