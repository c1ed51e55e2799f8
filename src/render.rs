//! Hands graph descriptions to graphviz.

use crate::cli::Cli;
use anyhow::{bail, Context, Result};
use log::{debug, info};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
    process::Command,
};

/// Renders dot graph descriptions with an external graphviz executable.
#[derive(Debug, Clone)]
pub struct Renderer {
    /// Graphviz executable.
    program: String,
    /// Output format passed as `-T<format>`.
    format: String,
    output_dir: PathBuf,
    /// Open the rendered file afterwards.
    view: bool,
    /// Print the graph description instead of rendering it.
    emit_dot: bool,
}

impl Renderer {
    pub fn new(program: impl Into<String>, format: impl Into<String>, output_dir: PathBuf) -> Self {
        Self {
            program: program.into(),
            format: format.into(),
            output_dir,
            view: false,
            emit_dot: false,
        }
    }

    pub fn with_view(mut self, view: bool) -> Self {
        self.view = view;
        self
    }

    pub fn with_emit_dot(mut self, emit_dot: bool) -> Self {
        self.emit_dot = emit_dot;
        self
    }

    /// Writes `<output_dir>/<name>.gv` and renders it to
    /// `<output_dir>/<name>.gv.<format>`. Returns the path of the rendered
    /// file, or `None` when the description was written to `out` instead.
    pub fn display(
        &self,
        name: &str,
        dot: &str,
        out: &mut impl Write,
    ) -> Result<Option<PathBuf>> {
        if self.emit_dot {
            write!(out, "{dot}")?;
            out.flush()?;
            return Ok(None);
        }

        let source = self.output_dir.join(format!("{name}.gv"));
        fs::write(&source, dot)
            .with_context(|| format!("failed to write graph description {}", source.display()))?;

        let image = self.output_dir.join(format!("{name}.gv.{}", self.format));
        debug!("Rendering {} with {}", source.display(), self.program);

        let status = Command::new(&self.program)
            .arg(format!("-T{}", self.format))
            .arg(&source)
            .arg("-o")
            .arg(&image)
            .status()
            .with_context(|| format!("failed to run graph renderer `{}`", self.program))?;

        if !status.success() {
            bail!("graph renderer `{}` failed with {status}", self.program);
        }

        info!("Rendered {}", image.display());

        if self.view {
            open(&image)?;
        }

        Ok(Some(image))
    }
}

impl From<&Cli> for Renderer {
    fn from(cli: &Cli) -> Self {
        Renderer::new(cli.renderer.clone(), cli.format.clone(), cli.output_dir())
            .with_view(cli.view)
            .with_emit_dot(cli.emit_dot)
    }
}

/// Opens `path` with the default viewer of the system without waiting for it.
fn open(path: &Path) -> Result<()> {
    #[cfg(target_os = "macos")]
    let mut command = Command::new("open");
    #[cfg(target_os = "windows")]
    let mut command = {
        let mut command = Command::new("cmd");
        command.args(["/C", "start", ""]);
        command
    };
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    let mut command = Command::new("xdg-open");

    command
        .arg(path)
        .spawn()
        .with_context(|| format!("failed to open {}", path.display()))?;

    Ok(())
}
