use anyhow::{Context, Result};
use clap::Parser as _;
use fsmi_core::{Dfa, Parser, Simulatable, Simulate};
use log::debug;
use std::{fs, io::Write};

pub use self::{cli::Cli, render::Renderer};

pub mod cli;
pub mod render;

/// Reads, optionally minimizes, simulates and displays the finite-state
/// machine as configured by `cli`. The verdict, and the graph descriptions
/// when they are emitted instead of rendered, are written to `out`.
pub fn run(cli: &Cli, out: &mut impl Write) -> Result<()> {
    let dfa = load(cli)?;
    let stem = cli.stem();
    let renderer = Renderer::from(cli);

    if cli.display_initial {
        let name = format!("{stem}_initial");
        renderer.display(&name, &dfa.to_dot(&name, None), out)?;
    }

    if let Some(input) = &cli.inputstring {
        let mut sim = dfa.to_simulator();
        let verdict = if sim.feed_str(input) {
            "accepted"
        } else {
            "rejected"
        };
        debug!("Stopped in state `{}`", dfa.state_name(sim.current_state()));

        writeln!(out, "The input string \"{input}\" is {verdict}.")?;
        out.flush()?;

        if cli.display_final {
            let name = format!("{stem}_final");
            renderer.display(&name, &sim.to_dot(&name), out)?;
        }
    }

    Ok(())
}

/// Reads and parses the fsm file, minimizing it when requested.
fn load(cli: &Cli) -> Result<Dfa> {
    debug!("Loading finite-state machine from {}", cli.fsmfile.display());
    let source = fs::read_to_string(&cli.fsmfile)
        .with_context(|| format!("failed to read {}", cli.fsmfile.display()))?;

    let mut parser = Parser::new(&source).with_file_name(cli.fsmfile.display().to_string());
    if let Some(alphabet) = &cli.alphabet {
        parser = parser.with_alphabet(alphabet);
    }
    let dfa = parser.parse()?;

    if !cli.minimize {
        return Ok(dfa);
    }

    debug!("Minimizing finite-state machine");
    dfa.minimize()
        .with_context(|| format!("failed to minimize {}", cli.fsmfile.display()))
}

/// The driver function that parses the arguments and runs the interpreter.
pub fn driver() -> Result<()> {
    let cli = Cli::parse();
    run(&cli, &mut std::io::stdout().lock())
}

#[cfg(test)]
mod tests {
    use super::{run, Cli};
    use clap::Parser;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn fsm_file(source: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(source.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    fn output(args: &[&str]) -> anyhow::Result<String> {
        let cli = Cli::try_parse_from(args)?;
        let mut out = Vec::new();
        run(&cli, &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn accepted() {
        let file = fsm_file("+A: a->B; b->A\n-B: a->A; b->B\n");
        let path = file.path().to_str().unwrap();

        assert_eq!(
            output(&["fsmi", path, "-i", "aab"]).unwrap(),
            "The input string \"aab\" is accepted.\n"
        );
        assert_eq!(
            output(&["fsmi", path, "-i", "ab", "-m"]).unwrap(),
            "The input string \"ab\" is rejected.\n"
        );
    }

    #[test]
    fn emitted_graphs_follow_operation_order() {
        let file = fsm_file("+A: a->B; b->A\n-B: a->A; b->B\n");
        let path = file.path().to_str().unwrap();

        let out = output(&["fsmi", path, "-d", "-D", "-i", "a", "--emit-dot"]).unwrap();

        let initial = out.find("_initial\" {").unwrap();
        let verdict = out.find("The input string \"a\" is rejected.\n").unwrap();
        let last = out.find("_final\" {").unwrap();
        assert!(initial < verdict && verdict < last);
        assert!(out[last..].contains("\t\"B\" [shape = circle, color = red];\n"));
        assert!(!out[..verdict].contains("color = red"));
    }

    #[test]
    fn minimize_with_wildcard_needs_alphabet() {
        let file = fsm_file("-A: a->B; *->A\n+B: *->B\n");
        let path = file.path().to_str().unwrap();

        let err = output(&["fsmi", path, "-i", "ba", "-m"]).unwrap_err();
        assert!(format!("{err:#}").contains("supply an alphabet"));

        assert_eq!(
            output(&["fsmi", path, "-i", "ba", "-m", "-a", "a,b"]).unwrap(),
            "The input string \"ba\" is accepted.\n"
        );
    }

    #[test]
    fn description_error_names_line() {
        let file = fsm_file("+A: a->A\n-B: a->X; *->Y; b->Z\n");
        let path = file.path().to_str().unwrap();

        let err = output(&["fsmi", path, "-i", "a"]).unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("{path}:2: symbol `b` is defined after the wildcard")
        );
    }

    #[test]
    fn missing_file() {
        let err = output(&["fsmi", "/nonexistent/machine.fsm", "-i", "a"]).unwrap_err();
        assert!(err.to_string().starts_with("failed to read"));
    }
}
