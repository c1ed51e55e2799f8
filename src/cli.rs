use clap::{ArgGroup, Parser};
use fsmi_core::{parse_alphabet, Alphabet};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(
    version,
    about = "A Finite State Machine Interpreter",
    after_help = "Description syntax:\n  \
        <+|-><state>: <symbol,symbol,...> -> <state>; ...\n  \
        `+` marks an accepting state, the first state is the initial state,\n  \
        `*` matches any symbol without an explicit transition and `//` starts a comment."
)]
#[clap(group(
    ArgGroup::new("action")
        .required(true)
        .multiple(true)
        .args(["inputstring", "display_initial", "display_final"])
))]
pub struct Cli {
    /// The file containing the finite state machine to simulate.
    pub fsmfile: PathBuf,

    /// The string that serves as an input for the finite state machine.
    /// Run the finite state machine on this string and print whether it accepts or rejects it.
    #[clap(short, long = "inputstring")]
    pub inputstring: Option<String>,

    /// Display the initial state of the fsm.
    #[clap(short = 'd', long = "display_initial")]
    pub display_initial: bool,

    /// Display the final state of the fsm, the final state is marked in red.
    #[clap(short = 'D', long = "display_final", requires = "inputstring")]
    pub display_final: bool,

    /// Minimize the fsm before any other operation.
    #[clap(short, long)]
    pub minimize: bool,

    /// Comma-separated symbols wildcards are expanded to (e.g., `a,b,c`).
    /// Mandatory when minimizing a fsm with wildcards.
    #[clap(short, long, value_parser = parse_alphabet)]
    pub alphabet: Option<Alphabet>,

    /// Output format of the rendered graph.
    #[clap(long, default_value = "png")]
    pub format: String,

    /// Directory the graph description and the rendered graph are written to.
    /// Defaults to the temporary directory of the system.
    #[clap(long)]
    pub output_dir: Option<PathBuf>,

    /// Graphviz executable used to render graphs.
    #[clap(long, env = "FSMI_DOT", default_value = "dot")]
    pub renderer: String,

    /// Open rendered graphs with the default viewer of the system.
    #[clap(long, default_value_t = false)]
    pub view: bool,

    /// Print the graph descriptions to stdout instead of rendering them.
    #[clap(long, default_value_t = false)]
    pub emit_dot: bool,
}

impl Cli {
    /// File name of the fsm file without the `.fsm` extension.
    pub fn stem(&self) -> String {
        let file_name = self
            .fsmfile
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| String::from("fsm"));

        match file_name.strip_suffix(".fsm") {
            Some(stem) if !stem.is_empty() => stem.to_string(),
            _ => file_name,
        }
    }

    pub fn output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(std::env::temp_dir)
    }
}
