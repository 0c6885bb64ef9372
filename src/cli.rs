use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "mooshak-tools",
    about = "File comparison, search and shell helpers for Mooshak graders",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file (defaults to ./mooshak-tools.yaml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log operation details to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print a file's contents
    Cat(PathArgs),
    /// Copy a file, overwriting the destination
    Copy(CopyArgs),
    /// Check whether two files have the same size
    Cmpsize(PairArgs),
    /// Check whether two files are byte-for-byte identical
    Cmpbin(PairArgs),
    /// Report the lines where two text files differ
    Cmptext(PairArgs),
    /// Show expected and actual contents when they differ
    Test(TestArgs),
    /// Find files whose names fully match a pattern
    Search(SearchArgs),
    /// Check whether a file starts with a zip signature
    IsZip(PathArgs),
    /// Run a command line through sh and print its stdout
    Exec(ExecArgs),
}

#[derive(Args)]
pub struct PathArgs {
    pub path: PathBuf,
}

#[derive(Args)]
pub struct CopyArgs {
    pub src: PathBuf,
    pub dst: PathBuf,
}

#[derive(Args)]
pub struct PairArgs {
    pub left: PathBuf,
    pub right: PathBuf,
}

#[derive(Args)]
pub struct TestArgs {
    /// File with the expected output
    pub expected: PathBuf,

    /// File with the actual output
    #[arg(required_unless_present = "text", conflicts_with = "text")]
    pub actual: Option<PathBuf>,

    /// Compare against this text instead of a file
    #[arg(long)]
    pub text: Option<String>,
}

#[derive(Args)]
pub struct SearchArgs {
    /// Directory to search
    pub root: PathBuf,

    /// Regular expression matched against whole filenames
    pub pattern: String,

    /// Deepest level to search, the root's children being 0; negative for unlimited
    #[arg(long, allow_negative_numbers = true)]
    pub depth: Option<i64>,

    /// Keep the order the directory walk produced
    #[arg(long)]
    pub unsorted: bool,

    /// Treat the pattern as a shell wildcard instead of a regular expression
    #[arg(long)]
    pub glob: bool,
}

#[derive(Args)]
pub struct ExecArgs {
    /// Command line, passed to `sh -c`
    pub cmd: String,
}
