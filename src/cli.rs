//! Command-line arguments and session commands.

use std::path::PathBuf;

use clap::Parser;

use pdftray::config::Config;

/// Stage and merge PDF files into a single document.
#[derive(Debug, Parser)]
#[command(name = "pdftray", version)]
#[command(about = "Stage PDF files and merge them into a single document", long_about = None)]
pub struct Cli {
    /// Files to stage before the session starts (paths, globs, or directories)
    pub inputs: Vec<String>,

    /// Directory where merged.pdf is saved
    #[arg(short, long, default_value = ".")]
    pub download_dir: PathBuf,

    /// Merge the staged files immediately and exit instead of starting a session
    #[arg(short, long)]
    pub merge: bool,

    /// Print the merge report as JSON
    #[arg(long)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Show detailed output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Convert CLI arguments into a session configuration.
    pub fn to_config(&self) -> Config {
        Config {
            download_dir: self.download_dir.clone(),
            quiet: self.quiet,
            verbose: self.verbose,
            json: self.json,
        }
    }
}

/// A command entered at the session prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Stage files (paths, globs, or directories).
    Add(Vec<String>),
    /// Remove the staged file at the given 1-based position.
    Remove(usize),
    /// Show the staged files.
    List,
    /// Merge the staged files.
    Merge,
    /// Drop every staged file.
    Clear,
    /// Show command help.
    Help,
    /// End the session.
    Quit,
}

impl Command {
    /// Parse a prompt line into a command.
    ///
    /// Returns a user-facing message for unknown commands or bad arguments.
    pub fn parse(line: &str) -> Result<Self, String> {
        let mut parts = line.split_whitespace();
        let verb = parts.next().unwrap_or("");
        let args: Vec<String> = parts.map(str::to_string).collect();

        match verb {
            "add" => {
                if args.is_empty() {
                    Err("Usage: add <file|glob|directory>...".to_string())
                } else {
                    Ok(Self::Add(args))
                }
            }
            "remove" | "rm" => match args.as_slice() {
                [index] => index
                    .parse::<usize>()
                    .ok()
                    .filter(|n| *n >= 1)
                    .map(Self::Remove)
                    .ok_or_else(|| format!("Not a file number: {index}")),
                _ => Err("Usage: remove <number>".to_string()),
            },
            "list" | "ls" => Ok(Self::List),
            "merge" => Ok(Self::Merge),
            "clear" => Ok(Self::Clear),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            other => Err(format!("Unknown command: {other} (try 'help')")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_add() {
        assert_eq!(
            Command::parse("add a.pdf b.pdf"),
            Ok(Command::Add(vec!["a.pdf".to_string(), "b.pdf".to_string()]))
        );
        assert!(Command::parse("add").is_err());
    }

    #[test]
    fn test_parse_remove() {
        assert_eq!(Command::parse("remove 2"), Ok(Command::Remove(2)));
        assert_eq!(Command::parse("rm 1"), Ok(Command::Remove(1)));
        assert!(Command::parse("remove 0").is_err());
        assert!(Command::parse("remove x").is_err());
        assert!(Command::parse("remove").is_err());
        assert!(Command::parse("remove 1 2").is_err());
    }

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(Command::parse("list"), Ok(Command::List));
        assert_eq!(Command::parse("ls"), Ok(Command::List));
        assert_eq!(Command::parse("merge"), Ok(Command::Merge));
        assert_eq!(Command::parse("clear"), Ok(Command::Clear));
        assert_eq!(Command::parse("help"), Ok(Command::Help));
        assert_eq!(Command::parse("quit"), Ok(Command::Quit));
        assert_eq!(Command::parse("exit"), Ok(Command::Quit));
    }

    #[test]
    fn test_parse_unknown_command() {
        let err = Command::parse("frobnicate").unwrap_err();
        assert!(err.contains("frobnicate"));
    }

    #[test]
    fn test_parse_extra_whitespace() {
        assert_eq!(
            Command::parse("  add   one.pdf  "),
            Ok(Command::Add(vec!["one.pdf".to_string()]))
        );
    }

    #[test]
    fn test_cli_to_config() {
        let cli = Cli::try_parse_from([
            "pdftray",
            "--download-dir",
            "/tmp/out",
            "--quiet",
            "a.pdf",
            "b.pdf",
        ])
        .unwrap();

        assert_eq!(cli.inputs, vec!["a.pdf", "b.pdf"]);

        let config = cli.to_config();
        assert_eq!(config.download_dir, PathBuf::from("/tmp/out"));
        assert!(config.quiet);
        assert!(!config.verbose);
        assert!(!config.json);
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["pdftray"]).unwrap();
        assert!(cli.inputs.is_empty());
        assert_eq!(cli.download_dir, PathBuf::from("."));
        assert!(!cli.merge);
    }

    #[test]
    fn test_cli_batch_merge_flag() {
        let cli = Cli::try_parse_from(["pdftray", "--merge", "--json", "a.pdf", "b.pdf"]).unwrap();
        assert!(cli.merge);
        assert!(cli.json);
    }
}
