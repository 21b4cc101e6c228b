//! Interpreter: line-oriented command front end over a `Container`.
//!
//! Each input line is echoed as `\n>>{line}\n`. Text after `//` is a
//! comment; a line left blank after stripping it gets no response. Any
//! other line gets `\n{response}\n`, where a line that does not parse
//! answers `ILLEGAL COMMAND` and processing carries on with the next one.

use crate::config::ContainerConfig;
use crate::container::Container;
use crate::entry::Entry;
use crate::error::{CommandError, ContainerError, Error};
use crate::ordered_tree::OrderedTree;
use hashbrown::HashMap;
use log::{info, warn};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

pub const SUCCESS: &str = "SUCCESS";
pub const FAIL: &str = "FAIL";
pub const NOT_FOUND: &str = "NOT FOUND";
pub const NOT_EXISTS: &str = "NOT EXISTS";
pub const UNSUPPORTED: &str = "Command is not supported for this structure";
pub const ILLEGAL_COMMAND: &str = "ILLEGAL COMMAND";

/// A parsed command line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    New(ContainerConfig),
    Add { key: i32, value: i32 },
    Delete(i32),
    Find(i32),
    At(i32),
    Min,
    Max,
    Data,
    DataSimple,
    State,
    Print,
}

/// Parses the words of one line; `words[0]` is the command name.
type ParseFn = fn(&[&str]) -> Result<Command, CommandError>;

/// Name → parser dispatch table.
pub struct CommandParser {
    table: HashMap<&'static str, ParseFn>,
}

impl CommandParser {
    pub fn new() -> Self {
        let mut table: HashMap<&'static str, ParseFn> = HashMap::new();
        table.insert("new", parse_new);
        table.insert("add", |words| {
            Ok(Command::Add {
                key: int_arg("add", words, 1)?,
                value: int_arg("add", words, 2)?,
            })
        });
        table.insert("del", |words| Ok(Command::Delete(int_arg("del", words, 1)?)));
        table.insert("find", |words| Ok(Command::Find(int_arg("find", words, 1)?)));
        table.insert("at", |words| Ok(Command::At(int_arg("at", words, 1)?)));
        table.insert("min", |_| Ok(Command::Min));
        table.insert("max", |_| Ok(Command::Max));
        table.insert("data", |_| Ok(Command::Data));
        table.insert("datasimple", |_| Ok(Command::DataSimple));
        table.insert("state", |_| Ok(Command::State));
        table.insert("print", |_| Ok(Command::Print));
        Self { table }
    }

    /// Parse one line. `Ok(None)` for blank and comment-only lines.
    pub fn parse_line(&self, line: &str) -> Result<Option<Command>, CommandError> {
        let words: Vec<&str> = strip_comment(line).split_whitespace().collect();
        let Some(&name) = words.first() else {
            return Ok(None);
        };
        let parse = *self
            .table
            .get(name)
            .ok_or_else(|| CommandError::Unknown(name.to_string()))?;
        parse(&words).map(Some)
    }
}

impl Default for CommandParser {
    fn default() -> Self {
        Self::new()
    }
}

fn trim_line_ending(raw: &[u8]) -> &[u8] {
    let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
    raw.strip_suffix(b"\r").unwrap_or(raw)
}

pub fn strip_comment(line: &str) -> &str {
    match line.find("//") {
        Some(start) => &line[..start],
        None => line,
    }
}

fn arg<'a>(
    command: &'static str,
    words: &[&'a str],
    position: usize,
) -> Result<&'a str, CommandError> {
    words
        .get(position)
        .copied()
        .ok_or(CommandError::MissingArgument { command, position })
}

fn int_arg(command: &'static str, words: &[&str], position: usize) -> Result<i32, CommandError> {
    let raw = arg(command, words, position)?;
    raw.parse().map_err(|source| CommandError::InvalidInteger {
        command,
        raw: raw.to_string(),
        source,
    })
}

fn float_arg(command: &'static str, words: &[&str], position: usize) -> Result<f64, CommandError> {
    let raw = arg(command, words, position)?;
    raw.parse().map_err(|source| CommandError::InvalidFloat {
        command,
        raw: raw.to_string(),
        source,
    })
}

fn parse_new(words: &[&str]) -> Result<Command, CommandError> {
    let config = match arg("new", words, 1)? {
        "ht" => ContainerConfig::HashTable {
            table_size: int_arg("new", words, 2)?,
        },
        "bst" => ContainerConfig::Tree,
        "sa" => ContainerConfig::SortedArray {
            initial_capacity: int_arg("new", words, 2)?,
            growth_multiplier: float_arg("new", words, 3)?,
        },
        other => return Err(CommandError::UnknownStructure(other.to_string())),
    };
    Ok(Command::New(config))
}

/// Fixed response text for a non-success outcome.
pub fn outcome_text(err: &ContainerError) -> &'static str {
    match err {
        ContainerError::MissingKey(_) | ContainerError::IndexOutOfBounds { .. } => FAIL,
        ContainerError::NotExists => NOT_EXISTS,
        ContainerError::Unsupported { .. } => UNSUPPORTED,
    }
}

fn entry_or_outcome(result: Result<Entry, ContainerError>) -> String {
    match result {
        Ok(entry) => entry.to_string(),
        Err(err) => outcome_text(&err).to_string(),
    }
}

/// Holds the active container and applies commands to it.
pub struct Interpreter {
    container: Box<dyn Container>,
    parser: CommandParser,
}

impl Interpreter {
    /// Starts with an empty tree.
    pub fn new() -> Self {
        Self {
            container: Box::new(OrderedTree::new()),
            parser: CommandParser::new(),
        }
    }

    pub fn with_config(config: ContainerConfig) -> Result<Self, CommandError> {
        Ok(Self {
            container: config.build()?,
            parser: CommandParser::new(),
        })
    }

    pub fn container(&self) -> &dyn Container {
        self.container.as_ref()
    }

    pub fn execute(&mut self, command: Command) -> String {
        let c = &mut self.container;
        match command {
            Command::New(config) => match config.build() {
                Ok(fresh) => {
                    info!("replacing {} with {:?}", c.get_struct_type(), config);
                    *c = fresh;
                    SUCCESS.to_string()
                }
                Err(err) => {
                    warn!("keeping {}: {}", c.get_struct_type(), err);
                    ILLEGAL_COMMAND.to_string()
                }
            },
            Command::Add { key, value } => {
                c.add(key, value);
                SUCCESS.to_string()
            }
            Command::Delete(key_or_index) => match c.delete(key_or_index) {
                Ok(_) => SUCCESS.to_string(),
                Err(err) => outcome_text(&err).to_string(),
            },
            Command::Find(key) => c
                .find(key)
                .map_or_else(|| NOT_FOUND.to_string(), |entry| entry.to_string()),
            Command::At(index) => entry_or_outcome(c.get_at(index)),
            Command::Min => entry_or_outcome(c.get_min()),
            Command::Max => entry_or_outcome(c.get_max()),
            Command::Data => c.get_data(),
            Command::DataSimple => c.get_data_simple(),
            Command::State => c
                .get_state()
                .unwrap_or_else(|err| outcome_text(&err).to_string()),
            Command::Print => c.print(),
        }
    }

    /// Response for one raw line, or `None` when the line holds no command.
    pub fn execute_line(&mut self, line: &str) -> Option<String> {
        match self.parser.parse_line(line) {
            Ok(Some(command)) => Some(self.execute(command)),
            Ok(None) => None,
            Err(err) => {
                warn!("illegal command {:?}: {}", line, err);
                Some(ILLEGAL_COMMAND.to_string())
            }
        }
    }

    /// Echo every input line to `output`, followed by its response.
    ///
    /// Lines are decoded lossily: bytes that are not UTF-8 become U+FFFD and
    /// the line is answered like any other.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, mut output: W) -> io::Result<()> {
        let mut executed = 0usize;
        let mut raw = Vec::new();
        loop {
            raw.clear();
            if input.read_until(b'\n', &mut raw)? == 0 {
                break;
            }
            let line = String::from_utf8_lossy(trim_line_ending(&raw));
            write!(output, "\n>>{}\n", line)?;
            if let Some(response) = self.execute_line(&line) {
                write!(output, "\n{}\n", response)?;
                executed += 1;
            }
        }
        output.flush()?;
        info!("executed {} commands", executed);
        Ok(())
    }

    pub fn run_files(&mut self, input: &Path, output: &Path) -> Result<(), Error> {
        let reader = File::open(input).map_err(|source| Error::Open {
            path: input.to_path_buf(),
            source,
        })?;
        let writer = File::create(output).map_err(|source| Error::Open {
            path: output.to_path_buf(),
            source,
        })?;
        self.run(BufReader::new(reader), BufWriter::new(writer))?;
        Ok(())
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Result<Option<Command>, CommandError> {
        CommandParser::new().parse_line(line)
    }

    #[test]
    fn comments_and_blank_lines() {
        assert_eq!(parse(""), Ok(None));
        assert_eq!(parse("   "), Ok(None));
        assert_eq!(parse("// just a note"), Ok(None));
        assert_eq!(parse("min // trailing"), Ok(Some(Command::Min)));
        assert_eq!(strip_comment("add 1 2//x"), "add 1 2");
    }

    #[test]
    fn parses_every_command() {
        assert_eq!(
            parse("add -4 9"),
            Ok(Some(Command::Add { key: -4, value: 9 }))
        );
        assert_eq!(parse("del 3"), Ok(Some(Command::Delete(3))));
        assert_eq!(parse("find 3"), Ok(Some(Command::Find(3))));
        assert_eq!(parse("at 0"), Ok(Some(Command::At(0))));
        assert_eq!(parse("max"), Ok(Some(Command::Max)));
        assert_eq!(parse("data"), Ok(Some(Command::Data)));
        assert_eq!(parse("datasimple"), Ok(Some(Command::DataSimple)));
        assert_eq!(parse("state"), Ok(Some(Command::State)));
        assert_eq!(parse("print"), Ok(Some(Command::Print)));
        assert_eq!(
            parse("new ht 7"),
            Ok(Some(Command::New(ContainerConfig::HashTable { table_size: 7 })))
        );
        assert_eq!(
            parse("new sa 4 1.5"),
            Ok(Some(Command::New(ContainerConfig::SortedArray {
                initial_capacity: 4,
                growth_multiplier: 1.5
            })))
        );
        assert_eq!(parse("new bst"), Ok(Some(Command::New(ContainerConfig::Tree))));
    }

    #[test]
    fn malformed_lines_are_typed() {
        assert_eq!(parse("push 1"), Err(CommandError::Unknown("push".into())));
        assert_eq!(
            parse("add 1"),
            Err(CommandError::MissingArgument {
                command: "add",
                position: 2
            })
        );
        assert!(matches!(
            parse("find x"),
            Err(CommandError::InvalidInteger { command: "find", .. })
        ));
        assert!(matches!(
            parse("add 99999999999 1"),
            Err(CommandError::InvalidInteger { .. })
        ));
        assert!(matches!(
            parse("new sa 2 fast"),
            Err(CommandError::InvalidFloat { .. })
        ));
        assert_eq!(
            parse("new avl"),
            Err(CommandError::UnknownStructure("avl".into()))
        );
        assert_eq!(
            parse("new"),
            Err(CommandError::MissingArgument {
                command: "new",
                position: 1
            })
        );
    }

    /// Invariant: outcomes map onto the fixed response strings.
    #[test]
    fn execute_reports_outcomes() {
        let mut it = Interpreter::new();
        assert_eq!(it.execute(Command::Min), NOT_EXISTS);
        assert_eq!(it.execute(Command::Find(1)), NOT_FOUND);
        assert_eq!(it.execute(Command::Delete(1)), FAIL);
        assert_eq!(it.execute(Command::At(0)), UNSUPPORTED);
        assert_eq!(it.execute(Command::State), UNSUPPORTED);
        assert_eq!(it.execute(Command::Add { key: 1, value: 2 }), SUCCESS);
        assert_eq!(it.execute(Command::Find(1)), "key: 1, value: 2");
        assert_eq!(it.execute(Command::Delete(1)), SUCCESS);
    }

    #[test]
    fn new_replaces_container() {
        let mut it = Interpreter::new();
        it.execute(Command::Add { key: 1, value: 1 });
        it.execute(Command::New(ContainerConfig::SortedArray {
            initial_capacity: 2,
            growth_multiplier: 2.0,
        }));
        assert_eq!(it.container().get_struct_type(), "sorted array");
        assert!(it.container().is_empty());
        assert_eq!(it.execute(Command::At(0)), FAIL);
    }

    #[test]
    fn with_config_starts_from_given_backend() {
        let it = Interpreter::with_config(ContainerConfig::HashTable { table_size: 3 }).unwrap();
        assert_eq!(it.container().get_struct_type(), "hash-table");
        assert_eq!(
            it.container().get_state().unwrap(),
            "num_of_items = 0 || table_size = 3"
        );
    }

    #[test]
    fn run_echoes_and_keeps_going_after_errors() {
        let script = "add 5 50\nbogus\n\n// note\nfind 5\n";
        let mut out = Vec::new();
        Interpreter::new().run(script.as_bytes(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "\n>>add 5 50\n\nSUCCESS\n\
             \n>>bogus\n\nILLEGAL COMMAND\n\
             \n>>\n\
             \n>>// note\n\
             \n>>find 5\n\nkey: 5, value: 50\n"
        );
    }
}
