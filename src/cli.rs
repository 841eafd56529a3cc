use anyhow::Result;
use clap::Parser;
use configuration::{OutputFormat, Settings};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Generator of the results for students and rooms.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the students JSON file (default: input.students_file, data/students.json).
    #[arg(long)]
    pub students: Option<PathBuf>,

    /// Path to the rooms JSON file (default: input.rooms_file, data/rooms.json).
    #[arg(long)]
    pub rooms: Option<PathBuf>,

    /// Directory to save the reports (default: output.directory, reports).
    #[arg(long = "output-dir", alias = "output_dir")]
    pub output_dir: Option<PathBuf>,

    /// Output format. When omitted the format is asked for interactively.
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,
}

/// Everything a run needs, after merging the command line over the settings.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub rooms: PathBuf,
    pub students: PathBuf,
    pub output_dir: PathBuf,
    pub format: Option<OutputFormat>,
}

impl Cli {
    pub fn resolve(self, settings: &Settings) -> RunOptions {
        RunOptions {
            rooms: self.rooms.unwrap_or_else(|| settings.input.rooms_file.clone()),
            students: self
                .students
                .unwrap_or_else(|| settings.input.students_file.clone()),
            output_dir: self
                .output_dir
                .unwrap_or_else(|| settings.output.directory.clone()),
            format: self.format.or(settings.output.format),
        }
    }
}

const PROMPT: &str = "Choose output file type:\n1. JSON\n2. XML\nEnter 1 or 2: ";

/// Asks for the output format until a valid choice is entered.
pub fn prompt_format<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<OutputFormat> {
    let mut line = String::new();
    loop {
        write!(output, "{PROMPT}")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "no output format chosen: input closed before 1 or 2 was entered",
            )
            .into());
        }

        match OutputFormat::from_choice(&line) {
            Some(format) => return Ok(format),
            None => writeln!(output, "Incorrect choice. Choose 1 or 2.")?,
        }
    }
}
