use chrono::NaiveDate;
use clap::{Parser, Subcommand};

/// One line typed at the prompt.
#[derive(Parser, Debug)]
#[command(multicall = true)]
pub struct Line {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Set the first name field
    First {
        /// Leave empty to unset the field
        name: Vec<String>,
    },
    /// Set the last name field
    Last {
        /// Leave empty to unset the field
        name: Vec<String>,
    },
    /// Set the birth date field
    Birth {
        /// Date as YYYY-MM-DD, omit to unset the field
        date: Option<NaiveDate>,
    },
    /// Add the person described by the form
    Add,
    /// Select rows by index
    Select {
        #[arg(required = true)]
        indices: Vec<usize>,
    },
    /// Clear the selection
    Deselect,
    /// Delete the selected rows
    Delete,
    /// Restore the seed rows
    Restore,
    /// Clear the form fields
    Clear,
    /// Show the table
    List,
    /// Show the age category of a row
    Age { index: usize },
    /// Validate and save a row
    Save { index: usize },
    /// Leave the program
    #[command(alias = "exit")]
    Quit,
}

impl Line {
    pub fn parse_line(line: &str) -> Result<Commands, clap::Error> {
        Self::try_parse_from(line.split_whitespace()).map(|parsed| parsed.command)
    }
}

/// Joins the words typed for a name field; no words unsets the field.
pub fn joined(words: &[String]) -> Option<String> {
    if words.is_empty() {
        None
    } else {
        Some(words.join(" "))
    }
}
