//! Command parsing for `!pubg` messages.
//!
//! A message is first tokenized by `command_parser`, then the first argument
//! selects the [`Command`]. Messages that don't start with `!pubg` are not
//! commands for this bot and are reported as such so they can be ignored.

use command_parser::Parser;
use log::debug;

use crate::commands::markdown_response::{
    format_invalid_compare, format_invalid_register, format_unknown_command,
};

/// A parsed `!pubg` command.
#[derive(Debug, Hash, PartialEq, Eq)]
pub enum Command {
    Help,
    Info,
    /// Every argument after `compare`, bare handles and `key=value` pairs
    Compare(Vec<String>),
    /// Handle to register for the sender
    Register(String),
    Unregister,
    /// Every argument after `defaults`
    Defaults(Vec<String>),
}

#[derive(Debug)]
pub enum CommandParsingError {
    UnableToParse,
    NotPubg,
    Unknown,
    InvalidCompare,
    InvalidRegister,
}

impl Command {
    pub fn parse(parser: &Parser, body: &str) -> Result<Self, CommandParsingError> {
        // For an unknown reason the parser ignores the last word, so we add a dummy word at the end
        let body = body.to_string() + " dummy";

        let command = match parser.parse(&body) {
            Ok(cmd) => cmd,
            Err(_) => return Err(CommandParsingError::UnableToParse),
        };

        if command.name != "pubg" {
            return Err(CommandParsingError::NotPubg);
        }

        debug!("parsing command: {:?}", command);

        let Some((action, arguments)) = command.arguments.split_first() else {
            return Ok(Command::Help);
        };
        let arguments = arguments.to_vec();

        match action.to_lowercase().as_str() {
            "help" => Ok(Command::Help),
            "info" => Ok(Command::Info),
            "compare" if arguments.is_empty() => Err(CommandParsingError::InvalidCompare),
            "compare" => Ok(Command::Compare(arguments)),
            "register" => match arguments.first() {
                Some(handle) => Ok(Command::Register(handle.clone())),
                None => Err(CommandParsingError::InvalidRegister),
            },
            "unregister" => Ok(Command::Unregister),
            "defaults" => Ok(Command::Defaults(arguments)),
            _ => Err(CommandParsingError::Unknown),
        }
    }
}

pub fn format_command_error(error: CommandParsingError) -> Option<String> {
    match error {
        CommandParsingError::Unknown => Some(format_unknown_command()),
        CommandParsingError::InvalidCompare => Some(format_invalid_compare()),
        CommandParsingError::InvalidRegister => Some(format_invalid_register()),
        CommandParsingError::UnableToParse | CommandParsingError::NotPubg => None,
    }
}
