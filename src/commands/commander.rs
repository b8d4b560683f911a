//! Entry point of command handling.

use command_parser::Parser;

use crate::{
    commands::{
        CommandContext, CommandParseError, CommandResult,
        actions::{
            handle_compare, handle_defaults, handle_help, handle_info, handle_register,
            handle_unregister,
        },
        command::{Command, format_command_error},
        markdown_response::format_post_failed,
    },
    pubg::StatsApi,
};

/// Parses `!pubg` messages and runs the matching handler.
pub struct Commander {
    parser: Parser,
}

impl Default for Commander {
    fn default() -> Self {
        Self::new()
    }
}

impl Commander {
    pub fn new() -> Self {
        let parser = Parser::new('!', '-');
        Commander { parser }
    }

    /// Parses a message body.
    ///
    /// # Returns
    ///
    /// * `Ok(Command)` - A valid `!pubg` command
    /// * `Err(CommandParseError::NotForBot)` - Not a command for this bot, ignore it
    /// * `Err(CommandParseError::InvalidCommand)` - Reply with the contained usage message
    pub fn parse(&self, body: &str) -> Result<Command, CommandParseError> {
        Command::parse(&self.parser, body).map_err(|error| match format_command_error(error) {
            Some(message) => CommandParseError::InvalidCommand(message),
            None => CommandParseError::NotForBot,
        })
    }

    /// Executes a parsed command.
    pub async fn parse_command<A: StatsApi>(
        &self,
        command: &Command,
        context: &CommandContext<'_, A>,
    ) -> CommandResult {
        match command {
            Command::Help => handle_help(),
            Command::Info => handle_info(context).await,
            Command::Compare(arguments) => handle_compare(context, arguments).await,
            Command::Register(handle) => handle_register(handle),
            Command::Unregister => handle_unregister(context).await,
            Command::Defaults(arguments) => handle_defaults(context, arguments).await,
        }
    }

    pub fn get_post_failed_message() -> String {
        format_post_failed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_compare_command() {
        let commander = Commander::new();
        let result = commander.parse("!pubg compare john jane");
        assert!(matches!(
            result,
            Ok(Command::Compare(arguments)) if arguments == vec!["john", "jane"]
        ));
    }

    #[test]
    fn test_parse_info_command() {
        let commander = Commander::new();
        assert!(matches!(commander.parse("!pubg info"), Ok(Command::Info)));
        assert!(matches!(commander.parse("!pubg INFO"), Ok(Command::Info)));
    }

    #[test]
    fn test_parse_invalid_command_returns_error() {
        let commander = Commander::new();
        match commander.parse("!pubg unknown_command") {
            Err(CommandParseError::InvalidCommand(msg)) => {
                assert!(msg.contains("Unknown command"));
            }
            _ => panic!("Expected InvalidCommand error"),
        }
    }

    #[test]
    fn test_parse_invalid_register() {
        let commander = Commander::new();
        match commander.parse("!pubg register") {
            Err(CommandParseError::InvalidCommand(msg)) => {
                assert!(msg.contains("Invalid register"));
            }
            _ => panic!("Expected InvalidCommand error"),
        }
    }

    #[test]
    fn test_parse_not_for_bot() {
        let commander = Commander::new();
        assert!(matches!(
            commander.parse("!other_bot help"),
            Err(CommandParseError::NotForBot)
        ));
        assert!(matches!(
            commander.parse("This is just a regular message"),
            Err(CommandParseError::NotForBot)
        ));
    }
}
