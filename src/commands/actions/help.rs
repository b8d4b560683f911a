//! Help command handler.

use log::debug;

use crate::commands::{CommandResult, markdown_response::format_help};

pub fn handle_help() -> CommandResult {
    debug!("handling help command");

    CommandResult::reply(format_help())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_help() {
        let result = handle_help();

        assert!(result.registration.is_none());
        assert!(result.defaults_to_set.is_none());
        assert!(result.comparison.is_none());
        assert!(result.response.unwrap().contains("compare"));
    }
}
