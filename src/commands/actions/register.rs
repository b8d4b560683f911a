//! Handle registration command handler.
//!
//! The handle is stored as typed: it is matched exactly against the API
//! lookup when used by `compare`.

use log::debug;

use crate::{
    commands::{CommandResult, markdown_response::format_successful_register},
    storage::RegistryChange,
};

pub fn handle_register(handle: &str) -> CommandResult {
    debug!("handling register command for {}", handle);

    CommandResult {
        response: Some(format_successful_register(handle)),
        registration: Some(RegistryChange::Register(handle.to_owned())),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_register() {
        let result = handle_register("john_pubg");

        assert_eq!(
            result.registration,
            Some(RegistryChange::Register("john_pubg".to_string()))
        );
        assert_eq!(
            result.response.unwrap(),
            "You are now registered as `john_pubg`."
        );
        assert!(result.comparison.is_none());
    }
}
