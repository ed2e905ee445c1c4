//! Locating the device argument in a balena CLI command line

use crate::domain::DomainError;

/// `balena device <op> <uuid>` operations that take the device as the next argument.
pub const DEVICE_OPERATIONS: &[&str] = &[
    "identify",
    "move",
    "reboot",
    "rename",
    "rm",
    "restart",
    "shutdown",
    "os-update",
    "public-url",
];

/// Commands whose first positional argument is the device.
pub const REMOTE_COMMANDS: &[&str] = &["ssh", "tunnel", "logs"];

pub const DEVICE_FLAG: &str = "--device";

fn is_flag(token: &str) -> bool {
    token.starts_with('-')
}

/// Index of the first non-flag token at or after `start`.
fn next_positional<S: AsRef<str>>(tokens: &[S], start: usize) -> Option<usize> {
    tokens
        .iter()
        .enumerate()
        .skip(start)
        .find(|(_, t)| !is_flag(t.as_ref()))
        .map(|(i, _)| i)
}

/// Find which token holds the device name/UUID.
///
/// Returns `Ok(None)` for commands that do not target a device.
pub fn locate_identifier_slot<S: AsRef<str>>(
    tokens: &[S],
) -> Result<Option<usize>, DomainError> {
    let Some(command) = tokens.first().map(AsRef::as_ref) else {
        return Ok(None);
    };
    let missing = || DomainError::MissingIdentifierArgument(command.to_string());

    if command == "device" {
        let next = next_positional(tokens, 1).ok_or_else(missing)?;
        if DEVICE_OPERATIONS.contains(&tokens[next].as_ref()) {
            return next_positional(tokens, next + 1)
                .map(Some)
                .ok_or_else(missing);
        }
        return Ok(Some(next));
    }

    if REMOTE_COMMANDS.contains(&command) {
        return next_positional(tokens, 1).map(Some).ok_or_else(missing);
    }

    match tokens.iter().skip(1).position(|t| t.as_ref() == DEVICE_FLAG) {
        Some(pos) => {
            let value = pos + 2;
            if value < tokens.len() {
                Ok(Some(value))
            } else {
                Err(missing())
            }
        }
        None => Ok(None),
    }
}
