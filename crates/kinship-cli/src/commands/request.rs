//! Request lifecycle commands: request, accept, reject, remove.

use crate::cli::{AnswerArgs, RemoveArgs, RequestArgs};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::Service;

/// Execute the request command.
pub fn execute_request(args: RequestArgs, service: &Service, formatter: &Formatter) -> Result<String> {
    let reply = service.create_request(args.from, args.to)?;
    formatter.format_reply(&reply)
}

/// Execute the accept command.
pub fn execute_accept(args: AnswerArgs, service: &Service, formatter: &Formatter) -> Result<String> {
    let notice = service.accept_request(args.id)?;
    formatter.format_notice(notice)
}

/// Execute the reject command.
pub fn execute_reject(args: AnswerArgs, service: &Service, formatter: &Formatter) -> Result<String> {
    let notice = service.reject_request(args.id)?;
    formatter.format_notice(notice)
}

/// Execute the remove command.
pub fn execute_remove(args: RemoveArgs, service: &Service, formatter: &Formatter) -> Result<String> {
    match (args.id, args.pair.as_deref()) {
        (Some(id), _) => {
            service.delete_by_id(id)?;
            Ok(formatter.success(&format!("Relationship {} removed", id)))
        }
        (None, Some([a, b])) => {
            service.delete_by_pair(*a, *b)?;
            Ok(formatter.success(&format!("Relationship between {} and {} removed", a, b)))
        }
        _ => Err(CliError::InvalidInput(
            "remove needs --id or --pair A B".to_string(),
        )),
    }
}
