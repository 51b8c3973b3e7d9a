//! Identity registry commands.

use crate::cli::{IdentityAction, IdentityArgs};
use crate::error::Result;
use crate::output::Formatter;
use crate::Service;

/// Execute an identity subcommand.
pub fn execute_identity(args: IdentityArgs, service: &Service, formatter: &Formatter) -> Result<String> {
    let store = service.store();
    match args.action {
        IdentityAction::Add { id, handle } => {
            store.register_identity(id, &handle)?;
            Ok(formatter.success(&format!("Identity {} registered as '{}'", id, handle)))
        }
        IdentityAction::Deactivate { id } => {
            if store.deactivate_identity(id)? {
                Ok(formatter.success(&format!("Identity {} deactivated", id)))
            } else {
                Ok(formatter.info(&format!("Identity {} is not registered", id)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use crate::open_service;
    use kinship_domain::traits::IdentityDirectory;
    use kinship_domain::IdentityId;
    use kinship_service::LifecycleConfig;

    #[test]
    fn test_add_and_deactivate() {
        let service = open_service(":memory:", LifecycleConfig::default()).unwrap();
        let formatter = Formatter::new(OutputFormat::Table, false);
        let id = IdentityId::new(4).unwrap();

        let output = execute_identity(
            IdentityArgs {
                action: IdentityAction::Add {
                    id,
                    handle: "ada".to_string(),
                },
            },
            &service,
            &formatter,
        )
        .unwrap();
        assert!(output.contains("registered"));
        assert!(service.store().identity_exists(id).unwrap());

        execute_identity(
            IdentityArgs {
                action: IdentityAction::Deactivate { id },
            },
            &service,
            &formatter,
        )
        .unwrap();
        assert!(!service.store().identity_exists(id).unwrap());
    }

    #[test]
    fn test_deactivate_unknown() {
        let service = open_service(":memory:", LifecycleConfig::default()).unwrap();
        let formatter = Formatter::new(OutputFormat::Table, false);

        let output = execute_identity(
            IdentityArgs {
                action: IdentityAction::Deactivate {
                    id: IdentityId::new(99).unwrap(),
                },
            },
            &service,
            &formatter,
        )
        .unwrap();
        assert!(output.contains("not registered"));
    }
}
