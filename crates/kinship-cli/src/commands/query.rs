//! Read-only commands: friends, pending, mutual, show.

use crate::cli::{FriendsArgs, MutualArgs, PendingArgs, ShowArgs};
use crate::error::Result;
use crate::output::Formatter;
use crate::Service;
use kinship_service::PendingDirection;

/// Execute the friends command.
pub fn execute_friends(args: FriendsArgs, service: &Service, formatter: &Formatter) -> Result<String> {
    let friends = service.list_by_user(args.identity)?;
    formatter.format_relationships(&friends)
}

/// Execute the pending command.
pub fn execute_pending(args: PendingArgs, service: &Service, formatter: &Formatter) -> Result<String> {
    let direction = if args.outgoing {
        PendingDirection::Outgoing
    } else {
        PendingDirection::Incoming
    };
    let pending = service.list_pending(args.identity, direction)?;
    formatter.format_relationships(&pending)
}

/// Execute the mutual command.
pub fn execute_mutual(args: MutualArgs, service: &Service, formatter: &Formatter) -> Result<String> {
    if args.ids {
        let ids = service.mutual_friend_ids(args.a, args.b)?;
        return formatter.format_identities(&ids);
    }
    let mutual = service.list_mutual(args.a, args.b)?;
    formatter.format_relationships(&mutual)
}

/// Execute the show command.
pub fn execute_show(args: ShowArgs, service: &Service, formatter: &Formatter) -> Result<String> {
    match service.get_by_id(args.id)? {
        Some(record) => formatter.format_relationship(&record),
        None => Ok(formatter.info(&format!("Relationship {} not found", args.id))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use crate::open_service;
    use kinship_domain::{IdentityId, RelationshipId};
    use kinship_service::{LifecycleConfig, Reply};

    fn ident(v: i64) -> IdentityId {
        IdentityId::new(v).unwrap()
    }

    fn setup(count: i64) -> Service {
        let service = open_service(":memory:", LifecycleConfig::default()).unwrap();
        for id in 1..=count {
            service
                .store()
                .register_identity(ident(id), &format!("user{id}"))
                .unwrap();
        }
        service
    }

    fn befriend(service: &Service, a: i64, b: i64) -> RelationshipId {
        match service.create_request(ident(a), ident(b)).unwrap() {
            Reply::Created(record) => {
                service.accept_request(record.id).unwrap();
                record.id
            }
            Reply::Info(notice) => panic!("unexpected notice {notice:?}"),
        }
    }

    #[test]
    fn test_friends_lists_both_directions() {
        let service = setup(3);
        let first = befriend(&service, 1, 2);
        let second = befriend(&service, 3, 1);
        let formatter = Formatter::new(OutputFormat::Quiet, false);

        let output = execute_friends(FriendsArgs { identity: ident(1) }, &service, &formatter).unwrap();
        let ids: Vec<&str> = output.lines().collect();
        assert_eq!(ids.len(), 2);
        assert!(ids.contains(&first.to_string().as_str()));
        assert!(ids.contains(&second.to_string().as_str()));
    }

    #[test]
    fn test_pending_directions() {
        let service = setup(3);
        service.create_request(ident(2), ident(1)).unwrap();
        service.create_request(ident(1), ident(3)).unwrap();
        let formatter = Formatter::new(OutputFormat::Json, false);

        let incoming = execute_pending(
            PendingArgs {
                identity: ident(1),
                outgoing: false,
            },
            &service,
            &formatter,
        )
        .unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&incoming).unwrap();
        assert_eq!(parsed[0]["initiator"], 2);

        let outgoing = execute_pending(
            PendingArgs {
                identity: ident(1),
                outgoing: true,
            },
            &service,
            &formatter,
        )
        .unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&outgoing).unwrap();
        assert_eq!(parsed[0]["target"], 3);
    }

    #[test]
    fn test_mutual_ids() {
        let service = setup(3);
        befriend(&service, 1, 2);
        befriend(&service, 1, 3);
        befriend(&service, 2, 3);
        let formatter = Formatter::new(OutputFormat::Quiet, false);

        let output = execute_mutual(
            MutualArgs {
                a: ident(1),
                b: ident(2),
                ids: true,
            },
            &service,
            &formatter,
        )
        .unwrap();
        assert_eq!(output, "3");
    }

    #[test]
    fn test_show_missing() {
        let service = setup(1);
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = execute_show(
            ShowArgs {
                id: RelationshipId::new(),
            },
            &service,
            &formatter,
        )
        .unwrap();
        assert!(output.contains("not found"));
    }
}
