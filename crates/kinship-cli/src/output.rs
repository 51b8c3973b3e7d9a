//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use kinship_domain::{IdentityId, Relationship};
use kinship_service::{Notice, Reply};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a list of relationships.
    pub fn format_relationships(&self, records: &[Relationship]) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_relationships_json(records),
            OutputFormat::Table => Ok(self.format_relationships_table(records)),
            OutputFormat::Quiet => Ok(records
                .iter()
                .map(|r| r.id.to_string())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Format a single relationship.
    pub fn format_relationship(&self, record: &Relationship) -> Result<String> {
        self.format_relationships(std::slice::from_ref(record))
    }

    /// Format the result of a request: the new record, or the notice.
    pub fn format_reply(&self, reply: &Reply<Relationship>) -> Result<String> {
        match reply {
            Reply::Created(record) => match self.format {
                OutputFormat::Table => Ok(self.success(&format!("Request sent: {}", record.id))),
                _ => self.format_relationship(record),
            },
            Reply::Info(notice) => self.format_notice(*notice),
        }
    }

    /// Format an informational notice.
    pub fn format_notice(&self, notice: Notice) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
                "notice": notice_code(notice),
                "message": notice.message(),
            }))?),
            OutputFormat::Quiet => Ok(notice_code(notice).to_string()),
            OutputFormat::Table => Ok(match notice {
                Notice::Accepted | Notice::Rejected => self.success(notice.message()),
                _ => self.info(notice.message()),
            }),
        }
    }

    /// Format a list of identity ids.
    pub fn format_identities(&self, ids: &[IdentityId]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let values: Vec<i64> = ids.iter().map(|id| id.value()).collect();
                Ok(serde_json::to_string_pretty(&values)?)
            }
            OutputFormat::Table if ids.is_empty() => {
                Ok(self.colorize("No identities found.", "yellow"))
            }
            _ => Ok(ids
                .iter()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    fn format_relationships_json(&self, records: &[Relationship]) -> Result<String> {
        let values: Vec<serde_json::Value> = records
            .iter()
            .map(|r| {
                serde_json::json!({
                    "id": r.id.to_string(),
                    "initiator": r.initiator.value(),
                    "target": r.target.value(),
                    "status": r.status.as_str(),
                    "created_at": r.created_at,
                    "updated_at": r.updated_at,
                })
            })
            .collect();

        Ok(serde_json::to_string_pretty(&values)?)
    }

    fn format_relationships_table(&self, records: &[Relationship]) -> String {
        if records.is_empty() {
            return self.colorize("No relationships found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["ID", "Initiator", "Target", "Status", "Created", "Updated"]);

        for record in records {
            let updated = record
                .updated_at
                .map(|t| t.to_string())
                .unwrap_or_else(|| "-".to_string());
            builder.push_record([
                record.id.to_string(),
                record.initiator.to_string(),
                record.target.to_string(),
                self.status_label(record),
                record.created_at.to_string(),
                updated,
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    fn status_label(&self, record: &Relationship) -> String {
        let color = match record.status {
            kinship_domain::RelationshipStatus::Pending => "yellow",
            kinship_domain::RelationshipStatus::Accepted => "green",
            kinship_domain::RelationshipStatus::Rejected => "red",
        };
        self.colorize(record.status.as_str(), color)
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

/// Stable machine-readable name of a notice
pub fn notice_code(notice: Notice) -> &'static str {
    match notice {
        Notice::AlreadyFriends => "already_friends",
        Notice::RequestPendingFromThem => "request_pending_from_them",
        Notice::RequestAlreadyPending => "request_already_pending",
        Notice::Accepted => "accepted",
        Notice::Rejected => "rejected",
        Notice::AlreadyAccepted => "already_accepted",
        Notice::AlreadyRejected => "already_rejected",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kinship_domain::{NewRelationship, RelationshipId};

    fn create_test_record() -> Relationship {
        NewRelationship::pending(IdentityId::new(1).unwrap(), IdentityId::new(2).unwrap())
            .into_relationship(RelationshipId::new())
    }

    #[test]
    fn test_json_format() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let record = create_test_record();
        let output = formatter.format_relationship(&record).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed[0]["initiator"], 1);
        assert_eq!(parsed[0]["status"], "pending");
        assert!(parsed[0]["updated_at"].is_null());
    }

    #[test]
    fn test_quiet_format() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let record = create_test_record();
        let output = formatter.format_relationship(&record).unwrap();
        assert_eq!(output, record.id.to_string());
    }

    #[test]
    fn test_table_format() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter
            .format_relationships(&[create_test_record()])
            .unwrap();
        assert!(output.contains("Initiator"));
        assert!(output.contains("pending"));
    }

    #[test]
    fn test_empty_relationships() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_relationships(&[]).unwrap();
        assert!(output.contains("No relationships found"));
    }

    #[test]
    fn test_reply_formats() {
        let table = Formatter::new(OutputFormat::Table, false);
        let record = create_test_record();

        let created = table.format_reply(&Reply::Created(record.clone())).unwrap();
        assert_eq!(created, format!("✓ Request sent: {}", record.id));

        let info = table
            .format_reply(&Reply::Info(Notice::AlreadyFriends))
            .unwrap();
        assert_eq!(info, "ℹ you are already friends");

        let quiet = Formatter::new(OutputFormat::Quiet, false);
        let info = quiet
            .format_reply(&Reply::Info(Notice::RequestPendingFromThem))
            .unwrap();
        assert_eq!(info, "request_pending_from_them");
    }

    #[test]
    fn test_notice_json() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_notice(Notice::AlreadyRejected).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["notice"], "already_rejected");
    }

    #[test]
    fn test_identities() {
        let ids = [IdentityId::new(3).unwrap(), IdentityId::new(9).unwrap()];
        let quiet = Formatter::new(OutputFormat::Quiet, false);
        assert_eq!(quiet.format_identities(&ids).unwrap(), "3\n9");

        let json = Formatter::new(OutputFormat::Json, false);
        let parsed: Vec<i64> = serde_json::from_str(&json.format_identities(&ids).unwrap()).unwrap();
        assert_eq!(parsed, vec![3, 9]);
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("test"), "✓ test");
        assert_eq!(formatter.error("bad"), "✗ bad");
    }
}
