//! Application lifecycle as the client observes it.
//!
//! The backend owns every transition; this table only decides how a status
//! is labelled and which buttons a given party sees.

use std::fmt;

use super::types::Roles;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ApplicationStatus {
    Pending,
    Accepted,
    Rejected,
    ServiceStarted,
    Completed,
    WaitingForApproval,
    Approved,
    ProofRejected,
    PaymentSent,
    PaymentReceived,
    Unknown(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusAction {
    Accept,
    Reject,
    Start,
    SubmitProof,
    ApproveProof,
    RejectProof,
    Pay,
    ConfirmPayment,
}

/// Which party may trigger an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actor {
    Owner,
    Client,
    Freelancer,
}

impl Actor {
    fn matches(self, roles: &Roles) -> bool {
        match self {
            Actor::Owner => roles.is_owner,
            Actor::Client => roles.is_client,
            Actor::Freelancer => roles.is_freelancer,
        }
    }
}

pub struct StatusRow {
    pub wire: &'static str,
    pub aliases: &'static [&'static str],
    pub label: &'static str,
    pub badge: &'static str,
    pub actions: &'static [(StatusAction, Actor)],
    pub terminal: bool,
}

/// One row per known status, in lifecycle order.
pub static STATUS_TABLE: [StatusRow; 10] = [
    StatusRow {
        wire: "Pending",
        aliases: &[],
        label: "Pending",
        badge: "badge-pending",
        actions: &[(StatusAction::Accept, Actor::Owner), (StatusAction::Reject, Actor::Owner)],
        terminal: false,
    },
    StatusRow {
        wire: "Accepted",
        aliases: &["approved application"],
        label: "Accepted",
        badge: "badge-accepted",
        actions: &[(StatusAction::Start, Actor::Owner)],
        terminal: false,
    },
    StatusRow {
        wire: "Rejected",
        aliases: &["declined"],
        label: "Rejected",
        badge: "badge-rejected",
        actions: &[],
        terminal: true,
    },
    StatusRow {
        wire: "Service Started",
        aliases: &["started", "in progress", "ongoing"],
        label: "In Progress",
        badge: "badge-progress",
        actions: &[(StatusAction::SubmitProof, Actor::Freelancer)],
        terminal: false,
    },
    StatusRow {
        wire: "Completed",
        aliases: &["complete", "done"],
        label: "Completed",
        badge: "badge-progress",
        actions: &[(StatusAction::SubmitProof, Actor::Freelancer)],
        terminal: false,
    },
    StatusRow {
        wire: "Waiting for Approval",
        aliases: &["awaiting approval", "pending approval"],
        label: "Waiting for Approval",
        badge: "badge-waiting",
        actions: &[
            (StatusAction::ApproveProof, Actor::Client),
            (StatusAction::RejectProof, Actor::Client),
        ],
        terminal: false,
    },
    StatusRow {
        wire: "Approved",
        aliases: &["proof approved"],
        label: "Approved",
        badge: "badge-accepted",
        actions: &[(StatusAction::Pay, Actor::Client)],
        terminal: false,
    },
    StatusRow {
        wire: "Proof Rejected",
        aliases: &["proof declined"],
        label: "Proof Rejected",
        badge: "badge-rejected",
        actions: &[(StatusAction::SubmitProof, Actor::Freelancer)],
        terminal: false,
    },
    StatusRow {
        wire: "Payment Sent",
        aliases: &["paid"],
        label: "Payment Sent",
        badge: "badge-payment",
        actions: &[(StatusAction::ConfirmPayment, Actor::Freelancer)],
        terminal: false,
    },
    StatusRow {
        wire: "Payment Received",
        aliases: &["payment confirmed", "closed"],
        label: "Payment Received",
        badge: "badge-done",
        actions: &[],
        terminal: true,
    },
];

/// Lowercase and collapse separators so "waiting_for_approval" == "Waiting for Approval".
fn normalize(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .split(|c: char| c.is_whitespace() || c == '_' || c == '-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parallel to [`STATUS_TABLE`].
static STATUS_ORDER: [ApplicationStatus; 10] = [
    ApplicationStatus::Pending,
    ApplicationStatus::Accepted,
    ApplicationStatus::Rejected,
    ApplicationStatus::ServiceStarted,
    ApplicationStatus::Completed,
    ApplicationStatus::WaitingForApproval,
    ApplicationStatus::Approved,
    ApplicationStatus::ProofRejected,
    ApplicationStatus::PaymentSent,
    ApplicationStatus::PaymentReceived,
];

impl ApplicationStatus {
    pub fn parse(raw: &str) -> Self {
        let key = normalize(raw);
        STATUS_TABLE
            .iter()
            .position(|row| normalize(row.wire) == key || row.aliases.contains(&key.as_str()))
            .map(|i| STATUS_ORDER[i].clone())
            .unwrap_or_else(|| ApplicationStatus::Unknown(raw.trim().to_string()))
    }

    fn row(&self) -> Option<&'static StatusRow> {
        STATUS_ORDER.iter().position(|s| s == self).map(|i| &STATUS_TABLE[i])
    }

    /// Spelling the backend uses.
    pub fn as_str(&self) -> &str {
        match self {
            ApplicationStatus::Unknown(raw) => raw,
            known => known.row().map(|r| r.wire).unwrap_or(""),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            ApplicationStatus::Unknown(raw) if raw.is_empty() => "Unknown",
            ApplicationStatus::Unknown(raw) => raw,
            known => known.row().map(|r| r.label).unwrap_or("Unknown"),
        }
    }

    pub fn badge(&self) -> &'static str {
        self.row().map(|r| r.badge).unwrap_or("badge-unknown")
    }

    pub fn is_terminal(&self) -> bool {
        self.row().is_some_and(|r| r.terminal)
    }

    /// Actions the party described by `roles` may request in this state.
    pub fn actions_for(&self, roles: &Roles) -> Vec<StatusAction> {
        self.row()
            .map(|r| {
                r.actions
                    .iter()
                    .filter(|(_, actor)| actor.matches(roles))
                    .map(|(action, _)| *action)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn allows(&self, action: StatusAction, roles: &Roles) -> bool {
        self.actions_for(roles).contains(&action)
    }

    /// Known statuses, for filter dropdowns.
    pub fn all() -> &'static [ApplicationStatus] {
        &STATUS_ORDER
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLIENT: Roles = Roles { is_client: true, is_freelancer: false, is_owner: false };
    const FREELANCER: Roles = Roles { is_client: false, is_freelancer: true, is_owner: false };
    const OWNER: Roles = Roles { is_client: true, is_freelancer: false, is_owner: true };

    #[test]
    fn parse_known_spellings() {
        assert_eq!(ApplicationStatus::parse("Waiting for Approval"), ApplicationStatus::WaitingForApproval);
        assert_eq!(ApplicationStatus::parse("waiting_for_approval"), ApplicationStatus::WaitingForApproval);
        assert_eq!(ApplicationStatus::parse("  PENDING "), ApplicationStatus::Pending);
        assert_eq!(ApplicationStatus::parse("Service Started"), ApplicationStatus::ServiceStarted);
        assert_eq!(ApplicationStatus::parse("in-progress"), ApplicationStatus::ServiceStarted);
        assert_eq!(ApplicationStatus::parse("Payment Received"), ApplicationStatus::PaymentReceived);
    }

    #[test]
    fn unknown_status_is_preserved() {
        let s = ApplicationStatus::parse("Disputed");
        assert_eq!(s, ApplicationStatus::Unknown("Disputed".into()));
        assert_eq!(s.as_str(), "Disputed");
        assert_eq!(s.badge(), "badge-unknown");
        assert!(s.actions_for(&OWNER).is_empty());
    }

    #[test]
    fn table_and_order_line_up() {
        for (status, row) in STATUS_ORDER.iter().zip(STATUS_TABLE.iter()) {
            assert_eq!(status.as_str(), row.wire);
            assert_eq!(&ApplicationStatus::parse(row.wire), status);
        }
    }

    #[test]
    fn proof_controls_only_for_client_while_waiting() {
        for status in ApplicationStatus::all() {
            for roles in [CLIENT, FREELANCER, OWNER] {
                let shown = status.allows(StatusAction::ApproveProof, &roles)
                    && status.allows(StatusAction::RejectProof, &roles);
                let expected = *status == ApplicationStatus::WaitingForApproval && roles.is_client;
                assert_eq!(shown, expected, "{status:?} {roles:?}");
            }
        }
    }

    #[test]
    fn accept_reject_only_for_owner_while_pending() {
        assert_eq!(
            ApplicationStatus::Pending.actions_for(&OWNER),
            vec![StatusAction::Accept, StatusAction::Reject]
        );
        assert!(ApplicationStatus::Pending.actions_for(&CLIENT).is_empty());
        assert!(ApplicationStatus::Accepted.actions_for(&FREELANCER).is_empty());
    }

    #[test]
    fn payment_steps_split_between_parties() {
        assert!(ApplicationStatus::Approved.allows(StatusAction::Pay, &CLIENT));
        assert!(!ApplicationStatus::Approved.allows(StatusAction::Pay, &FREELANCER));
        assert!(ApplicationStatus::PaymentSent.allows(StatusAction::ConfirmPayment, &FREELANCER));
        assert!(!ApplicationStatus::PaymentSent.allows(StatusAction::ConfirmPayment, &CLIENT));
    }

    #[test]
    fn terminal_states() {
        assert!(ApplicationStatus::Rejected.is_terminal());
        assert!(ApplicationStatus::PaymentReceived.is_terminal());
        assert!(!ApplicationStatus::Approved.is_terminal());
    }
}
