//! Participation request aggregate.
//!
//! A request references exactly one event and one requester; the requester is
//! never the event's owner. Requests are never physically deleted — Canceled
//! and Rejected are terminal states, not removals.

use anyhow::bail;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::{EventId, RequestId, UserId};

/// Status of a participation request.
///
/// `Pending` may move to any of the other three; Confirmed, Rejected and
/// Canceled are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestStatus {
    Pending,
    Confirmed,
    Rejected,
    Canceled,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
            Self::Rejected => "REJECTED",
            Self::Canceled => "CANCELED",
        }
    }

    pub fn parse(s: &str) -> anyhow::Result<Self> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "CONFIRMED" => Ok(Self::Confirmed),
            "REJECTED" => Ok(Self::Rejected),
            "CANCELED" => Ok(Self::Canceled),
            other => bail!("unknown request status: {other}"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Request {
    pub id: RequestId,
    pub user_id: UserId,
    pub event_id: EventId,
    pub created: DateTime<Utc>,
    pub status: RequestStatus,
}

impl Request {
    pub fn new(user_id: UserId, event_id: EventId, now: DateTime<Utc>) -> Self {
        Self {
            id: RequestId::new(),
            user_id,
            event_id,
            created: now,
            status: RequestStatus::Pending,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == RequestStatus::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_requests_are_pending() {
        let request = Request::new(UserId::new(), EventId::new(), Utc::now());
        assert!(request.is_pending());
    }

    #[test]
    fn status_round_trips_through_str() {
        for status in [
            RequestStatus::Pending,
            RequestStatus::Confirmed,
            RequestStatus::Rejected,
            RequestStatus::Canceled,
        ] {
            assert_eq!(RequestStatus::parse(status.as_str()).unwrap(), status);
        }
        assert!(RequestStatus::parse("ACCEPTED").is_err());
    }
}
