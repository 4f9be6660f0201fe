//! Request identity supplied by the external auth collaborator.
//!
//! brusio never authenticates anyone. The session service in front of it
//! resolves credentials and hands each request either an authenticated user
//! or the anonymous marker; mutating operations reject the latter.

use uuid::Uuid;

use crate::domain::entities::UserRecord;

#[derive(Debug, Clone)]
pub enum RequestUser {
    Anonymous,
    Authenticated(UserRecord),
}

impl RequestUser {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, RequestUser::Authenticated(_))
    }

    pub fn user(&self) -> Option<&UserRecord> {
        match self {
            RequestUser::Authenticated(user) => Some(user),
            RequestUser::Anonymous => None,
        }
    }

    pub fn id(&self) -> Option<Uuid> {
        self.user().map(|user| user.id)
    }
}

#[cfg(test)]
mod tests {
    use time::OffsetDateTime;

    use super::*;

    #[test]
    fn anonymous_has_no_identity() {
        assert!(!RequestUser::Anonymous.is_authenticated());
        assert!(RequestUser::Anonymous.id().is_none());
    }

    #[test]
    fn authenticated_exposes_the_user() {
        let user = UserRecord {
            id: Uuid::new_v4(),
            username: "leo".to_string(),
            created_at: OffsetDateTime::now_utc(),
        };
        let request_user = RequestUser::Authenticated(user.clone());
        assert!(request_user.is_authenticated());
        assert_eq!(request_user.id(), Some(user.id));
    }
}
