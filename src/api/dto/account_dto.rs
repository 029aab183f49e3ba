//! Session and dashboard responses.

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::AdminIdentity;

/// One entry of the admin home page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct DashboardSection {
    /// Stable identifier (`services`, `queues`, `gallery`, `logs`).
    pub key: &'static str,
    /// Display title.
    pub title: &'static str,
    /// API path backing the section.
    pub path: &'static str,
}

/// Response of `GET /api/v1/dashboard`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DashboardResponse {
    /// Who is signed in.
    pub user: AdminIdentity,
    /// Sections available to that user.
    pub sections: Vec<DashboardSection>,
}

impl DashboardResponse {
    /// Sections for `user`; the activity log is listed for superadmins only.
    #[must_use]
    pub fn for_identity(user: AdminIdentity) -> Self {
        let mut sections = vec![
            DashboardSection {
                key: "services",
                title: "Services",
                path: "/api/v1/services",
            },
            DashboardSection {
                key: "queues",
                title: "Queue",
                path: "/api/v1/queues",
            },
            DashboardSection {
                key: "gallery",
                title: "Gallery",
                path: "/api/v1/gallery",
            },
        ];
        if user.is_superadmin {
            sections.push(DashboardSection {
                key: "logs",
                title: "Activity log",
                path: "/api/v1/logs",
            });
        }
        Self { user, sections }
    }
}
