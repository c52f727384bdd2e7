use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of the dashboard the assistant panel is attached to.
///
/// Dashboards are addressed either by numeric id or by slug. The query
/// service receives it verbatim as `dashboard_id`; an unset context is sent
/// as `0`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DashboardContext {
    Id(i64),
    Slug(String),
}

impl DashboardContext {
    pub const UNSET: DashboardContext = DashboardContext::Id(0);

    pub fn is_unset(&self) -> bool {
        matches!(self, DashboardContext::Id(0))
    }
}

impl Default for DashboardContext {
    fn default() -> Self {
        Self::UNSET
    }
}

impl fmt::Display for DashboardContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DashboardContext::Id(id) => write!(f, "{}", id),
            DashboardContext::Slug(slug) => write!(f, "{}", slug),
        }
    }
}

impl FromStr for DashboardContext {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Ok(Self::UNSET);
        }
        Ok(match trimmed.parse::<i64>() {
            Ok(id) => DashboardContext::Id(id),
            Err(_) => DashboardContext::Slug(trimmed.to_string()),
        })
    }
}

impl From<i64> for DashboardContext {
    fn from(id: i64) -> Self {
        DashboardContext::Id(id)
    }
}

impl From<Option<DashboardContext>> for DashboardContext {
    fn from(ctx: Option<DashboardContext>) -> Self {
        ctx.unwrap_or_default()
    }
}
