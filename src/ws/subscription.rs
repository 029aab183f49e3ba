//! Per-connection subscription manager.
//!
//! Tracks which dashboard views a WebSocket client watches and provides
//! server-side event filtering.

use std::collections::HashSet;

use crate::domain::AdminView;

/// Manages the set of view subscriptions for a single WebSocket connection.
#[derive(Debug, Default)]
pub struct SubscriptionManager {
    /// Subscribed views. If `subscribe_all` is true, this set is ignored.
    views: HashSet<AdminView>,
    /// Whether the client subscribes to every view (wildcard `"*"`).
    subscribe_all: bool,
}

impl SubscriptionManager {
    /// Creates a new empty subscription manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds views to the subscription set. `wildcard` enables `"*"`.
    pub fn subscribe(&mut self, views: &[AdminView], wildcard: bool) {
        if wildcard {
            self.subscribe_all = true;
        }
        self.views.extend(views.iter().copied());
    }

    /// Removes views from the subscription set. `wildcard` clears
    /// everything, including the wildcard itself.
    pub fn unsubscribe(&mut self, views: &[AdminView], wildcard: bool) {
        if wildcard {
            self.subscribe_all = false;
            self.views.clear();
            return;
        }
        for view in views {
            self.views.remove(view);
        }
    }

    /// Returns `true` if events for `view` should be forwarded.
    #[must_use]
    pub fn matches(&self, view: AdminView) -> bool {
        self.subscribe_all || self.views.contains(&view)
    }

    /// Explicitly subscribed views, sorted by name.
    #[must_use]
    pub fn views(&self) -> Vec<AdminView> {
        let mut views: Vec<AdminView> = self.views.iter().copied().collect();
        views.sort_by_key(|v| v.as_str());
        views
    }

    /// Returns `true` if the wildcard subscription is active.
    #[must_use]
    pub fn is_subscribed_all(&self) -> bool {
        self.subscribe_all
    }
}

/// Splits raw view names into known views, the wildcard flag and the
/// names that matched nothing.
#[must_use]
pub fn parse_views(names: &[String]) -> (Vec<AdminView>, bool, Vec<String>) {
    let mut views = Vec::new();
    let mut wildcard = false;
    let mut rejected = Vec::new();
    for name in names {
        if name == "*" {
            wildcard = true;
        } else if let Ok(view) = name.parse::<AdminView>() {
            views.push(view);
        } else {
            rejected.push(name.clone());
        }
    }
    (views, wildcard, rejected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_matches_nothing() {
        let mgr = SubscriptionManager::new();
        assert!(!mgr.matches(AdminView::Services));
    }

    #[test]
    fn subscribe_specific_view() {
        let mut mgr = SubscriptionManager::new();
        mgr.subscribe(&[AdminView::Queues], false);
        assert!(mgr.matches(AdminView::Queues));
        assert!(!mgr.matches(AdminView::Gallery));
    }

    #[test]
    fn wildcard_matches_everything() {
        let mut mgr = SubscriptionManager::new();
        mgr.subscribe(&[], true);
        assert!(mgr.matches(AdminView::Services));
        assert!(mgr.matches(AdminView::Gallery));
    }

    #[test]
    fn wildcard_unsubscribe_clears_all() {
        let mut mgr = SubscriptionManager::new();
        mgr.subscribe(&[AdminView::Services], true);
        mgr.unsubscribe(&[], true);
        assert!(!mgr.is_subscribed_all());
        assert!(mgr.views().is_empty());
    }

    #[test]
    fn parse_views_separates_unknown_names() {
        let names = vec!["gallery".to_string(), "*".to_string(), "logs".to_string()];
        let (views, wildcard, rejected) = parse_views(&names);
        assert_eq!(views, vec![AdminView::Gallery]);
        assert!(wildcard);
        assert_eq!(rejected, vec!["logs".to_string()]);
    }
}
