//! Sidebar navigation.
//!
//! The navigation tree is plain configuration: [`NavigationConfig`] carries
//! every link and is handed to [`Sidebar::new`]. The default mirrors the
//! back office's standard sidebar and can be replaced from the config file.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The signed-in user shown in the sidebar footer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavUser {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Avatar image path.
    #[serde(default)]
    pub avatar: String,
}

/// A leaf link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavLink {
    /// Link text.
    pub title: String,
    /// Target path.
    pub url: String,
    /// Icon name, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl NavLink {
    fn new(title: &str, url: &str, icon: Option<&str>) -> Self {
        Self {
            title: title.to_string(),
            url: url.to_string(),
            icon: icon.map(str::to_string),
        }
    }
}

/// A collapsible group of links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavGroup {
    /// Group heading.
    pub title: String,
    /// Landing path of the group.
    pub url: String,
    /// Icon name, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Child links.
    #[serde(default)]
    pub items: Vec<NavLink>,
}

/// Complete sidebar contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Product name in the sidebar header.
    pub brand: String,
    /// Signed-in user.
    pub user: NavUser,
    /// Top-level links.
    pub main: Vec<NavLink>,
    /// Registration groups.
    pub registration: Vec<NavGroup>,
    /// Links pinned to the bottom.
    pub secondary: Vec<NavLink>,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            brand: "Fleetex.".to_string(),
            user: NavUser {
                name: "shadcn".to_string(),
                email: "m@example.com".to_string(),
                avatar: "/avatars/shadcn.jpg".to_string(),
            },
            main: vec![NavLink::new("Admin Dashboard", "/dashboard", Some("dashboard"))],
            registration: vec![
                NavGroup {
                    title: "Driver Management".to_string(),
                    url: "/dashboard/driver-management".to_string(),
                    icon: Some("users-group".to_string()),
                    items: vec![
                        NavLink::new(
                            "Driver Registration",
                            "/dashboard/driver-management",
                            None,
                        ),
                        NavLink::new(
                            "Add Driver",
                            "/dashboard/driver-management/add-driver",
                            None,
                        ),
                    ],
                },
                NavGroup {
                    title: "Vehicle Management".to_string(),
                    url: "/dashboard/vehicle-management".to_string(),
                    icon: Some("users-group".to_string()),
                    items: vec![NavLink::new(
                        "Vehicle Registration",
                        "/dashboard/vehicle-management",
                        None,
                    )],
                },
            ],
            secondary: vec![
                NavLink::new("Settings", "/settings", Some("settings")),
                NavLink::new("Get Help", "/help", Some("help")),
            ],
        }
    }
}

/// A sidebar built from a [`NavigationConfig`].
#[derive(Debug, Clone)]
pub struct Sidebar {
    config: NavigationConfig,
}

impl Sidebar {
    /// Build a sidebar.
    #[must_use]
    pub fn new(config: NavigationConfig) -> Self {
        Self { config }
    }

    /// The underlying configuration.
    #[must_use]
    pub fn config(&self) -> &NavigationConfig {
        &self.config
    }

    /// Titles leading to `path`: a top-level or secondary link, or a group
    /// followed by its matching child.
    ///
    /// Exact URL matches win; otherwise the group with the longest URL
    /// prefix of `path` is returned on its own. Empty if nothing matches.
    #[must_use]
    pub fn active_trail(&self, path: &str) -> Vec<String> {
        let path = normalize(path);

        if let Some(link) = self
            .config
            .main
            .iter()
            .chain(&self.config.secondary)
            .find(|l| normalize(&l.url) == path)
        {
            return vec![link.title.clone()];
        }

        for group in &self.config.registration {
            if let Some(item) = group.items.iter().find(|i| normalize(&i.url) == path) {
                return vec![group.title.clone(), item.title.clone()];
            }
        }

        self.config
            .registration
            .iter()
            .filter(|g| is_prefix(normalize(&g.url), path))
            .max_by_key(|g| normalize(&g.url).len())
            .map(|g| vec![g.title.clone()])
            .unwrap_or_default()
    }
}

fn normalize(path: &str) -> &str {
    let trimmed = path.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        "/"
    } else {
        trimmed
    }
}

fn is_prefix(base: &str, path: &str) -> bool {
    if base == "/" {
        return path.starts_with('/');
    }
    path == base || (path.starts_with(base) && path[base.len()..].starts_with('/'))
}

impl fmt::Display for Sidebar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = &self.config;
        writeln!(f, "{}", c.brand)?;
        for link in &c.main {
            writeln!(f, "  {}  {}", link.title, link.url)?;
        }
        writeln!(f, "Registration")?;
        for group in &c.registration {
            writeln!(f, "  {}  {}", group.title, group.url)?;
            for item in &group.items {
                writeln!(f, "    {}  {}", item.title, item.url)?;
            }
        }
        for link in &c.secondary {
            writeln!(f, "  {}  {}", link.title, link.url)?;
        }
        write!(f, "{} <{}>", c.user.name, c.user.email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sidebar() -> Sidebar {
        Sidebar::new(NavigationConfig::default())
    }

    #[test]
    fn test_trail_for_main_link() {
        assert_eq!(sidebar().active_trail("/dashboard"), ["Admin Dashboard"]);
        assert_eq!(sidebar().active_trail("/help/"), ["Get Help"]);
    }

    #[test]
    fn test_trail_for_group_item() {
        assert_eq!(
            sidebar().active_trail("/dashboard/driver-management/add-driver"),
            ["Driver Management", "Add Driver"]
        );
    }

    #[test]
    fn test_trail_by_prefix() {
        assert_eq!(
            sidebar().active_trail("/dashboard/driver-management/42"),
            ["Driver Management"]
        );
        assert!(sidebar()
            .active_trail("/dashboard/driver-management-old")
            .is_empty());
    }

    #[test]
    fn test_root_group_prefixes_every_path() {
        let mut config = NavigationConfig::default();
        config.registration[0].url = "/".to_string();
        let sidebar = Sidebar::new(config);

        let first = sidebar.config().registration[0].title.clone();
        assert_eq!(sidebar.active_trail("/reports/weekly"), [first]);
        // a longer matching group still wins
        assert_eq!(
            sidebar.active_trail("/dashboard/vehicle-management/9"),
            [sidebar.config().registration[1].title.clone()]
        );
    }

    #[test]
    fn test_is_prefix() {
        assert!(is_prefix("/", "/x"));
        assert!(is_prefix("/", "/"));
        assert!(is_prefix("/a", "/a/b"));
        assert!(!is_prefix("/a", "/ab"));
    }

    #[test]
    fn test_unknown_path() {
        assert!(sidebar().active_trail("/nowhere").is_empty());
    }

    #[test]
    fn test_config_from_toml_like_json() {
        let config: NavigationConfig = serde_json::from_str(
            r#"{"brand": "Depot", "main": [{"title": "Home", "url": "/"}]}"#,
        )
        .unwrap();
        assert_eq!(config.brand, "Depot");
        assert_eq!(config.main[0].icon, None);
        assert_eq!(config.secondary.len(), 2);
        assert_eq!(Sidebar::new(config).active_trail(""), ["Home"]);
    }

    #[test]
    fn test_display_lists_everything() {
        let text = sidebar().to_string();
        assert!(text.starts_with("Fleetex."));
        assert!(text.contains("    Add Driver  /dashboard/driver-management/add-driver"));
        assert!(text.ends_with("shadcn <m@example.com>"));
    }
}
