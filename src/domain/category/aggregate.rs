//! Category entity.
//!
//! Categories are either system rows shared by everyone (`user_id` is
//! `None`) or custom rows owned by a single user. System rows are read-only.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    bounded_text, CategoryId, DomainError, UserId, ValidationError, VisibleTo,
};

/// Maximum length for a category name.
pub const MAX_NAME_LENGTH: usize = 50;

/// Maximum length for a category slug.
pub const MAX_SLUG_LENGTH: usize = 60;

/// Maximum length for an icon (an emoji or a short icon name).
pub const MAX_ICON_LENGTH: usize = 50;

/// Color used when none is given.
pub const DEFAULT_COLOR: &str = "#00d4aa";

/// System categories seeded for every installation: name, slug, icon, color.
pub const SYSTEM_CATEGORIES: [(&str, &str, &str, &str); 7] = [
    ("Career", "career", "💼", "#3b82f6"),
    ("Finance", "finance", "💰", "#22c55e"),
    ("Health", "health", "❤️", "#ef4444"),
    ("Relationships", "relationships", "🤝", "#f59e0b"),
    ("Education", "education", "📚", "#8b5cf6"),
    ("Lifestyle", "lifestyle", "🌱", "#14b8a6"),
    ("Business", "business", "📈", "#6366f1"),
];

/// A system or custom category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    id: CategoryId,
    user_id: Option<UserId>,
    name: String,
    slug: String,
    icon: Option<String>,
    color: String,
    display_order: i32,
    is_system: bool,
}

impl Category {
    /// Create a custom category owned by `owner`.
    ///
    /// The slug is derived from the name unless one is supplied.
    pub fn create(
        id: CategoryId,
        owner: UserId,
        fields: NewCategory,
        display_order: i32,
    ) -> Result<Self, DomainError> {
        let name = bounded_text("name", &fields.name, MAX_NAME_LENGTH)?;
        let slug = match fields.slug {
            Some(slug) => validate_slug(&slug)?,
            None => slug_from_name(&name)?,
        };
        let icon = validate_icon(fields.icon)?;
        let color = match fields.color {
            Some(color) => validate_color(&color)?,
            None => DEFAULT_COLOR.to_string(),
        };

        Ok(Self {
            id,
            user_id: Some(owner),
            name,
            slug,
            icon,
            color,
            display_order,
            is_system: false,
        })
    }

    /// The built-in categories, in seed order.
    pub fn system_defaults() -> Vec<Self> {
        SYSTEM_CATEGORIES
            .iter()
            .enumerate()
            .map(|(order, (name, slug, icon, color))| Self {
                id: CategoryId::new(),
                user_id: None,
                name: name.to_string(),
                slug: slug.to_string(),
                icon: Some(icon.to_string()),
                color: color.to_string(),
                display_order: order as i32,
                is_system: true,
            })
            .collect()
    }

    /// Reconstitute a category from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: CategoryId,
        user_id: Option<UserId>,
        name: String,
        slug: String,
        icon: Option<String>,
        color: String,
        display_order: i32,
        is_system: bool,
    ) -> Self {
        Self {
            id,
            user_id,
            name,
            slug,
            icon,
            color,
            display_order,
            is_system,
        }
    }

    pub fn id(&self) -> &CategoryId {
        &self.id
    }

    pub fn user_id(&self) -> Option<&UserId> {
        self.user_id.as_ref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn display_order(&self) -> i32 {
        self.display_order
    }

    pub fn is_system(&self) -> bool {
        self.is_system
    }

    /// True when `other` would collide with this row for the same owner.
    pub fn collides_with(&self, other: &Category) -> bool {
        self.id != other.id
            && self.user_id == other.user_id
            && (self.slug == other.slug || self.name.to_lowercase() == other.name.to_lowercase())
    }

    /// Applies a partial update. A new name re-derives the slug.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` for an empty patch or an invalid field
    pub fn apply_patch(&mut self, patch: CategoryPatch) -> Result<(), DomainError> {
        if patch.is_empty() {
            return Err(DomainError::validation("patch", "No fields to update"));
        }

        let renamed = match patch.name.as_deref() {
            Some(name) => {
                let name = bounded_text("name", name, MAX_NAME_LENGTH)?;
                let slug = slug_from_name(&name)?;
                Some((name, slug))
            }
            None => None,
        };
        let icon = patch.icon.map(validate_icon).transpose()?;
        let color = patch.color.as_deref().map(validate_color).transpose()?;

        if let Some((name, slug)) = renamed {
            self.name = name;
            self.slug = slug;
        }
        if let Some(icon) = icon {
            self.icon = icon;
        }
        if let Some(color) = color {
            self.color = color;
        }
        Ok(())
    }
}

impl VisibleTo for Category {
    fn owner(&self) -> Option<&UserId> {
        self.user_id.as_ref()
    }
}

/// Fields for a new custom category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCategory {
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

impl NewCategory {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Partial update for a custom category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryPatch {
    pub name: Option<String>,
    /// `Some(None)` removes the icon.
    pub icon: Option<Option<String>>,
    pub color: Option<String>,
}

impl CategoryPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.icon.is_none() && self.color.is_none()
    }
}

/// Lowercases `name` and collapses every run of non-alphanumeric ASCII
/// characters into one `-`, with no leading or trailing `-`.
///
/// Non-ASCII letters are dropped, so a name written entirely in another
/// script derives an empty slug and needs an explicit one.
pub fn derive_slug(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;
    for c in name.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }
    slug
}

fn slug_from_name(name: &str) -> Result<String, ValidationError> {
    let slug = derive_slug(name);
    if slug.is_empty() {
        return Err(ValidationError::invalid_format(
            "slug",
            "name must contain at least one letter or digit",
        ));
    }
    Ok(truncate_slug(slug))
}

fn truncate_slug(slug: String) -> String {
    if slug.len() <= MAX_SLUG_LENGTH {
        return slug;
    }
    slug[..MAX_SLUG_LENGTH].trim_end_matches('-').to_string()
}

fn validate_slug(slug: &str) -> Result<String, ValidationError> {
    let slug = slug.trim();
    if slug.is_empty() {
        return Err(ValidationError::empty_field("slug"));
    }
    if slug.len() > MAX_SLUG_LENGTH {
        return Err(ValidationError::too_long("slug", MAX_SLUG_LENGTH, slug.len()));
    }
    if !slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(ValidationError::invalid_format(
            "slug",
            "only lowercase letters, digits and '-' are allowed",
        ));
    }
    Ok(slug.to_string())
}

fn validate_icon(icon: Option<String>) -> Result<Option<String>, ValidationError> {
    match icon.map(|i| i.trim().to_string()).filter(|i| !i.is_empty()) {
        Some(icon) => {
            let len = icon.chars().count();
            if len > MAX_ICON_LENGTH {
                return Err(ValidationError::too_long("icon", MAX_ICON_LENGTH, len));
            }
            Ok(Some(icon))
        }
        None => Ok(None),
    }
}

fn validate_color(color: &str) -> Result<String, ValidationError> {
    let color = color.trim();
    let valid = color
        .strip_prefix('#')
        .map(|hex| (hex.len() == 3 || hex.len() == 6) && hex.chars().all(|c| c.is_ascii_hexdigit()))
        .unwrap_or(false);
    if !valid {
        return Err(ValidationError::invalid_format(
            "color",
            "expected a hex color such as #00d4aa",
        ));
    }
    Ok(color.to_lowercase())
}
