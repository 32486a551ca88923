//! Backend resource collections

use std::fmt;
use std::str::FromStr;

/// How a resource's create/update payload is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    /// `application/json` body.
    Json,
    /// `multipart/form-data` body with file parts.
    Multipart,
}

/// A content collection exposed by the backend.
///
/// Each variant knows its URL paths. Paths are relative to the backend base
/// URL.
///
/// # Example
///
/// ```
/// use siteadmin_lib::model::Resource;
///
/// let careers: Resource = "careers".parse().unwrap();
/// assert_eq!(careers.item_path("42"), "/careers/42");
/// assert_eq!(Resource::Projects.create_path(None).as_deref(), Some("/projects/add"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    BannerImages,
    BannerPointers,
    Projects,
    Clients,
    Overview,
    Awards,
    Testimonials,
    Careers,
    Gallery,
    GalleryImages,
    Spotlights,
    ContactQueries,
    CareerQueries,
}

impl Resource {
    /// Every resource, in navigation order.
    pub const ALL: [Resource; 13] = [
        Resource::BannerImages,
        Resource::BannerPointers,
        Resource::Projects,
        Resource::Clients,
        Resource::Overview,
        Resource::Awards,
        Resource::Testimonials,
        Resource::Careers,
        Resource::Gallery,
        Resource::GalleryImages,
        Resource::Spotlights,
        Resource::ContactQueries,
        Resource::CareerQueries,
    ];

    /// Returns the kebab-case name used on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Self::BannerImages => "banner-images",
            Self::BannerPointers => "banner-pointers",
            Self::Projects => "projects",
            Self::Clients => "clients",
            Self::Overview => "overview",
            Self::Awards => "awards",
            Self::Testimonials => "testimonials",
            Self::Careers => "careers",
            Self::Gallery => "gallery",
            Self::GalleryImages => "gallery-images",
            Self::Spotlights => "spotlights",
            Self::ContactQueries => "contact-queries",
            Self::CareerQueries => "career-queries",
        }
    }

    /// Returns the human-readable title.
    pub fn label(&self) -> &'static str {
        match self {
            Self::BannerImages => "Banner Images",
            Self::BannerPointers => "Banner Pointers",
            Self::Projects => "Projects",
            Self::Clients => "Valuable Clients",
            Self::Overview => "Overview",
            Self::Awards => "Awards",
            Self::Testimonials => "Testimonials",
            Self::Careers => "Careers",
            Self::Gallery => "Gallery",
            Self::GalleryImages => "Project Images",
            Self::Spotlights => "Spotlights",
            Self::ContactQueries => "Contact Queries",
            Self::CareerQueries => "Career Queries",
        }
    }

    /// Returns the collection path.
    pub fn path(&self) -> &'static str {
        match self {
            Self::BannerImages => "/banner-images",
            Self::BannerPointers => "/pointers",
            Self::Projects => "/projects",
            Self::Clients => "/clients",
            Self::Overview => "/overview",
            Self::Awards => "/awards",
            Self::Testimonials => "/testimonials",
            Self::Careers => "/careers",
            Self::Gallery => "/gallery",
            Self::GalleryImages => "/gallery-image",
            Self::Spotlights => "/spotlights",
            Self::ContactQueries => "/contact-us",
            Self::CareerQueries => "/career-queries",
        }
    }

    /// Returns `true` if records are listed and created under a parent record.
    ///
    /// Gallery images belong to a gallery entry.
    pub fn requires_parent(&self) -> bool {
        matches!(self, Self::GalleryImages)
    }

    /// Returns `false` when [`item_path`](Self::item_path) can't fetch or replace a record.
    ///
    /// `/gallery-image/{id}` answers with a gallery's image list, so images
    /// are changed through caption, priority and thumbnail calls instead.
    pub fn has_record_endpoint(&self) -> bool {
        !matches!(self, Self::GalleryImages)
    }

    /// Returns `true` for the inbound query inboxes, which cannot be edited.
    pub fn is_read_only(&self) -> bool {
        matches!(self, Self::ContactQueries | Self::CareerQueries)
    }

    /// Returns how create/update payloads are encoded.
    pub fn payload_kind(&self) -> PayloadKind {
        match self {
            Self::BannerPointers | Self::Overview | Self::Careers => PayloadKind::Json,
            _ => PayloadKind::Multipart,
        }
    }

    /// Returns the list path, scoped to `parent` for nested resources.
    pub fn list_path(&self, parent: Option<&str>) -> String {
        match parent {
            Some(parent) if self.requires_parent() => self.item_path(parent),
            _ => self.path().to_string(),
        }
    }

    /// Returns the path of a single record.
    pub fn item_path(&self, id: &str) -> String {
        format!("{}/{}", self.path(), urlencoding::encode(id))
    }

    /// Returns the path records are created at, or `None` for read-only resources.
    pub fn create_path(&self, parent: Option<&str>) -> Option<String> {
        let path = match self {
            Self::ContactQueries | Self::CareerQueries => return None,
            Self::Projects => "/projects/add".to_string(),
            Self::BannerImages => "/banner-images/upload".to_string(),
            Self::Spotlights => "/spotlights/upload".to_string(),
            Self::GalleryImages => self.item_path(parent?),
            other => other.path().to_string(),
        };
        Some(path)
    }

    /// Returns the path of the record counter, for resources that have one.
    pub fn count_path(&self) -> Option<String> {
        match self {
            Self::ContactQueries | Self::CareerQueries => Some(format!("{}/count", self.path())),
            _ => None,
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown resource name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown resource '{0}'")]
pub struct ParseResourceError(pub String);

impl FromStr for Resource {
    type Err = ParseResourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Resource::ALL
            .into_iter()
            .find(|r| r.name() == s)
            .ok_or_else(|| ParseResourceError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trip_names() {
        for resource in Resource::ALL {
            assert_eq!(resource.name().parse::<Resource>(), Ok(resource));
        }
        assert!("widgets".parse::<Resource>().is_err());
    }

    #[test]
    fn test_create_paths() {
        assert_eq!(
            Resource::BannerImages.create_path(None).as_deref(),
            Some("/banner-images/upload")
        );
        assert_eq!(
            Resource::Spotlights.create_path(None).as_deref(),
            Some("/spotlights/upload")
        );
        assert_eq!(Resource::Careers.create_path(None).as_deref(), Some("/careers"));
        assert_eq!(Resource::ContactQueries.create_path(None), None);
        assert_eq!(Resource::GalleryImages.create_path(None), None);
        assert_eq!(
            Resource::GalleryImages.create_path(Some("g1")).as_deref(),
            Some("/gallery-image/g1")
        );
    }

    #[test]
    fn test_nested_list_path() {
        assert_eq!(Resource::GalleryImages.list_path(Some("g1")), "/gallery-image/g1");
        assert_eq!(Resource::Gallery.list_path(Some("ignored")), "/gallery");
    }

    #[test]
    fn test_record_endpoints() {
        assert!(Resource::Gallery.has_record_endpoint());
        assert!(Resource::Projects.has_record_endpoint());
        assert!(!Resource::GalleryImages.has_record_endpoint());
    }

    #[test]
    fn test_item_path_encodes_id() {
        assert_eq!(Resource::Awards.item_path("a b"), "/awards/a%20b");
    }

    #[test]
    fn test_count_paths() {
        assert_eq!(
            Resource::ContactQueries.count_path().as_deref(),
            Some("/contact-us/count")
        );
        assert_eq!(Resource::Careers.count_path(), None);
    }
}
