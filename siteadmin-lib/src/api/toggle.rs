//! How each resource flips its boolean flags.

use reqwest::Method;

use crate::error::Error;
use crate::model::Record;
use crate::model::Resource;

/// The wire form of a flag toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleStrategy {
    /// A dedicated endpoint that flips the flag server-side. No body.
    Endpoint { method: Method, path: String },
    /// `PUT` of just the flipped flag.
    Partial { path: String },
    /// `PUT` of the whole record with the flag flipped.
    FullRecord { path: String },
}

/// Returns the flags a resource can toggle.
pub fn toggle_flags(resource: Resource) -> &'static [&'static str] {
    match resource {
        Resource::Awards | Resource::Testimonials => &["isActive"],
        Resource::GalleryImages => &["isThumbnail"],
        Resource::Projects => &["isActive", "showOnHomePage"],
        Resource::Clients => &["active"],
        _ => &[],
    }
}

/// Resolves how `flag` is toggled on record `id` of `resource`.
pub fn toggle_strategy(resource: Resource, id: &str, flag: &str) -> Result<ToggleStrategy, Error> {
    if !toggle_flags(resource).contains(&flag) {
        return Err(Error::InvalidOperation(format!(
            "{} has no toggleable flag '{}'",
            resource.label(),
            flag
        )));
    }

    let item = resource.item_path(id);
    Ok(match resource {
        Resource::Awards => ToggleStrategy::Endpoint {
            method: Method::PATCH,
            path: format!("{}/toggle-status", item),
        },
        Resource::GalleryImages => ToggleStrategy::Endpoint {
            method: Method::PUT,
            path: format!("{}/toggle-thumbnail", item),
        },
        Resource::Testimonials => ToggleStrategy::Partial { path: item },
        _ => ToggleStrategy::FullRecord { path: item },
    })
}

/// Builds the JSON body sent for a toggle, or `None` for dedicated endpoints.
///
/// A missing or non-boolean flag counts as `false`, so the first toggle sets it.
pub fn toggle_body(strategy: &ToggleStrategy, record: &Record, flag: &str) -> Option<Record> {
    let flipped = !record.flag(flag);
    match strategy {
        ToggleStrategy::Endpoint { .. } => None,
        ToggleStrategy::Partial { .. } => Some(Record::new().set(flag, flipped)),
        ToggleStrategy::FullRecord { .. } => {
            let mut body = record.clone();
            body.insert(flag, flipped);
            Some(body)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategies() {
        assert_eq!(
            toggle_strategy(Resource::Awards, "a1", "isActive").unwrap(),
            ToggleStrategy::Endpoint {
                method: Method::PATCH,
                path: "/awards/a1/toggle-status".to_string()
            }
        );
        assert_eq!(
            toggle_strategy(Resource::GalleryImages, "i1", "isThumbnail").unwrap(),
            ToggleStrategy::Endpoint {
                method: Method::PUT,
                path: "/gallery-image/i1/toggle-thumbnail".to_string()
            }
        );
        assert_eq!(
            toggle_strategy(Resource::Testimonials, "t1", "isActive").unwrap(),
            ToggleStrategy::Partial {
                path: "/testimonials/t1".to_string()
            }
        );
        assert_eq!(
            toggle_strategy(Resource::Projects, "p1", "showOnHomePage").unwrap(),
            ToggleStrategy::FullRecord {
                path: "/projects/p1".to_string()
            }
        );
    }

    #[test]
    fn test_unsupported_flag() {
        assert!(matches!(
            toggle_strategy(Resource::Careers, "c1", "isActive"),
            Err(Error::InvalidOperation(_))
        ));
        assert!(matches!(
            toggle_strategy(Resource::Clients, "c1", "isActive"),
            Err(Error::InvalidOperation(_))
        ));
    }

    #[test]
    fn test_bodies() {
        let record = Record::with_id("p1")
            .set("projectName", "Tower")
            .set("isActive", true);

        let partial = ToggleStrategy::Partial {
            path: String::new(),
        };
        let body = toggle_body(&partial, &record, "isActive").unwrap();
        assert_eq!(body.get_bool("isActive").unwrap(), Some(false));
        assert!(!body.contains("projectName"));

        let full = ToggleStrategy::FullRecord {
            path: String::new(),
        };
        let body = toggle_body(&full, &record, "showOnHomePage").unwrap();
        assert_eq!(body.get_bool("showOnHomePage").unwrap(), Some(true));
        assert_eq!(body.get_string("projectName").unwrap(), Some("Tower"));
        assert_eq!(body.id(), Some("p1"));
    }
}
