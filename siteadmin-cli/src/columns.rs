//! Per-resource table columns.

use chrono::DateTime;
use siteadmin_lib::Record;
use siteadmin_lib::Resource;
use siteadmin_lib::Value;
use siteadmin_lib::model::Status;
use siteadmin_lib::table::Alignment;
use siteadmin_lib::table::Column;

const EXCERPT_CHARS: usize = 100;

/// Returns the columns listed for `resource`.
pub fn columns_for(resource: Resource) -> Vec<Column> {
    let fields: Vec<Column> = match resource {
        Resource::BannerImages => vec![
            image("imageUrl", "Banner Image"),
            Column::new("altText", "Alt Text").sortable(),
            Column::new("bannerText", "Banner Text").sortable(),
            date("createdAt", "Created At").sortable(),
        ],
        Resource::BannerPointers => vec![
            Column::new("pointer1", "Pointer 1").sortable().min_width(20),
            Column::new("pointer2", "Pointer 2").sortable().min_width(20),
            Column::new("pointer3", "Pointer 3").sortable().min_width(20),
            Column::new("pointer4", "Pointer 4").sortable().min_width(20),
        ],
        Resource::Projects => vec![
            image("imagePath", "Image"),
            Column::new("projectName", "Project Name").sortable(),
            Column::new("category", "Category").sortable(),
            Column::new("locations", "Location")
                .sortable()
                .render(|r: &Record, _| joined(r, "locations")),
            status("isActive", "Status"),
            Column::new("showOnHomePage", "Show on Home").render(|r: &Record, _| {
                let shown = r.flag("showOnHomePage");
                Status::from_label(if shown { "shown" } else { "hidden" })
                    .with_label(if shown { "Shown" } else { "Hidden" })
                    .to_string()
            }),
        ],
        Resource::Clients => vec![
            image("image", "Image"),
            Column::new("altText", "Name").sortable(),
            date("createdAt", "Created At").sortable(),
            status("active", "Status"),
        ],
        Resource::Overview => vec![
            Column::new("area", "Area (sq ft)")
                .sortable()
                .align(Alignment::Right),
            Column::new("deliveredProjects", "Delivered Projects")
                .sortable()
                .align(Alignment::Right),
            Column::new("happyCustomers", "Happy Customers")
                .sortable()
                .align(Alignment::Right),
        ],
        Resource::Awards => vec![
            image("image", "Image"),
            Column::new("altText", "Name").sortable(),
            status("isActive", "Status"),
        ],
        Resource::Testimonials => vec![
            image("logo", "Logo"),
            excerpt("content", "Content"),
            status("isActive", "Status"),
        ],
        Resource::Careers => vec![
            Column::new("role", "Role").sortable(),
            Column::new("position", "Position").sortable(),
            Column::new("experience", "Experience").sortable(),
            Column::new("location", "Location").sortable(),
        ],
        Resource::Gallery => vec![
            image("image", "Image"),
            Column::new("projectName", "Project Name").sortable(),
            Column::new("location", "Location").sortable(),
            Column::new("priority", "Priority")
                .sortable()
                .align(Alignment::Right),
        ],
        Resource::GalleryImages => vec![
            image("originalImagePath", "Image"),
            Column::new("caption", "Caption").render(|r: &Record, _| {
                let caption = r.display("caption");
                if caption.is_empty() {
                    "No caption".to_string()
                } else {
                    caption
                }
            }),
            Column::new("priority", "Priority").align(Alignment::Right),
        ],
        Resource::Spotlights => vec![
            Column::new("spotlightheading", "Heading").sortable(),
            excerpt("spotlightcontent", "Content"),
        ],
        Resource::ContactQueries => vec![
            Column::new("name", "Name").sortable(),
            Column::new("email", "Email").sortable(),
            Column::new("mobile", "Mobile").sortable(),
        ],
        Resource::CareerQueries => vec![
            Column::new("car_name", "Name").sortable(),
            Column::new("car_email", "Email").sortable(),
            Column::new("car_location", "Job Location").sortable(),
        ],
    };

    let mut columns = Vec::with_capacity(fields.len() + 2);
    columns.push(index());
    columns.extend(fields);
    columns.push(Column::new("_id", "ID"));
    columns
}

/// Returns the message shown when a resource has no matching records.
pub fn empty_message(resource: Resource) -> String {
    format!("No {} found", resource.label().to_lowercase())
}

fn index() -> Column {
    Column::new("index", "#")
        .align(Alignment::Right)
        .render(|_: &Record, i| (i + 1).to_string())
}

fn status(key: &'static str, label: &str) -> Column {
    Column::new(key, label).render(move |r: &Record, _| Status::from_flag(r.flag(key)).to_string())
}

/// Shows the stored file name instead of the image.
fn image(key: &'static str, label: &str) -> Column {
    Column::new(key, label).render(move |r: &Record, _| {
        let path = r.display(key);
        path.rsplit('/').next().unwrap_or_default().to_string()
    })
}

fn excerpt(key: &'static str, label: &str) -> Column {
    Column::new(key, label)
        .sortable()
        .min_width(30)
        .render(move |r: &Record, _| truncate(&r.display(key), EXCERPT_CHARS))
}

fn date(key: &'static str, label: &str) -> Column {
    Column::new(key, label).render(move |r: &Record, _| format_date(&r.display(key)))
}

fn joined(record: &Record, key: &str) -> String {
    match record.get(key) {
        Some(Value::List(items)) => items
            .iter()
            .map(|item| item.to_string())
            .collect::<Vec<_>>()
            .join(", "),
        _ => record.display(key),
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Formats an RFC 3339 timestamp as a date; anything else is shown as is.
fn format_date(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|_| raw.to_string())
}
